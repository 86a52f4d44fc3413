//! Reading answer sets from files and command-line pairs.

use std::path::Path;

use anyhow::Result;

use crate::bank::{QuestionBank, ValidationWarning};
use crate::error::BankError;
use crate::model::{AnswerSet, OptionCode};

/// Supported answer file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerFormat {
    Toml,
    Json,
}

impl AnswerFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, BankError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(AnswerFormat::Toml),
            Some("json") => Ok(AnswerFormat::Json),
            _ => Err(BankError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Load an answer set from a `.toml` or `.json` file.
///
/// Both formats are a flat map of question id to code, e.g. `Q1 = "A"`.
pub fn load_answer_set(path: &Path) -> Result<AnswerSet> {
    let format = AnswerFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| BankError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_answer_set_str(&content, format, path)
}

/// Parse an answer set from a string (`source_path` is only used in messages).
pub fn parse_answer_set_str(
    content: &str,
    format: AnswerFormat,
    source_path: &Path,
) -> Result<AnswerSet> {
    let answers: AnswerSet = match format {
        AnswerFormat::Toml => toml::from_str(content).map_err(|source| BankError::Toml {
            path: source_path.to_path_buf(),
            source,
        })?,
        AnswerFormat::Json => serde_json::from_str(content).map_err(|source| BankError::Json {
            path: source_path.to_path_buf(),
            source,
        })?,
    };
    tracing::debug!(answers = answers.len(), path = %source_path.display(), "answer set loaded");
    Ok(answers)
}

/// Parse `QUESTION=CODE` pairs such as `Q1=A`.
///
/// Codes are upper-cased and surrounding whitespace is trimmed. A pair with
/// no `=` or an empty question id is an error; an unknown code is kept and
/// will simply be ignored by the engine.
pub fn parse_answer_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<AnswerSet, BankError> {
    let mut answers = AnswerSet::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let Some((id, code)) = pair.split_once('=') else {
            return Err(BankError::InvalidPair(pair.to_string()));
        };
        let id = id.trim();
        if id.is_empty() {
            return Err(BankError::InvalidPair(pair.to_string()));
        }
        answers.insert(id, code.trim().to_uppercase());
    }
    Ok(answers)
}

/// Report answers the engine will silently ignore.
pub fn validate_answers(bank: &QuestionBank, answers: &AnswerSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (id, raw) in answers.iter() {
        let Some(question) = bank.get(id) else {
            warnings.push(ValidationWarning {
                question_id: Some(id.to_string()),
                message: format!("unknown question {id}; answer ignored"),
            });
            continue;
        };

        match raw.parse::<OptionCode>() {
            Ok(code) if question.offers(code) => {}
            Ok(code) => warnings.push(ValidationWarning {
                question_id: Some(id.to_string()),
                message: format!("option {code} is not offered by {id}; answer ignored"),
            }),
            Err(_) => warnings.push(ValidationWarning {
                question_id: Some(id.to_string()),
                message: format!("unrecognized code {raw:?}; answer ignored"),
            }),
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "answer set contains ignored entries");
    }

    warnings
}
