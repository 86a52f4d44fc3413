//! Question bank: loading, listing, and validation against a profile.
//!
//! The engine never reads the bank. It only shares question ids and option
//! codes with it, so the bank is checked separately to catch drift between
//! the two.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::BankError;
use crate::model::OptionCode;
use crate::profile::{question_id, ScoringProfile};

const BUILTIN_BANK: &str = include_str!("../data/ib-math.toml");

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: String,
    pub code: OptionCode,
}

/// A single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier used as the answer key.
    pub id: String,
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// The option carrying `code`, if offered.
    pub fn option(&self, code: OptionCode) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.code == code)
    }

    pub fn offers(&self, code: OptionCode) -> bool {
        self.option(code).is_some()
    }
}

/// An ordered catalog of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    pub questions: Vec<Question>,
}

/// Intermediate TOML structure for bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    version: String,
}

impl QuestionBank {
    /// The IB Mathematics bank compiled into the crate.
    pub fn builtin() -> Result<Self> {
        parse_question_bank_str(BUILTIN_BANK, Path::new("<builtin>"))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions with their 1-based positions, optionally restricted to one section.
    pub fn questions_in<'a>(
        &'a self,
        profile: &'a ScoringProfile,
        section: Option<Section>,
    ) -> impl Iterator<Item = (u32, &'a Question)> + 'a {
        self.questions
            .iter()
            .enumerate()
            .map(|(index, q)| (index as u32 + 1, q))
            .filter(move |(position, _)| {
                section.is_none() || section_of(profile, *position) == section
            })
    }
}

/// Parse a bank file from disk.
pub fn parse_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path).map_err(|source| BankError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_question_bank_str(&content, path)
}

/// Parse a bank from a TOML string (`source_path` is only used in messages).
pub fn parse_question_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content).map_err(|source| BankError::Toml {
        path: source_path.to_path_buf(),
        source,
    })?;

    if parsed.questions.is_empty() {
        return Err(BankError::Empty(parsed.bank.id).into());
    }

    tracing::debug!(
        bank = %parsed.bank.id,
        questions = parsed.questions.len(),
        "question bank loaded"
    );

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        version: parsed.bank.version,
        questions: parsed.questions,
    })
}

/// Load a bank from `path`, or the built-in bank when no path is given.
pub fn load_question_bank(path: Option<&Path>) -> Result<QuestionBank> {
    match path {
        Some(p) => parse_question_bank(p)
            .with_context(|| format!("failed to load question bank: {}", p.display())),
        None => QuestionBank::builtin(),
    }
}

/// Which scoring pass reads a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Career and preference questions.
    Career,
    /// Applied sample problems.
    Sample,
    /// Basic skill checks.
    Basic,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Career => write!(f, "career"),
            Section::Sample => write!(f, "sample"),
            Section::Basic => write!(f, "basic"),
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "career" | "preference" => Ok(Section::Career),
            "sample" => Ok(Section::Sample),
            "basic" => Ok(Section::Basic),
            other => Err(format!("unknown section: {other}")),
        }
    }
}

/// The section for a 1-based bank position, or `None` if no pass reads it.
pub fn section_of(profile: &ScoringProfile, position: u32) -> Option<Section> {
    if profile.preference.contains(position) {
        Some(Section::Career)
    } else if profile.sample_problems.range.contains(position) {
        Some(Section::Sample)
    } else if profile.basic_skills.range.contains(position) {
        Some(Section::Basic)
    } else {
        None
    }
}

/// A warning from bank validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(id: &str, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Check that a bank still lines up with the profile that scores it.
pub fn validate_bank(bank: &QuestionBank, profile: &ScoringProfile) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for q in &bank.questions {
        if !seen_ids.insert(q.id.as_str()) {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("duplicate question ID: {}", q.id),
            ));
        }
    }

    let last = profile.last_position();
    if (bank.len() as u32) < last {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "profile reads {last} questions but the bank only has {}",
                bank.len()
            ),
        });
    }

    for (position, q) in bank.questions_in(profile, None) {
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning::question(&q.id, "prompt is empty"));
        }

        let mut seen_codes = HashSet::new();
        for option in &q.options {
            if !seen_codes.insert(option.code) {
                warnings.push(ValidationWarning::question(
                    &q.id,
                    format!("option code {} is offered twice", option.code),
                ));
            }
        }

        let Some(section) = section_of(profile, position) else {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("position {position} is not read by any scoring pass"),
            ));
            continue;
        };

        let expected_id = question_id(position);
        if q.id != expected_id {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("position {position} should hold {expected_id}; the profile will score the wrong question"),
            ));
        }

        match section {
            Section::Career => {
                for code in profile.contributions.keys() {
                    if !q.offers(*code) {
                        warnings.push(ValidationWarning::question(
                            &q.id,
                            format!("weighted option {code} is not offered"),
                        ));
                    }
                }
                if q
                    .options
                    .iter()
                    .all(|o| profile.contributions.contains_key(&o.code))
                {
                    warnings.push(ValidationWarning::question(&q.id, "no skip option offered"));
                }
            }
            Section::Sample | Section::Basic => {
                let pass = if section == Section::Sample {
                    &profile.sample_problems
                } else {
                    &profile.basic_skills
                };
                match pass.key.get(&expected_id) {
                    Some(correct) if !q.offers(*correct) => {
                        warnings.push(ValidationWarning::question(
                            &q.id,
                            format!("answer key {correct} is not an offered option"),
                        ));
                    }
                    Some(_) => {}
                    None => warnings.push(ValidationWarning::question(
                        &q.id,
                        "no answer key entry; this question can never score",
                    )),
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SMALL_BANK: &str = r#"
[bank]
id = "small"
name = "Small"

[[questions]]
id = "Q1"
prompt = "Pick one"
options = [
    { label = "Theory, hard", code = "A" },
    { label = "Theory, light", code = "B" },
    { label = "Applied, hard", code = "C" },
    { label = "Applied, light", code = "D" },
    { label = "Skip", code = "E" },
]
"#;

    #[test]
    fn builtin_bank_parses() {
        let bank = QuestionBank::builtin().unwrap();
        assert_eq!(bank.id, "ib-math");
        assert_eq!(bank.len(), 36);
        assert_eq!(bank.questions[0].id, "Q1");
        assert_eq!(bank.questions[35].id, "Q36");
        assert_eq!(bank.get("Q30").unwrap().options.len(), 6);
    }

    #[test]
    fn builtin_bank_matches_builtin_profile() {
        let bank = QuestionBank::builtin().unwrap();
        let warnings = validate_bank(&bank, &ScoringProfile::ib_math());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn builtin_answer_keys_name_offered_options() {
        let bank = QuestionBank::builtin().unwrap();
        let q32 = bank.get("Q32").unwrap();
        assert_eq!(q32.option(OptionCode::A).unwrap().label, "18");
        let q36 = bank.get("Q36").unwrap();
        assert_eq!(q36.option(OptionCode::B).unwrap().label, "12.5%");
    }

    #[test]
    fn sections_follow_profile_ranges() {
        let profile = ScoringProfile::ib_math();
        let bank = QuestionBank::builtin().unwrap();
        assert_eq!(bank.questions_in(&profile, Some(Section::Career)).count(), 30);
        let sample: Vec<&str> = bank
            .questions_in(&profile, Some(Section::Sample))
            .map(|(_, q)| q.id.as_str())
            .collect();
        assert_eq!(sample, vec!["Q31", "Q32", "Q33", "Q34"]);
        assert_eq!(section_of(&profile, 36), Some(Section::Basic));
        assert_eq!(section_of(&profile, 37), None);
    }

    #[test]
    fn section_parse() {
        assert_eq!("Career".parse::<Section>().unwrap(), Section::Career);
        assert_eq!("basic".parse::<Section>().unwrap(), Section::Basic);
        assert!("bonus".parse::<Section>().is_err());
    }

    #[test]
    fn short_bank_warns_about_missing_questions() {
        let bank = parse_question_bank_str(SMALL_BANK, &PathBuf::from("small.toml")).unwrap();
        let warnings = validate_bank(&bank, &ScoringProfile::ib_math());
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("only has 1")));
    }

    #[test]
    fn reordered_bank_warns_about_drift() {
        let mut bank = QuestionBank::builtin().unwrap();
        bank.questions.swap(30, 31);
        let warnings = validate_bank(&bank, &ScoringProfile::ib_math());
        assert!(warnings
            .iter()
            .any(|w| w.question_id.as_deref() == Some("Q32") && w.message.contains("should hold Q31")));
    }

    #[test]
    fn missing_skip_and_weighted_options_warn() {
        let mut bank = QuestionBank::builtin().unwrap();
        bank.questions[0].options.retain(|o| o.code != OptionCode::E);
        bank.questions[1].options.retain(|o| o.code != OptionCode::C);
        let warnings = validate_bank(&bank, &ScoringProfile::ib_math());
        assert!(warnings
            .iter()
            .any(|w| w.question_id.as_deref() == Some("Q1") && w.message == "no skip option offered"));
        assert!(warnings
            .iter()
            .any(|w| w.question_id.as_deref() == Some("Q2") && w.message.contains("weighted option C")));
    }

    #[test]
    fn duplicate_ids_and_codes_warn() {
        let mut bank = QuestionBank::builtin().unwrap();
        bank.questions[3].id = "Q3".into();
        let dup = bank.questions[4].options[0].clone();
        bank.questions[4].options.push(dup);
        let warnings = validate_bank(&bank, &ScoringProfile::ib_math());
        assert!(warnings.iter().any(|w| w.message.contains("duplicate question ID: Q3")));
        assert!(warnings.iter().any(|w| w.message.contains("offered twice")));
    }

    #[test]
    fn extra_questions_are_flagged_as_unscored() {
        let mut bank = QuestionBank::builtin().unwrap();
        let mut extra = bank.questions[35].clone();
        extra.id = "Q37".into();
        bank.questions.push(extra);
        let warnings = validate_bank(&bank, &ScoringProfile::ib_math());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("not read by any scoring pass"));
    }

    #[test]
    fn answer_key_pointing_at_missing_option_warns() {
        let mut bank = QuestionBank::builtin().unwrap();
        bank.questions[34].options.retain(|o| o.code != OptionCode::B);
        let warnings = validate_bank(&bank, &ScoringProfile::ib_math());
        assert!(warnings
            .iter()
            .any(|w| w.question_id.as_deref() == Some("Q35") && w.message.contains("answer key B")));
    }

    #[test]
    fn empty_bank_is_an_error() {
        let toml = "[bank]\nid = \"none\"\nname = \"None\"\n";
        let err = parse_question_bank_str(toml, &PathBuf::from("none.toml")).unwrap_err();
        assert!(err.to_string().contains("has no questions"));
    }

    #[test]
    fn malformed_bank_is_an_error() {
        let result = parse_question_bank_str("this is not [valid toml }{", &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_option_code_is_rejected() {
        let toml = SMALL_BANK.replace("code = \"E\"", "code = \"Z\"");
        assert!(parse_question_bank_str(&toml, &PathBuf::from("z.toml")).is_err());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.toml");
        std::fs::write(&path, SMALL_BANK).unwrap();
        let bank = load_question_bank(Some(&path)).unwrap();
        assert_eq!(bank.id, "small");

        let missing = load_question_bank(Some(&dir.path().join("missing.toml")));
        assert!(missing.is_err());
    }
}
