//! The `coursefit validate` command.

use std::path::PathBuf;

use anyhow::Result;

use coursefit_core::answers::{load_answer_set, validate_answers};
use coursefit_core::bank::{validate_bank, ValidationWarning};

use crate::config::CoursefitConfig;

pub fn execute(
    bank_path: Option<PathBuf>,
    answers_path: Option<PathBuf>,
    config: &CoursefitConfig,
) -> Result<()> {
    let bank = super::resolve_bank(bank_path, config)?;
    let profile = config.profile()?;

    let version = if bank.version.is_empty() {
        "?"
    } else {
        bank.version.as_str()
    };
    println!(
        "Question bank: {} v{version} ({} questions)",
        bank.name,
        bank.len()
    );

    let mut warnings = validate_bank(&bank, &profile);

    if let Some(path) = &answers_path {
        let answers = load_answer_set(path)?;
        println!("Answer file: {} ({} answers)", path.display(), answers.len());
        warnings.extend(validate_answers(&bank, &answers));
    }

    print_warnings(&warnings);

    if warnings.is_empty() {
        println!("Question bank matches the scoring profile.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}

fn print_warnings(warnings: &[ValidationWarning]) {
    for w in warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
}
