//! The `coursefit init` command.

use std::path::Path;

use anyhow::Result;

use coursefit_core::bank::{section_of, Question, QuestionBank, Section};
use coursefit_core::model::OptionCode;
use coursefit_core::profile::ScoringProfile;

pub fn execute() -> Result<()> {
    if Path::new("coursefit.toml").exists() {
        println!("coursefit.toml already exists, skipping.");
    } else {
        std::fs::write("coursefit.toml", SAMPLE_CONFIG)?;
        println!("Created coursefit.toml");
    }

    let answers_path = Path::new("answers.toml");
    if answers_path.exists() {
        println!("answers.toml already exists, skipping.");
    } else {
        let bank = QuestionBank::builtin()?;
        std::fs::write(answers_path, answer_template(&bank, &ScoringProfile::ib_math()))?;
        println!("Created answers.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit answers.toml, replacing each skip code with your choice");
    println!("  2. Run: coursefit validate --answers answers.toml");
    println!("  3. Run: coursefit recommend --answers answers.toml");

    Ok(())
}

/// An answer file with every question set to an inert code.
fn answer_template(bank: &QuestionBank, profile: &ScoringProfile) -> String {
    let mut out = String::from("# coursefit answers: one line per question, QUESTION = \"CODE\"\n");

    let mut current: Option<Section> = None;
    for (position, question) in bank.questions_in(profile, None) {
        let section = section_of(profile, position);
        if section != current {
            let heading = match section {
                Some(Section::Career) => "Career and preferences",
                Some(Section::Sample) => "Sample problems",
                Some(Section::Basic) => "Basic skills",
                None => "Unscored",
            };
            out.push_str(&format!("\n# --- {heading} ---\n"));
            current = section;
        }

        out.push_str(&format!("\n# {}\n", question.prompt));
        for option in &question.options {
            out.push_str(&format!("#   {}: {}\n", option.code, option.label));
        }
        let code = inert_code(question, profile, position);
        out.push_str(&format!("{} = \"{code}\"\n", question.id));
    }

    out
}

/// A code the profile gives no weight to for this question.
fn inert_code(
    question: &Question,
    profile: &ScoringProfile,
    position: u32,
) -> OptionCode {
    let key = profile
        .calibration_passes()
        .into_iter()
        .find(|pass| pass.range.contains(position))
        .and_then(|pass| pass.key.get(&question.id).copied());

    question
        .options
        .iter()
        .rev()
        .map(|o| o.code)
        .find(|code| !profile.contributions.contains_key(code) && Some(*code) != key)
        .unwrap_or(OptionCode::F)
}

const SAMPLE_CONFIG: &str = r#"# coursefit configuration

# Path to an external question bank. Leave unset to use the built-in one.
# bank = "banks/ib-math.toml"

# Log filter used when RUST_LOG is not set.
log_level = "warn"

# Output format for `coursefit recommend`: text, json, markdown
default_format = "text"

# Confidence tiers. Below `inconclusive` no course or level is recommended.
[thresholds]
strong = 80
moderate = 60
inconclusive = 40
"#;
