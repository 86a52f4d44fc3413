pub mod init;
pub mod questions;
pub mod recommend;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use coursefit_core::bank::{load_question_bank, QuestionBank};

use crate::config::CoursefitConfig;

/// Load the bank named on the command line, then in config, then the built-in one.
fn resolve_bank(flag: Option<PathBuf>, config: &CoursefitConfig) -> Result<QuestionBank> {
    let path = flag.or_else(|| config.bank.clone());
    load_question_bank(path.as_deref())
}
