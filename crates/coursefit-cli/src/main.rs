//! coursefit CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "coursefit",
    version,
    about = "Questionnaire-driven IB Mathematics course recommender"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an answer set and print the recommendation
    Recommend {
        /// Answer file (.toml or .json) mapping question IDs to codes
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Individual answers, e.g. --answer Q1=A (override the file)
        #[arg(long = "answer", value_name = "QUESTION=CODE")]
        pairs: Vec<String>,

        /// Output format: text, json, markdown
        #[arg(long)]
        format: Option<String>,

        /// Question bank TOML (defaults to the built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// List the questions in the bank
    Questions {
        /// Only show one section: career, sample, basic
        #[arg(long)]
        section: Option<String>,

        /// Print each question's options
        #[arg(long)]
        options: bool,

        /// Question bank TOML (defaults to the built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Check a question bank (and optionally an answer file) against the scoring profile
    Validate {
        /// Question bank TOML (defaults to the built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Answer file to check for ignored entries
        #[arg(long)]
        answers: Option<PathBuf>,
    },

    /// Create a starter config and an answer template
    Init,
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    // `init` must work even when a broken config is lying around.
    if let Commands::Init = cli.command {
        init_tracing("warn");
        return commands::init::execute();
    }

    let config = config::load_config_from(cli.config.as_deref())?;
    init_tracing(&config.log_level);
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Recommend {
            answers,
            pairs,
            format,
            bank,
        } => commands::recommend::execute(answers, pairs, format, bank, &config),
        Commands::Questions {
            section,
            options,
            bank,
        } => commands::questions::execute(section, options, bank, &config),
        Commands::Validate { bank, answers } => {
            commands::validate::execute(bank, answers, &config)
        }
        Commands::Init => commands::init::execute(),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
