//! The `coursefit recommend` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use coursefit_core::answers::{load_answer_set, parse_answer_pairs, validate_answers};
use coursefit_core::engine::{ScoreCard, ScoringEngine};
use coursefit_core::model::AnswerSet;
use coursefit_core::recommendation::Recommendation;

use crate::config::CoursefitConfig;

pub fn execute(
    answers_path: Option<PathBuf>,
    pairs: Vec<String>,
    format: Option<String>,
    bank_path: Option<PathBuf>,
    config: &CoursefitConfig,
) -> Result<()> {
    anyhow::ensure!(
        answers_path.is_some() || !pairs.is_empty(),
        "no answers given; pass --answers <file> or --answer QUESTION=CODE"
    );

    let mut answers = match &answers_path {
        Some(path) => load_answer_set(path)?,
        None => AnswerSet::new(),
    };
    answers.extend(parse_answer_pairs(&pairs)?);

    let bank = super::resolve_bank(bank_path, config)?;
    for w in validate_answers(&bank, &answers) {
        eprintln!("Warning: {}", w.message);
    }

    let profile = config.profile()?;
    let engine = ScoringEngine::new(&profile);
    let card = engine.score(&answers);
    let recommendation = engine.decide(&card);

    let format = format.unwrap_or_else(|| config.default_format.clone());
    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&recommendation)?),
        "markdown" | "md" => println!("{}", to_markdown(&recommendation)),
        "text" => print_text(&recommendation, &card),
        other => anyhow::bail!("unknown format: {other} (expected text, json, or markdown)"),
    }

    Ok(())
}

fn print_text(recommendation: &Recommendation, card: &ScoreCard) {
    match recommendation {
        Recommendation::Confident {
            course,
            level,
            confidence,
            rationale,
            ..
        } => {
            println!("Recommended course: {} ({level})", course.title());
            println!("Confidence: {confidence}%");
            println!("\nCourse Focus\n  {}", rationale.focus);
            println!("\nLearning Style Match\n  {}", rationale.style);
            println!("\nAdvice\n  {}", rationale.advice);
        }
        Recommendation::Inconclusive {
            confidence, advice, ..
        } => {
            println!("No clear recommendation");
            println!("Confidence: {confidence}%");
            println!("\nAdvice\n  {advice}");
        }
    }

    let breakdown = recommendation.breakdown();
    let mut table = Table::new();
    table.set_header(vec!["Axis", "Totals", "Leaning", "Confidence"]);
    table.add_row(vec![
        Cell::new("Course"),
        Cell::new(format!("AA {} / AI {}", card.aa, card.ai)),
        Cell::new(recommendation.course()),
        Cell::new(format!("{}%", breakdown.course)),
    ]);
    table.add_row(vec![
        Cell::new("Level"),
        Cell::new(format!("HL {} / SL {}", card.hl, card.sl)),
        Cell::new(recommendation.level()),
        Cell::new(format!("{}%", breakdown.level)),
    ]);
    println!("\n{table}");
}

/// Render a recommendation as a Markdown section.
pub fn to_markdown(recommendation: &Recommendation) -> String {
    let mut md = String::new();
    let breakdown = recommendation.breakdown();

    match recommendation {
        Recommendation::Confident {
            course,
            level,
            confidence,
            rationale,
            ..
        } => {
            md.push_str(&format!(
                "## Recommended: {} ({level})\n\n",
                course.title()
            ));
            md.push_str(&format!(
                "**Confidence:** {confidence}% (course {}%, level {}%)\n\n",
                breakdown.course, breakdown.level
            ));
            md.push_str(&format!("### Course Focus\n\n{}\n\n", rationale.focus));
            md.push_str(&format!("### Learning Style Match\n\n{}\n\n", rationale.style));
            md.push_str(&format!("### Advice\n\n{}\n", rationale.advice));
        }
        Recommendation::Inconclusive {
            confidence, advice, ..
        } => {
            md.push_str("## No clear recommendation\n\n");
            md.push_str(&format!(
                "**Confidence:** {confidence}% (course {}%, level {}%)\n\n",
                breakdown.course, breakdown.level
            ));
            md.push_str(&format!("### Advice\n\n{advice}\n"));
        }
    }

    md
}
