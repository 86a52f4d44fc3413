//! The `coursefit questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use coursefit_core::bank::{section_of, Section};

use crate::config::CoursefitConfig;

pub fn execute(
    section: Option<String>,
    show_options: bool,
    bank_path: Option<PathBuf>,
    config: &CoursefitConfig,
) -> Result<()> {
    let section: Option<Section> = section
        .map(|s| s.parse().map_err(|e: String| anyhow::anyhow!("{}", e)))
        .transpose()?;

    let bank = super::resolve_bank(bank_path, config)?;
    let profile = config.profile()?;

    println!("{} ({} questions)", bank.name, bank.len());

    let mut table = Table::new();
    let mut header = vec!["#", "ID", "Section", "Prompt"];
    if show_options {
        header.push("Options");
    }
    table.set_header(header);

    let mut shown = 0usize;
    for (position, question) in bank.questions_in(&profile, section) {
        let section_label = section_of(&profile, position)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unscored".to_string());
        let mut row = vec![
            Cell::new(position),
            Cell::new(&question.id),
            Cell::new(section_label),
            Cell::new(&question.prompt),
        ];
        if show_options {
            let options = question
                .options
                .iter()
                .map(|o| format!("{}: {}", o.code, o.label))
                .collect::<Vec<_>>()
                .join("\n");
            row.push(Cell::new(options));
        }
        table.add_row(row);
        shown += 1;
    }

    if shown == 0 {
        println!("No questions match.");
    } else {
        println!("{table}");
    }

    Ok(())
}
