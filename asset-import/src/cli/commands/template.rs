//! `template` command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;

use crate::import::excel::write_template;
use crate::import::{COLUMNS, Field};

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Comma-separated column keys or headers (default: every column)
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Directory for the template file (default: current directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// List the available columns instead of writing a file
    #[arg(long)]
    pub list: bool,
}

pub fn handle_template_command(args: TemplateArgs) -> Result<()> {
    if args.list {
        print_columns();
        return Ok(());
    }

    let selected = match &args.columns {
        Some(names) => parse_columns(names)?,
        None => COLUMNS.iter().map(|c| c.field).collect(),
    };

    let dir = match args.output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let today = chrono::Local::now().date_naive();
    let path = write_template(&selected, &dir, today)?;

    println!(
        "Template written to {}",
        path.display().to_string().bright_green()
    );
    Ok(())
}

fn parse_columns(names: &[String]) -> Result<Vec<Field>> {
    names
        .iter()
        .filter(|n| !n.trim().is_empty())
        .map(|n| n.parse::<Field>().map_err(anyhow::Error::msg))
        .collect()
}

fn print_columns() {
    println!("{:<28} {:<28} {}", "KEY".bold(), "HEADER".bold(), "TYPE".bold());
    for column in COLUMNS {
        println!(
            "{:<28} {:<28} {}",
            column.key,
            column.header,
            format!("{:?}", column.kind).to_lowercase().dimmed()
        );
    }
}
