//! `history` command

use anyhow::Result;
use clap::Args;
use colored::*;

use crate::config::Config;
use crate::config::repository::import_history::DEFAULT_PAGE_SIZE;
use crate::config::repository::{HistoryQuery, SqliteHistoryStore, connect};
use crate::import::{ImportHistoryEntry, ImportStatus};

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Only show runs with this status (success, partial, failed)
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: u32,

    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}

pub async fn handle_history_command(args: HistoryArgs, config: &Config) -> Result<()> {
    let status = args
        .status
        .as_deref()
        .map(str::parse::<ImportStatus>)
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let store = SqliteHistoryStore::new(connect(&config.history_database()).await?);
    let query = HistoryQuery {
        status,
        limit: args.limit,
        offset: args.offset,
    };

    let entries = store.list(&query).await?;
    let total = store.count(status).await?;

    if entries.is_empty() {
        println!("No imports recorded yet.");
        return Ok(());
    }

    println!(
        "{:<20} {:<9} {:>9} {:>8} {:>8} {:>7}  {}",
        "WHEN".bold(),
        "STATUS".bold(),
        "PROCESSED".bold(),
        "CREATED".bold(),
        "SKIPPED".bold(),
        "FAILED".bold(),
        "FILE".bold()
    );
    for entry in &entries {
        print_entry(entry);
    }

    println!();
    println!(
        "Showing {}-{} of {}",
        query.offset as usize + 1,
        query.offset as usize + entries.len(),
        total
    );
    Ok(())
}

fn print_entry(entry: &ImportHistoryEntry) {
    let status = match entry.status {
        ImportStatus::Success => entry.status.to_string().green(),
        ImportStatus::Partial => entry.status.to_string().yellow(),
        ImportStatus::Failed => entry.status.to_string().red(),
    };
    let count = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_else(|| "-".into());

    println!(
        "{:<20} {:<9} {:>9} {:>8} {:>8} {:>7}  {}",
        entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        status,
        count(entry.records_processed),
        count(entry.records_created),
        count(entry.records_skipped),
        count(entry.records_failed),
        entry.file_name
    );

    if let Some(message) = &entry.error_message {
        println!("{:<20} {}", "", message.dimmed());
    }
}
