//! `import` command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use tokio_util::sync::CancellationToken;

use crate::api::AssetApiClient;
use crate::config::Config;
use crate::config::repository::{SqliteHistoryStore, connect};
use crate::import::submit::ProgressEvent;
use crate::import::{
    ImportPipeline, ImportPlan, ImportStatus, ImportSummary, ImportUpload, RecordAction,
    format_row_list, plan_import,
};

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Spreadsheet to import (.xlsx, .xls or .csv)
    pub file: PathBuf,

    /// Declared media type, used when the file name has no usable extension
    #[arg(long)]
    pub media_type: Option<String>,

    /// Records per request (overrides import.batch_size)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_size: Option<u64>,

    /// Validate and deduplicate only; nothing is sent or recorded
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn handle_import_command(args: ImportArgs, config: &Config) -> Result<()> {
    if !args.file.exists() {
        anyhow::bail!("File does not exist: {}", args.file.display());
    }

    let mut upload = ImportUpload::from_path(&args.file).await?;
    if let Some(media_type) = args.media_type {
        upload = upload.with_media_type(media_type);
    }

    if args.dry_run {
        let plan = plan_import(&upload)?;
        print_plan(&upload, &plan);
        return Ok(());
    }

    let client = AssetApiClient::from_config(config)?;
    let pool = connect(&config.history_database()).await?;
    let history = SqliteHistoryStore::new(pool);
    let batch_size = args
        .batch_size
        .map(|n| n as usize)
        .unwrap_or(config.import.batch_size);

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupt received, stopping after the current batch");
            interrupt.cancel();
        }
    });

    println!(
        "Importing {} to {}",
        upload.file_name.bright_cyan(),
        client.base_url().dimmed()
    );

    let progress = |event: ProgressEvent| {
        println!(
            "  {} {}/{} records ({}%)",
            "→".dimmed(),
            event.processed_count,
            event.total_count,
            event.percentage
        );
    };

    let summary = ImportPipeline::new(&client, &history)
        .with_batch_size(batch_size)
        .run(&upload, &progress, &cancel)
        .await
        .with_context(|| format!("Import of '{}' failed", upload.file_name))?;

    print_summary(&summary);
    Ok(())
}

fn print_plan(upload: &ImportUpload, plan: &ImportPlan) {
    println!("{} {}", "Dry run:".bold(), upload.file_name.bright_cyan());
    println!("  Columns: {}", plan.headers.join(", ").dimmed());
    println!("  Rows read: {}", plan.total_rows);
    println!("  Records to submit: {}", plan.records.len().to_string().green());

    let with_audit = plan
        .records
        .iter()
        .filter(|r| r.record.has_audit_seed())
        .count();
    if with_audit > 0 {
        println!("  Records with audit details: {}", with_audit);
    }

    if !plan.duplicates.is_empty() {
        println!(
            "  {} {} duplicate row(s) dropped: row {}",
            "!".yellow(),
            plan.duplicates.len(),
            format_row_list(&plan.duplicates)
        );
    }
}

fn print_summary(summary: &ImportSummary) {
    let status = match summary.status {
        ImportStatus::Success => summary.status.to_string().green().bold(),
        ImportStatus::Partial => summary.status.to_string().yellow().bold(),
        ImportStatus::Failed => summary.status.to_string().red().bold(),
    };

    println!();
    println!("Import {} ({})", status, summary.run_id.to_string().dimmed());
    println!(
        "  {} created, {} skipped, {} failed of {} processed",
        summary.counts.created.to_string().green(),
        summary.counts.skipped.to_string().yellow(),
        summary.counts.failed.to_string().red(),
        summary.processed
    );

    if !summary.duplicates.is_empty() {
        println!(
            "  {} {} duplicate row(s) in file were not submitted: row {}",
            "!".yellow(),
            summary.duplicates.len(),
            format_row_list(&summary.duplicates)
        );
    }

    let sample = summary.rejection_sample();
    if !sample.is_empty() {
        println!("  Sample:");
        for result in sample {
            let action = match result.action {
                RecordAction::Failed => result.action.to_string().red(),
                _ => result.action.to_string().yellow(),
            };
            println!(
                "    {} {} {}",
                action,
                result.asset_tag_id,
                result.reason.as_deref().unwrap_or("").dimmed()
            );
        }
    }

    if !summary.history_recorded {
        println!("  {} import history could not be saved", "!".yellow());
    }
}
