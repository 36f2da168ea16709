//! End-to-end import run: read, map, validate, dedupe, submit, record

use std::path::Path;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::dedup::dedupe_rows;
use super::excel::{FileKind, read_sheet};
use super::mapping::{check_headers, map_rows};
use super::recorder::record_history;
use super::store::{AssetStore, HistoryStore};
use super::submit::{BatchSubmitter, ProgressSink, SubmitOptions};
use super::validate::validate_rows;
use super::{
    ActionCounts, ImportBatchResult, ImportError, ImportHistoryEntry, ImportStatus, MappedRow,
    RecordAction, RowDiagnostic,
};

/// Number of per-record rejections shown back to the user
pub const FAILURE_SAMPLE_SIZE: usize = 5;

/// An uploaded spreadsheet
#[derive(Debug, Clone)]
pub struct ImportUpload {
    pub file_name: String,
    pub media_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImportUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: None,
            bytes,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Load an upload from disk, naming it after the file
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn file_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn file_kind(&self) -> Result<FileKind, ImportError> {
        FileKind::detect(&self.file_name, self.media_type.as_deref())
    }
}

/// Records ready for submission, after validation and deduplication
#[derive(Debug, Clone)]
pub struct ImportPlan {
    pub headers: Vec<String>,
    /// Non-blank rows read from the sheet
    pub total_rows: usize,
    pub records: Vec<MappedRow>,
    pub duplicates: Vec<RowDiagnostic>,
}

/// Prepare an upload without contacting any store
///
/// Fails on an unsupported type, an unreadable or empty sheet, a missing
/// identity column, or any row with a blank asset tag. Duplicate rows are
/// dropped and reported, not fatal.
pub fn plan_import(upload: &ImportUpload) -> Result<ImportPlan, ImportError> {
    let kind = upload.file_kind()?;
    let sheet = read_sheet(&upload.bytes, kind)?;

    check_headers(&sheet.headers)?;

    let total_rows = sheet.rows.len();
    let mapped = map_rows(&sheet.rows);
    log::debug!("Mapped {} rows from '{}'", total_rows, upload.file_name);

    let validation = validate_rows(mapped);
    if !validation.is_clean() {
        return Err(ImportError::InvalidRows {
            diagnostics: validation.diagnostics,
        });
    }

    let dedup = dedupe_rows(validation.valid);
    if !dedup.duplicates.is_empty() {
        log::warn!(
            "Dropped {} duplicate row(s) in '{}': row {}",
            dedup.duplicates.len(),
            upload.file_name,
            super::format_row_list(&dedup.duplicates)
        );
    }

    Ok(ImportPlan {
        headers: sheet.headers,
        total_rows,
        records: dedup.kept,
        duplicates: dedup.duplicates,
    })
}

/// Outcome of a run where every chunk was submitted
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub run_id: Uuid,
    pub status: ImportStatus,
    /// Records sent to the store (after deduplication)
    pub processed: usize,
    pub counts: ActionCounts,
    pub results: Vec<ImportBatchResult>,
    pub duplicates: Vec<RowDiagnostic>,
    pub history_recorded: bool,
}

impl ImportSummary {
    /// First few skipped or failed results that carry a reason
    pub fn rejection_sample(&self) -> Vec<&ImportBatchResult> {
        self.results
            .iter()
            .filter(|r| r.action != RecordAction::Created && r.reason.is_some())
            .take(FAILURE_SAMPLE_SIZE)
            .collect()
    }
}

/// Runs imports against an asset store, recording each attempt
pub struct ImportPipeline<'a> {
    assets: &'a dyn AssetStore,
    history: &'a dyn HistoryStore,
    options: SubmitOptions,
}

impl<'a> ImportPipeline<'a> {
    pub fn new(assets: &'a dyn AssetStore, history: &'a dyn HistoryStore) -> Self {
        Self {
            assets,
            history,
            options: SubmitOptions::default(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.options.batch_size = batch_size;
        self
    }

    /// Run one import attempt
    ///
    /// An unsupported file type is rejected without a history entry. Every
    /// other attempt writes exactly one entry, best-effort.
    pub async fn run(
        &self,
        upload: &ImportUpload,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<ImportSummary, ImportError> {
        upload.file_kind()?;

        let run_id = Uuid::new_v4();
        log::info!(
            "Import run {} started for '{}' ({} bytes)",
            run_id,
            upload.file_name,
            upload.file_size()
        );

        let outcome = self.execute(run_id, upload, progress, cancel).await;

        let entry = match &outcome {
            Ok(summary) => ImportHistoryEntry::completed(
                run_id,
                &upload.file_name,
                upload.file_size(),
                summary.processed,
                &summary.counts,
            ),
            Err(e) => {
                if e.is_preflight() {
                    log::error!("Import run {} rejected before submission: {}", run_id, e);
                } else {
                    log::error!("Import run {} aborted: {}", run_id, e);
                }
                ImportHistoryEntry::aborted(
                    run_id,
                    &upload.file_name,
                    upload.file_size(),
                    e.to_string(),
                )
            }
        };

        let recorded = record_history(self.history, &entry).await;

        outcome.map(|summary| ImportSummary {
            history_recorded: recorded,
            ..summary
        })
    }

    async fn execute(
        &self,
        run_id: Uuid,
        upload: &ImportUpload,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<ImportSummary, ImportError> {
        let plan = plan_import(upload)?;
        let records: Vec<_> = plan.records.into_iter().map(|r| r.record).collect();

        log::info!(
            "Run {}: submitting {} of {} rows in batches of {}",
            run_id,
            records.len(),
            plan.total_rows,
            self.options.batch_size
        );

        let submitter = BatchSubmitter::new(self.assets, self.options.clone());
        let results = submitter.submit(&records, progress, cancel).await?;

        let counts = ActionCounts::tally(&results);
        let status = ImportStatus::from_counts(&counts);
        log::info!(
            "Run {} finished: {} ({} created, {} skipped, {} failed)",
            run_id,
            status,
            counts.created,
            counts.skipped,
            counts.failed
        );

        Ok(ImportSummary {
            run_id,
            status,
            processed: records.len(),
            counts,
            results,
            duplicates: plan.duplicates,
            history_recorded: false,
        })
    }
}
