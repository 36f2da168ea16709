//! Sequential batch submission to the asset store

use tokio_util::sync::CancellationToken;

use crate::import::store::{AssetStore, StoreError};
use crate::import::{CanonicalAssetRecord, ImportBatchResult, ImportError};

use super::progress::{ProgressEvent, ProgressSink};

/// Default number of records per bulk-create call
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Options for batch submission
#[derive(Debug, Clone)]
pub struct SubmitOptions {
    /// Maximum records per bulk-create call
    pub batch_size: usize,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Accumulated state after each completed chunk
#[derive(Debug, Default)]
struct SubmitProgress {
    results: Vec<ImportBatchResult>,
    processed: usize,
}

impl SubmitProgress {
    fn advance(mut self, chunk_results: Vec<ImportBatchResult>) -> Self {
        self.processed += chunk_results.len();
        self.results.extend(chunk_results);
        self
    }
}

/// Submits records in fixed-size chunks, one request at a time
///
/// The next chunk is only sent once the previous response has arrived, so the
/// store never sees more than one bulk-create call in flight per import.
pub struct BatchSubmitter<'a> {
    store: &'a dyn AssetStore,
    options: SubmitOptions,
}

impl<'a> BatchSubmitter<'a> {
    pub fn new(store: &'a dyn AssetStore, options: SubmitOptions) -> Self {
        Self { store, options }
    }

    /// Number of bulk-create calls needed for `total` records
    pub fn chunk_count(&self, total: usize) -> usize {
        total.div_ceil(self.batch_size())
    }

    fn batch_size(&self) -> usize {
        self.options.batch_size.max(1)
    }

    /// Submit all records, returning one result per record in input order
    ///
    /// Stops at the first systemic failure or on cancellation; results of the
    /// chunks already sent are discarded in that case.
    pub async fn submit(
        &self,
        records: &[CanonicalAssetRecord],
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<Vec<ImportBatchResult>, ImportError> {
        let total = records.len();
        let total_chunks = self.chunk_count(total);
        let mut state = SubmitProgress::default();

        for (index, chunk) in records.chunks(self.batch_size()).enumerate() {
            if cancel.is_cancelled() {
                log::warn!(
                    "Import cancelled before chunk {}/{} ({} of {} records submitted)",
                    index + 1,
                    total_chunks,
                    state.processed,
                    total
                );
                return Err(ImportError::Cancelled {
                    processed: state.processed,
                    total,
                });
            }

            log::debug!(
                "Submitting chunk {}/{} ({} records)",
                index + 1,
                total_chunks,
                chunk.len()
            );

            let chunk_results = self
                .submit_chunk(chunk)
                .await
                .map_err(|source| {
                    log::error!(
                        "Chunk {}/{} failed, stopping import ({} of {} records submitted): {}",
                        index + 1,
                        total_chunks,
                        state.processed,
                        total,
                        source
                    );
                    ImportError::Submission {
                        source,
                        processed: state.processed,
                        total,
                    }
                })?;

            state = state.advance(chunk_results);
            progress.on_progress(ProgressEvent::new(state.processed, total));
        }

        Ok(state.results)
    }

    async fn submit_chunk(
        &self,
        chunk: &[CanonicalAssetRecord],
    ) -> Result<Vec<ImportBatchResult>, StoreError> {
        let results = self.store.bulk_create(chunk).await?;

        if results.len() != chunk.len() {
            return Err(StoreError::InvalidResponse(format!(
                "expected {} results, got {}",
                chunk.len(),
                results.len()
            )));
        }

        Ok(results)
    }
}
