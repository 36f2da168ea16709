//! Best-effort import history recording

use super::ImportHistoryEntry;
use super::store::HistoryStore;

/// Persist one history entry, logging and swallowing any failure
///
/// Returns whether the entry was stored. The caller's outcome is never
/// affected by a history write error.
pub async fn record_history(store: &dyn HistoryStore, entry: &ImportHistoryEntry) -> bool {
    match store.record(entry).await {
        Ok(()) => {
            log::debug!(
                "Recorded import history for run {} ({})",
                entry.run_id,
                entry.status
            );
            true
        }
        Err(e) => {
            log::warn!(
                "Failed to record import history for run {} ({}): {:#}",
                entry.run_id,
                entry.file_name,
                e
            );
            false
        }
    }
}
