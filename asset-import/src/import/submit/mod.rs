//! Batch submission with progress reporting

mod batch;
mod progress;

pub use batch::{BatchSubmitter, DEFAULT_BATCH_SIZE, SubmitOptions};
pub use progress::{NoProgress, ProgressEvent, ProgressSink};
