//! Progress reporting for batch submission

use serde::Serialize;

/// Emitted after each chunk completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub processed_count: usize,
    pub total_count: usize,
    pub percentage: u8,
}

impl ProgressEvent {
    pub fn new(processed_count: usize, total_count: usize) -> Self {
        let percentage = if total_count == 0 {
            100
        } else {
            ((processed_count as f64 / total_count as f64) * 100.0).round() as u8
        };
        Self {
            processed_count,
            total_count,
            percentage,
        }
    }
}

/// Receives progress events from the submitter
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn on_progress(&self, event: ProgressEvent) {
        self(event)
    }
}

/// Sink that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _event: ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(ProgressEvent::new(1, 3).percentage, 33);
        assert_eq!(ProgressEvent::new(2, 3).percentage, 67);
        assert_eq!(ProgressEvent::new(25, 25).percentage, 100);
        assert_eq!(ProgressEvent::new(0, 0).percentage, 100);
    }

    #[test]
    fn test_closure_sink() {
        let seen = std::sync::Mutex::new(Vec::new());
        let sink = |e: ProgressEvent| seen.lock().unwrap().push(e.processed_count);
        sink.on_progress(ProgressEvent::new(10, 20));
        sink.on_progress(ProgressEvent::new(20, 20));
        assert_eq!(*seen.lock().unwrap(), vec![10, 20]);
    }
}
