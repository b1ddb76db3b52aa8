use crate::models::progress::ProgressEvent;

/// Receives pipeline notifications for display
///
/// Sinks observe only; nothing they do feeds back into the loop.
pub trait ProgressSink: Send + Sync {
    fn notify(&self, event: &ProgressEvent);
}

/// Sink that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn notify(&self, _event: &ProgressEvent) {}
}
