//! Per-call context handed to allocation repositories.

use std::time::{Duration, Instant};

/// Execution context for one allocation request.
///
/// The allocation layer only carries it through to the repository. Honoring
/// the deadline (and any retry policy) is up to the store implementation;
/// cancellation happens by dropping the returned future.
#[derive(Debug, Clone, Default)]
pub struct AllocationContext {
    deadline: Option<Instant>,
    label: Option<String>,
}

impl AllocationContext {
    /// Context with no deadline and no label.
    pub fn background() -> Self {
        Self::default()
    }

    /// Set an absolute deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set a deadline relative to now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Attach a label (request id, command name) for log lines.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Time left before the deadline, `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Whether the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }
}
