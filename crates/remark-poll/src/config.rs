//! Poll configuration supplied by the embedding widget.

use std::time::Duration;

/// Configuration for one widget's poll scheduler.
///
/// The URLs are opaque request targets handed to the feed implementation;
/// the scheduler never inspects them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollConfig {
    pub list_url: String,
    pub count_url: String,
    /// Milliseconds between count polls. Zero or negative disables
    /// periodic polling; mount and explicit refreshes still run.
    pub polling_interval_ms: i64,
}

impl PollConfig {
    /// The periodic poll interval, or `None` when polling is disabled.
    #[must_use]
    pub fn poll_interval(&self) -> Option<Duration> {
        u64::try_from(self.polling_interval_ms)
            .ok()
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}
