//! remark-poll: poll boundary for the comment reconciliation engine.
//!
//! Owns the feed trait (transport seam), wire decoding for the list and
//! count endpoints, and the tokio-based scheduler that turns fetch results
//! into engine actions. The engine itself lives in `remark-core`.

pub mod config;
pub mod feed;
pub mod scheduler;
pub mod wire;

pub use config::PollConfig;
pub use feed::{CommentFeed, FeedError};
pub use scheduler::SchedulerHandle;

/// Stable crate label used by bootstrap smoke tests.
pub fn crate_label() -> &'static str {
    "remark-poll"
}
