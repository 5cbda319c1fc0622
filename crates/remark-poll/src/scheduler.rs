//! Poll scheduler: decides when to hit the feed and dispatches actions.
//!
//! One scheduler serves one widget instance. A full list fetch runs on
//! spawn (widget mount) and on every explicit refresh; a lightweight count
//! fetch runs per tick when a positive interval is configured. Results are
//! dispatched in the order their fetches complete, not the order they were
//! issued; consumers get last-write-wins on whichever field each action
//! touches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use remark_core::state::Action;

use crate::config::PollConfig;
use crate::feed::CommentFeed;
use crate::wire::{decode_count, decode_list};

/// Buffer size for the action channel.
const ACTION_CHANNEL_BUFFER: usize = 16;

/// Handle owned by the widget: triggers refreshes, tears the scheduler down.
pub struct SchedulerHandle {
    inner: Arc<SchedulerInner>,
    ticker: Option<JoinHandle<()>>,
}

struct SchedulerInner {
    feed: Arc<dyn CommentFeed>,
    config: PollConfig,
    tx: mpsc::Sender<Action>,
    mounted: AtomicBool,
}

impl SchedulerHandle {
    /// Start the scheduler for one widget instance.
    ///
    /// Issues the mount-time full fetch immediately and, when the configured
    /// interval is positive, a count poll per tick. Must be called from
    /// within a tokio runtime. Actions arrive on the returned receiver in
    /// fetch-completion order.
    #[must_use]
    pub fn spawn(feed: Arc<dyn CommentFeed>, config: PollConfig) -> (Self, mpsc::Receiver<Action>) {
        let (tx, rx) = mpsc::channel(ACTION_CHANNEL_BUFFER);
        let inner = Arc::new(SchedulerInner {
            feed,
            config,
            tx,
            mounted: AtomicBool::new(true),
        });

        tracing::debug!("comment poll scheduler starting");
        Arc::clone(&inner).spawn_list_fetch();

        let ticker = inner.config.poll_interval().map(|interval| {
            let inner = Arc::clone(&inner);
            tokio::spawn(async move {
                let mut ticks = tokio::time::interval(interval);
                ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
                // The first tick completes immediately; the mount fetch
                // already covers now.
                ticks.tick().await;
                loop {
                    ticks.tick().await;
                    inner.run_count_fetch().await;
                }
            })
        });

        (Self { inner, ticker }, rx)
    }

    /// Explicit user trigger ("show N new comments"): another full list
    /// fetch, dispatched as a tree refresh when it completes.
    pub fn refresh(&self) {
        Arc::clone(&self.inner).spawn_list_fetch();
    }

    /// Tear down: stops the ticker and suppresses dispatch from any fetch
    /// still in flight.
    pub fn shutdown(&mut self) {
        if self.inner.mounted.swap(false, Ordering::SeqCst) {
            tracing::debug!("comment poll scheduler stopping");
        }
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl SchedulerInner {
    fn spawn_list_fetch(self: Arc<Self>) {
        tokio::spawn(async move {
            let raw = match self.feed.fetch_list(&self.config.list_url).await {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!("comment list fetch failed: {e}");
                    return;
                }
            };
            match decode_list(&raw) {
                Ok(batch) => self.dispatch(Action::RefreshTree(batch)).await,
                Err(e) => tracing::warn!("comment list decode failed: {e}"),
            }
        });
    }

    async fn run_count_fetch(&self) {
        let raw = match self.feed.fetch_count(&self.config.count_url).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("comment count fetch failed: {e}");
                return;
            }
        };
        match decode_count(&raw) {
            Ok(count) => self.dispatch(Action::SetCounter(count)).await,
            Err(e) => tracing::warn!("comment count decode failed: {e}"),
        }
    }

    async fn dispatch(&self, action: Action) {
        // The widget may have been torn down while the fetch was in flight.
        if !self.mounted.load(Ordering::SeqCst) {
            return;
        }
        // A dropped receiver means the owner is gone; nothing to report.
        let _ = self.tx.send(action).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
