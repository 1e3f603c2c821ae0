//! Advisory stall notice for slow transfers
//!
//! A cooperative replacement for the old "spawn a thread and poll a
//! boolean" pattern: one tokio task per transfer that starts emitting a
//! waiting message once the transfer has run longer than a threshold,
//! and stops via a [`CancellationToken`] when the transfer completes.
//!
//! This is UI feedback only. It never cancels or otherwise touches the
//! transfer; at worst one extra message lands right after completion,
//! which is cosmetic.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Sink for stall notice messages.
pub type NoticeSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Returns a sink that forwards notices to `tracing`.
pub fn tracing_sink() -> NoticeSink {
    Arc::new(|msg| info!("{msg}"))
}

/// A running stall notice attached to one transfer.
pub struct StallNotice {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl StallNotice {
    /// Starts the notice task.
    ///
    /// Every `poll` the task checks elapsed time; once it exceeds
    /// `notice_after`, `message` is emitted on each subsequent check
    /// until [`stop`] is called.
    ///
    /// [`stop`]: StallNotice::stop
    pub fn start(
        notice_after: Duration,
        poll: Duration,
        message: impl Into<String>,
        sink: NoticeSink,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let message = message.into();
        // interval() panics on a zero period; a zero config value means
        // "as often as possible", which one second is close enough to.
        let poll = poll.max(Duration::from_secs(1));

        let started = tokio::time::Instant::now();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll);
            // The first tick completes immediately; the elapsed check
            // keeps it silent.
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if started.elapsed() > notice_after {
                            sink(&message);
                        }
                    }
                }
            }
        });

        Self { cancel, handle }
    }

    /// Signals the task to stop and waits for it to finish.
    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}
