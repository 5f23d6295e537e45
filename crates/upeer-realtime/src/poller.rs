use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Handle to a running poll loop. Dropping the handle does NOT stop the
/// loop — stopping is an explicit act, decoupled from any view lifecycle.
pub struct PollHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait for the loop to fully wind down after `cancel`.
    pub async fn stopped(self) {
        let _ = self.task.await;
    }
}

/// Timer-driven re-fetch loop: runs `tick` immediately, then every
/// `period`, until cancelled. The tick owns its own error handling; a
/// failed fetch is this transport's version of a dropped frame.
pub fn spawn_poller<F, Fut>(period: Duration, mut tick: F) -> PollHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let cancel = CancellationToken::new();
    let child = cancel.clone();
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = child.cancelled() => break,
                _ = interval.tick() => tick().await,
            }
        }
    });
    PollHandle { cancel, task }
}
