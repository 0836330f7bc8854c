//! Snapshot recording for store subscription tests
//!
//! [`SnapshotRecorder`] follows a `watch` receiver in a background task and
//! keeps every snapshot it observes. A `watch` channel only retains the latest
//! value, so a snapshot is recorded only if the recorder task runs between two
//! sends; tests that care about intermediate snapshots should yield between
//! sends (or await a suspension point, as async sequences do).

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;

/// Records snapshots published on a `watch` channel.
pub struct SnapshotRecorder<S> {
    snapshots: Arc<Mutex<Vec<Arc<S>>>>,
    recorded: Arc<Notify>,
    task: JoinHandle<()>,
}

impl<S> SnapshotRecorder<S>
where
    S: Send + Sync + 'static,
{
    /// Start recording from `receiver`
    ///
    /// The value current at the time of the call is not recorded; only
    /// subsequent changes are.
    #[must_use]
    pub fn start(mut receiver: watch::Receiver<Arc<S>>) -> Self {
        receiver.mark_unchanged();

        let snapshots = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::new(Notify::new());

        let task = {
            let snapshots = Arc::clone(&snapshots);
            let recorded = Arc::clone(&recorded);
            tokio::spawn(async move {
                while receiver.changed().await.is_ok() {
                    let snapshot = Arc::clone(&receiver.borrow_and_update());
                    snapshots
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(snapshot);
                    recorded.notify_waiters();
                }
            })
        };

        Self {
            snapshots,
            recorded,
            task,
        }
    }

    /// Snapshots recorded so far, oldest first
    #[must_use]
    pub fn snapshots(&self) -> Vec<Arc<S>> {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of snapshots recorded so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait until at least `count` snapshots are recorded
    ///
    /// # Errors
    ///
    /// Returns `Err(recorded)` with the number of snapshots seen if the
    /// timeout elapses first.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> Result<(), usize> {
        let waiting = async {
            loop {
                let notified = self.recorded.notified();
                if self.len() >= count {
                    return;
                }
                notified.await;
            }
        };

        tokio::time::timeout(timeout, waiting)
            .await
            .map_err(|_| self.len())
    }
}

impl<S> Drop for SnapshotRecorder<S> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_changes_in_order() {
        let (tx, rx) = watch::channel(Arc::new(0));
        let recorder = SnapshotRecorder::start(rx);
        assert!(recorder.is_empty());

        for value in 1..=3 {
            tx.send_replace(Arc::new(value));
            tokio::task::yield_now().await;
        }

        recorder.wait_for(3, Duration::from_secs(1)).await.unwrap();
        let values: Vec<i32> = recorder.snapshots().iter().map(|s| **s).collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_wait_for_times_out() {
        let (_tx, rx) = watch::channel(Arc::new(0));
        let recorder = SnapshotRecorder::start(rx);

        let result = recorder.wait_for(1, Duration::from_millis(20)).await;
        assert_eq!(result, Err(0));
    }
}
