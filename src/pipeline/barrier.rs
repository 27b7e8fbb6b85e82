//! Countdown barrier used to learn when every worker has exited

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    active: AtomicUsize,
    zero: Notify,
}

/// Join barrier for the worker pool
///
/// Each worker holds a [`BarrierGuard`] for its whole lifetime. The count
/// drops when the guard is dropped, including during a panic unwind, so
/// [`JoinBarrier::wait`] cannot hang on a crashed worker.
#[derive(Debug, Clone, Default)]
pub struct JoinBarrier {
    inner: Arc<Inner>,
}

impl JoinBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one participant. Must be called before the participant is spawned.
    pub fn enter(&self) -> BarrierGuard {
        self.inner.active.fetch_add(1, Ordering::AcqRel);
        BarrierGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of participants that have not exited yet
    pub fn active(&self) -> usize {
        self.inner.active.load(Ordering::Acquire)
    }

    /// Resolve once every registered participant has exited
    pub async fn wait(&self) {
        loop {
            let notified = self.inner.zero.notified();
            tokio::pin!(notified);
            // Register interest before reading the count so a concurrent
            // final exit between the load and the await is not missed.
            notified.as_mut().enable();

            if self.active() == 0 {
                return;
            }

            notified.await;
        }
    }
}

/// Held by a running participant; releases the barrier on drop
#[derive(Debug)]
pub struct BarrierGuard {
    inner: Arc<Inner>,
}

impl Drop for BarrierGuard {
    fn drop(&mut self) {
        if self.inner.active.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.inner.zero.notify_waiters();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_wait_with_no_participants_returns_immediately() {
        let barrier = JoinBarrier::new();
        timeout(Duration::from_millis(100), barrier.wait())
            .await
            .expect("empty barrier should not block");
    }

    #[tokio::test]
    async fn test_counts_enter_and_exit() {
        let barrier = JoinBarrier::new();
        let a = barrier.enter();
        let b = barrier.enter();
        assert_eq!(barrier.active(), 2);

        drop(a);
        assert_eq!(barrier.active(), 1);
        drop(b);
        assert_eq!(barrier.active(), 0);
    }

    #[tokio::test]
    async fn test_wait_blocks_until_last_guard_drops() {
        let barrier = JoinBarrier::new();
        let guards: Vec<_> = (0..4).map(|_| barrier.enter()).collect();

        let waiter = {
            let barrier = barrier.clone();
            tokio::spawn(async move { barrier.wait().await })
        };

        for guard in guards {
            tokio::time::sleep(Duration::from_millis(10)).await;
            assert!(!waiter.is_finished());
            drop(guard);
        }

        timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake after the last exit")
            .unwrap();
    }

    #[tokio::test]
    async fn test_panicking_participant_releases_barrier() {
        let barrier = JoinBarrier::new();
        let guard = barrier.enter();

        let handle = tokio::spawn(async move {
            let _guard = guard;
            panic!("worker blew up");
        });
        assert!(handle.await.is_err());

        timeout(Duration::from_secs(1), barrier.wait())
            .await
            .expect("barrier should be released by unwinding");
    }
}
