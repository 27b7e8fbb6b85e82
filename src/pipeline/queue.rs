//! Work queue shared by competing workers
//!
//! Backed by a bounded `async-channel`: its receiver is `Clone`, so every
//! worker holds its own handle and each item is delivered to exactly one of
//! them.

/// Producer side of the work queue. Dropping it closes the queue.
pub type WorkSender = async_channel::Sender<String>;

/// Consumer side of the work queue, cloned into every worker
#[derive(Debug, Clone)]
pub struct WorkQueue {
    rx: async_channel::Receiver<String>,
}

impl WorkQueue {
    /// Create a bounded work queue
    pub fn bounded(capacity: usize) -> (WorkSender, Self) {
        let (tx, rx) = async_channel::bounded(capacity);
        (tx, Self { rx })
    }

    /// Take the next identifier, or `None` when the queue is closed and drained
    pub async fn recv(&self) -> Option<String> {
        self.rx.recv().await.ok()
    }
}
