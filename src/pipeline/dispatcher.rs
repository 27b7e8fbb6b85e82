use super::queue::WorkSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Publish every identifier in input order, then close the work queue
///
/// Runs as its own task so a bounded queue can apply backpressure without
/// stalling the caller.
pub fn spawn(identifiers: Vec<String>, tx: WorkSender) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut published = 0;
        for url in identifiers {
            if let Err(err) = tx.send(url).await {
                warn!(url = %err.0, "Work queue has no consumers left, dispatch stopped");
                break;
            }
            published += 1;
        }

        // tx is dropped on return, which closes the queue
        debug!(published, "Dispatch complete, closing work queue");
        published
    })
}
