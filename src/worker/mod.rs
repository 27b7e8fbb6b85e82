//! Fetch workers
//!
//! Each worker pulls identifiers from the shared work queue, fetches and
//! hashes them via a [`Transport`], and publishes one [`ResultRecord`] per
//! identifier until the queue is closed and drained.

pub mod http;
pub mod runner;

use crate::observability::Metrics;
use crate::pipeline::barrier::JoinBarrier;
use crate::pipeline::queue::WorkQueue;
use crate::record::ResultRecord;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub use http::HttpTransport;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Connection, DNS or request failure before a response arrived
    #[error("Get \"{url}\": {reason}")]
    Request { url: String, reason: String },

    /// Response started but the body could not be read in full
    #[error("fetch: reading {url} {reason}")]
    Body { url: String, reason: String },
}

/// Network collaborator: retrieves the full body for an identifier
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Bytes, TransportError>;
}

/// Shared handles every worker needs
#[derive(Clone)]
pub struct WorkerContext {
    pub queue: WorkQueue,
    pub results: mpsc::Sender<ResultRecord>,
    pub transport: Arc<dyn Transport>,
    pub metrics: Arc<Metrics>,
}

/// Spawn `count` symmetric workers, each registered on `barrier` before it starts
pub fn spawn_pool(count: usize, ctx: WorkerContext, barrier: &JoinBarrier) {
    for worker_id in 0..count {
        let guard = barrier.enter();
        let ctx = ctx.clone();
        tokio::spawn(async move {
            let _guard = guard;
            run(worker_id, ctx).await;
        });
    }
}

/// Worker loop: one record per received identifier
async fn run(worker_id: usize, ctx: WorkerContext) {
    debug!(worker_id, "Worker started");

    let mut processed = 0usize;
    while let Some(url) = ctx.queue.recv().await {
        let record = runner::fetch_isolated(Arc::clone(&ctx.transport), url).await;
        if record.is_success() {
            ctx.metrics.fetch_succeeded();
        } else {
            ctx.metrics.fetch_failed();
        }

        if ctx.results.send(record).await.is_err() {
            warn!(worker_id, "Results queue closed early, worker exiting");
            break;
        }
        processed += 1;
    }

    debug!(worker_id, processed, "Worker finished");
}
