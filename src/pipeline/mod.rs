//! Dispatcher → worker pool → collector pipeline
//!
//! ```text
//! identifiers ─▶ dispatcher ─▶ work queue ─┬▶ worker 0 ─┐
//!                                          ├▶ worker 1 ─┼▶ results queue ─▶ collector
//!                                          └▶ worker N ─┘
//! ```
//!
//! The shutdown coordinator holds the last results sender. It waits on the
//! [`JoinBarrier`] for every worker to exit and only then drops the sender,
//! which is what ends the collector loop. Closing before that point would
//! lose in-flight records; never closing would leave the collector blocked.

pub mod barrier;
pub mod collector;
pub mod dispatcher;
pub mod queue;

pub use barrier::JoinBarrier;

use crate::config::ValidationError;
use crate::observability::{Metrics, MetricsSnapshot};
use crate::record::ResultRecord;
use crate::worker::{self, Transport, WorkerContext};
use queue::WorkQueue;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::io::AsyncWrite;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to write results: {0}")]
    Output(#[from] std::io::Error),

    #[error("Pipeline task failed: {0}")]
    Task(#[from] JoinError),
}

/// Number of concurrent workers; always at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parallelism(NonZeroUsize);

impl Parallelism {
    pub fn new(workers: usize) -> Option<Self> {
        NonZeroUsize::new(workers).map(Self)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for Parallelism {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(Parallelism::new)
            .ok_or(ValidationError::NonPositiveParallelism { value })
    }
}

/// Pipeline sizing, passed in explicitly rather than read from process state
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub parallelism: Parallelism,
    /// Capacity of the work and results queues
    pub channel_capacity: NonZeroUsize,
}

impl PipelineOptions {
    pub fn new(parallelism: Parallelism) -> Self {
        Self {
            parallelism,
            channel_capacity: NonZeroUsize::MIN,
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records: usize,
    pub elapsed: Duration,
    pub metrics: MetricsSnapshot,
}

/// A started pipeline whose results have not been collected yet
pub struct RunningPipeline {
    pub results: mpsc::Receiver<ResultRecord>,
    /// Live worker count; reaches zero just before the results queue closes
    pub workers: JoinBarrier,
    dispatcher: JoinHandle<usize>,
    shutdown: JoinHandle<()>,
}

impl RunningPipeline {
    /// Drain the results queue into `sink`, then wait for the dispatcher and
    /// shutdown coordinator. Returns `(published, written)`.
    pub async fn collect<W>(
        self,
        sink: &mut W,
        metrics: &Metrics,
    ) -> Result<(usize, usize), PipelineError>
    where
        W: AsyncWrite + Unpin,
    {
        let RunningPipeline {
            results,
            dispatcher,
            shutdown,
            ..
        } = self;

        let written = collector::drain(results, sink, metrics).await?;
        let published = dispatcher.await?;
        shutdown.await?;
        Ok((published, written))
    }
}

pub struct Pipeline {
    options: PipelineOptions,
    transport: Arc<dyn Transport>,
    metrics: Arc<Metrics>,
}

impl Pipeline {
    pub fn new(options: PipelineOptions, transport: Arc<dyn Transport>) -> Self {
        Self {
            options,
            transport,
            metrics: Arc::new(Metrics::new()),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Spawn dispatcher, workers and shutdown coordinator
    pub fn start(&self, identifiers: Vec<String>) -> RunningPipeline {
        let capacity = self.options.channel_capacity.get();
        let workers = self.options.parallelism.get();

        info!(
            identifiers = identifiers.len(),
            workers, capacity, "Starting fetch pipeline"
        );

        let (work_tx, work_queue) = WorkQueue::bounded(capacity);
        let (results_tx, results_rx) = mpsc::channel(capacity);

        let dispatcher = dispatcher::spawn(identifiers, work_tx);

        let barrier = JoinBarrier::new();
        let ctx = WorkerContext {
            queue: work_queue,
            results: results_tx.clone(),
            transport: Arc::clone(&self.transport),
            metrics: Arc::clone(&self.metrics),
        };
        worker::spawn_pool(workers, ctx, &barrier);

        let shutdown = spawn_shutdown(barrier.clone(), results_tx);

        RunningPipeline {
            results: results_rx,
            workers: barrier,
            dispatcher,
            shutdown,
        }
    }

    /// Run to completion, writing one line per identifier to `sink`
    pub async fn run<W>(
        &self,
        identifiers: Vec<String>,
        sink: &mut W,
    ) -> Result<RunSummary, PipelineError>
    where
        W: AsyncWrite + Unpin,
    {
        let started = Instant::now();

        let (published, records) = self
            .start(identifiers)
            .collect(sink, &self.metrics)
            .await?;

        let summary = RunSummary {
            records,
            elapsed: started.elapsed(),
            metrics: self.metrics.snapshot(),
        };

        info!(
            published,
            records,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Fetch pipeline finished"
        );

        Ok(summary)
    }
}

/// Close the results queue once every worker has exited
fn spawn_shutdown(
    barrier: JoinBarrier,
    results_tx: mpsc::Sender<ResultRecord>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        barrier.wait().await;
        drop(results_tx);
        debug!("All workers exited, results queue closed");
    })
}
