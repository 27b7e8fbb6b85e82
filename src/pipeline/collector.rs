use crate::observability::Metrics;
use crate::record::ResultRecord;
use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

/// Write records to `sink` in arrival order until the results queue is
/// closed and empty. Returns the number of lines written.
pub async fn drain<W>(
    mut results: mpsc::Receiver<ResultRecord>,
    sink: &mut W,
    metrics: &Metrics,
) -> io::Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while let Some(record) = results.recv().await {
        let line = format!("{record}\n");
        sink.write_all(line.as_bytes()).await?;
        metrics.record_emitted();
        written += 1;
    }
    sink.flush().await?;
    Ok(written)
}
