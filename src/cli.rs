use clap::Parser;
use fetchpool::config::Overrides;
use std::io;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};

#[derive(Parser, Debug)]
#[command(name = "fetchpool")]
#[command(about = "Fetch URLs concurrently and print the MD5 of each body", long_about = None)]
pub struct Cli {
    /// Max number of parallel requests (default 10, or from config)
    #[arg(long, allow_negative_numbers = true)]
    pub parallel: Option<i64>,

    /// URLs to fetch
    pub urls: Vec<String>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            parallel: self.parallel,
        }
    }
}

/// Final summary line printed after all results
pub fn elapsed_line(elapsed: Duration) -> String {
    format!("{:.2}s total elapsed", elapsed.as_secs_f64())
}

/// Write the elapsed line after the result lines and flush
pub async fn write_footer<W>(sink: &mut W, elapsed: Duration) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let line = format!("{}\n", elapsed_line(elapsed));
    sink.write_all(line.as_bytes()).await?;
    sink.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use fetchpool::config::HttpSettings;
    use fetchpool::pipeline::{Parallelism, Pipeline, PipelineOptions};
    use fetchpool::worker::HttpTransport;
    use std::sync::Arc;

    #[test]
    fn test_positional_urls_and_default_parallel() {
        let cli = Cli::try_parse_from(["fetchpool", "http://a", "http://b"]).unwrap();
        assert_eq!(cli.urls, vec!["http://a", "http://b"]);
        assert_eq!(cli.parallel, None);
    }

    #[test]
    fn test_parallel_flag() {
        let cli = Cli::try_parse_from(["fetchpool", "--parallel", "3", "http://a"]).unwrap();
        assert_eq!(cli.overrides().parallel, Some(3));
    }

    #[test]
    fn test_negative_parallel_parses_for_later_validation() {
        let cli = Cli::try_parse_from(["fetchpool", "--parallel", "-2"]).unwrap();
        assert_eq!(cli.parallel, Some(-2));
        assert!(cli.urls.is_empty());
    }

    #[test]
    fn test_malformed_parallel_is_rejected() {
        assert!(Cli::try_parse_from(["fetchpool", "--parallel", "many"]).is_err());
    }

    #[test]
    fn test_elapsed_line_two_decimals() {
        assert_eq!(elapsed_line(Duration::from_millis(1234)), "1.23s total elapsed");
        assert_eq!(elapsed_line(Duration::ZERO), "0.00s total elapsed");
    }

    #[tokio::test]
    async fn test_footer_follows_results() {
        let mut out = Vec::new();
        write_footer(&mut out, Duration::from_millis(2500)).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2.50s total elapsed\n");
    }

    #[tokio::test]
    async fn test_no_urls_prints_only_the_footer() {
        let cli = Cli::try_parse_from(["fetchpool"]).unwrap();
        let transport = Arc::new(HttpTransport::new(&HttpSettings::default()).unwrap());
        let options = PipelineOptions::new(Parallelism::new(10).unwrap());
        let pipeline = Pipeline::new(options, transport);

        let mut out = Vec::new();
        let summary = pipeline.run(cli.urls, &mut out).await.unwrap();
        write_footer(&mut out, summary.elapsed).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(summary.records, 0);
        assert_eq!(lines.len(), 1);
        assert!(text.ends_with("s total elapsed\n"));
        let seconds = lines[0].trim_end_matches("s total elapsed");
        assert_eq!(seconds.split('.').nth(1).map(str::len), Some(2));
    }
}
