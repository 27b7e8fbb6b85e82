mod cli;

use clap::Parser;
use cli::Cli;
use fetchpool::config::Config;
use fetchpool::observability;
use fetchpool::pipeline::Pipeline;
use fetchpool::worker::HttpTransport;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let started = Instant::now();
    observability::init_tracing();

    let cli = Cli::parse();

    let config = Config::load(&cli.overrides())?;
    let options = config.pipeline_options()?;
    let transport = Arc::new(HttpTransport::new(&config.http)?);

    let pipeline = Pipeline::new(options, transport);
    let mut stdout = tokio::io::stdout();
    pipeline.run(cli.urls, &mut stdout).await?;

    cli::write_footer(&mut stdout, started.elapsed()).await?;

    Ok(())
}
