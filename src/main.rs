//! scrape-urls command-line entry point

mod cli;

use clap::Parser;
use scrape_urls::{EXIT_INTERRUPTED, Fetcher, HttpFetcher, ToExitCode, pipeline};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    tokio::spawn(exit_on_interrupt());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(code = e.error_code(), "run failed");
            match &e {
                scrape_urls::Error::NoTargets => eprintln!("{}", e),
                _ => eprintln!("Error: {}", e),
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: cli::Cli) -> scrape_urls::Result<()> {
    let config = cli.into_config()?;
    let plan = pipeline::plan(&config)?;
    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::from_config(&config)?);

    println!(
        "Scraping {} URL(s) with {} worker(s)...",
        plan.requests.len(),
        plan.workers
    );

    let results = pipeline::execute(plan, fetcher).await;
    let report = pipeline::finish(&config, &results)?;
    println!("{}", report);
    Ok(())
}

/// Exit immediately on Ctrl+C / SIGTERM, abandoning in-flight requests
async fn exit_on_interrupt() {
    scrape_urls::wait_for_interrupt().await;
    eprintln!("Interrupted by user.");
    std::process::exit(i32::from(EXIT_INTERRUPTED));
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "scrape_urls=debug"
    } else {
        "scrape_urls=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
