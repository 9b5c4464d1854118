use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use bullion_watcher::report::Report;
use bullion_watcher::{AppConfig, PriceWatcher, logging};

/// Scrape current bullion coin and spot prices.
#[derive(Parser, Debug)]
#[command(name = "bullion-watcher", version, about)]
struct Cli {
    /// Item ids to resolve; the whole catalog when omitted
    ids: Vec<String>,

    /// Extra configuration file layered over config/default
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// TOML catalog to use instead of the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Maximum number of pages fetched at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Print the run report as JSON instead of one line per item
    #[arg(long)]
    json: bool,

    /// Also write the JSON report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List catalog items and exit
    #[arg(long)]
    list: bool,

    /// Exit with status 1 when any requested price is missing
    #[arg(long)]
    strict: bool,
}

const EXIT_MISSING_PRICE: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    ExitCode::from(finish(run(cli).await))
}

fn finish(outcome: Result<u8>) -> u8 {
    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    }
}

fn exit_code(report: &Report, strict: bool) -> u8 {
    if strict && report.missing().next().is_some() {
        EXIT_MISSING_PRICE
    } else {
        0
    }
}

async fn run(cli: Cli) -> Result<u8> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(path) = &cli.catalog {
        config.catalog.path = Some(path.display().to_string());
    }
    if let Some(concurrency) = cli.concurrency {
        config.scraper.max_concurrent_checks = concurrency;
    }
    config.validate()?;

    // Held until exit so the file writer flushes
    let _guard = logging::init(&config.logging)?;

    let catalog = config.load_catalog()?;
    if cli.list {
        for item in catalog.items() {
            println!("{}\t{}\t{}", item.id, item.vendor, item.display_name);
        }
        return Ok(0);
    }

    info!(items = catalog.len(), "Starting Bullion Watcher...");
    let watcher = PriceWatcher::from_config(catalog, &config.scraper)?;

    let results = if cli.ids.is_empty() {
        watcher.resolve_all().await
    } else {
        watcher.resolve_many(&cli.ids).await
    };
    let report = Report::new(results);

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        for result in &report.results {
            println!("{}", result.summary());
        }
    }

    if let Some(path) = &cli.output {
        report.write_to(path)?;
        info!(path = %path.display(), "Results saved");
    }

    Ok(exit_code(&report, cli.strict))
}
