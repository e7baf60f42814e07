mod archiver;
mod config;
mod error;
mod fetcher;
mod models;
mod normalizer;
mod parser;

use std::time::Duration;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::archiver::ArtifactPaths;
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpTransport, Transport};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::from_env();
    let today = Local::now().date_naive();
    let fetcher = Fetcher::new(HttpTransport::new()?, config.retry.clone());

    let paths = run(&config, &fetcher, today)?;
    println!("Wrote {}", paths.csv.display());
    Ok(())
}

/// Fetch both datasets, then write the two snapshots and the CSV.
/// Nothing is written unless both fetches succeed.
fn run<T, S>(config: &Config, fetcher: &Fetcher<T, S>, date: NaiveDate) -> Result<ArtifactPaths>
where
    T: Transport,
    S: Fn(Duration),
{
    info!(
        category = %config.category_id,
        group = %config.group_id,
        %date,
        "fetching catalog"
    );
    let products = fetcher.fetch(&config.products_url())?;
    let prices = fetcher.fetch(&config.prices_url())?;

    let paths = ArtifactPaths::for_date(&config.output_dir, date);
    archiver::ensure_dir(&config.output_dir)?;
    archiver::save_snapshot(&products, &paths.products)?;
    archiver::save_snapshot(&prices, &paths.prices)?;

    let csv = normalizer::normalize(&products.results, &prices.results);
    archiver::save_csv(&csv, &paths.csv)?;
    Ok(paths)
}
