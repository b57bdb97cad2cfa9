//! Ingest newline-delimited JSON raw items into the posting store.
//!
//! Site scrapers that run outside the execution service pipe their items
//! through here:
//!
//! ```text
//! my_scraper | ingest_feed --source internshala --user-id u-42
//! ingest_feed --source linkedin --user-id u-42 --input items.jsonl
//! ```
//!
//! Uses `DATABASE_URL` like the server. Prints the ingest report as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use job_scraper::{ingest, CrawlQuery, JsonLinesFeed, Source};
use server_core::kernel::connect_store;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ingest_feed")]
#[command(about = "Normalize and store raw job items from a JSON lines feed")]
struct Cli {
    /// Source the items were scraped from (linkedin, internshala)
    #[arg(long)]
    source: Source,

    /// User the postings belong to when an item carries none
    #[arg(long)]
    user_id: String,

    /// Job role searched for (recorded on the query only)
    #[arg(long, default_value = "")]
    job_role: String,

    /// Location searched for (recorded on the query only)
    #[arg(long, default_value = "")]
    location: String,

    /// Read items from this file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,job_scraper=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").ok();
    let store = connect_store(database_url.as_deref()).await?;

    let query = CrawlQuery::new(cli.source, cli.job_role, cli.location, cli.user_id);
    let today = Local::now().date_naive();

    let report = match cli.input {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            ingest(JsonLinesFeed::new(BufReader::new(file)), &query, store.as_ref(), today).await
        }
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            ingest(JsonLinesFeed::new(stdin), &query, store.as_ref(), today).await
        }
    }
    .context("Ingestion failed")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to encode report")?
    );

    Ok(())
}
