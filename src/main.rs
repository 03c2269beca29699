use domo_core::{create_listing_table, Result};
use domo_scrapers::{DomopliusScraper, ScraperConfig};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let scraper = DomopliusScraper::new(ScraperConfig::default())?;

    // Ctrl-C interrupts the delay between pages and keeps what was scraped so far
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let outcome = scraper.to_csv(&cancel).await?;

    for failure in &outcome.failures {
        warn!("Page {} listing {}: {}", failure.page, failure.index, failure.reason);
    }
    info!("{}", outcome.summary());

    if !outcome.table.is_empty() {
        println!("{}", create_listing_table(&outcome.table));
    }

    Ok(())
}
