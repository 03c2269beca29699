use crate::{FixtureFetcher, LISTINGS_PAGE};
use domo_core::{export, read_csv, ResultTable};
use domo_scrapers::{DomopliusScraper, ScraperConfig};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_to_csv_writes_scraped_rows() {
    let temp_dir = tempdir().unwrap();
    let export_path = temp_dir.path().join("scraped_data.csv");
    let fetcher = Arc::new(FixtureFetcher::new(vec![(1, 200, LISTINGS_PAGE)]));
    let config = ScraperConfig::default()
        .with_request_delay(Duration::ZERO)
        .with_page_limit(1)
        .with_output_path(&export_path);
    let scraper = DomopliusScraper::with_fetcher(config, fetcher).unwrap();

    let outcome = scraper.to_csv(&CancellationToken::new()).await.unwrap();

    assert!(export_path.exists());
    let content = fs::read_to_string(&export_path).unwrap();
    assert!(content.starts_with("title,price,room_count,sq_meters,apartment_floor,year_built,link"));
    assert!(content.contains("7212478.html"));
    assert!(content.contains("7209911.html"));

    let restored = read_csv(&export_path).unwrap();
    assert_eq!(restored, outcome.table);
    assert_eq!(restored.records()[0].price, "\nKaina: 250 000 € (2 778 €/m²)\n\n");
}

#[tokio::test]
async fn test_export_of_empty_run() {
    let temp_dir = tempdir().unwrap();
    let export_path = temp_dir.path().join("scraped_data.csv");
    let fetcher = Arc::new(FixtureFetcher::new(Vec::new()));
    let config = ScraperConfig::default()
        .with_request_delay(Duration::ZERO)
        .with_output_path(&export_path);
    let scraper = DomopliusScraper::with_fetcher(config, fetcher).unwrap();

    let outcome = scraper.to_csv(&CancellationToken::new()).await.unwrap();

    assert!(outcome.table.is_empty());
    assert!(read_csv(&export_path).unwrap().is_empty());
}

#[test]
fn test_export_error_handling() {
    let temp_dir = tempdir().unwrap();
    let export_path = temp_dir.path().join("no-such-dir").join("scraped_data.csv");

    assert!(export(&ResultTable::new(), &export_path).is_err());
}
