use crate::{FixtureFetcher, EMPTY_PAGE, LISTINGS_PAGE};
use domo_core::DomoError;
use domo_scrapers::extract::{AREA_LABEL, BUILD_YEAR_LABEL, FLOOR_LABEL, ROOM_COUNT_LABEL};
use domo_scrapers::{DomopliusScraper, FieldExtractor, ListingPage, ScraperConfig, StopReason};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn config() -> ScraperConfig {
    ScraperConfig::default().with_request_delay(Duration::ZERO)
}

#[test]
fn test_golden_listing_fields() {
    let page = ListingPage::parse(LISTINGS_PAGE);
    let extractor = FieldExtractor::new().unwrap();
    let listings = extractor.locate(&page);
    assert_eq!(listings.len(), 2);
    let listing = listings[0];

    assert_eq!(
        extractor.title(listing).unwrap(),
        "Parduodamas 3 kambarių butas Klaipėdoje, Vitėje, Dariaus ir Girėno g."
    );
    assert_eq!(
        extractor.price(listing).unwrap(),
        "\nKaina: 250 000 € (2 778 €/m²)\n\n"
    );
    assert_eq!(extractor.attribute(listing, ROOM_COUNT_LABEL).unwrap(), "3 kamb.");
    assert_eq!(extractor.attribute(listing, AREA_LABEL).unwrap(), "90.00 m²");
    assert_eq!(extractor.attribute(listing, FLOOR_LABEL).unwrap(), "7/9 a.");
    assert_eq!(extractor.attribute(listing, BUILD_YEAR_LABEL).unwrap(), "2006 m.");
    assert_eq!(
        extractor.link(listing).unwrap(),
        "https://domoplius.lt/skelbimai/parduodamas-3-kambariu-butas-klaipedoje-viteje-dariaus-ir-gireno-g-7212478.html"
    );
}

#[test]
fn test_unknown_label_is_not_found() {
    let page = ListingPage::parse(LISTINGS_PAGE);
    let extractor = FieldExtractor::new().unwrap();
    let listing = extractor.locate(&page)[0];

    match extractor.attribute(listing, "Šildymas") {
        Err(DomoError::FieldNotFound { field, .. }) => assert_eq!(field, "Šildymas"),
        other => panic!("expected FieldNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rows_accumulate_across_pages() {
    let fetcher = Arc::new(FixtureFetcher::new(vec![
        (1, 200, LISTINGS_PAGE),
        (2, 200, LISTINGS_PAGE),
        (3, 200, LISTINGS_PAGE),
    ]));
    let scraper = DomopliusScraper::with_fetcher(config().with_page_limit(3), fetcher.clone()).unwrap();

    let outcome = scraper.scrape_website().await.unwrap();

    assert_eq!(outcome.stop_reason, StopReason::PageLimitReached);
    assert_eq!(outcome.pages_fetched, 3);
    assert_eq!(outcome.table.len(), 6);
    assert!(outcome.failures.is_empty());
    assert_eq!(fetcher.requested(), vec![1, 2, 3]);
    assert!(outcome.table.records()[0].link.ends_with("7212478.html"));
    assert!(outcome.table.records()[1].link.ends_with("7209911.html"));
}

#[tokio::test]
async fn test_page_without_container_ends_run() {
    let fetcher = Arc::new(FixtureFetcher::new(vec![
        (1, 200, LISTINGS_PAGE),
        (2, 200, EMPTY_PAGE),
        (3, 200, LISTINGS_PAGE),
    ]));
    let scraper =
        DomopliusScraper::with_fetcher(config().with_page_limit(10), fetcher.clone()).unwrap();

    let outcome = scraper.scrape(&CancellationToken::new()).await.unwrap();

    assert_eq!(outcome.stop_reason, StopReason::EndOfResults);
    assert_eq!(outcome.pages_fetched, 2);
    assert_eq!(outcome.table.len(), 2);
    assert_eq!(fetcher.requested(), vec![1, 2]);
}

#[tokio::test]
async fn test_server_error_is_not_end_of_results() {
    let fetcher = Arc::new(FixtureFetcher::new(vec![
        (1, 200, LISTINGS_PAGE),
        (2, 500, EMPTY_PAGE),
    ]));
    let scraper = DomopliusScraper::with_fetcher(config().with_page_limit(3), fetcher).unwrap();

    let err = scraper.scrape(&CancellationToken::new()).await.unwrap_err();
    assert!(matches!(err, DomoError::HttpStatus { status: 500, .. }));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_delay_keeps_collected_rows() {
    let fetcher = Arc::new(FixtureFetcher::new(vec![(1, 200, LISTINGS_PAGE)]));
    let scraper = DomopliusScraper::with_fetcher(
        ScraperConfig::default()
            .with_page_limit(100)
            .with_request_delay(Duration::from_millis(200)),
        fetcher.clone(),
    )
    .unwrap();
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        trigger.cancel();
    });

    let outcome = scraper.scrape(&cancel).await.unwrap();

    assert_eq!(outcome.stop_reason, StopReason::Cancelled);
    assert_eq!(outcome.pages_fetched, 1);
    assert_eq!(outcome.table.len(), 2);
    assert_eq!(fetcher.requested(), vec![1]);
}
