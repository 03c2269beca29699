use crate::extract::{FieldExtractor, ListingPage};
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::{ExtractionMode, ListingsQuery, ScraperConfig};
use domo_core::{export, Result, ResultTable};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

/// Why a scrape run ended. All of these are successful terminations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every page up to the limit was scraped
    PageLimitReached,
    /// A page came back without any listings
    EndOfResults,
    /// The run was cancelled during the delay between pages
    Cancelled,
}

/// A listing entry skipped under [`ExtractionMode::SkipMalformed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    pub page: u32,
    /// Position of the entry within its page, starting at 0
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub table: ResultTable,
    pub failures: Vec<EntryFailure>,
    pub pages_fetched: u32,
    pub stop_reason: StopReason,
}

impl ScrapeOutcome {
    pub fn summary(&self) -> String {
        format!(
            "{} listings from {} pages, {} skipped ({:?})",
            self.table.len(),
            self.pages_fetched,
            self.failures.len(),
            self.stop_reason
        )
    }
}

/// Walks the domoplius.lt apartments-for-sale results page by page.
pub struct DomopliusScraper {
    config: ScraperConfig,
    fetcher: Arc<dyn PageFetcher>,
    extractor: FieldExtractor,
}

impl DomopliusScraper {
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.headers)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    pub fn with_fetcher(config: ScraperConfig, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fetcher,
            extractor: FieldExtractor::new()?,
        })
    }

    /// Fetches `url` and parses the body. 4xx and 5xx responses are errors.
    pub async fn fetch(&self, url: &Url) -> Result<ListingPage> {
        let fetched = self.fetcher.fetch_page(url).await?.error_for_status()?;
        Ok(ListingPage::parse(&fetched.body))
    }

    /// Scrapes with no way to cancel.
    pub async fn scrape_website(&self) -> Result<ScrapeOutcome> {
        self.scrape(&CancellationToken::new()).await
    }

    /// Scrapes and writes the resulting table to the configured output path,
    /// also when the run was cancelled part way.
    pub async fn to_csv(&self, cancel: &CancellationToken) -> Result<ScrapeOutcome> {
        let outcome = self.scrape(cancel).await?;
        export(&outcome.table, &self.config.output_path)?;
        Ok(outcome)
    }

    /// Scrapes pages `1..=page_limit`, stopping early at the first page without
    /// listings or when `cancel` fires during the delay before a request.
    pub async fn scrape(&self, cancel: &CancellationToken) -> Result<ScrapeOutcome> {
        let page_limit = self.config.page_limit;
        let mut query = ListingsQuery::from_config(&self.config);
        let mut table = ResultTable::new();
        let mut failures = Vec::new();
        let mut pages_fetched = 0;

        let stop_reason = loop {
            if query.page > page_limit {
                break StopReason::PageLimitReached;
            }

            if !self.pause(cancel).await {
                warn!("Scrape cancelled before page {}", query.page);
                break StopReason::Cancelled;
            }

            let url = query.url()?;
            info!("Scraping page {}: {}", query.page, url);
            let page = self.fetch(&url).await?;
            pages_fetched += 1;

            let entries = self.extractor.locate(&page);
            if entries.is_empty() {
                info!("No listings on page {}, stopping", query.page);
                break StopReason::EndOfResults;
            }

            let found = entries.len();
            for (index, entry) in entries.into_iter().enumerate() {
                match self.extractor.record(entry) {
                    Ok(record) => table.push(record),
                    Err(e)
                        if e.is_field_not_found()
                            && self.config.extraction_mode == ExtractionMode::SkipMalformed =>
                    {
                        warn!("Skipping listing {} on page {}: {}", index, query.page, e);
                        failures.push(EntryFailure {
                            page: query.page,
                            index,
                            reason: e.to_string(),
                        });
                    }
                    Err(e) => return Err(e),
                }
            }
            debug!("Page {} had {} listings", query.page, found);

            query.next_page();
        };

        let outcome = ScrapeOutcome {
            table,
            failures,
            pages_fetched,
            stop_reason,
        };
        info!("Scrape finished: {}", outcome.summary());
        Ok(outcome)
    }

    /// Courtesy delay before each request. Returns `false` if cancelled.
    async fn pause(&self, cancel: &CancellationToken) -> bool {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(self.config.request_delay) => true,
        }
    }
}
