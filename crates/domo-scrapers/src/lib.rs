pub mod domoplius;
pub mod extract;
pub mod fetcher;

use domo_core::{DomoError, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub use domoplius::{DomopliusScraper, EntryFailure, ScrapeOutcome, StopReason};
pub use extract::{locate_listings, FieldExtractor, ListingEntry, ListingPage, ListingSelectors};
pub use fetcher::{FetchedPage, HttpFetcher, PageFetcher};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_5) AppleWebKit/605.1.15 (KHTML, like Gecko)Version/12.1.1 Safari/605.1.15";
pub const DEFAULT_BASE_URL: &str = "https://domoplius.lt/skelbimai/butai";
/// Klaipėda in the site's `address_1` filter.
pub const DEFAULT_REGION_CODE: &str = "112";
pub const DEFAULT_OUTPUT_PATH: &str = "scraped_data.csv";

/// What to do with a listing entry that is missing one of its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// Abort the whole run on the first missing field
    #[default]
    Strict,
    /// Record the failure, skip the entry and keep going
    SkipMalformed,
}

/// Construction-time settings for a scrape run
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub headers: BTreeMap<String, String>,
    pub page_limit: u32,
    pub request_delay: Duration,
    pub base_url: String,
    pub region_code: String,
    pub extraction_mode: ExtractionMode,
    pub output_path: PathBuf,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string());

        Self {
            headers,
            page_limit: 1,
            request_delay: Duration::from_secs(1),
            base_url: DEFAULT_BASE_URL.to_string(),
            region_code: DEFAULT_REGION_CODE.to_string(),
            extraction_mode: ExtractionMode::Strict,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl ScraperConfig {
    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_region_code(mut self, region_code: impl Into<String>) -> Self {
        self.region_code = region_code.into();
        self
    }

    pub fn with_extraction_mode(mut self, mode: ExtractionMode) -> Self {
        self.extraction_mode = mode;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_limit == 0 {
            return Err(DomoError::InvalidConfig(
                "page_limit must be at least 1".to_string(),
            ));
        }
        if !self
            .headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case("user-agent"))
        {
            return Err(DomoError::InvalidConfig(
                "headers must include a User-Agent".to_string(),
            ));
        }
        Url::parse(&self.base_url)?;
        Ok(())
    }
}

/// Search-results query for one page of apartments for sale
#[derive(Debug, Clone)]
pub struct ListingsQuery {
    pub base_url: String,
    pub region_code: String,
    pub page: u32,
}

impl ListingsQuery {
    pub fn new(base_url: impl Into<String>, region_code: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            region_code: region_code.into(),
            page: 1,
        }
    }

    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(config.base_url.clone(), config.region_code.clone())
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// `<base>?action_type=1&address_1=<region>&category_search=1&page_nr=<page>`
    pub fn url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .clear()
            .append_pair("action_type", "1")
            .append_pair("address_1", &self.region_code)
            .append_pair("category_search", "1")
            .append_pair("page_nr", &self.page.to_string());
        Ok(url)
    }
}
