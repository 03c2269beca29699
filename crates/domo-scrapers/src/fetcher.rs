use async_trait::async_trait;
use domo_core::{DomoError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

/// Raw response of one results-page request
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    /// Fails with [`DomoError::HttpStatus`] for 4xx and 5xx responses.
    pub fn error_for_status(self) -> Result<Self> {
        if self.status >= 400 {
            return Err(DomoError::HttpStatus {
                url: self.url,
                status: self.status,
            });
        }
        Ok(self)
    }
}

/// Source of results pages
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Issue a single GET for `url`. Transport failures are returned as errors,
    /// the status code is left for the caller to judge.
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(headers: &BTreeMap<String, String>) -> Result<Self> {
        let client = Client::builder()
            .default_headers(Self::header_map(headers)?)
            .build()?;
        Ok(Self { client })
    }

    fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| DomoError::InvalidHeader(format!("{}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| DomoError::InvalidHeader(format!("{}: {}", name, e)))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        debug!("GET {} -> {}", url, status);

        let body = response.text().await?;
        Ok(FetchedPage {
            url: url.to_string(),
            status,
            body,
        })
    }
}
