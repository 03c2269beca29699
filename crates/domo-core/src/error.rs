use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomoError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {status} returned for {url}")]
    HttpStatus { url: String, status: u16 },
    #[error("Field '{field}' not found using selector '{selector}'")]
    FieldNotFound { field: String, selector: String },
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl DomoError {
    pub fn field_not_found(field: &str, selector: &str) -> Self {
        DomoError::FieldNotFound {
            field: field.to_string(),
            selector: selector.to_string(),
        }
    }

    pub fn is_field_not_found(&self) -> bool {
        matches!(self, DomoError::FieldNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DomoError>;
