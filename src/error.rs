//! Error types for the harvester.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Invalid category (OAI setSpec) format.
    #[error("Invalid category: '{0}'. Expected a setSpec like 'cs' or 'physics:hep-th'")]
    InvalidCategory(String),

    /// Date range with from later than until.
    #[error("Invalid date range: from {from} is later than until {until}")]
    InvalidDateRange { from: String, until: String },

    /// HTTP transport failure (connection refused, timeout, invalid URL).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Fatal HTTP status (anything other than 200 or the retryable 503).
    #[error("Request to {url} failed with status {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The upstream kept returning 503 until the retry cap was exhausted.
    #[error("Gave up on {url} after {attempts} attempts (service unavailable)")]
    RetriesExhausted { attempts: u32, url: String },

    /// Response body is not well-formed XML.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Response parsed as XML but lacks the ListRecords envelope, so the
    /// resumption token cannot be located. Distinct from an empty result.
    #[error("Unexpected response shape: {context}")]
    UnexpectedResponse { context: String },

    /// JSON serialization of the result collection failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while writing the output artifact.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
