//! Configuration constants, input validation and URL construction.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvesterError, Result};

/// Base URL for the arXiv OAI-PMH endpoint.
pub const OAI_BASE_URL: &str = "http://export.arxiv.org/oai2";

/// Metadata schema variant requested from the repository.
pub const METADATA_PREFIX: &str = "arXiv";

/// Namespace of the OAI-PMH protocol envelope.
pub const OAI_NS: &str = "http://www.openarchives.org/OAI/2.0/";

/// Namespace of the arXiv metadata schema.
pub const ARXIV_NS: &str = "http://arxiv.org/OAI/arXiv/";

/// HTTP request timeout in seconds.
///
/// Large categories can produce multi-megabyte pages, so this is generous.
pub const HTTP_TIMEOUT_SECS: u64 = 60;

/// Default wait between retries after a 503 response (seconds).
pub const DEFAULT_RETRY_WAIT_SECS: u64 = 30;

/// Default wall-clock budget for one harvest run (seconds).
pub const DEFAULT_TIMEOUT_BUDGET_SECS: u64 = 300;

/// Default cap on consecutive 503 retries for a single page.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

/// setSpec pattern: a lowercase group, optionally followed by a
/// colon-separated archive (e.g. "cs", "stat", "physics:hep-th").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CATEGORY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+(?::[a-z][a-z-]*)?$").expect("valid regex"));

/// Validate a category (OAI setSpec) identifier.
///
/// # Examples
/// ```
/// use arxiv_harvester::config::validate_category;
///
/// assert!(validate_category("cs").is_ok());
/// assert!(validate_category("physics:hep-th").is_ok());
/// assert!(validate_category("Not A Set").is_err());
/// ```
pub fn validate_category(category: &str) -> Result<()> {
    if CATEGORY_PATTERN.is_match(category) {
        Ok(())
    } else {
        Err(HarvesterError::InvalidCategory(category.to_string()))
    }
}

/// First day of the current month, the default lower bound of the date range.
pub fn default_date_from() -> NaiveDate {
    let today = chrono::Local::now().date_naive();
    today.with_day(1).unwrap_or(today)
}

/// Today, the default upper bound of the date range.
pub fn default_date_until() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Build the initial ListRecords query URL.
pub fn list_records_url(base_url: &str, category: &str, from: NaiveDate, until: NaiveDate) -> String {
    format!(
        "{base_url}?verb=ListRecords&from={}&until={}&metadataPrefix={METADATA_PREFIX}&set={category}",
        from.format("%Y-%m-%d"),
        until.format("%Y-%m-%d"),
    )
}

/// Build a continuation query URL carrying only the resumption token.
///
/// Per OAI-PMH convention all other parameters are omitted once the server
/// has issued a token.
pub fn resumption_url(base_url: &str, token: &str) -> String {
    format!("{base_url}?verb=ListRecords&resumptionToken={token}")
}

/// Build the public abstract page URL for a (normalized) arXiv identifier.
pub fn abs_url(id: &str) -> String {
    format!("https://arxiv.org/abs/{id}")
}

/// Settings for one harvest run.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// OAI-PMH endpoint to query. Defaults to [`OAI_BASE_URL`];
    /// overridable for tests against a local server.
    pub base_url: String,

    /// Category (OAI setSpec) to harvest, e.g. "cs".
    pub category: String,

    /// Lower bound of the date range (inclusive).
    pub date_from: NaiveDate,

    /// Upper bound of the date range (inclusive).
    pub date_until: NaiveDate,

    /// Seconds to sleep between retries after a 503 response.
    pub retry_wait_secs: u64,

    /// Wall-clock budget in seconds; the run stops with partial results
    /// once the time spent on successful pages reaches it.
    pub timeout_budget_secs: u64,

    /// Maximum consecutive 503 retries before the run aborts.
    pub max_retries: u32,
}

impl HarvestConfig {
    /// Create a config for the given category with default date range,
    /// retry wait, time budget and retry cap.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            base_url: OAI_BASE_URL.to_string(),
            category: category.into(),
            date_from: default_date_from(),
            date_until: default_date_until(),
            retry_wait_secs: DEFAULT_RETRY_WAIT_SECS,
            timeout_budget_secs: DEFAULT_TIMEOUT_BUDGET_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Validate the category and date range.
    pub fn validate(&self) -> Result<()> {
        validate_category(&self.category)?;
        if self.date_from > self.date_until {
            return Err(HarvesterError::InvalidDateRange {
                from: self.date_from.to_string(),
                until: self.date_until.to_string(),
            });
        }
        Ok(())
    }

    /// The initial query URL for this run.
    pub fn initial_url(&self) -> String {
        list_records_url(&self.base_url, &self.category, self.date_from, self.date_until)
    }
}
