//! HTTP client wrapper for talking to the OAI-PMH endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{HarvesterError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("arxiv-harvester/", env!("CARGO_PKG_VERSION"));

/// Outcome of a single fetch attempt.
#[derive(Debug)]
pub enum FetchOutcome {
    /// HTTP 200 with the response body.
    Page(String),

    /// HTTP 503. Carries the Retry-After header value when the server sent
    /// one; the controller logs it but waits its own configured interval.
    Unavailable { retry_after: Option<String> },
}

/// Create a configured HTTP client.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Issue one GET and classify the result.
///
/// 200 and 503 are the only statuses the harvest loop can make progress
/// with; everything else, including transport errors, is fatal.
pub fn fetch(client: &Client, url: &str) -> Result<FetchOutcome> {
    let response = client.get(url).send()?;
    let status = response.status();

    if status == StatusCode::SERVICE_UNAVAILABLE {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        return Ok(FetchOutcome::Unavailable { retry_after });
    }

    if !status.is_success() {
        return Err(HarvesterError::Status {
            status,
            url: url.to_string(),
        });
    }

    Ok(FetchOutcome::Page(response.text()?))
}
