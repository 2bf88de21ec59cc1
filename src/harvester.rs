//! The harvest loop: fetch, parse, follow resumption tokens, stop on budget.

use std::thread;
use std::time::{Duration, Instant};

use roxmltree::Document;

use crate::config::{resumption_url, HarvestConfig, ARXIV_NS, OAI_NS};
use crate::error::{HarvesterError, Result};
use crate::http::{create_client, fetch, FetchOutcome};
use crate::record::parse_record;
use crate::types::{Harvest, Record};
use crate::xml::{find_child, find_children, non_empty_text};

/// Harvest all records for the configured category and date range.
///
/// Issues sequential ListRecords queries against the OAI-PMH endpoint,
/// following resumption tokens until the server stops paginating or the
/// wall-clock budget is spent. On 503 the same URL is retried after the
/// configured wait, up to `max_retries` consecutive times; any other
/// failure aborts the run.
///
/// A budget-truncated run is a success carrying partial results; an aborted
/// run yields no records.
pub fn harvest(config: &HarvestConfig) -> Result<Harvest> {
    config.validate()?;
    let client = create_client()?;
    let retry_wait = Duration::from_secs(config.retry_wait_secs);
    let budget = Duration::from_secs(config.timeout_budget_secs);

    let run_start = Instant::now();
    let mut page_start = Instant::now();
    // Wall time spent on successful pages. Retry sleeps are tracked
    // separately and never charged against the budget.
    let mut budget_spent = Duration::ZERO;
    let mut slept = Duration::ZERO;
    let mut retries: u32 = 0;

    let mut url = config.initial_url();
    let mut records: Vec<Record> = Vec::new();
    let mut pages = 0usize;

    loop {
        tracing::debug!(%url, "Fetching records");

        let body = match fetch(&client, &url)? {
            FetchOutcome::Unavailable { retry_after } => {
                retries += 1;
                if retries > config.max_retries {
                    return Err(HarvesterError::RetriesExhausted {
                        attempts: retries,
                        url,
                    });
                }
                tracing::warn!(
                    attempt = retries,
                    max_retries = config.max_retries,
                    retry_after = retry_after.as_deref(),
                    wait_secs = config.retry_wait_secs,
                    "Got 503, retrying after configured wait"
                );
                thread::sleep(retry_wait);
                slept += retry_wait;
                continue;
            }
            FetchOutcome::Page(body) => body,
        };
        retries = 0;

        let (mut page_records, token) = parse_page(&body)?;
        pages += 1;
        tracing::info!(page = pages, records = page_records.len(), "Parsed page");
        records.append(&mut page_records);

        let Some(token) = token else {
            break; // No more pages.
        };

        budget_spent += page_start.elapsed().saturating_sub(slept);
        if budget_spent >= budget {
            tracing::info!(
                records = records.len(),
                "Time budget spent, stopping with partial results"
            );
            break;
        }

        tracing::debug!(%token, "Continuing with resumption token");
        url = resumption_url(&config.base_url, &token);
        page_start = Instant::now();
        slept = Duration::ZERO;
    }

    let elapsed = run_start.elapsed();
    tracing::info!(
        total = records.len(),
        pages,
        elapsed_secs = elapsed.as_secs_f64(),
        "Fetching completed"
    );

    Ok(Harvest {
        records,
        pages,
        elapsed,
    })
}

/// Parse one ListRecords response body.
///
/// Returns the records on the page and the resumption token, `None` meaning
/// pagination is finished (token element absent or empty). A body without a
/// `ListRecords` envelope is a fatal [`HarvesterError::UnexpectedResponse`],
/// distinct from an empty result.
fn parse_page(xml: &str) -> Result<(Vec<Record>, Option<String>)> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let Some(list) = find_child(root, OAI_NS, "ListRecords") else {
        // OAI-PMH error responses carry an <error> element instead.
        let context = match find_child(root, OAI_NS, "error") {
            Some(err) => format!(
                "no ListRecords element; server reported error '{}': {}",
                err.attribute("code").unwrap_or("unknown"),
                crate::xml::get_text(err)
            ),
            None => "no ListRecords element in response".to_string(),
        };
        return Err(HarvesterError::UnexpectedResponse { context });
    };

    let mut records = Vec::new();
    for rec in find_children(list, OAI_NS, "record") {
        // Deleted records carry a header but no metadata; skip them.
        let Some(metadata) = find_child(rec, OAI_NS, "metadata") else {
            tracing::debug!("Skipping record without metadata payload");
            continue;
        };
        let Some(meta) = find_child(metadata, ARXIV_NS, "arXiv") else {
            tracing::debug!("Skipping metadata without arXiv element");
            continue;
        };
        records.push(parse_record(meta));
    }

    let token = find_child(list, OAI_NS, "resumptionToken").and_then(non_empty_text);
    Ok((records, token))
}
