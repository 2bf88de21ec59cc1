//! arXiv Harvester - Download paper metadata from the arXiv OAI-PMH repository.
//!
//! This crate harvests bibliographic records for a category (OAI setSpec)
//! and date range from `export.arxiv.org`, following resumption-token
//! pagination under a wall-clock time budget, and writes the result as a
//! single JSON array.
//!
//! # Example
//!
//! ```
//! use arxiv_harvester::config::validate_category;
//!
//! assert!(validate_category("cs").is_ok());
//! assert!(validate_category("physics:hep-th").is_ok());
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, validation, URL builders, [`config::HarvestConfig`]
//! - [`types`]: Core data types ([`types::Record`], [`types::Harvest`])
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client and single-fetch classification
//! - [`xml`]: Namespace-aware XML utilities
//! - [`record`]: Fail-soft metadata record parsing
//! - [`harvester`]: The fetch/paginate/budget loop
//! - [`json`]: JSON output generation
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod harvester;
pub mod http;
pub mod json;
pub mod record;
pub mod types;
pub mod xml;

// Re-export main functions
pub use harvester::harvest;

// Re-export commonly used items
pub use config::{validate_category, HarvestConfig};
pub use error::{HarvesterError, Result};
pub use types::{Harvest, Record};
