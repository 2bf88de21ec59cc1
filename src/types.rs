//! Core data types for the harvester.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Sentinel used when an author name part is missing from the metadata.
pub const MISSING_NAME: &str = "n/a";

/// One harvested bibliographic record.
///
/// Field order matches the serialized output document. All text fields are
/// normalized (lower-cased, trimmed, newlines collapsed) and default to the
/// empty string when the source XML lacks them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Paper title.
    pub title: String,

    /// arXiv identifier (e.g. "2404.01234").
    pub id: String,

    /// Abstract text.
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Space-separated category list as reported by the repository.
    pub categories: String,

    /// DOI, when the repository knows one.
    pub doi: String,

    /// Submission date (YYYY-MM-DD).
    pub created: String,

    /// Date of the latest revision, empty for unrevised papers.
    pub updated: String,

    /// One "<forenames> <keyname>" entry per author element, in source
    /// order. Missing name parts are substituted with [`MISSING_NAME`], so
    /// the length always equals the author count.
    pub authors: Vec<String>,

    /// One affiliation per author, or empty when any author lacks one.
    /// Never partially populated.
    pub affiliation: Vec<String>,

    /// Public abstract page URL, derived from `id`.
    pub url: String,
}

/// Result of one completed harvest run.
#[derive(Debug, Clone)]
pub struct Harvest {
    /// Harvested records in page order, source order within each page.
    pub records: Vec<Record>,

    /// Number of pages fetched successfully.
    pub pages: usize,

    /// Total wall-clock time of the run.
    pub elapsed: Duration,
}
