//! Record parsing: one `<arXiv>` metadata element into a flat [`Record`].
//!
//! Parsing is fail-soft: a missing or empty sub-field yields the
//! type-appropriate default (empty string, empty list, or the `"n/a"` name
//! sentinel) so that one sparse record never aborts a batch.

use roxmltree::Node;

use crate::config::{abs_url, ARXIV_NS};
use crate::types::{Record, MISSING_NAME};
use crate::xml::{find_child, find_children, non_empty_text};

/// Parse one arXiv metadata element into a [`Record`]. Never fails.
pub fn parse_record(metadata: Node<'_, '_>) -> Record {
    let id = text_field(metadata, "id");
    let url = abs_url(&id);
    let (authors, affiliation) = parse_authors(metadata);

    Record {
        title: text_field(metadata, "title"),
        abstract_text: text_field(metadata, "abstract"),
        categories: text_field(metadata, "categories"),
        doi: text_field(metadata, "doi"),
        created: text_field(metadata, "created"),
        updated: text_field(metadata, "updated"),
        id,
        authors,
        affiliation,
        url,
    }
}

/// Normalize a text field: trim, lowercase, collapse newlines to spaces.
fn normalize(text: &str) -> String {
    text.trim().to_lowercase().replace('\n', " ")
}

/// Extract and normalize the text of a direct child element, or empty.
fn text_field(metadata: Node<'_, '_>, tag: &str) -> String {
    find_child(metadata, ARXIV_NS, tag)
        .and_then(|n| n.text())
        .map(normalize)
        .unwrap_or_default()
}

/// Extract one name part of an author, falling back to the sentinel.
fn name_part(author: Node<'_, '_>, tag: &str) -> String {
    find_child(author, ARXIV_NS, tag)
        .and_then(non_empty_text)
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| MISSING_NAME.to_string())
}

/// Extract author names and affiliations.
///
/// Names are paired positionally as "<forenames> <keyname>", each part
/// defaulting independently, so the list length always equals the author
/// count. Affiliations collapse to an empty list as soon as one author
/// lacks one; a partial list is never produced.
fn parse_authors(metadata: Node<'_, '_>) -> (Vec<String>, Vec<String>) {
    let Some(authors_el) = find_child(metadata, ARXIV_NS, "authors") else {
        return (Vec::new(), Vec::new());
    };

    let authors: Vec<Node<'_, '_>> = find_children(authors_el, ARXIV_NS, "author").collect();

    let names = authors
        .iter()
        .map(|a| format!("{} {}", name_part(*a, "forenames"), name_part(*a, "keyname")))
        .collect();

    let affiliations = authors
        .iter()
        .map(|a| {
            find_child(*a, ARXIV_NS, "affiliation")
                .and_then(non_empty_text)
                .map(|s| s.to_lowercase())
        })
        .collect::<Option<Vec<String>>>()
        .unwrap_or_default();

    (names, affiliations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    fn parse(xml: &str) -> Record {
        let doc = Document::parse(xml).unwrap();
        parse_record(doc.root_element())
    }

    const FULL: &str = r#"<arXiv xmlns="http://arxiv.org/OAI/arXiv/">
        <id>2404.01234</id>
        <created>2024-04-01</created>
        <updated>2024-04-15</updated>
        <authors>
            <author><keyname>Lovelace</keyname><forenames>Ada</forenames>
                <affiliation>Analytical Engine Dept</affiliation></author>
            <author><keyname>Babbage</keyname><forenames>Charles</forenames>
                <affiliation>Difference Engine Works</affiliation></author>
        </authors>
        <title>A Note
 on Computable Numbers</title>
        <categories>cs.LO cs.CC</categories>
        <doi>10.1000/exmpl</doi>
        <abstract>We show a thing.</abstract>
    </arXiv>"#;

    #[test]
    fn test_parse_full_record() {
        let record = parse(FULL);

        assert_eq!(record.id, "2404.01234");
        assert_eq!(record.url, "https://arxiv.org/abs/2404.01234");
        assert_eq!(record.title, "a note  on computable numbers");
        assert_eq!(record.abstract_text, "we show a thing.");
        assert_eq!(record.categories, "cs.lo cs.cc");
        assert_eq!(record.doi, "10.1000/exmpl");
        assert_eq!(record.created, "2024-04-01");
        assert_eq!(record.updated, "2024-04-15");
        assert_eq!(
            record.authors,
            vec!["ada lovelace".to_string(), "charles babbage".to_string()]
        );
        assert_eq!(
            record.affiliation,
            vec![
                "analytical engine dept".to_string(),
                "difference engine works".to_string()
            ]
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record = parse(r#"<arXiv xmlns="http://arxiv.org/OAI/arXiv/"/>"#);

        assert_eq!(record.id, "");
        assert_eq!(record.title, "");
        assert_eq!(record.abstract_text, "");
        assert_eq!(record.categories, "");
        assert_eq!(record.doi, "");
        assert_eq!(record.created, "");
        assert_eq!(record.updated, "");
        assert!(record.authors.is_empty());
        assert!(record.affiliation.is_empty());
        assert_eq!(record.url, "https://arxiv.org/abs/");
    }

    #[test]
    fn test_missing_name_parts_use_sentinel() {
        let record = parse(
            r#"<arXiv xmlns="http://arxiv.org/OAI/arXiv/">
                <authors>
                    <author><keyname>Erdos</keyname></author>
                    <author><forenames>Srinivasa</forenames></author>
                    <author/>
                </authors>
            </arXiv>"#,
        );

        assert_eq!(
            record.authors,
            vec![
                "n/a erdos".to_string(),
                "srinivasa n/a".to_string(),
                "n/a n/a".to_string()
            ]
        );
    }

    #[test]
    fn test_one_missing_affiliation_drops_whole_list() {
        let record = parse(
            r#"<arXiv xmlns="http://arxiv.org/OAI/arXiv/">
                <authors>
                    <author><keyname>A</keyname><forenames>One</forenames>
                        <affiliation>Somewhere</affiliation></author>
                    <author><keyname>B</keyname><forenames>Two</forenames></author>
                </authors>
            </arXiv>"#,
        );

        assert_eq!(record.authors.len(), 2);
        assert!(record.affiliation.is_empty());
    }

    #[test]
    fn test_affiliation_length_matches_authors_or_is_zero() {
        let record = parse(FULL);
        assert_eq!(record.affiliation.len(), record.authors.len());

        let sparse = parse(
            r#"<arXiv xmlns="http://arxiv.org/OAI/arXiv/">
                <authors><author><keyname>Solo</keyname></author></authors>
            </arXiv>"#,
        );
        assert_eq!(sparse.authors.len(), 1);
        assert!(sparse.affiliation.is_empty());
    }

    #[test]
    fn test_empty_affiliation_element_counts_as_missing() {
        let record = parse(
            r#"<arXiv xmlns="http://arxiv.org/OAI/arXiv/">
                <authors>
                    <author><keyname>A</keyname><affiliation>  </affiliation></author>
                </authors>
            </arXiv>"#,
        );
        assert!(record.affiliation.is_empty());
    }

    #[test]
    fn test_id_is_normalized_before_url_derivation() {
        let record = parse(
            r#"<arXiv xmlns="http://arxiv.org/OAI/arXiv/">
                <id>  Math/0104123  </id>
            </arXiv>"#,
        );
        assert_eq!(record.id, "math/0104123");
        assert_eq!(record.url, "https://arxiv.org/abs/math/0104123");
    }
}
