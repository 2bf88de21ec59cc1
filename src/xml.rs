//! Namespace-aware XML helpers for navigating OAI-PMH documents.
//!
//! OAI-PMH responses mix two namespaces (the protocol envelope and the
//! metadata schema), so all lookups here are qualified by namespace URI.

use roxmltree::Node;

/// Find the first child element with the given namespace and tag name.
pub fn find_child<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &str,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.has_tag_name((ns, tag)))
}

/// Find all child elements with the given namespace and tag name.
pub fn find_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    ns: &'a str,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |child| child.is_element() && child.has_tag_name((ns, tag)))
}

/// Get the text content of a node, trimmed. Empty string if there is none.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text().map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Get the text content of a node if it is present and non-empty after
/// trimming.
pub fn non_empty_text(node: Node<'_, '_>) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
