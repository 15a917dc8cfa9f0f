//! HTML parsing support.
//!
//! This module parses HTML strings with scraper/html5ever and converts the
//! result to the Node structure used by the JsonML conversion.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::{Container, Element, Node};

/// Parse an HTML fragment into a detached `<div>` holding the parsed nodes.
///
/// # Example
///
/// ```rust
/// use jsonml_dom::{parse_html, parse_tree};
///
/// let container = parse_html("<h1>Hello <em>World</em></h1>");
/// assert_eq!(container.tag_name(), "div");
///
/// let jml = parse_tree(&container, None).unwrap().unwrap();
/// assert_eq!(jml.children()[0].tag(), Some("h1"));
/// ```
pub fn parse_html(html: &str) -> Node {
    let fragment = Html::parse_fragment(html);

    let mut container = Element::new("div");
    for child in fragment.root_element().children() {
        if let Some(element) = ElementRef::wrap(child) {
            container.children.push(element_to_node(element));
        } else if let Some(node) = leaf_to_node(child.value()) {
            container.children.push(node);
        }
    }

    Node::Element(container)
}

/// Parse a complete HTML document, keeping its doctype and top-level comments
pub fn parse_document(html: &str) -> Node {
    let document = Html::parse_document(html);

    let mut root = Container::default();
    for child in document.tree.root().children() {
        if let Some(element) = ElementRef::wrap(child) {
            root.children.push(element_to_node(element));
        } else if let Some(node) = leaf_to_node(child.value()) {
            root.children.push(node);
        }
    }

    Node::Document(root)
}

/// Convert a scraper ElementRef to our Node structure
fn element_to_node(element: ElementRef) -> Node {
    let mut node = Element::new(element.value().name());

    for (name, value) in element.value().attrs() {
        node.set_attr(name, value);
    }

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            node.children.push(element_to_node(child_element));
        } else if let Some(leaf) = leaf_to_node(child.value()) {
            node.children.push(leaf);
        }
    }

    Node::Element(node)
}

/// Convert a non-element scraper node
fn leaf_to_node(value: &ScraperNode) -> Option<Node> {
    match value {
        ScraperNode::Text(text) => Some(Node::text(&text.text)),
        ScraperNode::Comment(comment) => Some(Node::comment(&comment.comment)),
        ScraperNode::Doctype(doctype) => Some(Node::doctype(
            doctype.name(),
            doctype.public_id(),
            doctype.system_id(),
        )),
        ScraperNode::ProcessingInstruction(pi) => {
            Some(Node::processing_instruction(&pi.target, &pi.data))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;

    #[test]
    fn test_parse_simple_html() {
        let node = parse_html("<p>Hello World</p>");
        assert_eq!(node.tag_name(), "div");
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].tag_name(), "p");
        assert_eq!(node.text_content(), "Hello World");
    }

    #[test]
    fn test_parse_keeps_comments_and_attributes() {
        let node = parse_html(r#"<!-- note --><a href="/x" class="y">link</a>"#);
        let children = node.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], Node::comment(" note "));
        assert_eq!(children[1].attr("href"), Some("/x"));
        assert_eq!(children[1].attr("class"), Some("y"));
    }

    #[test]
    fn test_parse_document_has_doctype() {
        let node = parse_document("<!DOCTYPE html><html><head></head><body><p>x</p></body></html>");
        assert_eq!(node.node_type(), NodeType::Document);
        let children = node.children();
        assert_eq!(children[0], Node::doctype("html", "", ""));
        assert_eq!(children[1].tag_name(), "html");
    }

    #[test]
    fn test_parse_document_public_doctype() {
        let node = parse_document(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN"><title>t</title>"#,
        );
        assert_eq!(
            node.children()[0],
            Node::doctype("html", "-//W3C//DTD HTML 4.01//EN", "")
        );
    }
}
