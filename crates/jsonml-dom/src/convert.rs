//! Convert a Node tree to JsonML
//!
//! One recursive pass: every node maps to a JsonML array, a plain string, or
//! nothing. Elements follow a generic rule except for a handful of tags whose
//! DOM shape differs from their markup (frames, `<style>`, form controls).

use jsonml_core::{JsonMl, Props};

use crate::filter::Filter;
use crate::node::{DocumentType, Element, Node};
use crate::{JsonMlError, Result};

/// Recursive converter holding the per-call configuration
pub(crate) struct Converter<'a> {
    filter: Option<&'a dyn Filter>,
    max_depth: Option<usize>,
}

impl<'a> Converter<'a> {
    pub(crate) fn new(filter: Option<&'a dyn Filter>, max_depth: Option<usize>) -> Self {
        Self { filter, max_depth }
    }

    /// Convert `node`, which sits `depth` levels below the root of the call
    pub(crate) fn convert(&self, node: &Node, depth: usize) -> Result<Option<JsonMl>> {
        if let Some(limit) = self.max_depth {
            if depth > limit {
                return Err(JsonMlError::DepthExceeded { limit });
            }
        }

        trace!(node_type = ?node.node_type(), depth, "converting node");

        match node {
            Node::Element(element) => self.convert_element(node, element, depth),

            Node::Document(container) | Node::DocumentFragment(container) => {
                let mut jml = JsonMl::element("");
                self.push_children(&container.children, depth, &mut jml)?;
                Ok(self.finish(jml, node))
            }

            Node::Text(text) | Node::CData(text) => Ok(Some(JsonMl::Text(text.clone()))),

            Node::DocumentType(doctype) => {
                let jml = JsonMl::Declaration(doctype_declaration(doctype));
                Ok(self.finish(jml, node))
            }

            Node::Comment(text) => {
                if !text.starts_with("DOCTYPE") {
                    return Ok(None);
                }
                Ok(self.finish(JsonMl::Declaration(text.clone()), node))
            }

            Node::ProcessingInstruction { .. } => Ok(None),
        }
    }

    fn convert_element(
        &self,
        node: &Node,
        element: &Element,
        depth: usize,
    ) -> Result<Option<JsonMl>> {
        let mut jml = JsonMl::Element {
            tag: element.local_name.clone(),
            props: collect_props(element),
            children: Vec::new(),
        };

        match element.tag_name().as_str() {
            "frame" | "iframe" => self.push_embedded(element, depth, &mut jml)?,

            "style" => self.push_style(element, depth, &mut jml)?,

            "input" => {
                self.push_children(&element.children, depth, &mut jml)?;
                if element.is_password_input() {
                    withhold_value(&mut jml);
                } else if let Some(value) = element.current_value().filter(|v| !v.is_empty()) {
                    jml.set_prop("value", value);
                }
            }

            "textarea" => {
                if !self.push_children(&element.children, depth, &mut jml)? {
                    let fallback = element
                        .value
                        .as_deref()
                        .filter(|v| !v.is_empty())
                        .or(element.inner_html.as_deref())
                        .filter(|v| !v.is_empty());
                    if let Some(text) = fallback {
                        jml.push(JsonMl::text(text));
                    }
                }
            }

            _ => {
                self.push_children(&element.children, depth, &mut jml)?;
            }
        }

        Ok(self.finish(jml, node))
    }

    /// Generic rule: convert each child in order, skipping absent results and
    /// empty text. Returns whether the source had any child nodes at all.
    fn push_children(&self, children: &[Node], depth: usize, jml: &mut JsonMl) -> Result<bool> {
        for child in children {
            match self.convert(child, depth + 1)? {
                Some(JsonMl::Text(text)) if text.is_empty() => {}
                Some(child) => jml.push(child),
                None => {}
            }
        }
        Ok(!children.is_empty())
    }

    /// The frame's document replaces its children. Access failures leave the
    /// frame empty.
    #[cfg_attr(not(any(test, feature = "tracing")), allow(unused_variables))]
    fn push_embedded(&self, element: &Element, depth: usize, jml: &mut JsonMl) -> Result<()> {
        match element.frame.resolve() {
            Ok(Some(document)) => {
                if let Some(child) = self.convert(document, depth + 1)? {
                    jml.push(child);
                }
            }
            Ok(None) => {}
            Err(err) => {
                debug!(tag = %element.local_name, error = %err, "skipping embedded document");
            }
        }
        Ok(())
    }

    fn push_style(&self, element: &Element, depth: usize, jml: &mut JsonMl) -> Result<()> {
        if let Some(sheet) = element.style_sheet.as_deref().filter(|s| !s.is_empty()) {
            jml.push(JsonMl::Text(unwrap_comment_tokens(sheet)));
            return Ok(());
        }

        for child in &element.children {
            if let Some(JsonMl::Text(text)) = self.convert(child, depth + 1)? {
                if !text.is_empty() {
                    jml.push(JsonMl::Text(unwrap_comment_tokens(&text)));
                }
            }
        }
        Ok(())
    }

    fn finish(&self, jml: JsonMl, node: &Node) -> Option<JsonMl> {
        match self.filter {
            Some(filter) => filter.apply(jml, node),
            None => Some(jml),
        }
    }
}

/// Specified attributes with a string form. `style` prefers the computed style.
fn collect_props(element: &Element) -> Option<Props> {
    let mut props = Props::new();

    for attr in element.specified_attributes() {
        let value = if attr.name == "style" {
            element
                .css_text
                .as_deref()
                .filter(|css| !css.is_empty())
                .or(attr.value.as_deref())
        } else {
            attr.value.as_deref()
        };

        if let Some(value) = value {
            props.insert(attr.name.clone(), value.to_string());
        }
    }

    (!props.is_empty()).then_some(props)
}

/// Drop any `value` property, and the map itself if that empties it
fn withhold_value(jml: &mut JsonMl) {
    if let JsonMl::Element { props, .. } = jml {
        if let Some(map) = props {
            map.retain(|name, _| !name.eq_ignore_ascii_case("value"));
            if map.is_empty() {
                *props = None;
            }
        }
    }
}

/// `DOCTYPE <name> [PUBLIC "<public id>"] ["<system id>"]`
fn doctype_declaration(doctype: &DocumentType) -> String {
    let name = doctype
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or("html")
        .to_lowercase();

    let mut parts = vec!["DOCTYPE".to_string(), name];

    if let Some(public_id) = doctype.public_id.as_deref().filter(|id| !id.is_empty()) {
        parts.push("PUBLIC".to_string());
        parts.push(format!("\"{}\"", public_id));
    }

    if let Some(system_id) = doctype.system_id.as_deref().filter(|id| !id.is_empty()) {
        parts.push(format!("\"{}\"", system_id));
    }

    parts.join(" ")
}

/// Remove the first `<!--` and then the first `-->`
fn unwrap_comment_tokens(css: &str) -> String {
    css.replacen("<!--", "", 1).replacen("-->", "", 1)
}
