//! Read-only DOM node model consumed by the JsonML conversion.
//!
//! Hosts (html5ever via scraper, CDP, a browser bridge) adapt their trees into
//! this structure. Besides the static markup it carries the bits of live state
//! a browser DOM exposes and the conversion needs: computed style text, form
//! values, inline stylesheet text and embedded frame documents.

use crate::{JsonMlError, Result};

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// CDATA section (nodeType = 4)
    CData = 4,
    /// Processing instruction (nodeType = 7)
    ProcessingInstruction = 7,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document node (nodeType = 9)
    Document = 9,
    /// Doctype node (nodeType = 10)
    DocumentType = 10,
    /// Document fragment node (nodeType = 11)
    DocumentFragment = 11,
}

/// A DOM node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Document(Container),
    DocumentFragment(Container),
    Text(String),
    CData(String),
    DocumentType(DocumentType),
    Comment(String),
    ProcessingInstruction { target: String, data: String },
}

/// Children of a document or document fragment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub children: Vec<Node>,
}

/// A `<!DOCTYPE>` node. Empty strings count as unavailable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentType {
    pub name: Option<String>,
    pub public_id: Option<String>,
    pub system_id: Option<String>,
}

/// An attribute as reported by the host.
///
/// `value` is `None` when the host value has no string form. Hosts that box
/// strings in their own wrapper type unwrap them into `Some` when adapting.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
    /// Explicitly set in the markup or by script, as opposed to a schema default
    pub specified: bool,
}

impl Attribute {
    /// A specified attribute with a string value
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value.to_string()),
            specified: true,
        }
    }

    /// An attribute filled in from a default rather than set explicitly
    pub fn unspecified(name: &str, value: &str) -> Self {
        Self {
            specified: false,
            ..Self::new(name, value)
        }
    }

    /// A specified attribute whose value is not representable as a string
    pub fn opaque(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: None,
            specified: true,
        }
    }
}

/// An element node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Local tag name as the host reports it; may be empty
    pub local_name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    /// Computed `style.cssText`
    pub css_text: Option<String>,
    /// Text of the stylesheet owned by a `<style>` element
    pub style_sheet: Option<String>,
    /// Live value of a form control
    pub value: Option<String>,
    /// Live type of an `<input>`
    pub input_type: Option<String>,
    /// Raw inner markup
    pub inner_html: Option<String>,
    /// Embedded document accessors of `<frame>` and `<iframe>`
    pub frame: FrameAccessors,
}

/// Document of a frame as seen through one accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddedDocument {
    /// The accessor exists but holds no document
    Absent,
    Loaded(Box<Node>),
    /// The host refused access, typically a cross-origin frame
    Denied(String),
}

/// The three ways a host may expose a frame's document, in lookup order.
/// `None` means the host does not provide that accessor at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameAccessors {
    /// `frame.contentDocument`
    pub content_document: Option<EmbeddedDocument>,
    /// `frame.contentWindow.document`
    pub content_window: Option<EmbeddedDocument>,
    /// Legacy `frame.document`
    pub document: Option<EmbeddedDocument>,
}

impl FrameAccessors {
    /// Frame whose content document is loaded
    pub fn loaded(document: Node) -> Self {
        Self {
            content_document: Some(EmbeddedDocument::Loaded(Box::new(document))),
            ..Self::default()
        }
    }

    /// Frame whose content document is withheld by the host
    pub fn denied(reason: &str) -> Self {
        Self {
            content_document: Some(EmbeddedDocument::Denied(reason.to_string())),
            ..Self::default()
        }
    }

    /// Resolve the embedded document. The first accessor the host provides
    /// decides the outcome, even when it holds no document.
    pub fn resolve(&self) -> Result<Option<&Node>> {
        let accessor = self
            .content_document
            .as_ref()
            .or(self.content_window.as_ref())
            .or(self.document.as_ref());

        match accessor {
            None | Some(EmbeddedDocument::Absent) => Ok(None),
            Some(EmbeddedDocument::Loaded(document)) => Ok(Some(document)),
            Some(EmbeddedDocument::Denied(reason)) => {
                Err(JsonMlError::EmbedDenied(reason.clone()))
            }
        }
    }
}

impl Element {
    /// Create a new element with no attributes or children
    pub fn new(tag_name: &str) -> Self {
        Self {
            local_name: tag_name.to_string(),
            ..Self::default()
        }
    }

    /// Builder: add a specified attribute
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder: add an attribute record as-is
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Builder: append a child node
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: set the computed style text
    pub fn with_css_text(mut self, css_text: &str) -> Self {
        self.css_text = Some(css_text.to_string());
        self
    }

    /// Builder: set the inline stylesheet text of a `<style>`
    pub fn with_style_sheet(mut self, style_sheet: &str) -> Self {
        self.style_sheet = Some(style_sheet.to_string());
        self
    }

    /// Builder: set the live form value
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    /// Builder: set the live input type
    pub fn with_input_type(mut self, input_type: &str) -> Self {
        self.input_type = Some(input_type.to_string());
        self
    }

    /// Builder: set the raw inner markup
    pub fn with_inner_html(mut self, inner_html: &str) -> Self {
        self.inner_html = Some(inner_html.to_string());
        self
    }

    /// Builder: set the frame document accessors
    pub fn with_frame(mut self, frame: FrameAccessors) -> Self {
        self.frame = frame;
        self
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> String {
        self.local_name.to_ascii_lowercase()
    }

    /// Get a specified attribute's string value by name (ASCII case-insensitive)
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.specified_attributes()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .and_then(|attr| attr.value.as_deref())
    }

    /// Set or replace a specified attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self
            .attributes
            .iter_mut()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
        {
            Some(attr) => *attr = Attribute::new(&attr.name, value),
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    /// Attributes explicitly set on the element
    pub fn specified_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|attr| attr.specified)
    }

    /// Effective `<input>` type: live type, then the `type` attribute, then `text`
    pub fn input_type(&self) -> &str {
        self.input_type
            .as_deref()
            .or_else(|| self.attr("type"))
            .unwrap_or("text")
    }

    /// Whether this is an `<input type="password">`
    pub fn is_password_input(&self) -> bool {
        self.input_type().eq_ignore_ascii_case("password")
    }

    /// Current form value: live value, then the `value` attribute
    pub fn current_value(&self) -> Option<&str> {
        self.value.as_deref().or_else(|| self.attr("value"))
    }
}

impl DocumentType {
    pub fn new(name: &str, public_id: &str, system_id: &str) -> Self {
        fn non_empty(s: &str) -> Option<String> {
            (!s.is_empty()).then(|| s.to_string())
        }

        Self {
            name: non_empty(name),
            public_id: non_empty(public_id),
            system_id: non_empty(system_id),
        }
    }
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Node::Element(Element::new(tag_name))
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut element = Element::new(tag_name);
        element.attributes = attrs
            .into_iter()
            .map(|(name, value)| Attribute::new(name, value))
            .collect();
        Node::Element(element)
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// Create a CDATA section node
    pub fn cdata(content: &str) -> Self {
        Node::CData(content.to_string())
    }

    /// Create a comment node
    pub fn comment(content: &str) -> Self {
        Node::Comment(content.to_string())
    }

    /// Create a doctype node; pass empty strings for missing identifiers
    pub fn doctype(name: &str, public_id: &str, system_id: &str) -> Self {
        Node::DocumentType(DocumentType::new(name, public_id, system_id))
    }

    pub fn processing_instruction(target: &str, data: &str) -> Self {
        Node::ProcessingInstruction {
            target: target.to_string(),
            data: data.to_string(),
        }
    }

    /// Create an empty document node
    pub fn document() -> Self {
        Node::Document(Container::default())
    }

    /// Create a document fragment node
    pub fn document_fragment() -> Self {
        Node::DocumentFragment(Container::default())
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Element(_) => NodeType::Element,
            Node::Document(_) => NodeType::Document,
            Node::DocumentFragment(_) => NodeType::DocumentFragment,
            Node::Text(_) => NodeType::Text,
            Node::CData(_) => NodeType::CData,
            Node::DocumentType(_) => NodeType::DocumentType,
            Node::Comment(_) => NodeType::Comment,
            Node::ProcessingInstruction { .. } => NodeType::ProcessingInstruction,
        }
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Get the tag name (lowercase); empty for non-elements
    pub fn tag_name(&self) -> String {
        self.as_element().map(Element::tag_name).unwrap_or_default()
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.as_element()?.attr(name)
    }

    /// Child nodes of elements, documents and fragments
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Document(container) | Node::DocumentFragment(container) => &container.children,
            _ => &[],
        }
    }

    /// Add a child node. Ignored for node kinds that cannot have children.
    pub fn add_child(&mut self, child: Node) {
        match self {
            Node::Element(element) => element.children.push(child),
            Node::Document(container) | Node::DocumentFragment(container) => {
                container.children.push(child)
            }
            _ => {}
        }
    }

    /// Set an attribute. Ignored for non-elements.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(element) = self.as_element_mut() {
            element.set_attr(name, value);
        }
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) | Node::CData(text) => text.clone(),
            Node::Element(_) | Node::Document(_) | Node::DocumentFragment(_) => self
                .children()
                .iter()
                .map(Node::text_content)
                .collect(),
            _ => String::new(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}
