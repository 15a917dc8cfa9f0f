//! JsonML value model
//!
//! A JsonML document is a tree of plain strings and arrays. Element arrays
//! carry a tag name, an optional attribute map, and their children; declaration
//! arrays carry a single `!`-prefixed declaration string.

use indexmap::IndexMap;

/// Attribute map of an element array, in attribute order.
pub type Props = IndexMap<String, String>;

/// Tag used in the first slot of a declaration array.
pub const DECLARATION_TAG: &str = "!";

/// A JsonML value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonMl {
    /// Text content, serialized as a bare string
    Text(String),

    /// `[tag, props?, ...children]`
    Element {
        tag: String,
        props: Option<Props>,
        children: Vec<JsonMl>,
    },

    /// `["!", declaration]`, e.g. a doctype
    Declaration(String),
}

impl JsonMl {
    /// Create a text value
    pub fn text(content: impl Into<String>) -> Self {
        JsonMl::Text(content.into())
    }

    /// Create an element array with no properties and no children
    pub fn element(tag: impl Into<String>) -> Self {
        JsonMl::Element {
            tag: tag.into(),
            props: None,
            children: Vec::new(),
        }
    }

    /// Create a declaration array
    pub fn declaration(content: impl Into<String>) -> Self {
        JsonMl::Declaration(content.into())
    }

    /// Builder: set a property, creating the map if needed
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_prop(name, value);
        self
    }

    /// Builder: append a child
    pub fn with_child(mut self, child: JsonMl) -> Self {
        self.push(child);
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self, JsonMl::Text(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self, JsonMl::Element { .. })
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self, JsonMl::Declaration(_))
    }

    /// The string of a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            JsonMl::Text(text) => Some(text),
            _ => None,
        }
    }

    /// First array slot: the tag for elements, `!` for declarations
    pub fn tag(&self) -> Option<&str> {
        match self {
            JsonMl::Element { tag, .. } => Some(tag),
            JsonMl::Declaration(_) => Some(DECLARATION_TAG),
            JsonMl::Text(_) => None,
        }
    }

    /// Rename an element array. No effect on text or declarations.
    pub fn set_tag(&mut self, name: impl Into<String>) {
        if let JsonMl::Element { tag, .. } = self {
            *tag = name.into();
        }
    }

    pub fn props(&self) -> Option<&Props> {
        match self {
            JsonMl::Element { props, .. } => props.as_ref(),
            _ => None,
        }
    }

    pub fn props_mut(&mut self) -> Option<&mut Props> {
        match self {
            JsonMl::Element { props, .. } => props.as_mut(),
            _ => None,
        }
    }

    /// Look up a single property of an element array
    pub fn prop(&self, name: &str) -> Option<&str> {
        self.props()?.get(name).map(String::as_str)
    }

    /// Set a property on an element array, creating the map if absent.
    /// No effect on text or declarations.
    pub fn set_prop(&mut self, name: impl Into<String>, value: impl Into<String>) {
        if let JsonMl::Element { props, .. } = self {
            props
                .get_or_insert_with(Props::new)
                .insert(name.into(), value.into());
        }
    }

    /// Children of an element array (empty for other values)
    pub fn children(&self) -> &[JsonMl] {
        match self {
            JsonMl::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Append a child to an element array. No effect on other values.
    pub fn push(&mut self, child: JsonMl) {
        if let JsonMl::Element { children, .. } = self {
            children.push(child);
        }
    }

    /// Number of slots the value occupies as a JSON array, `None` for text
    pub fn array_len(&self) -> Option<usize> {
        match self {
            JsonMl::Element {
                props, children, ..
            } => Some(1 + usize::from(props.is_some()) + children.len()),
            JsonMl::Declaration(_) => Some(2),
            JsonMl::Text(_) => None,
        }
    }

    /// Concatenated text of this value and its descendants.
    /// Declarations contribute nothing.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            JsonMl::Text(text) => out.push_str(text),
            JsonMl::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            JsonMl::Declaration(_) => {}
        }
    }
}

impl From<&str> for JsonMl {
    fn from(value: &str) -> Self {
        JsonMl::Text(value.to_string())
    }
}

impl From<String> for JsonMl {
    fn from(value: String) -> Self {
        JsonMl::Text(value)
    }
}
