//! # jsonml-dom
//!
//! Convert DOM trees to [JsonML](http://www.jsonml.org/).
//!
//! Every element becomes `[tag, {attributes}?, ...children]`, text becomes a
//! plain string and doctypes become `["!", "DOCTYPE ..."]`.
//!
//! ## Design
//!
//! The conversion works on a small, parser-agnostic [`Node`] structure. Hosts
//! that already hold a DOM (CDP, a browser bridge) adapt into it directly; the
//! default `html` feature adds an html5ever-backed parser for markup strings.
//! Besides static markup a node may carry live browser state (form values,
//! computed style, frame documents) which the conversion captures the way a
//! browser DOM would report it.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use jsonml_dom::{parse_tree, JsonMl, Node};
//!
//! let mut h1 = Node::element_with_attrs("h1", vec![("class", "title")]);
//! h1.add_child(Node::text("Hello World"));
//!
//! let jml = parse_tree(&h1, None).unwrap().unwrap();
//! assert_eq!(
//!     jml,
//!     JsonMl::element("h1")
//!         .with_prop("class", "title")
//!         .with_child(JsonMl::text("Hello World"))
//! );
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use jsonml_dom::JsonMlService;
//!
//! let service = JsonMlService::new();
//! let jml = service.parse_markup("<p>Hello <b>World</b></p>").unwrap();
//! assert_eq!(service.to_json(&jml).unwrap(), r#"["p","Hello ",["b","World"]]"#);
//! ```

#[macro_use]
mod tracing_macros;

mod convert;
pub mod filter;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod service;

pub use filter::{from_fn, Filter, StripEmptyProps};
#[cfg(feature = "html")]
pub use html::{parse_document, parse_html};
pub use jsonml_core::{JsonMl, Props, SerializeOptions};
pub use node::{
    Attribute, Container, DocumentType, Element, EmbeddedDocument, FrameAccessors, Node, NodeType,
};
pub use service::{JsonMlOptions, JsonMlService};

use convert::Converter;

/// Error type for JsonML conversion
#[derive(Debug, thiserror::Error)]
pub enum JsonMlError {
    /// A frame's document could not be accessed. The conversion recovers from
    /// this on its own; it only surfaces through [`FrameAccessors::resolve`].
    #[error("Embedded document unavailable: {0}")]
    EmbedDenied(String),

    #[error("Tree deeper than the limit of {limit} levels")]
    DepthExceeded { limit: usize },

    #[error("Conversion produced no value")]
    EmptyResult,

    #[error(transparent)]
    Core(#[from] jsonml_core::CoreError),
}

pub type Result<T> = std::result::Result<T, JsonMlError>;

/// Convert a node tree to JsonML.
///
/// Returns `Ok(None)` for nodes without a JsonML form, such as ordinary
/// comments. The filter, if any, runs on every array result.
pub fn parse_tree(node: &Node, filter: Option<&dyn Filter>) -> Result<Option<JsonMl>> {
    Converter::new(filter, None).convert(node, 0)
}

/// Parse an HTML fragment and convert it to JsonML.
///
/// A fragment consisting of one node yields that node's value directly;
/// otherwise the result is a `["", ...]` fragment array.
#[cfg(feature = "html")]
pub fn parse_markup(html: &str, filter: Option<&dyn Filter>) -> Result<JsonMl> {
    let container = parse_html(html);
    service::unwrap_container(parse_tree(&container, filter)?)
}
