//! jsonml-core - JsonML values and their JSON wire form
//!
//! This crate provides the value model produced by `jsonml-dom` when it
//! converts a document tree, and the codec that renders it as JSON.
//!
//! # Architecture
//!
//! ```text
//! HTML String ──parse──▶ Node tree ──transduce──▶ ┌────────┐
//!                                                 │ JsonMl │ ──▶ JSON text
//! Host DOM ──────adapt──▶ Node tree ──transduce──▶└────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use jsonml_core::{to_string, JsonMl, SerializeOptions};
//!
//! let jml = JsonMl::element("p")
//!     .with_prop("class", "greeting")
//!     .with_child(JsonMl::text("Hello "))
//!     .with_child(JsonMl::element("b").with_child(JsonMl::text("World")));
//!
//! let json = to_string(&jml, &SerializeOptions::default()).unwrap();
//! assert_eq!(json, r#"["p",{"class":"greeting"},"Hello ",["b","World"]]"#);
//! assert_eq!(JsonMl::from_json(&json).unwrap(), jml);
//! ```

mod ast;
mod options;
mod serialize;

pub use ast::{JsonMl, Props, DECLARATION_TAG};
pub use options::SerializeOptions;
pub use serialize::to_string;

/// Error type for JsonML encoding and decoding
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid JsonML: {0}")]
    InvalidShape(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
