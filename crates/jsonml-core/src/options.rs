//! Configuration options for JsonML serialization

/// Options for rendering JsonML as JSON text
#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
    /// Indent nested arrays and objects instead of emitting compact JSON
    pub pretty: bool,
}

impl SerializeOptions {
    /// Compact single-line output
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Indented multi-line output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}
