//! Structured error types for dragtable.
//!
//! Errors only surface at construction time (a malformed grid, bad options)
//! or from the view layer. Pointer handling itself never fails.

/// All errors that can occur while building or driving a table.
#[derive(Debug, thiserror::Error)]
pub enum DragTableError {
    /// The grid has no header cells.
    #[error("Grid has no header cells")]
    EmptyGrid,

    /// A body row does not have one cell per header.
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A column slot outside the grid was requested.
    #[error("Column {index} out of range (grid has {count} columns)")]
    ColumnOutOfRange { index: usize, count: usize },

    /// The view layer (DOM) refused an operation.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Invalid widget options.
    #[error("Invalid options: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DragTableError>;

impl From<String> for DragTableError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for DragTableError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<DragTableError> for wasm_bindgen::JsValue {
    fn from(e: DragTableError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DragTableError {
    fn from(v: wasm_bindgen::JsValue) -> Self {
        Self::Dom(v.as_string().unwrap_or_else(|| format!("{v:?}")))
    }
}
