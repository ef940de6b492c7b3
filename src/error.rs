//! Structured error types for gridscroll.
//!
//! Pane construction is the only fallible path in the crate: a pane cannot
//! function without valid geometry sources, so configuration problems abort
//! construction instead of leaving a half-wired pane behind.

/// All errors that can occur while wiring a grid's scroll panes.
#[derive(Debug, thiserror::Error)]
pub enum GridScrollError {
    /// Pane was configured without a row container name.
    #[error("No row container name specified for pane '{0}'")]
    MissingRowContainer(String),

    /// Pane was configured without a column container name.
    #[error("No column container name specified for pane '{0}'")]
    MissingColumnContainer(String),

    /// A referenced render container was never registered with the grid.
    #[error("Render container '{0}' is not registered")]
    UnregisteredContainer(String),

    /// Diagnostics serialization failure.
    #[error("Serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridScrollError>;

#[cfg(target_arch = "wasm32")]
impl From<GridScrollError> for wasm_bindgen::JsValue {
    fn from(e: GridScrollError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
