//! Error types for stratigraphy diagram operations.
//!
//! [`DiagramError`] names the reasons a render aborts. [`render`](crate::render)
//! never returns it: the reason is logged and no diagram is produced.
//! [`StratigraphError`] is the error of hosts that load input and export SVG.

use std::io;

use thiserror::Error;

/// Why a diagram could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    #[error("drawing surface `{surface_id}` not found")]
    SurfaceNotFound { surface_id: String },

    #[error("relationships are missing")]
    MissingRelationships,
}

/// The main error type for stratigraphy hosts.
///
/// # Diagnostic Variants
///
/// The `Input` variant carries the JSON decoding error together with the
/// source it was decoding, so reporters can point at the offending location.
#[derive(Debug, Error)]
pub enum StratigraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Input { err: serde_json::Error, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Diagram(#[from] DiagramError),

    #[error("Export error: {0}")]
    Export(String),
}

impl StratigraphError {
    /// Create a new `Input` error with the associated source text.
    pub fn new_input_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Input {
            err,
            src: src.into(),
        }
    }
}
