//! Error types for editor configuration.

use thiserror::Error;

/// Errors loading an [`EditorConfig`](crate::EditorConfig).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration document is not valid JSON for the config shape.
    #[error("failed to parse editor config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the editor cannot work with.
    #[error("invalid editor config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
