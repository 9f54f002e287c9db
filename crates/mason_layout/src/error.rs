//! Layout error types

use crate::engine::EngineState;
use mason_animation::ParseEasingError;
use thiserror::Error;

/// Layout-related errors
#[derive(Error, Debug)]
pub enum LayoutError {
    /// No container was supplied
    #[error("masonry container not found")]
    MissingContainer,

    /// The container exists but is not part of a document
    #[error("masonry container is detached")]
    DetachedContainer,

    /// A configuration value is out of range
    #[error("invalid layout option `{option}`: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    /// The configured easing name is not recognised
    #[error(transparent)]
    UnknownEasing(#[from] ParseEasingError),

    /// The engine cannot accept work in its current state
    #[error("masonry engine is not ready (state: {0:?})")]
    NotReady(EngineState),

    /// Failed to parse a TOML config
    #[error("failed to parse layout config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Failed to parse JSON config or items
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read a config or item file
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl LayoutError {
    /// Whether this error leaves the engine permanently failed
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            LayoutError::MissingContainer
                | LayoutError::DetachedContainer
                | LayoutError::InvalidOption { .. }
                | LayoutError::UnknownEasing(_)
        )
    }
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
