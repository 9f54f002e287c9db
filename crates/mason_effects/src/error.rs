//! Effect error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EffectError {
    #[error("invalid effect option `{option}`: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, EffectError>;
