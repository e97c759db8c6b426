//! Shared error type.
//!
//! Algorithm crates define their own error enums; `CoreError` covers the
//! few failures that originate here (config validation, value parsing).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `tp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
