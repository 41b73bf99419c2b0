//! Error types for engine construction and configuration.
//!
//! Domain conditions such as a full lot, an invalid slot id on release, or an
//! undo against an empty queue are deliberately NOT errors: callers branch on
//! [`Outcome`](crate::core::Outcome) variants, and the lot stays usable after
//! every one of them.

use thiserror::Error;

/// Errors produced while building or configuring a lot.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Configuration could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
