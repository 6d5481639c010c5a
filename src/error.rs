//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the
//! CLI uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level error returned by the pipeline
//! - [`ProviderError`]: what a collaborator call can fail with
//! - Per-album provider failures never surface here; they become
//!   [`ProviderMiss`](crate::providers::ProviderMiss) records instead
//!
//! # Example
//!
//! ```ignore
//! use album_data::error::{Error, Result};
//!
//! fn check(albums: &[String]) -> Result<()> {
//!     if albums.is_empty() {
//!         return Err(Error::invalid_input("no albums requested"));
//!     }
//!     Ok(())
//! }
//! ```

use crate::providers::ProviderError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level pipeline error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Caller input rejected before any provider was contacted
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A join precondition was violated (duplicate key on the right side)
    #[error("Integrity violation: {0}")]
    Integrity(String),

    /// Unrecoverable provider failure (album listing or audio features)
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an integrity violation.
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity(message.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with any context layers peeled off.
    pub fn root(&self) -> &Error {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}
