//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors ([`DocumentError`], [`CatalogError`], [`ConfigError`])
//!   for detailed handling. Catalog and config errors never reach [`Error`]:
//!   the catalog boundary turns them into empty results, and the CLI reports
//!   config problems through `anyhow`.
//!
//! Only [`Error::InvalidVaultPath`] is allowed to abort an enrichment run; every
//! other error raised while processing a single note is caught at the note
//! boundary and counted.
//!
//! [`DocumentError`]: crate::document::DocumentError
//! [`CatalogError`]: crate::catalog::CatalogError
//! [`ConfigError`]: crate::config::ConfigError

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The vault root does not exist or is not a directory
    #[error("Invalid vault path: {0}")]
    InvalidVaultPath(PathBuf),

    /// Reading, parsing or writing a note failed
    #[error("Document error: {0}")]
    Document(#[from] crate::document::DocumentError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an invalid vault path error.
    pub fn invalid_vault(path: impl Into<PathBuf>) -> Self {
        Self::InvalidVaultPath(path.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
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

impl<T> ResultExt<T> for std::result::Result<T, crate::document::DocumentError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Document(e).context(ctx))
    }
}
