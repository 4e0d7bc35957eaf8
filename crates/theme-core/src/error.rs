//! Error taxonomy for the theme engine
//!
//! Configuration errors (duplicates, empty catalogue) and state errors
//! (wrong call ordering) are fatal host mistakes. Not-found lookups are not
//! errors at all; they surface as `Option`/`bool` returns with a diagnostic
//! log entry.

use thiserror::Error;

use theme_store::StoreError;

use crate::theme::StyleHandle;

/// Theme engine error types
#[derive(Debug, Error)]
pub enum ThemeError {
    /// A theme with the same tag was already added
    #[error("theme with tag '{0}' already in the list")]
    DuplicateTag(String),

    /// A theme with the same style handle was already added
    #[error("theme with style handle '{0}' already in the list")]
    DuplicateStyle(StyleHandle),

    /// An empty catalogue was handed to `install`
    #[error("themes list is empty")]
    EmptyCatalogue,

    /// A query or mutation ran before the registry was installed
    #[error("theme registry is not initialized")]
    NotInitialized,

    /// `install` was called on an already-installed registry
    #[error("theme registry is already initialized")]
    AlreadyInitialized,

    /// Persistence adapter failure
    #[error("persistence error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for theme engine operations
pub type Result<T> = std::result::Result<T, ThemeError>;
