//! Common error types used throughout reelshelf.
//!
//! Lookups against the in-memory library fail with [`Error::NotFound`]; the
//! HTTP layer turns that into an empty `404`.

/// Common error type for reelshelf.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entry or resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error means the thing asked for does not exist.
    ///
    /// I/O errors of kind `NotFound` count too: an indexed file that was
    /// removed after the scan is as missing as an unknown base name.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
