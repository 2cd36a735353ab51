//! Error types for plateshop-store

use std::path::PathBuf;

/// Result type alias for plateshop-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or rewriting the product file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The data file could not be read, written or renamed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File the operation was acting on
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The data file is not well-formed CSV.
    #[error("Malformed product data in {}: {source}", path.display())]
    Parse {
        /// File being parsed or serialized
        path: PathBuf,
        /// Underlying CSV failure
        #[source]
        source: csv::Error,
    },

    /// Row index outside `[0, len)`.
    #[error("Row index {index} out of bounds (store has {len} rows)")]
    NotFound {
        /// Requested index
        index: i64,
        /// Number of rows at the time of the request
        len: usize,
    },
}

impl Error {
    /// Creates an I/O error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse error bound to a path.
    pub fn parse(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Error::Parse {
            path: path.into(),
            source,
        }
    }

    /// Returns whether this is an out-of-range row index.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
