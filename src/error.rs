//! Error types returned by the cache.
//!
//! A cache miss is never an error; it is reported as `None`. Errors are limited to
//! rejected arguments, the fail-fast snapshot iterator, and persistence.

use thiserror::Error;

/// Errors produced by [`ConcurrentLruCache`](crate::ConcurrentLruCache) and the
/// persistence codec.
#[derive(Error, Debug)]
pub enum CacheError {
    /// An argument was rejected before any state was touched, e.g. a zero capacity.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The cache changed structurally after a snapshot iterator was created.
    #[error("concurrent modification: snapshot taken at mutation {expected}, cache is now at {found}")]
    ConcurrentModification {
        /// Mutation counter captured with the snapshot.
        expected: u64,
        /// Mutation counter observed on access.
        found: u64,
    },

    /// Persisted data could not be decoded. The restore is aborted as a whole.
    #[error("failed to decode cache snapshot: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// An entry could not be encoded while persisting.
    #[error("failed to encode cache snapshot: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Opening or flushing a snapshot file failed.
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        CacheError::InvalidArgument(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, CacheError>;
