//! # DomainError
//!
//! Centralized error handling for the marketplace core. Business-rule
//! failures are typed outcomes for the immediate caller; only storage
//! corruption or I/O is allowed to abort a request.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// A listing already holds the maximum number of images.
    #[error("listing already holds {limit} images")]
    CapacityExceeded { limit: usize },

    /// A comment body was blank after trimming.
    #[error("comment body is empty")]
    EmptyBody,

    /// Registration hit an existing username (exact match).
    #[error("username {0:?} is already taken")]
    DuplicateUser(String),

    /// Login failed. Deliberately silent about whether the user exists.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Listing, thread or image absent where one was required.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// Input rejected before touching any document.
    #[error("validation error: {0}")]
    Validation(String),

    /// A persisted document exists but does not parse.
    #[error("malformed store document: {0}")]
    MalformedStore(String),

    /// Filesystem failure inside a storage adapter.
    #[error("storage i/o error")]
    Io(#[from] std::io::Error),

    /// Infrastructure failure that fits nothing above.
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for marketplace logic.
pub type Result<T> = std::result::Result<T, DomainError>;
