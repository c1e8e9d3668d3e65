//! # Core Traits (Ports)
//!
//! Adapter crates implement these to plug persistence, blob storage and
//! password hashing into the services.

use async_trait::async_trait;
use bytes::Bytes;
use mime::Mime;

use crate::error::Result;
use crate::models::{CredentialsDoc, ListingsByOwner, ThreadsDoc};

/// Persistence contract for the three snapshot collections.
///
/// `load_*` returns the entire current document, or an empty map if none
/// exists yet; `save_*` replaces the document wholesale. There are no
/// partial updates: callers read-modify-write the whole snapshot, and two
/// writers racing on one collection silently lose the earlier write.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn load_listings(&self) -> Result<ListingsByOwner>;
    async fn save_listings(&self, doc: ListingsByOwner) -> Result<()>;

    async fn load_credentials(&self) -> Result<CredentialsDoc>;
    async fn save_credentials(&self, doc: CredentialsDoc) -> Result<()>;

    async fn load_threads(&self) -> Result<ThreadsDoc>;
    async fn save_threads(&self, doc: ThreadsDoc) -> Result<()>;
}

/// Opaque image-blob storage contract.
///
/// The core never interprets a reference; it only counts and orders them
/// (at most [`crate::models::MAX_IMAGES`] per listing).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores raw bytes and returns an opaque reference.
    async fn put(&self, data: Bytes, content_type: &Mime) -> Result<String>;

    /// Physically deletes a blob. Unknown references are a no-op.
    async fn delete(&self, blob_ref: &str) -> Result<()>;

    /// Public URL or path for a stored blob.
    fn url(&self, blob_ref: &str) -> String;
}

/// Password hashing contract. The domain stores only opaque hash strings,
/// never cleartext.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hashes a cleartext password into a self-contained opaque string.
    fn hash(&self, password: &str) -> Result<String>;

    /// Whether `password` matches `stored`. An unparseable stored hash is
    /// a mismatch, not an error.
    fn verify(&self, password: &str, stored: &str) -> bool;
}
