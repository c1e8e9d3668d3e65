//! # storage-adapters
//!
//! Implementations of the persistence ports: flat-document JSON snapshots,
//! a local content-addressed blob store, and an in-memory snapshot store
//! for tests and tooling.

pub mod blobs;
pub mod json;
pub mod memory;

pub use blobs::LocalBlobStore;
pub use json::JsonSnapshotStore;
pub use memory::MemorySnapshotStore;
