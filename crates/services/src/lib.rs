//! # services
//!
//! Business logic over the domain ports: listing catalog, search pipeline,
//! comment threads and accounts. Every mutating operation is a full
//! read-snapshot → mutate-in-memory → write-snapshot cycle against the
//! `SnapshotStore` port; see that trait for the racing-writer caveat.

pub mod accounts;
pub mod catalog;
pub mod search;
pub mod threads;

pub use accounts::AccountService;
pub use catalog::CatalogService;
pub use search::{search_catalog, OwnerListings, SortMode};
pub use threads::ThreadService;
