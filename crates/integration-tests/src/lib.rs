//! Shared fixtures for the integration test targets: real services over
//! the JSON snapshot store in a throwaway directory.

use std::sync::Arc;

use tempfile::TempDir;

use domains::error::Result;
use domains::models::ListingDraft;
use domains::traits::{PasswordHasher, SnapshotStore};
use services::{AccountService, CatalogService, ThreadService};
use storage_adapters::JsonSnapshotStore;

/// Everything a service-level test needs. Dropping the harness removes
/// the data directory.
pub struct Harness {
    pub store: Arc<dyn SnapshotStore>,
    pub catalog: CatalogService,
    pub threads: ThreadService,
    pub accounts: AccountService,
    data_dir: TempDir,
}

impl Harness {
    pub fn data_path(&self) -> &std::path::Path {
        self.data_dir.path()
    }
}

/// Deterministic stand-in hasher. Integration tests assert on account
/// flow; the argon2 adapter has its own unit tests.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        stored == format!("plain:{password}")
    }
}

pub fn harness() -> Harness {
    let data_dir = TempDir::new().expect("create temp data dir");
    let store: Arc<dyn SnapshotStore> = Arc::new(JsonSnapshotStore::new(data_dir.path()));
    Harness {
        catalog: CatalogService::new(store.clone()),
        threads: ThreadService::new(store.clone()),
        accounts: AccountService::new(store.clone(), Arc::new(PlainHasher)),
        store,
        data_dir,
    }
}

/// A draft with recognizable author/price and quiet remaining fields.
pub fn draft(author: &str, price: &str) -> ListingDraft {
    ListingDraft {
        author: author.into(),
        price: price.into(),
        condition: "good".into(),
        note: String::new(),
        course: String::new(),
    }
}
