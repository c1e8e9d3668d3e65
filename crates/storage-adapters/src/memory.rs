//! # MemorySnapshotStore
//!
//! In-memory implementation of the `SnapshotStore` port. Documents are
//! held as `serde_json::Value`, so every load and save still crosses the
//! same serde boundary as the JSON file store. Useful for tests and
//! throwaway tooling.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use domains::error::{DomainError, Result};
use domains::models::{CredentialsDoc, ListingsByOwner, ThreadsDoc};
use domains::traits::SnapshotStore;

#[derive(Default)]
pub struct MemorySnapshotStore {
    docs: DashMap<&'static str, serde_json::Value>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_doc<T>(&self, key: &'static str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.docs.get(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|err| DomainError::MalformedStore(format!("{key}: {err}"))),
            None => Ok(T::default()),
        }
    }

    fn write_doc<T>(&self, key: &'static str, doc: &T) -> Result<()>
    where
        T: Serialize,
    {
        let value = serde_json::to_value(doc)
            .map_err(|err| DomainError::Internal(format!("encode {key}: {err}")))?;
        self.docs.insert(key, value);
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load_listings(&self) -> Result<ListingsByOwner> {
        self.read_doc("listings")
    }

    async fn save_listings(&self, doc: ListingsByOwner) -> Result<()> {
        self.write_doc("listings", &doc)
    }

    async fn load_credentials(&self) -> Result<CredentialsDoc> {
        self.read_doc("credentials")
    }

    async fn save_credentials(&self, doc: CredentialsDoc) -> Result<()> {
        self.write_doc("credentials", &doc)
    }

    async fn load_threads(&self) -> Result<ThreadsDoc> {
        self.read_doc("threads")
    }

    async fn save_threads(&self, doc: ThreadsDoc) -> Result<()> {
        self.write_doc("threads", &doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_empty_and_round_trips() {
        let store = MemorySnapshotStore::new();
        assert!(store.load_credentials().await.unwrap().is_empty());

        let doc = CredentialsDoc::from_iter([("alice".to_string(), "hash".to_string())]);
        store.save_credentials(doc.clone()).await.unwrap();
        assert_eq!(store.load_credentials().await.unwrap(), doc);
    }

    #[tokio::test]
    async fn collections_are_independent() {
        let store = MemorySnapshotStore::new();
        store
            .save_credentials(CredentialsDoc::from_iter([(
                "alice".to_string(),
                "hash".to_string(),
            )]))
            .await
            .unwrap();
        assert!(store.load_listings().await.unwrap().is_empty());
        assert!(store.load_threads().await.unwrap().is_empty());
    }
}
