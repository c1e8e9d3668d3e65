//! # JsonSnapshotStore
//!
//! Flat-document JSON persistence: each collection lives in one file, read
//! and written as a single unit. Replacement is all-or-nothing (temp file
//! plus rename), so a crash mid-write never leaves a torn document.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;

use domains::error::{DomainError, Result};
use domains::models::{CredentialsDoc, ListingsByOwner, ThreadsDoc};
use domains::traits::SnapshotStore;

const LISTINGS_FILE: &str = "data.json";
const CREDENTIALS_FILE: &str = "users.json";
const THREADS_FILE: &str = "comments.json";

/// Snapshot store over three JSON documents in one data directory.
pub struct JsonSnapshotStore {
    data_dir: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Missing file means the collection does not exist yet: empty map.
    /// A file that exists but fails to parse is `MalformedStore`.
    async fn read_doc<T>(&self, file: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path(file);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_slice(&bytes)
            .map_err(|err| DomainError::MalformedStore(format!("{}: {err}", path.display())))
    }

    /// Serializes into a sibling temp file, then renames over the target,
    /// so a reader only ever observes a complete document.
    async fn write_doc<T>(&self, file: &str, doc: &T) -> Result<()>
    where
        T: Serialize,
    {
        fs::create_dir_all(&self.data_dir).await?;
        let path = self.path(file);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(doc)
            .map_err(|err| DomainError::Internal(format!("encode {file}: {err}")))?;
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &path).await?;
        tracing::debug!(file, bytes = bytes.len(), "snapshot replaced");
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotStore {
    async fn load_listings(&self) -> Result<ListingsByOwner> {
        self.read_doc(LISTINGS_FILE).await
    }

    async fn save_listings(&self, doc: ListingsByOwner) -> Result<()> {
        self.write_doc(LISTINGS_FILE, &doc).await
    }

    async fn load_credentials(&self) -> Result<CredentialsDoc> {
        self.read_doc(CREDENTIALS_FILE).await
    }

    async fn save_credentials(&self, doc: CredentialsDoc) -> Result<()> {
        self.write_doc(CREDENTIALS_FILE, &doc).await
    }

    async fn load_threads(&self) -> Result<ThreadsDoc> {
        self.read_doc(THREADS_FILE).await
    }

    async fn save_threads(&self, doc: ThreadsDoc) -> Result<()> {
        self.write_doc(THREADS_FILE, &doc).await
    }
}
