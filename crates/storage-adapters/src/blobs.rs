//! # LocalBlobStore
//!
//! Local filesystem implementation of the `BlobStore` port.
//! Content-addressable: blobs are named by their SHA-256 hash and sharded
//! into `ab/cd/` directories, which also deduplicates repeat uploads.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use mime::Mime;
use sha2::{Digest, Sha256};
use tokio::fs;

use domains::error::Result;
use domains::traits::BlobStore;

pub struct LocalBlobStore {
    /// Root directory for all uploads (e.g. "./data/uploads").
    root_path: PathBuf,
    /// Public URL prefix (e.g. "/static/uploads").
    url_prefix: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root_path: root.into(),
            url_prefix: url_prefix.into(),
        }
    }

    /// Sharded path "ab/cd/abcd…" for a reference this store produced.
    /// Foreign references that cannot be sharded yield `None`.
    fn sharded_path(&self, blob_ref: &str) -> Option<PathBuf> {
        if blob_ref.len() < 4 || !blob_ref.is_ascii() {
            return None;
        }
        let mut path = self.root_path.clone();
        path.push(&blob_ref[0..2]);
        path.push(&blob_ref[2..4]);
        path.push(blob_ref);
        Some(path)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    /// Stores the bytes under their own hash. The declared content type
    /// is not interpreted here; blobs are opaque to this store.
    async fn put(&self, data: Bytes, _content_type: &Mime) -> Result<String> {
        let hash = hex::encode(Sha256::digest(&data));
        let target = self
            .sharded_path(&hash)
            .expect("sha256 hex refs are always shardable");

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        if fs::try_exists(&target).await.unwrap_or(false) {
            tracing::debug!(blob = %hash, "duplicate upload, reusing stored blob");
        } else {
            fs::write(&target, &data).await?;
            tracing::debug!(blob = %hash, bytes = data.len(), "blob stored");
        }
        Ok(hash)
    }

    async fn delete(&self, blob_ref: &str) -> Result<()> {
        let Some(target) = self.sharded_path(blob_ref) else {
            tracing::warn!(blob = %blob_ref, "unshardable blob reference ignored");
            return Ok(());
        };
        match fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn url(&self, blob_ref: &str) -> String {
        if blob_ref.len() >= 4 && blob_ref.is_ascii() {
            format!(
                "{}/{}/{}/{}",
                self.url_prefix,
                &blob_ref[0..2],
                &blob_ref[2..4],
                blob_ref
            )
        } else {
            format!("{}/{}", self.url_prefix, blob_ref)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> LocalBlobStore {
        LocalBlobStore::new(dir.path(), "/static/uploads")
    }

    #[tokio::test]
    async fn put_is_content_addressed_and_deduplicating() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = store(&dir);

        let a = blobs
            .put(Bytes::from_static(b"front cover"), &mime::IMAGE_JPEG)
            .await
            .unwrap();
        let b = blobs
            .put(Bytes::from_static(b"front cover"), &mime::IMAGE_PNG)
            .await
            .unwrap();
        assert_eq!(a, b);

        let stored = std::fs::read(dir.path().join(&a[0..2]).join(&a[2..4]).join(&a)).unwrap();
        assert_eq!(stored, b"front cover");
    }

    #[tokio::test]
    async fn delete_removes_blob_and_tolerates_unknown_refs() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = store(&dir);

        let blob_ref = blobs
            .put(Bytes::from_static(b"spine"), &mime::IMAGE_JPEG)
            .await
            .unwrap();
        blobs.delete(&blob_ref).await.unwrap();
        assert!(!dir
            .path()
            .join(&blob_ref[0..2])
            .join(&blob_ref[2..4])
            .join(&blob_ref)
            .exists());

        // Deleting again, or deleting something never stored, is a no-op.
        blobs.delete(&blob_ref).await.unwrap();
        blobs.delete("??").await.unwrap();
    }

    #[tokio::test]
    async fn url_shards_like_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = store(&dir);
        assert_eq!(
            blobs.url("abcdef012345"),
            "/static/uploads/ab/cd/abcdef012345"
        );
    }
}
