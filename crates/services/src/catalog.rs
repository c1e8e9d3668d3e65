//! # CatalogService
//!
//! Listing CRUD and image-slot accounting. Listings are keyed by
//! `(owner, title)`; a title is unique within one owner's catalog only.

use std::sync::Arc;

use chrono::Utc;

use domains::error::{DomainError, Result};
use domains::models::{
    is_valid_key_component, thread_key, Listing, ListingDraft, ListingsByOwner, MAX_IMAGES,
    THREAD_KEY_SEPARATOR,
};
use domains::traits::SnapshotStore;

pub struct CatalogService {
    store: Arc<dyn SnapshotStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    /// Create-if-absent: an existing `(owner, title)` record is returned
    /// unchanged and the supplied fields are ignored. Never an upsert.
    pub async fn create_or_get(
        &self,
        owner: &str,
        title: &str,
        draft: ListingDraft,
    ) -> Result<Listing> {
        let title = title.trim();
        if !is_valid_key_component(title) {
            return Err(DomainError::Validation(format!(
                "listing title must be non-empty and must not contain {THREAD_KEY_SEPARATOR:?}"
            )));
        }

        let mut doc = self.store.load_listings().await?;
        let shelf = doc
            .entry(owner.to_string())
            .or_insert_with(Default::default);
        if let Some(existing) = shelf.get(title) {
            return Ok(existing.clone());
        }

        let listing = Listing::new(title, draft, Utc::now());
        shelf.insert(title.to_string(), listing.clone());
        self.store.save_listings(doc).await?;
        tracing::info!(owner, title, "listing created");
        Ok(listing)
    }

    /// Appends blob references in input order, up to the remaining
    /// capacity; the excess is silently dropped. A listing already at
    /// capacity is `CapacityExceeded`; a missing listing is `NotFound`.
    /// Returns how many references were attached.
    pub async fn attach_images(
        &self,
        owner: &str,
        title: &str,
        refs: Vec<String>,
    ) -> Result<usize> {
        let mut doc = self.store.load_listings().await?;
        let listing = doc
            .get_mut(owner)
            .and_then(|shelf| shelf.get_mut(title))
            .ok_or_else(|| DomainError::NotFound {
                kind: "listing",
                key: thread_key(owner, title),
            })?;

        let remaining = listing.remaining_image_slots();
        if remaining == 0 {
            return Err(DomainError::CapacityExceeded { limit: MAX_IMAGES });
        }

        let dropped = refs.len().saturating_sub(remaining);
        let attached: Vec<String> = refs.into_iter().take(remaining).collect();
        let count = attached.len();
        listing.images.extend(attached);

        if count > 0 {
            self.store.save_listings(doc).await?;
        }
        if dropped > 0 {
            tracing::warn!(owner, title, dropped, "image capacity reached, excess dropped");
        }
        Ok(count)
    }

    /// Removes the record and returns its blob references for the caller
    /// to physically delete. A missing listing is a silent no-op. The
    /// comment thread is cascade-deleted in a second write: listing
    /// first, thread second, so a crash in between leaves at worst an
    /// orphaned thread that nothing can reach.
    pub async fn delete_listing(&self, owner: &str, title: &str) -> Result<Vec<String>> {
        let mut doc = self.store.load_listings().await?;
        let Some(listing) = doc.get_mut(owner).and_then(|shelf| shelf.shift_remove(title))
        else {
            return Ok(Vec::new());
        };
        self.store.save_listings(doc).await?;

        let mut threads = self.store.load_threads().await?;
        if threads.shift_remove(&thread_key(owner, title)).is_some() {
            self.store.save_threads(threads).await?;
        }

        tracing::info!(owner, title, images = listing.images.len(), "listing deleted");
        Ok(listing.images)
    }

    /// Removes one blob reference from the listing if present; silent
    /// no-op otherwise. The blob itself is the caller's to delete.
    pub async fn delete_image(&self, owner: &str, title: &str, blob_ref: &str) -> Result<()> {
        let mut doc = self.store.load_listings().await?;
        let Some(listing) = doc.get_mut(owner).and_then(|shelf| shelf.get_mut(title)) else {
            return Ok(());
        };
        let Some(pos) = listing.images.iter().position(|r| r == blob_ref) else {
            return Ok(());
        };
        listing.images.remove(pos);
        self.store.save_listings(doc).await?;
        Ok(())
    }

    /// One listing, if present.
    pub async fn get(&self, owner: &str, title: &str) -> Result<Option<Listing>> {
        let doc = self.store.load_listings().await?;
        Ok(doc.get(owner).and_then(|shelf| shelf.get(title)).cloned())
    }

    /// Everything one owner has listed, in insertion order.
    pub async fn listings_of(&self, owner: &str) -> Result<Vec<Listing>> {
        let doc = self.store.load_listings().await?;
        Ok(doc
            .get(owner)
            .map(|shelf| shelf.values().cloned().collect())
            .unwrap_or_default())
    }

    /// The full public snapshot, for the search pipeline.
    pub async fn snapshot(&self) -> Result<ListingsByOwner> {
        self.store.load_listings().await
    }
}
