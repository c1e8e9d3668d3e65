//! # ThreadService
//!
//! Per-listing comment threads and the unread-notification derivation.
//! Read state is tracked per comment, not per thread, so a user who
//! partially reads a growing thread still sees exactly the new comments
//! as unread.

use std::sync::Arc;

use chrono::Utc;

use domains::error::{DomainError, Result};
use domains::models::{split_thread_key, thread_key, Comment, Notification};
use domains::traits::SnapshotStore;

pub struct ThreadService {
    store: Arc<dyn SnapshotStore>,
}

impl ThreadService {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    /// Appends a comment, creating the thread on first use. The listing
    /// itself is not consulted: commenting after a listing was deleted
    /// simply starts a fresh thread.
    pub async fn post_comment(
        &self,
        owner: &str,
        title: &str,
        author: &str,
        text: &str,
    ) -> Result<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyBody);
        }

        let mut doc = self.store.load_threads().await?;
        let comment = Comment {
            author: author.to_string(),
            text: text.to_string(),
            time: Some(Utc::now()),
            read_by: Default::default(),
        };
        doc.entry(thread_key(owner, title))
            .or_insert_with(Vec::new)
            .push(comment.clone());
        self.store.save_threads(doc).await?;
        tracing::debug!(owner, title, author, "comment appended");
        Ok(comment)
    }

    /// Every comment on `user`'s listings that `user` has not read yet,
    /// in thread insertion order, then comment order within each thread.
    pub async fn list_unread(&self, user: &str) -> Result<Vec<Notification>> {
        let doc = self.store.load_threads().await?;
        let mut notifications = Vec::new();
        for (key, comments) in &doc {
            let Some((owner, title)) = split_thread_key(key) else {
                tracing::warn!(key = %key, "skipping thread key without separator");
                continue;
            };
            if owner != user {
                continue;
            }
            for comment in comments {
                if !comment.read_by.contains(user) {
                    notifications.push(Notification {
                        listing_title: title.to_string(),
                        comment_author: comment.author.clone(),
                        text: comment.text.clone(),
                        time: comment.time,
                        thread_key: key.clone(),
                    });
                }
            }
        }
        Ok(notifications)
    }

    /// Number of unread comments across all of `user`'s listings.
    pub async fn unread_count(&self, user: &str) -> Result<usize> {
        Ok(self.list_unread(user).await?.len())
    }

    /// Adds `user` to the read-by set of every comment in one thread.
    /// Idempotent: the store is written only if something changed.
    /// Returns how many comments were newly marked.
    pub async fn mark_thread_read(&self, owner: &str, title: &str, user: &str) -> Result<usize> {
        let mut doc = self.store.load_threads().await?;
        let mut changed = 0;
        if let Some(comments) = doc.get_mut(&thread_key(owner, title)) {
            for comment in comments {
                if comment.read_by.insert(user.to_string()) {
                    changed += 1;
                }
            }
        }
        if changed > 0 {
            self.store.save_threads(doc).await?;
        }
        Ok(changed)
    }

    /// All comments on one listing, oldest first.
    pub async fn thread(&self, owner: &str, title: &str) -> Result<Vec<Comment>> {
        let doc = self.store.load_threads().await?;
        Ok(doc
            .get(&thread_key(owner, title))
            .cloned()
            .unwrap_or_default())
    }
}
