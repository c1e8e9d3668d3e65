//! # Domain Models
//!
//! The flat-record entities of the marketplace. There are no surrogate
//! ids: listings are keyed by `(owner, title)` and comment threads by the
//! joined `owner::title` string, exactly as they appear on disk.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maximum number of image blobs a single listing may reference.
pub const MAX_IMAGES: usize = 5;

/// Joins an owner and a listing title into a thread key. Reserved: it must
/// not appear inside a username or a title (see [`is_valid_key_component`]).
pub const THREAD_KEY_SEPARATOR: &str = "::";

/// Full listings document: owner -> title -> listing, in insertion order.
pub type ListingsByOwner = IndexMap<String, IndexMap<String, Listing>>;

/// Full credentials document: username -> opaque password hash.
pub type CredentialsDoc = IndexMap<String, String>;

/// Full threads document: `owner::title` -> comments, oldest first.
pub type ThreadsDoc = IndexMap<String, Vec<Comment>>;

/// A single textbook-for-sale record owned by one user.
///
/// `title` is repeated inside the record even though it is also the map
/// key, so a listing stays self-describing when handed out on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    pub author: String,
    /// Free text; may embed a numeric amount (e.g. "1,500円").
    pub price: String,
    pub condition: String,
    pub note: String,
    pub course: String,
    /// Ordered blob references, at most [`MAX_IMAGES`].
    #[serde(default)]
    pub images: Vec<String>,
    /// Absent only in documents written by older tooling; treated as
    /// earliest when sorting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Listing {
    /// Builds a fresh record with no images attached yet.
    pub fn new(title: impl Into<String>, draft: ListingDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            author: draft.author,
            price: draft.price,
            condition: draft.condition,
            note: draft.note,
            course: draft.course,
            images: Vec::new(),
            created_at: Some(created_at),
        }
    }

    /// Image slots still free on this listing.
    pub fn remaining_image_slots(&self) -> usize {
        MAX_IMAGES.saturating_sub(self.images.len())
    }
}

/// Caller-supplied fields for a new listing.
#[derive(Debug, Clone, Default)]
pub struct ListingDraft {
    pub author: String,
    pub price: String,
    pub condition: String,
    pub note: String,
    pub course: String,
}

/// One comment in a listing's thread.
///
/// Immutable except for `read_by`, which only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    /// Usernames that have seen this comment.
    #[serde(default)]
    pub read_by: BTreeSet<String>,
}

/// An unread comment surfaced to a listing owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub listing_title: String,
    pub comment_author: String,
    pub text: String,
    pub time: Option<DateTime<Utc>>,
    pub thread_key: String,
}

/// Joins owner and title into the persisted thread key.
pub fn thread_key(owner: &str, title: &str) -> String {
    format!("{owner}{THREAD_KEY_SEPARATOR}{title}")
}

/// Splits a persisted thread key back into `(owner, title)` at the first
/// separator. `None` means the key never came from [`thread_key`].
pub fn split_thread_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(THREAD_KEY_SEPARATOR)
}

/// Whether a user-supplied value may safely be embedded in a thread key.
pub fn is_valid_key_component(value: &str) -> bool {
    !value.is_empty() && !value.contains(THREAD_KEY_SEPARATOR)
}
