//! # domains
//!
//! The central domain models and interface definitions for bookstall.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use chrono::Utc;

    #[test]
    fn thread_key_splits_at_first_separator() {
        let key = thread_key("alice", "Calculus 101");
        assert_eq!(key, "alice::Calculus 101");
        assert_eq!(split_thread_key(&key), Some(("alice", "Calculus 101")));
        // A stray separator later in the key still yields the first split.
        assert_eq!(split_thread_key("a::b::c"), Some(("a", "b::c")));
        assert_eq!(split_thread_key("no-separator"), None);
    }

    #[test]
    fn key_components_reject_separator_and_empty() {
        assert!(is_valid_key_component("alice"));
        assert!(!is_valid_key_component(""));
        assert!(!is_valid_key_component("al::ice"));
    }

    #[test]
    fn listing_deserializes_without_optional_fields() {
        let raw = r#"{
            "title": "Calculus 101",
            "author": "Stewart",
            "price": "1500円",
            "condition": "good",
            "note": "",
            "course": "MATH101"
        }"#;
        let listing: Listing = serde_json::from_str(raw).expect("parse listing");
        assert!(listing.images.is_empty());
        assert!(listing.created_at.is_none());
        assert_eq!(listing.remaining_image_slots(), MAX_IMAGES);
    }

    #[test]
    fn comment_read_by_defaults_to_empty_set() {
        let raw = r#"{ "author": "carol", "text": "still available?" }"#;
        let comment: Comment = serde_json::from_str(raw).expect("parse comment");
        assert!(comment.read_by.is_empty());
        assert!(comment.time.is_none());
    }

    #[test]
    fn listing_round_trips_through_json() {
        let listing = Listing::new(
            "Linear Algebra",
            ListingDraft {
                author: "Strang".into(),
                price: "800円".into(),
                condition: "worn".into(),
                note: "margin notes in ch. 3".into(),
                course: "MATH201".into(),
            },
            Utc::now(),
        );
        let json = serde_json::to_string(&listing).expect("serialize");
        let back: Listing = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(listing, back);
    }
}
