//! # Search & Sort
//!
//! Keyword filter, highlight and per-owner sort over a catalog snapshot.
//! Everything here is pure: the snapshot is consumed read-only and owners
//! come back in snapshot order.

use std::cmp::Reverse;
use std::str::FromStr;

use domains::error::DomainError;
use domains::models::{Listing, ListingsByOwner};

const MARK_OPEN: &str = "<mark>";
const MARK_CLOSE: &str = "</mark>";

/// Sort policy, applied independently within each owner's result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Creation time, newest first; records without a timestamp last.
    #[default]
    Newest,
    /// Known prices ascending; unknown prices last.
    PriceAscending,
    /// Known prices descending; unknown prices still last, not first.
    PriceDescending,
}

impl FromStr for SortMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::Newest),
            "price_asc" => Ok(Self::PriceAscending),
            "price_desc" => Ok(Self::PriceDescending),
            other => Err(DomainError::Validation(format!(
                "unknown sort mode {other:?} (expected new, price_asc or price_desc)"
            ))),
        }
    }
}

/// One owner's matched listings, sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerListings {
    pub owner: String,
    pub listings: Vec<Listing>,
}

/// Runs the filter → highlight → sort pipeline over a catalog snapshot.
///
/// An empty (or all-whitespace) keyword matches everything and leaves
/// fields untouched. Owners with no matching listings are omitted.
pub fn search_catalog(
    catalog: &ListingsByOwner,
    keyword: &str,
    sort: SortMode,
) -> Vec<OwnerListings> {
    let keyword = keyword.trim();
    let mut results = Vec::new();
    for (owner, shelf) in catalog {
        let mut listings: Vec<Listing> = if keyword.is_empty() {
            shelf.values().cloned().collect()
        } else {
            shelf
                .values()
                .filter(|listing| matches_keyword(listing, keyword))
                .map(|listing| highlight_listing(listing, keyword))
                .collect()
        };
        if listings.is_empty() {
            continue;
        }
        sort_listings(&mut listings, sort);
        results.push(OwnerListings {
            owner: owner.clone(),
            listings,
        });
    }
    results
}

/// Case-insensitive substring match over the searched fields: title,
/// author, note, condition and course. The price field is not searched.
fn matches_keyword(listing: &Listing, keyword: &str) -> bool {
    let combined = [
        listing.title.as_str(),
        listing.author.as_str(),
        listing.note.as_str(),
        listing.condition.as_str(),
        listing.course.as_str(),
    ]
    .join(" ");
    combined.to_lowercase().contains(&keyword.to_lowercase())
}

/// Clones the listing with every string field highlighted. Non-string
/// fields (images, timestamp) pass through unchanged.
fn highlight_listing(listing: &Listing, keyword: &str) -> Listing {
    Listing {
        title: highlight(&listing.title, keyword),
        author: highlight(&listing.author, keyword),
        price: highlight(&listing.price, keyword),
        condition: highlight(&listing.condition, keyword),
        note: highlight(&listing.note, keyword),
        course: highlight(&listing.course, keyword),
        images: listing.images.clone(),
        created_at: listing.created_at,
    }
}

/// Wraps every case-insensitive occurrence of `keyword` in
/// `<mark>…</mark>`, scanning left to right without overlap and keeping
/// the matched text's original characters.
pub fn highlight(text: &str, keyword: &str) -> String {
    if keyword.is_empty() {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    let folded: Vec<char> = chars.iter().map(|&c| fold_char(c)).collect();
    let needle: Vec<char> = keyword.chars().map(fold_char).collect();

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if i + needle.len() <= chars.len() && folded[i..i + needle.len()] == needle[..] {
            out.push_str(MARK_OPEN);
            out.extend(&chars[i..i + needle.len()]);
            out.push_str(MARK_CLOSE);
            i += needle.len();
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Per-char case folding that keeps offsets into the original text
/// aligned: a char folds to the first char of its lowercase expansion.
fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// First contiguous ASCII digit run of the price field, with thousands
/// separators stripped. `None` means the price is unknown for sorting.
pub fn parse_price(price: &str) -> Option<u64> {
    let digits: String = price
        .chars()
        .filter(|&c| c != ',')
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// Stable in-place sort; ties keep their snapshot order.
fn sort_listings(listings: &mut [Listing], mode: SortMode) {
    match mode {
        SortMode::Newest => listings.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::PriceAscending => listings.sort_by_key(|l| match parse_price(&l.price) {
            Some(p) => (false, p),
            None => (true, 0),
        }),
        SortMode::PriceDescending => listings.sort_by_key(|l| match parse_price(&l.price) {
            Some(p) => (false, Reverse(p)),
            None => (true, Reverse(0)),
        }),
    }
}
