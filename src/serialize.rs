use serde::Serialize;
use serde_json::Number;

use crate::model::Bookmark;

/// The external JSON form of a bookmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializedBookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: Number,
}

pub fn serialize(bookmark: &Bookmark) -> SerializedBookmark {
    SerializedBookmark {
        id: bookmark.id.clone(),
        title: escape_markup(&bookmark.title),
        url: bookmark.url.clone(),
        description: escape_markup(&bookmark.description),
        rating: rating_number(bookmark.rating),
    }
}

pub fn serialize_all(bookmarks: &[Bookmark]) -> Vec<SerializedBookmark> {
    bookmarks.iter().map(serialize).collect()
}

/// Replaces the characters HTML treats as markup with their entities.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// Integral ratings go out as JSON integers so `5` round-trips as `5`, not `5.0`.
fn rating_number(rating: f64) -> Number {
    if rating.fract() == 0.0 && rating.abs() <= i64::MAX as f64 {
        Number::from(rating as i64)
    } else {
        Number::from_f64(rating).unwrap_or_else(|| Number::from(0))
    }
}
