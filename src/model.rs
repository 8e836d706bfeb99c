use serde::Deserialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// A stored bookmark. Every value of this type has passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: f64,
}

/// A validated candidate waiting for an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: f64,
}

/// The raw body of `POST /bookmarks`.
///
/// `rating` stays untyped so that `"4"`, `4` and `"four"` reach the validator
/// and fail (or pass) on their own rule.
#[derive(Debug, Default, Deserialize)]
pub struct BookmarkPayload {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<JsonValue>,
}

impl NewBookmark {
    pub fn into_bookmark(self, id: String) -> Bookmark {
        Bookmark {
            id,
            title: self.title,
            url: self.url,
            description: self.description,
            rating: self.rating,
        }
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
