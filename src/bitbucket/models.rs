//! Data models for pull-request comments.
//!
//! Bitbucket comment payloads are treated as opaque JSON: the service owns
//! the shape, and the client performs no local validation beyond the fields
//! its own helpers read.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;

/// Positional settle result for bulk operations.
///
/// Each slot corresponds to the input item at the same index, holding either
/// the item's success value or the error that occurred. Individual failures
/// never abort the other items.
pub type Settled<T> = Vec<Result<T, ApiError>>;

/// A pull-request comment as returned by (or destined for) Bitbucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Comment(Value);

impl Comment {
    /// Author username from the nested `author_info` object, when present.
    #[must_use]
    pub fn author_username(&self) -> Option<&str> {
        self.0.get("author_info")?.get("username")?.as_str()
    }

    /// Comment identifier, when present.
    ///
    /// The 1.0 listing endpoint reports it as `comment_id`; payloads built
    /// elsewhere may carry a plain `id`.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        self.0
            .get("comment_id")
            .or_else(|| self.0.get("id"))?
            .as_u64()
    }

    /// Comment body text, when present.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.0.get("content")?.as_str()
    }

    /// Borrow the raw JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take ownership of the raw JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Comment {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Comment;

    #[test]
    fn author_username_reads_nested_field() {
        let comment = Comment::from(json!({
            "author_info": { "username": "alice" },
            "comment_id": 1
        }));
        assert_eq!(comment.author_username(), Some("alice"));
    }

    #[test]
    fn author_username_is_none_without_author() {
        let comment = Comment::from(json!({ "comment_id": 1 }));
        assert_eq!(comment.author_username(), None);
    }

    #[test]
    fn id_prefers_comment_id() {
        let comment = Comment::from(json!({ "comment_id": 7, "id": 9 }));
        assert_eq!(comment.id(), Some(7));
    }

    #[test]
    fn id_falls_back_to_plain_id() {
        let comment = Comment::from(json!({ "id": 9 }));
        assert_eq!(comment.id(), Some(9));
    }

    #[test]
    fn content_reads_body_text() {
        let comment = Comment::from(json!({ "content": "Looks good" }));
        assert_eq!(comment.content(), Some("Looks good"));
    }
}
