//! Comment record wire model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single server-supplied comment as delivered by the list endpoint.
///
/// `id`, `parent_id` and `level` drive threading; the remaining fields are
/// display payload the engine carries through untouched. Fields the engine
/// does not know about land in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: i64,
    /// Equals `id` for root comments; otherwise the id this replies to.
    pub parent_id: i64,
    /// Nesting depth as reported by the server. Trusted only to detect
    /// roots (`level == 0`), never for tree construction.
    pub level: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_date: Option<DateTime<Utc>>,
    /// Display fields the engine does not interpret (flags, avatars, urls).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CommentRecord {
    /// Construct a bare record. Display fields start empty.
    #[must_use]
    pub fn new(id: i64, parent_id: i64, level: i64) -> Self {
        Self {
            id,
            parent_id,
            level,
            comment: String::new(),
            user_name: String::new(),
            submit_date: None,
            extra: serde_json::Map::new(),
        }
    }

    /// A root comment marks "no parent" by referencing itself.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id == self.id
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn root_is_self_referencing() {
        assert!(CommentRecord::new(9, 9, 0).is_root());
        assert!(!CommentRecord::new(10, 9, 1).is_root());
    }

    #[test]
    fn decodes_with_minimal_fields() {
        let record: CommentRecord =
            serde_json::from_str(r#"{"id": 3, "parent_id": 3, "level": 0}"#).unwrap();
        assert_eq!(record.id, 3);
        assert!(record.comment.is_empty());
        assert!(record.user_name.is_empty());
        assert!(record.submit_date.is_none());
        assert!(record.extra.is_empty());
    }

    #[test]
    fn unknown_fields_pass_through() {
        let raw = r#"{
            "id": 5,
            "parent_id": 5,
            "level": 0,
            "comment": "hello",
            "user_name": "alice",
            "is_removed": false,
            "avatar_url": "https://example.test/a.png"
        }"#;
        let record: CommentRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.comment, "hello");
        assert_eq!(record.extra.len(), 2);
        assert_eq!(
            record.extra.get("is_removed"),
            Some(&serde_json::Value::Bool(false))
        );

        // Round-trip keeps the opaque fields.
        let encoded = serde_json::to_string(&record).unwrap();
        let again: CommentRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(again, record);
    }

    #[test]
    fn submit_date_parses_rfc3339() {
        let record: CommentRecord = serde_json::from_str(
            r#"{"id": 1, "parent_id": 1, "level": 0, "submit_date": "2026-03-01T10:15:00Z"}"#,
        )
        .unwrap();
        let date = record.submit_date.unwrap();
        assert_eq!(date.to_rfc3339(), "2026-03-01T10:15:00+00:00");
    }
}
