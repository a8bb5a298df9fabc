use chrono::{DateTime, Utc};
use fp_utils::dates::format_comment_timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment left on a feeding point during the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub text: String,
    /// Display timestamp, already formatted.
    pub timestamp: String,
}

impl Comment {
    /// Build a comment from user input. Returns `None` for blank text.
    pub fn compose(author: &str, text: &str, at: &DateTime<Utc>) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4().to_string(),
            author: author.to_string(),
            text: text.to_string(),
            timestamp: format_comment_timestamp(at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn blank_text_is_rejected() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(Comment::compose("ana", "", &at).is_none());
        assert!(Comment::compose("ana", "  \n\t ", &at).is_none());
    }

    #[test]
    fn composed_comments_get_distinct_ids() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 18, 45, 0).unwrap();
        let a = Comment::compose("ana", " cheio ", &at).unwrap();
        let b = Comment::compose("ana", "cheio", &at).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.text, "cheio");
        assert_eq!(a.timestamp, "01/01 18:45");
    }
}
