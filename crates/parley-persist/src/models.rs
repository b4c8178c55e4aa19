use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted turn of a conversation.
///
/// Ordering within a conversation is insertion order; there is no explicit
/// sequence number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub conversation_id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Derived summary + key terms for a conversation, at most one per
/// conversation (upsert key = `conversation_id`).
///
/// `tags` is a copy of `key_terms` and is what the tag search matches on.
/// `raw_conversation` is the non-system message contents at the time of the
/// last summarization, so the stored context may lag the live message list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextRecord {
    pub conversation_id: String,
    pub summary: String,
    pub key_terms: Vec<String>,
    pub tags: Vec<String>,
    pub raw_conversation: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MessageRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&MessageRole::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(
            serde_json::from_str::<MessageRole>("\"system\"").unwrap(),
            MessageRole::System
        );
    }

    #[test]
    fn context_record_round_trips() {
        let record = ContextRecord {
            conversation_id: "abc".into(),
            summary: "short summary".into(),
            key_terms: vec!["rust".into(), "async".into()],
            tags: vec!["rust".into(), "async".into()],
            raw_conversation: "hello\n\nworld".into(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["tags"][0], "rust");
        let back: ContextRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.key_terms, record.key_terms);
    }
}
