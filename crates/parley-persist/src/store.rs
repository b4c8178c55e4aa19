use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ContextRecord, MessageRole, StoredMessage};

/// Trait for message-store persistence operations
///
/// Implementations provide database-specific insert/select/upsert calls.
/// Conversation ids are opaque strings at this boundary; the MongoDB
/// implementation renders ObjectIds as hex.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Create a new conversation and return its id
    async fn create_conversation(&self) -> Result<String>;

    /// Append a message to a conversation
    async fn insert_message(
        &self,
        conversation_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<()>;

    /// Get all messages for a conversation in insertion order
    async fn get_messages(&self, conversation_id: &str) -> Result<Vec<StoredMessage>>;

    /// Insert or replace the derived context for a conversation
    async fn upsert_context(&self, record: ContextRecord) -> Result<()>;

    /// Get the stored context for a conversation
    ///
    /// Errors with `ContextNotFound` when no row exists.
    async fn get_context(&self, conversation_id: &str) -> Result<ContextRecord>;

    /// Find context rows whose tag set intersects `tags`
    async fn search_by_tags(&self, tags: &[String]) -> Result<Vec<ContextRecord>>;

    /// Whether any conversation exists (used by the idempotent seeder)
    async fn has_conversations(&self) -> Result<bool>;
}
