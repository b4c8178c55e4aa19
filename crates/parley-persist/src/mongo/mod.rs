mod context;
mod conversation;
mod message;

pub use context::ContextRepository;
pub use conversation::ConversationRepository;
pub use message::MessageRepository;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::Client;

use crate::error::{PersistError, Result};
use crate::models::{ContextRecord, MessageRole, StoredMessage};
use crate::store::ConversationStore;

/// MongoDB-backed implementation of [`ConversationStore`]
pub struct MongoStore {
    conversation_repo: ConversationRepository,
    message_repo: MessageRepository,
    context_repo: ContextRepository,
}

impl MongoStore {
    pub async fn new(mongodb_uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        Ok(Self {
            conversation_repo: ConversationRepository::new(&client, db_name),
            message_repo: MessageRepository::new(&client, db_name),
            context_repo: ContextRepository::new(&client, db_name),
        })
    }
}

pub(crate) fn parse_conversation_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| PersistError::InvalidConversationId(id.to_string()))
}

#[async_trait]
impl ConversationStore for MongoStore {
    async fn create_conversation(&self) -> Result<String> {
        let id = self.conversation_repo.create().await?;
        Ok(id.to_hex())
    }

    async fn insert_message(
        &self,
        conversation_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<()> {
        let id = parse_conversation_id(conversation_id)?;
        self.message_repo.insert(id, role, content).await
    }

    async fn get_messages(&self, conversation_id: &str) -> Result<Vec<StoredMessage>> {
        let id = parse_conversation_id(conversation_id)?;
        self.message_repo.get_messages(id).await
    }

    async fn upsert_context(&self, record: ContextRecord) -> Result<()> {
        let id = parse_conversation_id(&record.conversation_id)?;
        self.context_repo.upsert(id, record).await
    }

    async fn get_context(&self, conversation_id: &str) -> Result<ContextRecord> {
        let id = parse_conversation_id(conversation_id)?;
        self.context_repo
            .get(id)
            .await?
            .ok_or_else(|| PersistError::ContextNotFound(conversation_id.to_string()))
    }

    async fn search_by_tags(&self, tags: &[String]) -> Result<Vec<ContextRecord>> {
        self.context_repo.search_by_tags(tags).await
    }

    async fn has_conversations(&self) -> Result<bool> {
        Ok(self.conversation_repo.count().await? > 0)
    }
}
