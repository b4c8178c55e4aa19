use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{MessageRole, StoredMessage};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MessageDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    conversation_id: ObjectId,
    role: MessageRole,
    content: String,
    created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct MessageRepository {
    collection: Collection<MessageDoc>,
}

impl MessageRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("messages");
        Self { collection }
    }

    /// Append a message to a conversation
    pub async fn insert(
        &self,
        conversation_id: ObjectId,
        role: MessageRole,
        content: &str,
    ) -> Result<()> {
        let message = MessageDoc {
            id: ObjectId::new(),
            conversation_id,
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        };

        self.collection.insert_one(&message).await?;
        Ok(())
    }

    /// Get all messages for a conversation in chronological order
    pub async fn get_messages(&self, conversation_id: ObjectId) -> Result<Vec<StoredMessage>> {
        let filter = doc! { "conversation_id": conversation_id };
        let docs: Vec<MessageDoc> = self
            .collection
            .find(filter)
            .sort(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(docs
            .into_iter()
            .map(|doc| StoredMessage {
                conversation_id: doc.conversation_id.to_hex(),
                role: doc.role,
                content: doc.content,
                created_at: doc.created_at,
            })
            .collect())
    }
}
