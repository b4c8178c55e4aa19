use chrono::{DateTime, Utc};
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConversationDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ConversationRepository {
    collection: Collection<ConversationDoc>,
}

impl ConversationRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("conversations");
        Self { collection }
    }

    /// Create a new conversation
    pub async fn create(&self) -> Result<ObjectId> {
        let conversation = ConversationDoc {
            id: ObjectId::new(),
            created_at: Utc::now(),
        };

        self.collection.insert_one(&conversation).await?;
        Ok(conversation.id)
    }

    /// Count all conversations
    pub async fn count(&self) -> Result<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }
}
