use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::ContextRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContextDoc {
    conversation_id: ObjectId,
    summary: String,
    key_terms: Vec<String>,
    tags: Vec<String>,
    raw_conversation: String,
    created_at: DateTime<Utc>,
}

impl ContextDoc {
    fn into_record(self) -> ContextRecord {
        ContextRecord {
            conversation_id: self.conversation_id.to_hex(),
            summary: self.summary,
            key_terms: self.key_terms,
            tags: self.tags,
            raw_conversation: self.raw_conversation,
            created_at: self.created_at,
        }
    }
}

#[derive(Clone)]
pub struct ContextRepository {
    collection: Collection<ContextDoc>,
}

impl ContextRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("conversation_contexts");
        Self { collection }
    }

    /// Insert or replace the context row for a conversation
    pub async fn upsert(&self, conversation_id: ObjectId, record: ContextRecord) -> Result<()> {
        let body = ContextDoc {
            conversation_id,
            summary: record.summary,
            key_terms: record.key_terms,
            tags: record.tags,
            raw_conversation: record.raw_conversation,
            created_at: record.created_at,
        };

        let filter = doc! { "conversation_id": conversation_id };
        let update = doc! { "$set": bson::to_document(&body)? };

        self.collection
            .update_one(filter, update)
            .upsert(true)
            .await?;
        Ok(())
    }

    /// Get the context row for a conversation
    pub async fn get(&self, conversation_id: ObjectId) -> Result<Option<ContextRecord>> {
        let filter = doc! { "conversation_id": conversation_id };
        let doc = self.collection.find_one(filter).await?;
        Ok(doc.map(ContextDoc::into_record))
    }

    /// Find context rows whose tag set intersects `tags`, most recent first
    pub async fn search_by_tags(&self, tags: &[String]) -> Result<Vec<ContextRecord>> {
        let filter = doc! { "tags": { "$in": tags.to_vec() } };
        let docs: Vec<ContextDoc> = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(docs.into_iter().map(ContextDoc::into_record).collect())
    }
}
