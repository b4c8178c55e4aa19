#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use parley_core::backend::ChatBackend;
use parley_core::summary::SummaryResult;
use parley_llm::ChatMessage;
use parley_persist::error::{PersistError, Result as PersistResult};
use parley_persist::{ContextRecord, ConversationStore, MessageRole, StoredMessage};

/// In-memory store standing in for MongoDB.
#[derive(Default)]
pub struct FakeStore {
    pub state: Mutex<FakeStoreState>,
}

#[derive(Default)]
pub struct FakeStoreState {
    next_id: usize,
    pub conversations: Vec<String>,
    pub messages: Vec<StoredMessage>,
    pub contexts: HashMap<String, ContextRecord>,
    pub search_calls: usize,
    pub fail_insert_message: bool,
    pub fail_upsert_context: bool,
    pub fail_search: bool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(self, record: ContextRecord) -> Self {
        self.state
            .lock()
            .unwrap()
            .contexts
            .insert(record.conversation_id.clone(), record);
        self
    }
}

pub fn context_record(conversation_id: &str, summary: &str, tags: &[&str]) -> ContextRecord {
    ContextRecord {
        conversation_id: conversation_id.to_string(),
        summary: summary.to_string(),
        key_terms: tags.iter().map(|t| t.to_string()).collect(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        raw_conversation: String::new(),
        created_at: Utc::now(),
    }
}

#[async_trait]
impl ConversationStore for FakeStore {
    async fn create_conversation(&self) -> PersistResult<String> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("conv-{}", state.next_id);
        state.conversations.push(id.clone());
        Ok(id)
    }

    async fn insert_message(
        &self,
        conversation_id: &str,
        role: MessageRole,
        content: &str,
    ) -> PersistResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_insert_message {
            return Err(PersistError::Connection("injected insert failure".into()));
        }
        state.messages.push(StoredMessage {
            conversation_id: conversation_id.to_string(),
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn get_messages(&self, conversation_id: &str) -> PersistResult<Vec<StoredMessage>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect())
    }

    async fn upsert_context(&self, record: ContextRecord) -> PersistResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_upsert_context {
            return Err(PersistError::Connection("injected upsert failure".into()));
        }
        state
            .contexts
            .insert(record.conversation_id.clone(), record);
        Ok(())
    }

    async fn get_context(&self, conversation_id: &str) -> PersistResult<ContextRecord> {
        let state = self.state.lock().unwrap();
        state
            .contexts
            .get(conversation_id)
            .cloned()
            .ok_or_else(|| PersistError::ContextNotFound(conversation_id.to_string()))
    }

    async fn search_by_tags(&self, tags: &[String]) -> PersistResult<Vec<ContextRecord>> {
        let mut state = self.state.lock().unwrap();
        state.search_calls += 1;
        if state.fail_search {
            return Err(PersistError::Connection("injected search failure".into()));
        }
        Ok(state
            .contexts
            .values()
            .filter(|record| record.tags.iter().any(|t| tags.contains(t)))
            .cloned()
            .collect())
    }

    async fn has_conversations(&self) -> PersistResult<bool> {
        Ok(!self.state.lock().unwrap().conversations.is_empty())
    }
}

/// Scripted chat relay.
pub struct FakeBackend {
    pub replies: Mutex<VecDeque<String>>,
    pub summary: Mutex<Option<SummaryResult>>,
    pub fail_chat: Mutex<bool>,
    pub chat_calls: Mutex<usize>,
    pub summarize_calls: Mutex<usize>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            summary: Mutex::new(Some(SummaryResult {
                summary: "a short summary".to_string(),
                key_terms: vec!["alpha".to_string(), "beta".to_string()],
            })),
            fail_chat: Mutex::new(false),
            chat_calls: Mutex::new(0),
            summarize_calls: Mutex::new(0),
        }
    }

    pub fn with_reply(self, reply: &str) -> Self {
        self.replies.lock().unwrap().push_back(reply.to_string());
        self
    }

    pub fn failing_chat(self) -> Self {
        *self.fail_chat.lock().unwrap() = true;
        self
    }

    pub fn failing_summarize(self) -> Self {
        *self.summary.lock().unwrap() = None;
        self
    }
}

#[async_trait]
impl ChatBackend for FakeBackend {
    async fn chat(&self, _conversation_id: &str, _messages: &[ChatMessage]) -> Result<String> {
        *self.chat_calls.lock().unwrap() += 1;
        if *self.fail_chat.lock().unwrap() {
            anyhow::bail!("injected relay failure");
        }
        Ok(self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "assistant reply".to_string()))
    }

    async fn summarize(&self, _text: &str) -> Result<SummaryResult> {
        *self.summarize_calls.lock().unwrap() += 1;
        match self.summary.lock().unwrap().clone() {
            Some(result) => Ok(result),
            None => anyhow::bail!("injected summarize failure"),
        }
    }
}
