use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, warn};

use parley_llm::{ChatMessage, Role};
use parley_persist::{ContextRecord, ConversationStore, MessageRole};

use crate::backend::ChatBackend;
use crate::summary::SummaryService;

/// Context is only computed once a conversation has this many local messages.
const CONTEXT_MESSAGE_THRESHOLD: usize = 3;

/// Label prefixed to summaries injected from related conversations.
const INJECTED_CONTEXT_LABEL: &str = "Context from a related conversation: ";

/// The manager's local view of its conversation's derived context.
///
/// Defaults to empty until the message-count threshold is crossed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationContext {
    pub summary: String,
    pub key_terms: Vec<String>,
}

/// Owns in-memory session state for one conversation and orchestrates
/// persistence, the relay call, and the context-update step.
///
/// State is exposed through accessor methods plus a watch channel bumped on
/// every mutation; the presentation layer polls or subscribes. `&mut self`
/// makes overlapping sends unrepresentable through a single handle; the
/// `loading` flag additionally gates shared-handle wrappers and is advisory
/// UI state.
pub struct ConversationManager {
    store: Arc<dyn ConversationStore>,
    backend: Arc<dyn ChatBackend>,
    summary: SummaryService,
    conversation_id: Option<String>,
    messages: Vec<ChatMessage>,
    context: ConversationContext,
    loading: bool,
    last_error: Option<String>,
    revision_tx: watch::Sender<u64>,
}

impl ConversationManager {
    pub fn new(store: Arc<dyn ConversationStore>, backend: Arc<dyn ChatBackend>) -> Self {
        let (revision_tx, _) = watch::channel(0);
        Self {
            store,
            summary: SummaryService::new(Arc::clone(&backend)),
            backend,
            conversation_id: None,
            messages: Vec::new(),
            context: ConversationContext::default(),
            loading: false,
            last_error: None,
            revision_tx,
        }
    }

    /// Ordered snapshot of local messages.
    ///
    /// The default system prompt never enters local state (the relay injects
    /// it per request); system messages appearing here come from
    /// [`inject_context`](Self::inject_context).
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Subscribe to state changes; the value is a revision counter.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision_tx.subscribe()
    }

    fn notify(&self) {
        self.revision_tx.send_modify(|revision| *revision += 1);
    }

    /// Send a user message through the relay and update local state.
    ///
    /// Blank content and sends issued while another is in flight are no-ops.
    /// Relay or persistence failures set `last_error` and are returned; the
    /// loading flag is cleared on every exit path.
    pub async fn send_message(&mut self, content: &str) -> Result<()> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(());
        }
        if self.loading {
            debug!("send ignored: another call is in flight");
            return Ok(());
        }

        self.loading = true;
        self.last_error = None;
        self.notify();

        let result = self.send_inner(content).await;
        if let Err(e) = &result {
            self.last_error = Some(format!("{e:#}"));
        }

        self.loading = false;
        self.notify();
        result
    }

    async fn send_inner(&mut self, content: &str) -> Result<()> {
        let conversation_id = match &self.conversation_id {
            Some(id) => id.clone(),
            None => {
                let id = self
                    .store
                    .create_conversation()
                    .await
                    .context("Failed to create conversation")?;
                self.conversation_id = Some(id.clone());
                id
            }
        };

        self.messages.push(ChatMessage::user(content));
        self.notify();

        self.store
            .insert_message(&conversation_id, MessageRole::User, content)
            .await
            .context("Failed to persist user message")?;

        // The relay persists the assistant row keyed to the conversation id
        let reply = self
            .backend
            .chat(&conversation_id, &self.messages)
            .await
            .context("Chat relay request failed")?;

        self.messages.push(ChatMessage::assistant(reply));
        self.notify();

        self.update_context(&conversation_id).await;
        Ok(())
    }

    /// Recompute and persist the conversation's derived context.
    ///
    /// Skipped below the message threshold. Failures here are logged and
    /// swallowed: the user's message exchange already succeeded.
    async fn update_context(&mut self, conversation_id: &str) {
        if self.messages.len() < CONTEXT_MESSAGE_THRESHOLD {
            return;
        }

        let raw_conversation = self
            .messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let result = self.summary.summarize(&raw_conversation).await;

        self.context = ConversationContext {
            summary: result.summary.clone(),
            key_terms: result.key_terms.clone(),
        };
        self.notify();

        let record = ContextRecord {
            conversation_id: conversation_id.to_string(),
            summary: result.summary,
            key_terms: result.key_terms.clone(),
            tags: result.key_terms,
            raw_conversation,
            created_at: Utc::now(),
        };

        if let Err(e) = self.store.upsert_context(record).await {
            warn!("Failed to persist conversation context: {e}");
        }
    }

    /// Find stored contexts whose tags intersect `tags`.
    ///
    /// An empty (or all-blank) tag set returns an empty result without
    /// querying the store. Store failures record `last_error` and degrade to
    /// an empty result; this call never returns an error.
    pub async fn search_by_tags(&mut self, tags: &[String]) -> Vec<ContextRecord> {
        let normalized: Vec<String> = tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        if normalized.is_empty() {
            return Vec::new();
        }

        self.loading = true;
        self.notify();

        let result = self.store.search_by_tags(&normalized).await;

        self.loading = false;
        match result {
            Ok(rows) => {
                self.notify();
                rows
            }
            Err(e) => {
                self.last_error = Some(format!("Tag search failed: {e}"));
                self.notify();
                Vec::new()
            }
        }
    }

    /// Append another conversation's stored summary as a labeled system
    /// message.
    ///
    /// User-initiated, so failures propagate: a missing context row or store
    /// error leaves the local message list unchanged.
    pub async fn inject_context(&mut self, conversation_id: &str) -> Result<()> {
        self.loading = true;
        self.notify();

        let result = self.store.get_context(conversation_id).await;

        self.loading = false;
        match result {
            Ok(context) => {
                self.messages.push(ChatMessage::system(format!(
                    "{INJECTED_CONTEXT_LABEL}{}",
                    context.summary
                )));
                self.notify();
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(format!("{e}"));
                self.notify();
                Err(e).context("Failed to inject conversation context")
            }
        }
    }
}
