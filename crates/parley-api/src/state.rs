use std::sync::Arc;

use parley_llm::CompletionClient;
use parley_persist::ConversationStore;

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// The store and completion provider are trait objects so tests can
/// substitute fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn ConversationStore>,
    pub llm: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn ConversationStore>,
        llm: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            llm,
        }
    }
}
