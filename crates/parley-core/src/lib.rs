pub mod backend;
pub mod manager;
pub mod summary;

pub use backend::{ChatBackend, HttpBackend};
pub use manager::{ConversationContext, ConversationManager};
pub use summary::{normalize_key_terms, SummaryResult, SummaryService};
