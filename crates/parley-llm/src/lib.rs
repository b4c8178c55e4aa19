pub mod types;
pub mod traits;
pub mod openai;
pub mod prompts;

pub use traits::{
    CompletionClient,
    CompletionRequest, CompletionResponse, CompletionOptions,
    TokenUsage,
};

pub use openai::OpenAIClient;
pub use types::{ChatMessage, Role};
pub use prompts::{DEFAULT_SYSTEM_PROMPT, KEY_TERMS_PROMPT, SUMMARY_PROMPT};
