//! Prompt templates used by the relay.

/// Injected when an incoming message list carries no system message.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. \
Answer clearly and concisely, and ask for clarification when a request is ambiguous.";

/// First summarization call: extract short key terms for tagging.
pub const KEY_TERMS_PROMPT: &str = "Extract 3-5 key terms from the conversation below. \
Respond with only the terms, lowercase, separated by commas. \
Each term must be one or two words, not a sentence.";

/// Second summarization call: compress the conversation into a short summary.
pub const SUMMARY_PROMPT: &str = "Summarize the conversation below in 1-2 sentences. \
Respond with only the summary, no preamble.";
