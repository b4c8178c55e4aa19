pub mod chat;
pub mod health;
pub mod sample_data;
pub mod summarize;
