pub mod models;
pub mod store;
pub mod mongo;
pub mod error;
pub mod seed;

pub use models::{ContextRecord, MessageRole, StoredMessage};
pub use store::ConversationStore;
pub use mongo::MongoStore;
pub use error::PersistError;
pub use seed::{seed_sample_data, SeedReport};
