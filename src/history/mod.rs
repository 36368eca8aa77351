mod store;
mod types;

pub use store::{ConversationStore, Snapshot};
pub use types::{Message, Role};
