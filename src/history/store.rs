use super::Message;
use tokio::sync::watch;
use tracing::debug;

/// Restartable view over the conversation, oldest first.
pub type Snapshot<'a> = std::slice::Iter<'a, Message>;

/// In-memory, append-only conversation for the current session.
pub struct ConversationStore {
    messages: Vec<Message>,
    // Carries the current length; receivers treat any change as "re-render".
    changes: watch::Sender<usize>,
}

impl ConversationStore {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            messages: Vec::new(),
            changes,
        }
    }

    pub fn append(&mut self, message: Message) -> &Message {
        debug!(
            "Appending {} message {} ({} bytes)",
            message.role(),
            message.id(),
            message.content().len()
        );
        self.messages.push(message);
        self.changes.send_replace(self.messages.len());

        &self.messages[self.messages.len() - 1]
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.messages.iter()
    }

    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.changes.subscribe()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Role;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_append_and_snapshot() {
        let mut store = ConversationStore::new();
        store.append(Message::user("Hello"));
        store.append(Message::assistant("Hi there!"));

        let messages: Vec<&Message> = store.snapshot().collect();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role(), Role::User);
        assert_eq!(messages[0].content(), "Hello");
        assert_eq!(messages[1].role(), Role::Assistant);
        assert_eq!(messages[1].content(), "Hi there!");
    }

    #[test]
    fn test_empty_store() {
        let store = ConversationStore::new();
        assert!(store.is_empty());
        assert!(store.last().is_none());
        assert_eq!(store.snapshot().count(), 0);
    }

    #[test]
    fn test_snapshot_is_restartable() {
        let mut store = ConversationStore::new();
        store.append(Message::user("one"));
        store.append(Message::assistant("two"));

        let snapshot = store.snapshot();
        let first_pass: Vec<&str> = snapshot.clone().map(Message::content).collect();
        let second_pass: Vec<&str> = snapshot.map(Message::content).collect();
        assert_eq!(first_pass, vec!["one", "two"]);
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_message_ordering() {
        let mut store = ConversationStore::new();
        for content in ["First message", "Second message", "Third message"] {
            store.append(Message::user(content));
        }

        let messages: Vec<&Message> = store.snapshot().collect();
        assert_eq!(messages[0].content(), "First message");
        assert_eq!(messages[1].content(), "Second message");
        assert_eq!(messages[2].content(), "Third message");

        // ids and timestamps follow creation order
        assert!(messages[0].id() < messages[1].id());
        assert!(messages[1].id() < messages[2].id());
        assert!(messages[0].created_at() <= messages[2].created_at());
    }

    #[test]
    fn test_append_returns_stored_message() {
        let mut store = ConversationStore::new();
        let original = Message::user("keep me");
        let id = original.id();

        let stored = store.append(original);
        assert_eq!(stored.id(), id);
        assert_eq!(store.last().map(Message::id), Some(id));
    }

    #[tokio::test]
    async fn test_subscribers_see_every_append() {
        let mut store = ConversationStore::new();
        let mut changes = store.subscribe();
        assert_eq!(*changes.borrow(), 0);

        store.append(Message::user("ping"));
        changes.changed().await.unwrap();
        assert_eq!(*changes.borrow_and_update(), 1);

        store.append(Message::assistant("pong"));
        changes.changed().await.unwrap();
        assert_eq!(*changes.borrow_and_update(), 2);
    }

    #[test]
    fn test_message_creation_helpers() {
        let user_msg = Message::user("User input");
        assert_eq!(user_msg.role(), Role::User);
        assert_eq!(user_msg.content(), "User input");

        let assistant_msg = Message::assistant("Assistant response");
        assert_eq!(assistant_msg.role(), Role::Assistant);
        assert_eq!(assistant_msg.content(), "Assistant response");
        assert_ne!(user_msg.id(), assistant_msg.id());
    }

    #[test]
    fn test_message_timestamps() {
        let before = Utc::now();
        let msg = Message::user("content");
        let after = Utc::now();

        assert!(msg.created_at() >= before && msg.created_at() <= after);
        assert_eq!(msg.display_time().len(), 5);
        assert_eq!(&msg.display_time()[2..3], ":");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_large_multiline_content() {
        let mut store = ConversationStore::new();
        let large_content = "line\n".repeat(2000);
        store.append(Message::assistant(large_content.clone()));

        assert_eq!(store.last().unwrap().content(), large_content);
    }
}
