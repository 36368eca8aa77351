use super::fsm::{RequestEvent, RequestState, RequestStateMachine};
use crate::{
    Result,
    gateway::{ChatBackend, GatewayError, GatewayResult},
    history::{ConversationStore, Message},
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Resolution of one backend call.
pub type Outcome = GatewayResult<String>;

/// A submission that has been recorded and is waiting on the backend.
///
/// Holds its own copy of the text so the call can run without borrowing the
/// session that produced it.
#[derive(Debug)]
#[must_use = "a pending request keeps the session busy until it is completed"]
pub struct PendingRequest {
    message: String,
}

impl PendingRequest {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub async fn dispatch(self, backend: &dyn ChatBackend) -> Outcome {
        backend.send(&self.message).await
    }
}

/// The conversation plus the gate that allows one request at a time.
pub struct ChatSession {
    store: ConversationStore,
    fsm: RequestStateMachine,
    backend: Arc<dyn ChatBackend>,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            store: ConversationStore::new(),
            fsm: RequestStateMachine::new(),
            backend,
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn backend(&self) -> Arc<dyn ChatBackend> {
        Arc::clone(&self.backend)
    }

    pub fn state(&self) -> RequestState {
        self.fsm.current_state()
    }

    pub fn is_busy(&self) -> bool {
        self.fsm.is_busy()
    }

    /// Records the user's message and marks the session busy.
    ///
    /// Returns `None`, touching nothing, when the trimmed input is empty or a
    /// request is already outstanding.
    pub fn begin(&mut self, input: &str) -> Option<PendingRequest> {
        let text = input.trim();
        if text.is_empty() {
            debug!("Ignoring empty submission");
            return None;
        }
        if self.fsm.is_busy() {
            debug!("Ignoring submission while a request is outstanding");
            return None;
        }

        self.fsm.transition(RequestEvent::Submit).ok()?;
        self.store.append(Message::user(text));

        Some(PendingRequest {
            message: text.to_string(),
        })
    }

    /// Maps the backend outcome to an assistant message and clears the busy flag.
    pub fn complete(&mut self, outcome: Outcome) -> Result<&Message> {
        self.fsm.transition(RequestEvent::Resolved)?;

        let content = match outcome {
            Ok(reply) => {
                info!("Chat backend replied ({} chars)", reply.chars().count());
                reply
            }
            Err(e) => {
                error!("Error calling chat backend: {}", e);
                error_reply(&e)
            }
        };

        Ok(self.store.append(Message::assistant(content)))
    }

    /// `begin`, `dispatch` and `complete` in one call.
    pub async fn submit(&mut self, input: &str) -> Result<Option<&Message>> {
        let Some(pending) = self.begin(input) else {
            return Ok(None);
        };
        let outcome = pending.dispatch(self.backend.as_ref()).await;
        self.complete(outcome).map(Some)
    }
}

/// Text shown in place of a reply when the backend call fails.
pub fn error_reply(err: &GatewayError) -> String {
    let reason = err.to_string();
    let reason = match reason.trim() {
        "" => "Unknown error",
        trimmed => trimmed,
    };
    format!(
        "Sorry, I encountered an error: {reason}. Please make sure the backend is running and check your API URL configuration."
    )
}
