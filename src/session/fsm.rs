use crate::{Error, Result};
use tracing::{debug, info, warn};

// Request states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    AwaitingResponse,
}

// Request events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEvent {
    Submit,
    Resolved,
}

/// Tracks the single in-flight request. `AwaitingResponse` is the busy flag.
#[derive(Debug)]
pub struct RequestStateMachine {
    state: RequestState,
}

impl RequestStateMachine {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
        }
    }

    pub fn current_state(&self) -> RequestState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == RequestState::AwaitingResponse
    }

    pub fn transition(&mut self, event: RequestEvent) -> Result<()> {
        let old_state = self.state;
        debug!("FSM processing event {:?} in state {:?}", event, old_state);

        let new_state = match (old_state, event) {
            (RequestState::Idle, RequestEvent::Submit) => RequestState::AwaitingResponse,
            (RequestState::AwaitingResponse, RequestEvent::Resolved) => RequestState::Idle,
            _ => {
                warn!(
                    "Invalid FSM transition from {:?} with event {:?}",
                    old_state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{old_state:?}"),
                    requested: format!("{event:?}"),
                });
            }
        };

        info!(
            "FSM state transition: {:?} -> {:?} (event: {:?})",
            old_state, new_state, event
        );
        self.state = new_state;
        Ok(())
    }
}

impl Default for RequestStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
