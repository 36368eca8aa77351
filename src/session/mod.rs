mod controller;
pub mod fsm;

pub use controller::{ChatSession, Outcome, PendingRequest, error_reply};
pub use fsm::{RequestEvent, RequestState, RequestStateMachine};
