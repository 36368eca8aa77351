mod client;
mod types;

pub use client::{ChatBackend, HttpChatBackend};
pub use types::{ChatRequest, ChatResponse, GatewayError, GatewayResult};
