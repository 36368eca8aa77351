use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use thiserror::Error;

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Successful reply from `POST /chat`. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Why a call to the chat backend did not produce a reply.
///
/// `Display` yields the bare reason, which is embedded verbatim into the
/// assistant message the user sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never got an HTTP response (refused, DNS, reset...).
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("API error: {status}{}", reason_suffix(.reason))]
    Status { status: u16, reason: String },

    /// The body was not JSON or had no `response` string.
    #[error("{0}")]
    Decode(String),
}

impl GatewayError {
    /// Flattens a reqwest error and its causes into one line.
    pub fn transport(err: reqwest::Error) -> Self {
        let mut reason = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !reason.contains(&text) {
                reason.push_str(": ");
                reason.push_str(&text);
            }
            source = cause.source();
        }
        Self::Transport(reason)
    }

    pub fn status(code: reqwest::StatusCode) -> Self {
        Self::Status {
            status: code.as_u16(),
            reason: code.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

fn reason_suffix(reason: &str) -> String {
    if reason.is_empty() {
        String::new()
    } else {
        format!(" {reason}")
    }
}
