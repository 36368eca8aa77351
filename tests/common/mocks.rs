use async_trait::async_trait;
use parley::gateway::{ChatBackend, GatewayError, GatewayResult};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock chat backend that replays scripted outcomes in order
#[derive(Debug, Clone)]
pub struct MockChatBackend {
    pub replies: Arc<Mutex<VecDeque<GatewayResult<String>>>>,
    pub requests: Arc<Mutex<Vec<String>>>,
    pub healthy: bool,
}

impl MockChatBackend {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            healthy: true,
        }
    }

    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
        self
    }

    pub fn with_error(self, error: GatewayError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    pub fn get_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn send(&self, message: &str) -> GatewayResult<String> {
        self.requests.lock().unwrap().push(message.to_string());

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("No more mock replies available".to_string())))
    }

    async fn health(&self) -> GatewayResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(GatewayError::Transport("connection refused".to_string()))
        }
    }
}

impl Default for MockChatBackend {
    fn default() -> Self {
        Self::new()
    }
}
