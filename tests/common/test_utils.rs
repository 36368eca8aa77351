use parley::{
    config::ApiConfig,
    gateway::HttpChatBackend,
    session::ChatSession,
    theme::{Theme, ThemeStore},
    ui::App,
};
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Marker every failure reply starts with
pub const ERROR_INDICATOR: &str = "Sorry, I encountered an error";

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// HTTP backend pointed at a mock server
pub fn create_http_backend(server: &MockServer) -> HttpChatBackend {
    HttpChatBackend::new(&ApiConfig {
        base_url: server.uri(),
    })
    .expect("Failed to build HTTP backend")
}

/// Base URL on a local port with nothing listening
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{addr}")
}

/// HTTP backend whose connections are refused
pub fn create_unreachable_backend() -> HttpChatBackend {
    HttpChatBackend::new(&ApiConfig {
        base_url: unreachable_base_url(),
    })
    .expect("Failed to build HTTP backend")
}

/// Session over the HTTP backend
pub fn create_http_session(server: &MockServer) -> ChatSession {
    ChatSession::new(Arc::new(create_http_backend(server)))
}

/// Theme store inside `dir`
pub fn create_theme_store(dir: &TempDir) -> ThemeStore {
    ThemeStore::new(dir.path().join("preferences.json"))
}

/// App with a light theme and preferences inside `dir`
pub fn create_test_app(session: ChatSession, dir: &TempDir) -> App {
    App::new(session, Theme::Light, create_theme_store(dir))
}

/// Mount a healthy `/health` endpoint
pub async fn mount_health(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy"
        })))
        .mount(server)
        .await;
}

/// Remove ANSI escape sequences so assertions can look at plain text
pub fn strip_ansi(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if chars.peek() == Some(&'[') {
                chars.next();
                // CSI: parameters until a final byte in '@'..='~'
                for next in chars.by_ref() {
                    if ('@'..='~').contains(&next) {
                        break;
                    }
                }
            }
            continue;
        }
        plain.push(c);
    }
    plain
}
