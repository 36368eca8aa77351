use anyhow::Result;
use parley::{
    config,
    gateway::HttpChatBackend,
    session::ChatSession,
    theme::{Theme, ThemeStore},
    ui::App,
};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // Logs go to stderr so they stay out of the transcript
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Starting parley with log level: {}", log_level);

    let backend = HttpChatBackend::new(&config.api)?;
    info!("Chat backend: {}", backend.base_url());

    let themes = ThemeStore::new(&config.preferences.path);
    let theme = themes.resolve(Theme::system_preference()).await;
    info!("Theme: {} (preferences at {})", theme, themes.path().display());

    let session = ChatSession::new(Arc::new(backend));
    let mut app = App::new(session, theme, themes);

    let mut stdout = std::io::stdout();
    app.run(BufReader::new(tokio::io::stdin()), &mut stdout)
        .await?;

    Ok(())
}
