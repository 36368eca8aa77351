use super::Theme;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<Theme>,
    // Keys written by other tools survive a save.
    #[serde(flatten)]
    other: Map<String, Value>,
}

/// The persisted `theme` preference, kept in a small JSON file.
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored theme, or `None` when the file or key is absent.
    pub async fn load(&self) -> Result<Option<Theme>> {
        Ok(self.read().await?.theme)
    }

    pub async fn save(&self, theme: Theme) -> Result<()> {
        let mut prefs = self.read().await.unwrap_or_else(|e| {
            warn!("Discarding unreadable preferences file: {}", e);
            Preferences::default()
        });
        prefs.theme = Some(theme);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_string_pretty(&prefs)?;
        tokio::fs::write(&self.path, body).await?;

        debug!("Saved theme '{}' to {}", theme, self.path.display());
        Ok(())
    }

    /// Stored theme if there is one, otherwise `fallback`. Read errors are
    /// logged and treated as "no preference".
    pub async fn resolve(&self, fallback: Theme) -> Theme {
        match self.load().await {
            Ok(Some(theme)) => theme,
            Ok(None) => fallback,
            Err(e) => {
                warn!(
                    "Failed to read theme preference from {}, using {}: {}",
                    self.path.display(),
                    fallback,
                    e
                );
                fallback
            }
        }
    }

    /// Flips `current`, persists the result and returns it.
    pub async fn toggle(&self, current: Theme) -> Result<Theme> {
        let next = current.toggled();
        self.save(next).await?;
        info!("Theme switched: {} -> {}", current, next);
        Ok(next)
    }

    async fn read(&self) -> Result<Preferences> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(body) if body.trim().is_empty() => Ok(Preferences::default()),
            Ok(body) => Ok(serde_json::from_str(&body)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Preferences::default()),
            Err(e) => Err(e.into()),
        }
    }
}
