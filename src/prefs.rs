//! Durable preference storage
//!
//! Exactly one preference survives a session: the theme. It is kept as a
//! tiny JSON document under the user config directory. Missing, unreadable
//! or malformed state reads as "nothing stored" - never an error.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::theme::ThemeMode;

/// The persisted document. A struct (not a bare string) so future keys can
/// be added without a format break.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
}

/// Storage for the theme preference.
///
/// Injected into the theme controller so tests can substitute an in-memory
/// store instead of touching the filesystem.
pub trait PreferenceStore {
    /// The stored theme, or `None` if the user never chose one
    fn load_theme(&self) -> Option<ThemeMode>;
    /// Persist the theme; failures are swallowed (logged by implementations)
    fn store_theme(&mut self, mode: ThemeMode);
}

/// File-backed store under `<config dir>/termfolio/preferences.json`
pub struct FilePreferences {
    path: Option<PathBuf>,
}

impl FilePreferences {
    pub fn new() -> Self {
        Self {
            path: dirs::config_dir().map(|d| d.join("termfolio").join("preferences.json")),
        }
    }

    /// Store rooted at an explicit path (used by tests)
    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    fn read(&self) -> PrefsFile {
        let Some(path) = &self.path else {
            return PrefsFile::default();
        };
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }
}

impl Default for FilePreferences {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for FilePreferences {
    fn load_theme(&self) -> Option<ThemeMode> {
        self.read().theme.as_deref().and_then(ThemeMode::parse)
    }

    fn store_theme(&mut self, mode: ThemeMode) {
        let Some(path) = &self.path else {
            return;
        };

        let mut file = self.read();
        file.theme = Some(mode.as_str().to_string());

        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(&file)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(path, json)
        })();

        if let Err(err) = result {
            tracing::warn!("failed to persist theme preference: {}", err);
        }
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    theme: Option<ThemeMode>,
}

impl PreferenceStore for MemoryPreferences {
    fn load_theme(&self) -> Option<ThemeMode> {
        self.theme
    }

    fn store_theme(&mut self, mode: ThemeMode) {
        self.theme = Some(mode);
    }
}
