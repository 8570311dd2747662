// User settings read from `~/.cushions_settings.json`.
// The file is optional and never written by the application: a missing
// file means defaults, a broken one means defaults plus a warning.

use crate::board::DEFAULT_UPLOAD_DELAY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const SETTINGS_FILE: &str = ".cushions_settings.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Simulated time spent on each card, in milliseconds.
    pub upload_delay_ms: u64,
    pub board_name: String,
    pub list_name: String,
    /// Cards are named `"{card_prefix} {n}"`.
    pub card_prefix: String,
    /// Folder the file dialog opens in.
    pub start_dir: Option<PathBuf>,
    /// Use the desktop file dialog instead of typing a path.
    pub native_picker: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            upload_delay_ms: DEFAULT_UPLOAD_DELAY.as_millis() as u64,
            board_name: "Proofreading Kanban 🌱".into(),
            list_name: "To Review 🌅".into(),
            card_prefix: "Note".into(),
            start_dir: None,
            native_picker: true,
        }
    }
}

impl Settings {
    /// Location of the settings file in the user's home directory.
    pub fn path() -> PathBuf {
        let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.join(SETTINGS_FILE)
    }

    /// Load settings from the default location.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Settings::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "could not read settings: {}", e);
                return Settings::default();
            }
        };
        match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring invalid settings: {}", e);
                Settings::default()
            }
        }
    }

    pub fn upload_delay(&self) -> Duration {
        Duration::from_millis(self.upload_delay_ms)
    }

    /// The configured start folder, if it still exists.
    pub fn start_directory(&self) -> Option<&Path> {
        self.start_dir.as_deref().filter(|dir| dir.is_dir())
    }
}
