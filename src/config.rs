use std::path::{Path, PathBuf};
use log::debug;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::storage::{read_json, sibling_path, write_json_atomic};
use crate::theme::Theme;

pub const SETTINGS_FILE: &str = "settings.json";

/// User preferences stored in `settings.json` next to the task database.
///
/// Fields missing from the file take their defaults, so older files keep
/// loading as settings are added.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    /// Whether the (simulated) calendar sync is switched on.
    pub calendar_connected: bool,
    /// Addressee of reward request messages.
    pub partner_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            theme: Theme::Normal,
            calendar_connected: false,
            partner_name: "love".to_string(),
        }
    }
}

impl Settings {
    pub fn path_for(db_path: &Path) -> PathBuf {
        sibling_path(db_path, SETTINGS_FILE)
    }

    /// Loads settings, or defaults if the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        let settings: Settings = read_json(path)?.unwrap_or_default();
        debug!("event=settings_load path={}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_atomic(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let s: Settings = serde_json::from_str(r#"{"theme":"horror"}"#).unwrap();
        assert_eq!(s.theme, Theme::Horror);
        assert!(!s.calendar_connected);
        assert_eq!(s.partner_name, "love");
    }

    #[test]
    fn settings_live_next_to_the_database() {
        let p = Settings::path_for(Path::new("/data/remindme/tasks.json"));
        assert_eq!(p, PathBuf::from("/data/remindme/settings.json"));
    }
}
