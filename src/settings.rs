//! User settings stored as settings.json in the app data directory

use crate::constants::*;
use crate::daily::DailyRange;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // API
    pub api_base_url: String,
    pub search_result_limit: usize,

    // Reveal
    pub initial_resolution: u32,
    pub resolution_step: u32,

    // Daily selection
    pub daily_id_base: u32,
    pub daily_id_span: u32,
    pub max_daily_attempts: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            api_base_url: API_BASE_URL.to_string(),
            search_result_limit: SEARCH_RESULT_LIMIT,
            initial_resolution: INITIAL_RESOLUTION,
            resolution_step: RESOLUTION_STEP,
            daily_id_base: DAILY_ID_BASE,
            daily_id_span: DAILY_ID_SPAN,
            max_daily_attempts: MAX_DAILY_ATTEMPTS,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    pub fn daily_range(&self) -> DailyRange {
        DailyRange::new(self.daily_id_base, self.daily_id_span)
    }

    pub fn api_base_url_or_default(&self) -> &str {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            API_BASE_URL
        } else {
            url
        }
    }

    pub fn search_limit(&self) -> usize {
        self.search_result_limit.clamp(1, 80)
    }

    pub fn daily_attempts(&self) -> u32 {
        self.max_daily_attempts.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.initial_resolution, INITIAL_RESOLUTION);
        assert_eq!(settings.api_base_url_or_default(), API_BASE_URL);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"resolution_step": 3, "daily_id_span": 0}"#,
        )
        .unwrap();
        let settings = Settings::load(dir.path());
        assert_eq!(settings.resolution_step, 3);
        assert_eq!(settings.search_result_limit, SEARCH_RESULT_LIMIT);
        assert_eq!(settings.daily_range().span, 1);
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        assert_eq!(Settings::load(dir.path()).daily_id_base, DAILY_ID_BASE);
    }

    #[test]
    fn saved_window_geometry_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            window_w: Some(900.0),
            api_base_url: "  ".into(),
            search_result_limit: 0,
            ..Settings::default()
        };
        settings.save(dir.path());

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.window_w, Some(900.0));
        assert_eq!(loaded.api_base_url_or_default(), API_BASE_URL);
        assert_eq!(loaded.search_limit(), 1);
    }
}
