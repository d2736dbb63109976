use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Base URL of the hosted data platform, e.g. `https://xyz.example.co`.
    #[serde(default)]
    pub store_url: String,
    /// Public API key issued by the platform.
    #[serde(default)]
    pub store_api_key: String,
    /// Bearer token of the signed-in user. Falls back to the API key when
    /// absent, which the platform treats as an anonymous session.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Identity of the signed-in user; profile and role lookups key on it.
    #[serde(default)]
    pub user_id: Option<String>,
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Enable toast notifications in the UI.
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Duration of toast notifications in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
    /// Last known window size. If absent, a default size is used.
    #[serde(default)]
    pub window_size: Option<(f32, f32)>,
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    4.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_url: String::new(),
            store_api_key: String::new(),
            access_token: None,
            user_id: None,
            debug_logging: false,
            enable_toasts: default_toasts(),
            toast_duration: default_toast_duration(),
            window_size: None,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
