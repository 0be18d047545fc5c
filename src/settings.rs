//! Application settings loaded from a TOML file.
//!
//! Settings live at `<config dir>/quotedesk/settings.toml`. Every field has a
//! default, so a missing file — the common case on first run — and a malformed
//! file both fall back to [`AppSettings::default`], the latter with a warning
//! log. Settings are read once at startup.

use std::path::PathBuf;

use serde::Deserialize;

/// Directory name under the OS config/data dirs.
pub const APP_DIR: &str = "quotedesk";

/// Tunable application settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AppSettings {
    /// ISO currency code shown next to amounts.
    pub currency: String,
    /// Flat price captured when a service is added to a project.
    pub default_service_price: f64,
    /// Artificial delay for the simulated payment step, in milliseconds.
    pub payment_delay_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            default_service_price: 1000.0,
            payment_delay_ms: 1500,
        }
    }
}

/// Parse settings from TOML text.
pub fn parse(text: &str) -> Result<AppSettings, toml::de::Error> {
    toml::from_str(text)
}

/// Path of the settings file, if a config dir exists on this platform.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("settings.toml"))
}

/// Load settings from disk, falling back to defaults.
///
/// Absence is silent (first run); a malformed file is logged at warn so a
/// hand-edited typo does not go unnoticed.
pub fn load() -> AppSettings {
    let Some(path) = settings_path() else {
        return AppSettings::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(text) => match parse(&text) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "malformed settings file, using defaults");
                AppSettings::default()
            }
        },
        Err(_) => AppSettings::default(),
    }
}
