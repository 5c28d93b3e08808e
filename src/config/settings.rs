//! Configuration settings for Sweepy.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `SWEEPY__API__BASE_URL`.
const ENV_PREFIX: &str = "SWEEPY";
const ENV_SEPARATOR: &str = "__";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
    /// Theme configuration.
    pub theme: ThemeConfig,
}

impl Config {
    /// Load configuration from the default location, falling back to defaults.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration.
    ///
    /// Sources, later ones winning: built-in defaults, `config.toml` in the
    /// config directory (optional), the explicit `path` (required when
    /// given), then `SWEEPY__SECTION__KEY` environment variables.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Self::default())?);

        if let Ok(dir) = super::config_dir() {
            builder = builder.add_source(
                ::config::File::from(dir.join("config.toml"))
                    .format(::config::FileFormat::Toml)
                    .required(false),
            );
        }

        if let Some(path) = path {
            builder = builder.add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(true),
            );
        }

        let config = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults.
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::config(e.to_string()))
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<&Path>) -> crate::Result<()> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => super::config_dir()?.join("config.toml"),
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

/// API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum retries for failed GET requests.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub retry_backoff_ms: u64,
    /// Rate limit (requests per second).
    pub rate_limit: u32,
    /// List closed sweepstakes on the home view.
    pub include_closed: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
            max_retries: 2,
            retry_backoff_ms: 250,
            rate_limit: 10,
            include_closed: false,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Enable mouse support.
    pub mouse_support: bool,
    /// Show status bar.
    pub show_status_bar: bool,
    /// Auto-refresh interval for an open sweepstake, in seconds (0 to disable).
    pub auto_refresh_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            mouse_support: true,
            show_status_bar: true,
            auto_refresh_secs: 0,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Select/confirm.
    pub select: String,
    /// Cancel/back.
    pub back: String,
    /// Switch to the sweepstakes list.
    pub home: String,
    /// Switch to the create form.
    pub create: String,
    /// Switch to the search form.
    pub search: String,
    /// Start editing the focused field.
    pub edit: String,
    /// Refresh the open sweepstake.
    pub refresh: String,
    /// Close the open sweepstake.
    pub close: String,
    /// Confirm closing.
    pub confirm: String,
    /// Sort by the focused column.
    pub sort: String,
    /// Switch between the participant and leaderboard tables.
    pub switch_tab: String,
    /// Open the event type / market picker.
    pub picker: String,
    /// Add a participant field.
    pub add_participant: String,
    /// Remove the focused participant field.
    pub remove_participant: String,
    /// Submit the focused form.
    pub submit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            home: "1".to_string(),
            create: "2".to_string(),
            search: "3".to_string(),
            edit: "i".to_string(),
            refresh: "r".to_string(),
            close: "x".to_string(),
            confirm: "y".to_string(),
            sort: "s".to_string(),
            switch_tab: "Tab".to_string(),
            picker: "Ctrl+e".to_string(),
            add_participant: "Ctrl+n".to_string(),
            remove_participant: "Ctrl+d".to_string(),
            submit: "Ctrl+s".to_string(),
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Primary color (hex).
    pub primary: String,
    /// Accent color (hex).
    pub accent: String,
    /// Success color (hex).
    pub success: String,
    /// Warning color (hex).
    pub warning: String,
    /// Error color (hex).
    pub error: String,
    /// Foreground/text color (hex).
    pub foreground: String,
    /// Muted text color (hex).
    pub muted: String,
    /// Border color (hex).
    pub border: String,
    /// Selection/highlight color (hex).
    pub selection: String,
    /// History chart line colors (hex), cycled per participant.
    pub chart: Vec<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: "#5c6bc0".to_string(),
            accent: "#ff7043".to_string(),
            success: "#66bb6a".to_string(),
            warning: "#ffa726".to_string(),
            error: "#ef5350".to_string(),
            foreground: "#cdd6f4".to_string(),
            muted: "#9399b2".to_string(),
            border: "#45475a".to_string(),
            selection: "#585b70".to_string(),
            chart: Vec::new(),
        }
    }
}

/// Theme with colors resolved for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub selection: Color,
    /// Empty when the built-in chart palette should be used.
    pub chart: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from(&ThemeConfig::default())
    }
}

impl From<&ThemeConfig> for Theme {
    fn from(config: &ThemeConfig) -> Self {
        let resolve = |hex: &str, fallback: Color| parse_hex_color(hex).unwrap_or(fallback);
        Self {
            primary: resolve(&config.primary, Color::Cyan),
            accent: resolve(&config.accent, Color::Yellow),
            success: resolve(&config.success, Color::Green),
            warning: resolve(&config.warning, Color::Yellow),
            error: resolve(&config.error, Color::Red),
            foreground: resolve(&config.foreground, Color::White),
            muted: resolve(&config.muted, Color::DarkGray),
            border: resolve(&config.border, Color::Gray),
            selection: resolve(&config.selection, Color::DarkGray),
            chart: config
                .chart
                .iter()
                .filter_map(|hex| parse_hex_color(hex))
                .collect(),
        }
    }
}

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [api]
            base_url = "http://sweepy.internal:9000"
            max_retries = 0

            [ui]
            auto_refresh_secs = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://sweepy.internal:9000");
        assert_eq!(config.api.max_retries, 0);
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.ui.auto_refresh_secs, 60);
        assert_eq!(config.keybindings, KeyBindings::default());
    }

    #[test]
    fn test_save_then_load_explicit_path() {
        let path = std::env::temp_dir().join(format!("sweepy-config-{}.toml", std::process::id()));
        let mut config = Config::default();
        config.api.rate_limit = 3;
        config.theme.chart = vec!["#112233".to_string()];
        config.save(Some(&path)).unwrap();

        let loaded = Config::load(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.api.rate_limit, 3);
        assert_eq!(loaded.theme.chart, vec!["#112233"]);
    }

    #[test]
    fn test_missing_explicit_path_fails() {
        let path = std::env::temp_dir().join("sweepy-definitely-missing.toml");
        assert!(matches!(
            Config::load(Some(path)),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_hex_color("#ff7043"), Some(Color::Rgb(0xff, 0x70, 0x43)));
        assert_eq!(parse_hex_color("66bb6a"), Some(Color::Rgb(0x66, 0xbb, 0x6a)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);

        let theme = Theme::from(&ThemeConfig {
            primary: "nonsense".to_string(),
            chart: vec!["#000000".to_string(), "bad".to_string()],
            ..Default::default()
        });
        assert_eq!(theme.primary, Color::Cyan);
        assert_eq!(theme.chart, vec![Color::Rgb(0, 0, 0)]);
    }
}
