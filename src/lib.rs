//! BinSmart: classify a photo of waste into the right disposal bin.
//!
//! The user supplies one image (from a file or a camera capture command),
//! the image is sent to a remote classification service, and a result is
//! shown only when the service is confident enough. Below the threshold the
//! user gets an advisory instead of a possibly wrong bin.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal binary (main.rs) + Runtime (runtime.rs)   │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action emission                                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Input Layer   │   │ Worker Layer  │
//! │ (ui/,         │   │ (input/)      │   │ (worker/,     │
//! │  presenter/)  │   │ - Capture     │   │  client/)     │
//! │ - Rendering   │   │ - Validation  │   │ - HTTP call   │
//! │ - Theming     │   │ - Previews    │   │ - Gating      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Errors, assets, outcomes (domain/)               │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing to a rotating log file                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Classification state machine with event/action model
//! - [`client`]: Multipart HTTP client for the classification service
//! - [`domain`]: Assets, responses, outcomes and errors
//! - [`infrastructure`]: Platform paths
//! - [`input`]: Image acquisition, validation and preview storage
//! - [`presenter`]: Display data for accepted results
//! - [`runtime`]: Executes actions and feeds worker responses back in
//! - [`ui`]: Terminal rendering with theme support
//! - [`worker`]: Background thread for the network call
//! - [`observability`]: Logging setup
//!
//! # Configuration
//!
//! `binsmart/config.toml` in the platform config directory (`~/.config` on
//! Linux), every key optional:
//!
//! ```toml
//! endpoint = "https://waste-backend.onrender.com/predict"
//! request_timeout_secs = 60
//! max_image_bytes = 10485760
//! file_picker_command = ["zenity", "--file-selection"]  # default: native dialog
//! camera_command = ["fswebcam", "--no-banner", "-"]
//! trace_level = "debug"
//! color = true
//! theme_file = "~/.config/binsmart/theme.toml"
//! ```
//!
//! # Example
//!
//! ```rust
//! use binsmart::{handle_event, AppState, Event};
//!
//! let mut state = AppState::new();
//! let err = handle_event(&mut state, Event::Submit).unwrap_err();
//! assert_eq!(err.user_message(), "Please select an image first");
//! ```

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod input;
pub mod observability;
pub mod presenter;
pub mod runtime;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, Phase};
pub use domain::{BinSmartError, Outcome, Result};
pub use runtime::Runtime;
pub use ui::Theme;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Default classification endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://waste-backend.onrender.com/predict";

/// Largest accepted image, 10 MiB.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Runtime configuration.
///
/// Layered lowest to highest: defaults, TOML file, string overrides
/// ([`Config::merge_map`]), command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL the image is POSTed to.
    pub endpoint: String,

    /// Whole-request timeout. Default: 60
    pub request_timeout_secs: u64,

    /// Images larger than this are rejected before upload.
    pub max_image_bytes: usize,

    /// Command that prints the chosen file's path on stdout.
    ///
    /// Empty, the default, uses the native open dialog.
    pub file_picker_command: Vec<String>,

    /// Command that writes a captured JPEG or PNG to stdout.
    ///
    /// Empty disables the `camera` command.
    pub camera_command: Vec<String>,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Emit ANSI colors.
    pub color: bool,

    /// Path to a custom TOML theme file. See [`ui::theme`] for format.
    pub theme_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: 60,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            file_picker_command: vec![],
            camera_command: vec![],
            trace_level: None,
            color: true,
            theme_file: None,
        }
    }
}

impl Config {
    /// Parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`BinSmartError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BinSmartError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| BinSmartError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Loads the configuration file.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used when present and defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`BinSmartError::Config`] for unreadable or invalid files.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let default_path = infrastructure::default_config_file();
        if default_path.is_file() {
            tracing::debug!(path = %default_path.display(), "loading configuration");
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Builds a configuration from string key/value pairs over the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use binsmart::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("request_timeout_secs".to_string(), "15".to_string());
    /// map.insert("camera_command".to_string(), "fswebcam --no-banner -".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.request_timeout_secs, 15);
    /// assert_eq!(config.camera_command, vec!["fswebcam", "--no-banner", "-"]);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().merge_map(map)
    }

    /// Overrides fields present in `map`.
    ///
    /// # Parsing Rules
    ///
    /// - numbers that fail to parse keep the current value
    /// - commands split on whitespace; an empty string disables the command
    /// - `color` accepts `true/false`, `1/0`, `yes/no`, `on/off`
    /// - unknown keys are ignored
    #[must_use]
    pub fn merge_map(mut self, map: &BTreeMap<String, String>) -> Self {
        if let Some(endpoint) = map.get("endpoint").filter(|s| !s.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }

        if let Some(secs) = map
            .get("request_timeout_secs")
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            self.request_timeout_secs = secs;
        }

        if let Some(bytes) = map
            .get("max_image_bytes")
            .and_then(|s| s.trim().parse::<usize>().ok())
        {
            self.max_image_bytes = bytes;
        }

        if let Some(command) = map.get("file_picker_command") {
            self.file_picker_command = split_command(command);
        }

        if let Some(command) = map.get("camera_command") {
            self.camera_command = split_command(command);
        }

        if let Some(level) = map.get("trace_level") {
            self.trace_level = Some(level.clone());
        }

        if let Some(color) = map.get("color").and_then(|s| parse_flag(s)) {
            self.color = color;
        }

        if let Some(theme_file) = map.get("theme_file") {
            self.theme_file = Some(theme_file.clone());
        }

        self
    }

    /// Resolves the theme, falling back to the built-in one.
    #[must_use]
    pub fn theme(&self) -> Theme {
        let theme = self.theme_file.as_ref().map_or_else(Theme::default, |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme, using default");
                Theme::default()
            })
        });

        if self.color {
            theme
        } else {
            theme.without_color()
        }
    }
}

fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(String::from).collect()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.max_image_bytes, 10 * 1024 * 1024);
        assert!(config.camera_command.is_empty());
        assert!(config.color);
    }

    #[test]
    fn toml_file_overrides_only_given_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
endpoint = "http://127.0.0.1:9000/predict"
camera_command = ["fswebcam", "-"]
color = false
"#,
        )
        .expect("write config");

        let config = Config::load(Some(&path)).expect("load");
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/predict");
        assert_eq!(config.camera_command, vec!["fswebcam", "-"]);
        assert!(!config.color);
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "request_timeout_secs = \"soon\"").expect("write config");

        let err = Config::load(Some(&path)).expect_err("invalid");
        assert!(matches!(err, BinSmartError::Config(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn map_values_fall_back_on_parse_errors() {
        let config = Config::from_map(&map(&[
            ("request_timeout_secs", "soon"),
            ("max_image_bytes", "2048"),
            ("color", "maybe"),
        ]));
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.max_image_bytes, 2048);
        assert!(config.color);
    }

    #[test]
    fn blank_command_falls_back_to_empty() {
        let config = Config::from_map(&map(&[("file_picker_command", "  ")]));
        assert!(config.file_picker_command.is_empty());
    }

    #[test]
    fn file_picker_defaults_to_native_dialog() {
        let config = Config::default();
        assert!(config.file_picker_command.is_empty());
        assert!(config.camera_command.is_empty());

        let scripted = Config::from_map(&map(&[("file_picker_command", "zenity --file-selection")]));
        assert_eq!(scripted.file_picker_command, vec!["zenity", "--file-selection"]);
    }

    #[test]
    fn merge_keeps_earlier_layers() {
        let base = Config {
            endpoint: "http://file.example/predict".into(),
            ..Config::default()
        };
        let merged = base.merge_map(&map(&[("color", "off"), ("trace_level", "debug")]));
        assert_eq!(merged.endpoint, "http://file.example/predict");
        assert!(!merged.color);
        assert_eq!(merged.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn color_flag_controls_theme() {
        let config = Config {
            color: false,
            ..Config::default()
        };
        assert!(!config.theme().is_enabled());
        assert!(Config::default().theme().is_enabled());
    }

    #[test]
    fn unreadable_theme_falls_back_to_default() {
        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".into()),
            ..Config::default()
        };
        assert_eq!(config.theme().name, "binsmart");
    }
}
