//! Player settings
//!
//! Startup parameters read from `settings.xml` in the user config directory.
//! The file is optional and read-only: the player never writes it back.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use quick_xml::de::from_str;
use serde::Deserialize;
use thiserror::Error;

use crate::playback::{PlaybackSpeed, BASE_TICK_INTERVAL};

/// Video played when nothing else is configured
pub const DEFAULT_VIDEO_PATH: &str = "sssfj.mp4";

/// Default window title
pub const DEFAULT_WINDOW_TITLE: &str = "Pseudo-3D Player";

/// Errors from loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings XML: {0}")]
    XmlParse(#[from] quick_xml::DeError),
}

fn default_video_path() -> String {
    DEFAULT_VIDEO_PATH.to_string()
}

fn default_window_title() -> String {
    DEFAULT_WINDOW_TITLE.to_string()
}

fn default_base_interval_ms() -> u64 {
    BASE_TICK_INTERVAL.as_millis() as u64
}

fn default_initial_speed() -> usize {
    PlaybackSpeed::default().index()
}

/// Player settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename = "Pseudo3dPlayerSettings")]
pub struct PlayerSettings {
    /// Video file to loop
    #[serde(rename = "videoPath", default = "default_video_path")]
    pub video_path: String,

    /// Main window title
    #[serde(rename = "windowTitle", default = "default_window_title")]
    pub window_title: String,

    /// Tick interval at 1.0x, in milliseconds
    #[serde(rename = "baseIntervalMs", default = "default_base_interval_ms")]
    pub base_interval_ms: u64,

    /// Speed selector index at startup (0 = 0.5x ... 6 = 3.0x)
    #[serde(rename = "initialSpeed", default = "default_initial_speed")]
    pub initial_speed: usize,

    /// Write logs to a file as well as the console
    #[serde(rename = "logToFile", default)]
    pub log_to_file: bool,

    /// Emit console logs as JSON
    #[serde(rename = "logJson", default)]
    pub log_json: bool,

    /// Log file path (used with `logToFile`)
    #[serde(rename = "logFile", default)]
    pub log_file: Option<String>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            video_path: default_video_path(),
            window_title: default_window_title(),
            base_interval_ms: default_base_interval_ms(),
            initial_speed: default_initial_speed(),
            log_to_file: false,
            log_json: false,
            log_file: None,
        }
    }
}

impl PlayerSettings {
    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("Pseudo3dPlayer");
            p.push("settings.xml");
            p
        })
    }

    /// Load settings from the config directory
    ///
    /// A missing file (or no config directory at all) yields defaults.
    pub fn load() -> Result<Self, SettingsError> {
        match Self::settings_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load settings from an XML file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        Self::from_xml(&contents)
    }

    /// Parse settings from XML text
    pub fn from_xml(xml: &str) -> Result<Self, SettingsError> {
        let mut settings: Self = from_str(xml)?;
        settings.normalize();
        Ok(settings)
    }

    /// Clamp values into their valid ranges
    fn normalize(&mut self) {
        self.base_interval_ms = self.base_interval_ms.max(1);
        if PlaybackSpeed::from_index(self.initial_speed).is_none() {
            self.initial_speed = default_initial_speed();
        }
    }

    /// Apply command-line arguments (program name already skipped).
    /// The first positional argument replaces the video path.
    pub fn apply_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(path) = args.into_iter().next() {
            self.video_path = path.into();
        }
    }

    /// Tick interval at 1.0x
    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_interval_ms)
    }

    /// Speed at startup
    pub fn initial_speed(&self) -> PlaybackSpeed {
        PlaybackSpeed::from_index(self.initial_speed).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PlayerSettings::default();
        assert_eq!(settings.video_path, "sssfj.mp4");
        assert_eq!(settings.base_interval(), Duration::from_millis(30));
        assert_eq!(settings.initial_speed(), PlaybackSpeed::Normal);
        assert!(!settings.log_to_file);
        assert!(!settings.log_json);
    }

    #[test]
    fn test_parse_full() {
        let xml = r#"<Pseudo3dPlayerSettings>
            <videoPath>/tmp/clip.mp4</videoPath>
            <windowTitle>Edges</windowTitle>
            <baseIntervalMs>40</baseIntervalMs>
            <initialSpeed>5</initialSpeed>
            <logToFile>true</logToFile>
            <logJson>true</logJson>
            <logFile>/tmp/player.log</logFile>
        </Pseudo3dPlayerSettings>"#;

        let settings = PlayerSettings::from_xml(xml).unwrap();
        assert_eq!(settings.video_path, "/tmp/clip.mp4");
        assert_eq!(settings.window_title, "Edges");
        assert_eq!(settings.base_interval(), Duration::from_millis(40));
        assert_eq!(settings.initial_speed(), PlaybackSpeed::Double);
        assert!(settings.log_to_file);
        assert!(settings.log_json);
        assert_eq!(settings.log_file.as_deref(), Some("/tmp/player.log"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let xml = "<Pseudo3dPlayerSettings><videoPath>a.mkv</videoPath></Pseudo3dPlayerSettings>";
        let settings = PlayerSettings::from_xml(xml).unwrap();
        assert_eq!(settings.video_path, "a.mkv");
        assert_eq!(settings.window_title, DEFAULT_WINDOW_TITLE);
        assert_eq!(settings.base_interval_ms, 30);
        assert_eq!(settings.initial_speed, 2);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let xml = "<Pseudo3dPlayerSettings><baseIntervalMs>0</baseIntervalMs><initialSpeed>12</initialSpeed></Pseudo3dPlayerSettings>";
        let settings = PlayerSettings::from_xml(xml).unwrap();
        assert_eq!(settings.base_interval_ms, 1);
        assert_eq!(settings.initial_speed(), PlaybackSpeed::Normal);
    }

    #[test]
    fn test_invalid_xml_is_an_error() {
        let result = PlayerSettings::from_xml("<Pseudo3dPlayerSettings><baseIntervalMs>fast</baseIntervalMs></Pseudo3dPlayerSettings>");
        assert!(matches!(result, Err(SettingsError::XmlParse(_))));
    }

    #[test]
    fn test_args_override_video_path() {
        let mut settings = PlayerSettings::default();
        settings.apply_args(Vec::<String>::new());
        assert_eq!(settings.video_path, DEFAULT_VIDEO_PATH);

        settings.apply_args(["other.mp4", "ignored"]);
        assert_eq!(settings.video_path, "other.mp4");
    }
}
