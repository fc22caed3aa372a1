//! Logging setup
//!
//! One console layer (compact text or JSON) plus an optional plain-text file
//! layer written through a non-blocking tracing-appender worker.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*, Layer, Registry};

use crate::settings::PlayerSettings;

/// Log file used when file output is enabled without a path
const DEFAULT_LOG_FILE: &str = "pseudo3d_player.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Write to stderr
    pub console_enabled: bool,
    /// Emit console records as JSON instead of compact text
    pub json_format: bool,
    /// Also write to a file
    pub file_enabled: bool,
    /// File to write when `file_enabled`; defaults to `pseudo3d_player.log`
    pub file_path: Option<PathBuf>,
    /// Filter used when neither `PSEUDO3D_LOG` nor `RUST_LOG` is set
    pub default_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_enabled: true,
            json_format: false,
            file_enabled: false,
            file_path: None,
            default_level: "info".to_string(),
        }
    }
}

impl LogConfig {
    /// Build a logging config from player settings
    pub fn from_settings(settings: &PlayerSettings) -> Self {
        Self {
            json_format: settings.log_json,
            file_enabled: settings.log_to_file,
            file_path: settings.log_file.as_ref().map(PathBuf::from),
            ..Self::default()
        }
    }

    /// JSON console output, with `PSEUDO3D_LOG_FORMAT` overriding the configured choice
    fn json_requested(&self, format_env: Option<&str>) -> bool {
        match format_env {
            Some(format) => format.eq_ignore_ascii_case("json"),
            None => self.json_format,
        }
    }

    fn log_file(&self) -> PathBuf {
        self.file_path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }
}

fn console_layer(json: bool) -> BoxedLayer {
    if json {
        fmt::layer()
            .json()
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer().compact().with_writer(std::io::stderr).boxed()
    }
}

fn file_layer(path: &Path) -> std::io::Result<(BoxedLayer, WorkerGuard)> {
    let file = std::fs::File::create(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .boxed();
    Ok((layer, guard))
}

/// Install the global subscriber
///
/// Filter comes from `PSEUDO3D_LOG`, then `RUST_LOG`, then
/// `config.default_level`. `PSEUDO3D_LOG_FORMAT=json` forces JSON console
/// output. When file output is on, the returned guard must outlive all
/// logging so buffered records are flushed.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_env("PSEUDO3D_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(&config.default_level));

    let format_env = std::env::var("PSEUDO3D_LOG_FORMAT").ok();
    let json = config.json_requested(format_env.as_deref());

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.console_enabled {
        layers.push(console_layer(json));
    }

    let mut guard = None;
    let log_file = config.file_enabled.then(|| config.log_file());
    if let Some(path) = &log_file {
        let (layer, file_guard) = file_layer(path)?;
        layers.push(layer);
        guard = Some(file_guard);
    }

    tracing_subscriber::registry().with(layers).with(filter).try_init()?;

    tracing::debug!(json, log_file = ?log_file, "Log output configured");
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert!(config.console_enabled);
        assert!(!config.file_enabled);
        assert!(!config.json_format);
        assert_eq!(config.default_level, "info");
        assert_eq!(config.log_file(), PathBuf::from("pseudo3d_player.log"));
    }

    #[test]
    fn test_log_config_from_settings() {
        let settings = PlayerSettings {
            log_to_file: true,
            log_json: true,
            log_file: Some("/tmp/p3d.log".to_string()),
            ..PlayerSettings::default()
        };
        let config = LogConfig::from_settings(&settings);
        assert!(config.file_enabled);
        assert!(config.json_format);
        assert_eq!(config.log_file(), PathBuf::from("/tmp/p3d.log"));
        assert!(config.console_enabled);
    }

    #[test]
    fn test_format_env_overrides_settings() {
        let text = LogConfig::default();
        assert!(!text.json_requested(None));
        assert!(text.json_requested(Some("JSON")));

        let json = LogConfig {
            json_format: true,
            ..LogConfig::default()
        };
        assert!(json.json_requested(None));
        assert!(!json.json_requested(Some("text")));
    }
}
