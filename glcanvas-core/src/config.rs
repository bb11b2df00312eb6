//! Runtime configuration.
//!
//! The configuration is a JSON file. Every field is optional and falls back to its default,
//! and a missing file means "all defaults".

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Backend;

/// Longest accepted pause between two frames.
pub const MAX_FRAME_INTERVAL_MS: f32 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: Backend,
    pub window_width: u32,
    pub window_height: u32,
    /// Minimum time between two frames, in milliseconds.
    pub frame_interval_ms: f32,
    pub vsync: bool,
    /// Texture of the second panel, relative to the working directory.
    pub texture_path: PathBuf,
    /// Sample the texture through an offscreen copy instead of directly.
    pub offscreen_blit: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            window_width: 1000,
            window_height: 800,
            frame_interval_ms: 1.0 / 60.0 * 1000.0,
            vsync: true,
            texture_path: PathBuf::from("icons/icon1.png"),
            offscreen_blit: true,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "invalid config {}: frame_interval_ms must be between 0 and {MAX_FRAME_INTERVAL_MS}, got {value}",
        path.display()
    )]
    FrameInterval { path: PathBuf, value: f32 },
}

impl Config {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Reads the configuration at `path`, or the defaults if there is no file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let value = config.frame_interval_ms;
        if !(0.0..=MAX_FRAME_INTERVAL_MS).contains(&value) {
            return Err(ConfigError::FrameInterval {
                path: path.to_path_buf(),
                value,
            });
        }
        Ok(config)
    }

    /// The frame interval, clamped to `0..=MAX_FRAME_INTERVAL_MS`. Non-finite values give the
    /// maximum.
    pub fn frame_interval(&self) -> Duration {
        let millis = if self.frame_interval_ms.is_finite() {
            self.frame_interval_ms.clamp(0.0, MAX_FRAME_INTERVAL_MS)
        } else {
            MAX_FRAME_INTERVAL_MS
        };
        Duration::from_secs_f32(millis / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_json(r#"{ "backend": "gles3", "vsync": false }"#).unwrap();
        assert_eq!(config.backend, Backend::Gles3);
        assert!(!config.vsync);
        assert_eq!(config.window_width, 1000);
        assert_eq!(config.texture_path, PathBuf::from("icons/icon1.png"));
        assert!(config.offscreen_blit);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ backend: ").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));

        std::fs::write(&path, r#"{ "backend": "metal" }"#).unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_frame_interval() {
        let config = Config::default();
        let millis = config.frame_interval().as_secs_f32() * 1000.0;
        assert!((millis - 16.666).abs() < 0.01);

        let config = Config {
            frame_interval_ms: -3.0,
            ..Config::default()
        };
        assert_eq!(config.frame_interval(), Duration::ZERO);
    }

    #[test]
    fn test_out_of_range_frame_interval_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        std::fs::write(&path, r#"{ "frame_interval_ms": 1e39 }"#).unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::FrameInterval { value, .. } if value.is_infinite()));

        std::fs::write(&path, r#"{ "frame_interval_ms": -5 }"#).unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::FrameInterval { value, .. }) if value == -5.0
        ));

        std::fs::write(&path, r#"{ "frame_interval_ms": 1000 }"#).unwrap();
        assert_eq!(Config::load(&path).unwrap().frame_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_frame_interval_never_panics() {
        for value in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN, f32::MAX] {
            let config = Config {
                frame_interval_ms: value,
                ..Config::default()
            };
            assert!(config.frame_interval() <= Duration::from_secs(1), "{value}");
        }
    }
}
