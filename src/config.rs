use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color;
use crate::state::DEFAULT_STORAGE_KEY;
use crate::tool::{DEFAULT_BRUSH_SIZE, ERASER_SIZE};

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "SKETCH_PAINT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Application settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    /// Height reserved for the toolbar; the canvas takes the rest of the viewport
    pub toolbar_height: f32,
    pub default_brush_size: u32,
    pub eraser_size: u32,
    #[serde(with = "color::hex")]
    pub brush_color: Color32,
    #[serde(with = "color::hex")]
    pub background_color: Color32,
    /// Seconds a status message stays before the label reverts
    pub status_revert_secs: f64,
    /// Storage slot of the saved drawing
    pub storage_key: String,
    /// Directory for the saved drawing (native builds)
    pub storage_dir: PathBuf,
    /// Directory the downloaded image is written to (native builds)
    pub export_dir: PathBuf,
    pub export_file_name: String,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            toolbar_height: 50.0,
            default_brush_size: DEFAULT_BRUSH_SIZE,
            eraser_size: ERASER_SIZE,
            brush_color: Color32::BLACK,
            background_color: Color32::WHITE,
            status_revert_secs: 2.0,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            storage_dir: PathBuf::from(".sketch_paint"),
            export_dir: PathBuf::from("."),
            export_file_name: "paint-file.jpeg".to_owned(),
        }
    }
}

impl PaintConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Read the file named by `SKETCH_PAINT_CONFIG`, falling back to defaults
    /// when the variable is unset or the file cannot be used.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded config from {}", Path::new(&path).display());
                config
            }
            Err(err) => {
                log::warn!("{}; using default settings", err);
                Self::default()
            }
        }
    }

    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(&self.export_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(PaintConfig::from_json("{}").unwrap(), PaintConfig::default());
    }

    #[test]
    fn partial_file_overrides_fields() {
        let config = PaintConfig::from_json(r##"{"background_color": "#0000ff", "eraser_size": 30}"##).unwrap();
        assert_eq!(config.background_color, Color32::from_rgb(0, 0, 255));
        assert_eq!(config.eraser_size, 30);
        assert_eq!(config.toolbar_height, 50.0);
        assert_eq!(config.storage_key, "savedCanvas");
    }

    #[test]
    fn bad_color_is_rejected() {
        assert!(PaintConfig::from_json(r#"{"brush_color": "red"}"#).is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = PaintConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn default_export_path() {
        assert_eq!(PaintConfig::default().export_path(), PathBuf::from("./paint-file.jpeg"));
    }
}
