use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::brush::{DEFAULT_BRUSH_SIZE, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::color::Color;
use crate::export::{self, DEFAULT_EXPORT_FILE_NAME};

/// Environment variable naming an optional JSON settings file
pub const CONFIG_ENV_VAR: &str = "FREEHAND_CANVAS_CONFIG";

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Brush size {0} is outside {min}..={max}", min = MIN_BRUSH_SIZE, max = MAX_BRUSH_SIZE)]
    InvalidBrushSize(u32),

    #[error("Invalid export file name: {0:?}")]
    InvalidFileName(String),
}

/// Result type for settings operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Start-up settings for the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct CanvasSettings {
    pub background_color: Color,
    pub brush_color: Color,
    pub brush_size: u32,
    pub export_file_name: String,
    /// Where native builds save exports. `None` means the download directory.
    pub export_dir: Option<PathBuf>,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            background_color: Color::WHITE,
            brush_color: Color::BLACK,
            brush_size: DEFAULT_BRUSH_SIZE,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_owned(),
            export_dir: None,
        }
    }
}

impl CanvasSettings {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load the file named by [`CONFIG_ENV_VAR`], or the defaults when it is unset
    pub fn from_env() -> ConfigResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).contains(&self.brush_size) {
            return Err(ConfigError::InvalidBrushSize(self.brush_size));
        }
        export::validate_file_name(&self.export_file_name)
            .map_err(|_| ConfigError::InvalidFileName(self.export_file_name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CanvasSettings::default();
        assert_eq!(settings.background_color, Color::WHITE);
        assert_eq!(settings.brush_color, Color::BLACK);
        assert_eq!(settings.brush_size, 5);
        assert_eq!(settings.export_file_name, "drawing.png");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            CanvasSettings::from_json_str(r##"{ "brush_color": "#ff0000", "brush_size": 12 }"##)
                .unwrap();
        assert_eq!(settings.brush_color, Color::rgb(255, 0, 0));
        assert_eq!(settings.brush_size, 12);
        assert_eq!(settings.background_color, Color::WHITE);
    }

    #[test]
    fn test_rejects_out_of_range_brush() {
        let err = CanvasSettings::from_json_str(r#"{ "brush_size": 21 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBrushSize(21)));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            CanvasSettings::from_json_str(r#"{ "export_file_name": "a/b.png" }"#),
            Err(ConfigError::InvalidFileName(_))
        ));
        assert!(matches!(
            CanvasSettings::from_json_str(r#"{ "background_color": "white" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CanvasSettings::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }
}
