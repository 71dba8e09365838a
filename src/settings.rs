//! Screensaver settings and preferences
//!
//! Stored as JSON: LocalStorage on the web, an optional file natively.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::ChannelRange;
use crate::consts::*;
use crate::sim::{ConfigError, RainConfig, RainPreset};

/// Failure to load or accept settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid rain configuration: {0}")]
    Rain(#[from] ConfigError),

    #[error("circle outlines need at least 3 segments (got {0})")]
    TooFewSegments(u32),
}

/// Screensaver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Look preset the rain config was derived from
    pub preset: RainPreset,
    /// Spawn and growth tuning
    pub rain: RainConfig,
    /// Milliseconds between simulation ticks
    pub frame_interval_ms: u64,
    /// Line segments per circle outline
    pub circle_segments: u32,
    /// Channel range requested from the color mapper
    pub color_range: ChannelRange,
    /// Log per-second frame statistics
    pub show_stats: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(RainPreset::default())
    }
}

impl Settings {
    /// Create settings from a preset (applies preset defaults)
    pub fn from_preset(preset: RainPreset) -> Self {
        Self {
            preset,
            rain: RainConfig::from_preset(preset),
            frame_interval_ms: FRAME_INTERVAL_MS,
            circle_segments: CIRCLE_SEGMENTS,
            color_range: ChannelRange::Unit,
            show_stats: false,
        }
    }

    /// Switch preset, replacing the rain config with the preset's defaults
    pub fn apply_preset(&mut self, preset: RainPreset) {
        self.preset = preset;
        self.rain = RainConfig::from_preset(preset);
    }

    /// Reject settings the simulation or renderer cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.rain.validate()?;
        if self.circle_segments < 3 {
            return Err(SettingsError::TooFewSegments(self.circle_segments));
        }
        Ok(())
    }

    /// Parse and validate settings JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Pretty JSON, the format `load_file` reads back
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "neon_rain_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.preset, RainPreset::Neon);
        assert_eq!(settings.rain.capacity, MAX_RINGS);
        assert_eq!(settings.frame_interval_ms, 50);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "frame_interval_ms": 30 }"#).unwrap();
        assert_eq!(settings.frame_interval_ms, 30);
        assert_eq!(settings.circle_segments, CIRCLE_SEGMENTS);
        assert_eq!(settings.rain, RainConfig::default());
    }

    #[test]
    fn test_json_roundtrip_keeps_preset() {
        let settings = Settings::from_preset(RainPreset::Classic);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let err = Settings::from_json(r#"{ "circle_segments": 2 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::TooFewSegments(2)));

        let err = Settings::from_json(r#"{ "rain": { "capacity": 0,
            "rain_intensity": 25,
            "outer_radius": { "min": 25, "max": 75 },
            "radius_gap": { "min": 25, "max": 50 },
            "inner_rate": { "min": 2, "max": 7 },
            "outer_divisor_pct": { "min": 101, "max": 126 },
            "closing_gap": true } }"#)
        .unwrap_err();
        assert!(matches!(err, SettingsError::Rain(ConfigError::ZeroCapacity)));

        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_oversized_geometry_rejected() {
        let err = Settings::from_json(
            r#"{ "rain": { "capacity": 7,
            "rain_intensity": 25,
            "outer_radius": { "min": 2147483640, "max": 2147483641 },
            "radius_gap": { "min": 25, "max": 50 },
            "inner_rate": { "min": 2, "max": 7 },
            "outer_divisor_pct": { "min": 101, "max": 126 },
            "closing_gap": true } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Rain(ConfigError::RangeAboveCeiling {
                name: "outer_radius",
                ..
            })
        ));
    }

    #[test]
    fn test_apply_preset() {
        let mut settings = Settings::default();
        settings.apply_preset(RainPreset::Classic);
        assert_eq!(settings.rain.capacity, CLASSIC_MAX_RINGS);
        assert!(!settings.rain.closing_gap);
    }
}
