//! Rain tuning: capacity, spawn odds and the spawn-time geometry ranges

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Half-open integer range `[min, max)` used for random draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min >= self.max
    }
}

/// Look of the rain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RainPreset {
    /// Few large rings whose glow band closes slowly
    #[default]
    Neon,
    /// Dense rain, constant growth rates
    Classic,
}

impl RainPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            RainPreset::Neon => "Neon",
            RainPreset::Classic => "Classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "neon" | "gl" => Some(RainPreset::Neon),
            "classic" | "x11" => Some(RainPreset::Classic),
            _ => None,
        }
    }

    /// Maximum rings alive at once
    pub fn capacity(&self) -> usize {
        match self {
            RainPreset::Neon => MAX_RINGS,
            RainPreset::Classic => CLASSIC_MAX_RINGS,
        }
    }

    /// Whether the inner edge slows down near the outer edge
    pub fn closing_gap(&self) -> bool {
        match self {
            RainPreset::Neon => true,
            RainPreset::Classic => false,
        }
    }
}

/// Rejected rain configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("ring capacity must be at least 1")]
    ZeroCapacity,

    #[error("rain intensity {0} exceeds the spawn roll range {max}", max = SPAWN_ROLL_RANGE)]
    IntensityTooHigh(u32),

    #[error("empty range for {name}: [{min}, {max})")]
    EmptyRange {
        name: &'static str,
        min: i32,
        max: i32,
    },

    #[error("{name} must start at {floor} or above (got {min})")]
    RangeBelowFloor {
        name: &'static str,
        min: i32,
        floor: i32,
    },

    #[error("{name} must end at {ceiling} or below (got {max})")]
    RangeAboveCeiling {
        name: &'static str,
        max: i32,
        ceiling: i32,
    },
}

/// Everything that shapes how rings are spawned and grown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainConfig {
    /// Maximum live rings
    pub capacity: usize,
    /// Spawn odds per tick, out of [`SPAWN_ROLL_RANGE`]
    pub rain_intensity: u32,
    /// Outer radius at spawn
    pub outer_radius: IntRange,
    /// Distance from outer to inner radius at spawn
    pub radius_gap: IntRange,
    /// Inner edge growth per tick at spawn
    pub inner_rate: IntRange,
    /// Outer rate = inner rate / (pct / 100); must stay above 100
    pub outer_divisor_pct: IntRange,
    /// Slow the inner edge as the band closes
    pub closing_gap: bool,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self::from_preset(RainPreset::default())
    }
}

impl RainConfig {
    /// Preset defaults
    pub fn from_preset(preset: RainPreset) -> Self {
        Self {
            capacity: preset.capacity(),
            rain_intensity: RAIN_INTENSITY,
            outer_radius: IntRange::new(25, 75),
            radius_gap: IntRange::new(25, 50),
            inner_rate: IntRange::new(2, 7),
            outer_divisor_pct: IntRange::new(101, 126),
            closing_gap: preset.closing_gap(),
        }
    }

    /// Check that every spawnable ring is alive, retires, and stays small
    /// enough to draw
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.rain_intensity > SPAWN_ROLL_RANGE {
            return Err(ConfigError::IntensityTooHigh(self.rain_intensity));
        }

        let ranges = [
            ("outer_radius", self.outer_radius, 2, MAX_SPAWN_RADIUS),
            ("radius_gap", self.radius_gap, 1, MAX_RADIUS_GAP),
            ("inner_rate", self.inner_rate, 1, MAX_INNER_RATE),
            ("outer_divisor_pct", self.outer_divisor_pct, 101, i32::MAX),
        ];
        for (name, range, floor, ceiling) in ranges {
            if range.is_empty() {
                return Err(ConfigError::EmptyRange {
                    name,
                    min: range.min,
                    max: range.max,
                });
            }
            if range.min < floor {
                return Err(ConfigError::RangeBelowFloor {
                    name,
                    min: range.min,
                    floor,
                });
            }
            if range.max > ceiling {
                return Err(ConfigError::RangeAboveCeiling {
                    name,
                    max: range.max,
                    ceiling,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for preset in [RainPreset::Neon, RainPreset::Classic] {
            assert_eq!(RainConfig::from_preset(preset).validate(), Ok(()));
        }
    }

    #[test]
    fn test_preset_shapes() {
        let neon = RainConfig::from_preset(RainPreset::Neon);
        assert_eq!(neon.capacity, 7);
        assert!(neon.closing_gap);

        let classic = RainConfig::from_preset(RainPreset::Classic);
        assert_eq!(classic.capacity, 256);
        assert!(!classic.closing_gap);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(RainPreset::from_str("NEON"), Some(RainPreset::Neon));
        assert_eq!(RainPreset::from_str("x11"), Some(RainPreset::Classic));
        assert_eq!(RainPreset::from_str("drizzle"), None);
    }

    #[test]
    fn test_validate_rejects() {
        let mut config = RainConfig {
            capacity: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));

        config.capacity = 3;
        config.rain_intensity = 300;
        assert_eq!(config.validate(), Err(ConfigError::IntensityTooHigh(300)));

        config.rain_intensity = 25;
        config.inner_rate = IntRange::new(4, 4);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyRange {
                name: "inner_rate",
                ..
            })
        ));

        config.inner_rate = IntRange::new(2, 7);
        config.outer_divisor_pct = IntRange::new(100, 110);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RangeBelowFloor {
                name: "outer_divisor_pct",
                floor: 101,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_huge_geometry() {
        let config = RainConfig {
            outer_radius: IntRange::new(2_147_483_640, 2_147_483_641),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RangeAboveCeiling {
                name: "outer_radius",
                max: 2_147_483_641,
                ceiling: MAX_SPAWN_RADIUS,
            })
        );

        let config = RainConfig {
            outer_radius: IntRange::new(200_000_000, 200_000_001),
            radius_gap: IntRange::new(199_999_990, 199_999_991),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RangeAboveCeiling { .. })
        ));

        let config = RainConfig {
            inner_rate: IntRange::new(2, MAX_INNER_RATE + 1),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RangeAboveCeiling {
                name: "inner_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_ceiling_is_inclusive_of_range_end() {
        let config = RainConfig {
            outer_radius: IntRange::new(25, MAX_SPAWN_RADIUS),
            radius_gap: IntRange::new(25, MAX_RADIUS_GAP),
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_intensity_error_message() {
        assert_eq!(
            ConfigError::IntensityTooHigh(300).to_string(),
            "rain intensity 300 exceeds the spawn roll range 256"
        );
    }
}
