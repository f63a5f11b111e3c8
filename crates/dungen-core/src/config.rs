//! Generation configuration and validation.
//!
//! Every option is checked before the first mutation; a rejected option is
//! fatal to the call and no partial graph is ever produced.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors raised before generation starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("room_count must be at least 1 (got {got})")]
    RoomCount { got: u32 },

    #[error("main_road_ratio must lie in (0, 1] (got {got})")]
    MainRoadRatio { got: f64 },

    #[error("merge_ratio must be a finite value >= 0 (got {got})")]
    MergeRatio { got: f64 },

    #[error("further_merge_ratio must lie in [0, 1] (got {got})")]
    FurtherMergeRatio { got: f64 },
}

/// Tunable knobs for one generation run
///
/// `image_size` is a pass-through for renderers; the pipeline itself never
/// reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Total target room budget
    pub room_count: u32,
    /// Fraction of `room_count` spent on the main path (floored, minimum 1)
    pub main_road_ratio: f64,
    /// Merge-iteration budget multiplier
    pub merge_ratio: f64,
    /// Probability gate for shape extension after a committed primary merge
    pub further_merge_ratio: f64,
    /// Quota of 1x3/3x1 composites produced by further merges
    pub room_1x3_capacity: u32,
    /// Quota of 2x2 composites produced by further merges
    pub room_2x2_capacity: u32,
    /// Forwarded to the renderer only
    pub image_size: (u32, u32),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            room_count: 20,
            main_road_ratio: 0.35,
            merge_ratio: 0.2,
            further_merge_ratio: 0.7,
            room_1x3_capacity: 1,
            room_2x2_capacity: 1,
            image_size: (1000, 1000),
        }
    }
}

impl GeneratorConfig {
    /// Check every option against its documented range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_count < 1 {
            return Err(ConfigError::RoomCount {
                got: self.room_count,
            });
        }
        if !(self.main_road_ratio > 0.0 && self.main_road_ratio <= 1.0) {
            return Err(ConfigError::MainRoadRatio {
                got: self.main_road_ratio,
            });
        }
        if !(self.merge_ratio >= 0.0 && self.merge_ratio.is_finite()) {
            return Err(ConfigError::MergeRatio {
                got: self.merge_ratio,
            });
        }
        if !(0.0..=1.0).contains(&self.further_merge_ratio) {
            return Err(ConfigError::FurtherMergeRatio {
                got: self.further_merge_ratio,
            });
        }
        Ok(())
    }

    /// Number of rooms on the main path, including the start room
    pub fn main_road_length(&self) -> u32 {
        let length = (self.room_count as f64 * self.main_road_ratio).floor() as u32;
        length.max(1)
    }

    /// Room budget left for branch growth
    pub fn branch_budget(&self) -> u32 {
        self.room_count - self.main_road_length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_room_count_rejected() {
        let config = GeneratorConfig {
            room_count: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::RoomCount { got: 0 }));
    }

    #[test]
    fn test_ratio_ranges_rejected() {
        let config = GeneratorConfig {
            main_road_ratio: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MainRoadRatio { .. })
        ));

        let config = GeneratorConfig {
            main_road_ratio: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MainRoadRatio { .. })
        ));

        let config = GeneratorConfig {
            merge_ratio: -0.1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MergeRatio { .. })));

        let config = GeneratorConfig {
            merge_ratio: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MergeRatio { .. })));

        let config = GeneratorConfig {
            further_merge_ratio: 1.1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FurtherMergeRatio { .. })
        ));
    }

    #[test]
    fn test_road_length_split() {
        let config = GeneratorConfig {
            room_count: 20,
            main_road_ratio: 0.35,
            ..Default::default()
        };
        assert_eq!(config.main_road_length(), 7);
        assert_eq!(config.branch_budget(), 13);
    }

    #[test]
    fn test_road_length_floor_is_at_least_one() {
        let config = GeneratorConfig {
            room_count: 1,
            main_road_ratio: 0.35,
            ..Default::default()
        };
        assert_eq!(config.main_road_length(), 1);
        assert_eq!(config.branch_budget(), 0);
    }

    #[test]
    fn test_full_ratio_uses_whole_budget() {
        let config = GeneratorConfig {
            room_count: 12,
            main_road_ratio: 1.0,
            ..Default::default()
        };
        assert_eq!(config.main_road_length(), 12);
        assert_eq!(config.branch_budget(), 0);
    }
}
