//! Generator configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Files are JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{AREA_HEIGHT, AREA_WIDTH, DOOR_CHANCE, DOOR_SPACING, MIN_AREA_HEIGHT, MIN_AREA_WIDTH};
use crate::error::{GenerationError, Result};

/// Settings for one level builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,

    /// Probability that a corridor mouth gets a door
    pub door_chance: f64,

    /// Two surviving doors are always further apart than this (Chebyshev)
    pub door_spacing: i32,

    pub layout: LayoutConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: AREA_WIDTH,
            height: AREA_HEIGHT,
            door_chance: DOOR_CHANCE,
            door_spacing: DOOR_SPACING,
            layout: LayoutConfig::default(),
        }
    }
}

/// Knobs of the built-in rooms-and-tunnels layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Placement tries; overlapping rooms are skipped
    pub room_attempts: u32,
    pub min_room_size: usize,
    pub max_room_size: usize,

    /// Tunnels dug between random room pairs
    pub tunnels: u32,

    /// Tunnels that start in a room and stop in the rock
    pub dead_ends: u32,

    /// Probability of a closed door panel on each tunnel cell
    pub closed_door_chance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            room_attempts: 60,
            min_room_size: 3,
            max_room_size: 9,
            tunnels: 14,
            dead_ends: 4,
            closed_door_chance: 0.02,
        }
    }
}

fn check_probability(name: &str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(GenerationError::InvalidConfig(format!(
            "{name} must be between 0 and 1, got {p}"
        )))
    }
}

impl GeneratorConfig {
    /// Load a configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_config(&contents)
    }

    /// Parse a JSON configuration; missing fields keep their defaults
    pub fn parse_config(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_AREA_WIDTH || self.height < MIN_AREA_HEIGHT {
            return Err(GenerationError::AreaTooSmall {
                width: self.width,
                height: self.height,
                min_width: MIN_AREA_WIDTH,
                min_height: MIN_AREA_HEIGHT,
            });
        }
        check_probability("door_chance", self.door_chance)?;
        check_probability("closed_door_chance", self.layout.closed_door_chance)?;
        if self.door_spacing < 0 {
            return Err(GenerationError::InvalidConfig(format!(
                "door_spacing must not be negative, got {}",
                self.door_spacing
            )));
        }
        let layout = &self.layout;
        if layout.min_room_size == 0 || layout.min_room_size > layout.max_room_size {
            return Err(GenerationError::InvalidConfig(format!(
                "room size range {}..={} is empty",
                layout.min_room_size, layout.max_room_size
            )));
        }
        Ok(())
    }
}
