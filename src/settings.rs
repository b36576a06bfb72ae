//! Runtime settings
//!
//! Read from an optional JSON file; anything missing falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{World, initialize};

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Autonomous bodies spawned at startup
    pub random_bodies: usize,
    /// RNG seed (None = pick one from the clock)
    pub seed: Option<u64>,

    // === Loop ===
    pub ticks_per_second: u32,
    /// Stop after this many ticks (None = run forever)
    pub tick_limit: Option<u64>,

    // === Controls ===
    /// Push the player away from the pointer rather than toward it
    pub invert_controls: bool,
    /// Let the built-in demo driver hold the pointer
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            random_bodies: DEFAULT_RANDOM_BODIES,
            seed: None,

            ticks_per_second: TICKS_PER_SECOND,
            tick_limit: None,

            invert_controls: true,
            autopilot: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Some(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            None => {
                log::warn!("Ignoring malformed settings in {}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved to {}", path.display()),
                Err(e) => log::warn!("Could not write {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }

    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::debug!("Settings parse error: {}", e);
                None
            }
        }
    }

    /// Build the starting world described by these settings
    pub fn initialize_world(&self, seed: u64) -> World {
        let mut world = initialize(
            self.arena_width,
            self.arena_height,
            self.random_bodies,
            seed,
        );
        world.invert_controls = self.invert_controls;
        world
    }
}
