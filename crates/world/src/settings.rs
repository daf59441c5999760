//! Simulation tunables, deserializable from the runner's TOML config.

use serde::{Deserialize, Serialize};
use tracing::warn;
use tilecraft_core::Rgb;
use tilecraft_physics::MotionParams;

use crate::inventory::DEFAULT_CAPACITY;
use crate::mining::MiningRules;
use crate::terrain::TerrainRules;

/// Generation bounds in blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Columns generated.
    pub width: u32,
    /// Rows generated.
    pub height: u32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: 100,
            height: 30,
        }
    }
}

/// Player size, spawn point, and hotbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Width in pixels (0.8 tiles).
    pub width: i32,
    /// Height in pixels (1.8 tiles).
    pub height: i32,
    /// Spawn x of the top-left corner.
    pub spawn_x: i32,
    /// Spawn y of the top-left corner.
    pub spawn_y: i32,
    /// Number of inventory/hotbar slots.
    pub hotbar_size: usize,
    /// Display colour.
    pub color: Rgb,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            width: 25,
            height: 57,
            // Centre of an 800 px view, upper third of a 30-row world.
            spawn_x: 388,
            spawn_y: 320,
            hotbar_size: DEFAULT_CAPACITY,
            color: Rgb(255, 0, 0),
        }
    }
}

/// Item granted at spawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingItem {
    /// Item type name.
    pub item: String,
    /// Quantity.
    pub count: u32,
}

impl StartingItem {
    fn new(item: &str, count: u32) -> Self {
        Self {
            item: item.to_string(),
            count,
        }
    }
}

/// Everything needed to build a [`crate::Simulation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Generation bounds.
    pub world: WorldSettings,
    /// Player body and hotbar.
    pub player: PlayerSettings,
    /// Movement and collision tunables.
    pub motion: MotionParams,
    /// Mining speed tunables.
    pub mining: MiningRules,
    /// Terrain layering rules.
    pub terrain: TerrainRules,
    /// Inventory contents at spawn, added in order.
    pub starting_items: Vec<StartingItem>,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            world: WorldSettings::default(),
            player: PlayerSettings::default(),
            motion: MotionParams::default(),
            mining: MiningRules::default(),
            terrain: TerrainRules::default(),
            starting_items: vec![
                StartingItem::new("dirt", 30),
                StartingItem::new("stone", 20),
                StartingItem::new("grass", 10),
                StartingItem::new("wooden_pickaxe", 1),
            ],
        }
    }
}

impl SimSettings {
    /// Replace divisors and rates that must be positive with their defaults.
    ///
    /// Returns the names of the fields that were reset.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let motion = MotionParams::default();
        let mining = MiningRules::default();
        let terrain = TerrainRules::default();

        let mut reset = Vec::new();
        let mut keep_positive = |name: &'static str, value: &mut i32, default: i32| {
            if *value <= 0 {
                warn!(field = name, value = *value, default, "non-positive setting, using default");
                *value = default;
                reset.push(name);
            }
        };
        keep_positive("motion.tile_size", &mut self.motion.tile_size, motion.tile_size);
        keep_positive(
            "terrain.coal_period",
            &mut self.terrain.coal_period,
            terrain.coal_period,
        );
        keep_positive(
            "terrain.iron_period",
            &mut self.terrain.iron_period,
            terrain.iron_period,
        );
        keep_positive(
            "terrain.tree_spacing",
            &mut self.terrain.tree_spacing,
            terrain.tree_spacing,
        );

        if self.mining.ticks_per_second == 0 {
            warn!(
                field = "mining.ticks_per_second",
                default = mining.ticks_per_second,
                "zero tick rate, using default"
            );
            self.mining.ticks_per_second = mining.ticks_per_second;
            reset.push("mining.ticks_per_second");
        }
        reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_need_no_sanitizing() {
        let mut settings = SimSettings::default();
        assert!(settings.sanitize().is_empty());
        assert_eq!(settings, SimSettings::default());
    }

    #[test]
    fn zero_divisors_fall_back_to_defaults() {
        let mut settings = SimSettings::default();
        settings.motion.tile_size = 0;
        settings.terrain.tree_spacing = 0;
        settings.terrain.coal_period = -3;
        settings.mining.ticks_per_second = 0;
        settings.terrain.iron_period = 4;

        let reset = settings.sanitize();
        assert_eq!(
            reset,
            vec![
                "motion.tile_size",
                "terrain.coal_period",
                "terrain.tree_spacing",
                "mining.ticks_per_second",
            ]
        );
        assert_eq!(settings.motion.tile_size, 32);
        assert_eq!(settings.terrain.tree_spacing, 7);
        assert_eq!(settings.terrain.coal_period, 10);
        assert_eq!(settings.terrain.iron_period, 4);
        assert_eq!(settings.mining.ticks_per_second, 60);
    }
}
