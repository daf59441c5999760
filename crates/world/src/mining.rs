//! Mining session state machine and mining-power rules.
//!
//! A session is either idle or targets one cell and accumulates progress
//! tick by tick. Any abort discards the progress.

use serde::{Deserialize, Serialize};
use tilecraft_core::block::BlockType;
use tilecraft_core::item::tool_spec;

use crate::grid::{TilePos, WorldGrid};

/// Tunables for mining speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningRules {
    /// Hardness units per second mined by a bare hand.
    pub base_speed: f64,
    /// Simulation rate; progress per tick is `power / ticks_per_second`.
    pub ticks_per_second: u32,
    /// Multiplier when a non-matching tool is held on a hand-breakable block.
    pub wrong_tool_factor: f64,
}

impl Default for MiningRules {
    fn default() -> Self {
        Self {
            base_speed: 1.0,
            ticks_per_second: 60,
            wrong_tool_factor: 0.25,
        }
    }
}

/// Effective mining power of the held item against `block`.
///
/// Checked in order: a matching tool of sufficient tier mines at
/// `base_speed * speed_modifier`; otherwise a hand-breakable block mines at
/// `base_speed * wrong_tool_factor` with a tool held or `base_speed` with
/// none; otherwise nothing can be mined.
pub fn mining_power(held_item: Option<&str>, block: &BlockType, rules: &MiningRules) -> f64 {
    let tool = held_item.and_then(tool_spec);
    match tool {
        Some(tool) if tool.matches(block.tool, block.required_tier) => {
            rules.base_speed * tool.speed_modifier
        }
        Some(_) if block.is_hand_breakable() => rules.base_speed * rules.wrong_tool_factor,
        None if block.is_hand_breakable() => rules.base_speed,
        _ => 0.0,
    }
}

/// Why a session ended without breaking its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    /// Primary input released or an explicit stop.
    Released,
    /// The pointer is no longer over the target cell.
    PointerMoved,
    /// The target cell became empty.
    TargetVanished,
    /// A new session replaced this one.
    Retargeted,
}

/// Result of one [`MiningState::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MiningOutcome {
    /// No session was active.
    Idle,
    /// Progress advanced to the contained value.
    Progressed(f64),
    /// The held item cannot mine this block; progress is unchanged.
    Stalled,
    /// Progress reached the block's hardness. The caller removes the block.
    Completed(TilePos),
    /// The session ended without breaking anything.
    Aborted(TilePos, AbortReason),
}

/// Player mining state: `Idle`, or `Active` on a target cell.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MiningState {
    /// No target.
    #[default]
    Idle,
    /// Accumulating progress on `target`.
    Active {
        /// Cell being mined.
        target: TilePos,
        /// Sum of per-tick mining power; progress is this over the tick rate.
        power_ticks: f64,
    },
}

impl MiningState {
    /// Cell being mined, if any.
    pub fn target(&self) -> Option<TilePos> {
        match self {
            MiningState::Idle => None,
            MiningState::Active { target, .. } => Some(*target),
        }
    }

    /// Whether a session is active.
    pub fn is_active(&self) -> bool {
        matches!(self, MiningState::Active { .. })
    }

    /// Accumulated progress in hardness units (0 when idle).
    pub fn progress(&self, rules: &MiningRules) -> f64 {
        match self {
            MiningState::Idle => 0.0,
            MiningState::Active { power_ticks, .. } => {
                power_ticks / f64::from(rules.ticks_per_second)
            }
        }
    }

    /// Begin mining `target` from zero progress.
    ///
    /// If the cell is empty the state becomes idle instead. Returns the
    /// previous target when a different session was replaced.
    pub fn start(&mut self, target: TilePos, world: &WorldGrid) -> Option<TilePos> {
        let previous = self.target().filter(|prev| *prev != target);
        *self = if world.get(target).is_some() {
            MiningState::Active {
                target,
                power_ticks: 0.0,
            }
        } else {
            MiningState::Idle
        };
        previous
    }

    /// End the session, discarding progress. Returns the abandoned target.
    pub fn abort(&mut self) -> Option<TilePos> {
        let target = self.target();
        *self = MiningState::Idle;
        target
    }

    /// Advance one tick while the primary input is held.
    ///
    /// `pointer` is the cell currently under the cursor and `held_item` the
    /// selected hotbar item.
    pub fn tick(
        &mut self,
        pointer: Option<TilePos>,
        held_item: Option<&str>,
        world: &WorldGrid,
        rules: &MiningRules,
    ) -> MiningOutcome {
        let (target, power_ticks) = match *self {
            MiningState::Idle => return MiningOutcome::Idle,
            MiningState::Active {
                target,
                power_ticks,
            } => (target, power_ticks),
        };

        if pointer != Some(target) {
            *self = MiningState::Idle;
            return MiningOutcome::Aborted(target, AbortReason::PointerMoved);
        }
        let Some(block) = world.get(target) else {
            *self = MiningState::Idle;
            return MiningOutcome::Aborted(target, AbortReason::TargetVanished);
        };

        let kind = block.block_type();
        let power = mining_power(held_item, kind, rules);
        if power <= 0.0 {
            return MiningOutcome::Stalled;
        }

        let power_ticks = power_ticks + power;
        if power_ticks >= kind.hardness * f64::from(rules.ticks_per_second) {
            *self = MiningState::Idle;
            return MiningOutcome::Completed(target);
        }
        *self = MiningState::Active {
            target,
            power_ticks,
        };
        MiningOutcome::Progressed(power_ticks / f64::from(rules.ticks_per_second))
    }
}
