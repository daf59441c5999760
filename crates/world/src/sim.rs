//! Frame controller: applies one tick of intents to the world and player.
//!
//! Per tick: intents in arrival order, then the mining session, then player
//! physics. All state is owned here and mutated only inside [`Simulation::step`].

use glam::IVec2;
use serde::{Deserialize, Serialize};
use tilecraft_core::SimTick;
use tracing::{debug, trace};

use crate::grid::{TilePos, WorldGrid};
use crate::mining::{AbortReason, MiningOutcome};
use crate::player::Player;
use crate::settings::SimSettings;

/// Discrete player intent captured by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Start heading left.
    MoveLeft,
    /// Start heading right.
    MoveRight,
    /// Stop horizontal movement.
    StopHorizontal,
    /// Jump if not already jumping.
    Jump,
    /// Select a hotbar slot (0-9).
    SelectSlot {
        /// Slot index.
        slot: usize,
    },
    /// Show or hide the inventory view. UI only.
    ToggleInventoryView,
    /// Primary pressed over `target`.
    StartMining {
        /// Cell under the pointer.
        target: TilePos,
    },
    /// Primary released.
    StopMining,
    /// Secondary pressed over `target`.
    PlaceBlock {
        /// Cell under the pointer.
        target: TilePos,
    },
}

/// Everything the input layer reports for one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Discrete intents, applied in order.
    pub intents: Vec<Intent>,
    /// Cell currently under the pointer.
    pub pointer: Option<TilePos>,
    /// Primary (mining) input held at the end of the tick.
    pub primary_held: bool,
}

/// Observable outcome of a tick, for logs and tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEvent {
    /// A mining session began.
    MiningStarted {
        /// Target cell.
        target: TilePos,
    },
    /// A mining session ended without breaking its block.
    MiningAborted {
        /// Abandoned cell.
        target: TilePos,
        /// Why it ended.
        reason: AbortReason,
    },
    /// A block was mined out of the grid.
    BlockMined {
        /// Cell emptied.
        target: TilePos,
        /// Block type removed.
        block: String,
        /// Whether the inventory accepted the item.
        credited: bool,
    },
    /// A block was placed from the selected slot.
    BlockPlaced {
        /// Cell filled.
        target: TilePos,
        /// Block type placed.
        block: String,
    },
    /// The player touched down.
    Landed {
        /// Top-left corner after landing.
        position: IVec2,
    },
}

/// Single-threaded, fixed-tick game simulation.
#[derive(Debug, Clone)]
pub struct Simulation {
    world: WorldGrid,
    player: Player,
    settings: SimSettings,
    tick: SimTick,
    inventory_open: bool,
}

impl Simulation {
    /// Assemble a simulation from an existing world and player.
    pub fn new(world: WorldGrid, player: Player, mut settings: SimSettings) -> Self {
        settings.sanitize();
        Self {
            world,
            player,
            settings,
            tick: SimTick::ZERO,
            inventory_open: false,
        }
    }

    /// Generate terrain, spawn the player, and hand out starting items.
    ///
    /// Non-positive divisors in `settings` are reset first (see
    /// [`SimSettings::sanitize`]).
    pub fn from_settings(mut settings: SimSettings) -> Self {
        settings.sanitize();
        let mut world = WorldGrid::new(settings.motion.tile_size);
        world.generate(settings.world.width, settings.world.height, &settings.terrain);

        let p = &settings.player;
        let mut player = Player::new(
            IVec2::new(p.spawn_x, p.spawn_y),
            IVec2::new(p.width, p.height),
            p.hotbar_size,
            p.color,
        );
        for stack in &settings.starting_items {
            if !player.collect_item(&stack.item, stack.count) {
                debug!(item = %stack.item, "starting item did not fit");
            }
        }

        Self::new(world, player, settings)
    }

    /// The block grid.
    pub fn world(&self) -> &WorldGrid {
        &self.world
    }

    /// Mutable access to the block grid.
    pub fn world_mut(&mut self) -> &mut WorldGrid {
        &mut self.world
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable access to the player.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Active tunables.
    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    /// Ticks completed so far.
    pub fn tick(&self) -> SimTick {
        self.tick
    }

    /// Whether the inventory view is toggled on.
    pub fn inventory_open(&self) -> bool {
        self.inventory_open
    }

    /// Mining progress of the current session in hardness units.
    pub fn mining_progress(&self) -> f64 {
        self.player.mining.progress(&self.settings.mining)
    }

    /// Advance one tick.
    pub fn step(&mut self, input: &TickInput) -> Vec<SimEvent> {
        let mut events = Vec::new();

        for intent in &input.intents {
            self.apply_intent(*intent, &mut events);
        }

        if input.primary_held {
            self.mine(input.pointer, &mut events);
        } else if let Some(target) = self.player.mining.abort() {
            events.push(SimEvent::MiningAborted {
                target,
                reason: AbortReason::Released,
            });
        }

        let report = self.player.update(&self.world, &self.settings.motion);
        if report.landed {
            events.push(SimEvent::Landed {
                position: self.player.rect().min,
            });
        }

        self.tick = self.tick.advance(1);
        for event in &events {
            trace!(tick = self.tick.0, ?event, "sim event");
        }
        events
    }

    fn apply_intent(&mut self, intent: Intent, events: &mut Vec<SimEvent>) {
        match intent {
            Intent::MoveLeft => self.player.move_left(),
            Intent::MoveRight => self.player.move_right(),
            Intent::StopHorizontal => self.player.stop_moving(),
            Intent::Jump => {
                self.player.jump(&self.settings.motion);
            }
            Intent::SelectSlot { slot } => {
                self.player.select_slot(slot);
            }
            Intent::ToggleInventoryView => self.inventory_open = !self.inventory_open,
            Intent::StartMining { target } => {
                if let Some(previous) = self.player.mining.start(target, &self.world) {
                    events.push(SimEvent::MiningAborted {
                        target: previous,
                        reason: AbortReason::Retargeted,
                    });
                }
                if self.player.mining.is_active() {
                    events.push(SimEvent::MiningStarted { target });
                }
            }
            Intent::StopMining => {
                if let Some(target) = self.player.mining.abort() {
                    events.push(SimEvent::MiningAborted {
                        target,
                        reason: AbortReason::Released,
                    });
                }
            }
            Intent::PlaceBlock { target } => {
                if let Some(event) = self.place_selected(target) {
                    events.push(event);
                }
            }
        }
    }

    fn mine(&mut self, pointer: Option<TilePos>, events: &mut Vec<SimEvent>) {
        let held = self.player.selected_item().map(str::to_owned);
        let outcome = self.player.mining.tick(
            pointer,
            held.as_deref(),
            &self.world,
            &self.settings.mining,
        );
        match outcome {
            MiningOutcome::Completed(target) => {
                if let Some(block) = self.world.remove(target) {
                    let credited = self.player.collect_item(block.name(), 1);
                    debug!(?target, block = block.name(), credited, "block mined");
                    events.push(SimEvent::BlockMined {
                        target,
                        block: block.name().to_string(),
                        credited,
                    });
                }
            }
            MiningOutcome::Aborted(target, reason) => {
                events.push(SimEvent::MiningAborted { target, reason });
            }
            MiningOutcome::Idle | MiningOutcome::Progressed(_) | MiningOutcome::Stalled => {}
        }
    }

    /// Place one unit of the selected item at `target`, debiting the
    /// inventory on success.
    pub fn place_selected(&mut self, target: TilePos) -> Option<SimEvent> {
        let item = self.player.selected_item()?.to_owned();
        if !self.world.place(target, &item, &self.player.rect()) {
            return None;
        }
        // The item was just read from the selected slot, so at least one unit is held.
        let debited = self.player.inventory.remove(&item, 1);
        debug_assert!(debited, "selected slot lost its item");
        debug!(?target, block = %item, "block placed");
        Some(SimEvent::BlockPlaced {
            target,
            block: item,
        })
    }
}
