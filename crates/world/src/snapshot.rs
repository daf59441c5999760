//! Read-only view of the simulation for renderers and golden tests.

use serde::Serialize;
use tilecraft_core::{Rgb, SimTick};
use tilecraft_physics::Aabb;

use crate::grid::TilePos;
use crate::inventory::ItemStack;
use crate::sim::Simulation;

/// One drawn cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockView {
    /// Grid cell.
    pub pos: TilePos,
    /// Block type name.
    pub name: &'static str,
    /// Fill colour.
    pub color: Rgb,
}

/// Player rectangle and colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    /// Bounding box in world pixels.
    pub rect: Aabb,
    /// Fill colour.
    pub color: Rgb,
}

/// Active mining session, for a progress overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiningView {
    /// Cell being mined.
    pub target: TilePos,
    /// Progress in hardness units.
    pub progress: f64,
    /// Hardness of the target block.
    pub hardness: f64,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    /// Tick the snapshot was taken after.
    pub tick: SimTick,
    /// Occupied cells ordered by row, then column.
    pub blocks: Vec<BlockView>,
    /// The player.
    pub player: PlayerView,
    /// Inventory slots in order.
    pub slots: Vec<Option<ItemStack>>,
    /// Selected hotbar slot.
    pub selected_slot: usize,
    /// Whether the inventory view is shown.
    pub inventory_open: bool,
    /// Current mining session, if any.
    pub mining: Option<MiningView>,
}

impl RenderSnapshot {
    /// Capture the current state of `sim`.
    pub fn capture(sim: &Simulation) -> Self {
        let world = sim.world();
        let player = sim.player();

        let blocks = world
            .iter_sorted()
            .into_iter()
            .filter_map(|(pos, block)| {
                block.color().map(|color| BlockView {
                    pos,
                    name: block.name(),
                    color,
                })
            })
            .collect();

        let mining = player.mining.target().and_then(|target| {
            world.get(target).map(|block| MiningView {
                target,
                progress: sim.mining_progress(),
                hardness: block.block_type().hardness,
            })
        });

        Self {
            tick: sim.tick(),
            blocks,
            player: PlayerView {
                rect: player.rect(),
                color: player.color,
            },
            slots: player.inventory.slots().to_vec(),
            selected_slot: player.selected_slot(),
            inventory_open: sim.inventory_open(),
            mining,
        }
    }
}

impl Simulation {
    /// Capture a [`RenderSnapshot`] of the current state.
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self)
    }
}
