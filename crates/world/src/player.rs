//! The player: platformer body, hotbar inventory, and mining session.

use glam::IVec2;
use tilecraft_core::Rgb;
use tilecraft_physics::{Aabb, Heading, KinematicBody, MotionParams, StepReport, TileSolidity};

use crate::inventory::Inventory;
use crate::mining::MiningState;

/// Player state owned by the simulation.
#[derive(Debug, Clone)]
pub struct Player {
    /// Physics body.
    pub body: KinematicBody,
    /// Display colour.
    pub color: Rgb,
    /// Hotbar contents; every slot is selectable.
    pub inventory: Inventory,
    /// Current mining session.
    pub mining: MiningState,
    selected_slot: usize,
}

impl Player {
    /// Create a player whose top-left corner is at `position`.
    pub fn new(position: IVec2, size: IVec2, hotbar_size: usize, color: Rgb) -> Self {
        Self {
            body: KinematicBody::new(position, size),
            color,
            inventory: Inventory::new(hotbar_size),
            mining: MiningState::Idle,
            selected_slot: 0,
        }
    }

    /// Bounding box in world pixels.
    pub fn rect(&self) -> Aabb {
        self.body.rect
    }

    /// Index of the selected hotbar slot.
    pub fn selected_slot(&self) -> usize {
        self.selected_slot
    }

    /// Select hotbar slot `slot`. Out-of-range indices are ignored.
    pub fn select_slot(&mut self, slot: usize) -> bool {
        if slot >= self.inventory.capacity() {
            return false;
        }
        self.selected_slot = slot;
        true
    }

    /// Item type in the selected slot, if any.
    pub fn selected_item(&self) -> Option<&str> {
        self.inventory
            .item_at(self.selected_slot)
            .map(|(item, _)| item)
    }

    /// Add items to the inventory.
    pub fn collect_item(&mut self, item: &str, quantity: u32) -> bool {
        self.inventory.add(item, quantity)
    }

    /// Head left on the next physics step.
    pub fn move_left(&mut self) {
        self.body.set_heading(Heading::Left);
    }

    /// Head right on the next physics step.
    pub fn move_right(&mut self) {
        self.body.set_heading(Heading::Right);
    }

    /// Cancel any pending horizontal movement.
    pub fn stop_moving(&mut self) {
        self.body.set_heading(Heading::Stop);
    }

    /// Jump unless already jumping.
    pub fn jump(&mut self, params: &MotionParams) -> bool {
        self.body.jump(params)
    }

    /// Run one physics step against `tiles`.
    pub fn update<T: TileSolidity + ?Sized>(&mut self, tiles: &T, params: &MotionParams) -> StepReport {
        self.body.step(tiles, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{TilePos, WorldGrid};

    fn player() -> Player {
        Player::new(IVec2::new(0, 0), IVec2::new(25, 57), 10, Rgb(255, 0, 0))
    }

    #[test]
    fn select_slot_is_bounded() {
        let mut p = player();
        assert!(p.select_slot(9));
        assert_eq!(p.selected_slot(), 9);
        assert!(!p.select_slot(10));
        assert_eq!(p.selected_slot(), 9);
    }

    #[test]
    fn selected_item_follows_slot() {
        let mut p = player();
        p.collect_item("dirt", 3);
        p.collect_item("wooden_pickaxe", 1);
        assert_eq!(p.selected_item(), Some("dirt"));
        p.select_slot(1);
        assert_eq!(p.selected_item(), Some("wooden_pickaxe"));
        p.select_slot(2);
        assert_eq!(p.selected_item(), None);
    }

    #[test]
    fn movement_intents_apply_on_update() {
        let mut p = player();
        let world = WorldGrid::default();
        let params = MotionParams {
            gravity: 0,
            ..MotionParams::default()
        };
        p.move_right();
        p.move_left();
        p.update(&world, &params);
        assert_eq!(p.rect().left(), -5);
        p.move_right();
        p.stop_moving();
        p.update(&world, &params);
        assert_eq!(p.rect().left(), -5);
    }

    #[test]
    fn walking_into_a_wall_clamps_to_its_face() {
        let mut world = WorldGrid::default();
        let nowhere = Aabb::new(IVec2::new(-10_000, -10_000), IVec2::ONE);
        world.place(TilePos::new(1, 0), "stone", &nowhere);
        world.place(TilePos::new(1, 1), "stone", &nowhere);
        let params = MotionParams {
            gravity: 0,
            ..MotionParams::default()
        };
        let mut p = player();
        for _ in 0..5 {
            p.move_right();
            p.update(&world, &params);
        }
        assert_eq!(p.rect().right(), 32);
    }
}
