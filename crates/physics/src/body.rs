//! Platformer body: horizontal intent, gravity, jumping, tile collisions.

use crate::{collision_tiles, Aabb, TileSolidity};
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Tunables for [`KinematicBody::step`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    /// Edge length of one grid cell in pixels.
    pub tile_size: i32,
    /// Horizontal pixels moved per tick while a heading is held.
    pub speed: i32,
    /// Added to the vertical velocity every tick.
    pub gravity: i32,
    /// Vertical velocity set by a jump (negative = up).
    pub jump_velocity: i32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            tile_size: 32,
            speed: 5,
            gravity: 1,
            jump_velocity: -15,
        }
    }
}

/// Horizontal movement intent for the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    /// Move toward negative x.
    Left,
    /// Move toward positive x.
    Right,
    /// No horizontal movement.
    #[default]
    Stop,
}

impl Heading {
    fn sign(self) -> i32 {
        match self {
            Heading::Left => -1,
            Heading::Right => 1,
            Heading::Stop => 0,
        }
    }
}

/// What happened during a single [`KinematicBody::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// A horizontal clamp was applied.
    pub blocked_horizontally: bool,
    /// The body touched down after being airborne.
    pub landed: bool,
    /// The body struck a ceiling while rising.
    pub hit_ceiling: bool,
}

/// Axis-separated platformer body resolved against a tile grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    /// Bounding box in world pixels.
    pub rect: Aabb,
    /// Vertical velocity in pixels per tick (positive = falling).
    pub velocity_y: i32,
    /// Set by a jump, cleared on landing.
    pub jumping: bool,
    /// Resting on a tile after the last step.
    pub grounded: bool,
    heading: Heading,
}

impl KinematicBody {
    /// Create a body at rest with its top-left corner at `position`.
    pub fn new(position: IVec2, size: IVec2) -> Self {
        Self {
            rect: Aabb::new(position, size),
            velocity_y: 0,
            jumping: false,
            grounded: false,
            heading: Heading::Stop,
        }
    }

    /// Heading that the next step will apply.
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Replace the pending horizontal intent. The most recent call wins.
    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    /// Start a jump unless one is already in progress.
    pub fn jump(&mut self, params: &MotionParams) -> bool {
        if self.jumping {
            return false;
        }
        self.velocity_y = params.jump_velocity;
        self.jumping = true;
        true
    }

    /// Advance one tick: horizontal move + resolve, then gravity, vertical
    /// move + resolve. The heading resets to [`Heading::Stop`] afterwards.
    pub fn step<T: TileSolidity + ?Sized>(&mut self, tiles: &T, params: &MotionParams) -> StepReport {
        let mut report = StepReport::default();

        let dx = self.heading.sign() * params.speed;
        self.rect.min.x += dx;
        for tile in collision_tiles(&self.rect, params.tile_size, tiles) {
            if !self.rect.intersects(&tile) {
                continue;
            }
            if dx > 0 {
                self.rect.set_right(tile.left());
                report.blocked_horizontally = true;
            } else if dx < 0 {
                self.rect.set_left(tile.right());
                report.blocked_horizontally = true;
            }
        }

        let was_grounded = self.grounded;
        self.grounded = false;
        self.velocity_y += params.gravity;
        self.rect.min.y += self.velocity_y;
        for tile in collision_tiles(&self.rect, params.tile_size, tiles) {
            if !self.rect.intersects(&tile) {
                continue;
            }
            if self.velocity_y > 0 {
                self.rect.set_bottom(tile.top());
                self.velocity_y = 0;
                self.jumping = false;
                self.grounded = true;
            } else if self.velocity_y < 0 {
                self.rect.set_top(tile.bottom());
                self.velocity_y = 0;
                report.hit_ceiling = true;
            }
        }
        report.landed = self.grounded && !was_grounded;

        self.heading = Heading::Stop;
        report
    }
}
