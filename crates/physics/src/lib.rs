#![warn(missing_docs)]
//! Physics primitives (AABB, tile collisions, platformer body).
//!
//! All coordinates are integer world pixels with `y` growing downward.

mod body;

pub use body::{Heading, KinematicBody, MotionParams, StepReport};

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box used for collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner.
    pub min: IVec2,
    /// Width and height.
    pub size: IVec2,
}

impl Aabb {
    /// Create a new AABB; `size` must be non-negative on both axes.
    pub fn new(min: IVec2, size: IVec2) -> Self {
        debug_assert!(size.x >= 0 && size.y >= 0);
        Self { min, size }
    }

    /// The box covered by grid cell (`col`, `row`).
    pub fn tile(col: i32, row: i32, tile_size: i32) -> Self {
        Self::new(
            IVec2::new(col * tile_size, row * tile_size),
            IVec2::splat(tile_size),
        )
    }

    /// Left edge.
    pub fn left(&self) -> i32 {
        self.min.x
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> i32 {
        self.min.x + self.size.x
    }

    /// Top edge.
    pub fn top(&self) -> i32 {
        self.min.y
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> i32 {
        self.min.y + self.size.y
    }

    /// Move horizontally so the left edge sits at `x`.
    pub fn set_left(&mut self, x: i32) {
        self.min.x = x;
    }

    /// Move horizontally so the right edge sits at `x`.
    pub fn set_right(&mut self, x: i32) {
        self.min.x = x - self.size.x;
    }

    /// Move vertically so the top edge sits at `y`.
    pub fn set_top(&mut self, y: i32) {
        self.min.y = y;
    }

    /// Move vertically so the bottom edge sits at `y`.
    pub fn set_bottom(&mut self, y: i32) {
        self.min.y = y - self.size.y;
    }

    /// Tests intersection with another AABB.
    ///
    /// Boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Inclusive range of grid cells touched by this box's edges, as
    /// (first cell, last cell).
    pub fn tile_span(&self, tile_size: i32) -> (IVec2, IVec2) {
        let first = IVec2::new(
            self.left().div_euclid(tile_size),
            self.top().div_euclid(tile_size),
        );
        let last = IVec2::new(
            self.right().div_euclid(tile_size),
            self.bottom().div_euclid(tile_size),
        );
        (first, last)
    }
}

/// Read access to which grid cells hold a solid tile.
pub trait TileSolidity {
    /// Whether cell (`col`, `row`) blocks movement.
    fn is_solid(&self, col: i32, row: i32) -> bool;
}

/// Collect the boxes of every solid cell in the span of `rect`.
///
/// Cells are visited by ascending row, then ascending column. Collision
/// resolution applies clamps in this order, so it must stay stable.
pub fn collision_tiles<T: TileSolidity + ?Sized>(
    rect: &Aabb,
    tile_size: i32,
    tiles: &T,
) -> Vec<Aabb> {
    let (first, last) = rect.tile_span(tile_size);
    let mut out = Vec::new();
    for row in first.y..=last.y {
        for col in first.x..=last.x {
            if tiles.is_solid(col, row) {
                out.push(Aabb::tile(col, row, tile_size));
            }
        }
    }
    out
}
