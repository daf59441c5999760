//! Sparse tile grid storing placed blocks.
//!
//! A missing key means "no solid block". Air is never stored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tilecraft_core::block::{self, BlockType, UnknownBlockType};
use tilecraft_core::Rgb;
use tilecraft_physics::{Aabb, TileSolidity};
use tracing::debug;

/// Default edge length of a tile in world pixels.
pub const TILE_SIZE: i32 = 32;

/// Integer grid coordinate (column, row). Rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    /// Column index.
    pub col: i32,
    /// Row index.
    pub row: i32,
}

impl TilePos {
    /// Construct a tile position.
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Tile containing the world-pixel point (`x`, `y`).
    pub fn containing(x: i32, y: i32, tile_size: i32) -> Self {
        Self::new(x.div_euclid(tile_size), y.div_euclid(tile_size))
    }
}

/// A placed block instance. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    kind: &'static BlockType,
}

impl Block {
    /// Create a block of the named type.
    pub fn new(name: &str) -> Result<Self, UnknownBlockType> {
        Ok(Self {
            kind: block::lookup(name)?,
        })
    }

    /// Catalog entry for this block.
    pub fn block_type(&self) -> &'static BlockType {
        self.kind
    }

    /// Type name, also the item credited when the block is mined.
    pub fn name(&self) -> &'static str {
        self.kind.name
    }

    /// Display colour.
    pub fn color(&self) -> Option<Rgb> {
        self.kind.color
    }
}

/// The block world: a sparse `(col, row) -> Block` map.
///
/// `width`/`height` only bound generation; queries accept any coordinate.
#[derive(Debug, Clone)]
pub struct WorldGrid {
    blocks: HashMap<TilePos, Block>,
    width: u32,
    height: u32,
    tile_size: i32,
}

impl WorldGrid {
    /// Create an empty grid with the given tile size in pixels.
    pub fn new(tile_size: i32) -> Self {
        Self {
            blocks: HashMap::new(),
            width: 0,
            height: 0,
            tile_size,
        }
    }

    /// Tile edge length in pixels.
    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Generation width in blocks.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Generation height in blocks.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn set_bounds(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Block at `pos`, or `None` for an empty (air) cell.
    pub fn get(&self, pos: TilePos) -> Option<&Block> {
        self.blocks.get(&pos)
    }

    /// Pixel box covered by `pos`.
    pub fn tile_rect(&self, pos: TilePos) -> Aabb {
        Aabb::tile(pos.col, pos.row, self.tile_size)
    }

    /// Place a block of type `name` at `pos`.
    ///
    /// Fails without mutation if the type is unknown or not placeable, the
    /// cell is occupied, or the cell overlaps `excluded` (the placer's box).
    pub fn place(&mut self, pos: TilePos, name: &str, excluded: &Aabb) -> bool {
        let block = match Block::new(name) {
            Ok(block) if block.block_type().is_placeable() => block,
            _ => return false,
        };
        if self.blocks.contains_key(&pos) {
            return false;
        }
        if self.tile_rect(pos).intersects(excluded) {
            debug!(?pos, block = name, "placement overlaps placer");
            return false;
        }
        self.blocks.insert(pos, block);
        true
    }

    /// Insert a block into an empty cell. Used by generation; never overwrites.
    pub fn fill_if_empty(&mut self, pos: TilePos, name: &str) -> Result<bool, UnknownBlockType> {
        let block = Block::new(name)?;
        if !block.block_type().is_placeable() || self.blocks.contains_key(&pos) {
            return Ok(false);
        }
        self.blocks.insert(pos, block);
        Ok(true)
    }

    /// Remove and return the block at `pos`.
    pub fn remove(&mut self, pos: TilePos) -> Option<Block> {
        self.blocks.remove(&pos)
    }

    /// Number of stored blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true when no blocks are stored.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks ordered by row, then column.
    pub fn iter_sorted(&self) -> Vec<(TilePos, &Block)> {
        let mut cells: Vec<(TilePos, &Block)> =
            self.blocks.iter().map(|(pos, block)| (*pos, block)).collect();
        cells.sort_by_key(|(pos, _)| (pos.row, pos.col));
        cells
    }
}

impl Default for WorldGrid {
    fn default() -> Self {
        Self::new(TILE_SIZE)
    }
}

impl TileSolidity for WorldGrid {
    fn is_solid(&self, col: i32, row: i32) -> bool {
        self.blocks.contains_key(&TilePos::new(col, row))
    }
}
