//! Block catalog - colour, hardness, and mining requirements per block type.
//!
//! The catalog is a closed `const` table. It is never mutated, so references
//! into it are `'static` and can be shared freely.

use crate::item::ToolKind;
use crate::Rgb;
use thiserror::Error;

/// Static definition of a block type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockType {
    /// Identifier (e.g., "stone"). Doubles as the inventory item name.
    pub name: &'static str,
    /// Display colour. `None` marks the non-solid, non-placeable "air" type.
    pub color: Option<Rgb>,
    /// Progress threshold that mining must reach to break the block.
    pub hardness: f64,
    /// Tool category that mines this block at full speed.
    pub tool: Option<ToolKind>,
    /// Minimum tool tier required (0 = hand-breakable).
    pub required_tier: u8,
}

impl BlockType {
    /// Whether the block occupies space. Only coloured types are solid.
    pub fn is_solid(&self) -> bool {
        self.color.is_some()
    }

    /// Whether the type may be placed into the grid.
    pub fn is_placeable(&self) -> bool {
        self.color.is_some()
    }

    /// Whether bare hands (or any tool) can make progress on this block.
    pub fn is_hand_breakable(&self) -> bool {
        self.required_tier == 0
    }
}

/// Name of the non-solid block type. The world grid never stores it.
pub const AIR: &str = "air";

/// Every block type known to the game.
pub const BLOCK_TYPES: &[BlockType] = &[
    BlockType {
        name: "grass",
        color: Some(Rgb(0, 200, 0)),
        hardness: 1.5,
        tool: Some(ToolKind::Shovel),
        required_tier: 0,
    },
    BlockType {
        name: "dirt",
        color: Some(Rgb(139, 69, 19)),
        hardness: 1.0,
        tool: Some(ToolKind::Shovel),
        required_tier: 0,
    },
    BlockType {
        name: "stone",
        color: Some(Rgb(128, 128, 128)),
        hardness: 7.5,
        tool: Some(ToolKind::Pickaxe),
        required_tier: 1,
    },
    BlockType {
        name: "coal_ore",
        color: Some(Rgb(50, 50, 50)),
        hardness: 10.0,
        tool: Some(ToolKind::Pickaxe),
        required_tier: 1,
    },
    BlockType {
        name: "iron_ore",
        color: Some(Rgb(210, 105, 30)),
        hardness: 15.0,
        tool: Some(ToolKind::Pickaxe),
        required_tier: 2,
    },
    BlockType {
        name: "wood_log",
        color: Some(Rgb(102, 51, 0)),
        hardness: 3.0,
        tool: Some(ToolKind::Axe),
        required_tier: 0,
    },
    // No preferred tool: any tool counts as the wrong one.
    BlockType {
        name: "leaves",
        color: Some(Rgb(0, 100, 0)),
        hardness: 0.5,
        tool: None,
        required_tier: 0,
    },
    BlockType {
        name: AIR,
        color: None,
        hardness: 0.0,
        tool: None,
        required_tier: 0,
    },
];

/// Error returned when a block type name is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown block type: {name}")]
pub struct UnknownBlockType {
    /// The name that failed to resolve.
    pub name: String,
}

/// Resolve a block type by name.
pub fn lookup(name: &str) -> Result<&'static BlockType, UnknownBlockType> {
    BLOCK_TYPES
        .iter()
        .find(|block| block.name == name)
        .ok_or_else(|| UnknownBlockType {
            name: name.to_string(),
        })
}
