//! Item system - tools and their mining characteristics.
//!
//! Any inventory item whose name is not listed in [`TOOLS`] is treated as a
//! plain item (or a placeable block) and mines like a bare hand.

use serde::{Deserialize, Serialize};

/// Tool categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Pickaxe - mines stone, ores
    Pickaxe,
    /// Axe - chops wood
    Axe,
    /// Shovel - digs dirt, grass
    Shovel,
}

/// Mining characteristics of a tool item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSpec {
    /// Item name as stored in the inventory.
    pub name: &'static str,
    /// Category matched against a block's preferred tool.
    pub kind: ToolKind,
    /// Harvest tier; must be >= the block's required tier.
    pub tier: u8,
    /// Multiplier applied to the base mining speed on a match.
    pub speed_modifier: f64,
}

impl ToolSpec {
    /// Check whether this tool mines a block needing `kind` at `required_tier`
    /// at full speed.
    pub fn matches(&self, kind: Option<ToolKind>, required_tier: u8) -> bool {
        Some(self.kind) == kind && self.tier >= required_tier
    }
}

/// Every tool item known to the game.
pub const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "wooden_pickaxe",
        kind: ToolKind::Pickaxe,
        tier: 1,
        speed_modifier: 2.0,
    },
    ToolSpec {
        name: "stone_pickaxe",
        kind: ToolKind::Pickaxe,
        tier: 2,
        speed_modifier: 4.0,
    },
    ToolSpec {
        name: "wooden_shovel",
        kind: ToolKind::Shovel,
        tier: 1,
        speed_modifier: 2.0,
    },
    ToolSpec {
        name: "stone_shovel",
        kind: ToolKind::Shovel,
        tier: 2,
        speed_modifier: 4.0,
    },
    ToolSpec {
        name: "wooden_axe",
        kind: ToolKind::Axe,
        tier: 1,
        speed_modifier: 2.0,
    },
    ToolSpec {
        name: "stone_axe",
        kind: ToolKind::Axe,
        tier: 2,
        speed_modifier: 4.0,
    },
];

/// Get the tool definition for an item name, if the item is a tool.
pub fn tool_spec(item: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|tool| tool.name == item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_lookup() {
        let pick = tool_spec("wooden_pickaxe").unwrap();
        assert_eq!(pick.kind, ToolKind::Pickaxe);
        assert_eq!(pick.tier, 1);
        assert_eq!(pick.speed_modifier, 2.0);

        assert!(tool_spec("dirt").is_none());
    }

    #[test]
    fn higher_tier_still_matches() {
        let stone_pick = tool_spec("stone_pickaxe").unwrap();
        assert!(stone_pick.matches(Some(ToolKind::Pickaxe), 1));
        assert!(stone_pick.matches(Some(ToolKind::Pickaxe), 2));
        assert!(!stone_pick.matches(Some(ToolKind::Pickaxe), 3));
        assert!(!stone_pick.matches(Some(ToolKind::Axe), 0));
        assert!(!stone_pick.matches(None, 0));
    }
}
