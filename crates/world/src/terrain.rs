//! One-shot terrain generation: stratified layers, ore bands, and trees.
//!
//! Deterministic: the same rules and dimensions always yield the same grid.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::{TilePos, WorldGrid};

/// Layering, ore, and tree parameters for [`WorldGrid::generate`].
///
/// Fractions are relative to the world height; rows grow downward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainRules {
    /// Grass sits on row `floor(height * surface_fraction)`; dirt fills below.
    pub surface_fraction: f64,
    /// Rows strictly below `height * stone_fraction` are stone.
    pub stone_fraction: f64,
    /// Coal replaces stone below this fraction...
    pub coal_fraction: f64,
    /// ...in columns where `col % coal_period == coal_offset`.
    pub coal_period: i32,
    /// Column remainder selecting coal columns.
    pub coal_offset: i32,
    /// Iron replaces stone (and coal) below this fraction...
    pub iron_fraction: f64,
    /// ...in columns where `col % iron_period == iron_offset`.
    pub iron_period: i32,
    /// Column remainder selecting iron columns.
    pub iron_offset: i32,
    /// Trees grow in columns that are multiples of this.
    pub tree_spacing: i32,
    /// Trees need `col > tree_margin` and `col < width - tree_margin - 1`.
    pub tree_margin: i32,
    /// Number of log blocks in a trunk.
    pub trunk_height: i32,
    /// Rows of leaves stacked above the trunk.
    pub canopy_rows: i32,
    /// Leaves extend this many columns either side of the trunk.
    pub canopy_half_width: i32,
    /// Surface search starts at `floor(height * surface_search_fraction)`.
    pub surface_search_fraction: f64,
}

impl Default for TerrainRules {
    fn default() -> Self {
        Self {
            surface_fraction: 0.6,
            stone_fraction: 0.7,
            coal_fraction: 0.75,
            coal_period: 10,
            coal_offset: 0,
            iron_fraction: 0.8,
            iron_period: 15,
            iron_offset: 5,
            tree_spacing: 7,
            tree_margin: 2,
            trunk_height: 3,
            canopy_rows: 2,
            canopy_half_width: 1,
            surface_search_fraction: 0.4,
        }
    }
}

impl TerrainRules {
    /// Block type for a cell before trees are added, or `None` for air.
    pub fn layer_at(&self, col: i32, row: i32, height: u32) -> Option<&'static str> {
        let h = height as f64;
        let r = row as f64;
        if r > h * self.stone_fraction {
            let mut name = "stone";
            if r > h * self.coal_fraction && col.rem_euclid(self.coal_period) == self.coal_offset {
                name = "coal_ore";
            }
            if r > h * self.iron_fraction && col.rem_euclid(self.iron_period) == self.iron_offset {
                name = "iron_ore";
            }
            Some(name)
        } else if r > h * self.surface_fraction {
            Some("dirt")
        } else if row == (h * self.surface_fraction) as i32 {
            Some("grass")
        } else {
            None
        }
    }
}

impl WorldGrid {
    /// Fill the grid with layered terrain and trees over `width` x `height`
    /// blocks. Only empty cells are written.
    pub fn generate(&mut self, width: u32, height: u32, rules: &TerrainRules) {
        self.set_bounds(width, height);
        let (w, h) = (width as i32, height as i32);

        for col in 0..w {
            for row in 0..h {
                if let Some(name) = rules.layer_at(col, row, height) {
                    self.plant(TilePos::new(col, row), name);
                }
            }
        }

        let mut trees = 0;
        for col in 0..w {
            let Some(base) = self.surface_air_row(col, height, rules) else {
                continue;
            };
            if col <= rules.tree_margin
                || col >= w - rules.tree_margin - 1
                || col % rules.tree_spacing != 0
            {
                continue;
            }
            self.grow_tree(col, base, w, rules);
            trees += 1;
        }

        debug!(width, height, blocks = self.len(), trees, "generated terrain");
    }

    /// First empty row sitting directly on grass or dirt in `col`.
    fn surface_air_row(&self, col: i32, height: u32, rules: &TerrainRules) -> Option<i32> {
        let h = height as f64;
        let start = (h * rules.surface_search_fraction) as i32;
        let end = (h * rules.stone_fraction) as i32 + 2;
        (start..end).find_map(|row| {
            let ground = self.get(TilePos::new(col, row))?;
            let open_above = self.get(TilePos::new(col, row - 1)).is_none();
            (matches!(ground.name(), "grass" | "dirt") && open_above).then_some(row - 1)
        })
    }

    fn grow_tree(&mut self, col: i32, base: i32, width: i32, rules: &TerrainRules) {
        for i in 0..rules.trunk_height {
            let row = base - i;
            if row >= 0 {
                self.plant(TilePos::new(col, row), "wood_log");
            }
        }

        let canopy_bottom = base - rules.trunk_height;
        for r in 0..rules.canopy_rows {
            for dc in -rules.canopy_half_width..=rules.canopy_half_width {
                let pos = TilePos::new(col + dc, canopy_bottom - r);
                if pos.row >= 0 && (0..width).contains(&pos.col) {
                    self.plant(pos, "leaves");
                }
            }
        }
    }

    fn plant(&mut self, pos: TilePos, name: &'static str) {
        // Generation only uses catalog names.
        if let Err(err) = self.fill_if_empty(pos, name) {
            debug!(%err, "skipping unknown block during generation");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use tilecraft_physics::Aabb;

    fn generated(width: u32, height: u32) -> WorldGrid {
        let mut grid = WorldGrid::default();
        grid.generate(width, height, &TerrainRules::default());
        grid
    }

    fn name_at(grid: &WorldGrid, col: i32, row: i32) -> Option<&'static str> {
        grid.get(TilePos::new(col, row)).map(|b| b.name())
    }

    #[test]
    fn layers_for_default_world() {
        let grid = generated(100, 30);
        assert_eq!(name_at(&grid, 1, 17), None);
        assert_eq!(name_at(&grid, 1, 18), Some("grass"));
        assert_eq!(name_at(&grid, 1, 19), Some("dirt"));
        assert_eq!(name_at(&grid, 1, 21), Some("dirt"));
        assert_eq!(name_at(&grid, 1, 22), Some("stone"));
        assert_eq!(name_at(&grid, 1, 29), Some("stone"));
        assert_eq!(name_at(&grid, 1, 30), None);
    }

    #[test]
    fn ore_columns() {
        let grid = generated(100, 30);
        assert_eq!(name_at(&grid, 10, 22), Some("stone"));
        assert_eq!(name_at(&grid, 10, 23), Some("coal_ore"));
        assert_eq!(name_at(&grid, 5, 24), Some("stone"));
        assert_eq!(name_at(&grid, 5, 25), Some("iron_ore"));
        // Column 30 is a coal column, not an iron one.
        assert_eq!(name_at(&grid, 30, 29), Some("coal_ore"));
        // Iron wins where both apply.
        assert_eq!(name_at(&grid, 50, 25), Some("iron_ore"));
    }

    #[test]
    fn trees_grow_on_spaced_columns() {
        let grid = generated(100, 30);
        for row in 15..=17 {
            assert_eq!(name_at(&grid, 7, row), Some("wood_log"));
        }
        for row in 13..=14 {
            for col in 6..=8 {
                assert_eq!(name_at(&grid, col, row), Some("leaves"));
            }
        }
        assert_eq!(name_at(&grid, 7, 12), None);
        // Too close to the left edge.
        assert_eq!(name_at(&grid, 0, 17), None);
        // Not on the spacing.
        assert_eq!(name_at(&grid, 8, 17), None);
        // 98 is a multiple of 7 but inside the right margin.
        assert_eq!(name_at(&grid, 98, 17), None);
    }

    #[test]
    fn generation_never_overwrites() {
        let mut grid = WorldGrid::default();
        let nowhere = Aabb::new(IVec2::new(-10_000, -10_000), IVec2::ONE);
        assert!(grid.place(TilePos::new(3, 22), "leaves", &nowhere));
        grid.generate(100, 30, &TerrainRules::default());
        assert_eq!(name_at(&grid, 3, 22), Some("leaves"));
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generated(40, 20);
        let b = generated(40, 20);
        let cells = |g: &WorldGrid| -> Vec<(TilePos, &'static str)> {
            g.iter_sorted().into_iter().map(|(p, b)| (p, b.name())).collect()
        };
        assert_eq!(cells(&a), cells(&b));
        assert_eq!(a.width(), 40);
        assert_eq!(a.height(), 20);
    }
}
