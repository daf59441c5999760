#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod block;
pub mod item;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use block::{BlockType, UnknownBlockType, BLOCK_TYPES};
pub use item::{ToolKind, ToolSpec, TOOLS};

/// Fixed tick type (60 TPS by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Display colour as 8-bit red/green/blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);
