//! Inventory system for the player's hotbar.
//!
//! Fixed-capacity slots holding named item stacks. Stacking is unbounded and
//! every item type occupies at most one slot; `add` enforces this and
//! `remove` relies on it.

use serde::Serialize;
use tracing::debug;

/// Default number of slots (matches the ten hotbar keys).
pub const DEFAULT_CAPACITY: usize = 10;

/// Represents a stack of items in an inventory slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemStack {
    /// Item type name (block name or tool name).
    pub item: String,
    /// Number of items in this stack, always > 0.
    pub count: u32,
}

impl ItemStack {
    /// Create a new item stack.
    pub fn new(item: impl Into<String>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }
}

/// Player inventory with a fixed number of slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
}

impl Inventory {
    /// Create an empty inventory with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// All slots in order.
    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    /// Contents of `slot`, or `None` when empty or out of range.
    pub fn item_at(&self, slot: usize) -> Option<(&str, u32)> {
        self.slots
            .get(slot)?
            .as_ref()
            .map(|stack| (stack.item.as_str(), stack.count))
    }

    /// Add `quantity` of `item`.
    ///
    /// Stacks onto the slot already holding `item` if there is one, otherwise
    /// takes the lowest empty slot. Returns false (and changes nothing) when
    /// neither exists, the stack would overflow `u32`, or `quantity` is zero.
    pub fn add(&mut self, item: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }

        if let Some(stack) = self.slots.iter_mut().flatten().find(|s| s.item == item) {
            let Some(count) = stack.count.checked_add(quantity) else {
                debug!(item, quantity, "stack count would overflow");
                return false;
            };
            stack.count = count;
            return true;
        }

        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(ItemStack::new(item, quantity));
                true
            }
            None => {
                debug!(item, quantity, "inventory full");
                false
            }
        }
    }

    /// Remove `quantity` of `item` from its slot.
    ///
    /// Fails without mutation when the item is absent, the slot holds fewer
    /// than `quantity`, or `quantity` is zero. A slot that reaches zero is
    /// emptied.
    pub fn remove(&mut self, item: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }

        let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|s| s.item == item))
        else {
            return false;
        };

        let Some(stack) = slot.as_mut() else {
            return false;
        };
        if stack.count < quantity {
            return false;
        }
        if stack.count == quantity {
            *slot = None;
        } else {
            stack.count -= quantity;
        }
        true
    }

    /// Count the total number of a specific item in the inventory.
    pub fn count(&self, item: &str) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.item == item)
            .map(|stack| stack.count)
            .sum()
    }

    /// Find the slot containing a specific item.
    pub fn find_item(&self, item: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|s| s.item == item))
    }

    /// Get the number of empty slots.
    pub fn empty_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Check if the inventory is completely empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
