use crate::state::{ItemId, StatusId};

/// Item definition looked up by id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub effect: ItemEffect,
}

impl ItemDefinition {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, effect: ItemEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effect,
        }
    }
}

/// What using an item does to each target. Items never miss.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Restore a flat amount of HP to a living target.
    Heal(u32),

    /// Restore a defeated target to this percentage of max HP.
    Revive(u32),

    /// Restore a flat amount of MP.
    RestoreMana(u32),

    /// Apply a status effect.
    ApplyStatus(StatusId),
}

impl ItemEffect {
    /// Revive items are the only ones that may target defeated combatants.
    pub const fn targets_defeated(&self) -> bool {
        matches!(self, ItemEffect::Revive(_))
    }
}

pub trait ItemOracle: Send + Sync {
    fn item(&self, id: &ItemId) -> Option<ItemDefinition>;
}

/// Shared inventory of the allied side.
///
/// This is the only collaborator the session mutates; everything else it
/// consults is read-only.
pub trait Inventory {
    /// Units currently held.
    fn quantity(&self, item: &ItemId) -> u32;

    /// Remove one unit. Returns false if none were held.
    fn consume_one(&mut self, item: &ItemId) -> bool;
}

/// Inventory with nothing in it, for encounters where items are not in play.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyInventory;

impl Inventory for EmptyInventory {
    fn quantity(&self, _item: &ItemId) -> u32 {
        0
    }

    fn consume_one(&mut self, _item: &ItemId) -> bool {
        false
    }
}
