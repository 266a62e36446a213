//! Traits describing the collaborators a session consults.
//!
//! Oracles expose static ability, status and item catalogs plus the random
//! source. The [`BattleEnv`] aggregate bundles them so the engine can access
//! everything it needs without hard coupling to concrete implementations.
//! Mutable collaborators ([`Inventory`], [`Progression`]) are passed
//! separately because the caller keeps ownership of them.
mod abilities;
mod items;
mod progression;
mod rng;
mod statuses;
mod templates;

pub use abilities::{
    Ability, AbilityCategory, AbilityEffect, AbilityOracle, ResourceCost, TargetShape,
};
pub use items::{EmptyInventory, Inventory, ItemDefinition, ItemEffect, ItemOracle};
pub use progression::{LevelUp, Progression};
pub use rng::{FixedRng, PcgRng, RngOracle, compute_seed, roll};
pub use statuses::StatusOracle;
pub use templates::{Bounty, CombatantTemplate, DropEntry};

use crate::state::{AbilityId, StatusDefinition, StatusId};

/// Aggregates the read-only oracles required by the session.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    abilities: &'a dyn AbilityOracle,
    statuses: &'a dyn StatusOracle,
    items: &'a dyn ItemOracle,
    rng: &'a dyn RngOracle,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        abilities: &'a dyn AbilityOracle,
        statuses: &'a dyn StatusOracle,
        items: &'a dyn ItemOracle,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            abilities,
            statuses,
            items,
            rng,
        }
    }

    /// Looks up an ability, resolving the built-in defend first.
    pub fn ability(&self, id: &AbilityId) -> Option<Ability> {
        if id.as_str() == Ability::DEFEND {
            return Some(Ability::defend());
        }
        self.abilities.ability(id)
    }

    pub fn status(&self, id: &StatusId) -> Option<StatusDefinition> {
        self.statuses.status(id)
    }

    pub fn items(&self) -> &'a dyn ItemOracle {
        self.items
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv").finish_non_exhaustive()
    }
}
