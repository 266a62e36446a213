//! Combatant templates.
//!
//! Templates are persistent definitions (characters, monsters). A session
//! spawns fresh [`Combatant`](crate::state::Combatant)s from them and never
//! mutates the template itself.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::state::{AbilityId, ItemId, TemplateId};
use crate::stats::BaseStats;

/// Combatant template defining everything except session-local state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub id: TemplateId,
    pub name: String,
    pub level: u32,
    pub stats: BaseStats,
    pub abilities: ArrayVec<AbilityId, { BattleConfig::MAX_ABILITIES }>,
    /// Rewards for defeating this template; ignored for allies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bounty: Option<Bounty>,
}

impl CombatantTemplate {
    pub fn new(id: impl Into<TemplateId>, name: impl Into<String>, stats: BaseStats) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level: 1,
            stats,
            abilities: ArrayVec::new(),
            bounty: None,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Add an ability to the template. Extra abilities past capacity are dropped.
    #[must_use]
    pub fn with_ability(mut self, ability: impl Into<AbilityId>) -> Self {
        if !self.abilities.is_full() {
            self.abilities.push(ability.into());
        }
        self
    }

    #[must_use]
    pub fn with_bounty(mut self, bounty: Bounty) -> Self {
        self.bounty = Some(bounty);
        self
    }
}

/// Rewards granted for defeating an enemy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounty {
    pub experience: u32,
    pub currency: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub drops: Vec<DropEntry>,
}

impl Bounty {
    pub fn new(experience: u32, currency: u32) -> Self {
        Self {
            experience,
            currency,
            drops: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_drop(mut self, drop: DropEntry) -> Self {
        self.drops.push(drop);
        self
    }
}

/// One entry of a drop table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropEntry {
    pub item: ItemId,
    /// Percent chance (1-100) the drop is awarded.
    pub chance: u32,
    pub quantity: u32,
}

impl DropEntry {
    pub fn new(item: impl Into<ItemId>, chance: u32, quantity: u32) -> Self {
        Self {
            item: item.into(),
            chance,
            quantity,
        }
    }
}
