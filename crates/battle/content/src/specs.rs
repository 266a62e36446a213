//! Authored definitions that are not core types: encounters, the starting
//! party and balance tables.

use battle_core::{BaseStats, BattleConfig, ItemId, Side, StatusId, TemplateId};

/// Status applied to one side during SETUP (ambushes, blessings).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpeningStatus {
    pub side: Side,
    pub status: StatusId,
}

/// One fight: which monsters appear and how the encounter is set up.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSpec {
    pub name: String,
    pub enemies: Vec<TemplateId>,
    #[cfg_attr(feature = "serde", serde(default = "escapable_by_default"))]
    pub escapable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub opening: Vec<OpeningStatus>,
}

#[cfg(feature = "serde")]
const fn escapable_by_default() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub item: ItemId,
    pub quantity: u32,
}

/// Starting state of the persistent party.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartySpec {
    pub members: Vec<TemplateId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Vec<ItemStack>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub currency: u32,
}

/// Level curve and per-level stat growth for party members.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionTable {
    /// Experience needed for the next level is `level * experience_per_level`.
    pub experience_per_level: u32,
    /// Added to base stats on each level up.
    pub growth: BaseStats,
}

impl ProgressionTable {
    pub const DEFAULT_EXPERIENCE_PER_LEVEL: u32 = 100;

    pub fn experience_to_next(&self, level: u32) -> u32 {
        level.saturating_mul(self.experience_per_level)
    }
}

impl Default for ProgressionTable {
    fn default() -> Self {
        Self {
            experience_per_level: Self::DEFAULT_EXPERIENCE_PER_LEVEL,
            growth: BaseStats::new(8, 3, 2, 2, 2, 2, 1),
        }
    }
}

/// Everything in `tables.toml`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tables {
    pub combat: BattleConfig,
    pub progression: ProgressionTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_curve_is_linear() {
        let table = ProgressionTable::default();
        assert_eq!(table.experience_to_next(1), 100);
        assert_eq!(table.experience_to_next(4), 400);
        assert_eq!(table.experience_to_next(u32::MAX), u32::MAX);
    }
}
