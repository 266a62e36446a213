//! Outcome and reward calculation.
//!
//! Runs once, when the session reaches a terminal phase. Rewards are only
//! rolled on victory. Ally vitals are always reported so the caller can write
//! them back to persistent records; enemy instances are discarded.

use crate::combat::check_roll;
use crate::env::{LevelUp, Progression, RngOracle, compute_seed, roll};
use crate::state::{CombatantId, ItemId, Roster, Side, StatusEffect, TemplateId};

use super::phase::Phase;

/// Terminal result of a session.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
}

impl BattleOutcome {
    pub const fn from_phase(phase: Phase) -> Option<Self> {
        match phase {
            Phase::Victory => Some(Self::Victory),
            Phase::Defeat => Some(Self::Defeat),
            Phase::Fled => Some(Self::Fled),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDrop {
    pub item: ItemId,
    pub quantity: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    /// Granted in full to every surviving ally.
    pub experience: u32,
    pub currency: u32,
    pub drops: Vec<ItemDrop>,
}

impl Rewards {
    fn add_drop(&mut self, item: &ItemId, quantity: u32) {
        match self.drops.iter_mut().find(|d| &d.item == item) {
            Some(existing) => existing.quantity += quantity,
            None => self.drops.push(ItemDrop {
                item: item.clone(),
                quantity,
            }),
        }
    }
}

/// HP, MP and persisting statuses carried in and out of a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub hp: u32,
    pub mp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub statuses: Vec<StatusEffect>,
}

/// Final state of one ally, for writing back to its persistent record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllyWriteback {
    pub combatant: CombatantId,
    pub member: TemplateId,
    pub vitals: Vitals,
}

impl AllyWriteback {
    pub fn is_alive(&self) -> bool {
        self.vitals.hp > 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    pub rounds: u32,
    pub rewards: Rewards,
    pub allies: Vec<AllyWriteback>,
}

impl BattleResult {
    pub fn calculate(
        outcome: BattleOutcome,
        rounds: u32,
        roster: &Roster,
        rng: &dyn RngOracle,
        seed: u64,
        nonce: u64,
    ) -> Self {
        let rewards = match outcome {
            BattleOutcome::Victory => roll_rewards(roster, rng, seed, nonce),
            BattleOutcome::Defeat | BattleOutcome::Fled => Rewards::default(),
        };

        let allies = roster
            .side(Side::Ally)
            .map(|c| AllyWriteback {
                combatant: c.id,
                member: c.template.clone(),
                vitals: Vitals {
                    hp: c.hp(),
                    mp: c.mp(),
                    statuses: c.statuses.persistent().cloned().collect(),
                },
            })
            .collect();

        Self {
            outcome,
            rounds,
            rewards,
            allies,
        }
    }

    pub fn is_victory(&self) -> bool {
        self.outcome == BattleOutcome::Victory
    }

    /// Report rewards to the progression collaborator. No-op unless victorious.
    pub fn award(&self, progression: &mut dyn Progression) -> Vec<LevelUp> {
        if !self.is_victory() {
            return Vec::new();
        }

        let mut level_ups = Vec::new();
        for ally in self.allies.iter().filter(|a| a.is_alive()) {
            if let Some(level_up) =
                progression.grant_experience(&ally.member, self.rewards.experience)
            {
                tracing::info!(member = %level_up.member, level = level_up.new_level, "level up");
                level_ups.push(level_up);
            }
        }
        if self.rewards.currency > 0 {
            progression.grant_currency(self.rewards.currency);
        }
        for drop in &self.rewards.drops {
            progression.grant_item(&drop.item, drop.quantity);
        }
        level_ups
    }
}

fn roll_rewards(roster: &Roster, rng: &dyn RngOracle, seed: u64, nonce: u64) -> Rewards {
    let mut rewards = Rewards::default();

    for enemy in roster.side(Side::Enemy).filter(|c| !c.is_alive()) {
        let Some(bounty) = &enemy.bounty else {
            continue;
        };
        rewards.experience = rewards.experience.saturating_add(bounty.experience);
        rewards.currency = rewards.currency.saturating_add(bounty.currency);

        for (index, drop) in bounty.drops.iter().enumerate() {
            let context = roll::per_target(roll::DROP, index as u32);
            let drop_seed = compute_seed(seed, nonce, u32::from(enemy.id.0), context);
            if check_roll(drop.chance, rng.roll_d100(drop_seed)) {
                rewards.add_drop(&drop.item, drop.quantity);
            }
        }
    }

    rewards
}
