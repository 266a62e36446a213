//! Status effect table.
//!
//! Status effects are timed modifiers attached to a combatant. Durations are
//! counted in rounds and only move at `ROUND_START`:
//!
//! 1. per-round HP deltas apply (poison, regeneration)
//! 2. every remaining duration decrements by 1 (saturating)
//! 3. effects that reached 0 are removed
//!
//! A duration of 0 therefore means "expire at the next tick".

use arrayvec::ArrayVec;

use super::ids::StatusId;
use crate::config::BattleConfig;
use crate::stats::StatModifier;

/// Policy for applying a status that is already present on the target.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StackingPolicy {
    /// Reset the existing instance's duration.
    #[default]
    Refresh,
    /// Add another independent instance.
    Stack,
    /// Leave the existing instance untouched.
    Ignore,
}

/// Static definition of a status effect, as authored in content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusDefinition {
    pub id: StatusId,
    pub name: String,
    /// Duration in rounds assigned on application.
    pub duration: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: ArrayVec<StatModifier, { BattleConfig::MAX_MODIFIERS }>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacking: StackingPolicy,
    /// HP change applied at each round start. Negative values damage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub per_round_hp: i32,
    /// Percentage of incoming hit damage the bearer takes.
    #[cfg_attr(feature = "serde", serde(default = "full_damage"))]
    pub damage_taken_pct: u32,
    /// Removed as soon as the bearer absorbs one hit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumed_on_hit: bool,
    /// Survives the end of combat and is written back to the character record.
    #[cfg_attr(feature = "serde", serde(default))]
    pub persists: bool,
}

#[cfg(feature = "serde")]
const fn full_damage() -> u32 {
    100
}

impl StatusDefinition {
    pub const DEFEND: &'static str = "defend";

    /// Create a definition with no modifiers and default policy.
    pub fn new(id: impl Into<StatusId>, name: impl Into<String>, duration: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            modifiers: ArrayVec::new(),
            stacking: StackingPolicy::Refresh,
            per_round_hp: 0,
            damage_taken_pct: 100,
            consumed_on_hit: false,
            persists: false,
        }
    }

    /// The built-in guard applied by the defend action.
    ///
    /// Lasts a single round and is consumed by the first hit it absorbs.
    pub fn defend(damage_pct: u32) -> Self {
        Self {
            damage_taken_pct: damage_pct,
            consumed_on_hit: true,
            ..Self::new(Self::DEFEND, "Defending", 1)
        }
    }

    /// Add a stat modifier. Extra modifiers past capacity are dropped.
    #[must_use]
    pub fn with_modifier(mut self, modifier: StatModifier) -> Self {
        if !self.modifiers.is_full() {
            self.modifiers.push(modifier);
        }
        self
    }

    #[must_use]
    pub fn with_stacking(mut self, stacking: StackingPolicy) -> Self {
        self.stacking = stacking;
        self
    }

    #[must_use]
    pub fn with_per_round_hp(mut self, delta: i32) -> Self {
        self.per_round_hp = delta;
        self
    }

    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.persists = true;
        self
    }

    /// Create an active instance with the definition's full duration.
    pub fn instantiate(&self) -> StatusEffect {
        StatusEffect {
            id: self.id.clone(),
            remaining: self.duration,
            modifiers: self.modifiers.clone(),
            per_round_hp: self.per_round_hp,
            damage_taken_pct: self.damage_taken_pct,
            consumed_on_hit: self.consumed_on_hit,
            persists: self.persists,
        }
    }
}

/// An active status effect instance on a combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: StatusId,
    /// Rounds left. 0 means the effect expires at the next tick.
    pub remaining: u32,
    pub modifiers: ArrayVec<StatModifier, { BattleConfig::MAX_MODIFIERS }>,
    pub per_round_hp: i32,
    pub damage_taken_pct: u32,
    pub consumed_on_hit: bool,
    pub persists: bool,
}

impl StatusEffect {
    /// Whether this effect changes how much hit damage the bearer takes.
    pub fn is_guard(&self) -> bool {
        self.damage_taken_pct != 100
    }
}

/// What happened when a status was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApplyOutcome {
    /// A new instance was added.
    Applied,
    /// An existing instance had its duration reset.
    Refreshed,
    /// The status was already present and the policy is `Ignore`.
    Ignored,
    /// No room left on the bearer.
    Full,
}

impl ApplyOutcome {
    /// True if the bearer's status list changed.
    pub const fn took_effect(self) -> bool {
        matches!(self, Self::Applied | Self::Refreshed)
    }
}

/// Ordered list of active status effects on one combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Applies an effect following the given stacking policy.
    pub fn apply(&mut self, effect: StatusEffect, stacking: StackingPolicy) -> ApplyOutcome {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.id == effect.id) {
            match stacking {
                StackingPolicy::Refresh => {
                    existing.remaining = effect.remaining;
                    return ApplyOutcome::Refreshed;
                }
                StackingPolicy::Ignore => return ApplyOutcome::Ignored,
                StackingPolicy::Stack => {}
            }
        }

        if self.effects.try_push(effect).is_err() {
            return ApplyOutcome::Full;
        }
        ApplyOutcome::Applied
    }

    /// Checks if any instance of a status is active.
    pub fn contains(&self, id: &StatusId) -> bool {
        self.effects.iter().any(|e| &e.id == id)
    }

    /// Number of active instances of a status.
    pub fn count(&self, id: &StatusId) -> usize {
        self.effects.iter().filter(|e| &e.id == id).count()
    }

    /// Removes every instance of a status. Returns true if any was removed.
    pub fn remove(&mut self, id: &StatusId) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| &e.id != id);
        self.effects.len() != before
    }

    /// Decrements all durations and removes expired effects.
    ///
    /// Returns the ids of removed effects in list order.
    pub fn tick(&mut self) -> Vec<StatusId> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            effect.remaining = effect.remaining.saturating_sub(1);
            if effect.remaining == 0 {
                expired.push(effect.id.clone());
            }
        }
        self.effects.retain(|e| e.remaining > 0);
        expired
    }

    /// Net HP change per round from all active effects, in list order.
    pub fn per_round_deltas(&self) -> impl Iterator<Item = (&StatusId, i32)> + '_ {
        self.effects
            .iter()
            .filter(|e| e.per_round_hp != 0)
            .map(|e| (&e.id, e.per_round_hp))
    }

    /// All stat modifiers from all active effects.
    pub fn modifiers(&self) -> impl Iterator<Item = &StatModifier> + Clone + '_ {
        self.effects.iter().flat_map(|e| e.modifiers.iter())
    }

    /// Combined incoming damage percentage from guard effects.
    pub fn damage_taken_pct(&self) -> u32 {
        self.effects
            .iter()
            .filter(|e| e.is_guard())
            .fold(100, |acc, e| acc * e.damage_taken_pct / 100)
    }

    /// Removes guards consumed by absorbing a hit. Returns their ids.
    pub fn consume_on_hit(&mut self) -> Vec<StatusId> {
        let consumed: Vec<StatusId> = self
            .effects
            .iter()
            .filter(|e| e.consumed_on_hit)
            .map(|e| e.id.clone())
            .collect();
        self.effects.retain(|e| !e.consumed_on_hit);
        consumed
    }

    /// Removes every effect. Returns their ids in list order.
    pub fn clear(&mut self) -> Vec<StatusId> {
        self.effects.drain(..).map(|e| e.id).collect()
    }

    /// Returns an iterator over all effects.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    /// Effects that outlive the encounter.
    pub fn persistent(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter().filter(|e| e.persists)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
