//! Combatant state: immutable base stats plus mutable current state.

use arrayvec::ArrayVec;

use super::ids::{AbilityId, CombatantId, Side, StatusId, TemplateId};
use super::status::{ApplyOutcome, StatusDefinition, StatusEffects};
use crate::config::BattleConfig;
use crate::env::{Bounty, CombatantTemplate, ResourceCost};
use crate::stats::{BaseStats, ResourceKind, ResourceMeter, StatKind, apply_modifiers};

/// A participant in a combat session.
///
/// # Invariants
///
/// - `hp` and `mp` are always within `[0, max]` (enforced by [`ResourceMeter`])
/// - A combatant with `hp == 0` is defeated and carries no status effects
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub template: TemplateId,
    pub side: Side,
    pub level: u32,
    pub stats: BaseStats,
    hp: ResourceMeter,
    mp: ResourceMeter,
    pub statuses: StatusEffects,
    pub abilities: ArrayVec<AbilityId, { BattleConfig::MAX_ABILITIES }>,
    /// Rewards granted when this combatant is defeated (enemies only).
    pub bounty: Option<Bounty>,
}

impl Combatant {
    /// Spawn a fresh combatant from a template at full HP/MP.
    pub fn from_template(id: CombatantId, side: Side, template: &CombatantTemplate) -> Self {
        Self {
            id,
            name: template.name.clone(),
            template: template.id.clone(),
            side,
            level: template.level,
            stats: template.stats.clone(),
            hp: ResourceMeter::full(template.stats.max_hp),
            mp: ResourceMeter::full(template.stats.max_mp),
            statuses: StatusEffects::empty(),
            abilities: template.abilities.clone(),
            bounty: match side {
                Side::Enemy => template.bounty.clone(),
                Side::Ally => None,
            },
        }
    }

    /// Override current HP/MP (e.g., carried over from a persistent record).
    #[must_use]
    pub fn with_vitals(mut self, hp: u32, mp: u32) -> Self {
        self.hp = ResourceMeter::new(hp, self.stats.max_hp);
        self.mp = ResourceMeter::new(mp, self.stats.max_mp);
        self
    }

    pub fn hp(&self) -> u32 {
        self.hp.current()
    }

    pub fn mp(&self) -> u32 {
        self.mp.current()
    }

    pub fn max_hp(&self) -> u32 {
        self.hp.max()
    }

    pub fn max_mp(&self) -> u32 {
        self.mp.max()
    }

    /// Quick check if combatant can still act and be targeted.
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    /// Base stat combined with every active status modifier, floored at 0.
    pub fn effective_stat(&self, stat: StatKind) -> u32 {
        apply_modifiers(self.stats.get(stat), stat, self.statuses.modifiers())
    }

    /// Subtract HP, clamping at 0.
    ///
    /// Returns `Some` only on the alive → defeated transition, holding the
    /// ids of the status effects the defeat removed.
    pub fn apply_damage(&mut self, amount: u32) -> Option<Vec<StatusId>> {
        if !self.is_alive() {
            return None;
        }
        self.hp.drain(amount);
        self.hp.is_empty().then(|| self.statuses.clear())
    }

    /// Add HP, clamping at max. Returns the amount healed.
    ///
    /// Healing never affects a defeated combatant; use [`revive`](Self::revive).
    pub fn apply_heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        self.hp.restore(amount)
    }

    /// Bring a defeated combatant back with `amount` HP (at least 1).
    ///
    /// Returns false if the combatant was not defeated.
    pub fn revive(&mut self, amount: u32) -> bool {
        if self.is_alive() {
            return false;
        }
        self.hp.restore(amount.max(1));
        true
    }

    /// Restore MP, clamping at max. Returns the amount restored.
    pub fn restore_mp(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        self.mp.restore(amount)
    }

    /// Whether the combatant holds enough of the cost's resource.
    pub fn can_afford(&self, cost: &ResourceCost) -> bool {
        let available = match cost.resource {
            ResourceKind::Hp => self.hp(),
            ResourceKind::Mp => self.mp(),
        };
        available >= cost.amount
    }

    /// Deduct an ability cost. Returns `Some` if paying HP caused defeat,
    /// as [`apply_damage`](Self::apply_damage) does.
    ///
    /// Callers must check [`can_afford`](Self::can_afford) first.
    pub fn pay(&mut self, cost: &ResourceCost) -> Option<Vec<StatusId>> {
        match cost.resource {
            ResourceKind::Hp => self.apply_damage(cost.amount),
            ResourceKind::Mp => {
                self.mp.drain(cost.amount);
                None
            }
        }
    }

    /// Attach a status from its definition.
    pub fn apply_status(&mut self, definition: &StatusDefinition) -> ApplyOutcome {
        self.statuses
            .apply(definition.instantiate(), definition.stacking)
    }

    pub fn knows(&self, ability: &AbilityId) -> bool {
        self.abilities.iter().any(|a| a == ability)
    }
}
