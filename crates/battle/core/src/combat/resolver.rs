//! Action resolution.
//!
//! The resolver turns one planned action into mutations on the roster and
//! entries in the effect log. It runs in a fixed order:
//!
//! 1. Resource and item checks (failure consumes the turn, nothing else)
//! 2. Pay the cost and consume the item
//! 3. Per target: hit roll, primary effect, rider status
//!
//! After each target it stops early once either side is wiped, so the
//! session's terminal check always sees the state right after the deciding
//! mutation.

use crate::config::BattleConfig;
use crate::env::{
    Ability, AbilityCategory, AbilityEffect, BattleEnv, Inventory, ItemDefinition, ItemEffect,
    RngOracle, compute_seed, roll,
};
use crate::state::{ApplyOutcome, CombatantId, Roster, Side, StatusDefinition, StatusId};
use crate::stats::StatKind;

use super::damage::{DamageRoll, base_damage, calculate_damage, damage_stats};
use super::flee::calculate_flee_chance;
use super::hit::{calculate_crit_chance, calculate_hit_chance, check_roll};
use super::log::{EffectEntry, EffectLog, ExpiryReason, FailureReason};
use super::targeting::wants_defeated;

/// A validated action ready to resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlannedAction {
    Ability {
        ability: Ability,
        targets: Vec<CombatantId>,
    },
    Flee,
}

impl PlannedAction {
    pub fn defend(actor: CombatantId) -> Self {
        Self::Ability {
            ability: Ability::defend(),
            targets: vec![actor],
        }
    }
}

/// How resolution ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Completed,
    Fled,
}

/// Resolves actions for one nonce.
pub struct Resolver<'r> {
    env: BattleEnv<'r>,
    config: &'r BattleConfig,
    seed: u64,
    nonce: u64,
}

impl<'r> Resolver<'r> {
    pub fn new(env: BattleEnv<'r>, config: &'r BattleConfig, seed: u64, nonce: u64) -> Self {
        Self {
            env,
            config,
            seed,
            nonce,
        }
    }

    pub fn resolve(
        &self,
        roster: &mut Roster,
        inventory: &mut dyn Inventory,
        log: &mut EffectLog,
        actor: CombatantId,
        action: &PlannedAction,
    ) -> Resolution {
        match roster.get(actor) {
            Some(c) if c.is_alive() => {}
            _ => return Resolution::Completed,
        }

        match action {
            PlannedAction::Flee => self.resolve_flee(roster, log, actor),
            PlannedAction::Ability { ability, targets } => {
                self.resolve_ability(roster, inventory, log, actor, ability, targets);
                Resolution::Completed
            }
        }
    }

    fn seed_for(&self, actor: CombatantId, context: u32) -> u64 {
        compute_seed(self.seed, self.nonce, u32::from(actor.0), context)
    }

    fn rng(&self) -> &dyn RngOracle {
        self.env.rng()
    }

    fn resolve_flee(&self, roster: &Roster, log: &mut EffectLog, actor: CombatantId) -> Resolution {
        let side = roster.get(actor).map_or(Side::Ally, |c| c.side);
        let chance = calculate_flee_chance(
            roster.average_speed(side),
            roster.average_speed(side.opponent()),
            self.config,
        );
        let roll = self.rng().roll_d100(self.seed_for(actor, roll::FLEE));

        if check_roll(chance, roll) {
            log.push(EffectEntry::Fled { actor });
            Resolution::Fled
        } else {
            log.push(EffectEntry::FleeFailed { actor, chance });
            Resolution::Completed
        }
    }

    fn resolve_ability(
        &self,
        roster: &mut Roster,
        inventory: &mut dyn Inventory,
        log: &mut EffectLog,
        actor: CombatantId,
        ability: &Ability,
        targets: &[CombatantId],
    ) {
        log.push(EffectEntry::ActionDeclared {
            actor,
            ability: ability.id.clone(),
            targets: targets.to_vec(),
        });

        let fail = |log: &mut EffectLog, reason| {
            log.push(EffectEntry::ActionFailed {
                actor,
                ability: ability.id.clone(),
                reason,
            });
        };

        let Some(user) = roster.get_mut(actor) else {
            return;
        };
        if !user.can_afford(&ability.cost) {
            fail(log, FailureReason::InsufficientResource);
            return;
        }

        let item = match &ability.item {
            Some(id) if inventory.quantity(id) == 0 => {
                fail(log, FailureReason::ItemUnavailable);
                return;
            }
            Some(id) => match self.env.items().item(id) {
                Some(def) => Some(def),
                None => {
                    fail(log, FailureReason::UnknownItem);
                    return;
                }
            },
            None => None,
        };

        // the unit is taken before the cost is paid
        if let Some(def) = &item {
            if !inventory.consume_one(&def.id) {
                fail(log, FailureReason::ItemUnavailable);
                return;
            }
            log.push(EffectEntry::ItemConsumed {
                actor,
                item: def.id.clone(),
            });
        }

        if !ability.cost.is_free() {
            let defeated = user.pay(&ability.cost);
            log.push(EffectEntry::ResourceSpent {
                actor,
                resource: ability.cost.resource,
                amount: ability.cost.amount,
            });
            if let Some(cleared) = defeated {
                log.push_defeat(actor, cleared);
                return;
            }
        }

        if ability.is_defend() {
            let guard = StatusDefinition::defend(self.config.defend_damage_pct);
            apply_status(roster, log, actor, &guard);
            return;
        }

        let wants_defeated = wants_defeated(ability, item.as_ref());
        for (index, &target) in targets.iter().enumerate() {
            let index = index as u32;
            match roster.get(target) {
                Some(t) if t.is_alive() != wants_defeated => {}
                _ => continue,
            }

            if ability.rolls_to_hit() && !self.roll_hit(roster, actor, target, index) {
                log.push(EffectEntry::Missed { actor, target });
                continue;
            }

            match &item {
                Some(def) => self.apply_item(roster, log, actor, target, def),
                None => self.apply_primary(roster, log, actor, target, index, ability),
            }

            if let Some(status) = &ability.status {
                self.apply_status_by_id(roster, log, target, status);
            }

            if is_settled(roster) {
                break;
            }
        }
    }

    fn roll_hit(
        &self,
        roster: &Roster,
        actor: CombatantId,
        target: CombatantId,
        index: u32,
    ) -> bool {
        let (Some(a), Some(t)) = (roster.get(actor), roster.get(target)) else {
            return false;
        };
        let chance = calculate_hit_chance(
            a.effective_stat(StatKind::Speed),
            t.effective_stat(StatKind::Speed),
            self.config,
        );
        let seed = self.seed_for(actor, roll::per_target(roll::HIT, index));
        check_roll(chance, self.rng().roll_d100(seed))
    }

    fn apply_primary(
        &self,
        roster: &mut Roster,
        log: &mut EffectLog,
        actor: CombatantId,
        target: CombatantId,
        index: u32,
        ability: &Ability,
    ) {
        match ability.effect {
            AbilityEffect::Damage if ability.deals_damage() => {
                self.strike(roster, log, actor, target, index, ability);
            }
            AbilityEffect::Heal => {
                let stat = match ability.category {
                    AbilityCategory::Physical => StatKind::Attack,
                    _ => StatKind::Magic,
                };
                let amount = roster
                    .get(actor)
                    .map_or(0, |a| scaled(a.effective_stat(stat), ability.power).max(1));
                heal(roster, log, actor, target, amount);
            }
            AbilityEffect::Revive => {
                let hp = roster
                    .get(target)
                    .map_or(1, |t| scaled(t.max_hp(), ability.power));
                revive(roster, log, actor, target, hp);
            }
            AbilityEffect::Damage | AbilityEffect::StatusOnly => {}
        }
    }

    fn strike(
        &self,
        roster: &mut Roster,
        log: &mut EffectLog,
        actor: CombatantId,
        target: CombatantId,
        index: u32,
        ability: &Ability,
    ) {
        let Some((offense, mitigation)) = damage_stats(ability.category) else {
            return;
        };
        let (Some(a), Some(t)) = (roster.get(actor), roster.get(target)) else {
            return;
        };

        let a_speed = a.effective_stat(StatKind::Speed);
        let t_speed = t.effective_stat(StatKind::Speed);
        let base = base_damage(
            a.effective_stat(offense),
            ability.power,
            t.effective_stat(mitigation),
        );
        let guard_pct = t.statuses.damage_taken_pct();

        let crit_chance = calculate_crit_chance(a_speed, t_speed, self.config);
        let crit_seed = self.seed_for(actor, roll::per_target(roll::CRITICAL, index));
        let critical = check_roll(crit_chance, self.rng().roll_d100(crit_seed));
        let variance_seed = self.seed_for(actor, roll::per_target(roll::VARIANCE, index));
        let variance_pct = self.rng().range(
            variance_seed,
            self.config.variance_min,
            self.config.variance_max,
        );

        let amount = calculate_damage(
            base,
            DamageRoll {
                variance_pct,
                critical,
            },
            guard_pct,
            self.config,
        );

        let Some(t) = roster.get_mut(target) else {
            return;
        };
        let consumed = t.statuses.consume_on_hit();
        let defeated = t.apply_damage(amount);

        log.push(EffectEntry::DamageDealt {
            actor,
            target,
            amount,
            critical,
            guarded: guard_pct != 100,
        });
        for status in consumed {
            log.push(EffectEntry::StatusExpired {
                target,
                status,
                reason: ExpiryReason::Consumed,
            });
        }
        if let Some(cleared) = defeated {
            log.push_defeat(target, cleared);
        }
    }

    fn apply_item(
        &self,
        roster: &mut Roster,
        log: &mut EffectLog,
        actor: CombatantId,
        target: CombatantId,
        item: &ItemDefinition,
    ) {
        match &item.effect {
            ItemEffect::Heal(amount) => heal(roster, log, actor, target, *amount),
            ItemEffect::Revive(pct) => {
                let hp = roster.get(target).map_or(1, |t| scaled(t.max_hp(), *pct));
                revive(roster, log, actor, target, hp);
            }
            ItemEffect::RestoreMana(amount) => {
                let Some(t) = roster.get_mut(target) else {
                    return;
                };
                let restored = t.restore_mp(*amount);
                log.push(EffectEntry::ManaRestored {
                    actor,
                    target,
                    amount: restored,
                });
            }
            ItemEffect::ApplyStatus(status) => {
                self.apply_status_by_id(roster, log, target, status);
            }
        }
    }

    fn apply_status_by_id(
        &self,
        roster: &mut Roster,
        log: &mut EffectLog,
        target: CombatantId,
        status: &StatusId,
    ) {
        match self.env.status(status) {
            Some(definition) => apply_status(roster, log, target, &definition),
            None => tracing::warn!(%status, "status definition missing; skipped"),
        }
    }
}

fn scaled(value: u32, pct: u32) -> u32 {
    (u64::from(value) * u64::from(pct) / 100).min(u64::from(u32::MAX)) as u32
}

fn heal(
    roster: &mut Roster,
    log: &mut EffectLog,
    actor: CombatantId,
    target: CombatantId,
    amount: u32,
) {
    let Some(t) = roster.get_mut(target) else {
        return;
    };
    let healed = t.apply_heal(amount);
    log.push(EffectEntry::Healed {
        actor,
        target,
        amount: healed,
    });
}

fn revive(
    roster: &mut Roster,
    log: &mut EffectLog,
    actor: CombatantId,
    target: CombatantId,
    hp: u32,
) {
    let Some(t) = roster.get_mut(target) else {
        return;
    };
    if t.revive(hp) {
        log.push(EffectEntry::Revived {
            actor,
            target,
            hp: t.hp(),
        });
    }
}

/// Apply a status to a living combatant and log it if it took effect.
pub(crate) fn apply_status(
    roster: &mut Roster,
    log: &mut EffectLog,
    target: CombatantId,
    definition: &StatusDefinition,
) {
    let Some(t) = roster.get_mut(target) else {
        return;
    };
    if !t.is_alive() {
        return;
    }
    let outcome = t.apply_status(definition);
    if outcome.took_effect() {
        log.push(EffectEntry::StatusApplied {
            target,
            status: definition.id.clone(),
            refreshed: outcome == ApplyOutcome::Refreshed,
        });
    }
}

/// Either side has no living combatants left.
pub(crate) fn is_settled(roster: &Roster) -> bool {
    roster.is_wiped(Side::Enemy) || roster.is_wiped(Side::Ally)
}
