//! Deterministic action policy for AI-controlled combatants.
//!
//! The policy targets the opposing combatant with the lowest current HP
//! (first in roster order on ties) and picks the known ability with the
//! highest expected damage against it. Expected damage is formula damage
//! times hit chance; ties keep ability list order. Items and unaffordable
//! abilities are skipped. With no damaging option the combatant defends.

use crate::combat::{PlannedAction, base_damage, calculate_hit_chance, candidates, damage_stats};
use crate::config::BattleConfig;
use crate::env::{Ability, AbilityCategory, BattleEnv};
use crate::state::{Combatant, CombatantId, Roster};
use crate::stats::StatKind;

use super::command::ActionCommand;

/// Pick an action for `actor`. Works for either side.
pub fn choose_action(
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    roster: &Roster,
    actor: CombatantId,
) -> PlannedAction {
    let Some(me) = roster.get(actor) else {
        return PlannedAction::defend(actor);
    };
    let Some(target) = roster.living(me.side.opponent()).min_by_key(|c| c.hp()) else {
        return PlannedAction::defend(actor);
    };

    let mut best: Option<(u64, Ability)> = None;
    for id in &me.abilities {
        let Some(ability) = env.ability(id) else {
            continue;
        };
        let Some(expected) = expected_damage(config, me, target, &ability) else {
            continue;
        };
        if best.as_ref().is_none_or(|(score, _)| expected > *score) {
            best = Some((expected, ability));
        }
    }

    match best {
        Some((expected, ability)) => {
            tracing::debug!(
                actor = %actor,
                ability = %ability.id,
                target = %target.id,
                expected,
                "ai chose ability"
            );
            let targets = if ability.target.is_single() {
                vec![target.id]
            } else {
                candidates(roster, me, &ability, false)
            };
            PlannedAction::Ability { ability, targets }
        }
        None => {
            tracing::debug!(actor = %actor, "ai has no damaging option; defending");
            PlannedAction::defend(actor)
        }
    }
}

/// Same policy, expressed as a submittable command.
pub fn choose_command(
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    roster: &Roster,
    actor: CombatantId,
) -> ActionCommand {
    match choose_action(env, config, roster, actor) {
        PlannedAction::Ability { ability, .. } if ability.is_defend() => ActionCommand::defend(),
        PlannedAction::Ability { ability, targets } => ActionCommand::ability(ability.id, targets),
        PlannedAction::Flee => ActionCommand::flee(),
    }
}

/// Damage × hit chance, scaled by 100. `None` when the ability is not a
/// usable damaging option.
fn expected_damage(
    config: &BattleConfig,
    me: &Combatant,
    target: &Combatant,
    ability: &Ability,
) -> Option<u64> {
    if ability.category == AbilityCategory::Item
        || !ability.deals_damage()
        || !ability.target.is_hostile()
        || !me.can_afford(&ability.cost)
    {
        return None;
    }
    let (offense, mitigation) = damage_stats(ability.category)?;
    let damage = base_damage(
        me.effective_stat(offense),
        ability.power,
        target.effective_stat(mitigation),
    );
    let chance = calculate_hit_chance(
        me.effective_stat(StatKind::Speed),
        target.effective_stat(StatKind::Speed),
        config,
    );
    Some(u64::from(damage) * u64::from(chance))
}
