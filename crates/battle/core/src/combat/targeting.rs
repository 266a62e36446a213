//! Target selection for abilities.

use crate::env::{Ability, AbilityEffect, ItemDefinition, TargetShape};
use crate::state::{Combatant, CombatantId, Roster};

/// Why a requested target set was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetIssue {
    #[error("expected exactly one target, got {0}")]
    WrongCount(usize),

    #[error("combatant {0} is not in the roster")]
    NotInRoster(CombatantId),

    #[error("combatant {0} is on the wrong side")]
    WrongSide(CombatantId),

    #[error("combatant {0} is defeated")]
    Defeated(CombatantId),

    #[error("combatant {0} is not defeated")]
    NotDefeated(CombatantId),

    #[error("combatant {0} is outside the ability's target shape")]
    OutsideShape(CombatantId),

    #[error("no valid targets")]
    NoneAvailable,
}

/// Whether an action is aimed at defeated combatants (revive effects).
pub fn wants_defeated(ability: &Ability, item: Option<&ItemDefinition>) -> bool {
    match item {
        Some(item) => item.effect.targets_defeated(),
        None => ability.effect == AbilityEffect::Revive,
    }
}

/// Every combatant the ability's shape covers, in roster order.
pub fn candidates(
    roster: &Roster,
    actor: &Combatant,
    ability: &Ability,
    wants_defeated: bool,
) -> Vec<CombatantId> {
    if ability.target == TargetShape::User {
        return vec![actor.id];
    }

    let side = ability.target.target_side(actor.side);
    roster
        .side(side)
        .filter(|c| c.is_alive() != wants_defeated)
        .map(|c| c.id)
        .collect()
}

/// Check requested targets against the ability's shape.
///
/// Single shapes take exactly one target. Area and self shapes always
/// expand to their full candidate set; any ids the caller passes must lie
/// inside it.
pub fn select_targets(
    roster: &Roster,
    actor: &Combatant,
    ability: &Ability,
    wants_defeated: bool,
    requested: &[CombatantId],
) -> Result<Vec<CombatantId>, TargetIssue> {
    if ability.target.is_single() {
        let [id] = requested else {
            return Err(TargetIssue::WrongCount(requested.len()));
        };
        let target = roster.get(*id).ok_or(TargetIssue::NotInRoster(*id))?;
        if target.side != ability.target.target_side(actor.side) {
            return Err(TargetIssue::WrongSide(*id));
        }
        return match (target.is_alive(), wants_defeated) {
            (true, true) => Err(TargetIssue::NotDefeated(*id)),
            (false, false) => Err(TargetIssue::Defeated(*id)),
            _ => Ok(vec![*id]),
        };
    }

    let expanded = candidates(roster, actor, ability, wants_defeated);
    if expanded.is_empty() {
        return Err(TargetIssue::NoneAvailable);
    }
    for id in requested {
        if roster.get(*id).is_none() {
            return Err(TargetIssue::NotInRoster(*id));
        }
        if !expanded.contains(id) {
            return Err(TargetIssue::OutsideShape(*id));
        }
    }
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AbilityCategory, CombatantTemplate};
    use crate::state::Side;
    use crate::stats::BaseStats;

    fn roster() -> Roster {
        let stats = BaseStats::new(10, 0, 5, 1, 1, 1, 5);
        let template = CombatantTemplate::new("grunt", "Grunt", stats);
        let mut roster = Roster::new();
        for side in [Side::Ally, Side::Ally, Side::Enemy, Side::Enemy] {
            let c = Combatant::from_template(roster.next_id(), side, &template);
            roster.push(c).unwrap();
        }
        roster.get_mut(CombatantId(3)).unwrap().apply_damage(10);
        roster
    }

    fn slash() -> Ability {
        Ability::new(
            "slash",
            "Slash",
            AbilityCategory::Physical,
            100,
            TargetShape::SingleEnemy,
        )
    }

    #[test]
    fn single_target_checks_side_and_liveness() {
        let roster = roster();
        let actor = roster.get(CombatantId(0)).unwrap();
        let ability = slash();

        assert_eq!(
            select_targets(&roster, actor, &ability, false, &[CombatantId(2)]),
            Ok(vec![CombatantId(2)])
        );
        assert_eq!(
            select_targets(&roster, actor, &ability, false, &[CombatantId(1)]),
            Err(TargetIssue::WrongSide(CombatantId(1)))
        );
        assert_eq!(
            select_targets(&roster, actor, &ability, false, &[CombatantId(3)]),
            Err(TargetIssue::Defeated(CombatantId(3)))
        );
        assert_eq!(
            select_targets(&roster, actor, &ability, false, &[CombatantId(9)]),
            Err(TargetIssue::NotInRoster(CombatantId(9)))
        );
        assert_eq!(
            select_targets(&roster, actor, &ability, false, &[]),
            Err(TargetIssue::WrongCount(0))
        );
    }

    #[test]
    fn area_shapes_expand_to_living_members() {
        let roster = roster();
        let actor = roster.get(CombatantId(0)).unwrap();
        let sweep = Ability::new(
            "sweep",
            "Sweep",
            AbilityCategory::Physical,
            60,
            TargetShape::AllEnemies,
        );

        assert_eq!(
            select_targets(&roster, actor, &sweep, false, &[]),
            Ok(vec![CombatantId(2)])
        );
        assert_eq!(
            select_targets(&roster, actor, &sweep, false, &[CombatantId(3)]),
            Err(TargetIssue::OutsideShape(CombatantId(3)))
        );
    }

    #[test]
    fn revive_targets_defeated_only() {
        let roster = roster();
        let actor = roster.get(CombatantId(2)).unwrap();
        let raise = Ability::new(
            "raise",
            "Raise",
            AbilityCategory::Magical,
            50,
            TargetShape::SingleAlly,
        )
        .with_effect(AbilityEffect::Revive);
        assert!(wants_defeated(&raise, None));
        assert_eq!(
            select_targets(&roster, actor, &raise, true, &[CombatantId(3)]),
            Ok(vec![CombatantId(3)])
        );
        assert_eq!(
            select_targets(&roster, actor, &raise, true, &[CombatantId(2)]),
            Err(TargetIssue::NotDefeated(CombatantId(2)))
        );
    }

    #[test]
    fn user_shape_is_always_the_actor() {
        let roster = roster();
        let actor = roster.get(CombatantId(1)).unwrap();
        assert_eq!(
            select_targets(&roster, actor, &Ability::defend(), false, &[]),
            Ok(vec![CombatantId(1)])
        );
    }
}
