//! Plain-text rendering of bus events and encounter reports.
use std::fmt::Write;

use battle_core::{BattleOutcome, EffectEntry};
use battle_runtime::{CombatEvent, EncounterReport, Event, Party, TurnEvent};

/// One console line for an event, or `None` for events not worth printing.
pub fn describe_event(event: &Event) -> Option<String> {
    match event {
        Event::Turn(TurnEvent::RoundStarted { round }) => {
            Some(format!("── round {round} ──"))
        }
        Event::Turn(TurnEvent::TurnStarted { .. }) => None,
        Event::Turn(TurnEvent::InputRejected { actor, code, reason }) => {
            Some(format!("  {actor} input rejected ({code}): {reason}; defending"))
        }
        Event::Combat(CombatEvent::Effect(entry)) => describe_effect(entry),
        Event::Combat(CombatEvent::Ended { outcome }) => Some(format!("battle over: {outcome}")),
        Event::Combat(CombatEvent::Settled { .. }) => None,
    }
}

fn describe_effect(entry: &EffectEntry) -> Option<String> {
    let line = match entry {
        EffectEntry::ActionDeclared { actor, ability, .. } => format!("  {actor} uses {ability}"),
        EffectEntry::ActionFailed { actor, ability, reason } => {
            format!("  {actor}'s {ability} fails ({reason})")
        }
        EffectEntry::ResourceSpent { .. } | EffectEntry::ItemConsumed { .. } => return None,
        EffectEntry::Missed { target, .. } => format!("    misses {target}"),
        EffectEntry::DamageDealt {
            target,
            amount,
            critical,
            guarded,
            ..
        } => {
            let mut line = format!("    {target} takes {amount}");
            if *critical {
                line.push_str(" (critical)");
            }
            if *guarded {
                line.push_str(" (guarded)");
            }
            line
        }
        EffectEntry::Healed { target, amount, .. } => format!("    {target} recovers {amount} HP"),
        EffectEntry::Revived { target, hp, .. } => format!("    {target} revives with {hp} HP"),
        EffectEntry::ManaRestored { target, amount, .. } => {
            format!("    {target} recovers {amount} MP")
        }
        EffectEntry::StatusApplied {
            target,
            status,
            refreshed,
        } => {
            let verb = if *refreshed { "renewed on" } else { "afflicts" };
            format!("    {status} {verb} {target}")
        }
        EffectEntry::StatusExpired { target, status, .. } => {
            format!("    {status} wears off {target}")
        }
        EffectEntry::StatusDamage {
            target,
            status,
            amount,
        } => format!("  {target} takes {amount} from {status}"),
        EffectEntry::StatusHeal {
            target,
            status,
            amount,
        } => format!("  {target} recovers {amount} from {status}"),
        EffectEntry::Defeated { target } => format!("    {target} is defeated"),
        EffectEntry::FleeFailed { actor, chance } => {
            format!("  {actor} fails to flee ({chance}% chance)")
        }
        EffectEntry::Fled { actor } => format!("  {actor} leads the party away"),
    };
    Some(line)
}

/// Summary printed after the encounter settles.
pub fn render_report(report: &EncounterReport, party: &Party) -> String {
    let result = &report.result;
    let mut out = String::new();

    let _ = writeln!(out, "{} (seed {})", report.encounter, report.seed);
    let _ = writeln!(out, "outcome: {} after {} rounds", result.outcome, result.rounds);
    if result.outcome == BattleOutcome::Victory {
        let rewards = &result.rewards;
        let _ = writeln!(
            out,
            "rewards: {} exp, {} gold",
            rewards.experience, rewards.currency
        );
        for drop in &rewards.drops {
            let _ = writeln!(out, "  found {} x{}", drop.item, drop.quantity);
        }
    }
    for level_up in &report.level_ups {
        let _ = writeln!(out, "{} reached level {}", level_up.member, level_up.new_level);
    }

    let _ = writeln!(out, "party (gold {}):", party.currency);
    for member in party.members() {
        let stats = &member.template.stats;
        let _ = writeln!(
            out,
            "  {:<12} lv{:<3} hp {:>4}/{:<4} mp {:>3}/{:<3}",
            member.template.name,
            member.level(),
            member.vitals.hp,
            stats.max_hp,
            member.vitals.mp,
            stats.max_mp
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{CombatantId, Phase};

    #[test]
    fn turn_markers_are_mostly_quiet() {
        let started = Event::Turn(TurnEvent::TurnStarted {
            actor: CombatantId(0),
            side: battle_core::Side::Ally,
        });
        assert_eq!(describe_event(&started), None);

        let round = Event::Turn(TurnEvent::RoundStarted { round: 3 });
        assert_eq!(describe_event(&round).as_deref(), Some("── round 3 ──"));
    }

    #[test]
    fn damage_lines_flag_criticals() {
        let hit = Event::Combat(CombatEvent::Effect(EffectEntry::DamageDealt {
            actor: CombatantId(0),
            target: CombatantId(1),
            amount: 22,
            critical: true,
            guarded: false,
        }));
        let line = describe_event(&hit).unwrap();
        assert!(line.contains("22"));
        assert!(line.ends_with("(critical)"));

        let ended = Event::Combat(CombatEvent::Ended {
            outcome: Phase::Defeat,
        });
        assert!(describe_event(&ended).unwrap().contains("DEFEAT"));
    }
}
