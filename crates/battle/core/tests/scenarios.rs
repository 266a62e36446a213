//! End-to-end encounter scenarios driven through the public session API.

mod common;

use battle_core::{
    ActionCommand, BattleCommander, BattleConfig, BattleEnv, BattleOutcome, BattleReader,
    BaseStats, CombatSession, CombatantId, CombatantTemplate, EffectEntry, EmptyInventory,
    ExpiryReason, FixedRng, ItemId, Phase, ResourceKind, Side, StatusId, StepOutcome, SubmitError,
    TargetIssue, Vitals,
};
use common::{Bag, Catalog, Recorder, Seen, fighter};

const A: CombatantId = CombatantId(0);
const B: CombatantId = CombatantId(1);

fn effects(seen: &[Seen]) -> Vec<&EffectEntry> {
    seen.iter()
        .filter_map(|s| match s {
            Seen::Effect(entry) => Some(entry),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Reference duel
// ============================================================================

/// A (ATK 20, SPD 10) strikes B (DEF 5, HP 30, SPD 5) twice and wins before
/// B's second turn.
#[test]
fn reference_duel_ends_before_slower_enemy_acts_again() {
    let catalog = Catalog::standard();
    let rng = FixedRng(0);
    let env = BattleEnv::new(&catalog, &catalog, &catalog, &rng);
    let mut inv = EmptyInventory;
    let mut session = CombatSession::builder(env)
        .config(BattleConfig::fixed())
        .seed(42)
        .ally(fighter("a", 20, 5, 40, 10))
        .enemy(fighter("b", 4, 5, 30, 5))
        .build(&mut inv)
        .unwrap();

    assert_eq!(session.step(), StepOutcome::Advanced(Phase::RoundStart));
    assert_eq!(session.step(), StepOutcome::Advanced(Phase::AwaitingAction));
    assert_eq!(session.queue().remaining().collect::<Vec<_>>(), vec![A, B]);

    assert_eq!(session.step(), StepOutcome::AwaitingInput(A));
    session.submit_action(ActionCommand::target("strike", B)).unwrap();
    assert_eq!(session.phase(), Phase::Resolving);
    assert_eq!(session.step(), StepOutcome::Advanced(Phase::AwaitingAction));
    assert_eq!(session.combatant(B).unwrap().hp(), 15);
    assert!(session.effect_log().contains(&EffectEntry::DamageDealt {
        actor: A,
        target: B,
        amount: 15,
        critical: false,
        guarded: false,
    }));

    // B acts, round 2 opens with A first again.
    assert_eq!(session.run_until_input(), StepOutcome::AwaitingInput(A));
    assert_eq!(session.round(), 2);
    assert_eq!(session.combatant(A).unwrap().hp(), 39);

    session.submit_action(ActionCommand::target("strike", B)).unwrap();
    assert_eq!(session.step(), StepOutcome::Finished(Phase::Victory));
    assert_eq!(session.combatant(B).unwrap().hp(), 0);
    assert_eq!(session.queue().remaining().collect::<Vec<_>>(), vec![B]);

    let result = session.result().unwrap();
    assert_eq!(result.outcome, BattleOutcome::Victory);
    assert_eq!(result.rounds, 2);
    assert_eq!(result.allies[0].vitals.hp, 39);

    // terminal phases are absorbing
    assert_eq!(session.step(), StepOutcome::Finished(Phase::Victory));
    assert_eq!(
        session.submit_action(ActionCommand::target("strike", B)),
        Err(SubmitError::InvalidPhase(Phase::Victory))
    );
}

#[test]
fn submission_outside_awaiting_action_changes_nothing() {
    let catalog = Catalog::standard();
    let rng = FixedRng(0);
    let env = BattleEnv::new(&catalog, &catalog, &catalog, &rng);
    let mut inv = EmptyInventory;
    let mut session = CombatSession::builder(env)
        .config(BattleConfig::fixed())
        .seed(1)
        .ally(fighter("a", 20, 5, 40, 10))
        .enemy(fighter("b", 4, 5, 30, 5))
        .build(&mut inv)
        .unwrap();

    assert_eq!(
        session.submit_action(ActionCommand::defend()),
        Err(SubmitError::InvalidPhase(Phase::Setup))
    );

    session.step();
    let before = session.snapshot();
    assert_eq!(before.phase, Phase::RoundStart);
    assert_eq!(
        session.submit_action(ActionCommand::target("strike", B)),
        Err(SubmitError::InvalidPhase(Phase::RoundStart))
    );
    assert_eq!(session.snapshot(), before);
}

// ============================================================================
// Submission validation
// ============================================================================

#[test]
fn rejected_submissions_leave_the_turn_open() {
    let catalog = Catalog::standard();
    let rng = FixedRng(0);
    let env = BattleEnv::new(&catalog, &catalog, &catalog, &rng);
    let mut inv = EmptyInventory;
    let caster = CombatantTemplate::new("mage", "Mage", BaseStats::new(30, 2, 3, 3, 12, 6, 10))
        .with_ability("fire")
        .with_ability("use_potion");
    let mut session = CombatSession::builder(env)
        .config(BattleConfig::fixed())
        .seed(3)
        .ally(caster)
        .enemy(fighter("b", 4, 5, 30, 5))
        .build(&mut inv)
        .unwrap();
    assert_eq!(session.run_until_input(), StepOutcome::AwaitingInput(A));
    let before = session.snapshot();

    assert_eq!(
        session.submit_action(ActionCommand::target("meteor", B)),
        Err(SubmitError::UnknownAbility("meteor".into()))
    );
    assert_eq!(
        session.submit_action(ActionCommand::target("strike", B)),
        Err(SubmitError::AbilityNotKnown("strike".into()))
    );
    assert_eq!(
        session.submit_action(ActionCommand::target("fire", B)),
        Err(SubmitError::InsufficientResource {
            resource: ResourceKind::Mp,
            needed: 4,
            available: 2,
        })
    );
    assert_eq!(
        session.submit_action(ActionCommand::target("use_potion", A)),
        Err(SubmitError::ItemUnavailable(ItemId::from("potion")))
    );

    assert_eq!(session.snapshot(), before);
    assert_eq!(session.awaiting_actor(), Some(A));
    assert!(!session.usable_abilities(A).contains(&"fire".into()));

    session.submit_action(ActionCommand::defend()).unwrap();
    assert_eq!(session.phase(), Phase::Resolving);
}

#[test]
fn strike_at_an_ally_is_rejected() {
    let catalog = Catalog::standard();
    let rng = FixedRng(0);
    let env = BattleEnv::new(&catalog, &catalog, &catalog, &rng);
    let mut inv = EmptyInventory;
    let mut session = CombatSession::builder(env)
        .config(BattleConfig::fixed())
        .seed(3)
        .ally(fighter("a", 20, 5, 40, 10))
        .ally(fighter("c", 20, 5, 40, 9))
        .enemy(fighter("b", 4, 5, 30, 5))
        .build(&mut inv)
        .unwrap();
    session.run_until_input();
    let partner = CombatantId(1);

    assert_eq!(
        session.submit_action(ActionCommand::target("strike", partner)),
        Err(SubmitError::InvalidTarget(TargetIssue::WrongSide(partner)))
    );
    assert_eq!(
        session.submit_action(ActionCommand::ability("strike", vec![])),
        Err(SubmitError::InvalidTarget(TargetIssue::WrongCount(0)))
    );
}

// ============================================================================
// Defend
// ============================================================================

#[test]
fn defend_halves_only_the_next_hit() {
    let catalog = Catalog::standard();
    let rng = FixedRng(0);
    let env = BattleEnv::new(&catalog, &catalog, &catalog, &rng);
    let mut inv = EmptyInventory;
    let recorder = Recorder::default();
    let mut session = CombatSession::builder(env)
        .config(BattleConfig::fixed())
        .seed(5)
        .ally(fighter("knight", 3, 2, 100, 10))
        .enemy(fighter("orc", 12, 5, 50, 5))
        .enemy(fighter("orc", 12, 5, 50, 4))
        .build(&mut inv)
        .unwrap();
    session.add_observer(Box::new(recorder.clone()));

    assert_eq!(session.run_until_input(), StepOutcome::AwaitingInput(A));
    session.submit_action(ActionCommand::defend()).unwrap();
    assert_eq!(session.run_until_input(), StepOutcome::AwaitingInput(A));

    let seen = recorder.seen();
    let hits: Vec<(u32, bool)> = effects(&seen)
        .into_iter()
        .filter_map(|e| match e {
            EffectEntry::DamageDealt {
                target,
                amount,
                guarded,
                ..
            } if *target == A => Some((*amount, *guarded)),
            _ => None,
        })
        .collect();
    assert_eq!(hits, vec![(5, true), (10, false)]);
    assert!(effects(&seen).contains(&&EffectEntry::StatusExpired {
        target: A,
        status: StatusId::from("defend"),
        reason: ExpiryReason::Consumed,
    }));
    assert_eq!(session.combatant(A).unwrap().hp(), 85);
}

#[test]
fn unused_defend_expires_at_next_round_start() {
    let catalog = Catalog::standard();
    let rng = FixedRng(0);
    let env = BattleEnv::new(&catalog, &catalog, &catalog, &rng);
    let mut inv = EmptyInventory;
    let recorder = Recorder::default();
    let turtle = CombatantTemplate::new("turtle", "Turtle", BaseStats::new(50, 0, 1, 9, 1, 9, 1));
    let mut session = CombatSession::builder(env)
        .config(BattleConfig::fixed())
        .seed(5)
        .ally(fighter("knight", 3, 2, 100, 10))
        .enemy(turtle)
        .build(&mut inv)
        .unwrap();
    session.add_observer(Box::new(recorder.clone()));

    session.run_until_input();
    session.submit_action(ActionCommand::defend()).unwrap();
    session.step();
    assert!(session.combatant(A).unwrap().statuses.contains(&"defend".into()));

    assert_eq!(session.run_until_input(), StepOutcome::AwaitingInput(A));
    assert_eq!(session.round(), 2);
    assert!(!session.combatant(A).unwrap().statuses.contains(&"defend".into()));
    assert!(session.effect_log().contains(&EffectEntry::StatusExpired {
        target: A,
        status: StatusId::from("defend"),
        reason: ExpiryReason::Elapsed,
    }));
}

// ============================================================================
// Items
// ============================================================================

#[test]
fn potions_skip_the_fallen_but_phoenix_down_revives() {
    let catalog = Catalog::standard();
    let rng = FixedRng(0);
    let env = BattleEnv::new(&catalog, &catalog, &catalog, &rng);
    let mut bag = Bag::with("potion", 1);
    bag.0.insert(ItemId::from("phoenix_down"), 1);

    let medic = fighter("medic", 5, 5, 40, 10)
        .with_ability("use_potion")
        .with_ability("use_phoenix");
    let fallen = Vitals {
        hp: 0,
        mp: 0,
        statuses: Vec::new(),
    };
    {
        let mut session = CombatSession::builder(env)
            .config(BattleConfig::fixed())
            .seed(9)
            .ally(medic)
            .ally_with_vitals(fighter("squire", 5, 5, 40, 9), fallen)
            .enemy(fighter("rat", 1, 1, 30, 1))
            .build(&mut bag)
            .unwrap();

        assert_eq!(session.run_until_input(), StepOutcome::AwaitingInput(A));
        assert_eq!(
            session.submit_action(ActionCommand::target("use_potion", B)),
            Err(SubmitError::InvalidTarget(TargetIssue::Defeated(B)))
        );

        session
            .submit_action(ActionCommand::target("use_phoenix", B))
            .unwrap();
        session.step();
        assert_eq!(session.combatant(B).unwrap().hp(), 20);
        assert!(session.effect_log().contains(&EffectEntry::Revived {
            actor: A,
            target: B,
            hp: 20,
        }));
    }

    assert_eq!(bag.0[&ItemId::from("phoenix_down")], 0);
    assert_eq!(bag.0[&ItemId::from("potion")], 1);
}

// ============================================================================
// Damage bounds
// ============================================================================

#[test]
fn weak_attacks_still_deal_one_damage() {
    let catalog = Catalog::standard();
    let rng = FixedRng(0);
    let env = BattleEnv::new(&catalog, &catalog, &catalog, &rng);
    let mut inv = EmptyInventory;
    let mut session = CombatSession::builder(env)
        .config(BattleConfig::fixed())
        .seed(2)
        .ally(fighter("pup", 5, 5, 40, 10))
        .enemy(fighter("golem", 1, 50, 30, 1))
        .build(&mut inv)
        .unwrap();

    session.run_until_input();
    session.submit_action(ActionCommand::target("strike", B)).unwrap();
    session.step();
    assert_eq!(session.combatant(B).unwrap().hp(), 29);
}

#[test]
fn sweep_clears_every_enemy_in_one_action() {
    let catalog = Catalog::standard();
    let rng = FixedRng(0);
    let env = BattleEnv::new(&catalog, &catalog, &catalog, &rng);
    let mut inv = EmptyInventory;
    let recorder = Recorder::default();
    let mut builder = CombatSession::builder(env)
        .config(BattleConfig::fixed())
        .seed(8)
        .ally(fighter("hero", 20, 5, 100, 20).with_ability("sweep"));
    for _ in 0..3 {
        builder = builder.enemy(fighter("imp", 1, 0, 10, 1));
    }
    let mut session = builder.build(&mut inv).unwrap();
    session.add_observer(Box::new(recorder.clone()));

    session.run_until_input();
    session.submit_action(ActionCommand::ability("sweep", vec![])).unwrap();
    assert_eq!(session.step(), StepOutcome::Finished(Phase::Victory));

    let seen = recorder.seen();
    let defeated: Vec<_> = seen
        .iter()
        .filter_map(|s| match s {
            Seen::EnemyDefeated(id) => Some(id.0),
            _ => None,
        })
        .collect();
    assert_eq!(defeated, vec![1, 2, 3]);
    assert_eq!(seen.last(), Some(&Seen::Ended(Phase::Victory)));
}

#[test]
fn one_kill_per_round_wins_after_exactly_n_hits() {
    let catalog = Catalog::standard();
    let rng = FixedRng(0);
    let env = BattleEnv::new(&catalog, &catalog, &catalog, &rng);
    let mut inv = EmptyInventory;
    let mut builder = CombatSession::builder(env)
        .config(BattleConfig::fixed())
        .seed(8)
        .ally(fighter("hero", 20, 5, 100, 20));
    for _ in 0..3 {
        builder = builder.enemy(fighter("imp", 1, 0, 10, 1));
    }
    let mut session = builder.build(&mut inv).unwrap();

    let mut hits = 0;
    while let StepOutcome::AwaitingInput(actor) = session.run_until_input() {
        let target = session
            .roster()
            .living(Side::Enemy)
            .map(|c| c.id)
            .next()
            .unwrap();
        session.submit_action(ActionCommand::target("strike", target)).unwrap();
        hits += 1;
        assert_eq!(actor, A);
    }

    assert_eq!(hits, 3);
    assert_eq!(session.phase(), Phase::Victory);
    assert_eq!(session.round(), 3);
}

// ============================================================================
// Statuses
// ============================================================================

#[test]
fn poison_ticks_at_round_start_and_can_end_the_battle() {
    let catalog = Catalog::standard();
    let rng = FixedRng(0);
    let env = BattleEnv::new(&catalog, &catalog, &catalog, &rng);
    let mut inv = EmptyInventory;
    let recorder = Recorder::default();
    let turtle = CombatantTemplate::new("turtle", "Turtle", BaseStats::new(5, 0, 1, 9, 1, 9, 1));
    let mut session = CombatSession::builder(env)
        .config(BattleConfig::fixed())
        .seed(4)
        .opening_status(Side::Enemy, "poison")
        .ally(fighter("knight", 3, 2, 100, 10))
        .enemy(turtle)
        .build(&mut inv)
        .unwrap();
    session.add_observer(Box::new(recorder.clone()));

    session.run_until_input();
    assert!(session.combatant(B).unwrap().statuses.contains(&"poison".into()));
    session.submit_action(ActionCommand::defend()).unwrap();

    assert_eq!(session.run_until_input(), StepOutcome::Finished(Phase::Victory));
    assert_eq!(session.round(), 2);
    assert_eq!(
        session.effect_log(),
        &[
            EffectEntry::StatusExpired {
                target: A,
                status: "defend".into(),
                reason: ExpiryReason::Elapsed,
            },
            EffectEntry::StatusDamage {
                target: B,
                status: "poison".into(),
                amount: 5,
            },
            EffectEntry::Defeated { target: B },
            // the turtle defended in round 1; defeat clears both statuses
            EffectEntry::StatusExpired {
                target: B,
                status: "poison".into(),
                reason: ExpiryReason::Defeated,
            },
            EffectEntry::StatusExpired {
                target: B,
                status: "defend".into(),
                reason: ExpiryReason::Defeated,
            },
        ]
    );

    let seen = recorder.seen();
    assert!(seen.contains(&Seen::Status(B, "poison".into())));
    assert!(seen.contains(&Seen::Damage(B, 5)));
    assert!(seen.contains(&Seen::EnemyDefeated(B)));
}

#[test]
fn carried_statuses_from_vitals_keep_ticking() {
    let catalog = Catalog::standard();
    let rng = FixedRng(0);
    let env = BattleEnv::new(&catalog, &catalog, &catalog, &rng);
    let mut inv = EmptyInventory;
    let poison = battle_core::StatusDefinition::new("poison", "Poison", 3)
        .with_per_round_hp(-5)
        .persistent()
        .instantiate();
    let vitals = Vitals {
        hp: 30,
        mp: 10,
        statuses: vec![poison],
    };
    let mut session = CombatSession::builder(env)
        .config(BattleConfig::fixed())
        .seed(4)
        .ally_with_vitals(fighter("knight", 3, 2, 100, 10), vitals)
        .enemy(fighter("b", 1, 9, 50, 1))
        .build(&mut inv)
        .unwrap();

    session.run_until_input();
    session.submit_action(ActionCommand::defend()).unwrap();
    session.run_until_input();
    // 30 - 1 (guarded strike) - 5 (poison)
    assert_eq!(session.combatant(A).unwrap().hp(), 24);
}

// ============================================================================
// Flee
// ============================================================================

#[test]
fn fleeing_ends_without_rewards() {
    let catalog = Catalog::standard();
    let rng = FixedRng(0);
    let env = BattleEnv::new(&catalog, &catalog, &catalog, &rng);
    let mut inv = EmptyInventory;
    let recorder = Recorder::default();
    let mut session = CombatSession::builder(env)
        .config(BattleConfig::fixed())
        .seed(6)
        .ally(fighter("thief", 3, 2, 100, 10))
        .enemy(fighter("dragon", 50, 50, 500, 5))
        .build(&mut inv)
        .unwrap();
    session.add_observer(Box::new(recorder.clone()));

    session.run_until_input();
    session.submit_action(ActionCommand::flee()).unwrap();
    assert_eq!(session.step(), StepOutcome::Finished(Phase::Fled));
    assert!(session.effect_log().contains(&EffectEntry::Fled { actor: A }));
    assert_eq!(recorder.seen().last(), Some(&Seen::Ended(Phase::Fled)));

    let result = session.into_result().unwrap();
    assert_eq!(result.outcome, BattleOutcome::Fled);
    assert_eq!(result.rewards.experience, 0);
    assert_eq!(result.allies[0].vitals.hp, 100);
}

#[test]
fn observers_see_round_and_turn_starts_in_order() {
    let catalog = Catalog::standard();
    let rng = FixedRng(0);
    let env = BattleEnv::new(&catalog, &catalog, &catalog, &rng);
    let mut inv = EmptyInventory;
    let recorder = Recorder::default();
    let mut session = CombatSession::builder(env)
        .config(BattleConfig::fixed())
        .seed(6)
        .ally(fighter("a", 20, 5, 40, 10))
        .enemy(fighter("b", 4, 5, 30, 5))
        .build(&mut inv)
        .unwrap();
    session.add_observer(Box::new(recorder.clone()));

    session.run_until_input();
    session.submit_action(ActionCommand::target("strike", B)).unwrap();
    session.run_until_input();

    let markers: Vec<Seen> = recorder
        .seen()
        .into_iter()
        .filter(|s| matches!(s, Seen::Round(_) | Seen::Turn(..)))
        .collect();
    assert_eq!(
        markers,
        vec![
            Seen::Round(1),
            Seen::Turn(A, Side::Ally),
            Seen::Turn(B, Side::Enemy),
            Seen::Round(2),
            Seen::Turn(A, Side::Ally),
        ]
    );
}
