//! Combat state machine.
//!
//! [`CombatSession`] owns every combatant for the duration of one encounter
//! and advances strictly one transition per [`CombatSession::step`]. The only
//! suspension point is ally input: when an ally's turn comes up, `step`
//! returns [`StepOutcome::AwaitingInput`] until
//! [`BattleCommander::submit_action`] supplies a valid command.
//!
//! Observers are notified after a step has committed, so no partially applied
//! mutation is ever visible outside the session.
pub mod ai;
mod builder;
mod command;
mod errors;
mod observer;
mod outcome;
mod phase;
mod turns;

pub use builder::SessionBuilder;
pub use command::ActionCommand;
pub use errors::{SetupError, SubmitError};
pub use observer::{BattleCommander, BattleObserver, BattleReader, BattleSnapshot, CombatantView};
pub use outcome::{AllyWriteback, BattleOutcome, BattleResult, ItemDrop, Rewards, Vitals};
pub use phase::Phase;
pub use turns::InitiativeQueue;

use crate::combat::resolver::apply_status;
use crate::combat::{
    EffectEntry, EffectLog, ExpiryReason, PlannedAction, Resolution, Resolver, select_targets,
    wants_defeated,
};
use crate::config::BattleConfig;
use crate::env::{Ability, BattleEnv, Inventory};
use crate::error::BattleError;
use crate::state::{AbilityId, Combatant, CombatantId, Roster, Side, StatusDefinition};
use crate::stats::ResourceKind;

/// Result of one [`CombatSession::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The session moved to the given phase.
    Advanced(Phase),
    /// An ally must act; submit an action to continue.
    AwaitingInput(CombatantId),
    /// The session reached a terminal phase.
    Finished(Phase),
}

enum Notice {
    RoundStarted(u32),
    TurnStarted(CombatantId, Side),
    Ended(Phase),
}

/// Live state for one encounter.
pub struct CombatSession<'a> {
    env: BattleEnv<'a>,
    config: BattleConfig,
    inventory: &'a mut dyn Inventory,
    observers: Vec<Box<dyn BattleObserver + 'a>>,
    roster: Roster,
    phase: Phase,
    round: u32,
    queue: InitiativeQueue,
    log: EffectLog,
    seed: u64,
    nonce: u64,
    escapable: bool,
    opening: Vec<(Side, StatusDefinition)>,
    awaiting: Option<CombatantId>,
    pending: Option<(CombatantId, PlannedAction)>,
    result: Option<BattleResult>,
}

impl<'a> CombatSession<'a> {
    pub fn builder(env: BattleEnv<'a>) -> SessionBuilder<'a> {
        SessionBuilder::new(env)
    }

    pub(crate) fn new(
        env: BattleEnv<'a>,
        config: BattleConfig,
        inventory: &'a mut dyn Inventory,
        roster: Roster,
        opening: Vec<(Side, StatusDefinition)>,
        escapable: bool,
        seed: u64,
    ) -> Self {
        Self {
            env,
            config,
            inventory,
            observers: Vec::new(),
            roster,
            phase: Phase::Setup,
            round: 0,
            queue: InitiativeQueue::default(),
            log: EffectLog::new(),
            seed,
            nonce: 0,
            escapable,
            opening,
            awaiting: None,
            pending: None,
            result: None,
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn BattleObserver + 'a>) {
        self.observers.push(observer);
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn queue(&self) -> &InitiativeQueue {
        &self.queue
    }

    pub fn is_escapable(&self) -> bool {
        self.escapable
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Present once the session is terminal.
    pub fn result(&self) -> Option<&BattleResult> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<BattleResult> {
        self.result
    }

    /// What the AI policy would do for `actor`. Used for autopilot and
    /// timed-out input.
    pub fn recommend_action(&self, actor: CombatantId) -> ActionCommand {
        ai::choose_command(&self.env, &self.config, &self.roster, actor)
    }

    /// Advance exactly one transition.
    pub fn step(&mut self) -> StepOutcome {
        let start = match self.phase {
            Phase::RoundStart => 0,
            _ => self.log.len(),
        };
        let mut notices = Vec::new();

        let outcome = match self.phase {
            Phase::Setup => self.setup(),
            Phase::RoundStart => self.start_round(&mut notices),
            Phase::AwaitingAction => self.next_turn(&mut notices),
            Phase::Resolving => self.resolve_pending(),
            terminal => return StepOutcome::Finished(terminal),
        };

        if let StepOutcome::Finished(phase) = outcome {
            notices.push(Notice::Ended(phase));
        }
        self.notify(start, &notices);
        outcome
    }

    /// Step until an ally needs input or the session ends.
    pub fn run_until_input(&mut self) -> StepOutcome {
        loop {
            match self.step() {
                StepOutcome::Advanced(_) => continue,
                done => return done,
            }
        }
    }

    fn transition(&mut self, phase: Phase) -> StepOutcome {
        tracing::debug!(from = %self.phase, to = %phase, round = self.round, "phase");
        self.phase = phase;
        StepOutcome::Advanced(phase)
    }

    fn setup(&mut self) -> StepOutcome {
        let opening = std::mem::take(&mut self.opening);
        for (side, definition) in &opening {
            let ids: Vec<CombatantId> = self.roster.side(*side).map(|c| c.id).collect();
            for id in ids {
                apply_status(&mut self.roster, &mut self.log, id, definition);
            }
        }
        self.transition(Phase::RoundStart)
    }

    fn start_round(&mut self, notices: &mut Vec<Notice>) -> StepOutcome {
        self.round += 1;
        self.log.clear();
        notices.push(Notice::RoundStarted(self.round));

        // statuses applied during SETUP keep their full duration
        if self.round > 1 {
            self.tick_statuses();
        }

        if let Some(end) = self.terminal_phase() {
            return self.finish(end);
        }

        self.queue = InitiativeQueue::build(&self.roster);
        self.transition(Phase::AwaitingAction)
    }

    fn tick_statuses(&mut self) {
        for index in 0..self.roster.len() {
            let id = CombatantId(index as u8);
            let Some(combatant) = self.roster.get_mut(id) else {
                continue;
            };
            if !combatant.is_alive() {
                continue;
            }

            let deltas: Vec<_> = combatant
                .statuses
                .per_round_deltas()
                .map(|(status, delta)| (status.clone(), delta))
                .collect();
            for (status, delta) in deltas {
                if delta < 0 {
                    let amount = delta.unsigned_abs();
                    let defeated = combatant.apply_damage(amount);
                    self.log.push(EffectEntry::StatusDamage {
                        target: id,
                        status,
                        amount,
                    });
                    if let Some(cleared) = defeated {
                        self.log.push_defeat(id, cleared);
                        break;
                    }
                } else {
                    let amount = combatant.apply_heal(delta.unsigned_abs());
                    self.log.push(EffectEntry::StatusHeal {
                        target: id,
                        status,
                        amount,
                    });
                }
            }

            for status in combatant.statuses.tick() {
                self.log.push(EffectEntry::StatusExpired {
                    target: id,
                    status,
                    reason: ExpiryReason::Elapsed,
                });
            }
        }
    }

    fn next_turn(&mut self, notices: &mut Vec<Notice>) -> StepOutcome {
        if let Some(actor) = self.awaiting {
            return StepOutcome::AwaitingInput(actor);
        }

        let Some(actor) = self.queue.pop_next(&self.roster) else {
            return self.transition(Phase::RoundStart);
        };
        let side = self.roster.get(actor).map_or(Side::Enemy, |c| c.side);
        notices.push(Notice::TurnStarted(actor, side));

        match side {
            Side::Ally => {
                tracing::debug!(actor = %actor, "awaiting ally input");
                self.awaiting = Some(actor);
                StepOutcome::AwaitingInput(actor)
            }
            Side::Enemy => {
                let plan = ai::choose_action(&self.env, &self.config, &self.roster, actor);
                self.pending = Some((actor, plan));
                self.transition(Phase::Resolving)
            }
        }
    }

    fn resolve_pending(&mut self) -> StepOutcome {
        let Some((actor, plan)) = self.pending.take() else {
            return self.transition(Phase::AwaitingAction);
        };

        let resolver = Resolver::new(self.env, &self.config, self.seed, self.nonce);
        let resolution = resolver.resolve(
            &mut self.roster,
            &mut *self.inventory,
            &mut self.log,
            actor,
            &plan,
        );
        self.nonce += 1;

        if resolution == Resolution::Fled {
            return self.finish(Phase::Fled);
        }
        if let Some(end) = self.terminal_phase() {
            return self.finish(end);
        }
        self.transition(Phase::AwaitingAction)
    }

    /// Victory is checked before defeat.
    fn terminal_phase(&self) -> Option<Phase> {
        if self.roster.is_wiped(Side::Enemy) {
            Some(Phase::Victory)
        } else if self.roster.is_wiped(Side::Ally) {
            Some(Phase::Defeat)
        } else {
            None
        }
    }

    fn finish(&mut self, phase: Phase) -> StepOutcome {
        self.transition(phase);
        self.awaiting = None;
        self.pending = None;

        if let Some(outcome) = BattleOutcome::from_phase(phase) {
            let result = BattleResult::calculate(
                outcome,
                self.round,
                &self.roster,
                self.env.rng(),
                self.seed,
                self.nonce,
            );
            tracing::info!(
                outcome = %outcome,
                rounds = self.round,
                experience = result.rewards.experience,
                currency = result.rewards.currency,
                "encounter finished"
            );
            self.result = Some(result);
        }
        StepOutcome::Finished(phase)
    }

    fn validate(
        &self,
        actor: &Combatant,
        command: &ActionCommand,
    ) -> Result<PlannedAction, SubmitError> {
        let (id, requested) = match command {
            ActionCommand::Flee if self.escapable => return Ok(PlannedAction::Flee),
            ActionCommand::Flee => return Err(SubmitError::FleeForbidden),
            ActionCommand::UseAbility { ability, targets } => (ability, targets),
        };

        let ability = self
            .env
            .ability(id)
            .ok_or_else(|| SubmitError::UnknownAbility(id.clone()))?;
        if !ability.is_defend() && !actor.knows(id) {
            return Err(SubmitError::AbilityNotKnown(id.clone()));
        }
        if !actor.can_afford(&ability.cost) {
            let available = match ability.cost.resource {
                ResourceKind::Hp => actor.hp(),
                ResourceKind::Mp => actor.mp(),
            };
            return Err(SubmitError::InsufficientResource {
                resource: ability.cost.resource,
                needed: ability.cost.amount,
                available,
            });
        }

        let item = match &ability.item {
            Some(item) => {
                let definition = self
                    .env
                    .items()
                    .item(item)
                    .filter(|_| self.inventory.quantity(item) > 0)
                    .ok_or_else(|| SubmitError::ItemUnavailable(item.clone()))?;
                Some(definition)
            }
            None => None,
        };

        let defeated = wants_defeated(&ability, item.as_ref());
        let targets = select_targets(&self.roster, actor, &ability, defeated, requested)?;
        Ok(PlannedAction::Ability { ability, targets })
    }

    fn usable(&self, actor: &Combatant, ability: &Ability) -> bool {
        actor.can_afford(&ability.cost)
            && ability
                .item
                .as_ref()
                .is_none_or(|item| self.inventory.quantity(item) > 0)
    }

    fn notify(&mut self, start: usize, notices: &[Notice]) {
        if self.observers.is_empty() {
            return;
        }

        let entries = self.log.since(start);
        for observer in self.observers.iter_mut() {
            for notice in notices {
                match notice {
                    Notice::RoundStarted(round) => observer.on_round_started(*round),
                    Notice::TurnStarted(actor, side) => observer.on_turn_started(*actor, *side),
                    Notice::Ended(_) => {}
                }
            }

            for entry in entries {
                observer.on_effect(entry);
                match entry {
                    EffectEntry::DamageDealt { target, amount, .. }
                    | EffectEntry::StatusDamage { target, amount, .. } => {
                        observer.on_damage_dealt(*target, *amount);
                    }
                    EffectEntry::Defeated { target }
                        if self
                            .roster
                            .get(*target)
                            .is_some_and(|c| c.side == Side::Enemy) =>
                    {
                        observer.on_enemy_defeated(*target);
                    }
                    EffectEntry::StatusApplied { target, status, .. } => {
                        observer.on_status_applied(*target, status);
                    }
                    _ => {}
                }
            }

            for notice in notices {
                if let Notice::Ended(phase) = notice {
                    observer.on_combat_ended(*phase);
                }
            }
        }
    }
}

impl BattleReader for CombatSession<'_> {
    fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            round: self.round,
            phase: self.phase,
            awaiting: self.awaiting,
            combatants: self.roster.iter().map(CombatantView::from).collect(),
            log: self.log.entries().to_vec(),
        }
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn round(&self) -> u32 {
        self.round
    }

    fn awaiting_actor(&self) -> Option<CombatantId> {
        self.awaiting
    }

    fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.get(id)
    }

    fn usable_abilities(&self, id: CombatantId) -> Vec<AbilityId> {
        let Some(actor) = self.roster.get(id) else {
            return Vec::new();
        };
        let mut usable: Vec<AbilityId> = actor
            .abilities
            .iter()
            .filter(|a| {
                self.env
                    .ability(a)
                    .is_some_and(|ability| self.usable(actor, &ability))
            })
            .cloned()
            .collect();
        usable.push(AbilityId::from(Ability::DEFEND));
        usable
    }

    fn effect_log(&self) -> &[EffectEntry] {
        self.log.entries()
    }
}

impl BattleCommander for CombatSession<'_> {
    fn submit_action(&mut self, command: ActionCommand) -> Result<(), SubmitError> {
        if self.phase != Phase::AwaitingAction {
            tracing::warn!(phase = %self.phase, "submission rejected: wrong phase");
            return Err(SubmitError::InvalidPhase(self.phase));
        }
        let Some(actor_id) = self.awaiting else {
            tracing::warn!("submission rejected: no ally awaiting input");
            return Err(SubmitError::NotAwaitingInput);
        };
        let actor = self
            .roster
            .get(actor_id)
            .ok_or(SubmitError::NotAwaitingInput)?;

        let plan = self.validate(actor, &command).inspect_err(|error| {
            tracing::warn!(
                actor = %actor_id,
                code = error.error_code(),
                %error,
                "submission rejected"
            );
        })?;

        self.pending = Some((actor_id, plan));
        self.awaiting = None;
        self.transition(Phase::Resolving);
        Ok(())
    }
}
