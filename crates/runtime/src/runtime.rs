//! High-level encounter orchestrator.
//!
//! [`Runtime`] assembles a [`CombatSession`] from content and the persistent
//! [`Party`], drives it to a terminal phase, feeds ally turns from the
//! configured [`ActionProvider`], and settles the result back into the party.

use std::sync::Arc;

use battle_content::{ContentCatalog, EncounterSpec};
use battle_core::{
    ActionCommand, BattleCommander, BattleConfig, BattleError, BattleReader, BattleResult,
    CombatSession, LevelUp, PcgRng, StepOutcome,
};
use serde::{Deserialize, Serialize};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::{BusObserver, CombatEvent, Event, EventBus, TurnEvent};
use crate::party::Party;
use crate::providers::{ActionProvider, AutopilotProvider, TimeoutProvider, TurnContext};

/// What one finished encounter produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterReport {
    pub encounter: String,
    pub seed: u64,
    pub result: BattleResult,
    pub level_ups: Vec<LevelUp>,
}

/// Main runtime that drives encounters.
pub struct Runtime {
    catalog: Arc<ContentCatalog>,
    battle: BattleConfig,
    config: RuntimeConfig,
    bus: EventBus,
    provider: Box<dyn ActionProvider>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder(catalog: Arc<ContentCatalog>) -> RuntimeBuilder {
        RuntimeBuilder::new(catalog)
    }

    /// Cloneable handle to the event bus.
    pub fn events(&self) -> EventBus {
        self.bus.clone()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Run one encounter to completion and settle it into `party`.
    pub async fn run_encounter(
        &self,
        party: &mut Party,
        encounter: &EncounterSpec,
    ) -> Result<EncounterReport> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let rng = PcgRng;

        let mut builder = CombatSession::builder(self.catalog.env(&rng))
            .config(self.battle.clone())
            .seed(seed)
            .escapable(encounter.escapable);
        for member in party.members() {
            builder = builder.ally_with_vitals(member.template.clone(), member.vitals.clone());
        }
        for id in &encounter.enemies {
            let template = self
                .catalog
                .template(id)
                .ok_or_else(|| RuntimeError::UnknownTemplate(id.clone()))?;
            builder = builder.enemy(template.clone());
        }
        for opening in &encounter.opening {
            builder = builder.opening_status(opening.side, opening.status.clone());
        }

        tracing::info!(encounter = %encounter.name, seed, "encounter started");
        let result = {
            let mut session = builder.build(&mut party.inventory)?;
            session.add_observer(Box::new(BusObserver::new(self.bus.clone())));
            self.drive(&mut session).await?;
            session.into_result().ok_or(RuntimeError::Unfinished)?
        };

        party.apply_writeback(&result);
        let level_ups = result.award(party);
        self.bus.publish(Event::Combat(CombatEvent::Settled {
            result: Box::new(result.clone()),
        }));

        Ok(EncounterReport {
            encounter: encounter.name.clone(),
            seed,
            result,
            level_ups,
        })
    }

    async fn drive(&self, session: &mut CombatSession<'_>) -> Result<()> {
        loop {
            let outcome = session.step();
            if let StepOutcome::Finished(_) = outcome {
                return Ok(());
            }
            if session.round() > self.config.max_rounds {
                tracing::error!(limit = self.config.max_rounds, "round limit reached");
                return Err(RuntimeError::RoundLimit {
                    limit: self.config.max_rounds,
                });
            }

            if let StepOutcome::AwaitingInput(actor) = outcome {
                let ctx = TurnContext {
                    actor,
                    snapshot: session.snapshot(),
                    usable: session.usable_abilities(actor),
                    recommended: session.recommend_action(actor),
                };
                let command = self.provider.provide_action(&ctx).await?;
                if let Err(error) = session.submit_action(command) {
                    self.bus.publish(Event::Turn(TurnEvent::InputRejected {
                        actor,
                        code: error.error_code().to_owned(),
                        reason: error.to_string(),
                    }));
                    session.submit_action(ActionCommand::defend())?;
                }
            }
        }
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    catalog: Arc<ContentCatalog>,
    battle: BattleConfig,
    config: RuntimeConfig,
    provider: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new(catalog: Arc<ContentCatalog>) -> Self {
        Self {
            catalog,
            battle: BattleConfig::default(),
            config: RuntimeConfig::default(),
            provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Combat tunables handed to every session.
    pub fn battle_config(mut self, battle: BattleConfig) -> Self {
        self.battle = battle;
        self
    }

    /// Set ally action provider (defaults to autopilot)
    pub fn provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    pub fn build(self) -> Runtime {
        let provider = self
            .provider
            .unwrap_or_else(|| Box::new(AutopilotProvider));
        let provider: Box<dyn ActionProvider> = match self.config.input_timeout {
            Some(limit) => Box::new(TimeoutProvider::new(provider, limit)),
            None => provider,
        };

        Runtime {
            catalog: self.catalog,
            battle: self.battle,
            bus: EventBus::with_capacity(self.config.event_buffer_size),
            config: self.config,
            provider,
        }
    }
}
