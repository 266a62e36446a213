//! Deterministic turn-based combat resolution.
//!
//! `battle-core` turns a roster of combatants and chosen actions into an
//! ordered sequence of effects and, eventually, a victory, defeat or escape.
//! It performs no I/O: content catalogs, inventory and progression are
//! reached through the collaborator traits in [`env`], and all randomness
//! flows from a seeded [`env::RngOracle`] so identical seeds replay identical
//! battles.
//!
//! All state mutation flows through [`engine::CombatSession`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use combat::{
    EffectEntry, EffectLog, ExpiryReason, FailureReason, PlannedAction, Resolution, Resolver,
    TargetIssue,
};
pub use config::BattleConfig;
pub use engine::{
    ActionCommand, AllyWriteback, BattleCommander, BattleObserver, BattleOutcome, BattleReader,
    BattleResult, BattleSnapshot, CombatSession, CombatantView, InitiativeQueue, ItemDrop, Phase,
    Rewards, SessionBuilder, SetupError, StepOutcome, SubmitError, Vitals,
};
pub use env::{
    Ability, AbilityCategory, AbilityEffect, AbilityOracle, BattleEnv, Bounty, CombatantTemplate,
    DropEntry, EmptyInventory, FixedRng, Inventory, ItemDefinition, ItemEffect, ItemOracle,
    LevelUp, PcgRng, Progression, ResourceCost, RngOracle, StatusOracle, TargetShape,
};
pub use error::{BattleError, ErrorSeverity};
pub use state::{
    AbilityId, ApplyOutcome, Combatant, CombatantId, ItemId, Roster, Side, StackingPolicy,
    StatusDefinition, StatusEffect, StatusEffects, StatusId, TemplateId,
};
pub use stats::{BaseStats, ModifierOp, ResourceKind, ResourceMeter, StatKind, StatModifier};
