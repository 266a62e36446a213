//! Async orchestration around the combat session.
//!
//! The core session is synchronous and I/O free. This crate owns everything
//! that lives between encounters and around a running one:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`party`] keeps persistent members, inventory and progression
//! - [`providers`] source ally input asynchronously
//! - [`events`] provides a topic-based bus for presentation consumers
pub mod config;
pub mod error;
pub mod events;
pub mod party;
pub mod providers;
pub mod runtime;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{BusObserver, CombatEvent, Event, EventBus, Topic, TurnEvent};
pub use party::{Party, PartyInventory, PartyMember};
pub use providers::{
    ActionProvider, AutopilotProvider, ScriptedProvider, TimeoutProvider, TurnContext,
};
pub use runtime::{EncounterReport, Runtime, RuntimeBuilder};
