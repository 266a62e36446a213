//! Combat state owned by a session.
//!
//! - [`Combatant`]: base stats, current HP/MP, status effects, ability set
//! - [`StatusEffects`]: the per-combatant status effect table
//! - [`Roster`]: every combatant in insertion order

pub mod combatant;
pub mod ids;
pub mod roster;
pub mod status;

pub use combatant::Combatant;
pub use ids::{AbilityId, CombatantId, ItemId, Side, StatusId, TemplateId};
pub use roster::Roster;
pub use status::{ApplyOutcome, StackingPolicy, StatusDefinition, StatusEffect, StatusEffects};
