//! Stat model.
//!
//! ```text
//! [ BaseStats (immutable, from template) ]
//!      ↓  + active StatModifiers (from status effects)
//! [ effective stat (computed on demand, never stored) ]
//! ```
//!
//! Current HP/MP live in [`ResourceMeter`]s on the combatant.

pub mod bonus;
pub mod core;
pub mod resources;

pub use bonus::{ModifierOp, StatModifier, apply_modifiers};
pub use self::core::{BaseStats, StatKind};
pub use resources::{ResourceKind, ResourceMeter};
