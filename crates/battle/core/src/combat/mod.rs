//! Combat resolution.
//!
//! Pure calculations (`hit`, `damage`, `flee`) plus the [`Resolver`] that
//! applies one action to the roster and records what happened in the
//! [`EffectLog`].
//!
//! # Core Functions
//!
//! - `calculate_hit_chance` / `calculate_crit_chance`: speed-relative rolls
//! - `base_damage` / `calculate_damage`: mitigation, variance, critical, guard
//! - `calculate_flee_chance`: side speed ratio
//! - `select_targets`: shape and liveness checks for a requested target set

pub mod damage;
pub mod flee;
pub mod hit;
pub mod log;
pub mod resolver;
pub mod targeting;

pub use damage::{DamageRoll, base_damage, calculate_damage, damage_stats};
pub use flee::calculate_flee_chance;
pub use hit::{calculate_crit_chance, calculate_hit_chance, check_roll};
pub use log::{EffectEntry, EffectLog, ExpiryReason, FailureReason};
pub use resolver::{PlannedAction, Resolution, Resolver};
pub use targeting::{TargetIssue, candidates, select_targets, wants_defeated};
