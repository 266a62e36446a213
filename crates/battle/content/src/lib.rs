//! Data-driven battle content.
//!
//! This crate turns RON/TOML data files into the collaborators `battle-core`
//! consumes:
//! - ability, status and item catalogs ([`ContentCatalog`] implements the
//!   core oracle traits)
//! - combatant templates for party members and monsters
//! - encounter and party definitions
//! - balance tables (`BattleConfig` plus the progression curve)
//!
//! Content is consumed by the runtime and never appears in session state.

pub mod catalog;
pub mod specs;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CatalogError, ContentCatalog};
pub use specs::{EncounterSpec, ItemStack, OpeningStatus, PartySpec, ProgressionTable, Tables};

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, ContentFactory, EncounterLoader, ItemLoader, LoadResult, PartyLoader,
    StatusLoader, TablesLoader, TemplateLoader,
};
