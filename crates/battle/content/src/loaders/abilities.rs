//! Ability catalog loader.

use std::path::Path;

use battle_core::Ability;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<Ability>,
}

/// Loader for the ability catalog.
pub struct AbilityLoader;

impl AbilityLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Ability>> {
        let catalog: AbilityCatalog = read_ron(path, "ability catalog")?;
        Ok(catalog.abilities)
    }
}
