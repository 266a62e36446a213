//! Combatant template loader.
//!
//! One file holds both party members and monsters; a template becomes an
//! ally or an enemy only when an encounter or the party places it.

use std::path::Path;

use battle_core::CombatantTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateCatalog {
    pub combatants: Vec<CombatantTemplate>,
}

pub struct TemplateLoader;

impl TemplateLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CombatantTemplate>> {
        let catalog: TemplateCatalog = read_ron(path, "combatant catalog")?;
        Ok(catalog.combatants)
    }
}
