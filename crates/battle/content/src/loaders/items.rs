//! Item catalog loader.

use std::path::Path;

use battle_core::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing ItemCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalog = read_ron(path, "item catalog")?;
        Ok(catalog.items)
    }
}
