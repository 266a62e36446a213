//! Status effect catalog loader.

use std::path::Path;

use battle_core::StatusDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_ron};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCatalog {
    pub statuses: Vec<StatusDefinition>,
}

pub struct StatusLoader;

impl StatusLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<StatusDefinition>> {
        let catalog: StatusCatalog = read_ron(path, "status catalog")?;
        Ok(catalog.statuses)
    }
}
