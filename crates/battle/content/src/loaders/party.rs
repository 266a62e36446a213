//! Starting party loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_ron};
use crate::specs::PartySpec;

pub struct PartyLoader;

impl PartyLoader {
    pub fn load(path: &Path) -> LoadResult<PartySpec> {
        read_ron(path, "party")
    }
}
