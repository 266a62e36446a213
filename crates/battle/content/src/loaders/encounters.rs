//! Encounter loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_ron};
use crate::specs::EncounterSpec;

pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        read_ron(path, "encounter")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::Side;
    use std::io::Write;

    #[test]
    fn escapable_defaults_to_true() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(
                name: "Ambush",
                enemies: ["goblin", "goblin"],
                opening: [(side: Ally, status: "stunned")],
            )"#
        )
        .unwrap();

        let spec = EncounterLoader::load(file.path()).unwrap();
        assert!(spec.escapable);
        assert_eq!(spec.enemies.len(), 2);
        assert_eq!(spec.opening[0].side, Side::Ally);
    }
}
