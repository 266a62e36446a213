//! Balance tables loader.
//!
//! `tables.toml` carries the combat tunables (`[combat]`) and the
//! progression curve (`[progression]`). Any key left out keeps its default.

use std::path::Path;

use anyhow::Context;

use crate::loaders::{LoadResult, read_file};
use crate::specs::Tables;

pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<Tables> {
        let content = read_file(path)?;
        let tables: Tables = toml::from_str(&content)
            .with_context(|| format!("Failed to parse tables TOML at {}", path.display()))?;

        if !tables.combat.has_valid_variance() {
            anyhow::bail!(
                "Invalid tables at {}: variance_min {} exceeds variance_max {}",
                path.display(),
                tables.combat.variance_min,
                tables.combat.variance_max
            );
        }
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::BattleConfig;
    use std::io::Write;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[combat]\nbase_accuracy = 80\ncrit_multiplier = 200\n\n[progression]\nexperience_per_level = 50\n"
        )
        .unwrap();

        let tables = TablesLoader::load(file.path()).unwrap();
        assert_eq!(tables.combat.base_accuracy, 80);
        assert_eq!(tables.combat.crit_multiplier, 200);
        assert_eq!(
            tables.combat.defend_damage_pct,
            BattleConfig::DEFAULT_DEFEND_DAMAGE_PCT
        );
        assert_eq!(tables.progression.experience_per_level, 50);
    }

    #[test]
    fn empty_variance_range_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[combat]\nvariance_min = 120\nvariance_max = 80\n").unwrap();
        assert!(TablesLoader::load(file.path()).is_err());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let tables = TablesLoader::load(file.path()).unwrap();
        assert_eq!(tables.combat, BattleConfig::default());
    }
}
