//! Content factory for building catalogs from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::catalog::ContentCatalog;
use crate::loaders::{
    AbilityLoader, EncounterLoader, ItemLoader, LoadResult, PartyLoader, StatusLoader,
    TablesLoader, TemplateLoader,
};
use crate::specs::{EncounterSpec, PartySpec, Tables};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── tables.toml
/// ├── abilities.ron
/// ├── statuses.ron
/// ├── items.ron
/// ├── combatants.ron
/// ├── party.ron
/// └── encounters/
///     ├── goblin_ambush.ron
///     └── crypt_guardian.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load balance tables from `tables.toml`. A missing file means defaults.
    pub fn load_tables(&self) -> LoadResult<Tables> {
        let path = self.data_dir.join("tables.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no tables file; using defaults");
            return Ok(Tables::default());
        }
        TablesLoader::load(&path)
    }

    /// Load every catalog file and cross-validate the result.
    pub fn load_catalog(&self) -> LoadResult<ContentCatalog> {
        let abilities = AbilityLoader::load(&self.data_dir.join("abilities.ron"))?;
        let statuses = StatusLoader::load(&self.data_dir.join("statuses.ron"))?;
        let items = ItemLoader::load(&self.data_dir.join("items.ron"))?;
        let templates = TemplateLoader::load(&self.data_dir.join("combatants.ron"))?;

        let catalog = ContentCatalog::from_parts(abilities, statuses, items, templates)
            .with_context(|| format!("Invalid content in {}", self.data_dir.display()))?;

        tracing::info!(
            abilities = catalog.ability_count(),
            statuses = catalog.status_count(),
            items = catalog.item_count(),
            templates = catalog.template_count(),
            "content loaded"
        );
        Ok(catalog)
    }

    /// Load `encounters/{name}.ron` and check it against `catalog`.
    pub fn load_encounter(
        &self,
        name: &str,
        catalog: &ContentCatalog,
    ) -> LoadResult<EncounterSpec> {
        let path = self.data_dir.join("encounters").join(format!("{}.ron", name));
        let spec = EncounterLoader::load(&path)?;
        catalog.validate_encounter(name, &spec)?;
        Ok(spec)
    }

    /// Load `party.ron` and check it against `catalog`.
    pub fn load_party(&self, catalog: &ContentCatalog) -> LoadResult<PartySpec> {
        let spec = PartyLoader::load(&self.data_dir.join("party.ron"))?;
        catalog.validate_party(&spec)?;
        Ok(spec)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
