//! Content loaders for reading battle data from files.
//!
//! Catalogs are RON, balance tables are TOML. Every loader returns
//! [`LoadResult`] with the offending path in its error context.

pub mod abilities;
pub mod encounters;
pub mod factory;
pub mod items;
pub mod party;
pub mod statuses;
pub mod tables;
pub mod templates;

pub use abilities::AbilityLoader;
pub use encounters::EncounterLoader;
pub use factory::ContentFactory;
pub use items::ItemLoader;
pub use party::PartyLoader;
pub use statuses::StatusLoader;
pub use tables::TablesLoader;
pub use templates::TemplateLoader;

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Read and parse a RON file.
pub(crate) fn read_ron<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content)
        .with_context(|| format!("Failed to parse {} RON at {}", what, path.display()))
}
