//! File loaders for combat content.
//!
//! `config.toml` is TOML; effect tables and encounters are RON.

pub mod config;
pub mod effects;
pub mod encounter;
pub mod factory;

pub use config::ConfigLoader;
pub use effects::EffectTableLoader;
pub use encounter::{Encounter, EncounterLoader};
pub use factory::ContentFactory;

use std::path::Path;

/// Loader errors carry the file and parse context as `anyhow` messages.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
