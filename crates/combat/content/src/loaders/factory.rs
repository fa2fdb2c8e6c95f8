//! Content factory for assembling battles from a data directory.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, CombatSession, EffectTable, Timestamp};

use crate::loaders::{ConfigLoader, EffectTableLoader, Encounter, EncounterLoader, LoadResult};

/// Content factory that loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── effects.ron
/// └── encounters/
///     ├── ambush.ron
///     └── breach.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load special-effect tables from `effects.ron`.
    ///
    /// A missing file yields an empty table.
    pub fn load_effects(&self) -> LoadResult<EffectTable> {
        let path = self.data_dir.join("effects.ron");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no effect table, using none");
            return Ok(EffectTable::new());
        }
        EffectTableLoader::load(&path)
    }

    /// Load an encounter from `encounters/{name}.ron`.
    pub fn load_encounter(&self, name: &str) -> LoadResult<Encounter> {
        let path = self.data_dir.join("encounters").join(format!("{}.ron", name));
        EncounterLoader::load(&path)
    }

    /// Builds a ready-to-tick session for the named encounter.
    ///
    /// Soldiers join in squad order, enemies in slot-list order, both with their
    /// first attack one interval after `started_at`.
    pub fn build_session(
        &self,
        encounter: &Encounter,
        config: CombatConfig,
        started_at: Timestamp,
    ) -> LoadResult<CombatSession> {
        let effects = self.load_effects()?;
        let mut session = CombatSession::new(config, started_at);

        for record in &encounter.squad {
            session
                .add_soldier(record, &effects)
                .map_err(|e| anyhow::anyhow!("Failed to add soldier '{}': {}", record.id, e))?;
        }
        for spec in &encounter.enemies {
            session
                .spawn_enemy(spec, started_at)
                .map_err(|e| anyhow::anyhow!("Failed to spawn enemy slot {}: {}", spec.slot, e))?;
        }

        tracing::info!(
            encounter = %encounter.name,
            squad = encounter.squad.len(),
            enemies = encounter.enemies.len(),
            "battle assembled"
        );
        Ok(session)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encounters_resolve_under_data_dir() {
        let factory = ContentFactory::new("/srv/combat");
        assert_eq!(factory.data_dir(), Path::new("/srv/combat"));

        let err = factory.load_encounter("breach").unwrap_err().to_string();
        assert!(err.contains("encounters/breach.ron"), "{err}");
    }

    #[test]
    fn test_missing_optional_files_fall_back() {
        let factory = ContentFactory::new("/nonexistent/combat-data");
        assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
        assert!(factory.load_effects().unwrap().weapons.is_empty());
        assert!(factory.load_encounter("ambush").is_err());
    }
}
