//! Encounter loader: the squad and the enemies it faces.

use std::collections::HashSet;
use std::path::Path;

use combat_core::{EnemySpec, SoldierRecord};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One battle's participants, in formation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Encounter {
    #[serde(default)]
    pub name: String,
    pub squad: Vec<SoldierRecord>,
    pub enemies: Vec<EnemySpec>,
}

impl Encounter {
    /// Rejects encounters the session would refuse: empty sides and
    /// duplicate ids.
    pub fn validate(&self) -> LoadResult<()> {
        if self.squad.is_empty() {
            anyhow::bail!("Encounter '{}' has no squad members", self.name);
        }
        if self.enemies.is_empty() {
            anyhow::bail!("Encounter '{}' has no enemies", self.name);
        }

        let mut ids = HashSet::new();
        for soldier in &self.squad {
            if soldier.id.is_empty() {
                anyhow::bail!("Encounter '{}' has a soldier without an id", self.name);
            }
            if !ids.insert(soldier.id.as_str()) {
                anyhow::bail!("Duplicate soldier id '{}' in '{}'", soldier.id, self.name);
            }
        }

        let mut slots = HashSet::new();
        for enemy in &self.enemies {
            if !slots.insert(enemy.slot) {
                anyhow::bail!("Duplicate enemy slot {} in '{}'", enemy.slot, self.name);
            }
        }
        Ok(())
    }
}

/// Loader for encounters from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    /// Load and validate an [`Encounter`] from a RON file.
    ///
    /// A file without a `name` takes its file stem.
    pub fn load(path: &Path) -> LoadResult<Encounter> {
        let content = read_file(path)?;
        let mut encounter = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;
        if encounter.name.is_empty() {
            encounter.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(encounter)
    }

    pub fn parse(content: &str) -> LoadResult<Encounter> {
        let encounter: Encounter = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;
        encounter.validate()?;
        Ok(encounter)
    }
}
