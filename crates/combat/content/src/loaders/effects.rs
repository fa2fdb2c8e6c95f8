//! Special-effect table loader.

use std::path::Path;

use combat_core::{EffectTable, ProcKind};

use crate::loaders::{LoadResult, read_file};

/// Loader for weapon and armor special-effect tables from RON files.
pub struct EffectTableLoader;

impl EffectTableLoader {
    /// Load an [`EffectTable`] from a RON file.
    ///
    /// # File Format
    ///
    /// ```text
    /// (
    ///     weapons: {
    ///         "hollow_point": (damage_pct: 0.15),
    ///         "incendiary_rounds": (
    ///             interval_multiplier: Some(1.1),
    ///             on_hit: Some((tag: "fire", data: (damage: 2, duration_ms: 2000))),
    ///         ),
    ///     },
    ///     armor: {
    ///         "fireproof": (immunities: "BURNING", incap_chance_multiplier: 1.25),
    ///     },
    /// )
    /// ```
    pub fn load(path: &Path) -> LoadResult<EffectTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EffectTable> {
        let table: EffectTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effect table RON: {}", e))?;

        // Unknown tags are legal (dispatch ignores them) but almost always a typo.
        let procs = table.weapons.iter().filter_map(|(id, e)| Some((id, e.on_hit.as_ref()?)));
        for (id, on_hit) in procs {
            if on_hit.tag.parse::<ProcKind>().is_err() {
                tracing::warn!(effect = %id, tag = %on_hit.tag, "unknown proc tag");
            }
        }

        Ok(table)
    }
}
