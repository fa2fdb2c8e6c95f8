//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`CombatConfig`] from a TOML file.
    ///
    /// Missing tables and keys keep their defaults, so an empty file yields
    /// `CombatConfig::default()`.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &CombatConfig) -> LoadResult<()> {
        let chances = [
            ("attack.default_hit_chance", config.attack.default_hit_chance),
            ("attack.default_evade_chance", config.attack.default_evade_chance),
            ("grenade.hit_chance", config.grenade.hit_chance),
            ("mitigation.cap", config.mitigation.cap),
        ];
        for (key, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("{} must be within [0, 1], got {}", key, value);
            }
        }
        if config.mitigation.toughness_divisor <= 0.0 {
            anyhow::bail!("mitigation.toughness_divisor must be positive");
        }
        if config.timing.dot_interval_ms == 0 {
            anyhow::bail!("timing.dot_interval_ms must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(config, CombatConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ConfigLoader::parse(
            r#"
            seed = 7

            [grenade]
            hit_chance = 0.75

            [timing]
            min_interval_ms = 300
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert!((config.grenade.hit_chance - 0.75).abs() < 1e-9);
        assert_eq!(config.grenade.incendiary_primary_ticks, 4);
        assert_eq!(config.timing.min_interval_ms, 300);
        assert_eq!(config.timing.interval_base_ms, 2200);
    }

    #[test]
    fn test_out_of_range_chance_is_rejected() {
        let err = ConfigLoader::parse("[grenade]\nhit_chance = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("grenade.hit_chance"));
    }
}
