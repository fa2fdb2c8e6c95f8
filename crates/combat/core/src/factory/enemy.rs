use crate::config::{CombatConfig, EnemyRules};
use crate::env::Rarity;
use crate::state::{Combatant, Side};

/// One enemy slot of an encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpec {
    /// Formation position; also decides the combatant id (`enemy-{slot}`).
    pub slot: usize,
    pub level: u32,
    /// Encounter rarity. Epic and above keep the elite slot at full hp.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
}

impl EnemySpec {
    pub fn new(slot: usize, level: u32) -> Self {
        Self {
            slot,
            level,
            rarity: Rarity::Common,
            name: None,
        }
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Whether this slot skips the hp reduction.
    pub fn is_elite(&self, rules: &EnemyRules) -> bool {
        self.slot == rules.elite_slot && self.rarity >= Rarity::Epic
    }
}

fn scale(value: u32, multiplier: f64) -> u32 {
    let scaled = (f64::from(value) * multiplier).round();
    if scaled.is_finite() && scaled >= 1.0 {
        scaled as u32
    } else {
        1
    }
}

/// Builds an enemy combatant from its level.
///
/// ```text
/// hp     = (base_hp + level × hp_per_level) × hp_multiplier   (elite: unscaled)
/// damage = (base + level × damage_per_level) × damage_multiplier
/// ```
pub fn build_enemy(spec: &EnemySpec, config: &CombatConfig) -> Combatant {
    let rules = &config.enemy;
    let level = spec.level.max(1);

    let raw_hp = rules.base_hp.saturating_add(level.saturating_mul(rules.hp_per_level));
    let hp = if spec.is_elite(rules) {
        raw_hp
    } else {
        scale(raw_hp, rules.hp_multiplier)
    };

    let damage_min = scale(
        rules
            .base_damage_min
            .saturating_add(level.saturating_mul(rules.damage_per_level)),
        rules.damage_multiplier,
    );
    let damage_max = scale(
        rules
            .base_damage_max
            .saturating_add(level.saturating_mul(rules.damage_per_level)),
        rules.damage_multiplier,
    );
    let hit_chance =
        (rules.base_hit_chance + f64::from(level) * rules.hit_per_level).clamp(0.0, 1.0);

    let name = spec
        .name
        .clone()
        .unwrap_or_else(|| format!("Hostile {}", spec.slot.saturating_add(1)));

    tracing::debug!(slot = spec.slot, level, hp, elite = spec.is_elite(rules), "built enemy");

    Combatant::new(format!("enemy-{}", spec.slot), name, Side::Enemy)
        .with_hp(hp)
        .with_level(level)
        .with_chances(hit_chance, rules.evade_chance)
        .with_damage(damage_min, damage_max)
        .with_toughness(level.saturating_mul(rules.toughness_per_level))
        .with_interval(rules.attack_interval_ms.max(config.timing.min_interval_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_scale_with_level() {
        let config = CombatConfig::default();
        let e = build_enemy(&EnemySpec::new(1, 3), &config);

        assert_eq!(e.id.as_str(), "enemy-1");
        assert_eq!(e.side, Side::Enemy);
        // (16 + 12) × 0.8 = 22.4 → 22
        assert_eq!(e.hp, 22);
        // (3 + 3) × 0.85 = 5.1 → 5; (5 + 3) × 0.85 = 6.8 → 7
        assert_eq!((e.damage_min, e.damage_max), (5, 7));
        assert_eq!(e.toughness, Some(12));
        assert!((e.chance_to_hit - 0.58).abs() < 1e-9);
        assert_eq!(e.attack_interval_ms, 1600);
    }

    #[test]
    fn elite_slot_keeps_full_hp_on_epic_encounters() {
        let config = CombatConfig::default();
        let elite = build_enemy(&EnemySpec::new(0, 3).with_rarity(Rarity::Epic), &config);
        let other = build_enemy(&EnemySpec::new(1, 3).with_rarity(Rarity::Legendary), &config);
        let rare = build_enemy(&EnemySpec::new(0, 3).with_rarity(Rarity::Rare), &config);

        assert_eq!(elite.hp, 28);
        assert_eq!(other.hp, 22);
        assert_eq!(rare.hp, 22);
        // Damage is scaled for the elite too.
        assert_eq!(elite.damage_max, other.damage_max);
    }

    #[test]
    fn level_zero_is_treated_as_one() {
        let e = build_enemy(&EnemySpec::new(2, 0), &CombatConfig::default());
        assert_eq!(e.level, 1);
        assert_eq!(e.name, "Hostile 3");
    }

    #[test]
    fn huge_levels_saturate_instead_of_overflowing() {
        let config = CombatConfig::default();
        let e = build_enemy(&EnemySpec::new(usize::MAX, u32::MAX), &config);

        assert_eq!(e.level, u32::MAX);
        assert!(e.hp >= 1);
        assert!(e.damage_min <= e.damage_max);
        assert_eq!(e.toughness, Some(u32::MAX));
        assert!(e.chance_to_hit <= 1.0);
        assert_eq!(e.id.as_str(), format!("enemy-{}", usize::MAX));

        let elite = build_enemy(&EnemySpec::new(0, u32::MAX).with_rarity(Rarity::Epic), &config);
        assert_eq!(elite.hp, u32::MAX);
    }
}
