//! Combatant construction from soldier records and enemy slots.
//!
//! Factories never fail: every missing field falls back to the defaults in
//! [`crate::config::AttackRules`] and [`crate::config::TimingRules`].

mod enemy;
mod soldier;

pub use enemy::{EnemySpec, build_enemy};
pub use soldier::build_soldier;

use crate::config::{AttackRules, TimingRules};
use crate::env::{WeaponEffect, WeaponRecord};

/// Weapon damage bounds after special-effect and global modifiers.
///
/// ```text
/// bound' = max(1, round(bound × (1 + damage_pct) × weapon_damage_multiplier))
/// ```
///
/// A single `damage` value is used for both bounds when min/max are missing.
/// No weapon yields the unmodified default bounds.
pub fn weapon_damage(
    weapon: Option<&WeaponRecord>,
    effect: Option<&WeaponEffect>,
    rules: &AttackRules,
) -> (u32, u32) {
    let defaults = (rules.default_damage_min, rules.default_damage_max);
    let Some(weapon) = weapon else {
        return defaults;
    };

    let (min, max) = match (weapon.damage_min, weapon.damage_max, weapon.damage) {
        (Some(min), Some(max), _) => (min, max),
        (_, _, Some(damage)) => (damage, damage),
        (Some(min), None, None) => (min, min),
        (None, Some(max), None) => (max, max),
        (None, None, None) => return defaults,
    };

    let pct = effect.map_or(0.0, |e| e.damage_pct);
    let scale = |value: u32| -> u32 {
        let scaled = (f64::from(value) * (1.0 + pct) * rules.weapon_damage_multiplier).round();
        if scaled.is_finite() && scaled >= 1.0 {
            scaled as u32
        } else {
            1
        }
    };

    let (lo, hi) = (scale(min), scale(max));
    (lo.min(hi), lo.max(hi))
}

/// Milliseconds between attacks.
///
/// ```text
/// speed = clamp(weapon.speed, 1, 10)
/// base  = interval_base − speed × speed_factor      (default interval without speed)
/// ms    = round(base × (1 − min(dex × per_point, cap)) × interval_multiplier)
/// ms    = floor(ms × weapon_mult) if weapon_mult < 1, round(ms × weapon_mult) otherwise
/// ms    = max(ms, min_interval)
/// ```
///
/// Flooring quick weapons keeps small reductions from rounding away.
pub fn attack_interval_ms(
    speed: Option<u32>,
    dexterity: u32,
    weapon_multiplier: Option<f64>,
    rules: &TimingRules,
) -> u64 {
    let base = match speed {
        Some(speed) => {
            let speed = speed.clamp(TimingRules::MIN_WEAPON_SPEED, TimingRules::MAX_WEAPON_SPEED);
            rules
                .interval_base_ms
                .saturating_sub(u64::from(speed) * rules.speed_factor_ms)
        }
        None => rules.default_interval_ms,
    };

    let dex_bonus = (f64::from(dexterity) * rules.dex_speed_bonus_per_point)
        .clamp(0.0, rules.dex_speed_bonus_cap);
    let mut ms = (base as f64 * (1.0 - dex_bonus) * rules.interval_multiplier).round();

    if let Some(multiplier) = weapon_multiplier.filter(|m| m.is_finite() && *m > 0.0) {
        ms = if multiplier < 1.0 {
            (ms * multiplier).floor()
        } else {
            (ms * multiplier).round()
        };
    }

    let ms = if ms.is_finite() && ms > 0.0 { ms as u64 } else { 0 };
    ms.max(rules.min_interval_ms)
}
