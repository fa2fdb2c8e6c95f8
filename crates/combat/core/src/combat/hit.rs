//! Hit and evade chances.

use rand::Rng;

use crate::config::AttackRules;
use crate::state::{Combatant, StatusKind, Timestamp};

/// Attacker's hit chance after active accuracy penalties, in `[0, 1]`.
///
/// ```text
/// hit = chance_to_hit − blind − suppression − smoke − overwhelm
/// ```
pub fn effective_hit_chance(attacker: &Combatant, now: Timestamp, rules: &AttackRules) -> f64 {
    let mut chance = attacker.chance_to_hit - attacker.statuses.accuracy_penalty(now);
    if attacker.statuses.has(StatusKind::Blinded, now) {
        chance -= rules.blind_accuracy_penalty;
    }
    if attacker.statuses.has(StatusKind::Suppressed, now) {
        chance -= rules.suppression_accuracy_penalty;
    }
    chance.clamp(0.0, 1.0)
}

/// Target's evade chance including smoke cover, in `[0, 1]`.
pub fn effective_evade_chance(target: &Combatant, now: Timestamp) -> f64 {
    (target.chance_to_evade + target.statuses.evasion_bonus(now)).clamp(0.0, 1.0)
}

/// Bernoulli roll. Non-finite chances never succeed.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    if !chance.is_finite() {
        return false;
    }
    rng.gen_bool(chance.clamp(0.0, 1.0))
}

/// Uniform integer damage in `[min, max]`.
pub fn roll_damage<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}
