//! Damage mitigation from toughness.
//!
//! # Formula
//!
//! ```text
//! toughness'  = toughness × (1 − reduction_pct)        if toughness-reduced
//! mitigation  = min(cap, toughness' / divisor / 100)
//! mitigation' = mitigation × stun_factor               if stunned
//! final       = max(1, ceil(raw × (1 − mitigation')))
//! ```

use crate::config::MitigationRules;
use crate::state::{Combatant, StatusKind, Timestamp};

/// Absorbs float error so exact products (e.g. `100 × 0.7`) do not ceil up.
const ROUNDING_EPSILON: f64 = 1e-9;

/// Mitigation fraction for a toughness value, in `[0, cap]`.
pub fn toughness_mitigation(toughness: f64, rules: &MitigationRules) -> f64 {
    if !(toughness > 0.0) || !(rules.toughness_divisor > 0.0) {
        return 0.0;
    }
    (toughness / rules.toughness_divisor / 100.0).min(rules.cap.max(0.0))
}

/// Mitigation that applies to damage landing on `target` at `now`.
///
/// Toughness reduction scales toughness before conversion; stun then scales the
/// resulting mitigation. Combatants without toughness fall back to their flat
/// `mitigate_damage`.
pub fn effective_mitigation(target: &Combatant, now: Timestamp, rules: &MitigationRules) -> f64 {
    let base = match target.toughness {
        Some(toughness) => {
            let mut toughness = f64::from(toughness);
            if let Some(pct) = target.statuses.toughness_reduction(now) {
                toughness *= (1.0 - pct).clamp(0.0, 1.0);
            }
            toughness_mitigation(toughness, rules)
        }
        None => target.mitigate_damage.clamp(0.0, rules.cap.max(0.0)),
    };

    if target.statuses.has(StatusKind::Stunned, now) {
        base * rules.stun_factor.clamp(0.0, 1.0)
    } else {
        base
    }
}

/// Applies a mitigation fraction to raw damage. Never returns less than 1.
pub fn compute_final_damage(raw: u32, mitigation: f64) -> u32 {
    let mitigation = if mitigation.is_finite() {
        mitigation.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let scaled = f64::from(raw) * (1.0 - mitigation);
    ((scaled - ROUNDING_EPSILON).ceil().max(1.0)) as u32
}

/// Raw damage → damage landing on `target`.
pub fn mitigate(raw: u32, target: &Combatant, now: Timestamp, rules: &MitigationRules) -> u32 {
    compute_final_damage(raw, effective_mitigation(target, now, rules))
}
