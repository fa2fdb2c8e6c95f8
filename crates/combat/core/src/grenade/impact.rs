//! Per-archetype effect of a landed throw on one combatant.

use rand::Rng;

use crate::combat::{ImpactOutcome, apply_damage, mitigate};
use crate::config::CombatConfig;
use crate::env::{ItemArchetype, ItemEffect};
use crate::grenade::{Thrower, morale_adjusted_duration};
use crate::state::{
    Combatant, DamageOverTime, DotKind, Side, StatusEffect, StatusKind, StatusPayload, Timestamp,
};

/// Whether a combatant was the aimed-at target or caught in the splash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tier {
    Primary,
    Splash,
}

impl Tier {
    /// Splash takes half the base value, floored at 1 when there is any.
    fn scale(self, value: u32) -> u32 {
        match self {
            Tier::Primary => value,
            Tier::Splash if value == 0 => 0,
            Tier::Splash => (value / 2).max(1),
        }
    }

    fn scale_duration(self, duration_ms: u64) -> u64 {
        match self {
            Tier::Primary => duration_ms,
            Tier::Splash => duration_ms / 2,
        }
    }
}

pub(crate) fn land<R: Rng + ?Sized>(
    target: &mut Combatant,
    tier: Tier,
    effect: &ItemEffect,
    thrower: &Thrower,
    now: Timestamp,
    rng: &mut R,
    config: &CombatConfig,
) -> ImpactOutcome {
    let mut outcome = ImpactOutcome::untouched(target.id.clone(), target.hp, true, false);

    match effect.archetype {
        ItemArchetype::Damage => {
            strike_damage(target, tier.scale(effect.value), &mut outcome, now, rng, config);
            if let Some(inflicted) = effect.result {
                let kind = inflicted.status_kind();
                let mut duration = tier.scale_duration(effect.duration_ms);
                if inflicted.morale_reduced() && duration > 0 {
                    duration = morale_adjusted_duration(duration, target.morale, &config.status);
                }
                if duration > 0 && target.apply_status(StatusEffect::new(kind, now + duration)) {
                    outcome.status = Some(kind);
                }
            }
        }
        ItemArchetype::Smoke => {
            let rules = &config.grenade;
            let accuracy_penalty = match tier {
                Tier::Primary => rules.smoke_primary_accuracy_penalty,
                Tier::Splash => rules.smoke_splash_accuracy_penalty,
            };
            let smoke = StatusEffect::new(StatusKind::Smoked, now + rules.smoke_duration_ms)
                .with_payload(StatusPayload::Smoke {
                    accuracy_penalty,
                    evasion_bonus: rules.smoke_evasion_bonus,
                });
            if target.apply_status(smoke) {
                outcome.status = Some(StatusKind::Smoked);
            }
        }
        ItemArchetype::Incendiary => {
            let ticks = match tier {
                Tier::Primary => config.grenade.incendiary_primary_ticks,
                Tier::Splash => config.grenade.incendiary_splash_ticks,
            };
            let tick_damage = tier.scale(effect.value.max(1));
            let source = (thrower.side == Side::Player).then(|| thrower.id.clone());
            let burn = DamageOverTime::new(DotKind::Burn, tick_damage, ticks)
                .ignoring_mitigation()
                .with_source(source);
            if target.apply_dot(burn) {
                let visual = u64::from(ticks) * config.timing.dot_interval_ms;
                target.apply_status(StatusEffect::new(StatusKind::Burning, now + visual));
                outcome.status = Some(StatusKind::Burning);
            }
        }
        ItemArchetype::ThrowingKnife => {
            strike_damage(target, effect.value.max(1), &mut outcome, now, rng, config);
        }
        ItemArchetype::ToughnessReduction => {
            let rules = &config.grenade;
            if tier == Tier::Primary {
                strike_damage(target, 1 + thrower.level / 2, &mut outcome, now, rng, config);
            }
            let (pct, duration) = match tier {
                Tier::Primary => (rules.shred_primary_pct, rules.shred_primary_duration_ms),
                Tier::Splash => (rules.shred_splash_pct, rules.shred_splash_duration_ms),
            };
            let shred = StatusEffect::new(StatusKind::ToughnessReduced, now + duration)
                .with_payload(StatusPayload::ToughnessReduction(pct));
            if target.apply_status(shred) {
                outcome.status = Some(StatusKind::ToughnessReduced);
            }
        }
        ItemArchetype::Heal => {}
    }

    outcome
}

/// Mitigated direct damage. Zero base damage is a no-op.
fn strike_damage<R: Rng + ?Sized>(
    target: &mut Combatant,
    base: u32,
    outcome: &mut ImpactOutcome,
    now: Timestamp,
    rng: &mut R,
    config: &CombatConfig,
) {
    if base == 0 {
        return;
    }
    let damage = mitigate(base, target, now, &config.mitigation);
    let applied = apply_damage(target, damage, rng, &config.attack);
    outcome.damage = applied.dealt;
    outcome.hp_after = applied.hp_after;
    outcome.down_state = applied.down_state;
}
