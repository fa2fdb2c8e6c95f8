//! Thrown item resolution.
//!
//! A throw picks a primary target and splashes onto its formation neighbours
//! (at most [`GrenadeRules::MAX_SPLASH_TARGETS`]). The throw itself rolls
//! once against the fixed grenade hit chance; a miss affects nobody. After a
//! hit the primary rolls evade, and every splash target independently rolls
//! hit and evade. Throwing knives skip splash and use the thrower's own hit
//! chance instead.
//!
//! What a landed impact does depends on the item's [`ItemArchetype`].

mod impact;

use arrayvec::ArrayVec;
use rand::Rng;

use crate::combat::{
    GrenadeResult, ImpactOutcome, credit_kill, effective_evade_chance, effective_hit_chance, roll,
};
use crate::config::{CombatConfig, GrenadeRules, StatusRules};
use crate::env::{ItemArchetype, ItemRecord};
use crate::state::{CombatantId, Immunities, Roster, Side, Timestamp};

use impact::Tier;

/// What the resolver needs to know about the thrower once the throw is in
/// flight. Snapshotting it keeps the roster free for mutable target access.
#[derive(Clone, Debug)]
pub(crate) struct Thrower {
    pub id: CombatantId,
    pub side: Side,
    pub level: u32,
}

/// Resolves one use of a throwable `item` by the combatant at `thrower_idx`
/// against the combatant at `primary_idx`.
///
/// Non-throwable items, a downed thrower or a downed primary resolve to a
/// result with no impacts.
pub fn resolve_throw<R: Rng + ?Sized>(
    roster: &mut Roster,
    thrower_idx: usize,
    primary_idx: usize,
    item: &ItemRecord,
    now: Timestamp,
    rng: &mut R,
    config: &CombatConfig,
) -> GrenadeResult {
    let archetype = item.effect.archetype;
    let Some(thrower_ref) = roster.at(thrower_idx) else {
        return GrenadeResult {
            thrower: CombatantId::from(""),
            item_id: item.id.clone(),
            archetype,
            thrown_hit: false,
            impacts: Vec::new(),
        };
    };
    let thrower = Thrower {
        id: thrower_ref.id.clone(),
        side: thrower_ref.side,
        level: thrower_ref.level,
    };
    let thrower_alive = thrower_ref.is_alive();
    let thrower_hit_chance = effective_hit_chance(thrower_ref, now, &config.attack);

    let mut result = GrenadeResult {
        thrower: thrower.id.clone(),
        item_id: item.id.clone(),
        archetype,
        thrown_hit: false,
        impacts: Vec::new(),
    };

    let primary_alive = roster.at(primary_idx).is_some_and(|c| c.is_alive());
    let resolvable = archetype.is_throwable() && thrower_alive && primary_alive;
    if !resolvable || primary_idx == thrower_idx {
        tracing::debug!(thrower = %thrower.id, item = %item.id, "throw not resolvable");
        return result;
    }

    let throw_chance = match archetype {
        ItemArchetype::ThrowingKnife => thrower_hit_chance,
        _ => config.grenade.hit_chance,
    };
    result.thrown_hit = roll(rng, throw_chance);
    if !result.thrown_hit {
        tracing::debug!(thrower = %thrower.id, item = %item.id, "throw missed");
        return result;
    }

    let splash = match archetype {
        ItemArchetype::ThrowingKnife => ArrayVec::new(),
        _ => splash_targets(roster, primary_idx, thrower_idx),
    };

    let targets = std::iter::once((primary_idx, Tier::Primary))
        .chain(splash.into_iter().map(|idx| (idx, Tier::Splash)));
    for (idx, tier) in targets {
        if let Some(outcome) = strike(roster, idx, tier, item, &thrower, now, rng, config) {
            result.impacts.push(outcome);
        }
    }

    if let Some(killer) = roster.at_mut(thrower_idx) {
        for impact in result.impacts.iter_mut().filter(|i| i.down_state.is_some()) {
            impact.killer = credit_kill(killer, true);
        }
    }

    tracing::debug!(
        thrower = %result.thrower,
        item = %result.item_id,
        archetype = %archetype,
        impacts = result.impacts.len(),
        landed = result.impacts.iter().filter(|i| i.landed()).count(),
        "throw resolved"
    );
    result
}

/// Rolls hit (splash only) and evade for one target and lands the impact.
///
/// Returns `None` when the target is skipped outright (incendiary splash on a
/// burn-immune target).
#[allow(clippy::too_many_arguments)]
fn strike<R: Rng + ?Sized>(
    roster: &mut Roster,
    idx: usize,
    tier: Tier,
    item: &ItemRecord,
    thrower: &Thrower,
    now: Timestamp,
    rng: &mut R,
    config: &CombatConfig,
) -> Option<ImpactOutcome> {
    let target = roster.at_mut(idx)?;

    if item.effect.archetype == ItemArchetype::Incendiary
        && target.immunities.contains(Immunities::BURNING)
    {
        tracing::trace!(target = %target.id, "burn immune, skipped");
        return match tier {
            Tier::Primary => {
                Some(ImpactOutcome::untouched(target.id.clone(), target.hp, true, false))
            }
            Tier::Splash => None,
        };
    }

    if tier == Tier::Splash && !roll(rng, config.grenade.hit_chance) {
        return Some(ImpactOutcome::untouched(target.id.clone(), target.hp, false, false));
    }
    if roll(rng, effective_evade_chance(target, now)) {
        return Some(ImpactOutcome::untouched(target.id.clone(), target.hp, true, true));
    }

    Some(impact::land(target, tier, &item.effect, thrower, now, rng, config))
}

/// Living formation neighbours of the primary on its own side, excluding the
/// thrower, in formation order.
pub fn splash_targets(
    roster: &Roster,
    primary_idx: usize,
    thrower_idx: usize,
) -> ArrayVec<usize, { GrenadeRules::MAX_SPLASH_TARGETS }> {
    let mut splash = ArrayVec::new();
    let Some(primary) = roster.at(primary_idx) else {
        return splash;
    };
    let living = roster.living_indices(primary.side);
    let Some(pos) = living.iter().position(|&i| i == primary_idx) else {
        return splash;
    };

    for neighbour in [pos.checked_sub(1), pos.checked_add(1)].into_iter().flatten() {
        match living.get(neighbour) {
            Some(&idx) if idx != thrower_idx => splash.push(idx),
            _ => {}
        }
    }
    splash
}

/// Morale-driven reduction of panic and suppression, in percent.
///
/// ```text
/// pct = min(cap, morale / 10)
/// ```
pub fn morale_reduction_pct(morale: u32, rules: &StatusRules) -> f64 {
    (f64::from(morale) / 10.0).min(rules.morale_reduction_cap_pct).max(0.0)
}

/// Status duration after the morale reduction, never below the floor.
pub fn morale_adjusted_duration(duration_ms: u64, morale: u32, rules: &StatusRules) -> u64 {
    let pct = morale_reduction_pct(morale, rules);
    let reduced = (duration_ms as f64 * (1.0 - pct / 100.0)).floor();
    let reduced = if reduced.is_finite() && reduced > 0.0 { reduced as u64 } else { 0 };
    reduced.max(rules.min_status_duration_ms)
}
