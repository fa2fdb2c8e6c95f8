//! Weapon attack resolution and attack scheduling.

use rand::Rng;

use crate::combat::damage::apply_damage;
use crate::combat::hit::{effective_evade_chance, effective_hit_chance, roll, roll_damage};
use crate::combat::mitigation::mitigate;
use crate::combat::result::AttackResult;
use crate::config::{CombatConfig, TimingRules};
use crate::procs::{ProcContext, ProcRegistry};
use crate::state::{Combatant, CombatantId, Side, StatusKind, Timestamp};

/// Resolves one weapon attack from `attacker` against `target`.
///
/// 1. Hit roll with the attacker's effective hit chance
/// 2. Evade roll with the target's effective evade chance
/// 3. Uniform damage roll in `[damage_min, damage_max]`, then mitigation
/// 4. Down-state roll on a lethal hit
/// 5. Weapon procs on a landed hit against a target still standing
///
/// A miss or an evade mutates nothing.
pub fn resolve_attack<R: Rng + ?Sized>(
    attacker: &mut Combatant,
    target: &mut Combatant,
    now: Timestamp,
    rng: &mut R,
    config: &CombatConfig,
    procs: &ProcRegistry,
) -> AttackResult {
    let hit_chance = effective_hit_chance(attacker, now, &config.attack);
    if !roll(rng, hit_chance) {
        tracing::trace!(attacker = %attacker.id, target = %target.id, hit_chance, "miss");
        return AttackResult::missed(attacker.id.clone(), target.id.clone(), target.hp);
    }

    if roll(rng, effective_evade_chance(target, now)) {
        tracing::trace!(attacker = %attacker.id, target = %target.id, "evaded");
        return AttackResult {
            hit: true,
            evaded: true,
            ..AttackResult::missed(attacker.id.clone(), target.id.clone(), target.hp)
        };
    }

    let raw = roll_damage(rng, attacker.damage_min, attacker.damage_max);
    let damage = mitigate(raw, target, now, &config.mitigation);
    let mut applied = apply_damage(target, damage, rng, &config.attack);

    let mut proc_damage = 0;
    if applied.down_state.is_none() {
        for weapon_proc in &attacker.weapon_procs {
            if !roll(rng, weapon_proc.data.chance) {
                continue;
            }
            let mut ctx = ProcContext {
                attacker: &*attacker,
                target: &mut *target,
                now,
                data: &weapon_proc.data,
                config,
            };
            let extra = procs.dispatch(&weapon_proc.tag, &mut ctx);
            if extra == 0 {
                continue;
            }
            let extra_applied = apply_damage(target, extra, rng, &config.attack);
            proc_damage += extra_applied.dealt;
            applied.hp_after = extra_applied.hp_after;
            if extra_applied.down_state.is_some() {
                applied.down_state = extra_applied.down_state;
                break;
            }
        }
    }

    let killer = credit_kill(attacker, applied.down_state.is_some());

    tracing::debug!(
        attacker = %attacker.id,
        target = %target.id,
        raw,
        damage,
        proc_damage,
        hp = applied.hp_after,
        "hit"
    );

    AttackResult {
        attacker: attacker.id.clone(),
        target: target.id.clone(),
        hit: true,
        evaded: false,
        damage: applied.dealt.min(damage),
        proc_damage,
        target_hp: applied.hp_after,
        down_state: applied.down_state,
        killer,
    }
}

/// Increments a player-side killer's tally and returns its id.
pub(crate) fn credit_kill(killer: &mut Combatant, target_went_down: bool) -> Option<CombatantId> {
    if !target_went_down || killer.side != Side::Player {
        return None;
    }
    killer.kills += 1;
    Some(killer.id.clone())
}

/// Interval multiplier from attack-speed buffs and panic.
pub fn attack_speed_multiplier(combatant: &Combatant, now: Timestamp, rules: &TimingRules) -> f64 {
    let mut multiplier = combatant
        .statuses
        .speed_multiplier(now)
        .filter(|m| m.is_finite() && *m > 0.0)
        .unwrap_or(1.0);
    if combatant.statuses.has(StatusKind::Panicked, now) {
        multiplier *= rules.panic_slowdown;
    }
    multiplier
}

/// Sets the next instant `combatant` may attack.
///
/// ```text
/// next = now + round(attack_interval × speed_multiplier)
/// ```
pub fn schedule_next_attack(combatant: &mut Combatant, now: Timestamp, rules: &TimingRules) {
    let multiplier = attack_speed_multiplier(combatant, now, rules);
    let delay = (combatant.attack_interval_ms as f64 * multiplier).round() as u64;
    combatant.next_attack_at = Some(now + delay);
}

/// Whether `combatant`'s scheduled attack time has elapsed.
pub fn attack_due(combatant: &Combatant, now: Timestamp) -> bool {
    combatant.next_attack_at.is_none_or(|at| now >= at)
}
