//! Periodic status processing: damage-over-time and expiry.
//!
//! Damage-over-time is tick counted and independent of the `Burning` status
//! entry, which is only a visual marker with its own deadline. A burn can run
//! out of ticks while the marker is still showing, and vice versa.

use rand::Rng;

use crate::combat::{DotEvent, apply_damage, credit_kill, mitigate};
use crate::config::CombatConfig;
use crate::state::{Roster, Timestamp};

/// Applies one round of damage-over-time (at most once per
/// `dot_interval_ms`, tracked through `last_dot`) and then removes every
/// expired status entry.
///
/// `last_dot` is owned by the caller; `None` means no round has run yet and
/// the next call processes immediately.
pub fn tick_status_effects<R: Rng + ?Sized>(
    roster: &mut Roster,
    now: Timestamp,
    last_dot: &mut Option<Timestamp>,
    rng: &mut R,
    config: &CombatConfig,
) -> Vec<DotEvent> {
    let due = last_dot.is_none_or(|last| now.since(last) >= config.timing.dot_interval_ms);
    let mut events = if due {
        *last_dot = Some(now);
        run_dots(roster, now, rng, config)
    } else {
        Vec::new()
    };

    for combatant in roster.iter_mut() {
        for kind in combatant.statuses.remove_expired(now) {
            tracing::trace!(combatant = %combatant.id, status = %kind, "status expired");
        }
    }

    credit_dot_kills(roster, &mut events);
    events
}

fn run_dots<R: Rng + ?Sized>(
    roster: &mut Roster,
    now: Timestamp,
    rng: &mut R,
    config: &CombatConfig,
) -> Vec<DotEvent> {
    let mut events = Vec::new();
    for target in roster.iter_mut().filter(|c| c.is_alive()) {
        for dot in target.dots.advance() {
            if !target.is_alive() {
                break;
            }
            let damage = if dot.ignores_mitigation {
                dot.tick_damage
            } else {
                mitigate(dot.tick_damage, target, now, &config.mitigation)
            };
            let applied = apply_damage(target, damage, rng, &config.attack);
            tracing::trace!(
                target = %target.id,
                kind = %dot.kind,
                damage = applied.dealt,
                ticks_left = dot.ticks_remaining.saturating_sub(1),
                "dot tick"
            );
            events.push(DotEvent {
                target: target.id.clone(),
                kind: dot.kind,
                damage: applied.dealt,
                hp_after: applied.hp_after,
                down_state: applied.down_state,
                // Resolved after the pass, once the roster is free to borrow.
                killer: applied.down_state.and(dot.source),
            });
        }
    }
    events
}

fn credit_dot_kills(roster: &mut Roster, events: &mut [DotEvent]) {
    for event in events.iter_mut().filter(|e| e.down_state.is_some()) {
        let Some(source) = event.killer.take() else {
            continue;
        };
        if let Some(killer) = roster.get_mut(&source) {
            event.killer = credit_kill(killer, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        Combatant, CombatantId, DamageOverTime, DotKind, Side, StatusEffect, StatusKind,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn burning_roster(ticks: u32, visual_until: u64) -> Roster {
        let mut target = Combatant::new("e1", "Target", Side::Enemy)
            .with_hp(50)
            .with_toughness(0);
        target.apply_status(StatusEffect::new(StatusKind::Burning, Timestamp(visual_until)));
        target.apply_dot(DamageOverTime::new(DotKind::Burn, 3, ticks).ignoring_mitigation());

        let mut roster = Roster::new();
        let _ = roster.push(target);
        roster
    }

    fn hp(roster: &Roster) -> u32 {
        roster.get(&CombatantId::from("e1")).unwrap().hp
    }

    #[test]
    fn dots_fire_once_per_interval() {
        let config = CombatConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut roster = burning_roster(4, 10_000);
        let mut last = Some(Timestamp(0));

        let events = tick_status_effects(&mut roster, Timestamp(400), &mut last, &mut rng, &config);
        assert!(events.is_empty());
        assert_eq!(hp(&roster), 50);

        let events =
            tick_status_effects(&mut roster, Timestamp(1000), &mut last, &mut rng, &config);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].damage, 3);
        assert_eq!(hp(&roster), 47);

        // Same window again: nothing.
        tick_status_effects(&mut roster, Timestamp(1500), &mut last, &mut rng, &config);
        assert_eq!(hp(&roster), 47);
        assert_eq!(last, Some(Timestamp(1000)));
    }

    #[test]
    fn burn_ticks_run_out_while_visual_stays() {
        let config = CombatConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut roster = burning_roster(2, 10_000);
        let mut last = None;

        for now in [0, 1000, 2000, 3000] {
            tick_status_effects(&mut roster, Timestamp(now), &mut last, &mut rng, &config);
        }

        let target = roster.get(&CombatantId::from("e1")).unwrap();
        assert_eq!(target.hp, 44);
        assert!(target.dots.is_empty());
        assert!(target.statuses.has(StatusKind::Burning, Timestamp(3000)));
    }

    #[test]
    fn visual_expiry_does_not_stop_ticks() {
        let config = CombatConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut roster = burning_roster(3, 500);
        let mut last = None;

        for now in [0, 1000, 2000] {
            tick_status_effects(&mut roster, Timestamp(now), &mut last, &mut rng, &config);
        }

        let target = roster.get(&CombatantId::from("e1")).unwrap();
        assert_eq!(target.hp, 41);
        assert!(target.statuses.iter().all(|e| e.kind != StatusKind::Burning));
    }

    #[test]
    fn mitigated_dot_respects_toughness() {
        let config = CombatConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut target = Combatant::new("e1", "Target", Side::Enemy)
            .with_hp(50)
            .with_toughness(90);
        target.apply_dot(DamageOverTime::new(DotKind::Bleed, 10, 1));
        let mut roster = Roster::new();
        let _ = roster.push(target);

        let events = tick_status_effects(&mut roster, Timestamp(0), &mut None, &mut rng, &config);
        assert_eq!(events[0].damage, 4);
    }

    #[test]
    fn lethal_tick_credits_player_source() {
        let config = CombatConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut target = Combatant::new("e1", "Target", Side::Enemy).with_hp(2);
        target.apply_dot(
            DamageOverTime::new(DotKind::Burn, 5, 3)
                .ignoring_mitigation()
                .with_source(Some(CombatantId::from("p1"))),
        );
        let mut roster = Roster::new();
        let _ = roster.push(Combatant::new("p1", "Thrower", Side::Player));
        let _ = roster.push(target);

        let events = tick_status_effects(&mut roster, Timestamp(0), &mut None, &mut rng, &config);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].damage, 2);
        assert!(events[0].down_state.is_some());
        assert_eq!(events[0].killer, Some(CombatantId::from("p1")));
        assert_eq!(roster.get(&CombatantId::from("p1")).unwrap().kills, 1);
        assert!(roster.get(&CombatantId::from("e1")).unwrap().dots.is_empty());
    }

    #[test]
    fn expired_statuses_are_swept() {
        let config = CombatConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut c = Combatant::new("p1", "P", Side::Player);
        c.apply_status(StatusEffect::new(StatusKind::Stunned, Timestamp(300)));
        c.apply_status(StatusEffect::new(StatusKind::TakeCover, Timestamp(900)));
        let mut roster = Roster::new();
        let _ = roster.push(c);

        tick_status_effects(&mut roster, Timestamp(500), &mut None, &mut rng, &config);

        let c = roster.get(&CombatantId::from("p1")).unwrap();
        let kinds: Vec<_> = c.statuses.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![StatusKind::TakeCover]);
    }
}
