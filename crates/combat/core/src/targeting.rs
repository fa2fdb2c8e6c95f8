//! Sticky, load-balanced target assignment.
//!
//! An attacker keeps its target until the target stops being valid (down, in
//! cover or stunned). Only attackers without a target are placed, each onto
//! the least-loaded valid opponent, so focus fire spreads out without ever
//! pulling a satisfied attacker off its current target.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::state::{CombatantId, Roster, TargetMap, Timestamp};

/// Refreshes `targets` for the current tick.
///
/// Returns the number of new assignments made.
pub fn assign_targets<R: Rng + ?Sized>(
    roster: &Roster,
    targets: &mut TargetMap,
    now: Timestamp,
    rng: &mut R,
) -> usize {
    targets.retain(|attacker, target| {
        let attacker_ok = roster.get(attacker).is_some_and(|c| c.is_alive());
        let target_ok = roster.get(target).is_some_and(|c| c.is_valid_target(now));
        attacker_ok && target_ok
    });

    let mut assigned = 0;
    for attacker in roster.iter().filter(|c| c.is_alive()) {
        if targets.target_of(&attacker.id).is_some() {
            continue;
        }

        let pool: Vec<(&CombatantId, usize)> = roster
            .side(attacker.side.opponent())
            .filter(|c| c.is_valid_target(now))
            .map(|c| (&c.id, targets.load(&c.id)))
            .collect();
        let Some(min_load) = pool.iter().map(|(_, load)| *load).min() else {
            tracing::trace!(attacker = %attacker.id, "no valid targets");
            continue;
        };

        let least_loaded: Vec<&CombatantId> = pool
            .iter()
            .filter(|(_, load)| *load == min_load)
            .map(|(id, _)| *id)
            .collect();
        if let Some(target) = least_loaded.choose(rng) {
            tracing::trace!(attacker = %attacker.id, target = %target, "target assigned");
            targets.assign(attacker.id.clone(), (*target).clone());
            assigned += 1;
        }
    }
    assigned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Combatant, DownState, Side, StatusEffect, StatusKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn roster(players: usize, enemies: usize) -> Roster {
        let mut roster = Roster::new();
        for i in 0..players {
            let _ = roster.push(Combatant::new(format!("p{i}"), "P", Side::Player));
        }
        for i in 0..enemies {
            let _ = roster.push(Combatant::new(format!("e{i}"), "E", Side::Enemy));
        }
        roster
    }

    #[test]
    fn every_living_attacker_gets_a_target() {
        let roster = roster(3, 2);
        let mut targets = TargetMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(assign_targets(&roster, &mut targets, Timestamp::ZERO, &mut rng), 5);
        for c in roster.iter() {
            let target = roster.get(targets.target_of(&c.id).unwrap()).unwrap();
            assert_eq!(target.side, c.side.opponent());
        }
    }

    #[test]
    fn load_is_spread_across_targets() {
        let roster = roster(4, 2);
        let mut targets = TargetMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assign_targets(&roster, &mut targets, Timestamp::ZERO, &mut rng);

        assert_eq!(targets.load(&CombatantId::from("e0")), 2);
        assert_eq!(targets.load(&CombatantId::from("e1")), 2);
    }

    #[test]
    fn satisfied_attackers_are_never_rebalanced() {
        let roster = roster(3, 2);
        let mut targets = TargetMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // Pile every player onto e0 up front.
        for i in 0..3 {
            targets.assign(CombatantId::new(format!("p{i}")), CombatantId::from("e0"));
        }

        assign_targets(&roster, &mut targets, Timestamp::ZERO, &mut rng);
        for i in 0..3 {
            let id = CombatantId::new(format!("p{i}"));
            assert_eq!(targets.target_of(&id), Some(&CombatantId::from("e0")));
        }
    }

    #[test]
    fn invalid_targets_and_downed_attackers_are_swept() {
        let mut roster = roster(2, 2);
        let mut targets = TargetMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        targets.assign(CombatantId::from("p0"), CombatantId::from("e0"));
        targets.assign(CombatantId::from("p1"), CombatantId::from("e0"));
        targets.assign(CombatantId::from("e1"), CombatantId::from("p1"));

        let e0 = roster.get_mut(&CombatantId::from("e0")).unwrap();
        e0.apply_status(StatusEffect::new(StatusKind::TakeCover, Timestamp(1000)));
        let p1 = roster.get_mut(&CombatantId::from("p1")).unwrap();
        p1.hp = 0;
        p1.set_down(DownState::Kia);

        assign_targets(&roster, &mut targets, Timestamp(500), &mut rng);

        assert_eq!(targets.target_of(&CombatantId::from("p0")), Some(&CombatantId::from("e1")));
        assert_eq!(targets.target_of(&CombatantId::from("p1")), None);
        assert_eq!(targets.target_of(&CombatantId::from("e1")), Some(&CombatantId::from("p0")));
        assert_eq!(targets.target_of(&CombatantId::from("e0")), Some(&CombatantId::from("p0")));
    }

    #[test]
    fn empty_pool_leaves_attacker_unassigned() {
        let mut roster = roster(1, 1);
        let e0 = roster.get_mut(&CombatantId::from("e0")).unwrap();
        e0.apply_status(StatusEffect::new(StatusKind::Stunned, Timestamp(1000)));

        let mut targets = TargetMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assign_targets(&roster, &mut targets, Timestamp::ZERO, &mut rng);

        assert_eq!(targets.target_of(&CombatantId::from("p0")), None);
        assert_eq!(targets.target_of(&CombatantId::from("e0")), Some(&CombatantId::from("p0")));
    }
}
