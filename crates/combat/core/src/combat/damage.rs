//! HP reduction and down-state resolution.

use rand::Rng;

use crate::combat::hit::roll;
use crate::config::AttackRules;
use crate::state::{Combatant, DownState, Side};

/// Outcome of landing damage on a combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageApplied {
    /// HP actually removed (clamped by remaining hp).
    pub dealt: u32,
    pub hp_after: u32,
    /// Set when this damage took the target down.
    pub down_state: Option<DownState>,
}

/// Chance that a lethal hit leaves a player incapacitated rather than killed.
///
/// ```text
/// chance = clamp((base + level × per_level) × incap_multiplier, 0, 1)
/// ```
pub fn incapacitation_chance(target: &Combatant, rules: &AttackRules) -> f64 {
    let chance = (rules.incap_base_chance + f64::from(target.level) * rules.incap_per_level)
        * target.incap_chance_multiplier;
    if chance.is_finite() {
        chance.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Rolls the down-state for a combatant that just reached 0 hp.
///
/// Enemies are always killed; players may be incapacitated.
pub fn roll_down_state<R: Rng + ?Sized>(
    target: &Combatant,
    rng: &mut R,
    rules: &AttackRules,
) -> DownState {
    match target.side {
        Side::Enemy => DownState::Kia,
        Side::Player => {
            if roll(rng, incapacitation_chance(target, rules)) {
                DownState::Incapacitated
            } else {
                DownState::Kia
            }
        }
    }
}

/// Subtracts `amount` from the target's hp (floored at 0) and resolves the
/// down-state on a lethal hit. Downed targets take no further damage.
pub fn apply_damage<R: Rng + ?Sized>(
    target: &mut Combatant,
    amount: u32,
    rng: &mut R,
    rules: &AttackRules,
) -> DamageApplied {
    if !target.is_alive() {
        return DamageApplied {
            dealt: 0,
            hp_after: target.hp,
            down_state: None,
        };
    }

    let before = target.hp;
    target.hp = before.saturating_sub(amount);

    let down_state = if target.hp == 0 {
        let state = roll_down_state(target, rng, rules);
        target.set_down(state);
        target.dots.clear();
        tracing::debug!(target = %target.id, state = %state, "combatant down");
        Some(state)
    } else {
        None
    };

    DamageApplied {
        dealt: before - target.hp,
        hp_after: target.hp,
        down_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn enemies_are_always_killed() {
        let rules = AttackRules::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let mut enemy = Combatant::new("e", "E", Side::Enemy).with_hp(5);
            enemy.incap_chance_multiplier = 100.0;
            let applied = apply_damage(&mut enemy, 9, &mut rng, &rules);
            assert_eq!(applied.down_state, Some(DownState::Kia));
            assert_eq!(applied.dealt, 5);
            assert_eq!(enemy.hp, 0);
        }
    }

    #[test]
    fn certain_incap_chance_incapacitates_players() {
        let rules = AttackRules::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut player = Combatant::new("p", "P", Side::Player).with_hp(5);
        player.incap_chance_multiplier = 10.0;
        assert_eq!(incapacitation_chance(&player, &rules), 1.0);

        let applied = apply_damage(&mut player, 5, &mut rng, &rules);
        assert_eq!(applied.down_state, Some(DownState::Incapacitated));
    }

    #[test]
    fn incap_chance_grows_with_level() {
        let rules = AttackRules::default();
        let low = Combatant::new("p", "P", Side::Player).with_level(1);
        let high = Combatant::new("p", "P", Side::Player).with_level(10);
        assert!(incapacitation_chance(&high, &rules) > incapacitation_chance(&low, &rules));
    }

    #[test]
    fn downed_targets_take_no_damage() {
        let rules = AttackRules::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut enemy = Combatant::new("e", "E", Side::Enemy).with_hp(5);
        apply_damage(&mut enemy, 5, &mut rng, &rules);
        let again = apply_damage(&mut enemy, 5, &mut rng, &rules);
        assert_eq!(again, DamageApplied::default());
    }
}
