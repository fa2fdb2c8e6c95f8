//! The mutable unit of simulation state.

use bitflags::bitflags;

use crate::procs::WeaponProc;
use crate::state::{
    CombatantId, DamageOverTime, DamageOverTimeSet, DotKind, DownState, Side, StatusEffect,
    StatusEffects, StatusKind, Timestamp,
};

bitflags! {
    /// Effect kinds a combatant can never receive.
    ///
    /// Derived once from equipped armor and fixed for the combatant's lifetime.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Immunities: u8 {
        const STUN        = 1 << 0;
        const PANIC       = 1 << 1;
        const SUPPRESSION = 1 << 2;
        const BURNING     = 1 << 3;
    }
}

impl Immunities {
    /// Returns true if these immunities block `kind`.
    pub fn blocks(self, kind: StatusKind) -> bool {
        match kind {
            StatusKind::Stunned => self.contains(Immunities::STUN),
            StatusKind::Panicked => self.contains(Immunities::PANIC),
            StatusKind::Suppressed => self.contains(Immunities::SUPPRESSION),
            StatusKind::Burning => self.contains(Immunities::BURNING),
            _ => false,
        }
    }
}

/// A simulation-ready fighter.
///
/// Built once per battle by the factory (or directly in tests). `hp` never
/// exceeds `max_hp`, and `down_state` is never cleared once set.
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    /// Originating soldier record, if any. Enemies have none.
    pub soldier_id: Option<String>,
    pub level: u32,

    pub hp: u32,
    pub max_hp: u32,
    pub down_state: Option<DownState>,

    pub chance_to_hit: f64,
    pub chance_to_evade: f64,
    /// Flat mitigation fraction used when `toughness` is `None`.
    pub mitigate_damage: f64,
    pub damage_min: u32,
    pub damage_max: u32,
    pub toughness: Option<u32>,
    pub attack_interval_ms: u64,
    pub morale: u32,

    pub immunities: Immunities,
    /// Scales the incapacitation chance on a lethal hit (player side).
    pub incap_chance_multiplier: f64,
    pub weapon_procs: Vec<WeaponProc>,

    pub statuses: StatusEffects,
    pub dots: DamageOverTimeSet,
    pub next_attack_at: Option<Timestamp>,
    pub kills: u32,
}

impl Combatant {
    pub const DEFAULT_HP: u32 = 20;
    pub const DEFAULT_HIT_CHANCE: f64 = 0.6;
    pub const DEFAULT_EVADE_CHANCE: f64 = 0.05;
    pub const DEFAULT_DAMAGE_MIN: u32 = 4;
    pub const DEFAULT_DAMAGE_MAX: u32 = 6;
    pub const DEFAULT_INTERVAL_MS: u64 = 1500;

    /// Creates a combatant with default stats and no toughness.
    pub fn new(id: impl Into<CombatantId>, name: impl Into<String>, side: Side) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            side,
            soldier_id: None,
            level: 1,
            hp: Self::DEFAULT_HP,
            max_hp: Self::DEFAULT_HP,
            down_state: None,
            chance_to_hit: Self::DEFAULT_HIT_CHANCE,
            chance_to_evade: Self::DEFAULT_EVADE_CHANCE,
            mitigate_damage: 0.0,
            damage_min: Self::DEFAULT_DAMAGE_MIN,
            damage_max: Self::DEFAULT_DAMAGE_MAX,
            toughness: None,
            attack_interval_ms: Self::DEFAULT_INTERVAL_MS,
            morale: 0,
            immunities: Immunities::empty(),
            incap_chance_multiplier: 1.0,
            weapon_procs: Vec::new(),
            statuses: StatusEffects::empty(),
            dots: DamageOverTimeSet::default(),
            next_attack_at: None,
            kills: 0,
        }
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp;
        self.max_hp = hp;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_chances(mut self, hit: f64, evade: f64) -> Self {
        self.chance_to_hit = hit;
        self.chance_to_evade = evade;
        self
    }

    pub fn with_damage(mut self, min: u32, max: u32) -> Self {
        self.damage_min = min.min(max);
        self.damage_max = min.max(max);
        self
    }

    pub fn with_toughness(mut self, toughness: u32) -> Self {
        self.toughness = Some(toughness);
        self
    }

    pub fn with_interval(mut self, interval_ms: u64) -> Self {
        self.attack_interval_ms = interval_ms;
        self
    }

    pub fn with_morale(mut self, morale: u32) -> Self {
        self.morale = morale;
        self
    }

    pub fn with_immunities(mut self, immunities: Immunities) -> Self {
        self.immunities = immunities;
        self
    }

    pub fn with_proc(mut self, proc_: WeaponProc) -> Self {
        self.weapon_procs.push(proc_);
        self
    }

    pub fn is_down(&self) -> bool {
        self.down_state.is_some()
    }

    /// Alive and still participating: hp above zero and no down-state.
    pub fn is_alive(&self) -> bool {
        self.hp > 0 && self.down_state.is_none()
    }

    /// Whether an opponent may pick this combatant as a weapon target.
    pub fn is_valid_target(&self, now: Timestamp) -> bool {
        self.is_alive()
            && !self.statuses.has(StatusKind::TakeCover, now)
            && !self.statuses.has(StatusKind::Stunned, now)
    }

    pub fn is_immune_to(&self, kind: StatusKind) -> bool {
        self.immunities.blocks(kind)
    }

    /// Applies a status effect unless the combatant is down or immune.
    ///
    /// Returns whether the effect was applied.
    pub fn apply_status(&mut self, effect: StatusEffect) -> bool {
        if self.is_down() || self.is_immune_to(effect.kind) {
            return false;
        }
        self.statuses.apply(effect);
        true
    }

    /// Applies a damage-over-time entry. Burns respect burn immunity.
    pub fn apply_dot(&mut self, dot: DamageOverTime) -> bool {
        if self.is_down() {
            return false;
        }
        if dot.kind == DotKind::Burn && self.immunities.contains(Immunities::BURNING) {
            return false;
        }
        self.dots.apply(dot);
        true
    }

    /// Sets the down-state if none is set yet.
    pub fn set_down(&mut self, state: DownState) {
        if self.down_state.is_none() {
            self.down_state = Some(state);
        }
    }

    /// Restores hp up to `max_hp`. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immune_combatant_rejects_status() {
        let mut c = Combatant::new("p1", "Vasquez", Side::Player)
            .with_immunities(Immunities::STUN | Immunities::BURNING);

        assert!(!c.apply_status(StatusEffect::new(StatusKind::Stunned, Timestamp(1000))));
        assert!(!c.apply_status(StatusEffect::new(StatusKind::Burning, Timestamp(1000))));
        assert!(!c.apply_dot(DamageOverTime::new(DotKind::Burn, 2, 4)));
        assert!(c.apply_status(StatusEffect::new(StatusKind::Panicked, Timestamp(1000))));

        assert!(!c.statuses.has(StatusKind::Stunned, Timestamp::ZERO));
        assert!(c.dots.get(DotKind::Burn).is_none());
    }

    #[test]
    fn stunned_or_covered_combatant_is_not_a_valid_target() {
        let mut c = Combatant::new("e1", "Raider", Side::Enemy);
        assert!(c.is_valid_target(Timestamp::ZERO));

        c.apply_status(StatusEffect::new(StatusKind::TakeCover, Timestamp(500)));
        assert!(!c.is_valid_target(Timestamp(100)));
        assert!(c.is_valid_target(Timestamp(500)));
    }

    #[test]
    fn down_state_is_never_overwritten() {
        let mut c = Combatant::new("p1", "Hicks", Side::Player);
        c.set_down(DownState::Incapacitated);
        c.set_down(DownState::Kia);
        assert_eq!(c.down_state, Some(DownState::Incapacitated));
    }

    #[test]
    fn heal_clamps_to_max_hp() {
        let mut c = Combatant::new("p1", "Hudson", Side::Player).with_hp(30);
        c.hp = 25;
        assert_eq!(c.heal(10), 5);
        assert_eq!(c.hp, 30);
    }
}
