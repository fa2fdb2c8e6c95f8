//! Special-effect tables for weapons and armor.

use std::collections::HashMap;

use crate::procs::WeaponProc;
use crate::state::Immunities;

/// Oracle resolving special-effect ids to their combat meaning.
pub trait EffectsOracle {
    fn weapon_effect(&self, id: &str) -> Option<&WeaponEffect>;
    fn armor_effect(&self, id: &str) -> Option<&ArmorEffect>;
}

/// What a weapon special effect changes.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaponEffect {
    /// Damage modifier as a fraction (`0.15` = +15%).
    pub damage_pct: f64,
    /// Attack interval multiplier (`0.8` = fires 20% more often).
    pub interval_multiplier: Option<f64>,
    /// On-hit proc copied onto the wielder.
    pub on_hit: Option<WeaponProc>,
}

/// What an armor special effect grants. Only honoured on rare+ armor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArmorEffect {
    pub immunities: Immunities,
    pub incap_chance_multiplier: f64,
}

impl Default for ArmorEffect {
    fn default() -> Self {
        Self {
            immunities: Immunities::empty(),
            incap_chance_multiplier: 1.0,
        }
    }
}

/// In-memory effect table keyed by special-effect id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectTable {
    pub weapons: HashMap<String, WeaponEffect>,
    pub armor: HashMap<String, ArmorEffect>,
}

impl EffectTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weapon(mut self, id: impl Into<String>, effect: WeaponEffect) -> Self {
        self.weapons.insert(id.into(), effect);
        self
    }

    pub fn with_armor(mut self, id: impl Into<String>, effect: ArmorEffect) -> Self {
        self.armor.insert(id.into(), effect);
        self
    }
}

impl EffectsOracle for EffectTable {
    fn weapon_effect(&self, id: &str) -> Option<&WeaponEffect> {
        self.weapons.get(id)
    }

    fn armor_effect(&self, id: &str) -> Option<&ArmorEffect> {
        self.armor.get(id)
    }
}
