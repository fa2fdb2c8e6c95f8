//! Soldier, equipment and inventory records.
//!
//! Every optional field has a documented fallback applied by the factory, so
//! partially filled records never fail to produce a combatant.

use crate::state::StatusKind;

/// Equipment quality tier.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Squad role. Weapons may be restricted to one.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Role {
    Rifleman,
    Gunner,
    Marksman,
    Medic,
    Grenadier,
}

/// Core soldier attributes.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    pub hit_points: Option<u32>,
    pub dexterity: u32,
    pub morale: u32,
    pub toughness: u32,
    pub awareness: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaponRecord {
    pub name: String,
    /// Single damage value, used for both bounds when min/max are absent.
    pub damage: Option<u32>,
    pub damage_min: Option<u32>,
    pub damage_max: Option<u32>,
    /// Speed tier, clamped to 1..=10.
    pub speed: Option<u32>,
    pub special_effect: Option<String>,
    pub role: Option<Role>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArmorRecord {
    pub name: String,
    pub toughness: u32,
    pub rarity: Rarity,
    pub special_effect: Option<String>,
}

/// Who an item may be used on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemTarget {
    #[default]
    Enemy,
    Ally,
    User,
}

/// Resolution path for a usable item.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemArchetype {
    /// Damage and/or status grenade (frag, flashbang, concussion).
    Damage,
    Smoke,
    Incendiary,
    ThrowingKnife,
    /// Armor-shredding charge.
    ToughnessReduction,
    /// Medical item; not throwable.
    Heal,
}

impl ItemArchetype {
    pub fn is_throwable(self) -> bool {
        !matches!(self, ItemArchetype::Heal)
    }
}

/// Status a generic damage/effect grenade inflicts.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InflictedStatus {
    Stun,
    Panic,
    Suppress,
    Blind,
}

impl InflictedStatus {
    pub fn status_kind(self) -> StatusKind {
        match self {
            InflictedStatus::Stun => StatusKind::Stunned,
            InflictedStatus::Panic => StatusKind::Panicked,
            InflictedStatus::Suppress => StatusKind::Suppressed,
            InflictedStatus::Blind => StatusKind::Blinded,
        }
    }

    /// Panic and suppression are shortened by the target's morale.
    pub fn morale_reduced(self) -> bool {
        matches!(self, InflictedStatus::Panic | InflictedStatus::Suppress)
    }
}

/// What using an item does.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemEffect {
    pub archetype: ItemArchetype,
    #[cfg_attr(feature = "serde", serde(default))]
    pub result: Option<InflictedStatus>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_ms: u64,
    /// Damage, burn tick damage or heal amount depending on the archetype.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u32,
}

impl ItemEffect {
    pub fn new(archetype: ItemArchetype, value: u32) -> Self {
        Self {
            archetype,
            result: None,
            duration_ms: 0,
            value,
        }
    }

    pub fn with_status(mut self, status: InflictedStatus, duration_ms: u64) -> Self {
        self.result = Some(status);
        self.duration_ms = duration_ms;
        self
    }
}

/// A throwable or medical item from a soldier's inventory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRecord {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: ItemTarget,
    pub effect: ItemEffect,
}

impl ItemRecord {
    pub fn new(id: impl Into<String>, target: ItemTarget, effect: ItemEffect) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            target,
            effect,
        }
    }
}

/// A squad member as the roster layer describes them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SoldierRecord {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub role: Option<Role>,
    pub attributes: Attributes,
    pub weapon: Option<WeaponRecord>,
    pub armor: Option<ArmorRecord>,
    pub inventory: Vec<ItemRecord>,
    /// Explicit override of the attribute-derived hit chance.
    pub chance_to_hit: Option<f64>,
    /// Explicit override of the attribute-derived evade chance.
    pub chance_to_evade: Option<f64>,
}
