//! Read-only data crossing the engine boundary.
//!
//! Soldier and item records arrive from the company/roster layer; effect tables
//! describe what weapon and armor special effects do. The engine never mutates
//! or owns any of them.
mod effects;
mod records;

pub use effects::{ArmorEffect, EffectTable, EffectsOracle, WeaponEffect};
pub use records::{
    ArmorRecord, Attributes, InflictedStatus, ItemArchetype, ItemEffect, ItemRecord, ItemTarget,
    Rarity, Role, SoldierRecord, WeaponRecord,
};
