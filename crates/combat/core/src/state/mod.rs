//! Mutable battle state: combatants, their status effects, the roster and the
//! attacker → target map.
mod combatant;
mod common;
mod roster;
mod status;
mod targets;

pub use combatant::{Combatant, Immunities};
pub use common::{CombatantId, DownState, Side, Timestamp};
pub use roster::Roster;
pub use status::{
    DamageOverTime, DamageOverTimeSet, DotKind, StatusEffect, StatusEffects, StatusKind,
    StatusPayload,
};
pub use targets::TargetMap;
