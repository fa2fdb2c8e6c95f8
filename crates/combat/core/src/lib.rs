//! Real-time combat resolution for squad battles.
//!
//! `combat-core` owns the rules that decide who attacks whom, whether attacks
//! land, how much damage survives mitigation, and how timed status effects,
//! thrown items and weapon procs alter the fight. Everything is driven by an
//! explicit `now` timestamp handed in by the caller, and all mutable state for
//! one battle lives in a [`session::CombatSession`].
//!
//! Per tick the order is fixed:
//!
//! 1. [`targeting::assign_targets`] refreshes the target map
//! 2. [`combat::resolve_attack`] runs for every combatant whose attack is due
//! 3. [`ticker::tick_status_effects`] applies damage-over-time and expires effects
//!
//! Thrown items are resolved out-of-band through [`grenade::resolve_throw`].
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod factory;
pub mod grenade;
pub mod procs;
pub mod session;
pub mod state;
pub mod targeting;
pub mod ticker;

pub use combat::{
    AttackResult, DamageApplied, DotEvent, GrenadeResult, ImpactOutcome, compute_final_damage,
    effective_mitigation, resolve_attack, toughness_mitigation,
};
pub use config::{
    AttackRules, CombatConfig, EnemyRules, GrenadeRules, MitigationRules, StatusRules, TimingRules,
};
pub use env::{
    ArmorEffect, ArmorRecord, Attributes, EffectTable, EffectsOracle, InflictedStatus,
    ItemArchetype, ItemEffect, ItemRecord, ItemTarget, Rarity, Role, SoldierRecord, WeaponEffect,
    WeaponRecord,
};
pub use error::SessionError;
pub use factory::{EnemySpec, attack_interval_ms, build_enemy, build_soldier, weapon_damage};
pub use grenade::{morale_adjusted_duration, morale_reduction_pct, resolve_throw, splash_targets};
pub use procs::{ProcContext, ProcData, ProcHandler, ProcKind, ProcRegistry, WeaponProc};
pub use session::{BattleOutcome, CombatSession, TickReport};
pub use state::{
    Combatant, CombatantId, DamageOverTime, DotKind, DownState, Immunities, Roster, Side,
    StatusEffect, StatusEffects, StatusKind, StatusPayload, TargetMap, Timestamp,
};
pub use targeting::assign_targets;
pub use ticker::tick_status_effects;
