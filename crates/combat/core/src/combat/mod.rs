//! Weapon combat resolution.
//!
//! Pure rules for a single exchange: hit and evade chances, damage rolls,
//! toughness mitigation, down-state resolution and attack scheduling. The
//! session decides *when* these run; this module decides *what* happens.

pub mod attack;
pub mod damage;
pub mod hit;
pub mod mitigation;
pub mod result;

pub use attack::{attack_due, attack_speed_multiplier, resolve_attack, schedule_next_attack};
pub(crate) use attack::credit_kill;
pub use damage::{DamageApplied, apply_damage, incapacitation_chance, roll_down_state};
pub use hit::{effective_evade_chance, effective_hit_chance, roll, roll_damage};
pub use mitigation::{compute_final_damage, effective_mitigation, mitigate, toughness_mitigation};
pub use result::{AttackResult, DotEvent, GrenadeResult, ImpactOutcome};
