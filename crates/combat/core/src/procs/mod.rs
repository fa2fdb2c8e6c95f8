//! On-hit weapon procs.
//!
//! # Architecture
//!
//! Weapons carry a [`WeaponProc`]: a string tag plus a [`ProcData`] payload.
//! The tag is parsed into a [`ProcKind`] and looked up in a [`ProcRegistry`]
//! that maps each kind to a plain function handler. Attack resolution only
//! calls [`ProcRegistry::dispatch`]; adding a weapon effect means adding a
//! variant and a handler, never touching the attack path.
//!
//! Unknown tags are ignored.

mod handlers;
mod registry;

pub use registry::{ProcContext, ProcHandler, ProcRegistry};

/// Built-in proc kinds.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProcKind {
    /// Flat unmitigated bonus damage plus burning marker; respects burn immunity.
    Fire,
    /// Mitigated bonus damage.
    Carnage,
    /// Timed accuracy debuff on the target.
    Overwhelm,
    /// Timed blind on the target.
    Blind,
    /// Timed stun on the target; respects stun immunity.
    Stun,
    /// Unmitigated damage over time, one tick per second of duration.
    Bleed,
}

/// Proc payload.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProcData {
    /// Trigger chance per landed hit.
    pub chance: f64,
    pub damage: u32,
    pub duration_ms: u64,
    /// Kind-specific magnitude (e.g. accuracy penalty for overwhelm).
    pub value: f64,
}

impl Default for ProcData {
    fn default() -> Self {
        Self {
            chance: 1.0,
            damage: 0,
            duration_ms: 0,
            value: 0.0,
        }
    }
}

/// A proc attached to a weapon.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProc {
    pub tag: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: ProcData,
}

impl WeaponProc {
    pub fn new(tag: impl Into<String>, data: ProcData) -> Self {
        Self {
            tag: tag.into(),
            data,
        }
    }
}
