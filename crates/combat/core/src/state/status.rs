//! Timed status effects and damage-over-time entries.
//!
//! # Expiry
//!
//! Effects store `expires_at: Timestamp`. An effect is active while
//! `now < expires_at`; the status ticker drops it once that no longer holds.
//! Nothing is scheduled, expiry is a polling check against the tick's `now`.
//!
//! # Damage over time
//!
//! Burn and bleed damage is tick-counted rather than timed, so it lives in a
//! separate [`DamageOverTimeSet`]. The `Burning` status is only the visible
//! marker and may outlive (or be outlived by) the burn ticks.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::state::{CombatantId, Timestamp};

/// Kinds of timed status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    /// Cannot be targeted.
    TakeCover,
    /// Cannot act or be targeted; mitigation halved.
    Stunned,
    /// Attacks twice as slowly.
    Panicked,
    /// Visual burning marker.
    Burning,
    /// Accuracy penalty plus evasion bonus.
    Smoked,
    /// Large accuracy penalty.
    Blinded,
    /// Accuracy penalty.
    Suppressed,
    /// Accuracy penalty from an overwhelming weapon.
    AccuracyDebuff,
    /// Attack interval multiplier.
    AttackSpeedBuff,
    /// Effective toughness reduced by a percentage.
    ToughnessReduced,
}

/// Data carried by a status entry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusPayload {
    #[default]
    None,
    AccuracyPenalty(f64),
    Smoke {
        accuracy_penalty: f64,
        evasion_bonus: f64,
    },
    SpeedMultiplier(f64),
    ToughnessReduction(f64),
}

/// A single status effect with expiration time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub expires_at: Timestamp,
    pub payload: StatusPayload,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, expires_at: Timestamp) -> Self {
        Self {
            kind,
            expires_at,
            payload: StatusPayload::None,
        }
    }

    pub fn with_payload(mut self, payload: StatusPayload) -> Self {
        self.payload = payload;
        self
    }

    pub fn is_active(&self, now: Timestamp) -> bool {
        now < self.expires_at
    }
}

/// Active status effects on a combatant, at most one entry per kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a specific status effect is active at `now`.
    pub fn has(&self, kind: StatusKind, now: Timestamp) -> bool {
        self.get(kind, now).is_some()
    }

    /// Returns the entry for `kind` if it is active at `now`.
    pub fn get(&self, kind: StatusKind, now: Timestamp) -> Option<&StatusEffect> {
        self.effects
            .iter()
            .find(|e| e.kind == kind && e.is_active(now))
    }

    /// Adds a status effect. The latest application of a kind replaces the
    /// previous entry outright, deadline and payload both.
    pub fn apply(&mut self, effect: StatusEffect) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            *existing = effect;
            return;
        }

        if !self.effects.is_full() {
            self.effects.push(effect);
        }
    }

    /// Removes a status effect immediately.
    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Removes every entry whose deadline has passed and returns their kinds.
    pub fn remove_expired(
        &mut self,
        now: Timestamp,
    ) -> ArrayVec<StatusKind, { CombatConfig::MAX_STATUS_EFFECTS }> {
        let expired = self
            .effects
            .iter()
            .filter(|e| !e.is_active(now))
            .map(|e| e.kind)
            .collect();
        self.effects.retain(|e| e.is_active(now));
        expired
    }

    /// Sum of active accuracy penalties carried in payloads (smoke, overwhelm).
    pub fn accuracy_penalty(&self, now: Timestamp) -> f64 {
        self.active_at(now)
            .map(|e| match e.payload {
                StatusPayload::AccuracyPenalty(p) => p,
                StatusPayload::Smoke {
                    accuracy_penalty, ..
                } => accuracy_penalty,
                _ => 0.0,
            })
            .sum()
    }

    pub fn evasion_bonus(&self, now: Timestamp) -> f64 {
        self.active_at(now)
            .map(|e| match e.payload {
                StatusPayload::Smoke { evasion_bonus, .. } => evasion_bonus,
                _ => 0.0,
            })
            .sum()
    }

    pub fn toughness_reduction(&self, now: Timestamp) -> Option<f64> {
        match self.get(StatusKind::ToughnessReduced, now)?.payload {
            StatusPayload::ToughnessReduction(pct) => Some(pct),
            _ => None,
        }
    }

    pub fn speed_multiplier(&self, now: Timestamp) -> Option<f64> {
        match self.get(StatusKind::AttackSpeedBuff, now)?.payload {
            StatusPayload::SpeedMultiplier(m) => Some(m),
            _ => None,
        }
    }

    /// Returns an iterator over all active effects at `now`.
    pub fn active_at(&self, now: Timestamp) -> impl Iterator<Item = &StatusEffect> + '_ {
        self.effects.iter().filter(move |e| e.is_active(now))
    }

    /// Returns an iterator over all entries (including expired).
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

// ============================================================================
// Damage over time
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DotKind {
    Burn,
    Bleed,
}

/// Tick-counted damage applied by the status ticker.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOverTime {
    pub kind: DotKind,
    pub tick_damage: u32,
    pub ticks_remaining: u32,
    pub ignores_mitigation: bool,
    /// Player-side combatant credited if a tick is lethal.
    pub source: Option<CombatantId>,
}

impl DamageOverTime {
    pub fn new(kind: DotKind, tick_damage: u32, ticks: u32) -> Self {
        Self {
            kind,
            tick_damage,
            ticks_remaining: ticks,
            ignores_mitigation: false,
            source: None,
        }
    }

    pub fn ignoring_mitigation(mut self) -> Self {
        self.ignores_mitigation = true;
        self
    }

    pub fn with_source(mut self, source: Option<CombatantId>) -> Self {
        self.source = source;
        self
    }
}

/// Damage-over-time entries on a combatant, at most one per [`DotKind`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOverTimeSet {
    entries: ArrayVec<DamageOverTime, { CombatConfig::MAX_DOTS }>,
}

impl DamageOverTimeSet {
    pub fn get(&self, kind: DotKind) -> Option<&DamageOverTime> {
        self.entries.iter().find(|d| d.kind == kind)
    }

    /// Adds an entry or refreshes the existing one of the same kind.
    pub fn apply(&mut self, dot: DamageOverTime) {
        if dot.ticks_remaining == 0 {
            return;
        }
        if let Some(existing) = self.entries.iter_mut().find(|d| d.kind == dot.kind) {
            existing.tick_damage = existing.tick_damage.max(dot.tick_damage);
            existing.ticks_remaining = existing.ticks_remaining.max(dot.ticks_remaining);
            existing.ignores_mitigation |= dot.ignores_mitigation;
            if dot.source.is_some() {
                existing.source = dot.source;
            }
            return;
        }

        if !self.entries.is_full() {
            self.entries.push(dot);
        }
    }

    /// Consumes one tick from every entry and returns the entries as they were
    /// before the decrement. Exhausted entries are dropped.
    pub fn advance(&mut self) -> ArrayVec<DamageOverTime, { CombatConfig::MAX_DOTS }> {
        let fired = self.entries.clone();
        for dot in self.entries.iter_mut() {
            dot.ticks_remaining = dot.ticks_remaining.saturating_sub(1);
        }
        self.entries.retain(|d| d.ticks_remaining > 0);
        fired
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DamageOverTime> {
        self.entries.iter()
    }
}
