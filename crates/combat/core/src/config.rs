//! Combat configuration constants and tunable parameters.
//!
//! Values are grouped by the subsystem that reads them. Every group has a
//! `Default` built from `DEFAULT_*` constants so a partial `config.toml` only
//! needs to name the values it overrides.

/// Root configuration for one combat session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Seed for the session RNG. Same seed + same inputs = same battle.
    pub seed: u64,
    pub timing: TimingRules,
    pub attack: AttackRules,
    pub mitigation: MitigationRules,
    pub enemy: EnemyRules,
    pub status: StatusRules,
    pub grenade: GrenadeRules,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per [`crate::StatusKind`].
    pub const MAX_STATUS_EFFECTS: usize = 10;
    /// One slot per [`crate::DotKind`].
    pub const MAX_DOTS: usize = 2;

    pub const DEFAULT_SEED: u64 = 0x5eed;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            timing: TimingRules::default(),
            attack: AttackRules::default(),
            mitigation: MitigationRules::default(),
            enemy: EnemyRules::default(),
            status: StatusRules::default(),
            grenade: GrenadeRules::default(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::new()
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Timing
// ============================================================================

/// Attack cadence and effect tick timing (all values in milliseconds).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingRules {
    /// Interval before the weapon speed reduction is applied.
    pub interval_base_ms: u64,
    /// Milliseconds removed per weapon speed point.
    pub speed_factor_ms: u64,
    /// Interval used when no weapon speed is known.
    pub default_interval_ms: u64,
    /// Hard floor for any attack interval.
    pub min_interval_ms: u64,
    /// Global multiplier applied to every computed interval.
    pub interval_multiplier: f64,
    /// Interval reduction per dexterity point (fraction).
    pub dex_speed_bonus_per_point: f64,
    /// Maximum dexterity interval reduction (fraction).
    pub dex_speed_bonus_cap: f64,
    /// Attack interval multiplier while panicked.
    pub panic_slowdown: f64,
    /// Minimum real time between two damage-over-time passes.
    pub dot_interval_ms: u64,
}

impl TimingRules {
    pub const MIN_WEAPON_SPEED: u32 = 1;
    pub const MAX_WEAPON_SPEED: u32 = 10;

    pub const DEFAULT_INTERVAL_BASE_MS: u64 = 2200;
    pub const DEFAULT_SPEED_FACTOR_MS: u64 = 140;
    pub const DEFAULT_INTERVAL_MS: u64 = 1500;
    pub const DEFAULT_MIN_INTERVAL_MS: u64 = 400;
    pub const DEFAULT_DOT_INTERVAL_MS: u64 = 1000;
}

impl Default for TimingRules {
    fn default() -> Self {
        Self {
            interval_base_ms: Self::DEFAULT_INTERVAL_BASE_MS,
            speed_factor_ms: Self::DEFAULT_SPEED_FACTOR_MS,
            default_interval_ms: Self::DEFAULT_INTERVAL_MS,
            min_interval_ms: Self::DEFAULT_MIN_INTERVAL_MS,
            interval_multiplier: 1.0,
            dex_speed_bonus_per_point: 0.005,
            dex_speed_bonus_cap: 0.25,
            panic_slowdown: 2.0,
            dot_interval_ms: Self::DEFAULT_DOT_INTERVAL_MS,
        }
    }
}

// ============================================================================
// Attack
// ============================================================================

/// Hit, evade, damage and down-state parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttackRules {
    pub default_hp: u32,
    pub default_hit_chance: f64,
    pub default_evade_chance: f64,
    pub default_damage_min: u32,
    pub default_damage_max: u32,
    /// Hit chance gained per awareness point.
    pub hit_per_awareness: f64,
    /// Evade chance gained per dexterity point.
    pub evade_per_dexterity: f64,
    /// Ceiling for attribute-derived hit chance.
    pub max_derived_hit_chance: f64,
    /// Ceiling for attribute-derived evade chance.
    pub max_derived_evade_chance: f64,
    /// Global multiplier on weapon damage bounds.
    pub weapon_damage_multiplier: f64,
    /// Hit chance removed while blinded.
    pub blind_accuracy_penalty: f64,
    /// Hit chance removed while suppressed.
    pub suppression_accuracy_penalty: f64,
    /// Base chance that a lethal hit on a player leaves them incapacitated.
    pub incap_base_chance: f64,
    pub incap_per_level: f64,
}

impl Default for AttackRules {
    fn default() -> Self {
        Self {
            default_hp: 20,
            default_hit_chance: 0.6,
            default_evade_chance: 0.05,
            default_damage_min: 4,
            default_damage_max: 6,
            hit_per_awareness: 0.005,
            evade_per_dexterity: 0.002,
            max_derived_hit_chance: 0.95,
            max_derived_evade_chance: 0.5,
            weapon_damage_multiplier: 1.0,
            blind_accuracy_penalty: 0.5,
            suppression_accuracy_penalty: 0.25,
            incap_base_chance: 0.3,
            incap_per_level: 0.02,
        }
    }
}

// ============================================================================
// Mitigation
// ============================================================================

/// Toughness to mitigation conversion.
///
/// ```text
/// mitigation = min(cap, toughness / toughness_divisor / 100)
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MitigationRules {
    pub cap: f64,
    pub toughness_divisor: f64,
    /// Factor applied to mitigation while the target is stunned.
    pub stun_factor: f64,
}

impl MitigationRules {
    pub const DEFAULT_CAP: f64 = 0.6;
    pub const DEFAULT_TOUGHNESS_DIVISOR: f64 = 1.5;
}

impl Default for MitigationRules {
    fn default() -> Self {
        Self {
            cap: Self::DEFAULT_CAP,
            toughness_divisor: Self::DEFAULT_TOUGHNESS_DIVISOR,
            stun_factor: 0.5,
        }
    }
}

// ============================================================================
// Enemy generation
// ============================================================================

/// Procedural enemy stats. Enemies are weaker than the player squad by design
/// of the encounter tables, expressed through the two multipliers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyRules {
    pub base_hp: u32,
    pub hp_per_level: u32,
    pub base_damage_min: u32,
    pub base_damage_max: u32,
    pub damage_per_level: u32,
    pub toughness_per_level: u32,
    pub base_hit_chance: f64,
    pub hit_per_level: f64,
    pub evade_chance: f64,
    pub attack_interval_ms: u64,
    pub hp_multiplier: f64,
    pub damage_multiplier: f64,
    /// Slot index that is exempt from the hp reduction on epic+ encounters.
    pub elite_slot: usize,
}

impl Default for EnemyRules {
    fn default() -> Self {
        Self {
            base_hp: 16,
            hp_per_level: 4,
            base_damage_min: 3,
            base_damage_max: 5,
            damage_per_level: 1,
            toughness_per_level: 4,
            base_hit_chance: 0.55,
            hit_per_level: 0.01,
            evade_chance: 0.05,
            attack_interval_ms: 1600,
            hp_multiplier: 0.8,
            damage_multiplier: 0.85,
            elite_slot: 0,
        }
    }
}

// ============================================================================
// Status effects
// ============================================================================

/// Duration rules shared by every status source.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusRules {
    /// Upper bound of the morale-driven panic/suppression reduction, in percent.
    pub morale_reduction_cap_pct: f64,
    /// Morale-reduced durations never drop below this.
    pub min_status_duration_ms: u64,
}

impl Default for StatusRules {
    fn default() -> Self {
        Self {
            morale_reduction_cap_pct: 25.0,
            min_status_duration_ms: 500,
        }
    }
}

// ============================================================================
// Thrown items
// ============================================================================

/// Area-effect item parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrenadeRules {
    /// Throw accuracy, independent of the thrower's weapon hit chance.
    pub hit_chance: f64,
    pub smoke_duration_ms: u64,
    pub smoke_primary_accuracy_penalty: f64,
    pub smoke_splash_accuracy_penalty: f64,
    pub smoke_evasion_bonus: f64,
    pub incendiary_primary_ticks: u32,
    pub incendiary_splash_ticks: u32,
    pub shred_primary_pct: f64,
    pub shred_primary_duration_ms: u64,
    pub shred_splash_pct: f64,
    pub shred_splash_duration_ms: u64,
}

impl GrenadeRules {
    /// Targets hit besides the primary.
    pub const MAX_SPLASH_TARGETS: usize = 2;
}

impl Default for GrenadeRules {
    fn default() -> Self {
        Self {
            hit_chance: 0.9,
            smoke_duration_ms: 6000,
            smoke_primary_accuracy_penalty: 0.3,
            smoke_splash_accuracy_penalty: 0.15,
            smoke_evasion_bonus: 0.15,
            incendiary_primary_ticks: 4,
            incendiary_splash_ticks: 2,
            shred_primary_pct: 0.5,
            shred_primary_duration_ms: 8000,
            shred_splash_pct: 0.25,
            shred_splash_duration_ms: 4000,
        }
    }
}
