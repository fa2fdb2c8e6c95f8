//! Data-driven combat content and loaders.
//!
//! This crate reads the files a battle is assembled from:
//! - Combat configuration (TOML)
//! - Weapon and armor special-effect tables (RON)
//! - Encounters: the squad's soldier records and the enemy slots (RON)
//!
//! Everything deserializes straight into `combat-core` types; this crate adds
//! file handling, validation and error context only.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EffectTableLoader, Encounter, EncounterLoader, LoadResult,
};
