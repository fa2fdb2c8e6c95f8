//! Errors surfaced by [`crate::session::CombatSession`] commands.
//!
//! The simulation primitives themselves never fail. Only caller-issued
//! commands that name a combatant or an item can be rejected.

use crate::env::ItemArchetype;
use crate::state::CombatantId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("unknown combatant {0}")]
    UnknownCombatant(CombatantId),

    #[error("combatant {0} is already in the battle")]
    DuplicateCombatant(CombatantId),

    #[error("combatant {0} is down")]
    CombatantDown(CombatantId),

    #[error("item '{item}' ({archetype}) cannot be thrown")]
    NotThrowable {
        item: String,
        archetype: ItemArchetype,
    },

    #[error("item '{item}' ({archetype}) is not a medical item")]
    NotMedical {
        item: String,
        archetype: ItemArchetype,
    },

    #[error("item '{item}' cannot be used on {target}")]
    InvalidTarget { item: String, target: CombatantId },

    #[error("the battle is already over")]
    BattleOver,
}

impl SessionError {
    /// Whether the caller can retry the command with different arguments.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SessionError::BattleOver)
    }
}
