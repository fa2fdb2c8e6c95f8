//! Event records handed to the presentation layer.
//!
//! Records are point-in-time snapshots; the engine keeps no reference to them.

use crate::env::ItemArchetype;
use crate::state::{CombatantId, DotKind, DownState, StatusKind};

/// Result of one weapon attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackResult {
    pub attacker: CombatantId,
    pub target: CombatantId,
    pub hit: bool,
    pub evaded: bool,
    /// Base weapon damage after mitigation.
    pub damage: u32,
    /// Extra damage from weapon procs.
    pub proc_damage: u32,
    pub target_hp: u32,
    pub down_state: Option<DownState>,
    /// Player-side attacker credited with the kill.
    pub killer: Option<CombatantId>,
}

impl AttackResult {
    pub(crate) fn missed(attacker: CombatantId, target: CombatantId, target_hp: u32) -> Self {
        Self {
            attacker,
            target,
            hit: false,
            evaded: false,
            damage: 0,
            proc_damage: 0,
            target_hp,
            down_state: None,
            killer: None,
        }
    }

    pub fn total_damage(&self) -> u32 {
        self.damage + self.proc_damage
    }

    pub fn went_down(&self) -> bool {
        self.down_state.is_some()
    }

    pub fn is_incapacitated(&self) -> bool {
        self.down_state == Some(DownState::Incapacitated)
    }
}

/// One damage-over-time tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DotEvent {
    pub target: CombatantId,
    pub kind: DotKind,
    pub damage: u32,
    pub hp_after: u32,
    pub down_state: Option<DownState>,
    pub killer: Option<CombatantId>,
}

/// Effect of a thrown item on one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImpactOutcome {
    pub target: CombatantId,
    pub hit: bool,
    pub evaded: bool,
    pub damage: u32,
    pub hp_after: u32,
    pub down_state: Option<DownState>,
    /// Status that was actually applied (absent when immune or evaded).
    pub status: Option<StatusKind>,
    pub killer: Option<CombatantId>,
}

impl ImpactOutcome {
    pub(crate) fn untouched(target: CombatantId, hp: u32, hit: bool, evaded: bool) -> Self {
        Self {
            target,
            hit,
            evaded,
            damage: 0,
            hp_after: hp,
            down_state: None,
            status: None,
            killer: None,
        }
    }

    pub fn landed(&self) -> bool {
        self.hit && !self.evaded
    }
}

/// Result of one thrown item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrenadeResult {
    pub thrower: CombatantId,
    pub item_id: String,
    pub archetype: ItemArchetype,
    /// The throw roll. A missed throw affects nobody.
    pub thrown_hit: bool,
    /// Primary impact first, then splash impacts in formation order.
    pub impacts: Vec<ImpactOutcome>,
}

impl GrenadeResult {
    pub fn primary(&self) -> Option<&ImpactOutcome> {
        self.impacts.first()
    }

    pub fn splash(&self) -> &[ImpactOutcome] {
        self.impacts.get(1..).unwrap_or_default()
    }
}
