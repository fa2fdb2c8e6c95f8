use std::collections::HashMap;

use crate::state::CombatantId;

/// Attacker → target assignments.
///
/// At most one entry per attacker; any number of attackers may share a target.
/// Entries persist across ticks until the assignment pass invalidates them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetMap {
    assignments: HashMap<CombatantId, CombatantId>,
}

impl TargetMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_of(&self, attacker: &CombatantId) -> Option<&CombatantId> {
        self.assignments.get(attacker)
    }

    pub fn assign(&mut self, attacker: CombatantId, target: CombatantId) {
        self.assignments.insert(attacker, target);
    }

    /// Number of attackers currently holding `target`.
    pub fn load(&self, target: &CombatantId) -> usize {
        self.assignments.values().filter(|t| *t == target).count()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&CombatantId, &CombatantId) -> bool) {
        self.assignments.retain(|attacker, target| keep(attacker, target));
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CombatantId, &CombatantId)> {
        self.assignments.iter()
    }
}
