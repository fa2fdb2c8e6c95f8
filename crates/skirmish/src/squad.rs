//! Scripted squad behaviour for headless runs.
//!
//! Every soldier throws the first throwable item it carries at its current
//! target once, and uses its first medical item when it drops below half hp.

use combat_content::Encounter;
use combat_core::{
    CombatSession, Combatant, CombatantId, ItemArchetype, ItemRecord, ItemTarget, Timestamp,
};

/// Alive and below half of its maximum hp.
fn needs_patching(c: &Combatant) -> bool {
    c.is_alive() && c.hp.saturating_mul(2) < c.max_hp
}

struct Kit {
    soldier: CombatantId,
    grenade: Option<ItemRecord>,
    medkit: Option<ItemRecord>,
}

pub struct SquadOrders {
    kits: Vec<Kit>,
}

impl SquadOrders {
    pub fn from_encounter(encounter: &Encounter) -> Self {
        let kits = encounter
            .squad
            .iter()
            .map(|record| Kit {
                soldier: CombatantId::new(record.id.as_str()),
                grenade: record
                    .inventory
                    .iter()
                    .find(|item| item.effect.archetype.is_throwable())
                    .cloned(),
                medkit: record
                    .inventory
                    .iter()
                    .find(|item| {
                        item.effect.archetype == ItemArchetype::Heal
                            && item.target != ItemTarget::Enemy
                    })
                    .cloned(),
            })
            .collect();
        Self { kits }
    }

    pub fn throw_grenades(&mut self, session: &mut CombatSession, now: Timestamp) {
        for kit in &mut self.kits {
            if kit.grenade.is_none() || session.outcome().is_some() {
                continue;
            }
            let Some(target) = session.targets().target_of(&kit.soldier).cloned() else {
                continue;
            };
            let Some(item) = kit.grenade.take() else {
                continue;
            };

            match session.throw_item(&kit.soldier, &item, &target, now) {
                Ok(result) => tracing::info!(
                    thrower = %kit.soldier,
                    item = %item.id,
                    %target,
                    hit = result.thrown_hit,
                    affected = result.impacts.len(),
                    "grenade thrown"
                ),
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(thrower = %kit.soldier, item = %item.id, "throw rejected: {e}");
                }
                Err(_) => return,
            }
        }
    }

    pub fn patch_up(&mut self, session: &mut CombatSession) {
        for kit in &mut self.kits {
            let wounded = session.combatant(&kit.soldier).is_some_and(needs_patching);
            if !wounded || session.outcome().is_some() {
                continue;
            }
            let Some(item) = kit.medkit.take() else {
                continue;
            };

            match session.use_medical(&kit.soldier, &item, &kit.soldier) {
                Ok(healed) => {
                    tracing::info!(soldier = %kit.soldier, item = %item.id, healed, "patched up");
                }
                Err(e) => tracing::warn!(soldier = %kit.soldier, "medical item rejected: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::Side;

    #[test]
    fn patches_up_below_half_hp() {
        let mut c = Combatant::new("p1", "Hicks", Side::Player).with_hp(41);
        assert!(!needs_patching(&c));

        c.hp = 21;
        assert!(!needs_patching(&c));
        c.hp = 20;
        assert!(needs_patching(&c));
    }

    #[test]
    fn huge_hp_pools_do_not_overflow() {
        let mut c = Combatant::new("p1", "Tank", Side::Player).with_hp(u32::MAX);
        c.hp = u32::MAX - 1;
        assert!(!needs_patching(&c));

        c.hp = u32::MAX / 2 - 1;
        assert!(needs_patching(&c));
    }
}
