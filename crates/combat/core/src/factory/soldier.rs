use crate::config::CombatConfig;
use crate::env::{ArmorEffect, EffectsOracle, Rarity, SoldierRecord, WeaponRecord};
use crate::factory::{attack_interval_ms, weapon_damage};
use crate::state::{Combatant, Side};

/// Armor rarity from which special effects are honoured.
const MIN_EFFECT_RARITY: Rarity = Rarity::Rare;

/// Builds a player-side combatant from a soldier record.
pub fn build_soldier<O>(record: &SoldierRecord, oracle: &O, config: &CombatConfig) -> Combatant
where
    O: EffectsOracle + ?Sized,
{
    let attack = &config.attack;
    let attrs = &record.attributes;

    let weapon = usable_weapon(record);
    let weapon_effect = weapon
        .and_then(|w| w.special_effect.as_deref())
        .and_then(|id| oracle.weapon_effect(id));

    let (damage_min, damage_max) = weapon_damage(weapon, weapon_effect, attack);
    let interval = attack_interval_ms(
        weapon.and_then(|w| w.speed),
        attrs.dexterity,
        weapon_effect.and_then(|e| e.interval_multiplier),
        &config.timing,
    );

    let armor_effect = record
        .armor
        .as_ref()
        .filter(|a| a.rarity >= MIN_EFFECT_RARITY)
        .and_then(|a| a.special_effect.as_deref())
        .and_then(|id| oracle.armor_effect(id))
        .cloned()
        .unwrap_or_default();
    let ArmorEffect {
        immunities,
        incap_chance_multiplier,
    } = armor_effect;

    let armor_toughness = record.armor.as_ref().map_or(0, |a| a.toughness);
    let hp = attrs.hit_points.unwrap_or(attack.default_hp).max(1);

    let hit_chance = record.chance_to_hit.unwrap_or_else(|| {
        (attack.default_hit_chance + f64::from(attrs.awareness) * attack.hit_per_awareness)
            .min(attack.max_derived_hit_chance.max(attack.default_hit_chance))
    });
    let evade_chance = record.chance_to_evade.unwrap_or_else(|| {
        (attack.default_evade_chance + f64::from(attrs.dexterity) * attack.evade_per_dexterity)
            .min(attack.max_derived_evade_chance.max(attack.default_evade_chance))
    });

    let name = if record.name.is_empty() {
        record.id.clone()
    } else {
        record.name.clone()
    };

    let mut combatant = Combatant::new(record.id.as_str(), name, Side::Player)
        .with_hp(hp)
        .with_level(record.level.max(1))
        .with_chances(hit_chance.clamp(0.0, 1.0), evade_chance.clamp(0.0, 1.0))
        .with_damage(damage_min, damage_max)
        .with_toughness(attrs.toughness.saturating_add(armor_toughness))
        .with_interval(interval)
        .with_morale(attrs.morale)
        .with_immunities(immunities);
    combatant.soldier_id = Some(record.id.clone());
    combatant.incap_chance_multiplier = incap_chance_multiplier;
    if let Some(on_hit) = weapon_effect.and_then(|e| e.on_hit.clone()) {
        combatant = combatant.with_proc(on_hit);
    }

    tracing::debug!(
        soldier = %record.id,
        hp,
        damage_min,
        damage_max,
        interval,
        "built soldier"
    );
    combatant
}

/// The soldier's weapon, unless it is restricted to another role.
fn usable_weapon(record: &SoldierRecord) -> Option<&WeaponRecord> {
    let weapon = record.weapon.as_ref()?;
    match (weapon.role, record.role) {
        (Some(required), actual) if actual != Some(required) => {
            tracing::warn!(
                soldier = %record.id,
                weapon = %weapon.name,
                required = %required,
                "weapon restricted to another role, using defaults"
            );
            None
        }
        _ => Some(weapon),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ArmorRecord, Attributes, EffectTable, Role, WeaponEffect};
    use crate::procs::{ProcData, WeaponProc};
    use crate::state::{Immunities, StatusKind};

    fn rifle() -> WeaponRecord {
        WeaponRecord {
            name: "Service Rifle".into(),
            damage_min: Some(6),
            damage_max: Some(9),
            speed: Some(5),
            special_effect: Some("incendiary_rounds".into()),
            ..WeaponRecord::default()
        }
    }

    fn effects() -> EffectTable {
        EffectTable::new()
            .with_weapon(
                "incendiary_rounds",
                WeaponEffect {
                    damage_pct: 0.0,
                    interval_multiplier: Some(0.8),
                    on_hit: Some(WeaponProc::new(
                        "fire",
                        ProcData {
                            damage: 2,
                            duration_ms: 2000,
                            ..ProcData::default()
                        },
                    )),
                },
            )
            .with_armor(
                "fireproof",
                ArmorEffect {
                    immunities: Immunities::BURNING,
                    incap_chance_multiplier: 1.5,
                },
            )
    }

    #[test]
    fn empty_record_gets_defaults() {
        let record = SoldierRecord {
            id: "s1".into(),
            ..SoldierRecord::default()
        };
        let c = build_soldier(&record, &EffectTable::new(), &CombatConfig::default());

        assert_eq!(c.hp, 20);
        assert_eq!((c.damage_min, c.damage_max), (4, 6));
        assert_eq!(c.attack_interval_ms, 1500);
        assert!((c.chance_to_hit - 0.6).abs() < 1e-9);
        assert!((c.chance_to_evade - 0.05).abs() < 1e-9);
        assert_eq!(c.name, "s1");
        assert_eq!(c.soldier_id.as_deref(), Some("s1"));
        assert_eq!(c.side, Side::Player);
        assert_eq!(c.toughness, Some(0));
        assert!(c.immunities.is_empty());
    }

    #[test]
    fn weapon_effect_sets_interval_and_proc() {
        let record = SoldierRecord {
            id: "s1".into(),
            name: "Ripley".into(),
            weapon: Some(rifle()),
            ..SoldierRecord::default()
        };
        let c = build_soldier(&record, &effects(), &CombatConfig::default());

        assert_eq!((c.damage_min, c.damage_max), (6, 9));
        // 1500 × 0.8 = 1200
        assert_eq!(c.attack_interval_ms, 1200);
        assert_eq!(c.weapon_procs.len(), 1);
        assert_eq!(c.weapon_procs[0].tag, "fire");
    }

    #[test]
    fn restricted_weapon_falls_back_to_defaults() {
        let record = SoldierRecord {
            id: "s1".into(),
            role: Some(Role::Medic),
            weapon: Some(WeaponRecord {
                role: Some(Role::Marksman),
                ..rifle()
            }),
            ..SoldierRecord::default()
        };
        let c = build_soldier(&record, &effects(), &CombatConfig::default());

        assert_eq!((c.damage_min, c.damage_max), (4, 6));
        assert_eq!(c.attack_interval_ms, 1500);
        assert!(c.weapon_procs.is_empty());
    }

    #[test]
    fn armor_effect_requires_rare_armor() {
        let armor = |rarity| ArmorRecord {
            name: "Flak".into(),
            toughness: 30,
            rarity,
            special_effect: Some("fireproof".into()),
        };
        let base = SoldierRecord {
            id: "s1".into(),
            attributes: Attributes {
                toughness: 10,
                ..Attributes::default()
            },
            ..SoldierRecord::default()
        };

        let common = SoldierRecord {
            armor: Some(armor(Rarity::Uncommon)),
            ..base.clone()
        };
        let c = build_soldier(&common, &effects(), &CombatConfig::default());
        assert_eq!(c.toughness, Some(40));
        assert!(!c.is_immune_to(StatusKind::Burning));
        assert!((c.incap_chance_multiplier - 1.0).abs() < 1e-9);

        let rare = SoldierRecord {
            armor: Some(armor(Rarity::Epic)),
            ..base
        };
        let c = build_soldier(&rare, &effects(), &CombatConfig::default());
        assert!(c.is_immune_to(StatusKind::Burning));
        assert!((c.incap_chance_multiplier - 1.5).abs() < 1e-9);
    }

    #[test]
    fn attributes_raise_derived_chances_up_to_caps() {
        let record = SoldierRecord {
            id: "s1".into(),
            attributes: Attributes {
                hit_points: Some(35),
                awareness: 20,
                dexterity: 1000,
                ..Attributes::default()
            },
            ..SoldierRecord::default()
        };
        let c = build_soldier(&record, &EffectTable::new(), &CombatConfig::default());

        assert_eq!(c.hp, 35);
        assert!((c.chance_to_hit - 0.7).abs() < 1e-9);
        assert!((c.chance_to_evade - 0.5).abs() < 1e-9);

        let explicit = SoldierRecord {
            chance_to_hit: Some(0.9),
            ..record
        };
        let c = build_soldier(&explicit, &EffectTable::new(), &CombatConfig::default());
        assert!((c.chance_to_hit - 0.9).abs() < 1e-9);
    }
}
