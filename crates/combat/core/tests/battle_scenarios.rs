use combat_core::{
    ArmorRecord, Attributes, BattleOutcome, CombatConfig, CombatSession, Combatant, CombatantId,
    DotKind, EffectTable, EnemySpec, ItemArchetype, ItemEffect, ItemRecord, ItemTarget,
    ProcRegistry, Rarity, Side, SoldierRecord, Timestamp, WeaponRecord, resolve_attack,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const TICK_MS: u64 = 100;

fn squad_record(id: &str, dexterity: u32) -> SoldierRecord {
    SoldierRecord {
        id: id.into(),
        name: id.to_uppercase(),
        level: 2,
        attributes: Attributes {
            hit_points: Some(30),
            dexterity,
            awareness: 10,
            toughness: 15,
            ..Attributes::default()
        },
        weapon: Some(WeaponRecord {
            name: "Carbine".into(),
            damage_min: Some(5),
            damage_max: Some(8),
            speed: Some(6),
            ..WeaponRecord::default()
        }),
        armor: Some(ArmorRecord {
            name: "Vest".into(),
            toughness: 10,
            rarity: Rarity::Common,
            special_effect: None,
        }),
        ..SoldierRecord::default()
    }
}

fn skirmish(seed: u64) -> CombatSession {
    let mut session = CombatSession::new(CombatConfig::with_seed(seed), Timestamp::ZERO);
    let effects = EffectTable::new();
    for (i, id) in ["alpha", "bravo", "charlie"].iter().enumerate() {
        session
            .add_soldier(&squad_record(id, 10 * i as u32), &effects)
            .expect("unique soldier ids");
    }
    for slot in 0..3 {
        session
            .spawn_enemy(&EnemySpec::new(slot, 2), Timestamp::ZERO)
            .expect("unique enemy slots");
    }
    session
}

fn run_to_outcome(session: &mut CombatSession, limit_ms: u64) -> Option<BattleOutcome> {
    let mut now = 0;
    while now <= limit_ms {
        let report = session.tick(Timestamp(now));
        if report.outcome.is_some() {
            return report.outcome;
        }
        now += TICK_MS;
    }
    None
}

/// A certain hit with no evade and no toughness lands the exact rolled damage.
#[test]
fn deterministic_attack_deals_exact_damage() {
    let config = CombatConfig::default();
    let procs = ProcRegistry::default();
    let mut rng = ChaCha8Rng::seed_from_u64(77);

    for round in 0..25u64 {
        let mut attacker = Combatant::new("p1", "Shooter", Side::Player)
            .with_chances(1.0, 0.0)
            .with_damage(10, 10);
        let mut target = Combatant::new("e1", "Target", Side::Enemy)
            .with_hp(100)
            .with_chances(0.5, 0.0)
            .with_toughness(0);

        let result = resolve_attack(
            &mut attacker,
            &mut target,
            Timestamp(round * 1000),
            &mut rng,
            &config,
            &procs,
        );

        assert!(result.hit, "round {round}: certain hit missed");
        assert!(!result.evaded, "round {round}: zero evade evaded");
        assert_eq!(result.damage, 10);
        assert_eq!(target.hp, 90);
    }
}

/// Two sessions with the same seed play out identically.
#[test]
fn same_seed_replays_the_same_battle() {
    let mut first = skirmish(1234);
    let mut second = skirmish(1234);

    for step in 0..300 {
        let now = Timestamp(step * TICK_MS);
        assert_eq!(first.tick(now), second.tick(now), "diverged at {now}");
    }
}

/// A full skirmish always ends, and the end state is consistent.
#[test]
fn skirmish_reaches_an_outcome() {
    for seed in [1, 2, 3, 4, 5] {
        let mut session = skirmish(seed);
        let outcome = run_to_outcome(&mut session, 180_000)
            .unwrap_or_else(|| panic!("seed {seed}: battle never ended"));

        let roster = session.roster();
        let wiped = match outcome {
            BattleOutcome::Victory => Side::Enemy,
            BattleOutcome::Defeat => Side::Player,
        };
        assert!(roster.is_wiped(wiped));
        assert!(!roster.is_wiped(wiped.opponent()));

        for c in roster.iter() {
            assert!(c.hp <= c.max_hp);
            if c.is_down() {
                assert_eq!(c.hp, 0, "{} is down with hp left", c.id);
                assert!(c.dots.is_empty());
            }
        }

        let enemy_kills: u32 = roster.side(Side::Enemy).map(|c| c.kills).sum();
        assert_eq!(enemy_kills, 0, "only the squad is credited with kills");
    }
}

/// Targets stay put until they become invalid.
#[test]
fn targets_are_sticky_between_ticks() {
    let mut session = skirmish(99);
    session.tick(Timestamp(0));
    let initial: Vec<(CombatantId, CombatantId)> = session
        .targets()
        .iter()
        .map(|(a, t)| (a.clone(), t.clone()))
        .collect();
    assert_eq!(initial.len(), 6);

    session.tick(Timestamp(TICK_MS));
    for (attacker, target) in &initial {
        let still_valid = session
            .combatant(target)
            .is_some_and(|c| c.is_valid_target(Timestamp(TICK_MS)));
        if still_valid {
            assert_eq!(session.targets().target_of(attacker), Some(target));
        }
    }
}

/// An incendiary lands a 4-tick burn on the primary and 2-tick burns with
/// half tick damage on its neighbours, then burns down over time.
#[test]
fn incendiary_burns_through_the_session() {
    let mut config = CombatConfig::with_seed(3);
    config.grenade.hit_chance = 1.0;
    let mut session = CombatSession::new(config, Timestamp::ZERO);
    session
        .add_combatant(Combatant::new("p1", "Grenadier", Side::Player).with_chances(0.0, 0.0))
        .expect("fresh session");
    for i in 0..3 {
        session
            .add_combatant(
                Combatant::new(format!("e{i}"), "Hostile", Side::Enemy)
                    .with_hp(60)
                    .with_chances(0.0, 0.0)
                    .with_interval(60_000),
            )
            .expect("unique ids");
    }

    let incendiary = ItemRecord::new(
        "incendiary",
        ItemTarget::Enemy,
        ItemEffect::new(ItemArchetype::Incendiary, 7),
    );
    let thrower = CombatantId::from("p1");
    let result = session
        .throw_item(&thrower, &incendiary, &CombatantId::from("e1"), Timestamp(50))
        .expect("valid throw");
    assert!(result.thrown_hit);
    assert_eq!(result.splash().len(), 2);

    let burn = |id: &str| {
        session
            .combatant(&CombatantId::from(id))
            .and_then(|c| c.dots.get(DotKind::Burn))
            .map(|d| (d.ticks_remaining, d.tick_damage, d.ignores_mitigation))
    };
    assert_eq!(burn("e1"), Some((4, 7, true)));
    assert_eq!(burn("e0"), Some((2, 3, true)));
    assert_eq!(burn("e2"), Some((2, 3, true)));

    for step in 1..=5 {
        session.tick(Timestamp(step * 1000));
    }
    let hp = |id: &str| session.combatant(&CombatantId::from(id)).map(|c| c.hp);
    assert_eq!(hp("e1"), Some(60 - 4 * 7));
    assert_eq!(hp("e0"), Some(60 - 2 * 3));
    assert_eq!(hp("e2"), Some(60 - 2 * 3));
}
