//! Combat integration tests
//!
//! A swordsman (Strength 6, Long Blades 3, sword Force 2 / Severity 1)
//! against an unarmored dodger (Dodge 2), fought to a finish on fixed seeds.

use arc_mud::actions::{Act, LifeState};
use arc_mud::combat::{
    armor_at, defense_skill, resolve_exchange, CombatError, HitLocation, WeaponProfile,
    WeaponType,
};
use arc_mud::core::ObjectId;
use arc_mud::entity::{Attribute, DamageKind};
use arc_mud::skills::SkillId;
use arc_mud::world::World;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Arena {
    world: World,
    a: ObjectId,
    b: ObjectId,
    sword: ObjectId,
}

fn arena(seed: u64) -> Arena {
    init_tracing();
    let mut world = World::with_seed(seed).unwrap();
    let pit = world.create(world.universe(), "the fighting pit").unwrap();

    let a = world.create(pit, "a swordsman").unwrap();
    {
        let o = world.get_mut(a).unwrap();
        o.set_attribute(Attribute::Body, 4);
        o.set_attribute(Attribute::Strength, 6);
        o.set_skill(SkillId::LongBlades, 3);
    }
    let sword = world.create(a, "a broad sword").unwrap();
    {
        let s = world.get_mut(sword).unwrap();
        s.set_skill(SkillId::WeaponType, WeaponType::LongBlades.code());
        s.set_skill(SkillId::WeaponForce, 2);
        s.set_skill(SkillId::WeaponSeverity, 1);
    }
    world.wield(a, sword).unwrap();

    let b = world.create(pit, "a dodger").unwrap();
    {
        let o = world.get_mut(b).unwrap();
        o.set_attribute(Attribute::Body, 4);
        o.set_attribute(Attribute::Quickness, 3);
        o.set_skill(SkillId::Dodge, 2);
    }

    Arena { world, a, b, sword }
}

/// Fight until the dodger falls or `rounds` run out; returns every result
fn bout(arena: &mut Arena, rounds: usize) -> Vec<arc_mud::combat::ExchangeResult> {
    let mut results = Vec::new();
    for _ in 0..rounds {
        match resolve_exchange(&mut arena.world, arena.a, arena.b) {
            Ok(result) => results.push(result),
            Err(_) => break,
        }
        if arena.world.get(arena.b).unwrap().is_dead() {
            break;
        }
    }
    results
}

#[test]
fn test_scenario_is_deterministic() {
    for seed in [1u64, 17, 4242] {
        let mut first = arena(seed);
        let mut second = arena(seed);
        let r1 = bout(&mut first, 40);
        let r2 = bout(&mut second, 40);
        assert_eq!(r1, r2);
        assert_eq!(
            first.world.get(first.b).unwrap().pools(),
            second.world.get(second.b).unwrap().pools()
        );
    }
}

#[test]
fn test_damage_only_on_positive_net() {
    let mut arena = arena(17);
    let mut last_phys = 0;
    for result in bout(&mut arena, 60) {
        assert_eq!(result.attack_skill, SkillId::LongBlades);
        assert_eq!(result.defense_skill, SkillId::Dodge);
        assert_eq!(result.location.is_some(), result.net_successes > 0);
        if result.net_successes <= 0 {
            assert!(result.wound.is_none());
        }
        if let Some(wound) = result.wound {
            assert_eq!(wound.kind, DamageKind::Phys);
            assert!(wound.applied >= 0);
            assert!(wound.applied <= wound.boxes);
        }
        let phys = arena.world.get(arena.b).unwrap().phys();
        assert!(phys >= last_phys);
        last_phys = phys;
    }
    assert!(arena.world.verify().is_empty());
}

#[test]
fn test_fight_reaches_a_verdict() {
    // a sword against bare dodging ends the fight well within a few hundred blows
    let mut arena = arena(4242);
    let results = bout(&mut arena, 500);
    assert!(results.iter().any(|r| r.is_hit()));

    let state = arena.world.life_state(arena.b).unwrap();
    assert!(state.is_incapacitated());
    let b = arena.world.get(arena.b).unwrap();
    assert!(!b.is_conscious());
    assert!(!b.is_act(Act::Fight));
}

#[test]
fn test_dead_attacker_cannot_swing() {
    let mut arena = arena(1);
    arena.world.hit_phys(arena.a, 20);
    assert_eq!(arena.world.life_state(arena.a), Some(LifeState::Dead));
    assert_eq!(
        resolve_exchange(&mut arena.world, arena.a, arena.b),
        Err(CombatError::Incapacitated(Act::Dead))
    );
}

#[test]
fn test_helmet_covers_head_only() {
    let mut arena = arena(1);
    let helm = arena.world.create(arena.b, "an iron helm").unwrap();
    {
        let h = arena.world.get_mut(helm).unwrap();
        h.set_skill(SkillId::WearableOn(Act::WearHead), 1);
        h.set_skill(SkillId::Armor, 4);
    }
    arena.world.wear(arena.b, helm).unwrap();

    assert_eq!(armor_at(&arena.world, arena.b, HitLocation::Head), vec![(helm, 4)]);
    assert!(armor_at(&arena.world, arena.b, HitLocation::Torso).is_empty());
}

#[test]
fn test_two_handed_sword_takes_both_hands() {
    let mut arena = arena(1);
    let greatsword = arena.world.create(arena.a, "a greatsword").unwrap();
    {
        let g = arena.world.get_mut(greatsword).unwrap();
        g.set_skill(SkillId::WeaponType, WeaponType::TwoHandedBlades.code());
        g.set_skill(SkillId::WeaponForce, 3);
    }
    arena.world.wield(arena.a, greatsword).unwrap();

    let a = arena.world.get(arena.a).unwrap();
    assert_eq!(a.act_target(Act::Wield), Some(greatsword));
    assert_eq!(a.act_target(Act::Hold), Some(greatsword));

    let profile = WeaponProfile::of(&arena.world, arena.a).unwrap();
    assert_eq!(profile.skill, SkillId::TwoHandedBlades);
    assert!(profile.two_handed_grip);
    assert_eq!(profile.item, Some(greatsword));

    // the old sword is merely carried now
    assert!(arena.world.equipped_as(arena.a, arena.sword).is_empty());
}

#[test]
fn test_shield_wearer_defends_with_shields() {
    let mut arena = arena(1);
    let shield = arena.world.create(arena.b, "a kite shield").unwrap();
    arena
        .world
        .get_mut(shield)
        .unwrap()
        .set_skill(SkillId::WearableOn(Act::WearShield), 1);
    arena.world.wear(arena.b, shield).unwrap();

    assert_eq!(defense_skill(&arena.world, arena.b), Some(SkillId::Shields));
    let result = resolve_exchange(&mut arena.world, arena.a, arena.b).unwrap();
    assert_eq!(result.defense_skill, SkillId::Shields);
}
