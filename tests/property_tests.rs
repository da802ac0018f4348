//! Property tests for the world invariants

use arc_mud::core::{ObjectId, WorldConfig};
use arc_mud::entity::{Attribute, DamagePools};
use arc_mud::persist::{load_world, save_world};
use arc_mud::skills::{SkillId, SkillSet};
use arc_mud::world::World;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Create { parent: usize },
    Travel { id: usize, dest: usize },
    Recycle { id: usize },
    Split { id: usize, count: i32 },
    Combine { id: usize },
    EmptyTrash,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<usize>().prop_map(|parent| Op::Create { parent }),
        4 => (any::<usize>(), any::<usize>()).prop_map(|(id, dest)| Op::Travel { id, dest }),
        1 => any::<usize>().prop_map(|id| Op::Recycle { id }),
        2 => (any::<usize>(), 1..20i32).prop_map(|(id, count)| Op::Split { id, count }),
        1 => any::<usize>().prop_map(|id| Op::Combine { id }),
        1 => Just(Op::EmptyTrash),
    ]
}

fn pick(world: &World, index: usize) -> ObjectId {
    let ids = world.object_ids();
    ids[index % ids.len()]
}

/// Rooms, boxes and coin piles, alternating by creation order
fn populate(world: &mut World, parent: ObjectId) -> Option<ObjectId> {
    let n = world.object_count();
    let id = world.create(parent, "a thing").ok()?;
    let obj = world.get_mut(id)?;
    match n % 3 {
        0 => obj.set_skill(SkillId::Enterable, 1),
        1 => {
            obj.set_skill(SkillId::Container, 30);
            obj.set_skill(SkillId::Capacity, 40);
            obj.set_volume(5);
            obj.set_weight(3);
        }
        _ => {
            obj.set_short_desc("some coins");
            obj.set_name("coin");
            obj.set_weight(1);
            obj.set_volume(1);
            obj.set_quantity(10);
        }
    }
    Some(id)
}

fn apply(world: &mut World, op: &Op) {
    match *op {
        Op::Create { parent } => {
            let parent = pick(world, parent);
            if !world.is_recycled(parent) && parent != world.trash_bin() {
                populate(world, parent);
            }
        }
        Op::Travel { id, dest } => {
            let (id, dest) = (pick(world, id), pick(world, dest));
            let _ = world.travel(id, dest, false);
        }
        Op::Recycle { id } => {
            let id = pick(world, id);
            world.recycle(id);
        }
        Op::Split { id, count } => {
            let id = pick(world, id);
            world.split(id, count);
        }
        Op::Combine { id } => {
            let id = pick(world, id);
            world.try_combine(id);
        }
        Op::EmptyTrash => {
            world.empty_trash();
        }
    }
}

/// Parent and contents of every object
fn snapshot(world: &World) -> Vec<(ObjectId, Option<ObjectId>, Vec<ObjectId>, i32)> {
    world
        .object_ids()
        .into_iter()
        .map(|id| {
            let obj = world.get(id).unwrap();
            (id, obj.parent(), obj.contents().to_vec(), obj.quantity())
        })
        .collect()
}

fn total_coins(world: &World) -> i32 {
    world
        .subtree(world.universe())
        .into_iter()
        .filter_map(|id| world.get(id))
        .filter(|obj| obj.name() == "coin")
        .map(|obj| obj.quantity())
        .sum()
}

proptest! {
    #[test]
    fn prop_containment_stays_consistent(ops in prop::collection::vec(op_strategy(), 1..80)) {
        let mut world = World::with_seed(1).unwrap();
        let universe = world.universe();
        populate(&mut world, universe);

        for op in &ops {
            apply(&mut world, op);
            let problems = world.verify();
            prop_assert!(problems.is_empty(), "after {:?}: {:?}", op, problems);
        }
    }

    #[test]
    fn prop_refused_travel_changes_nothing(
        weight in 0..60i32,
        volume in 0..40i32,
        size in 0..10i32,
    ) {
        let mut world = World::with_seed(1).unwrap();
        let room = world.create(world.universe(), "a room").unwrap();
        world.get_mut(room).unwrap().set_skill(SkillId::Enterable, 1);
        let crate_id = world.create(room, "a crate").unwrap();
        {
            let c = world.get_mut(crate_id).unwrap();
            c.set_skill(SkillId::Container, 20);
            c.set_skill(SkillId::Capacity, 30);
            c.set_skill(SkillId::MaxSize, 5);
        }
        let filler = world.create(crate_id, "some straw").unwrap();
        world.get_mut(filler).unwrap().set_weight(5);
        world.get_mut(filler).unwrap().set_volume(5);

        let item = world.create(room, "a parcel").unwrap();
        {
            let p = world.get_mut(item).unwrap();
            p.set_weight(weight);
            p.set_volume(volume);
            p.set_size(size);
        }

        let before = snapshot(&world);
        match world.travel(item, crate_id, false) {
            Ok(_) => {
                prop_assert!(world.contents_volume(crate_id) <= 20);
                prop_assert!(world.contents_weight(crate_id) <= 30);
                prop_assert!(size <= 5);
            }
            Err(_) => prop_assert_eq!(snapshot(&world), before),
        }
    }

    #[test]
    fn prop_split_then_combine_restores(quantity in 2..500i32, cut in 1..499i32) {
        prop_assume!(cut < quantity);
        let mut world = World::with_seed(1).unwrap();
        let room = world.create(world.universe(), "a vault").unwrap();
        let pile = world.create(room, "some coins").unwrap();
        world.get_mut(pile).unwrap().set_quantity(quantity);

        let piece = world.split(pile, cut).unwrap();
        prop_assert_eq!(
            world.get(pile).unwrap().quantity() + world.get(piece).unwrap().quantity(),
            quantity
        );
        prop_assert_eq!(world.try_combine(piece), Some(pile));
        prop_assert_eq!(world.get(pile).unwrap().quantity(), quantity);
        prop_assert!(world.verify().is_empty());
    }

    #[test]
    fn prop_coins_are_conserved(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut world = World::with_seed(2).unwrap();
        let universe = world.universe();
        populate(&mut world, universe);

        for op in &ops {
            if matches!(op, Op::Create { .. } | Op::Recycle { .. } | Op::EmptyTrash) {
                continue;
            }
            let before = total_coins(&world);
            apply(&mut world, op);
            prop_assert_eq!(total_coins(&world), before);
        }
    }

    #[test]
    fn prop_wound_penalty_monotone(a in 0..20i32, b in 0..20i32, other in 0..20i32) {
        let tiers = WorldConfig::default().wound_tiers;
        let (lo, hi) = (a.min(b), a.max(b));
        let low = DamagePools { stun: lo, phys: other, stru: 0 };
        let high = DamagePools { stun: hi, phys: other, stru: 0 };
        prop_assert!(low.wound_penalty(&tiers) <= high.wound_penalty(&tiers));

        let low = DamagePools { stun: other, phys: lo, stru: 0 };
        let high = DamagePools { stun: other, phys: hi, stru: 0 };
        prop_assert!(low.wound_penalty(&tiers) <= high.wound_penalty(&tiers));
    }

    #[test]
    fn prop_zero_deletes_skill(index in 0usize..200, value in -5..5i32) {
        let all = SkillId::all();
        let skill = all[index % all.len()];
        let mut set = SkillSet::new();
        set.set(skill, value);
        prop_assert_eq!(set.has(skill), value != 0);
        prop_assert_eq!(set.get(skill), value);
        set.set(skill, 0);
        prop_assert!(!set.has(skill));
        prop_assert_eq!(set.get(skill), 0);
    }

    #[test]
    fn prop_untrained_rating_never_negative(attr in -3..10i32, index in 0usize..200) {
        let all = SkillId::all();
        let skill = all[index % all.len()];
        let mut world = World::with_seed(1).unwrap();
        let id = world.create(world.universe(), "a novice").unwrap();
        let obj = world.get_mut(id).unwrap();
        for attribute in Attribute::ALL {
            obj.set_attribute(attribute, attr);
        }
        prop_assert!(obj.skill_target(skill) >= 0);
    }

    #[test]
    fn prop_save_load_preserves_tree(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut world = World::with_seed(3).unwrap();
        let universe = world.universe();
        populate(&mut world, universe);
        for op in &ops {
            apply(&mut world, op);
        }

        let text = save_world(&world).unwrap();
        let mut copy = World::with_seed(3).unwrap();
        load_world(&mut copy, &text).unwrap();
        prop_assert!(copy.verify().is_empty());
        prop_assert_eq!(save_world(&copy).unwrap(), text);
    }
}
