//! Armor coverage and mitigation
//!
//! Armor is any worn object with an `Armor` skill; the value is its rating.
//! Each piece covering the struck location rolls its rating against the
//! blow's force, and its successes come off the attacker's net successes.

use crate::combat::body_zone::HitLocation;
use crate::core::types::ObjectId;
use crate::skills::{count_successes, SkillId};
use crate::world::World;

/// Worn pieces covering `location`, with their ratings
pub fn armor_at(world: &World, wearer: ObjectId, location: HitLocation) -> Vec<(ObjectId, i32)> {
    let mut pieces: Vec<(ObjectId, i32)> = Vec::new();
    for slot in location.armor_slots() {
        let Some(item) = world.worn_on(wearer, *slot) else {
            continue;
        };
        if pieces.iter().any(|(id, _)| *id == item) {
            continue;
        }
        let rating = world.get(item).map(|o| o.skill(SkillId::Armor)).unwrap_or(0);
        if rating > 0 {
            pieces.push((item, rating));
        }
    }
    pieces
}

/// Successes the armor at `location` takes off a blow of `force`
pub fn mitigate(world: &mut World, wearer: ObjectId, location: HitLocation, force: i32) -> i32 {
    let target = force.max(world.config().min_target_number);
    let pieces = armor_at(world, wearer, location);
    let mut stopped = 0;
    for (item, rating) in pieces {
        let successes = count_successes(&mut world.rng, rating, target);
        tracing::trace!(%item, rating, target, successes, "armor roll");
        stopped += successes;
    }
    stopped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Act;
    use crate::entity::Attribute;

    fn armored() -> (World, ObjectId, ObjectId) {
        let mut world = World::with_seed(12).unwrap();
        let knight = world.create(world.universe(), "a knight").unwrap();
        world.get_mut(knight).unwrap().set_attribute(Attribute::Body, 5);
        let plate = world.create(knight, "a breastplate").unwrap();
        {
            let p = world.get_mut(plate).unwrap();
            p.set_skill(SkillId::Armor, 6);
            p.set_skill(SkillId::WearableOn(Act::WearChest), 1);
            p.set_skill(SkillId::WearableOn(Act::WearBack), 1);
        }
        world.wear(knight, plate).unwrap();
        (world, knight, plate)
    }

    #[test]
    fn test_coverage_by_slot() {
        let (world, knight, plate) = armored();
        assert_eq!(armor_at(&world, knight, HitLocation::Torso), vec![(plate, 6)]);
        assert_eq!(armor_at(&world, knight, HitLocation::Back), vec![(plate, 6)]);
        assert!(armor_at(&world, knight, HitLocation::Head).is_empty());
    }

    #[test]
    fn test_unarmored_location_stops_nothing() {
        let (mut world, knight, _) = armored();
        for _ in 0..20 {
            assert_eq!(mitigate(&mut world, knight, HitLocation::LeftLeg, 4), 0);
        }
    }

    #[test]
    fn test_mitigation_bounded_by_rating() {
        let (mut world, knight, _) = armored();
        for _ in 0..50 {
            let stopped = mitigate(&mut world, knight, HitLocation::Torso, 4);
            assert!((0..=6).contains(&stopped));
        }
    }
}
