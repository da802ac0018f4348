//! Save writer
//!
//! The whole file is built in memory first; nothing touches disk until the
//! text is complete.

use ahash::AHashMap;

use crate::core::types::ObjectId;
use crate::entity::Attribute;
use crate::persist::format::{push_text, SAVE_VERSION};
use crate::world::World;

/// Serializes one subtree of a world
pub struct SaveWriter<'a> {
    world: &'a World,
    numbers: AHashMap<ObjectId, u32>,
    dropped_links: usize,
}

impl<'a> SaveWriter<'a> {
    pub fn new(world: &'a World) -> Self {
        Self {
            world,
            numbers: AHashMap::new(),
            dropped_links: 0,
        }
    }

    /// Action targets outside the saved subtree, written as 0
    pub fn dropped_links(&self) -> usize {
        self.dropped_links
    }

    /// Save text for `root` and everything beneath it
    pub fn write(&mut self, root: ObjectId) -> String {
        // numbers follow pre-order so every target is known before writing
        self.numbers = self
            .world
            .subtree(root)
            .into_iter()
            .zip(1u32..)
            .collect();
        self.dropped_links = 0;

        let mut out = format!("{:08X}\n", SAVE_VERSION);
        if self.world.contains(root) {
            self.write_object(root, &mut out);
        }
        tracing::debug!(
            objects = self.numbers.len(),
            dropped = self.dropped_links,
            bytes = out.len(),
            "save written"
        );
        out
    }

    fn write_object(&mut self, id: ObjectId, out: &mut String) {
        let world = self.world;
        let Some(obj) = world.get(id) else {
            return;
        };
        let number = self.numbers.get(&id).copied().unwrap_or(0);
        out.push_str(&format!("{number}\n"));

        push_text(out, obj.short_desc());
        push_text(out, obj.name());
        push_text(out, obj.desc());
        push_text(out, obj.long_desc());

        let mut numeric = vec![
            obj.weight().to_string(),
            obj.volume().to_string(),
            obj.size().to_string(),
            obj.value().to_string(),
            obj.gender().code().to_string(),
        ];
        numeric.extend(Attribute::ALL.iter().map(|a| obj.attribute(*a).to_string()));
        numeric.extend([obj.stun(), obj.phys(), obj.stru()].map(|v| v.to_string()));
        out.push_str(&numeric.join(" "));
        out.push('\n');

        out.push_str(obj.position().token());
        out.push('\n');

        out.push_str(&format!("{}\n", obj.skills().len()));
        for (skill, value) in obj.skills().iter() {
            out.push_str(&format!("{}:{}\n", skill.name(), value));
        }

        out.push_str(&format!("{}\n", obj.acts().len()));
        for (act, target) in obj.acts().iter() {
            let target_number = match target {
                None => 0,
                Some(t) => match self.numbers.get(&t) {
                    Some(n) => *n,
                    None => {
                        tracing::warn!(%id, ?act, target = %t, "action target outside saved tree");
                        self.dropped_links += 1;
                        0
                    }
                },
            };
            out.push_str(&format!("{}:{}\n", act.token(), target_number));
        }

        out.push_str(&world.busy_remaining(id).to_string());
        out.push(' ');
        push_text(out, obj.busy_command());

        out.push_str(&format!("{}\n", obj.quantity()));

        out.push_str(&format!("{}\n", obj.contents().len()));
        for child in obj.contents() {
            self.write_object(*child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Act;
    use crate::skills::SkillId;

    #[test]
    fn test_header_and_numbering() {
        let mut world = World::with_seed(1).unwrap();
        let room = world.create(world.universe(), "a cell").unwrap();
        let _bed = world.create(room, "a cot").unwrap();

        let text = SaveWriter::new(&world).write(room);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("00000003"));
        assert_eq!(lines.next(), Some("1"));
        assert_eq!(lines.next(), Some("6:a cell"));
        assert!(text.contains("\n2\n6:a cot\n"));
    }

    #[test]
    fn test_skill_and_act_lines() {
        let mut world = World::with_seed(1).unwrap();
        let hero = world.create(world.universe(), "a hero").unwrap();
        world.get_mut(hero).unwrap().set_attribute(Attribute::Body, 3);
        let ring = world.create(hero, "a ring").unwrap();
        world
            .get_mut(ring)
            .unwrap()
            .set_skill(SkillId::WearableOn(Act::WearLFinger), 1);
        world.wear(hero, ring).unwrap();

        let text = SaveWriter::new(&world).write(hero);
        assert!(text.contains("\nWEAR_LFINGER:2\n"));
        assert!(text.contains("\nWearable on Left Finger:1\n"));
    }

    #[test]
    fn test_outside_target_written_as_zero() {
        let mut world = World::with_seed(1).unwrap();
        let room = world.create(world.universe(), "a room").unwrap();
        let hero = world.create(room, "a hero").unwrap();
        let rat = world.create(room, "a rat").unwrap();
        world.add_act(hero, Act::Fight, Some(rat)).unwrap();

        let mut writer = SaveWriter::new(&world);
        let text = writer.write(hero);
        assert!(text.contains("\nFIGHT:0\n"));
        assert_eq!(writer.dropped_links(), 1);
    }
}
