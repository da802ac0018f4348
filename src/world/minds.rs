//! Minds attached to objects and text delivery

use ahash::AHashSet;

use crate::core::types::{MindId, ObjectId};
use crate::mind::{Mind, MindSlot};
use crate::world::World;

impl World {
    /// Give `body` a controller; one body may have several
    pub fn attach_mind(&mut self, body: ObjectId, mind: Mind) -> Option<MindId> {
        let obj = self.objects.get_mut(body)?;
        let id = MindId(self.minds.len() as u32);
        obj.minds.push(id);
        self.minds.push(Some(MindSlot {
            mind,
            body: Some(body),
        }));
        tracing::debug!(%body, mind = id.0, "mind attached");
        Some(id)
    }

    /// Unbind a mind from its body; the mind itself stays registered
    pub fn release_mind(&mut self, id: MindId) -> Option<ObjectId> {
        let slot = self.minds.get_mut(id.0 as usize)?.as_mut()?;
        let body = slot.body.take()?;
        if let Some(obj) = self.objects.get_mut(body) {
            obj.minds.retain(|m| *m != id);
        }
        Some(body)
    }

    /// Unbind and remove a mind
    pub fn remove_mind(&mut self, id: MindId) -> Option<Mind> {
        self.release_mind(id);
        let slot = self.minds.get_mut(id.0 as usize)?.take()?;
        Some(slot.mind)
    }

    /// Unbind every mind driving `body`
    pub fn detach_minds(&mut self, body: ObjectId) -> Vec<MindId> {
        let ids = self
            .get(body)
            .map(|obj| obj.minds().to_vec())
            .unwrap_or_default();
        for id in &ids {
            self.release_mind(*id);
        }
        ids
    }

    pub fn mind(&self, id: MindId) -> Option<&Mind> {
        self.minds
            .get(id.0 as usize)
            .and_then(|slot| slot.as_ref())
            .map(|slot| &slot.mind)
    }

    pub fn mind_mut(&mut self, id: MindId) -> Option<&mut Mind> {
        self.minds
            .get_mut(id.0 as usize)
            .and_then(|slot| slot.as_mut())
            .map(|slot| &mut slot.mind)
    }

    pub fn mind_body(&self, id: MindId) -> Option<ObjectId> {
        self.minds
            .get(id.0 as usize)
            .and_then(|slot| slot.as_ref())
            .and_then(|slot| slot.body)
    }

    /// Deliver text to every mind driving `target`
    pub fn send(&mut self, target: ObjectId, text: &str) {
        let ids = match self.get(target) {
            Some(obj) => obj.minds().to_vec(),
            None => return,
        };
        for id in ids {
            if let Some(mind) = self.mind_mut(id) {
                mind.send(text);
            }
        }
    }

    /// Deliver text to everything in `room` that could see it, skipping
    /// `exclude`
    ///
    /// Reaches the room's direct contents and anything inside open or
    /// transparent containers among them.
    pub fn send_out(&mut self, room: ObjectId, text: &str, exclude: &[ObjectId]) -> usize {
        let mut audience = Vec::new();
        let mut seen = AHashSet::new();
        let mut stack: Vec<ObjectId> = self.contents(room).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            audience.push(current);
            if let Some(obj) = self.get(current) {
                if obj.is_see_through() && !obj.is_animate() {
                    stack.extend(obj.contents().iter().rev().copied());
                }
            }
        }

        let mut delivered = 0;
        for target in audience {
            if exclude.contains(&target) {
                continue;
            }
            if self.get(target).is_some_and(|obj| !obj.minds().is_empty()) {
                self.send(target, text);
                delivered += 1;
            }
        }
        delivered
    }

    /// Take everything queued for a mind
    pub fn drain_output(&mut self, id: MindId) -> Vec<String> {
        self.mind_mut(id).map(|mind| mind.drain()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Attribute;
    use crate::skills::SkillId;

    #[test]
    fn test_send_reaches_remote_mind() {
        let mut w = World::with_seed(1).unwrap();
        let room = w.create(w.universe(), "a room").unwrap();
        let hero = w.create(room, "a hero").unwrap();
        let mind = w.attach_mind(hero, Mind::remote("alice")).unwrap();

        w.send(hero, "Hello.");
        assert_eq!(w.drain_output(mind), vec!["Hello."]);
        assert_eq!(w.mind_body(mind), Some(hero));
    }

    #[test]
    fn test_send_out_skips_excluded_and_closed() {
        let mut w = World::with_seed(1).unwrap();
        let room = w.create(w.universe(), "a room").unwrap();
        let speaker = w.create(room, "a speaker").unwrap();
        let listener = w.create(room, "a listener").unwrap();
        let crate_ = w.create(room, "a crate").unwrap();
        {
            let c = w.get_mut(crate_).unwrap();
            c.set_skill(SkillId::Closeable, 1);
        }
        let stowaway = w.create(crate_, "a stowaway").unwrap();
        w.get_mut(stowaway)
            .unwrap()
            .set_attribute(Attribute::Body, 2);

        let m_speaker = w.attach_mind(speaker, Mind::remote("a")).unwrap();
        let m_listener = w.attach_mind(listener, Mind::remote("b")).unwrap();
        let m_stow = w.attach_mind(stowaway, Mind::remote("c")).unwrap();

        assert_eq!(w.send_out(room, "A bell rings.", &[speaker]), 1);
        assert!(w.drain_output(m_speaker).is_empty());
        assert_eq!(w.drain_output(m_listener), vec!["A bell rings."]);
        assert!(w.drain_output(m_stow).is_empty());

        // open the crate and the stowaway hears it too
        w.get_mut(crate_).unwrap().set_skill(SkillId::Open, 1);
        assert_eq!(w.send_out(room, "Again.", &[]), 3);
        assert_eq!(w.drain_output(m_stow), vec!["Again."]);
    }

    #[test]
    fn test_detach_minds() {
        let mut w = World::with_seed(1).unwrap();
        let hero = w.create(w.universe(), "a hero").unwrap();
        let a = w.attach_mind(hero, Mind::remote("a")).unwrap();
        let b = w.attach_mind(
            hero,
            Mind::Npc {
                profile: "echo".into(),
            },
        )
        .unwrap();

        assert_eq!(w.detach_minds(hero), vec![a, b]);
        assert!(w.get(hero).unwrap().minds().is_empty());
        assert!(w.mind(a).is_some());
        assert!(w.remove_mind(a).is_some());
        assert!(w.mind(a).is_none());
    }
}
