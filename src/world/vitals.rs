//! Damage, healing and the life states they force
//!
//! After every hit the pools are compared against their limits and the
//! object is moved to the worst state they demand. Entering an
//! incapacitated state drops the object to LIE and clears its intents.

use crate::actions::{forced_state, phys_cap, Act, LifeState};
use crate::core::types::ObjectId;
use crate::entity::{Attribute, DamageKind, Position};
use crate::world::World;

impl World {
    fn pool_cap(&self, id: ObjectId, kind: DamageKind) -> i32 {
        let body = self
            .get(id)
            .map(|obj| obj.attribute(Attribute::Body))
            .unwrap_or(0);
        match kind {
            DamageKind::Stun => self.config().stun_limit,
            DamageKind::Phys => phys_cap(body, self.config()),
            DamageKind::Stru => self.config().stru_limit,
        }
    }

    /// Apply `boxes` of damage; returns the boxes that landed
    pub fn hit(&mut self, id: ObjectId, kind: DamageKind, boxes: i32) -> Option<i32> {
        let cap = self.pool_cap(id, kind);
        let added = self.objects.get_mut(id)?.add_damage(kind, boxes, cap);
        if added > 0 {
            tracing::trace!(%id, ?kind, added, "damage");
            self.enforce_life_state(id);
        }
        Some(added)
    }

    pub fn hit_stun(&mut self, id: ObjectId, boxes: i32) -> Option<i32> {
        self.hit(id, DamageKind::Stun, boxes)
    }

    pub fn hit_phys(&mut self, id: ObjectId, boxes: i32) -> Option<i32> {
        self.hit(id, DamageKind::Phys, boxes)
    }

    pub fn hit_stru(&mut self, id: ObjectId, boxes: i32) -> Option<i32> {
        self.hit(id, DamageKind::Stru, boxes)
    }

    /// Remove `boxes` of damage; the dead stay dead
    pub fn heal(&mut self, id: ObjectId, kind: DamageKind, boxes: i32) -> Option<i32> {
        let obj = self.objects.get_mut(id)?;
        if obj.is_dead() {
            return Some(0);
        }
        let removed = obj.heal_damage(kind, boxes);
        if removed > 0 {
            self.relax_life_state(id);
        }
        Some(removed)
    }

    pub fn heal_stun(&mut self, id: ObjectId, boxes: i32) -> Option<i32> {
        self.heal(id, DamageKind::Stun, boxes)
    }

    pub fn heal_phys(&mut self, id: ObjectId, boxes: i32) -> Option<i32> {
        self.heal(id, DamageKind::Phys, boxes)
    }

    pub fn heal_stru(&mut self, id: ObjectId, boxes: i32) -> Option<i32> {
        self.heal(id, DamageKind::Stru, boxes)
    }

    /// Clear all damage and every involuntary state, dead or not
    pub fn resurrect(&mut self, id: ObjectId) -> bool {
        let Some(obj) = self.objects.get_mut(id) else {
            return false;
        };
        obj.restore_pools(Default::default());
        for act in [Act::Dead, Act::Dying, Act::Unconscious] {
            obj.acts.remove(act);
        }
        tracing::debug!(%id, "resurrected");
        true
    }

    pub fn life_state(&self, id: ObjectId) -> Option<LifeState> {
        self.get(id).map(|obj| LifeState::of(obj.acts()))
    }

    /// Worsen the life state if the pools demand it
    pub(crate) fn enforce_life_state(&mut self, id: ObjectId) {
        let Some(obj) = self.get(id) else {
            return;
        };
        let forced = forced_state(obj.pools(), obj.attribute(Attribute::Body), self.config());
        let current = LifeState::of(obj.acts());
        if forced > current {
            self.set_life_state(id, forced);
        }
    }

    /// After healing, step back to the state the pools still demand
    fn relax_life_state(&mut self, id: ObjectId) {
        let Some(obj) = self.get(id) else {
            return;
        };
        let current = LifeState::of(obj.acts());
        if !current.is_incapacitated() || current == LifeState::Dead {
            return;
        }
        let forced = forced_state(obj.pools(), obj.attribute(Attribute::Body), self.config());
        if forced < current {
            self.set_life_state(id, forced);
        }
    }

    fn set_life_state(&mut self, id: ObjectId, state: LifeState) {
        let Some(obj) = self.objects.get_mut(id) else {
            return;
        };
        for act in [Act::Dead, Act::Dying, Act::Unconscious, Act::Sleep, Act::Rest] {
            obj.acts.remove(act);
        }
        if let Some(act) = state.act() {
            obj.acts.set(act, None);
        }

        if state.is_incapacitated() {
            obj.force_position(Position::Lie);
            let intents: Vec<Act> = obj
                .acts()
                .iter()
                .map(|(a, _)| a)
                .filter(|a| a.is_intent())
                .collect();
            for act in intents {
                self.unlink(id, act);
            }
            tracing::debug!(%id, ?state, "collapsed");
        }
    }
}
