//! Stacks of identical units
//!
//! A stack is one object with quantity > 1. Splitting and merging move
//! units between objects without changing the total.

use crate::core::types::ObjectId;
use crate::world::World;

impl World {
    /// Two objects whose units are interchangeable and free of links
    pub fn stacks_equal(&self, a: ObjectId, b: ObjectId) -> bool {
        if a == b {
            return false;
        }
        match (self.get(a), self.get(b)) {
            (Some(x), Some(y)) => x.is_unattached() && y.is_unattached() && x.same_kind(y),
            _ => false,
        }
    }

    /// Peel `count` units off into a new sibling stack
    ///
    /// Refused (None) unless 0 < count < quantity, or if the stack holds
    /// contents or links of its own.
    pub fn split(&mut self, id: ObjectId, count: i32) -> Option<ObjectId> {
        let obj = self.get(id)?;
        if count <= 0 || count >= obj.quantity() || !obj.is_unattached() {
            return None;
        }
        let parent = obj.parent()?;
        let mut piece = obj.detached_copy();
        piece.set_quantity(count);
        let remaining = obj.quantity() - count;

        self.objects.get_mut(id)?.set_quantity(remaining);
        let new_id = self.objects.insert(piece);
        self.attach(new_id, parent);
        tracing::trace!(%id, %new_id, count, "split");
        Some(new_id)
    }

    /// Merge `id` into the first equal sibling stack
    ///
    /// Returns the stack that absorbed it; `id` is freed. None if no sibling
    /// matched, leaving everything unchanged.
    pub fn try_combine(&mut self, id: ObjectId) -> Option<ObjectId> {
        let parent = self.parent(id)?;
        let into = self
            .contents(parent)
            .iter()
            .copied()
            .find(|other| self.stacks_equal(*other, id))?;

        let moved = self.get(id)?.quantity();
        let target = self.objects.get_mut(into)?;
        target.set_quantity(target.quantity().saturating_add(moved));
        self.detach(id);
        self.objects.remove(id);
        tracing::trace!(%id, %into, moved, "combined");
        Some(into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins(world: &mut World, parent: ObjectId, n: i32) -> ObjectId {
        let id = world.create(parent, "a silver coin").unwrap();
        let obj = world.get_mut(id).unwrap();
        obj.set_name("coin");
        obj.set_weight(1);
        obj.set_quantity(n);
        id
    }

    #[test]
    fn test_split_then_combine_restores() {
        let mut w = World::with_seed(1).unwrap();
        let room = w.create(w.universe(), "a vault").unwrap();
        let pile = coins(&mut w, room, 30);

        let part = w.split(pile, 12).unwrap();
        assert_eq!(w.get(pile).unwrap().quantity(), 18);
        assert_eq!(w.get(part).unwrap().quantity(), 12);
        assert_eq!(w.parent(part), Some(room));

        assert_eq!(w.try_combine(part), Some(pile));
        assert_eq!(w.get(pile).unwrap().quantity(), 30);
        assert!(w.get(part).is_none());
        assert_eq!(w.contents(room), &[pile]);
    }

    #[test]
    fn test_split_bounds() {
        let mut w = World::with_seed(1).unwrap();
        let room = w.create(w.universe(), "a vault").unwrap();
        let pile = coins(&mut w, room, 5);
        assert!(w.split(pile, 0).is_none());
        assert!(w.split(pile, 5).is_none());
        assert!(w.split(pile, -1).is_none());
        assert_eq!(w.get(pile).unwrap().quantity(), 5);
    }

    #[test]
    fn test_different_items_stay_apart() {
        let mut w = World::with_seed(1).unwrap();
        let room = w.create(w.universe(), "a vault").unwrap();
        let a = coins(&mut w, room, 3);
        let b = coins(&mut w, room, 4);
        w.get_mut(b).unwrap().set_value(99);

        assert!(!w.stacks_equal(a, b));
        assert_eq!(w.try_combine(b), None);
        assert_eq!(w.contents(room).len(), 2);
    }
}
