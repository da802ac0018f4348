//! Moving objects between containers
//!
//! `travel` checks everything before it touches anything: a refused move
//! leaves both containers exactly as they were.

use thiserror::Error;

use crate::core::types::ObjectId;
use crate::skills::SkillId;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TravelError {
    #[error("cannot go there")]
    Refused,
    #[error("does not fit")]
    DoesNotFit,
    #[error("too heavy")]
    TooHeavy,
    #[error("will not leave its owner")]
    Cursed,
}

impl TravelError {
    /// Numeric result code: -1 refused, -2 size, -3 weight, -4 cursed
    pub fn code(&self) -> i32 {
        match self {
            TravelError::Refused => -1,
            TravelError::DoesNotFit => -2,
            TravelError::TooHeavy => -3,
            TravelError::Cursed => -4,
        }
    }
}

impl World {
    /// Can hold other objects at all
    pub fn can_contain(&self, id: ObjectId) -> bool {
        if self.is_root(id) {
            return true;
        }
        self.get(id).is_some_and(|obj| {
            obj.is_animate()
                || obj.has_skill(SkillId::Container)
                || obj.has_skill(SkillId::Capacity)
                || obj.has_skill(SkillId::Enterable)
        })
    }

    /// Weight of a stack plus everything inside it
    pub fn total_weight(&self, id: ObjectId) -> i32 {
        let own = self.get(id).map(|obj| obj.stack_weight()).unwrap_or(0);
        own.saturating_add(self.contents_weight(id))
    }

    /// Weight of everything inside `id`
    pub fn contents_weight(&self, id: ObjectId) -> i32 {
        self.contents(id)
            .iter()
            .fold(0i32, |sum, child| sum.saturating_add(self.total_weight(*child)))
    }

    /// Volume taken by direct contents; nested containers count their own
    /// outer volume only
    pub fn contents_volume(&self, id: ObjectId) -> i32 {
        self.contents(id).iter().fold(0i32, |sum, child| {
            sum.saturating_add(self.get(*child).map(|obj| obj.stack_volume()).unwrap_or(0))
        })
    }

    /// Units across every matching stack directly inside `container`
    pub fn total_quantity(&self, container: ObjectId, query: &str) -> i32 {
        self.contents(container)
            .iter()
            .filter_map(|child| self.get(*child))
            .filter(|obj| obj.matches(query))
            .map(|obj| obj.quantity())
            .sum()
    }

    fn check_travel(&self, id: ObjectId, dest: ObjectId, force: bool) -> Result<(), TravelError> {
        let obj = self.get(id).ok_or(TravelError::Refused)?;
        let target = self.get(dest).ok_or(TravelError::Refused)?;

        if self.is_root(id) || self.is_recycled(id) || self.is_within(dest, id) {
            return Err(TravelError::Refused);
        }
        if !self.can_contain(dest) || target.is_locked() {
            return Err(TravelError::Refused);
        }
        // only recycle() may put things in the bin
        if dest == self.trash_bin() || self.is_recycled(dest) {
            return Err(TravelError::Refused);
        }

        if obj.has_skill(SkillId::Cursed) && !force {
            let bound = obj
                .parent()
                .and_then(|p| self.get(p))
                .is_some_and(|owner| owner.is_animate());
            if bound {
                return Err(TravelError::Cursed);
            }
        }

        if target.has_skill(SkillId::MaxSize) && obj.size() > target.skill(SkillId::MaxSize) {
            return Err(TravelError::DoesNotFit);
        }
        if target.has_skill(SkillId::Container) {
            let after = self.contents_volume(dest).saturating_add(obj.stack_volume());
            if after > target.skill(SkillId::Container) {
                return Err(TravelError::DoesNotFit);
            }
        }
        if target.has_skill(SkillId::Capacity) {
            let moving = self.total_weight(id);
            let mut held = self.contents_weight(dest);
            // already counted when it sits deeper inside dest
            if self.is_within(id, dest) {
                held = held.saturating_sub(moving);
            }
            let after = held.saturating_add(moving);
            if after > target.skill(SkillId::Capacity) {
                return Err(TravelError::TooHeavy);
            }
        }
        Ok(())
    }

    /// Move `id` into `dest`
    ///
    /// On success returns the id that now holds the moved units: `id`
    /// itself, or an equal stack already in `dest` that absorbed it.
    /// `force` overrides the curse binding only.
    pub fn travel(&mut self, id: ObjectId, dest: ObjectId, force: bool) -> Result<ObjectId, TravelError> {
        if self.parent(id) == Some(dest) && !self.is_recycled(id) {
            return Ok(id);
        }
        if let Err(e) = self.check_travel(id, dest, force) {
            tracing::debug!(%id, %dest, code = e.code(), "travel refused");
            return Err(e);
        }

        self.detach(id);
        self.attach(id, dest);
        for moved in self.subtree(id) {
            self.release_uncarried(moved);
        }

        let survivor = self.try_combine(id).unwrap_or(id);
        tracing::trace!(%id, %dest, %survivor, "travel");
        Ok(survivor)
    }

    /// `travel` with the numeric result: 0 or a negative refusal code
    pub fn travel_code(&mut self, id: ObjectId, dest: ObjectId, force: bool) -> i32 {
        match self.travel(id, dest, force) {
            Ok(_) => 0,
            Err(e) => e.code(),
        }
    }
}
