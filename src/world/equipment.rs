//! Action-slot links between objects
//!
//! Setting a slot on an actor always records the actor in the target's
//! `touching` list, and clearing it removes the back-link once no other
//! slot of that actor still aims at the target.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::actions::Act;
use crate::combat::weapons::WeaponType;
use crate::core::types::ObjectId;
use crate::skills::SkillId;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActError {
    #[error("object {0} does not exist")]
    Stale(ObjectId),
    #[error("{0:?} is set by damage, not by choice")]
    Involuntary(Act),
    #[error("actor is {0:?}")]
    Incapacitated(Act),
    #[error("{0:?} needs a target")]
    MissingTarget(Act),
    #[error("target {0} is not carried by the actor")]
    NotCarried(ObjectId),
    #[error("slot {0:?} is already in use")]
    SlotOccupied(Act),
    #[error("item is already equipped as {0:?}")]
    AlreadyEquipped(Act),
    #[error("both hands are busy")]
    HandsFull,
    #[error("item cannot be worn")]
    NotWearable,
}

fn is_two_handed(world: &World, item: ObjectId) -> bool {
    world
        .get(item)
        .and_then(WeaponType::of)
        .is_some_and(|weapon| weapon.is_two_handed())
}

impl World {
    /// Set a slot and keep the back-link on both old and new targets
    fn link(&mut self, actor: ObjectId, act: Act, target: Option<ObjectId>) {
        let previous = match self.objects.get_mut(actor) {
            Some(obj) => obj.acts.set(act, target).flatten(),
            None => return,
        };
        if let Some(old) = previous {
            if Some(old) != target {
                self.drop_back_link(actor, old);
            }
        }
        if let Some(t) = target {
            if let Some(obj) = self.objects.get_mut(t) {
                if !obj.touching.contains(&actor) {
                    obj.touching.push(actor);
                }
            }
        }
    }

    /// Clear a slot; returns whether it was set
    pub(crate) fn unlink(&mut self, actor: ObjectId, act: Act) -> bool {
        let removed = match self.objects.get_mut(actor) {
            Some(obj) => obj.acts.remove(act),
            None => return false,
        };
        match removed {
            Some(Some(target)) => {
                self.drop_back_link(actor, target);
                true
            }
            Some(None) => true,
            None => false,
        }
    }

    fn drop_back_link(&mut self, actor: ObjectId, target: ObjectId) {
        let still_aimed = self
            .get(actor)
            .is_some_and(|obj| obj.acts().targets(target));
        if still_aimed {
            return;
        }
        if let Some(obj) = self.objects.get_mut(target) {
            obj.touching.retain(|t| *t != actor);
        }
    }

    /// Set an action slot on `actor`
    ///
    /// Involuntary life states are refused; damage sets those. Equipment
    /// targets must be carried somewhere inside the actor.
    pub fn add_act(
        &mut self,
        actor: ObjectId,
        act: Act,
        target: Option<ObjectId>,
    ) -> Result<(), ActError> {
        let obj = self.get(actor).ok_or(ActError::Stale(actor))?;
        if act == Act::None {
            return Ok(());
        }
        if act.is_involuntary() {
            return Err(ActError::Involuntary(act));
        }
        if let Some(state) = obj.incapacitation() {
            if !matches!(
                act,
                Act::SpecialLinked | Act::SpecialHome | Act::SpecialMaster | Act::SpecialActee
            ) {
                return Err(ActError::Incapacitated(state));
            }
        }
        if let Some(t) = target {
            if !self.contains(t) || self.is_recycled(t) {
                return Err(ActError::Stale(t));
            }
        }

        match act {
            Act::Wield => {
                let item = target.ok_or(ActError::MissingTarget(act))?;
                self.wield(actor, item)
            }
            Act::Hold => {
                let item = target.ok_or(ActError::MissingTarget(act))?;
                self.hold(actor, item)
            }
            a if a.is_wear() => {
                let item = target.ok_or(ActError::MissingTarget(act))?;
                self.check_carried(actor, item)?;
                if let Some(other) = self.get(actor).and_then(|o| o.act_target(a)) {
                    if other != item {
                        return Err(ActError::SlotOccupied(a));
                    }
                }
                self.link(actor, a, Some(item));
                Ok(())
            }
            Act::Sleep | Act::Rest => {
                // one voluntary rest state at a time
                let other = if act == Act::Sleep { Act::Rest } else { Act::Sleep };
                self.unlink(actor, other);
                self.link(actor, act, None);
                Ok(())
            }
            _ => {
                self.link(actor, act, target);
                Ok(())
            }
        }
    }

    /// Clear a slot. Involuntary states only clear through healing.
    pub fn stop_act(&mut self, actor: ObjectId, act: Act) -> bool {
        if act.is_involuntary() {
            return false;
        }
        if act == Act::Wield {
            let wielded = self.get(actor).and_then(|o| o.act_target(Act::Wield));
            let held = self.get(actor).and_then(|o| o.act_target(Act::Hold));
            if wielded.is_some() && wielded == held {
                self.unlink(actor, Act::Hold);
            }
        }
        self.unlink(actor, act)
    }

    fn check_carried(&self, actor: ObjectId, item: ObjectId) -> Result<(), ActError> {
        if item == actor || !self.is_within(item, actor) {
            return Err(ActError::NotCarried(item));
        }
        Ok(())
    }

    /// Equipment slots of `actor` aimed at `item`
    pub fn equipped_as(&self, actor: ObjectId, item: ObjectId) -> Vec<Act> {
        self.get(actor)
            .map(|obj| {
                obj.acts()
                    .slots_targeting(item)
                    .into_iter()
                    .filter(|a| a.is_equipment())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Wield `item` as the weapon; two-handed weapons also take HOLD
    pub fn wield(&mut self, actor: ObjectId, item: ObjectId) -> Result<(), ActError> {
        self.get(actor).ok_or(ActError::Stale(actor))?;
        self.check_carried(actor, item)?;
        if let Some(worn) = self.equipped_as(actor, item).into_iter().find(|a| a.is_wear()) {
            return Err(ActError::AlreadyEquipped(worn));
        }

        let held = self.get(actor).and_then(|o| o.act_target(Act::Hold));
        let wielded = self.get(actor).and_then(|o| o.act_target(Act::Wield));
        let two_handed = is_two_handed(self, item);

        if two_handed && held.is_some_and(|h| h != item && Some(h) != wielded) {
            return Err(ActError::HandsFull);
        }
        // releasing a two-hand grip on the previous weapon
        if let Some(prev) = wielded {
            if prev != item && held == Some(prev) {
                self.unlink(actor, Act::Hold);
            }
        }

        self.link(actor, Act::Wield, Some(item));
        if two_handed {
            self.link(actor, Act::Hold, Some(item));
        }
        tracing::debug!(%actor, %item, two_handed, "wield");
        Ok(())
    }

    /// Put `item` in the off hand
    ///
    /// Holding the wielded weapon grips it with both hands. A worn shield
    /// may also be held. Nothing else can be held beside a two-handed weapon.
    pub fn hold(&mut self, actor: ObjectId, item: ObjectId) -> Result<(), ActError> {
        self.get(actor).ok_or(ActError::Stale(actor))?;
        self.check_carried(actor, item)?;

        let wielded = self.get(actor).and_then(|o| o.act_target(Act::Wield));
        let shield = self.get(actor).and_then(|o| o.act_target(Act::WearShield));

        if let Some(weapon) = wielded {
            if weapon != item && is_two_handed(self, weapon) {
                return Err(ActError::HandsFull);
            }
        }
        let grip_or_shield = wielded == Some(item) || shield == Some(item);
        if !grip_or_shield {
            if let Some(slot) = self
                .equipped_as(actor, item)
                .into_iter()
                .find(|a| *a != Act::Hold)
            {
                return Err(ActError::AlreadyEquipped(slot));
            }
        }

        self.link(actor, Act::Hold, Some(item));
        Ok(())
    }

    /// Wear `item` on the first wear group whose slots are all free
    ///
    /// Groups come from `Wearable on <slot>` skills; the value names the
    /// group, so a breastplate with Chest=1, Back=1 covers both at once and
    /// a ring with LFinger=1, RFinger=2 goes on whichever finger is free.
    pub fn wear(&mut self, actor: ObjectId, item: ObjectId) -> Result<Vec<Act>, ActError> {
        self.get(actor).ok_or(ActError::Stale(actor))?;
        self.check_carried(actor, item)?;
        if let Some(slot) = self
            .equipped_as(actor, item)
            .into_iter()
            .find(|a| *a != Act::Hold)
        {
            return Err(ActError::AlreadyEquipped(slot));
        }

        let groups = self.wear_groups(item);
        if groups.is_empty() {
            return Err(ActError::NotWearable);
        }

        let actor_obj = self.get(actor).ok_or(ActError::Stale(actor))?;
        let mut first_blocked = None;
        let mut chosen = None;
        for slots in groups.values() {
            match slots.iter().find(|s| actor_obj.is_act(**s)) {
                Some(blocked) => {
                    first_blocked.get_or_insert(*blocked);
                }
                None => {
                    chosen = Some(slots.clone());
                    break;
                }
            }
        }

        let slots = match chosen {
            Some(slots) => slots,
            None => {
                return Err(ActError::SlotOccupied(
                    first_blocked.unwrap_or(Act::WearBack),
                ))
            }
        };
        // only a shield stays in hand while worn
        if !slots.contains(&Act::WearShield)
            && self.get(actor).and_then(|o| o.act_target(Act::Hold)) == Some(item)
        {
            self.unlink(actor, Act::Hold);
        }
        for slot in &slots {
            self.link(actor, *slot, Some(item));
        }
        tracing::debug!(%actor, %item, ?slots, "wear");
        Ok(slots)
    }

    /// Wear slots of `item` grouped by group number, ascending
    pub fn wear_groups(&self, item: ObjectId) -> BTreeMap<i32, Vec<Act>> {
        let mut groups: BTreeMap<i32, Vec<Act>> = BTreeMap::new();
        if let Some(obj) = self.get(item) {
            for (skill, value) in obj.skills().iter() {
                if let SkillId::WearableOn(slot) = skill {
                    groups.entry(value).or_default().push(slot);
                }
            }
        }
        groups
    }

    /// Drop every equipment slot aimed at `item`
    pub fn unequip(&mut self, actor: ObjectId, item: ObjectId) -> Vec<Act> {
        let slots = self.equipped_as(actor, item);
        for slot in &slots {
            self.unlink(actor, *slot);
        }
        slots
    }

    pub fn worn_on(&self, actor: ObjectId, slot: Act) -> Option<ObjectId> {
        if !slot.is_wear() {
            return None;
        }
        self.get(actor).and_then(|obj| obj.act_target(slot))
    }

    /// After `item` moves, actors no longer carrying it let go of it
    pub(crate) fn release_uncarried(&mut self, item: ObjectId) {
        let touchers = match self.get(item) {
            Some(obj) => obj.touching().to_vec(),
            None => return,
        };
        for actor in touchers {
            if self.is_within(item, actor) {
                continue;
            }
            for slot in self.equipped_as(actor, item) {
                self.unlink(actor, slot);
            }
        }
    }

    /// Clear every slot aimed at `target`
    pub(crate) fn clear_references_to(&mut self, target: ObjectId) {
        let touchers = match self.get(target) {
            Some(obj) => obj.touching().to_vec(),
            None => return,
        };
        for actor in touchers {
            let slots = self
                .get(actor)
                .map(|o| o.acts().slots_targeting(target))
                .unwrap_or_default();
            for slot in slots {
                self.unlink(actor, slot);
            }
        }
        if let Some(obj) = self.objects.get_mut(target) {
            obj.touching.clear();
        }
    }

    /// Clear every targeted slot `actor` holds
    pub(crate) fn clear_outgoing(&mut self, actor: ObjectId) {
        let slots: Vec<Act> = match self.get(actor) {
            Some(obj) => obj
                .acts()
                .iter()
                .filter(|(_, t)| t.is_some())
                .map(|(a, _)| a)
                .collect(),
            None => return,
        };
        for slot in slots {
            self.unlink(actor, slot);
        }
    }
}
