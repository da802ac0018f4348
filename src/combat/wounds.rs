//! Wounds: turning a landed blow into damage boxes
//!
//! The blow's stage is its severity plus one per `SUCCESSES_PER_STAGE` net
//! successes. The victim resists with Body against the blow's force and
//! steps the stage down the same way. The final stage picks the boxes.

use serde::{Deserialize, Serialize};

use crate::actions::LifeState;
use crate::combat::body_zone::HitLocation;
use crate::combat::constants::{MAX_STAGE, STAGE_BOXES, SUCCESSES_PER_STAGE};
use crate::core::types::ObjectId;
use crate::entity::{Attribute, DamageKind};
use crate::skills::count_successes;
use crate::world::World;

/// A blow that reached the victim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wound {
    pub location: Option<HitLocation>,
    pub kind: DamageKind,
    pub force: i32,
    /// Stage after attacker successes and victim resistance
    pub stage: i32,
    /// Boxes the stage called for
    pub boxes: i32,
    /// Boxes that fit in the pool
    pub applied: i32,
    pub state_after: LifeState,
}

/// Stage raised by net successes, before resistance
pub fn damage_stage(base_stage: i32, successes: i32) -> i32 {
    base_stage + successes.max(0) / SUCCESSES_PER_STAGE
}

/// Boxes for a final stage; stages at or below zero do nothing
pub fn stage_boxes(stage: i32) -> i32 {
    if stage <= 0 {
        return 0;
    }
    STAGE_BOXES[stage.min(MAX_STAGE) as usize]
}

impl World {
    /// Resolve a staged blow of `kind` against `victim`
    pub fn wound(
        &mut self,
        victim: ObjectId,
        kind: DamageKind,
        force: i32,
        base_stage: i32,
        successes: i32,
        location: Option<HitLocation>,
    ) -> Option<Wound> {
        let body = self.get(victim)?.attribute(Attribute::Body);
        let target = force.max(self.config().min_target_number);
        let resisted = count_successes(&mut self.rng, body, target) / SUCCESSES_PER_STAGE;

        let stage = damage_stage(base_stage, successes) - resisted;
        let boxes = stage_boxes(stage);
        let applied = self.hit(victim, kind, boxes)?;
        let state_after = self.life_state(victim)?;

        tracing::debug!(
            %victim,
            ?kind,
            force,
            stage,
            boxes,
            applied,
            ?state_after,
            "wound"
        );
        Some(Wound {
            location,
            kind,
            force,
            stage,
            boxes,
            applied,
            state_after,
        })
    }

    /// Staged Stun blow
    pub fn wound_stun(
        &mut self,
        victim: ObjectId,
        force: i32,
        base_stage: i32,
        successes: i32,
    ) -> Option<Wound> {
        self.wound(victim, DamageKind::Stun, force, base_stage, successes, None)
    }

    /// Staged Physical blow
    pub fn wound_phys(
        &mut self,
        victim: ObjectId,
        force: i32,
        base_stage: i32,
        successes: i32,
    ) -> Option<Wound> {
        self.wound(victim, DamageKind::Phys, force, base_stage, successes, None)
    }
}
