//! Life-state transitions
//!
//! Damage, not commands, moves an object between the involuntary states.
//! Pools crossing their limits force a state; the state never improves on
//! its own, only through an explicit heal or resurrect.

use serde::{Deserialize, Serialize};

use crate::actions::{Act, ActSet};
use crate::core::config::WorldConfig;
use crate::entity::DamagePools;

/// Life states ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LifeState {
    Awake,
    Resting,
    Sleeping,
    Unconscious,
    Dying,
    Dead,
}

impl LifeState {
    /// Worst life state recorded in an action table
    pub fn of(acts: &ActSet) -> LifeState {
        if acts.is_act(Act::Dead) {
            LifeState::Dead
        } else if acts.is_act(Act::Dying) {
            LifeState::Dying
        } else if acts.is_act(Act::Unconscious) {
            LifeState::Unconscious
        } else if acts.is_act(Act::Sleep) {
            LifeState::Sleeping
        } else if acts.is_act(Act::Rest) {
            LifeState::Resting
        } else {
            LifeState::Awake
        }
    }

    pub fn act(&self) -> Option<Act> {
        match self {
            LifeState::Awake => None,
            LifeState::Resting => Some(Act::Rest),
            LifeState::Sleeping => Some(Act::Sleep),
            LifeState::Unconscious => Some(Act::Unconscious),
            LifeState::Dying => Some(Act::Dying),
            LifeState::Dead => Some(Act::Dead),
        }
    }

    /// Unconscious, dying and dead forbid voluntary position changes
    pub fn is_incapacitated(&self) -> bool {
        *self >= LifeState::Unconscious
    }
}

/// The state damage pools force, ignoring voluntary sleep/rest
///
/// * Structural at its limit, or Physical at its limit plus Body: DEAD
/// * Physical at its limit: DYING
/// * Stun at its limit: UNCONSCIOUS
pub fn forced_state(pools: &DamagePools, body: i32, config: &WorldConfig) -> LifeState {
    if pools.stru >= config.stru_limit || pools.phys >= config.phys_limit + body.max(0) {
        LifeState::Dead
    } else if pools.phys >= config.phys_limit {
        LifeState::Dying
    } else if pools.stun >= config.stun_limit {
        LifeState::Unconscious
    } else {
        LifeState::Awake
    }
}

/// Highest value the Physical pool may hold
pub fn phys_cap(body: i32, config: &WorldConfig) -> i32 {
    config.phys_limit + body.max(0)
}
