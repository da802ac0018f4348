//! Damage pools and wound penalties
//!
//! Pools only grow through `add`, are clamped to their cap, and shrink only
//! through explicit healing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    Stun,
    Phys,
    Stru,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DamagePools {
    pub stun: i32,
    pub phys: i32,
    pub stru: i32,
}

impl DamagePools {
    pub fn get(&self, kind: DamageKind) -> i32 {
        match kind {
            DamageKind::Stun => self.stun,
            DamageKind::Phys => self.phys,
            DamageKind::Stru => self.stru,
        }
    }

    fn slot(&mut self, kind: DamageKind) -> &mut i32 {
        match kind {
            DamageKind::Stun => &mut self.stun,
            DamageKind::Phys => &mut self.phys,
            DamageKind::Stru => &mut self.stru,
        }
    }

    /// Add boxes, clamped to `cap`. Returns the boxes actually added.
    pub fn add(&mut self, kind: DamageKind, boxes: i32, cap: i32) -> i32 {
        let pool = self.slot(kind);
        let before = *pool;
        *pool = before.saturating_add(boxes.max(0)).min(cap.max(before));
        *pool - before
    }

    /// Remove boxes, never going below zero. Returns the boxes removed.
    pub fn heal(&mut self, kind: DamageKind, boxes: i32) -> i32 {
        let pool = self.slot(kind);
        let before = *pool;
        *pool = (before - boxes.max(0)).max(0);
        before - *pool
    }

    /// Sum of Stun and Phys tiers
    pub fn wound_penalty(&self, tiers: &[i32; 4]) -> i32 {
        penalty_tier(self.stun, tiers) + penalty_tier(self.phys, tiers)
    }
}

/// How many wound thresholds `level` has reached (0..=4)
pub fn penalty_tier(level: i32, tiers: &[i32; 4]) -> i32 {
    tiers.iter().filter(|&&t| level >= t).count() as i32
}
