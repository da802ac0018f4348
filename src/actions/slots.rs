//! Per-object action slot table

use serde::{Deserialize, Serialize};

use crate::actions::Act;
use crate::core::types::ObjectId;

/// Sparse (slot, target) list, sorted by slot, at most one entry per slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActSet {
    entries: Vec<(Act, Option<ObjectId>)>,
}

impl ActSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_act(&self, act: Act) -> bool {
        self.entries.iter().any(|(a, _)| *a == act)
    }

    pub fn target(&self, act: Act) -> Option<ObjectId> {
        self.entries
            .iter()
            .find(|(a, _)| *a == act)
            .and_then(|(_, target)| *target)
    }

    /// Set a slot, returning the entry it replaced
    pub(crate) fn set(&mut self, act: Act, target: Option<ObjectId>) -> Option<Option<ObjectId>> {
        match self.entries.binary_search_by(|(a, _)| a.cmp(&act)) {
            Ok(i) => Some(std::mem::replace(&mut self.entries[i].1, target)),
            Err(i) => {
                self.entries.insert(i, (act, target));
                None
            }
        }
    }

    /// Clear a slot, returning its target if it was set
    pub(crate) fn remove(&mut self, act: Act) -> Option<Option<ObjectId>> {
        let i = self.entries.binary_search_by(|(a, _)| a.cmp(&act)).ok()?;
        Some(self.entries.remove(i).1)
    }

    /// Every slot currently aimed at `target`
    pub fn slots_targeting(&self, target: ObjectId) -> Vec<Act> {
        self.entries
            .iter()
            .filter(|(_, t)| *t == Some(target))
            .map(|(a, _)| *a)
            .collect()
    }

    pub fn targets(&self, target: ObjectId) -> bool {
        self.entries.iter().any(|(_, t)| *t == Some(target))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Act, Option<ObjectId>)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
