//! Sparse per-object skill table
//!
//! Objects carry a few dozen entries at most, so a sorted `Vec` with a linear
//! scan beats hashing. A zero value is never stored.

use serde::{Deserialize, Serialize};

use crate::skills::SkillId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    entries: Vec<(SkillId, i32)>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value, or 0 when absent
    pub fn get(&self, skill: SkillId) -> i32 {
        self.entries
            .iter()
            .find(|(id, _)| *id == skill)
            .map(|(_, value)| *value)
            .unwrap_or(0)
    }

    pub fn has(&self, skill: SkillId) -> bool {
        self.entries.iter().any(|(id, _)| *id == skill)
    }

    /// Set a value; 0 removes the entry
    pub fn set(&mut self, skill: SkillId, value: i32) {
        let position = self.entries.iter().position(|(id, _)| *id >= skill);
        match position {
            Some(i) if self.entries[i].0 == skill => {
                if value == 0 {
                    self.entries.remove(i);
                } else {
                    self.entries[i].1 = value;
                }
            }
            Some(i) => {
                if value != 0 {
                    self.entries.insert(i, (skill, value));
                }
            }
            None => {
                if value != 0 {
                    self.entries.push((skill, value));
                }
            }
        }
    }

    /// Adjust by `delta`, returning the new value
    pub fn add(&mut self, skill: SkillId, delta: i32) -> i32 {
        let value = self.get(skill).saturating_add(delta);
        self.set(skill, value);
        value
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillId, i32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_reads_zero() {
        let skills = SkillSet::new();
        assert_eq!(skills.get(SkillId::Dodge), 0);
        assert!(!skills.has(SkillId::Dodge));
    }

    #[test]
    fn test_zero_deletes() {
        let mut skills = SkillSet::new();
        skills.set(SkillId::Dodge, 3);
        assert!(skills.has(SkillId::Dodge));

        skills.set(SkillId::Dodge, 0);
        assert!(!skills.has(SkillId::Dodge));
        assert!(skills.is_empty());
    }

    #[test]
    fn test_setting_zero_on_absent_is_noop() {
        let mut skills = SkillSet::new();
        skills.set(SkillId::Open, 0);
        assert!(skills.is_empty());
    }

    #[test]
    fn test_entries_stay_sorted() {
        let mut skills = SkillSet::new();
        skills.set(SkillId::Stealth, 2);
        skills.set(SkillId::Punching, 1);
        skills.set(SkillId::Dodge, 4);

        let ids: Vec<SkillId> = skills.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![SkillId::Punching, SkillId::Dodge, SkillId::Stealth]);
    }

    #[test]
    fn test_add_down_to_zero_removes() {
        let mut skills = SkillSet::new();
        skills.add(SkillId::Quantity, 2);
        assert_eq!(skills.add(SkillId::Quantity, -2), 0);
        assert!(!skills.has(SkillId::Quantity));
    }

    #[test]
    fn test_negative_values_are_kept() {
        let mut skills = SkillSet::new();
        skills.set(SkillId::WeaponReach, -1);
        assert_eq!(skills.get(SkillId::WeaponReach), -1);
    }
}
