//! The single polymorphic world node
//!
//! Rooms, items, characters, zones and the sentinel roots are all
//! `GameObject`s; what an object *is* follows from its skills, attributes
//! and contents. Field mutators here only touch the receiver. Relationships
//! (parent, contents, action slots, back-references) are crate-private and
//! are changed through `World` so both ends stay consistent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actions::{Act, ActSet};
use crate::core::types::{MindId, ObjectId, Tick};
use crate::entity::attributes::{Attribute, Attributes};
use crate::entity::damage::{DamageKind, DamagePools};
use crate::entity::position::{Gender, Position};
use crate::skills::{SkillId, SkillSet};

/// Refusal to change posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("cannot change position while {0:?}")]
    Incapacitated(Act),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameObject {
    short_desc: String,
    name: String,
    desc: String,
    long_desc: String,

    attributes: Attributes,
    pools: DamagePools,

    weight: i32,
    volume: i32,
    size: i32,
    value: i32,
    gender: Gender,
    quantity: i32,
    position: Position,

    skills: SkillSet,
    pub(crate) acts: ActSet,

    pub(crate) parent: Option<ObjectId>,
    pub(crate) contents: Vec<ObjectId>,
    /// Actors whose action slots target this object
    pub(crate) touching: Vec<ObjectId>,
    pub(crate) minds: Vec<MindId>,

    pub(crate) busy_until: Option<Tick>,
    pub(crate) busy_command: String,
}

impl Default for GameObject {
    fn default() -> Self {
        Self {
            short_desc: String::new(),
            name: String::new(),
            desc: String::new(),
            long_desc: String::new(),
            attributes: Attributes::default(),
            pools: DamagePools::default(),
            weight: 0,
            volume: 0,
            size: 0,
            value: 0,
            gender: Gender::None,
            quantity: 1,
            position: Position::None,
            skills: SkillSet::new(),
            acts: ActSet::new(),
            parent: None,
            contents: Vec::new(),
            touching: Vec::new(),
            minds: Vec::new(),
            busy_until: None,
            busy_command: String::new(),
        }
    }
}

impl GameObject {
    pub fn new(short_desc: impl Into<String>) -> Self {
        Self {
            short_desc: short_desc.into(),
            ..Self::default()
        }
    }

    // === TEXT ===

    pub fn short_desc(&self) -> &str {
        &self.short_desc
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn long_desc(&self) -> &str {
        &self.long_desc
    }

    pub fn set_short_desc(&mut self, text: impl Into<String>) {
        self.short_desc = text.into();
    }

    pub fn set_name(&mut self, text: impl Into<String>) {
        self.name = text.into();
    }

    pub fn set_desc(&mut self, text: impl Into<String>) {
        self.desc = text.into();
    }

    pub fn set_long_desc(&mut self, text: impl Into<String>) {
        self.long_desc = text.into();
    }

    // === ATTRIBUTES AND SKILLS ===

    pub fn attribute(&self, attribute: Attribute) -> i32 {
        self.attributes.get(attribute)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn set_attribute(&mut self, attribute: Attribute, value: i32) {
        self.attributes.set(attribute, value);
    }

    /// Stored skill value; unset skills read 0
    pub fn skill(&self, skill: SkillId) -> i32 {
        self.skills.get(skill)
    }

    pub fn has_skill(&self, skill: SkillId) -> bool {
        self.skills.has(skill)
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    /// Setting a skill to 0 deletes it
    pub fn set_skill(&mut self, skill: SkillId, value: i32) {
        self.skills.set(skill, value);
    }

    pub fn add_skill(&mut self, skill: SkillId, delta: i32) -> i32 {
        self.skills.add(skill, delta)
    }

    // === DAMAGE ===

    pub fn stun(&self) -> i32 {
        self.pools.stun
    }

    pub fn phys(&self) -> i32 {
        self.pools.phys
    }

    pub fn stru(&self) -> i32 {
        self.pools.stru
    }

    pub fn pools(&self) -> &DamagePools {
        &self.pools
    }

    pub(crate) fn add_damage(&mut self, kind: DamageKind, boxes: i32, cap: i32) -> i32 {
        self.pools.add(kind, boxes, cap)
    }

    pub(crate) fn heal_damage(&mut self, kind: DamageKind, boxes: i32) -> i32 {
        self.pools.heal(kind, boxes)
    }

    /// Loader-only: restores pools exactly as saved
    pub(crate) fn restore_pools(&mut self, pools: DamagePools) {
        self.pools = pools;
    }

    // === GEOMETRY ===

    /// Weight of a single unit
    pub fn weight(&self) -> i32 {
        self.weight
    }

    /// Volume of a single unit
    pub fn volume(&self) -> i32 {
        self.volume
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn set_weight(&mut self, weight: i32) {
        self.weight = weight.max(0);
    }

    pub fn set_volume(&mut self, volume: i32) {
        self.volume = volume.max(0);
    }

    pub fn set_size(&mut self, size: i32) {
        self.size = size.max(0);
    }

    /// Map-like zones reuse weight/volume/size as their X/Y/Z extents
    pub fn extents(&self) -> (i32, i32, i32) {
        (self.weight, self.volume, self.size)
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
    }

    // === STACKS ===

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Quantity is never below 1; a stack of zero is a recycled object
    pub fn set_quantity(&mut self, quantity: i32) {
        self.quantity = quantity.max(1);
    }

    pub fn is_stack(&self) -> bool {
        self.quantity > 1
    }

    /// Weight of the whole stack, excluding contents
    pub fn stack_weight(&self) -> i32 {
        self.weight.saturating_mul(self.quantity)
    }

    pub fn stack_volume(&self) -> i32 {
        self.volume.saturating_mul(self.quantity)
    }

    // === POSITION AND LIFE STATE ===

    pub fn position(&self) -> Position {
        self.position
    }

    /// Voluntary posture change; refused while unconscious, dying or dead
    pub fn set_position(&mut self, position: Position) -> Result<(), PositionError> {
        if let Some(state) = self.incapacitation() {
            return Err(PositionError::Incapacitated(state));
        }
        self.position = position;
        Ok(())
    }

    /// Posture change forced by the simulation (collapse, load)
    pub(crate) fn force_position(&mut self, position: Position) {
        self.position = position;
    }

    /// The worst life state that blocks voluntary action, if any
    pub fn incapacitation(&self) -> Option<Act> {
        [Act::Dead, Act::Dying, Act::Unconscious]
            .into_iter()
            .find(|act| self.acts.is_act(*act))
    }

    pub fn is_act(&self, act: Act) -> bool {
        self.acts.is_act(act)
    }

    pub fn act_target(&self, act: Act) -> Option<ObjectId> {
        self.acts.target(act)
    }

    pub fn acts(&self) -> &ActSet {
        &self.acts
    }

    pub fn is_dead(&self) -> bool {
        self.acts.is_act(Act::Dead)
    }

    pub fn is_conscious(&self) -> bool {
        self.incapacitation().is_none() && !self.acts.is_act(Act::Sleep)
    }

    /// Characters have a body; items, rooms and zones do not
    pub fn is_animate(&self) -> bool {
        self.attributes.get(Attribute::Body) > 0
    }

    pub fn is_alive(&self) -> bool {
        self.is_animate() && !self.is_dead()
    }

    // === RELATIONSHIPS (read-only) ===

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Owned children in insertion order
    pub fn contents(&self) -> &[ObjectId] {
        &self.contents
    }

    pub fn touching(&self) -> &[ObjectId] {
        &self.touching
    }

    pub fn minds(&self) -> &[MindId] {
        &self.minds
    }

    pub fn busy_until(&self) -> Option<Tick> {
        self.busy_until
    }

    pub fn busy_command(&self) -> &str {
        &self.busy_command
    }

    // === CONTAINER FLAGS ===

    pub fn is_open(&self) -> bool {
        !self.has_skill(SkillId::Closeable) || self.has_skill(SkillId::Open)
    }

    pub fn is_locked(&self) -> bool {
        !self.is_open() && self.has_skill(SkillId::Locked)
    }

    /// Contents can be seen from outside
    pub fn is_see_through(&self) -> bool {
        self.is_open() || self.has_skill(SkillId::Transparent)
    }

    /// Case-insensitive fuzzy name match: every query word must start some
    /// word of the name or short description
    pub fn matches(&self, query: &str) -> bool {
        let haystack: Vec<String> = self
            .name
            .split_whitespace()
            .chain(self.short_desc.split_whitespace())
            .map(|w| w.to_lowercase())
            .collect();
        let mut words = query.split_whitespace().peekable();
        if words.peek().is_none() {
            return false;
        }
        words.all(|word| {
            let word = word.to_lowercase();
            haystack.iter().any(|h| h.starts_with(&word))
        })
    }

    // === COPIES ===

    /// Copy of the data fields with every relationship cleared
    pub(crate) fn detached_copy(&self) -> GameObject {
        GameObject {
            short_desc: self.short_desc.clone(),
            name: self.name.clone(),
            desc: self.desc.clone(),
            long_desc: self.long_desc.clone(),
            attributes: self.attributes,
            pools: self.pools,
            weight: self.weight,
            volume: self.volume,
            size: self.size,
            value: self.value,
            gender: self.gender,
            quantity: self.quantity,
            position: self.position,
            skills: self.skills.clone(),
            ..GameObject::default()
        }
    }

    /// Two stack units are interchangeable: every data field except quantity
    /// is equal
    pub(crate) fn same_kind(&self, other: &GameObject) -> bool {
        self.short_desc == other.short_desc
            && self.name == other.name
            && self.desc == other.desc
            && self.long_desc == other.long_desc
            && self.attributes == other.attributes
            && self.pools == other.pools
            && self.weight == other.weight
            && self.volume == other.volume
            && self.size == other.size
            && self.value == other.value
            && self.gender == other.gender
            && self.position == other.position
            && self.skills == other.skills
    }

    /// No relationships beyond its parent
    pub(crate) fn is_unattached(&self) -> bool {
        self.contents.is_empty()
            && self.acts.is_empty()
            && self.touching.is_empty()
            && self.minds.is_empty()
            && self.busy_until.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_object_defaults() {
        let obj = GameObject::new("a rusty key");
        assert_eq!(obj.short_desc(), "a rusty key");
        assert_eq!(obj.quantity(), 1);
        assert_eq!(obj.position(), Position::None);
        assert!(obj.parent().is_none());
        assert!(!obj.is_animate());
    }

    #[test]
    fn test_skill_zero_deletes() {
        let mut obj = GameObject::new("a guard");
        obj.set_skill(SkillId::LongBlades, 3);
        assert_eq!(obj.skill(SkillId::LongBlades), 3);
        obj.set_skill(SkillId::LongBlades, 0);
        assert!(!obj.has_skill(SkillId::LongBlades));
        assert_eq!(obj.skill(SkillId::LongBlades), 0);
    }

    #[test]
    fn test_quantity_floor() {
        let mut obj = GameObject::new("some coins");
        obj.set_quantity(0);
        assert_eq!(obj.quantity(), 1);
        obj.set_quantity(40);
        assert!(obj.is_stack());
    }

    #[test]
    fn test_stack_weight() {
        let mut obj = GameObject::new("some arrows");
        obj.set_weight(2);
        obj.set_quantity(12);
        assert_eq!(obj.stack_weight(), 24);
    }

    #[test]
    fn test_position_blocked_when_unconscious() {
        let mut obj = GameObject::new("a sleeper");
        obj.acts.set(Act::Unconscious, None);
        assert_eq!(
            obj.set_position(Position::Stand),
            Err(PositionError::Incapacitated(Act::Unconscious))
        );
    }

    #[test]
    fn test_dead_outranks_unconscious() {
        let mut obj = GameObject::new("a corpse");
        obj.acts.set(Act::Unconscious, None);
        obj.acts.set(Act::Dead, None);
        assert_eq!(obj.incapacitation(), Some(Act::Dead));
    }

    #[test]
    fn test_name_matching() {
        let mut obj = GameObject::new("a long steel sword");
        obj.set_name("sword");
        assert!(obj.matches("sword"));
        assert!(obj.matches("LONG sw"));
        assert!(obj.matches("steel"));
        assert!(!obj.matches("short sword"));
        assert!(!obj.matches(""));
    }

    #[test]
    fn test_closed_locked_container() {
        let mut chest = GameObject::new("a chest");
        assert!(chest.is_open());
        chest.set_skill(SkillId::Closeable, 1);
        chest.set_skill(SkillId::Locked, 1);
        assert!(!chest.is_open());
        assert!(chest.is_locked());
        chest.set_skill(SkillId::Transparent, 1);
        assert!(chest.is_see_through());
    }
}
