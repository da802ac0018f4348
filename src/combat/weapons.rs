//! Weapon properties
//!
//! A weapon is any object with a `WeaponType` skill. Its other properties
//! are skills too: `WeaponForce`, `WeaponSeverity` and an optional
//! `WeaponReach` override.

use serde::{Deserialize, Serialize};

use crate::actions::Act;
use crate::combat::constants::UNARMED_REACH;
use crate::core::types::ObjectId;
use crate::entity::GameObject;
use crate::skills::SkillId;
use crate::world::World;

/// Weapon families; the discriminant is the stored `WeaponType` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    ShortBlades = 1,
    LongBlades,
    TwoHandedBlades,
    ShortCleaves,
    LongCleaves,
    TwoHandedCleaves,
    ShortCrushing,
    LongCrushing,
    TwoHandedCrushing,
    ShortPiercing,
    LongPiercing,
    TwoHandedPiercing,
    Flails,
    TwoHandedFlails,
    Staves,
    Whips,
}

impl WeaponType {
    pub const ALL: [WeaponType; 16] = [
        WeaponType::ShortBlades,
        WeaponType::LongBlades,
        WeaponType::TwoHandedBlades,
        WeaponType::ShortCleaves,
        WeaponType::LongCleaves,
        WeaponType::TwoHandedCleaves,
        WeaponType::ShortCrushing,
        WeaponType::LongCrushing,
        WeaponType::TwoHandedCrushing,
        WeaponType::ShortPiercing,
        WeaponType::LongPiercing,
        WeaponType::TwoHandedPiercing,
        WeaponType::Flails,
        WeaponType::TwoHandedFlails,
        WeaponType::Staves,
        WeaponType::Whips,
    ];

    pub fn code(&self) -> i32 {
        *self as i32
    }

    pub fn from_code(code: i32) -> Option<WeaponType> {
        WeaponType::ALL.into_iter().find(|w| w.code() == code)
    }

    /// Weapon family of an object, if it is a weapon
    pub fn of(obj: &GameObject) -> Option<WeaponType> {
        if !obj.has_skill(SkillId::WeaponType) {
            return None;
        }
        WeaponType::from_code(obj.skill(SkillId::WeaponType))
    }

    /// Skill used to attack (and parry) with this family
    pub fn skill(&self) -> SkillId {
        match self {
            WeaponType::ShortBlades => SkillId::ShortBlades,
            WeaponType::LongBlades => SkillId::LongBlades,
            WeaponType::TwoHandedBlades => SkillId::TwoHandedBlades,
            WeaponType::ShortCleaves => SkillId::ShortCleaves,
            WeaponType::LongCleaves => SkillId::LongCleaves,
            WeaponType::TwoHandedCleaves => SkillId::TwoHandedCleaves,
            WeaponType::ShortCrushing => SkillId::ShortCrushing,
            WeaponType::LongCrushing => SkillId::LongCrushing,
            WeaponType::TwoHandedCrushing => SkillId::TwoHandedCrushing,
            WeaponType::ShortPiercing => SkillId::ShortPiercing,
            WeaponType::LongPiercing => SkillId::LongPiercing,
            WeaponType::TwoHandedPiercing => SkillId::TwoHandedPiercing,
            WeaponType::Flails => SkillId::Flails,
            WeaponType::TwoHandedFlails => SkillId::TwoHandedFlails,
            WeaponType::Staves => SkillId::Staves,
            WeaponType::Whips => SkillId::Whips,
        }
    }

    /// Needs both hands: wielding it also fills HOLD
    pub fn is_two_handed(&self) -> bool {
        matches!(
            self,
            WeaponType::TwoHandedBlades
                | WeaponType::TwoHandedCleaves
                | WeaponType::TwoHandedCrushing
                | WeaponType::TwoHandedPiercing
                | WeaponType::TwoHandedFlails
                | WeaponType::Staves
        )
    }

    /// Reach when the weapon does not override it
    pub fn default_reach(&self) -> i32 {
        match self {
            WeaponType::ShortBlades
            | WeaponType::ShortCleaves
            | WeaponType::ShortCrushing
            | WeaponType::ShortPiercing => 1,
            WeaponType::LongBlades
            | WeaponType::LongCleaves
            | WeaponType::LongCrushing
            | WeaponType::Flails => 2,
            WeaponType::TwoHandedBlades
            | WeaponType::TwoHandedCleaves
            | WeaponType::TwoHandedCrushing
            | WeaponType::TwoHandedFlails
            | WeaponType::LongPiercing
            | WeaponType::Staves => 3,
            WeaponType::TwoHandedPiercing | WeaponType::Whips => 4,
        }
    }
}

/// A hand slot holds something that is not a weapon
pub fn hands_full(world: &World, fighter: &GameObject) -> bool {
    [Act::Wield, Act::Hold]
        .into_iter()
        .filter_map(|slot| fighter.act_target(slot))
        .filter_map(|id| world.get(id))
        .any(|item| WeaponType::of(item).is_none())
}

/// What a combatant fights with this exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponProfile {
    /// Wielded object, None when fighting bare-handed
    pub item: Option<ObjectId>,
    pub weapon_type: Option<WeaponType>,
    pub skill: SkillId,
    pub force: i32,
    pub severity: i32,
    pub reach: i32,
    /// Gripped with both hands (two-handed weapon, or HOLD on the wielded item)
    pub two_handed_grip: bool,
}

impl WeaponProfile {
    /// Fists or feet, whichever the fighter is better at
    pub fn unarmed(fighter: &GameObject) -> Self {
        let skill = if fighter.skill_target(SkillId::Kicking) > fighter.skill_target(SkillId::Punching)
        {
            SkillId::Kicking
        } else {
            SkillId::Punching
        };
        Self {
            item: None,
            weapon_type: None,
            skill,
            force: 0,
            severity: 0,
            reach: UNARMED_REACH,
            two_handed_grip: false,
        }
    }

    /// Unarmed profile given what the hands are busy with
    fn bare(world: &World, fighter: &GameObject) -> Self {
        let mut profile = WeaponProfile::unarmed(fighter);
        if hands_full(world, fighter) {
            profile.skill = SkillId::Kicking;
        }
        profile
    }

    pub fn is_armed(&self) -> bool {
        self.item.is_some()
    }

    /// Profile of what `fighter` currently wields
    ///
    /// A wielded object without a weapon family is an improvised club and
    /// uses the unarmed skill.
    pub fn of(world: &World, fighter: ObjectId) -> Option<Self> {
        let obj = world.get(fighter)?;
        let Some(item_id) = obj.act_target(Act::Wield) else {
            return Some(WeaponProfile::bare(world, obj));
        };
        let Some(item) = world.get(item_id) else {
            return Some(WeaponProfile::bare(world, obj));
        };

        let weapon_type = WeaponType::of(item);
        let skill = weapon_type
            .map(|w| w.skill())
            .unwrap_or_else(|| WeaponProfile::bare(world, obj).skill);
        let reach = if item.has_skill(SkillId::WeaponReach) {
            item.skill(SkillId::WeaponReach)
        } else {
            weapon_type.map(|w| w.default_reach()).unwrap_or(UNARMED_REACH)
        };
        let two_handed_grip = weapon_type.is_some_and(|w| w.is_two_handed())
            || obj.act_target(Act::Hold) == Some(item_id);

        Some(Self {
            item: Some(item_id),
            weapon_type,
            skill,
            force: item.skill(SkillId::WeaponForce),
            severity: item.skill(SkillId::WeaponSeverity),
            reach,
            two_handed_grip,
        })
    }
}
