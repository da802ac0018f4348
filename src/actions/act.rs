//! Action slots
//!
//! A closed set of named relations from an object to at most one target:
//! life states (no target), intents, equipment, and bookkeeping links.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Act {
    None,

    // Life states, worst first
    Dead,
    Dying,
    Unconscious,
    Sleep,
    Rest,

    // Intents
    Point,
    Follow,
    Fight,
    Offer,
    Hold,
    Wield,

    // Equipment
    WearBack,
    WearChest,
    WearHead,
    WearNeck,
    WearCollar,
    WearWaist,
    WearShield,
    WearLArm,
    WearRArm,
    WearLFinger,
    WearRFinger,
    WearLFoot,
    WearRFoot,
    WearLHand,
    WearRHand,
    WearLLeg,
    WearRLeg,
    WearLWrist,
    WearRWrist,
    WearLShoulder,
    WearRShoulder,
    WearLHip,
    WearRHip,
    WearFace,

    // Bookkeeping
    SpecialLinked,
    SpecialHome,
    SpecialMaster,
    SpecialActee,
}

impl Act {
    pub const ALL: [Act; 40] = [
        Act::None,
        Act::Dead,
        Act::Dying,
        Act::Unconscious,
        Act::Sleep,
        Act::Rest,
        Act::Point,
        Act::Follow,
        Act::Fight,
        Act::Offer,
        Act::Hold,
        Act::Wield,
        Act::WearBack,
        Act::WearChest,
        Act::WearHead,
        Act::WearNeck,
        Act::WearCollar,
        Act::WearWaist,
        Act::WearShield,
        Act::WearLArm,
        Act::WearRArm,
        Act::WearLFinger,
        Act::WearRFinger,
        Act::WearLFoot,
        Act::WearRFoot,
        Act::WearLHand,
        Act::WearRHand,
        Act::WearLLeg,
        Act::WearRLeg,
        Act::WearLWrist,
        Act::WearRWrist,
        Act::WearLShoulder,
        Act::WearRShoulder,
        Act::WearLHip,
        Act::WearRHip,
        Act::WearFace,
        Act::SpecialLinked,
        Act::SpecialHome,
        Act::SpecialMaster,
        Act::SpecialActee,
    ];

    pub const WEAR_SLOTS: [Act; 24] = [
        Act::WearBack,
        Act::WearChest,
        Act::WearHead,
        Act::WearNeck,
        Act::WearCollar,
        Act::WearWaist,
        Act::WearShield,
        Act::WearLArm,
        Act::WearRArm,
        Act::WearLFinger,
        Act::WearRFinger,
        Act::WearLFoot,
        Act::WearRFoot,
        Act::WearLHand,
        Act::WearRHand,
        Act::WearLLeg,
        Act::WearRLeg,
        Act::WearLWrist,
        Act::WearRWrist,
        Act::WearLShoulder,
        Act::WearRShoulder,
        Act::WearLHip,
        Act::WearRHip,
        Act::WearFace,
    ];

    /// Token written to save files
    pub fn token(&self) -> &'static str {
        match self {
            Act::None => "NONE",
            Act::Dead => "DEAD",
            Act::Dying => "DYING",
            Act::Unconscious => "UNCONSCIOUS",
            Act::Sleep => "SLEEP",
            Act::Rest => "REST",
            Act::Point => "POINT",
            Act::Follow => "FOLLOW",
            Act::Fight => "FIGHT",
            Act::Offer => "OFFER",
            Act::Hold => "HOLD",
            Act::Wield => "WIELD",
            Act::WearBack => "WEAR_BACK",
            Act::WearChest => "WEAR_CHEST",
            Act::WearHead => "WEAR_HEAD",
            Act::WearNeck => "WEAR_NECK",
            Act::WearCollar => "WEAR_COLLAR",
            Act::WearWaist => "WEAR_WAIST",
            Act::WearShield => "WEAR_SHIELD",
            Act::WearLArm => "WEAR_LARM",
            Act::WearRArm => "WEAR_RARM",
            Act::WearLFinger => "WEAR_LFINGER",
            Act::WearRFinger => "WEAR_RFINGER",
            Act::WearLFoot => "WEAR_LFOOT",
            Act::WearRFoot => "WEAR_RFOOT",
            Act::WearLHand => "WEAR_LHAND",
            Act::WearRHand => "WEAR_RHAND",
            Act::WearLLeg => "WEAR_LLEG",
            Act::WearRLeg => "WEAR_RLEG",
            Act::WearLWrist => "WEAR_LWRIST",
            Act::WearRWrist => "WEAR_RWRIST",
            Act::WearLShoulder => "WEAR_LSHOULDER",
            Act::WearRShoulder => "WEAR_RSHOULDER",
            Act::WearLHip => "WEAR_LHIP",
            Act::WearRHip => "WEAR_RHIP",
            Act::WearFace => "WEAR_FACE",
            Act::SpecialLinked => "SPECIAL_LINKED",
            Act::SpecialHome => "SPECIAL_HOME",
            Act::SpecialMaster => "SPECIAL_MASTER",
            Act::SpecialActee => "SPECIAL_ACTEE",
        }
    }

    pub fn from_token(token: &str) -> Option<Act> {
        Act::ALL.into_iter().find(|act| act.token() == token)
    }

    /// Human label of a wear slot, used in "Wearable on ..." skill names
    pub fn wear_label(&self) -> Option<&'static str> {
        let label = match self {
            Act::WearBack => "Back",
            Act::WearChest => "Chest",
            Act::WearHead => "Head",
            Act::WearNeck => "Neck",
            Act::WearCollar => "Collar",
            Act::WearWaist => "Waist",
            Act::WearShield => "Shield",
            Act::WearLArm => "Left Arm",
            Act::WearRArm => "Right Arm",
            Act::WearLFinger => "Left Finger",
            Act::WearRFinger => "Right Finger",
            Act::WearLFoot => "Left Foot",
            Act::WearRFoot => "Right Foot",
            Act::WearLHand => "Left Hand",
            Act::WearRHand => "Right Hand",
            Act::WearLLeg => "Left Leg",
            Act::WearRLeg => "Right Leg",
            Act::WearLWrist => "Left Wrist",
            Act::WearRWrist => "Right Wrist",
            Act::WearLShoulder => "Left Shoulder",
            Act::WearRShoulder => "Right Shoulder",
            Act::WearLHip => "Left Hip",
            Act::WearRHip => "Right Hip",
            Act::WearFace => "Face",
            _ => return None,
        };
        Some(label)
    }

    /// DEAD, DYING, UNCONSCIOUS, SLEEP, REST
    pub fn is_life_state(&self) -> bool {
        matches!(
            self,
            Act::Dead | Act::Dying | Act::Unconscious | Act::Sleep | Act::Rest
        )
    }

    /// Life states only the damage model may set
    pub fn is_involuntary(&self) -> bool {
        matches!(self, Act::Dead | Act::Dying | Act::Unconscious)
    }

    pub fn is_wear(&self) -> bool {
        Act::WEAR_SLOTS.contains(self)
    }

    /// Slots whose target must be carried by the actor
    pub fn is_equipment(&self) -> bool {
        matches!(self, Act::Hold | Act::Wield) || self.is_wear()
    }

    /// Intents dropped when the actor is knocked out
    pub fn is_intent(&self) -> bool {
        matches!(self, Act::Point | Act::Follow | Act::Fight | Act::Offer)
    }
}
