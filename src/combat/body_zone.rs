//! Hit locations (14 zones)
//!
//! Each location carries a relative weight, a severity-stage modifier and
//! the wear slots whose armor covers it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actions::Act;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitLocation {
    /// Center mass, most hits land here
    Torso,
    Back,
    Head,
    Face,
    Neck,
    /// Rare and nasty
    Throat,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    LeftHand,
    RightHand,
    LeftFoot,
    RightFoot,
}

impl HitLocation {
    pub const ALL: [HitLocation; 14] = [
        HitLocation::Torso,
        HitLocation::Back,
        HitLocation::Head,
        HitLocation::Face,
        HitLocation::Neck,
        HitLocation::Throat,
        HitLocation::LeftArm,
        HitLocation::RightArm,
        HitLocation::LeftLeg,
        HitLocation::RightLeg,
        HitLocation::LeftHand,
        HitLocation::RightHand,
        HitLocation::LeftFoot,
        HitLocation::RightFoot,
    ];

    /// Relative chance of being hit
    pub const fn weight(&self) -> u32 {
        match self {
            HitLocation::Torso => 50,
            HitLocation::Back => 6,
            HitLocation::Head => 3,
            HitLocation::Face | HitLocation::Neck | HitLocation::Throat => 1,
            HitLocation::LeftArm
            | HitLocation::RightArm
            | HitLocation::LeftLeg
            | HitLocation::RightLeg => 10,
            HitLocation::LeftHand | HitLocation::RightHand => 2,
            HitLocation::LeftFoot | HitLocation::RightFoot => 3,
        }
    }

    pub fn total_weight() -> u32 {
        HitLocation::ALL.iter().map(|l| l.weight()).sum()
    }

    /// Added to the weapon's severity stage
    pub const fn stage_modifier(&self) -> i32 {
        match self {
            HitLocation::Torso | HitLocation::Back => 0,
            HitLocation::Head | HitLocation::Face | HitLocation::Neck => 1,
            HitLocation::Throat => 2,
            _ => -1,
        }
    }

    /// Wear slots whose armor protects this location
    pub fn armor_slots(&self) -> &'static [Act] {
        match self {
            HitLocation::Torso => &[Act::WearChest, Act::WearWaist],
            HitLocation::Back => &[Act::WearBack],
            HitLocation::Head => &[Act::WearHead],
            HitLocation::Face => &[Act::WearFace],
            HitLocation::Neck | HitLocation::Throat => &[Act::WearNeck, Act::WearCollar],
            HitLocation::LeftArm => &[Act::WearLArm, Act::WearLShoulder],
            HitLocation::RightArm => &[Act::WearRArm, Act::WearRShoulder],
            HitLocation::LeftLeg => &[Act::WearLLeg, Act::WearLHip],
            HitLocation::RightLeg => &[Act::WearRLeg, Act::WearRHip],
            HitLocation::LeftHand => &[Act::WearLHand, Act::WearLWrist],
            HitLocation::RightHand => &[Act::WearRHand, Act::WearRWrist],
            HitLocation::LeftFoot => &[Act::WearLFoot],
            HitLocation::RightFoot => &[Act::WearRFoot],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HitLocation::Torso => "torso",
            HitLocation::Back => "back",
            HitLocation::Head => "head",
            HitLocation::Face => "face",
            HitLocation::Neck => "neck",
            HitLocation::Throat => "throat",
            HitLocation::LeftArm => "left arm",
            HitLocation::RightArm => "right arm",
            HitLocation::LeftLeg => "left leg",
            HitLocation::RightLeg => "right leg",
            HitLocation::LeftHand => "left hand",
            HitLocation::RightHand => "right hand",
            HitLocation::LeftFoot => "left foot",
            HitLocation::RightFoot => "right foot",
        }
    }

    /// Location for a roll in `0..total_weight()`
    pub fn from_roll(mut roll: u32) -> HitLocation {
        for location in HitLocation::ALL {
            if roll < location.weight() {
                return location;
            }
            roll -= location.weight();
        }
        HitLocation::Torso
    }

    /// Draw a location from the weighted table
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> HitLocation {
        HitLocation::from_roll(rng.gen_range(0..HitLocation::total_weight()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_location_count() {
        assert_eq!(HitLocation::ALL.len(), 14);
        assert_eq!(HitLocation::total_weight(), 112);
    }

    #[test]
    fn test_roll_boundaries() {
        assert_eq!(HitLocation::from_roll(0), HitLocation::Torso);
        assert_eq!(HitLocation::from_roll(49), HitLocation::Torso);
        assert_eq!(HitLocation::from_roll(50), HitLocation::Back);
        assert_eq!(HitLocation::from_roll(111), HitLocation::RightFoot);
    }

    #[test]
    fn test_torso_most_common() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut torso = 0;
        for _ in 0..1000 {
            if HitLocation::sample(&mut rng) == HitLocation::Torso {
                torso += 1;
            }
        }
        // expected ~446
        assert!(torso > 350 && torso < 550);
    }

    #[test]
    fn test_every_location_armored_somewhere() {
        for location in HitLocation::ALL {
            assert!(!location.armor_slots().is_empty());
            assert!(location.armor_slots().iter().all(|s| s.is_wear()));
        }
    }
}
