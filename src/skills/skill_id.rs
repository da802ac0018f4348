//! Skill identifiers
//!
//! Every named numeric property of an object is a skill: combat abilities,
//! crafts, and flag-like state such as `Open`, `Locked` or `Hidden`. They all
//! share one sparse table and one resolution path.

use std::sync::OnceLock;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::actions::Act;
use crate::entity::Attribute;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    Combat,
    Athletic,
    Perception,
    Social,
    Craft,
    Mental,
    /// Numeric weapon stats (type, force, severity, reach)
    WeaponProperty,
    ArmorProperty,
    /// Capacity and closure state of containers and exits
    ContainerProperty,
    /// Flags and counters (cursed, hidden, light sources, legacy quantity)
    Status,
    /// Which slots an item may be worn on
    Wearable,
}

impl SkillCategory {
    /// Added to the linked attribute when the skill itself is untrained
    pub const fn default_bump(&self) -> i32 {
        match self {
            SkillCategory::Combat => -1,
            SkillCategory::Social => -1,
            SkillCategory::Craft => -2,
            _ => 0,
        }
    }

    /// Properties describe the object; they are never rolled against
    pub const fn is_property(&self) -> bool {
        matches!(
            self,
            SkillCategory::WeaponProperty
                | SkillCategory::ArmorProperty
                | SkillCategory::ContainerProperty
                | SkillCategory::Status
                | SkillCategory::Wearable
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillId {
    // === COMBAT ===
    Punching,
    Kicking,
    Grappling,
    LongBlades,
    ShortBlades,
    TwoHandedBlades,
    LongCleaves,
    ShortCleaves,
    TwoHandedCleaves,
    LongCrushing,
    ShortCrushing,
    TwoHandedCrushing,
    LongPiercing,
    ShortPiercing,
    TwoHandedPiercing,
    Flails,
    TwoHandedFlails,
    Staves,
    Whips,
    Shields,
    Dodge,

    // === ATHLETIC ===
    Acrobatics,
    Climbing,
    Running,
    Swimming,
    Stealth,

    // === PERCEPTION ===
    Perception,
    Tracking,

    // === SOCIAL ===
    Leadership,
    Negotiation,
    Intimidation,

    // === CRAFT ===
    Lockpicking,
    Blacksmithing,
    Carpentry,
    Tailoring,
    FirstAid,

    // === MENTAL ===
    Concentration,

    // === WEAPON PROPERTIES ===
    WeaponType,
    WeaponForce,
    WeaponSeverity,
    WeaponReach,

    // === ARMOR ===
    Armor,

    // === CONTAINERS AND EXITS ===
    /// Volume the object can hold
    Container,
    /// Weight the object can hold
    Capacity,
    /// Largest single item that fits through the opening
    MaxSize,
    Closeable,
    Open,
    Locked,
    /// Lock number; a key with the same `Key` number opens it
    Lock,
    Key,
    Transparent,
    /// Can be entered by a whole character (rooms, vehicles)
    Enterable,

    // === STATUS ===
    Fixed,
    Cursed,
    Hidden,
    LightSource,
    Dark,
    DarkVision,
    HeatVision,
    /// Stack size in saves written before quantity had its own field
    Quantity,

    /// Group number for wearing on the given WEAR_* slot
    WearableOn(Act),
}

const BASE_SKILLS: [SkillId; 60] = [
    SkillId::Punching,
    SkillId::Kicking,
    SkillId::Grappling,
    SkillId::LongBlades,
    SkillId::ShortBlades,
    SkillId::TwoHandedBlades,
    SkillId::LongCleaves,
    SkillId::ShortCleaves,
    SkillId::TwoHandedCleaves,
    SkillId::LongCrushing,
    SkillId::ShortCrushing,
    SkillId::TwoHandedCrushing,
    SkillId::LongPiercing,
    SkillId::ShortPiercing,
    SkillId::TwoHandedPiercing,
    SkillId::Flails,
    SkillId::TwoHandedFlails,
    SkillId::Staves,
    SkillId::Whips,
    SkillId::Shields,
    SkillId::Dodge,
    SkillId::Acrobatics,
    SkillId::Climbing,
    SkillId::Running,
    SkillId::Swimming,
    SkillId::Stealth,
    SkillId::Perception,
    SkillId::Tracking,
    SkillId::Leadership,
    SkillId::Negotiation,
    SkillId::Intimidation,
    SkillId::Lockpicking,
    SkillId::Blacksmithing,
    SkillId::Carpentry,
    SkillId::Tailoring,
    SkillId::FirstAid,
    SkillId::Concentration,
    SkillId::WeaponType,
    SkillId::WeaponForce,
    SkillId::WeaponSeverity,
    SkillId::WeaponReach,
    SkillId::Armor,
    SkillId::Container,
    SkillId::Capacity,
    SkillId::MaxSize,
    SkillId::Closeable,
    SkillId::Open,
    SkillId::Locked,
    SkillId::Lock,
    SkillId::Key,
    SkillId::Transparent,
    SkillId::Enterable,
    SkillId::Fixed,
    SkillId::Cursed,
    SkillId::Hidden,
    SkillId::LightSource,
    SkillId::Dark,
    SkillId::DarkVision,
    SkillId::HeatVision,
    SkillId::Quantity,
];

static ALL_SKILLS: OnceLock<Vec<SkillId>> = OnceLock::new();
static NAME_INDEX: OnceLock<AHashMap<String, SkillId>> = OnceLock::new();

impl SkillId {
    /// Every skill, base skills first, then one wearable skill per WEAR_* slot
    pub fn all() -> &'static [SkillId] {
        ALL_SKILLS.get_or_init(|| {
            let mut all = Vec::with_capacity(BASE_SKILLS.len() + Act::WEAR_SLOTS.len());
            all.extend(BASE_SKILLS);
            all.extend(Act::WEAR_SLOTS.iter().map(|&slot| SkillId::WearableOn(slot)));
            all
        })
    }

    /// Case-insensitive lookup by display name
    pub fn from_name(name: &str) -> Option<SkillId> {
        let index = NAME_INDEX.get_or_init(|| {
            SkillId::all()
                .iter()
                .map(|skill| (skill.name().to_ascii_lowercase(), *skill))
                .collect()
        });
        index.get(&name.trim().to_ascii_lowercase()).copied()
    }

    pub fn name(&self) -> std::borrow::Cow<'static, str> {
        use std::borrow::Cow;
        let name = match self {
            SkillId::Punching => "Punching",
            SkillId::Kicking => "Kicking",
            SkillId::Grappling => "Grappling",
            SkillId::LongBlades => "Long Blades",
            SkillId::ShortBlades => "Short Blades",
            SkillId::TwoHandedBlades => "Two-Handed Blades",
            SkillId::LongCleaves => "Long Cleaves",
            SkillId::ShortCleaves => "Short Cleaves",
            SkillId::TwoHandedCleaves => "Two-Handed Cleaves",
            SkillId::LongCrushing => "Long Crushing",
            SkillId::ShortCrushing => "Short Crushing",
            SkillId::TwoHandedCrushing => "Two-Handed Crushing",
            SkillId::LongPiercing => "Long Piercing",
            SkillId::ShortPiercing => "Short Piercing",
            SkillId::TwoHandedPiercing => "Two-Handed Piercing",
            SkillId::Flails => "Flails",
            SkillId::TwoHandedFlails => "Two-Handed Flails",
            SkillId::Staves => "Staves",
            SkillId::Whips => "Whips",
            SkillId::Shields => "Shields",
            SkillId::Dodge => "Dodge",
            SkillId::Acrobatics => "Acrobatics",
            SkillId::Climbing => "Climbing",
            SkillId::Running => "Running",
            SkillId::Swimming => "Swimming",
            SkillId::Stealth => "Stealth",
            SkillId::Perception => "Perception",
            SkillId::Tracking => "Tracking",
            SkillId::Leadership => "Leadership",
            SkillId::Negotiation => "Negotiation",
            SkillId::Intimidation => "Intimidation",
            SkillId::Lockpicking => "Lockpicking",
            SkillId::Blacksmithing => "Blacksmithing",
            SkillId::Carpentry => "Carpentry",
            SkillId::Tailoring => "Tailoring",
            SkillId::FirstAid => "First Aid",
            SkillId::Concentration => "Concentration",
            SkillId::WeaponType => "WeaponType",
            SkillId::WeaponForce => "WeaponForce",
            SkillId::WeaponSeverity => "WeaponSeverity",
            SkillId::WeaponReach => "WeaponReach",
            SkillId::Armor => "Armor",
            SkillId::Container => "Container",
            SkillId::Capacity => "Capacity",
            SkillId::MaxSize => "Max Size",
            SkillId::Closeable => "Closeable",
            SkillId::Open => "Open",
            SkillId::Locked => "Locked",
            SkillId::Lock => "Lock",
            SkillId::Key => "Key",
            SkillId::Transparent => "Transparent",
            SkillId::Enterable => "Enterable",
            SkillId::Fixed => "Fixed",
            SkillId::Cursed => "Cursed",
            SkillId::Hidden => "Hidden",
            SkillId::LightSource => "Light Source",
            SkillId::Dark => "Dark",
            SkillId::DarkVision => "Dark Vision",
            SkillId::HeatVision => "Heat Vision",
            SkillId::Quantity => "Quantity",
            SkillId::WearableOn(slot) => {
                return Cow::Owned(format!("Wearable on {}", slot.wear_label().unwrap_or("Nothing")))
            }
        };
        Cow::Borrowed(name)
    }

    pub const fn category(&self) -> SkillCategory {
        use SkillId::*;
        match self {
            Punching | Kicking | Grappling | LongBlades | ShortBlades | TwoHandedBlades
            | LongCleaves | ShortCleaves | TwoHandedCleaves | LongCrushing | ShortCrushing
            | TwoHandedCrushing | LongPiercing | ShortPiercing | TwoHandedPiercing | Flails
            | TwoHandedFlails | Staves | Whips | Shields | Dodge => SkillCategory::Combat,
            Acrobatics | Climbing | Running | Swimming | Stealth => SkillCategory::Athletic,
            Perception | Tracking => SkillCategory::Perception,
            Leadership | Negotiation | Intimidation => SkillCategory::Social,
            Lockpicking | Blacksmithing | Carpentry | Tailoring | FirstAid => SkillCategory::Craft,
            Concentration => SkillCategory::Mental,
            WeaponType | WeaponForce | WeaponSeverity | WeaponReach => {
                SkillCategory::WeaponProperty
            }
            Armor => SkillCategory::ArmorProperty,
            Container | Capacity | MaxSize | Closeable | Open | Locked | Lock | Key
            | Transparent | Enterable => SkillCategory::ContainerProperty,
            Fixed | Cursed | Hidden | LightSource | Dark | DarkVision | HeatVision | Quantity => {
                SkillCategory::Status
            }
            WearableOn(_) => SkillCategory::Wearable,
        }
    }

    /// Attribute an untrained character falls back on
    pub const fn linked_attribute(&self) -> Option<Attribute> {
        use SkillId::*;
        match self {
            Punching | Kicking | Grappling | TwoHandedBlades | LongCleaves | TwoHandedCleaves
            | LongCrushing | TwoHandedCrushing | TwoHandedPiercing | TwoHandedFlails | Shields
            | Climbing | Swimming | Blacksmithing => Some(Attribute::Strength),
            LongBlades | ShortBlades | ShortCleaves | ShortCrushing | LongPiercing
            | ShortPiercing | Flails | Staves | Whips | Dodge | Acrobatics | Stealth
            | Lockpicking | Tailoring => Some(Attribute::Quickness),
            Running => Some(Attribute::Body),
            Perception | Tracking | Carpentry | FirstAid => Some(Attribute::Intelligence),
            Leadership | Negotiation => Some(Attribute::Charisma),
            Intimidation | Concentration => Some(Attribute::Willpower),
            _ => None,
        }
    }
}

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
