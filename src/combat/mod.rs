//! Melee combat built on the opposed skill roll

pub mod armor;
pub mod body_zone;
pub mod constants;
pub mod resolution;
pub mod weapons;
pub mod wounds;

pub use armor::{armor_at, mitigate};
pub use body_zone::HitLocation;
pub use resolution::{defense_skill, resolve_exchange, CombatError, ExchangeResult};
pub use weapons::{WeaponProfile, WeaponType};
pub use wounds::{damage_stage, stage_boxes, Wound};
