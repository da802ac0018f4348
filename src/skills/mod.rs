//! Skill and attribute engine
//!
//! A sparse named-value table per object, a fallback from untrained skills to
//! their linked attribute, and the exploding-dice roll that every contested
//! check in the world is built on.

pub mod dice;
pub mod resolution;
pub mod set;
pub mod skill_id;

pub use dice::{count_successes, roll_die};
pub use set::SkillSet;
pub use skill_id::{SkillCategory, SkillId};
