//! Entity store: the object record and its storage

pub mod arena;
pub mod attributes;
pub mod damage;
pub mod object;
pub mod position;

pub use arena::Arena;
pub use attributes::{Attribute, Attributes};
pub use damage::{penalty_tier, DamageKind, DamagePools};
pub use object::{GameObject, PositionError};
pub use position::{Gender, Position};
