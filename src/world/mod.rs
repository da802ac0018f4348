//! The world: object storage plus every operation that touches more than
//! one object
//!
//! Containment, action-slot links, visibility, travel, stacks, damage,
//! timers and minds all live on `World` so the two ends of every
//! relationship are updated together.

pub mod busy;
pub mod containment;
pub mod equipment;
pub mod minds;
pub mod recycle;
pub mod search;
pub mod stack;
pub mod travel;
pub mod universe;
pub mod vitals;

pub use equipment::ActError;
pub use search::LocMask;
pub use travel::TravelError;
pub use universe::World;
