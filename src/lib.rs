//! Arc MUD - simulation core for a persistent multiplayer text world
//!
//! Everything lives in one `World`: a generational arena of `GameObject`s
//! rooted at the Universe, with dice, action slots, containment, travel,
//! combat and save files layered on top.

pub mod actions;
pub mod combat;
pub mod core;
pub mod entity;
pub mod mind;
pub mod persist;
pub mod skills;
pub mod world;
