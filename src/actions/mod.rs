//! Action-slot state machine: equipment, intents and life states

pub mod act;
pub mod life;
pub mod slots;

pub use act::Act;
pub use life::{forced_state, phys_cap, LifeState};
pub use slots::ActSet;
