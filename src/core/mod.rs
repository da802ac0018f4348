pub mod config;
pub mod error;
pub mod types;

pub use config::{UnknownTokenPolicy, WorldConfig};
pub use error::{MudError, Result};
pub use types::{MindId, ObjectId, Tick};
