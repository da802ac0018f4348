//! World configuration with documented constants
//!
//! Tunables for dice resolution, damage pools and persistence live here.
//! The config is owned by the `World` rather than held in a global, so two
//! worlds in one process (a test harness and a replay, say) never share it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{MudError, Result};

/// What the loader does with an enum token it does not recognise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTokenPolicy {
    /// Default the value to NONE and log a warning
    #[default]
    Warn,
    /// Abort the load with `MudError::UnknownToken`
    Strict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // === RANDOMNESS ===
    /// Seed for the world dice stream
    ///
    /// Two worlds built with the same seed and fed the same operations
    /// produce identical rolls.
    pub rng_seed: u64,

    // === DICE ===
    /// Floor for any effective target number
    ///
    /// Opposed rolls derive the target from the other side's rating, which
    /// can be 0 or negative for an untrained opponent.
    pub min_target_number: i32,

    /// Target number used by unopposed checks when the caller has none
    pub base_target_number: i32,

    /// Stun/Phys levels at which the wound penalty steps up (1/3/6/10)
    ///
    /// Reaching the Nth threshold adds N to every target number.
    pub wound_tiers: [i32; 4],

    // === DAMAGE POOLS ===
    /// Stun boxes; reaching this knocks the object UNCONSCIOUS
    pub stun_limit: i32,

    /// Physical boxes; reaching this leaves the object DYING
    ///
    /// Reaching `phys_limit + Body` kills outright.
    pub phys_limit: i32,

    /// Structural boxes; reaching this destroys the object (DEAD)
    pub stru_limit: i32,

    // === COMBAT ===
    /// Force added when a weapon is gripped with both hands
    pub two_handed_bonus: i32,

    // === PERSISTENCE ===
    pub unknown_token_policy: UnknownTokenPolicy,

    /// Command replayed for an object whose busy deadline elapses with no
    /// explicit follow-up
    pub default_busy_command: String,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            rng_seed: 0x5eed_a11d,
            min_target_number: 2,
            base_target_number: 4,
            wound_tiers: [1, 3, 6, 10],
            stun_limit: 10,
            phys_limit: 10,
            stru_limit: 10,
            two_handed_bonus: 1,
            unknown_token_policy: UnknownTokenPolicy::Warn,
            default_busy_command: String::new(),
        }
    }
}

impl WorldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: WorldConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.min_target_number < 2 {
            return Err(MudError::InvalidConfig(format!(
                "min_target_number ({}) must be at least 2",
                self.min_target_number
            )));
        }

        if !self.wound_tiers.windows(2).all(|w| w[0] < w[1]) || self.wound_tiers[0] < 1 {
            return Err(MudError::InvalidConfig(format!(
                "wound_tiers {:?} must be positive and strictly increasing",
                self.wound_tiers
            )));
        }

        if self.stun_limit <= 0 || self.phys_limit <= 0 || self.stru_limit <= 0 {
            return Err(MudError::InvalidConfig("Damage pool limits must be positive".into()));
        }

        Ok(())
    }
}
