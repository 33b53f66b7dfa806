//! Tunables for the actor and its actions.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_FOG_CLEAR_RADIUS: i32 = 2;
pub const DEFAULT_MAX_PATH_FAILURES: u32 = 5;
pub const DEFAULT_MAX_DENYLIST_RESETS: u32 = 3;
pub const DEFAULT_LEVEL_STEP: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActorConfig {
    /// Square radius of fog cleared around the hero after each move inside the arena.
    /// Zero clears only the tile the hero stands on.
    pub fog_clear_radius: i32,
    /// Consecutive failed path computations before a move falls back to teleporting.
    pub max_path_failures: u32,
    /// Denylist resets without a successful arrival before exploration teleports.
    pub max_denylist_resets: u32,
    /// Difficulty added to the current level when the goal object is activated.
    pub level_step: u32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            fog_clear_radius: DEFAULT_FOG_CLEAR_RADIUS,
            max_path_failures: DEFAULT_MAX_PATH_FAILURES,
            max_denylist_resets: DEFAULT_MAX_DENYLIST_RESETS,
            level_step: DEFAULT_LEVEL_STEP,
        }
    }
}

impl ActorConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fog_clear_radius < 0 {
            return Err(ConfigError::Negative { field: "fog_clear_radius" });
        }
        if self.max_path_failures == 0 {
            return Err(ConfigError::Zero { field: "max_path_failures" });
        }
        if self.level_step == 0 {
            return Err(ConfigError::Zero { field: "level_step" });
        }
        Ok(())
    }
}
