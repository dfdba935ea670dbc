use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Validate;

pub const SCORE_PER_FOOD: u32 = 10;
pub const INITIAL_SNAKE_LENGTH: usize = 3;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct GameSettings {
    pub grid_size: u32,
    pub tick_interval_ms: u32,
}

impl GameSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms as u64)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_size: 20,
            tick_interval_ms: 150,
        }
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.grid_size < 10 || self.grid_size > 50 {
            return Err("grid_size must be between 10 and 50".to_string());
        }
        if self.tick_interval_ms < 50 {
            return Err("tick_interval_ms must be at least 50".to_string());
        }
        if self.tick_interval_ms > 500 {
            return Err("tick_interval_ms must not exceed 500".to_string());
        }
        Ok(())
    }
}

/// Descriptive label for a tick interval, shown next to the speed slider.
pub fn speed_label(interval_ms: u32) -> &'static str {
    if interval_ms <= 70 {
        "Very Fast"
    } else if interval_ms <= 100 {
        "Fast"
    } else if interval_ms <= 150 {
        "Normal"
    } else if interval_ms <= 200 {
        "Slow"
    } else {
        "Very Slow"
    }
}
