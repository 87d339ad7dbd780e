//! Learning hyperparameter configuration

use serde::{Deserialize, Serialize};

use super::{selector::DEFAULT_STALL_LIMIT, table::DEFAULT_DECAY};
use crate::error::ConfigError;

/// Configuration for the Q-learning agent
///
/// # Example
///
/// ```rust
/// use q_snake::agent::AgentConfig;
///
/// let config = AgentConfig {
///     alpha: 0.5,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Learning rate
    ///
    /// Default: 0.2
    pub alpha: f64,

    /// Discount factor for the best next-state value
    ///
    /// Default: 0.1
    pub gamma: f64,

    /// Bias subtracted from every table update
    ///
    /// Default: 0.0001
    pub decay: f64,

    /// Consecutive food-less ticks tolerated before the selector abstains
    ///
    /// Default: 500
    pub stall_limit: u32,
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every parameter is in its valid range
    ///
    /// The agent itself accepts any value; this is the gate for values coming
    /// from files and the command line.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_range("alpha", self.alpha)?;
        unit_range("gamma", self.gamma)?;

        if !self.decay.is_finite() || self.decay < 0.0 {
            return Err(ConfigError::Negative {
                name: "decay",
                value: self.decay,
            });
        }

        if self.stall_limit == 0 {
            return Err(ConfigError::Zero("stall_limit"));
        }

        Ok(())
    }
}

fn unit_range(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            gamma: 0.1,
            decay: DEFAULT_DECAY,
            stall_limit: DEFAULT_STALL_LIMIT,
        }
    }
}
