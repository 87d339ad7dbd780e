//! Simulated environment for the agent
//!
//! Board geometry, snake movement, food placement and collision detection.
//! Nothing here does I/O, so the loop can run headless or behind a TUI.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Heading};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use state::{CollisionType, GameState, Grid, Observation, Position, Snake};
