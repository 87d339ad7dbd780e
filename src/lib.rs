//! Q Snake - Snake played by an online tabular Q-learning agent
//!
//! This library provides:
//! - The simulated environment (game module)
//! - The learning agent: state encoding, value table, reward, selection (agent module)
//! - The tick-driven learning loop (simulation module)
//! - Settings, TUI rendering, input and the watch/train modes

pub mod agent;
pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod settings;
pub mod simulation;
