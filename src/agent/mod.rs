//! Online tabular Q-learning agent
//!
//! Provides:
//! - Six-flag state encoding relative to the snake's heading
//! - Sparse value table with a temporal-difference update rule
//! - Shaped reward for each resolved action
//! - Greedy action selection with deterministic tie-breaking and a stall guard

pub mod config;
pub mod encoder;
pub mod learner;
pub mod reward;
pub mod selector;
pub mod state;
pub mod table;

pub use config::AgentConfig;
pub use encoder::encode;
pub use learner::{Learned, QAgent, Transition};
pub use reward::{Assessment, assess, reward};
pub use selector::{ActionSelector, Decision, rank};
pub use state::{Feature, State};
pub use table::{TableKey, ValueTable};
