//! Shaped reward for one resolved action

use super::{encoder::encode, state::State};
use crate::game::{Action, Observation};

/// Reward for moving toward a direction that was flagged blocked
pub const BLOCKED_PENALTY: f64 = -1.0;

/// Reward for moving toward a clear direction known to hold food
pub const FOOD_BONUS: f64 = 1.0;

/// Outcome of rewarding a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub reward: f64,
    /// State re-encoded after the environment resolved the action
    pub next_state: State,
}

/// Reward `action` taken from `before`, re-encoding the board as it is now
pub fn assess(before: State, action: Action, obs: &Observation<'_>) -> Assessment {
    let next_state = encode(obs);
    Assessment {
        reward: reward(before, action, next_state),
        next_state,
    }
}

/// Reward for a transition between two encoded states
///
/// Unchanged perception earns nothing. Otherwise the penalty and the bonus
/// are evaluated independently and summed.
pub fn reward(before: State, action: Action, after: State) -> f64 {
    if before == after {
        return 0.0;
    }

    let mut total = 0.0;
    if !before.is_clear(action) {
        total += BLOCKED_PENALTY;
    }
    if before.is_clear(action) && before.food_toward(action) {
        total += FOOD_BONUS;
    }
    total
}
