//! Greedy action selection with a stall guard

use std::cmp::Ordering;

use super::{state::State, table::ValueTable};
use crate::game::Action;

/// Ticks without food after which the selector abstains once
pub const DEFAULT_STALL_LIMIT: u32 = 500;

/// What the agent hands back to the environment for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Act(Action),
    /// No heading change this tick
    Abstain,
}

impl Decision {
    pub fn action(self) -> Option<Action> {
        match self {
            Decision::Act(action) => Some(action),
            Decision::Abstain => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Decision::Act(action) => action.name(),
            Decision::Abstain => "abstain",
        }
    }
}

/// Rank actions by value, best first
///
/// The sort is stable over [`Action::ALL`], so equal values keep index order
/// and the lowest index wins a tie.
pub fn rank(values: [f64; 3]) -> [Action; 3] {
    let mut ranked = Action::ALL;
    ranked.sort_by(|a, b| {
        values[b.index()]
            .partial_cmp(&values[a.index()])
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// Picks the highest-valued action and guards against endless food-less loops
#[derive(Debug, Clone)]
pub struct ActionSelector {
    stall_limit: u32,
    ticks_without_food: u32,
}

impl ActionSelector {
    pub fn new(stall_limit: u32) -> Self {
        Self {
            stall_limit,
            ticks_without_food: 0,
        }
    }

    /// Choose the action for `state`
    ///
    /// Eating resets the stall counter, any other tick advances it. Once the
    /// counter passes the limit it is reset and the selector abstains.
    pub fn select(&mut self, table: &ValueTable, state: State, ate_food: bool) -> Decision {
        if ate_food {
            self.ticks_without_food = 0;
        } else {
            self.ticks_without_food += 1;
        }

        if self.ticks_without_food > self.stall_limit {
            self.ticks_without_food = 0;
            return Decision::Abstain;
        }

        Decision::Act(rank(table.action_values(state))[0])
    }

    /// Forget progress tracking, e.g. at episode start
    pub fn reset(&mut self) {
        self.ticks_without_food = 0;
    }

    pub fn ticks_without_food(&self) -> u32 {
        self.ticks_without_food
    }

    pub fn stall_limit(&self) -> u32 {
        self.stall_limit
    }
}

impl Default for ActionSelector {
    fn default() -> Self {
        Self::new(DEFAULT_STALL_LIMIT)
    }
}
