//! The online learner: one value-table update and one selection per tick
//!
//! [`QAgent`] remembers the state and action chosen on the previous tick. The
//! next call to [`QAgent::learn`] scores that transition against the new
//! board, and [`QAgent::decide`] picks the action for the coming move.

use tracing::debug;

use super::{
    config::AgentConfig,
    encoder::encode,
    reward::assess,
    selector::{ActionSelector, Decision},
    state::State,
    table::ValueTable,
};
use crate::game::{Action, Observation};

/// The action the agent committed to on the previous tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: State,
    pub action: Action,
}

/// What one learning step did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Learned {
    /// Reward credited to the previous transition, if there was one
    pub reward: Option<f64>,
    /// Current perception
    pub state: State,
}

/// Online tabular Q-learning agent
///
/// Owns the value table, which survives episode boundaries. Alpha and gamma
/// are plain values here; range checks belong to [`AgentConfig::validate`].
#[derive(Debug, Clone)]
pub struct QAgent {
    table: ValueTable,
    selector: ActionSelector,
    alpha: f64,
    gamma: f64,
    current: State,
    pending: Option<Transition>,
    last_decision: Option<Decision>,
}

impl QAgent {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            table: ValueTable::with_decay(config.decay),
            selector: ActionSelector::new(config.stall_limit),
            alpha: config.alpha,
            gamma: config.gamma,
            current: State::INITIAL,
            pending: None,
            last_decision: None,
        }
    }

    /// Prepare for a fresh episode
    ///
    /// Drops the pending transition and the stall counter; learned values stay.
    pub fn begin_episode(&mut self) {
        self.selector.reset();
        self.pending = None;
        self.last_decision = None;
        self.current = State::INITIAL;
    }

    /// Credit the previous action and refresh the current state
    ///
    /// Call after the environment has moved, including on the tick that ends
    /// the episode, so the move that caused a collision is still rewarded.
    pub fn learn(&mut self, obs: &Observation<'_>) -> Learned {
        match self.pending.take() {
            Some(transition) => {
                let assessment = assess(transition.state, transition.action, obs);
                self.table.td_update(
                    transition.state,
                    transition.action,
                    assessment.reward,
                    assessment.next_state,
                    self.alpha,
                    self.gamma,
                );
                self.current = assessment.next_state;
                Learned {
                    reward: Some(assessment.reward),
                    state: self.current,
                }
            }
            None => {
                self.current = encode(obs);
                Learned {
                    reward: None,
                    state: self.current,
                }
            }
        }
    }

    /// Select the next action for the current state
    ///
    /// An abstention leaves the heading unchanged, so it is learned as `Continue`.
    pub fn decide(&mut self, ate_food: bool) -> Decision {
        let decision = self.selector.select(&self.table, self.current, ate_food);
        if decision == Decision::Abstain {
            debug!(state = %self.current, "stall guard fired, abstaining");
        }

        self.pending = Some(Transition {
            state: self.current,
            action: decision.action().unwrap_or(Action::Continue),
        });
        self.last_decision = Some(decision);
        decision
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Takes effect from the next update
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Takes effect from the next update
    pub fn set_gamma(&mut self, gamma: f64) {
        self.gamma = gamma;
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn current_state(&self) -> State {
        self.current
    }

    pub fn pending(&self) -> Option<Transition> {
        self.pending
    }

    pub fn last_decision(&self) -> Option<Decision> {
        self.last_decision
    }

    pub fn ticks_without_food(&self) -> u32 {
        self.selector.ticks_without_food()
    }

    pub fn stall_limit(&self) -> u32 {
        self.selector.stall_limit()
    }
}
