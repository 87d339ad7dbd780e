//! The tick-driven learning loop
//!
//! [`Simulation`] owns everything one run needs: the environment, the
//! learning agent and the cross-episode scoreboard. Each call to
//! [`Simulation::tick`] performs one full cycle: move, reward and update,
//! re-encode, select, steer.

use tracing::debug;

use crate::{
    agent::{AgentConfig, Decision, QAgent},
    game::{CollisionType, GameConfig, GameEngine, GameState, Heading},
    metrics::Scoreboard,
};

/// Where the loop is in the episode lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No episode has been played yet
    Idle,
    Running,
    /// The last episode is over and scored; the next tick starts a new one
    Terminated,
}

/// Totals for one finished episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    /// 1-based episode number
    pub episode: u32,
    pub score: u32,
    pub ticks: u32,
    /// Sum of shaped rewards credited during the episode
    pub reward: f64,
    pub abstentions: u32,
    /// `None` when the episode was cut short or the board filled up
    pub collision: Option<CollisionType>,
}

/// What a single tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Moved {
        ate_food: bool,
        reward: Option<f64>,
        decision: Decision,
    },
    EpisodeEnded(EpisodeSummary),
}

/// Explicit context for the learning loop
pub struct Simulation {
    engine: GameEngine,
    state: GameState,
    agent: QAgent,
    scoreboard: Scoreboard,
    phase: Phase,
    episode_reward: f64,
    episode_abstentions: u32,
}

impl Simulation {
    /// Build a simulation; `seed` makes food placement reproducible
    pub fn new(game: GameConfig, agent: &AgentConfig, seed: Option<u64>) -> Self {
        let engine = match seed {
            Some(seed) => GameEngine::with_seed(game, seed),
            None => GameEngine::new(game),
        };
        Self::with_engine(engine, agent)
    }

    pub fn with_engine(mut engine: GameEngine, agent: &AgentConfig) -> Self {
        let state = engine.reset();
        Self {
            engine,
            state,
            agent: QAgent::new(agent),
            scoreboard: Scoreboard::new(),
            phase: Phase::Idle,
            episode_reward: 0.0,
            episode_abstentions: 0,
        }
    }

    /// Reset the board and the agent's per-episode bookkeeping
    ///
    /// The value table is kept.
    pub fn start_episode(&mut self) {
        self.state = self.engine.reset();
        self.agent.begin_episode();
        self.scoreboard.on_game_start();
        self.episode_reward = 0.0;
        self.episode_abstentions = 0;
        self.phase = Phase::Running;
    }

    /// Advance one tick, starting a new episode first if none is running
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            self.start_episode();
        }

        let result = self.engine.step(&mut self.state);

        let learned = self.agent.learn(&self.state.observation());
        if let Some(reward) = learned.reward {
            self.episode_reward += reward;
        }

        if result.terminated {
            return TickOutcome::EpisodeEnded(self.finish_episode(result.info.collision_type));
        }

        let decision = self.agent.decide(result.info.ate_food);
        if decision == Decision::Abstain {
            self.episode_abstentions += 1;
        }
        self.engine.steer(&mut self.state, decision.action());

        TickOutcome::Moved {
            ate_food: result.info.ate_food,
            reward: learned.reward,
            decision,
        }
    }

    /// Cut the running episode short, e.g. on a tick cap
    ///
    /// Returns `None` if no episode is running.
    pub fn end_episode(&mut self) -> Option<EpisodeSummary> {
        if self.phase != Phase::Running {
            return None;
        }
        self.state.is_alive = false;
        Some(self.finish_episode(None))
    }

    /// Point the snake in an absolute direction between ticks
    ///
    /// The agent keeps its pending transition, so the next update credits the
    /// move to the action it selected. Returns `false` when no episode is
    /// running or the request would reverse the snake.
    pub fn steer_manually(&mut self, heading: Heading) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.engine.steer_to(&mut self.state, heading)
    }

    /// Abandon the current episode without scoring it and start over
    pub fn restart(&mut self) {
        self.start_episode();
    }

    fn finish_episode(&mut self, collision: Option<CollisionType>) -> EpisodeSummary {
        self.scoreboard.update();
        self.scoreboard.on_game_over(self.state.score);

        let summary = EpisodeSummary {
            episode: self.scoreboard.episodes,
            score: self.state.score,
            ticks: self.state.steps,
            reward: self.episode_reward,
            abstentions: self.episode_abstentions,
            collision,
        };
        debug!(
            episode = summary.episode,
            score = summary.score,
            ticks = summary.ticks,
            reward = summary.reward,
            collision = ?summary.collision,
            "episode finished"
        );

        self.phase = Phase::Terminated;
        summary
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn agent(&self) -> &QAgent {
        &self.agent
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Refresh the elapsed-time counter for display
    pub fn update_clock(&mut self) {
        if self.phase == Phase::Running {
            self.scoreboard.update();
        }
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.agent.set_alpha(alpha);
    }

    pub fn set_gamma(&mut self, gamma: f64) {
        self.agent.set_gamma(gamma);
    }
}
