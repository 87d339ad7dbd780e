//! Headless training mode
//!
//! Runs the learning loop as fast as possible without a terminal UI and
//! reports progress through `tracing`.
//!
//! # Example
//!
//! ```rust
//! use q_snake::modes::{TrainConfig, TrainMode};
//!
//! let mut config = TrainConfig::new(5);
//! config.max_ticks = Some(200);
//! config.seed = Some(42);
//!
//! let mut train_mode = TrainMode::new(config);
//! let stats = train_mode.run();
//! assert_eq!(stats.total_episodes(), 5);
//! ```

use tracing::{debug, info};

use crate::metrics::TrainingStats;
use crate::settings::Settings;
use crate::simulation::{EpisodeSummary, Simulation, TickOutcome};

/// Configuration for training mode
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Number of episodes to train
    pub num_episodes: usize,

    /// Cut an episode short after this many ticks
    ///
    /// A looping agent with no food in reach can otherwise run forever.
    pub max_ticks: Option<u32>,

    /// Log training progress every N episodes
    pub log_frequency: usize,

    /// Seed for food placement
    pub seed: Option<u64>,

    /// Game and agent configuration
    pub settings: Settings,
}

impl TrainConfig {
    /// Create a training configuration with defaults
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            max_ticks: Some(10_000),
            log_frequency: 100,
            seed: None,
            settings: Settings::default(),
        }
    }
}

/// Training mode for the Q-learning agent
pub struct TrainMode {
    /// Environment and agent
    sim: Simulation,

    /// Training statistics tracker
    stats: TrainingStats,

    /// Training configuration
    config: TrainConfig,
}

impl TrainMode {
    pub fn new(config: TrainConfig) -> Self {
        let sim = Simulation::new(
            config.settings.game.clone(),
            &config.settings.agent,
            config.seed,
        );

        // 100-episode rolling window
        let stats = TrainingStats::new(100);

        Self { sim, stats, config }
    }

    /// Run every configured episode and return the final statistics
    pub fn run(&mut self) -> &TrainingStats {
        self.log_header();

        for episode in 0..self.config.num_episodes {
            let summary = self.run_episode();
            self.stats.record_episode(
                summary.reward,
                summary.ticks as usize,
                summary.score,
                summary.abstentions,
            );

            if self.config.log_frequency > 0 && (episode + 1) % self.config.log_frequency == 0 {
                info!(
                    "[Episode {}/{}] {}",
                    episode + 1,
                    self.config.num_episodes,
                    self.stats.format_summary()
                );
            }
        }

        let table = self.sim.agent().table();
        for (state, action, value) in table.entries() {
            debug!(%state, action = action.name(), value, "learned value");
        }

        info!(
            table_entries = table.len(),
            average_score = self.sim.scoreboard().average_score,
            "training complete"
        );
        info!("{}", self.stats.format_summary());

        &self.stats
    }

    /// Play one episode to its end or to the tick cap
    fn run_episode(&mut self) -> EpisodeSummary {
        loop {
            if let TickOutcome::EpisodeEnded(summary) = self.sim.tick() {
                return summary;
            }

            if let Some(limit) = self.config.max_ticks {
                if self.sim.state().steps >= limit {
                    if let Some(summary) = self.sim.end_episode() {
                        debug!(episode = summary.episode, limit, "episode hit tick cap");
                        return summary;
                    }
                }
            }
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    fn log_header(&self) {
        let game = &self.config.settings.game;
        let agent = &self.config.settings.agent;
        info!(
            episodes = self.config.num_episodes,
            grid = %format!("{}x{}", game.grid_width, game.grid_height),
            alpha = agent.alpha,
            gamma = agent.gamma,
            decay = agent.decay,
            stall_limit = agent.stall_limit,
            max_ticks = ?self.config.max_ticks,
            "starting Q-learning training"
        );
    }
}
