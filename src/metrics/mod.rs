pub mod scoreboard;
pub mod training_stats;

pub use scoreboard::Scoreboard;
pub use training_stats::TrainingStats;
