use std::time::{Duration, Instant};

/// Score counters that persist across episodes
#[derive(Debug, Clone)]
pub struct Scoreboard {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub average_score: f64,
    pub episodes: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            average_score: 0.0,
            episodes: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Fold a finished episode into the counters
    pub fn on_game_over(&mut self, final_score: u32) {
        self.episodes += 1;
        self.best_score = self.best_score.max(final_score);
        self.average_score += (final_score as f64 - self.average_score) / self.episodes as f64;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}
