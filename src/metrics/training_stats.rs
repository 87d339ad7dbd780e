//! Training statistics tracking
//!
//! Rolling windows over recent episodes, used for the periodic progress lines
//! of headless training.

use std::collections::VecDeque;

/// Training statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use q_snake::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
/// stats.record_episode(4.0, 150, 5, 0);
///
/// assert_eq!(stats.total_episodes(), 1);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Summed shaped reward per episode (rolling window)
    episode_rewards: VecDeque<f64>,

    /// Episode lengths in ticks (rolling window)
    episode_lengths: VecDeque<usize>,

    /// Episode scores (food eaten) (rolling window)
    episode_scores: VecDeque<u32>,

    /// Stall-guard abstentions per episode (rolling window)
    abstentions: VecDeque<u32>,

    /// Total number of episodes completed
    total_episodes: usize,

    /// Total number of ticks taken
    total_steps: usize,

    /// Highest score seen
    best_score: u32,

    /// Window size for rolling averages
    window_size: usize,
}

impl TrainingStats {
    /// Create a tracker keeping the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            abstentions: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            best_score: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    pub fn record_episode(&mut self, reward: f64, length: usize, score: u32, abstentions: u32) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_scores, score, self.window_size);
        Self::push_deque(&mut self.abstentions, abstentions, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
        self.best_score = self.best_score.max(score);
    }

    pub fn mean_episode_reward(&self) -> f64 {
        if self.episode_rewards.is_empty() {
            0.0
        } else {
            self.episode_rewards.iter().sum::<f64>() / self.episode_rewards.len() as f64
        }
    }

    pub fn mean_episode_length(&self) -> f64 {
        Self::mean(self.episode_lengths.iter().map(|&v| v as f64), self.episode_lengths.len())
    }

    pub fn mean_episode_score(&self) -> f64 {
        Self::mean(self.episode_scores.iter().map(|&v| v as f64), self.episode_scores.len())
    }

    pub fn mean_abstentions(&self) -> f64 {
        Self::mean(self.abstentions.iter().map(|&v| v as f64), self.abstentions.len())
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// One-line summary of the current statistics
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Best: {} | Score: {:.2} | Reward: {:.2} | Len: {:.1} | Abstain: {:.2}",
            self.total_episodes,
            self.total_steps,
            self.best_score,
            self.mean_episode_score(),
            self.mean_episode_reward(),
            self.mean_episode_length(),
            self.mean_abstentions(),
        )
    }

    fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            values.sum::<f64>() / count as f64
        }
    }

    /// Helper function to push to a deque with size limit
    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
