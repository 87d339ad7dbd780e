use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use q_snake::modes::{TrainConfig, TrainMode, WatchMode};
use q_snake::settings::Settings;
use std::{fs::File, path::PathBuf, sync::Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "q_snake")]
#[command(version, about = "Snake driven by an online tabular Q-learning agent")]
struct Cli {
    /// Run mode
    #[arg(long, default_value = "watch")]
    mode: Mode,

    /// JSON settings file; command-line values take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Learning rate in [0, 1]
    #[arg(long)]
    alpha: Option<f64>,

    /// Discount factor in [0, 1]
    #[arg(long)]
    gamma: Option<f64>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Simulation ticks per second (watch mode)
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Number of episodes to train
    #[arg(long, default_value = "1000")]
    episodes: usize,

    /// Per-episode tick cap in train mode, 0 for none
    #[arg(long, default_value = "10000")]
    max_ticks: u32,

    /// Log training progress every N episodes
    #[arg(long, default_value = "100")]
    log_every: usize,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (watch mode logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Watch the agent learn in a terminal UI
    Watch,
    /// Train headless and log progress
    Train,
}

impl Cli {
    /// Load the settings file, then apply command-line overrides
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        if let Some(alpha) = self.alpha {
            settings.agent.alpha = alpha;
        }
        if let Some(gamma) = self.gamma {
            settings.agent.gamma = gamma;
        }
        if let Some(width) = self.width {
            settings.game.grid_width = width;
        }
        if let Some(height) = self.height {
            settings.game.grid_height = height;
        }
        if let Some(tick_rate) = self.tick_rate {
            settings.game.ticks_per_second = tick_rate;
        }

        settings.validate().context("Invalid settings")?;
        Ok(settings)
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (&cli.log_file, cli.mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (None, Mode::Train) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        // The terminal belongs to the UI
        (None, Mode::Watch) => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;
    let settings = cli.settings()?;

    match cli.mode {
        Mode::Watch => {
            let mut watch_mode = WatchMode::new(&settings, cli.seed);
            watch_mode.run().await?;
        }
        Mode::Train => {
            let config = TrainConfig {
                num_episodes: cli.episodes,
                max_ticks: (cli.max_ticks > 0).then_some(cli.max_ticks),
                log_frequency: cli.log_every,
                seed: cli.seed,
                settings,
            };
            let mut train_mode = TrainMode::new(config);
            let stats = train_mode.run();
            info!(best = stats.best_score(), "done");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["q_snake"]);
        assert!(cli.mode == Mode::Watch);
        assert_eq!(cli.episodes, 1000);
        assert_eq!(cli.settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "agent": {{ "alpha": 0.6, "gamma": 0.3 }} }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::parse_from([
            "q_snake", "--config", path.as_str(), "--alpha", "0.4", "--width", "12",
        ]);
        let settings = cli.settings().unwrap();

        assert_eq!(settings.agent.alpha, 0.4);
        assert_eq!(settings.agent.gamma, 0.3);
        assert_eq!(settings.game.grid_width, 12);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let cli = Cli::parse_from(["q_snake", "--mode", "train", "--gamma", "1.5"]);
        assert!(cli.mode == Mode::Train);

        let err = cli.settings().unwrap_err();
        assert!(format!("{err:#}").contains("gamma"));
    }
}
