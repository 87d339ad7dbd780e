//! Interactive mode: watch the agent learn in the terminal
//!
//! # Controls
//!
//! - Arrow keys: steer the snake (reversing is refused)
//! - +/-: double or halve the tick rate
//! - a/A: raise or lower alpha
//! - g/G: raise or lower gamma
//! - Space/P: pause
//! - R: restart the episode (the value table is kept)
//! - Q/Esc: quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};
use tracing::{debug, info, warn};

use crate::game::config::tick_interval;
use crate::input::{InputHandler, KeyAction};
use crate::render::{Renderer, Status};
use crate::settings::Settings;
use crate::simulation::{Simulation, TickOutcome};

/// Amount one key press moves alpha or gamma
pub const PARAMETER_STEP: f64 = 0.05;

pub const MIN_TICK_RATE: u32 = 1;
pub const MAX_TICK_RATE: u32 = 1000;

/// Render at 30 FPS
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct WatchMode {
    sim: Simulation,
    renderer: Renderer,
    input_handler: InputHandler,
    ticks_per_second: u32,
    paused: bool,
    should_quit: bool,
    /// Set when the tick timer has to be rebuilt for a new rate
    rate_changed: bool,
}

impl WatchMode {
    pub fn new(settings: &Settings, seed: Option<u64>) -> Self {
        Self {
            sim: Simulation::new(settings.game.clone(), &settings.agent, seed),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            ticks_per_second: settings.game.ticks_per_second,
            paused: false,
            should_quit: false,
            rate_changed: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(ticks_per_second = self.ticks_per_second, "watch mode started");

        // Run loop with cleanup
        let result = self.run_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            episodes = self.sim.scoreboard().episodes,
            best = self.sim.scoreboard().best_score,
            "watch mode finished"
        );

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = new_tick_timer(self.ticks_per_second);
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Simulation tick
                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.tick();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.sim.update_clock();
                    let status = self.status();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.sim, &status);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            // Cancel the pending tick and reschedule at the new period
            if self.rate_changed {
                tick_timer = new_tick_timer(self.ticks_per_second);
                self.rate_changed = false;
            }
        }

        Ok(())
    }

    fn tick(&mut self) {
        if let TickOutcome::EpisodeEnded(summary) = self.sim.tick() {
            info!(
                episode = summary.episode,
                score = summary.score,
                ticks = summary.ticks,
                "episode over"
            );
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            self.apply(self.input_handler.handle_key_event(key));
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(heading) => {
                if !self.sim.steer_manually(heading) {
                    debug!(?heading, "steering request ignored");
                }
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::TogglePause => self.paused = !self.paused,
            KeyAction::Restart => self.sim.restart(),
            KeyAction::SpeedUp => self.set_tick_rate(self.ticks_per_second.saturating_mul(2)),
            KeyAction::SlowDown => self.set_tick_rate(self.ticks_per_second / 2),
            KeyAction::AlphaUp => self.adjust_alpha(PARAMETER_STEP),
            KeyAction::AlphaDown => self.adjust_alpha(-PARAMETER_STEP),
            KeyAction::GammaUp => self.adjust_gamma(PARAMETER_STEP),
            KeyAction::GammaDown => self.adjust_gamma(-PARAMETER_STEP),
            KeyAction::None => {}
        }
    }

    fn set_tick_rate(&mut self, requested: u32) {
        let rate = clamp_tick_rate(requested);
        if rate != requested {
            warn!(requested, applied = rate, "tick rate out of range");
        }
        if rate != self.ticks_per_second {
            self.ticks_per_second = rate;
            self.rate_changed = true;
        }
    }

    fn adjust_alpha(&mut self, delta: f64) {
        let alpha = stepped_parameter("alpha", self.sim.agent().alpha(), delta);
        self.sim.set_alpha(alpha);
    }

    fn adjust_gamma(&mut self, delta: f64) {
        let gamma = stepped_parameter("gamma", self.sim.agent().gamma(), delta);
        self.sim.set_gamma(gamma);
    }

    fn status(&self) -> Status {
        Status {
            ticks_per_second: self.ticks_per_second,
            paused: self.paused,
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Timer whose first tick is one full period away
fn new_tick_timer(ticks_per_second: u32) -> Interval {
    let period = tick_interval(ticks_per_second);
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    timer
}

pub fn clamp_tick_rate(ticks_per_second: u32) -> u32 {
    ticks_per_second.clamp(MIN_TICK_RATE, MAX_TICK_RATE)
}

/// Move a unit-range parameter by `delta`, staying inside [0, 1]
pub fn stepped_parameter(name: &str, current: f64, delta: f64) -> f64 {
    let requested = current + delta;
    let applied = requested.clamp(0.0, 1.0);
    if (applied - requested).abs() > f64::EPSILON {
        warn!(parameter = name, requested, applied, "parameter clamped to [0, 1]");
    }
    // Drop float noise left by repeated steps
    (applied * 100.0).round() / 100.0
}
