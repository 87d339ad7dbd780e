use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::agent::{Decision, Feature, QAgent};
use crate::game::GameState;
use crate::metrics::Scoreboard;
use crate::simulation::Simulation;

/// Watch-mode settings that live outside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub ticks_per_second: u32,
    pub paused: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, sim: &Simulation, status: &Status) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board and agent panel
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(sim.state(), sim.scoreboard());
        frame.render_widget(stats, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(32)])
            .split(chunks[1]);

        if sim.state().is_alive {
            frame.render_widget(self.render_grid(sim.state(), status), body[0]);
        } else {
            frame.render_widget(self.render_episode_over(sim.state()), body[0]);
        }

        frame.render_widget(self.render_agent(sim.agent(), status), body[1]);

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState, status: &Status) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for row in 0..state.grid.rows {
            let mut spans = Vec::new();

            for column in 0..state.grid.columns {
                let pos = state.grid.cell(column, row);

                let cell = if pos == state.snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == state.food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = if status.paused { " Snake (paused) " } else { " Snake " };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, scoreboard: &Scoreboard) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(scoreboard.best_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Avg: ", label),
            Span::styled(format!("{:.2}", scoreboard.average_score), value),
            Span::raw("    "),
            Span::styled("Episode: ", label),
            Span::styled((scoreboard.episodes + 1).to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(scoreboard.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_agent(&self, agent: &QAgent, status: &Status) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);
        let state = agent.current_state();

        let mut text = vec![
            Line::from(vec![
                Span::styled("alpha  ", label),
                Span::styled(format!("{:.2}", agent.alpha()), value),
            ]),
            Line::from(vec![
                Span::styled("gamma  ", label),
                Span::styled(format!("{:.2}", agent.gamma()), value),
            ]),
            Line::from(vec![
                Span::styled("decay  ", label),
                Span::styled(format!("{}", agent.table().decay()), value),
            ]),
            Line::from(vec![
                Span::styled("ticks  ", label),
                Span::styled(format!("{}/s", status.ticks_per_second), value),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("state  ", label),
                Span::styled(state.to_string(), value),
            ]),
        ];

        for feature in Feature::ALL {
            let (mark, color) = if state.get(feature) {
                ("●", Color::Green)
            } else {
                ("○", Color::DarkGray)
            };
            text.push(Line::from(vec![
                Span::styled(format!("  {mark} "), Style::default().fg(color)),
                Span::raw(feature_label(feature)),
            ]));
        }

        let decision = agent.last_decision().map(|d| d.name()).unwrap_or("-");
        let decision_style = match agent.last_decision() {
            Some(Decision::Abstain) => Style::default().fg(Color::Magenta),
            _ => value,
        };

        text.extend([
            Line::from(""),
            Line::from(vec![
                Span::styled("action ", label),
                Span::styled(decision, decision_style),
            ]),
            Line::from(vec![
                Span::styled("table  ", label),
                Span::styled(format!("{} entries", agent.table().len()), value),
            ]),
            Line::from(vec![
                Span::styled("stall  ", label),
                Span::styled(
                    format!("{}/{}", agent.ticks_without_food(), agent.stall_limit()),
                    value,
                ),
            ]),
        ]);

        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Agent "),
        )
    }

    fn render_episode_over(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "EPISODE OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Restarting on the next tick",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);

        let text = vec![Line::from(vec![
            Span::styled("←↑↓→", key),
            Span::raw(" steer | "),
            Span::styled("+/-", key),
            Span::raw(" speed | "),
            Span::styled("a/A", key),
            Span::raw(" alpha | "),
            Span::styled("g/G", key),
            Span::raw(" gamma | "),
            Span::styled("Space", key),
            Span::raw(" pause | "),
            Span::styled("R", key),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn feature_label(feature: Feature) -> &'static str {
    match feature {
        Feature::AheadClear => "ahead clear",
        Feature::LeftClear => "left clear",
        Feature::RightClear => "right clear",
        Feature::FoodAhead => "food ahead",
        Feature::FoodLeft => "food left",
        Feature::FoodRight => "food right",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentConfig;
    use crate::game::GameConfig;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_panels() {
        let mut sim = Simulation::new(GameConfig::small(), &AgentConfig::default(), Some(5));
        sim.tick();
        let status = Status {
            ticks_per_second: 20,
            paused: true,
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &sim, &status))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Score:"));
        assert!(text.contains("Agent"));
        assert!(text.contains("alpha"));
        assert!(text.contains("20/s"));
        assert!(text.contains("paused"));
    }

    #[test]
    fn test_agent_panel_shows_decay_and_stall_limit() {
        let mut sim = Simulation::new(GameConfig::small(), &AgentConfig::default(), Some(5));
        sim.tick();
        let status = Status {
            ticks_per_second: 20,
            paused: false,
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &sim, &status))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("decay  0.0001"));
        assert!(text.contains(&format!(
            "stall  {}/500",
            sim.agent().ticks_without_food()
        )));
        assert!(text.contains("steer"));
        assert!(text.contains("+/- speed"));
    }

    #[test]
    fn test_renders_episode_over() {
        let mut sim = Simulation::new(GameConfig::small(), &AgentConfig::default(), Some(5));
        sim.tick();
        sim.end_episode();
        let status = Status {
            ticks_per_second: 20,
            paused: false,
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &sim, &status))
            .unwrap();

        assert!(buffer_text(&terminal).contains("EPISODE OVER"));
    }
}
