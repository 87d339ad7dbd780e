use super::{
    action::{Action, Heading},
    config::GameConfig,
    state::{CollisionType, GameState, Grid, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Reset the game to initial state
    ///
    /// The snake starts as a single cell at the configured start cell, heading down.
    pub fn reset(&mut self) -> GameState {
        let grid = self.config.grid();
        let head = grid.cell(self.config.start_column, self.config.start_row);
        let snake = Snake::new(head, Heading::DOWN, 1, grid.cell_size);

        // A single-cell snake always leaves room on a valid grid; fall back to
        // the far corner for the degenerate 1x1 board.
        let food = self
            .spawn_food_avoid_snake(&snake, &grid)
            .unwrap_or_else(|| grid.cell(grid.columns - 1, grid.rows - 1));

        GameState::new(snake, food, grid)
    }

    /// Apply the agent's relative action to the heading
    ///
    /// `None` (abstain) leaves the heading unchanged.
    pub fn steer(&self, state: &mut GameState, action: Option<Action>) {
        if let Some(action) = action {
            state.snake.heading = state.snake.heading.turned(action);
        }
    }

    /// Point the snake in an absolute direction, as the arrow keys do
    ///
    /// A request to reverse onto the current heading is refused and returns
    /// `false`, leaving the heading unchanged.
    pub fn steer_to(&self, state: &mut GameState, heading: Heading) -> bool {
        if heading.is_opposite(state.snake.heading) {
            return false;
        }
        state.snake.heading = heading;
        true
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_alive {
            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: None,
                },
            };
        }

        let cell_size = state.grid.cell_size;
        let new_head = state.snake.head().stepped(state.snake.heading, cell_size);
        let ate_food = new_head == state.food;

        state.snake.move_snake(ate_food, cell_size);
        state.steps += 1;

        // Collisions are judged after the move, so entering the cell the tail
        // just vacated is legal.
        if let Some(collision_type) = self.check_collision(state) {
            state.is_alive = false;

            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                },
            };
        }

        if ate_food {
            state.score += 1;
            match self.spawn_food_avoid_snake(&state.snake, &state.grid) {
                Some(food) => state.food = food,
                None => {
                    // Board is full
                    state.is_alive = false;
                    return StepResult {
                        terminated: true,
                        info: StepInfo {
                            ate_food,
                            collision_type: None,
                        },
                    };
                }
            }
        }

        StepResult {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }

    /// Check if the head position after a move causes a collision
    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        let head = state.snake.head();

        if !state.grid.contains(head) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn food at a random empty cell, or `None` if the snake fills the board
    fn spawn_food_avoid_snake(
        &mut self,
        snake: &Snake,
        grid: &Grid,
    ) -> Option<Position> {
        if snake.len() >= grid.columns * grid.rows {
            return None;
        }

        loop {
            let column = self.rng.gen_range(0..grid.columns);
            let row = self.rng.gen_range(0..grid.rows);
            let pos = grid.cell(column, row);

            if !snake.body.contains(&pos) {
                return Some(pos);
            }
        }
    }
}
