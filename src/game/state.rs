use serde::{Deserialize, Serialize};

use super::action::Heading;

/// A position on the game board, in pixel units
///
/// Cell coordinates are multiples of the grid's cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell along a heading
    pub fn stepped(&self, heading: Heading, cell_size: i32) -> Self {
        self.moved_by(heading.dx * cell_size, heading.dy * cell_size)
    }
}

/// Fixed-size board geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub columns: usize,
    pub rows: usize,
    pub cell_size: i32,
}

impl Grid {
    pub fn new(columns: usize, rows: usize, cell_size: i32) -> Self {
        Self {
            columns,
            rows,
            cell_size,
        }
    }

    /// Board width in pixels
    pub fn width(&self) -> i32 {
        self.columns as i32 * self.cell_size
    }

    /// Board height in pixels
    pub fn height(&self) -> i32 {
        self.rows as i32 * self.cell_size
    }

    /// Check if a position lies on the board
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width() && pos.y >= 0 && pos.y < self.height()
    }

    /// Pixel position of a cell
    pub fn cell(&self, column: usize, row: usize) -> Position {
        Position::new(column as i32 * self.cell_size, row as i32 * self.cell_size)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current heading
    pub heading: Heading,
}

impl Snake {
    /// Create a new snake laid out behind `head`, one cell per segment
    pub fn new(head: Position, heading: Heading, length: usize, cell_size: i32) -> Self {
        let mut body = vec![head];
        let back = Heading {
            dx: -heading.dx,
            dy: -heading.dy,
        };

        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.stepped(back, cell_size));
        }

        Self { body, heading }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Cells that block the head: the body minus head and tail tip
    ///
    /// The tail tip is vacated by the next move, so it never blocks.
    pub fn obstacles(&self) -> &[Position] {
        if self.body.len() < 3 {
            return &[];
        }
        &self.body[1..self.body.len() - 1]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Move snake one cell along its heading, growing if should_grow is true
    pub fn move_snake(&mut self, should_grow: bool, cell_size: i32) {
        let new_head = self.head().stepped(self.heading, cell_size);
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Read-only view of the board handed to the agent each tick
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    pub head: Position,
    pub heading: Heading,
    /// Cells that block movement
    pub obstacles: &'a [Position],
    pub food: Position,
    pub grid: Grid,
}

impl Observation<'_> {
    /// Whether moving one cell along `heading` would leave the board or hit an obstacle
    pub fn is_blocked(&self, heading: Heading) -> bool {
        let next = self.head.stepped(heading, self.grid.cell_size);
        !self.grid.contains(next) || self.obstacles.contains(&next)
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid: Grid,
    pub score: u32,
    pub steps: u32,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, grid: Grid) -> Self {
        Self {
            snake,
            food,
            grid,
            score: 0,
            steps: 0,
            is_alive: true,
        }
    }

    /// Geometry view for the agent
    pub fn observation(&self) -> Observation<'_> {
        Observation {
            head: self.snake.head(),
            heading: self.snake.heading,
            obstacles: self.snake.obstacles(),
            food: self.food,
            grid: self.grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(40, 40);
        assert_eq!(pos.moved_by(20, 0), Position::new(60, 40));
        assert_eq!(pos.stepped(Heading::UP, 20), Position::new(40, 20));
        assert_eq!(pos.stepped(Heading::LEFT, 20), Position::new(20, 40));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(100, 100), Heading::RIGHT, 3, 20);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(100, 100));
        assert_eq!(snake.body[1], Position::new(80, 100));
        assert_eq!(snake.body.last(), Some(&Position::new(60, 100)));
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::new(Position::new(100, 100), Heading::RIGHT, 3, 20);

        snake.move_snake(false, 20);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(120, 100));

        snake.move_snake(true, 20);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(140, 100));
    }

    #[test]
    fn test_obstacles_skip_head_and_tail_tip() {
        let snake = Snake::new(Position::new(100, 100), Heading::RIGHT, 4, 20);
        assert_eq!(
            snake.obstacles(),
            &[Position::new(80, 100), Position::new(60, 100)]
        );

        let short = Snake::new(Position::new(100, 100), Heading::RIGHT, 2, 20);
        assert!(short.obstacles().is_empty());

        let single = Snake::new(Position::new(100, 100), Heading::RIGHT, 1, 20);
        assert!(single.obstacles().is_empty());
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(100, 100), Heading::RIGHT, 3, 20);
        assert!(!snake.collides_with_body(Position::new(100, 100)));
        assert!(snake.collides_with_body(Position::new(80, 100)));
        assert!(!snake.collides_with_body(Position::new(200, 200)));
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 20, 20);
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(380, 380)));
        assert!(!grid.contains(Position::new(-20, 0)));
        assert!(!grid.contains(Position::new(400, 0)));
        assert!(!grid.contains(Position::new(0, 400)));
    }

    #[test]
    fn test_cell_conversion() {
        let grid = Grid::new(10, 5, 20);
        assert_eq!(grid.cell(3, 2), Position::new(60, 40));
        assert!(grid.contains(grid.cell(9, 4)));
        assert!(!grid.contains(grid.cell(10, 4)));
    }

    #[test]
    fn test_observation_blocked() {
        let snake = Snake::new(Position::new(0, 20), Heading::DOWN, 1, 20);
        let state = GameState::new(snake, Position::new(100, 100), Grid::new(20, 20, 20));
        let obs = state.observation();

        assert!(obs.is_blocked(Heading::LEFT));
        assert!(!obs.is_blocked(Heading::DOWN));
        assert!(!obs.is_blocked(Heading::UP));
    }
}
