use serde::{Deserialize, Serialize};

/// Unit heading vector of the snake in screen coordinates (y grows downward)
///
/// Exactly one of `dx`, `dy` is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    pub dx: i32,
    pub dy: i32,
}

impl Heading {
    pub const UP: Heading = Heading { dx: 0, dy: -1 };
    pub const DOWN: Heading = Heading { dx: 0, dy: 1 };
    pub const LEFT: Heading = Heading { dx: -1, dy: 0 };
    pub const RIGHT: Heading = Heading { dx: 1, dy: 0 };

    /// The heading a quarter turn to the left of this one
    ///
    /// Turns, clear checks and food flags all share this convention, so
    /// "left" always means the same side for the agent.
    pub fn left(&self) -> Heading {
        Heading {
            dx: -self.dy,
            dy: self.dx,
        }
    }

    /// The heading a quarter turn to the right of this one
    pub fn right(&self) -> Heading {
        Heading {
            dx: self.dy,
            dy: -self.dx,
        }
    }

    /// Heading after applying a relative action
    pub fn turned(&self, action: Action) -> Heading {
        match action {
            Action::Continue => *self,
            Action::TurnLeft => self.left(),
            Action::TurnRight => self.right(),
        }
    }

    /// Returns true if `other` points the opposite way
    pub fn is_opposite(&self, other: Heading) -> bool {
        self.dx == -other.dx && self.dy == -other.dy
    }
}

/// Relative action the agent can take
///
/// The discriminant is the action index used for tie-breaking and table keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// Keep the current heading
    Continue = 0,
    /// Quarter turn to the left
    TurnLeft = 1,
    /// Quarter turn to the right
    TurnRight = 2,
}

impl Action {
    /// All actions in index order
    pub const ALL: [Action; 3] = [Action::Continue, Action::TurnLeft, Action::TurnRight];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Action> {
        Self::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Continue => "continue",
            Action::TurnLeft => "turn-left",
            Action::TurnRight => "turn-right",
        }
    }
}
