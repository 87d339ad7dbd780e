//! Turns raw board geometry into the six-flag [`State`]

use super::state::State;
use crate::game::{Action, Observation};

/// Encode the agent's view of the board
///
/// Clear flags start set and are only ever cleared, once for each direction
/// whose next cell is off the board or occupied by the body. Food flags start
/// unset and at most one is raised.
pub fn encode(obs: &Observation<'_>) -> State {
    let mut state = State::INITIAL;

    for action in Action::ALL {
        if obs.is_blocked(obs.heading.turned(action)) {
            state.block(action);
        }
    }

    if let Some(action) = food_direction(obs) {
        state.sense_food(action);
    }

    state
}

/// Which relative direction the food lies in, if any
///
/// Food on the heading axis counts as ahead only when it is in front of the
/// head; food straight behind is not reported. Off-axis food is left or right
/// by the sign of its offset along the heading's left vector.
pub fn food_direction(obs: &Observation<'_>) -> Option<Action> {
    let dx = obs.food.x - obs.head.x;
    let dy = obs.food.y - obs.head.y;

    let forward = dx * obs.heading.dx + dy * obs.heading.dy;
    let left = obs.heading.left();
    let lateral = dx * left.dx + dy * left.dy;

    match lateral.signum() {
        0 if forward > 0 => Some(Action::Continue),
        0 => None,
        1 => Some(Action::TurnLeft),
        _ => Some(Action::TurnRight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Grid, Heading, Position};

    fn observe<'a>(
        head: Position,
        heading: Heading,
        obstacles: &'a [Position],
        food: Position,
    ) -> Observation<'a> {
        Observation {
            head,
            heading,
            obstacles,
            food,
            grid: Grid::new(20, 20, 20),
        }
    }

    #[test]
    fn test_food_directly_ahead() {
        let obs = observe(Position::new(20, 20), Heading::DOWN, &[], Position::new(20, 40));
        assert_eq!(encode(&obs).flags(), [1, 1, 1, 1, 0, 0]);
    }

    #[test]
    fn test_food_directly_left_heading_down() {
        let obs = observe(Position::new(20, 20), Heading::DOWN, &[], Position::new(0, 20));
        assert_eq!(encode(&obs).flags(), [1, 1, 1, 0, 1, 0]);
    }

    #[test]
    fn test_food_far_ahead_on_axis() {
        let obs = observe(Position::new(20, 20), Heading::DOWN, &[], Position::new(20, 300));
        assert_eq!(food_direction(&obs), Some(Action::Continue));
    }

    #[test]
    fn test_food_behind_sets_nothing() {
        let obs = observe(Position::new(100, 100), Heading::DOWN, &[], Position::new(100, 20));
        let state = encode(&obs);
        assert_eq!(&state.flags()[3..], &[0, 0, 0]);
    }

    #[test]
    fn test_off_axis_food_uses_lateral_side() {
        // Heading right, left vector points down the screen
        let head = Position::new(100, 100);
        let below = observe(head, Heading::RIGHT, &[], Position::new(40, 200));
        let above = observe(head, Heading::RIGHT, &[], Position::new(300, 0));

        assert_eq!(food_direction(&below), Some(Action::TurnLeft));
        assert_eq!(food_direction(&above), Some(Action::TurnRight));
    }

    #[test]
    fn test_at_most_one_food_flag() {
        let head = Position::new(100, 100);
        for heading in [Heading::UP, Heading::DOWN, Heading::LEFT, Heading::RIGHT] {
            for x in (0..400).step_by(20) {
                for y in (0..400).step_by(40) {
                    let state = encode(&observe(head, heading, &[], Position::new(x, y)));
                    let raised = state.flags()[3..].iter().filter(|&&f| f == 1).count();
                    assert!(raised <= 1);
                }
            }
        }
    }

    #[test]
    fn test_corner_blocks_boundary_directions() {
        // Top-left corner heading up: ahead (up) and the screen-west side are off the board
        let obs = observe(Position::new(0, 0), Heading::UP, &[], Position::new(200, 200));
        let state = encode(&obs);

        assert!(!state.is_clear(Action::Continue));
        assert!(state.is_clear(Action::TurnLeft)); // left of up is east
        assert!(!state.is_clear(Action::TurnRight));
    }

    #[test]
    fn test_obstacles_block_directions() {
        let head = Position::new(100, 100);
        let obstacles = [Position::new(100, 120), Position::new(120, 100)];
        let obs = observe(head, Heading::DOWN, &obstacles, Position::new(300, 300));
        let state = encode(&obs);

        assert!(!state.is_clear(Action::Continue));
        assert!(state.is_clear(Action::TurnLeft));
        assert!(!state.is_clear(Action::TurnRight));
    }

    #[test]
    fn test_duplicate_blocks_agree() {
        // Wall and body both block the same side
        let head = Position::new(0, 100);
        let obstacles = [Position::new(20, 100)];
        let with_body = observe(head, Heading::UP, &obstacles, Position::new(300, 300));
        let without_body = observe(head, Heading::UP, &[], Position::new(300, 300));

        assert!(!encode(&with_body).is_clear(Action::TurnLeft));
        assert!(!encode(&with_body).is_clear(Action::TurnRight));
        assert!(encode(&without_body).is_clear(Action::TurnLeft));
    }

    #[test]
    fn test_clear_flags_agree_with_observation() {
        let head = Position::new(0, 380);
        let obstacles = [Position::new(0, 360), Position::new(40, 380)];
        for heading in [Heading::UP, Heading::DOWN, Heading::LEFT, Heading::RIGHT] {
            let obs = observe(head, heading, &obstacles, Position::new(200, 200));
            let state = encode(&obs);
            for action in Action::ALL {
                assert_eq!(
                    state.is_clear(action),
                    !obs.is_blocked(heading.turned(action)),
                    "{heading:?} {action:?}"
                );
            }
        }
    }

    #[test]
    fn test_head_past_the_edge_is_fully_blocked() {
        // The fatal tick encodes from a head that already left the board
        let obs = observe(Position::new(400, 100), Heading::RIGHT, &[], Position::new(0, 0));
        let state = encode(&obs);

        assert!(!state.is_clear(Action::Continue));
        assert!(!state.is_clear(Action::TurnLeft));
        assert!(!state.is_clear(Action::TurnRight));
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let obstacles = [Position::new(60, 40)];
        let obs = observe(Position::new(40, 40), Heading::LEFT, &obstacles, Position::new(0, 0));
        assert_eq!(encode(&obs), encode(&obs));
    }
}
