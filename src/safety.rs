// Self-avoidance fallback used when no food path is available
//
// Every body segment lining up with a cell next to the head adds risk to that
// direction. Segments nearer the head stay put longer, so they weigh more.

use crate::types::{Coord, Direction};

/// Accumulated self-collision risk per direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionScores {
    pub up: usize,
    pub right: usize,
    pub down: usize,
    pub left: usize,
}

impl DirectionScores {
    pub fn get(&self, direction: Direction) -> usize {
        match direction {
            Direction::Up => self.up,
            Direction::Right => self.right,
            Direction::Down => self.down,
            Direction::Left => self.left,
        }
    }

    /// First direction (up, right, down, left) whose score is no higher than any other
    pub fn lowest(&self) -> Direction {
        let scores = Direction::all().map(|dir| self.get(dir));
        Direction::all()
            .into_iter()
            .find(|&dir| scores.iter().all(|&other| self.get(dir) <= other))
            .unwrap_or(Direction::Up)
    }
}

/// Scores each direction by the body segments adjacent to the head.
///
/// A segment credits at most one direction. Checks run left, right, down, up
/// and each compares a single axis against the head. A neighbor that would
/// fall outside the i32 range matches nothing.
pub fn score_directions(head: Coord, body: &[Coord]) -> DirectionScores {
    let mut scores = DirectionScores::default();
    let length = body.len();

    let left_x = head.x.checked_sub(1);
    let right_x = head.x.checked_add(1);
    let down_y = head.y.checked_sub(1);
    let up_y = head.y.checked_add(1);

    for (i, segment) in body.iter().enumerate() {
        let weight = length - i;
        if left_x == Some(segment.x) {
            scores.left += weight;
        } else if right_x == Some(segment.x) {
            scores.right += weight;
        } else if down_y == Some(segment.y) {
            scores.down += weight;
        } else if up_y == Some(segment.y) {
            scores.up += weight;
        }
    }

    scores
}

/// Picks the direction with the least self-collision risk
pub fn safest_direction(head: Coord, body: &[Coord]) -> Direction {
    score_directions(head, body).lowest()
}
