//! Directional focus and swap.
//!
//! Given the focused window and a direction, pick the neighbouring window by
//! comparing rectangle centroids: a candidate qualifies if its center lies
//! strictly in the requested direction, and the winner is the candidate with
//! the smallest distance on the primary axis, then on the secondary axis.
//! There is no angular cone.

use crate::window_manager::geometry::Rect;

/// Cardinal directions for focus and move operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Find the nearest candidate in `direction` from `focused`.
///
/// `candidates` pairs each window's list index with its current rectangle;
/// the focused window itself must not be among them. Returns the winning
/// list index, or `None` when no candidate lies in that direction.
pub fn find_nearest(
    focused: Rect,
    candidates: &[(usize, Rect)],
    direction: Direction,
) -> Option<usize> {
    let fx = focused.center_x();
    let fy = focused.center_y();

    let mut best: Option<usize> = None;
    let mut best_primary = i32::MAX;
    let mut best_secondary = i32::MAX;

    for (index, rect) in candidates {
        let dx = rect.center_x() - fx;
        let dy = rect.center_y() - fy;

        let (in_direction, primary, secondary) = match direction {
            Direction::Left => (dx < 0, dx.abs(), dy.abs()),
            Direction::Right => (dx > 0, dx.abs(), dy.abs()),
            Direction::Up => (dy < 0, dy.abs(), dx.abs()),
            Direction::Down => (dy > 0, dy.abs(), dx.abs()),
        };

        if !in_direction {
            continue;
        }

        if primary < best_primary || (primary == best_primary && secondary < best_secondary) {
            best = Some(*index);
            best_primary = primary;
            best_secondary = secondary;
        }
    }

    best
}
