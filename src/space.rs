// Local freedom estimator
//
// Bounded breadth-first flood-fill used as a cheap proxy for how much room
// a cell leaves to maneuver. It is deliberately more permissive than the
// lethality oracle: our own body is never an obstacle and opponent tails are
// assumed to vacate.

use std::collections::{HashSet, VecDeque};

use crate::types::Cell;
use crate::view::TickView;

/// Counts cells dequeued by a BFS from `start`, saturating at `max_depth`
///
/// The start cell itself is always counted (when `max_depth > 0`), whatever
/// occupies it. The result is monotone non-decreasing in `max_depth`.
pub fn reachable_count(start: &Cell, view: &TickView, max_depth: usize) -> usize {
    let blocked = opponent_obstacles(view);

    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();
    queue.push_back(*start);
    visited.insert(*start);

    let mut count = 0;
    while count < max_depth {
        let Some(current) = queue.pop_front() else {
            break;
        };
        count += 1;

        for next in current.neighbors() {
            if !is_passable(&next, view, &blocked) {
                continue;
            }
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    count
}

/// Opponent bodies minus their tails, plus their legal next heads
fn opponent_obstacles(view: &TickView) -> HashSet<Cell> {
    let mut blocked = HashSet::new();
    for opponent in view.opponents() {
        let keep = opponent.body.len().saturating_sub(1);
        blocked.extend(opponent.body[..keep].iter().copied());
        blocked.extend(opponent.next_head_cells());
    }
    blocked
}

fn is_passable(cell: &Cell, view: &TickView, blocked: &HashSet<Cell>) -> bool {
    view.in_bounds(cell)
        && (view.shield_active() || view.world.zone.contains(cell))
        && !view.is_trap(cell)
        && !blocked.contains(cell)
}
