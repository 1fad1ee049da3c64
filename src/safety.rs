// Lethality oracle and obstacle-adjacency tie-breaker

use log::trace;

use crate::types::Cell;
use crate::view::TickView;

/// Checks whether stepping onto `cell` is fatal now or a one-step dead end
///
/// Checks, in order: grid bounds, the current safe zone, the zone taking effect
/// on the landing tick, traps and keyless chests, our own neck, opponent bodies,
/// predicted opponent heads (when `consider_opponent_heads`), and finally the
/// congestion rule over the four neighbors.
///
/// Shield gating differs per check: the current zone and head predictions are
/// ignored by any active shield, while the upcoming zone and opponent bodies
/// need the shield to outlast its configured margin. Traps, bounds and our own
/// neck are never shielded.
pub fn is_lethal(cell: &Cell, view: &TickView, consider_opponent_heads: bool) -> bool {
    if !view.in_bounds(cell) {
        return true;
    }

    if view.outside_current_zone(cell) || view.outside_upcoming_zone(cell) {
        return true;
    }

    if view.is_trap(cell) || view.is_locked_chest(cell) {
        return true;
    }

    if view.is_own_neck(cell) {
        return true;
    }

    if !view.shield_outlasts(view.config.shield.body_margin) && view.on_opponent_body(cell) {
        return true;
    }

    if consider_opponent_heads && !view.shield_active() && view.predicted_opponent_head(cell) {
        return true;
    }

    let congestion = congestion_count(cell, view, consider_opponent_heads);
    if congestion >= view.config.safety.congestion_threshold {
        trace!("Dead end at {:?}: {} blocked neighbors", cell, congestion);
        return true;
    }

    false
}

/// Blocked neighbors for the congestion rule
///
/// The four neighbors of a cell are pairwise distinct, so counting matches
/// counting a deduplicated set.
fn congestion_count(cell: &Cell, view: &TickView, consider_opponent_heads: bool) -> usize {
    cell.neighbors()
        .iter()
        .filter(|n| {
            view.is_static_obstacle(n)
                || (consider_opponent_heads && view.predicted_opponent_head(n))
        })
        .count()
}

/// Number of blocked neighbors, counting our own head as blocked
///
/// Used only to break exact ties between equally scored moves.
pub fn count_obstacles(cell: &Cell, view: &TickView) -> usize {
    let head = view.head();
    cell.neighbors()
        .iter()
        .filter(|n| **n == head || view.is_static_obstacle(n))
        .count()
}
