// Target scoring and selection
//
// Every item gets a type-specific desirability; the best one becomes the
// tick's target. Holding a key overrides everything with chest pursuit.

use log::debug;

use crate::types::{Item, ItemKind};
use crate::view::TickView;

/// The item pursued this tick and the score that selected it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub item: Item,
    pub score: f64,
}

impl Target {
    pub fn is_chest(&self) -> bool {
        self.item.is_chest()
    }
}

/// Scores a single item from our head's point of view
pub fn score_item(item: &Item, view: &TickView) -> f64 {
    let scores = &view.config.scores;
    let dist = view.head().manhattan(&item.cell).max(1) as f64;

    match item.kind() {
        ItemKind::Food(value) => {
            let room = reachable_count_at(item, view);
            value as f64 * scores.food_value_weight / dist + scores.food_space_weight * room as f64
        }
        ItemKind::GrowthBean => score_growth_bean(item, view, dist),
        ItemKind::Trap => scores.rejected_score,
        ItemKind::Key => {
            let lasts = item.lifetime == Item::NO_EXPIRY || item.lifetime as f64 >= dist;
            if !view.me.has_key && lasts {
                scores.key_score / dist
            } else {
                scores.rejected_score
            }
        }
        ItemKind::Chest => {
            if view.me.has_key {
                scores.chest_score / dist
            } else {
                scores.rejected_score
            }
        }
        ItemKind::Unknown(_) => 0.0,
    }
}

/// Beans are worth it while we are short and the bean sits in open space
fn score_growth_bean(item: &Item, view: &TickView, dist: f64) -> f64 {
    let scores = &view.config.scores;
    let free = reachable_count_at(item, view);
    let rich_food_present = view.world.items.iter().any(|other| {
        matches!(other.kind(), ItemKind::Food(v) if v >= scores.bean_rich_food_value)
    });
    let length = view.me.length;

    if length < scores.bean_short_length && free > scores.bean_short_space && !rich_food_present {
        scores.bean_short_score / dist
    } else if length < scores.bean_medium_length && free > scores.bean_medium_space {
        scores.bean_medium_score / dist
    } else if scores.reject_crowded_beans {
        scores.rejected_score
    } else {
        scores.bean_fallback_score / dist
    }
}

fn reachable_count_at(item: &Item, view: &TickView) -> usize {
    crate::space::reachable_count(&item.cell, view, view.config.space.target_probe_depth)
}

/// Picks the highest scoring item, then lets a chest override it if we hold a key
///
/// Items scoring at or below the rejection sentinel are never targets.
pub fn select_target(view: &TickView) -> Option<Target> {
    let rejected = view.config.scores.rejected_score;

    let mut best: Option<Target> = None;
    for item in &view.world.items {
        let score = score_item(item, view);
        if score <= rejected {
            continue;
        }
        if best.map_or(true, |b| score > b.score) {
            best = Some(Target { item: *item, score });
        }
    }

    if view.me.has_key {
        if let Some(chest) = best_chest(view) {
            if best.map_or(true, |b| b.item.cell != chest.item.cell) {
                debug!("Holding a key, overriding target with chest at {:?}", chest.item.cell);
            }
            return Some(chest);
        }
    }

    best
}

/// Nearest chest among chest items and the chest list
fn best_chest(view: &TickView) -> Option<Target> {
    let from_items = view.world.items.iter().filter(|i| i.is_chest()).copied();
    let from_list = view
        .world
        .chests
        .iter()
        .filter(|c| !view.world.items.iter().any(|i| i.is_chest() && i.cell == c.cell))
        .map(|c| Item {
            cell: c.cell,
            value: -5,
            lifetime: Item::NO_EXPIRY,
        });

    let mut best: Option<Target> = None;
    for item in from_items.chain(from_list) {
        let score = score_item(&item, view);
        if best.map_or(true, |b| score > b.score) {
            best = Some(Target { item, score });
        }
    }
    best
}
