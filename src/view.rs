// Read-only per-tick view over the world
//
// Resolves the self agent once and exposes the primitive cell predicates
// shared by the lethality oracle, the tie-breaker and the flood-fill.

use crate::config::Config;
use crate::types::{Agent, Cell, World};

/// Borrowed view of one tick: the world, our own agent and the tunables
#[derive(Debug, Clone, Copy)]
pub struct TickView<'a> {
    pub world: &'a World,
    pub me: &'a Agent,
    pub config: &'a Config,
}

impl<'a> TickView<'a> {
    /// Builds a view, failing only if the configured self id is not in the roster
    pub fn new(world: &'a World, config: &'a Config) -> Result<Self, String> {
        let me = world.agent(config.game.self_id).ok_or_else(|| {
            format!(
                "Agent with id '{}' not found in world snapshot",
                config.game.self_id
            )
        })?;
        if me.body.is_empty() {
            return Err(format!("Agent '{}' has an empty body", me.id));
        }
        Ok(TickView { world, me, config })
    }

    /// Elapsed tick number of the snapshot
    pub fn tick(&self) -> i32 {
        self.config.game.total_ticks - self.world.remaining_ticks
    }

    pub fn head(&self) -> Cell {
        self.me.body[0]
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        cell.x >= 0
            && cell.x < self.config.game.grid_width
            && cell.y >= 0
            && cell.y < self.config.game.grid_height
    }

    pub fn shield_active(&self) -> bool {
        self.me.shield_time > 0
    }

    /// Shield strictly outlasting `margin` ticks
    pub fn shield_outlasts(&self, margin: i32) -> bool {
        self.me.shield_time > margin
    }

    pub fn outside_current_zone(&self, cell: &Cell) -> bool {
        !self.shield_active() && !self.world.zone.contains(cell)
    }

    /// Outside the zone that takes effect on the tick this move lands on
    pub fn outside_upcoming_zone(&self, cell: &Cell) -> bool {
        if self.shield_outlasts(self.config.shield.zone_margin) {
            return false;
        }
        self.world
            .zone_taking_effect_at(self.tick() + 1)
            .map_or(false, |zone| !zone.contains(cell))
    }

    pub fn is_trap(&self, cell: &Cell) -> bool {
        self.world.has_trap_at(cell)
    }

    pub fn is_locked_chest(&self, cell: &Cell) -> bool {
        !self.me.has_key && self.world.has_chest_at(cell)
    }

    /// Our head or the cell right behind it
    pub fn is_own_neck(&self, cell: &Cell) -> bool {
        self.me.body.iter().take(2).any(|c| c == cell)
    }

    pub fn opponents(&self) -> impl Iterator<Item = &'a Agent> + 'a {
        let world = self.world;
        let my_id = self.me.id;
        world.agents.iter().filter(move |a| a.id != my_id)
    }

    pub fn on_opponent_body(&self, cell: &Cell) -> bool {
        self.opponents().any(|a| a.body.contains(cell))
    }

    pub fn predicted_opponent_head(&self, cell: &Cell) -> bool {
        self.opponents()
            .any(|a| a.next_head_cells().any(|next| next == *cell))
    }

    /// Obstacles common to the congestion rule and the tie-breaker
    pub fn is_static_obstacle(&self, cell: &Cell) -> bool {
        !self.in_bounds(cell)
            || self.outside_current_zone(cell)
            || self.outside_upcoming_zone(cell)
            || self.is_trap(cell)
            || self.is_locked_chest(cell)
            || self.on_opponent_body(cell)
    }
}
