// Snapshot builders shared by the unit tests

use crate::config::Config;
use crate::types::{Agent, Cell, Direction, Item, SafeZone, World, ZoneShrink};

pub const ME: i64 = 2024201552;
pub const RIVAL: i64 = 7;

pub fn config() -> Config {
    Config::default_hardcoded()
}

pub fn full_zone() -> SafeZone {
    SafeZone { x_min: 0, y_min: 0, x_max: 39, y_max: 29 }
}

pub fn agent(id: i64, body: &[(i32, i32)], heading: Direction) -> Agent {
    Agent {
        id,
        length: body.len(),
        score: 0,
        heading,
        shield_cooldown: 0,
        shield_time: 0,
        has_key: false,
        body: body.iter().map(|&(y, x)| Cell::new(y, x)).collect(),
    }
}

pub fn item(y: i32, x: i32, value: i32) -> Item {
    Item { cell: Cell::new(y, x), value, lifetime: Item::NO_EXPIRY }
}

/// Whole grid safe, shrinks scheduled far in the future, tick 56 of 256
pub fn open_world(agents: Vec<Agent>, items: Vec<Item>) -> World {
    World {
        remaining_ticks: 200,
        items,
        agents,
        chests: vec![],
        keys: vec![],
        zone: full_zone(),
        next_zone: ZoneShrink { tick: 150, zone: full_zone() },
        final_zone: ZoneShrink { tick: 220, zone: full_zone() },
    }
}
