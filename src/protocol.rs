// Judge text protocol
//
// The judge writes one whitespace-separated snapshot per tick on stdin and
// expects the action code on stdout, followed by the same code again as the
// memory slot handed back next tick.

use std::str::{FromStr, SplitWhitespace};

use crate::config::Config;
use crate::types::{Action, Agent, Cell, Chest, Direction, Item, Key, SafeZone, World, ZoneShrink};

/// One parsed tick: the world and the memory echoed from the previous tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickInput {
    pub world: World,
    pub last_action: Option<i64>,
}

/// Sequential token reader with descriptive errors
struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Tokens { inner: input.split_whitespace() }
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T, String>
    where
        T::Err: std::fmt::Display,
    {
        let token = self
            .inner
            .next()
            .ok_or_else(|| format!("Unexpected end of input while reading {}", what))?;
        token
            .parse::<T>()
            .map_err(|e| format!("Invalid {} '{}': {}", what, token, e))
    }

    fn cell(&mut self, what: &str) -> Result<Cell, String> {
        let y = self.next(what)?;
        let x = self.next(what)?;
        Ok(Cell { y, x })
    }

    fn zone(&mut self, what: &str) -> Result<SafeZone, String> {
        Ok(SafeZone {
            x_min: self.next(what)?,
            y_min: self.next(what)?,
            x_max: self.next(what)?,
            y_max: self.next(what)?,
        })
    }
}

/// Parses a full tick snapshot in the judge's format
///
/// Key holders are matched against agent ids to derive `has_key`.
pub fn parse_tick(input: &str, config: &Config) -> Result<TickInput, String> {
    let mut tokens = Tokens::new(input);

    let remaining_ticks: i32 = tokens.next("remaining ticks")?;

    let item_count: usize = tokens.next("item count")?;
    let mut items = Vec::with_capacity(item_count);
    for _ in 0..item_count {
        items.push(Item {
            cell: tokens.cell("item position")?,
            value: tokens.next("item value")?,
            lifetime: tokens.next("item lifetime")?,
        });
    }

    let agent_count: usize = tokens.next("agent count")?;
    let mut agents = Vec::with_capacity(agent_count);
    for _ in 0..agent_count {
        let id: i64 = tokens.next("agent id")?;
        let length: usize = tokens.next("agent length")?;
        let score: i32 = tokens.next("agent score")?;
        let heading_code: i64 = tokens.next("agent heading")?;
        let heading = Direction::from_code(heading_code)
            .ok_or_else(|| format!("Invalid heading {} for agent {}", heading_code, id))?;
        let shield_cooldown: i32 = tokens.next("shield cooldown")?;
        let shield_time: i32 = tokens.next("shield time")?;

        let mut body = Vec::with_capacity(length);
        for _ in 0..length {
            body.push(tokens.cell("body cell")?);
        }

        agents.push(Agent {
            id,
            length,
            score,
            heading,
            shield_cooldown,
            shield_time,
            has_key: false,
            body,
        });
    }

    let chest_count: usize = tokens.next("chest count")?;
    let mut chests = Vec::with_capacity(chest_count);
    for _ in 0..chest_count {
        chests.push(Chest {
            cell: tokens.cell("chest position")?,
            value: tokens.next("chest value")?,
        });
    }

    let key_count: usize = tokens.next("key count")?;
    let mut keys = Vec::with_capacity(key_count);
    for _ in 0..key_count {
        let cell = tokens.cell("key position")?;
        let holder: i64 = tokens.next("key holder")?;
        keys.push(Key {
            cell,
            holder: if holder < 0 { None } else { Some(holder) },
            remaining: tokens.next("key remaining time")?,
        });
    }

    let zone = tokens.zone("current zone")?;
    let next_zone = ZoneShrink {
        tick: tokens.next("next zone tick")?,
        zone: tokens.zone("next zone")?,
    };
    let final_zone = ZoneShrink {
        tick: tokens.next("final zone tick")?,
        zone: tokens.zone("final zone")?,
    };

    // Memory exists from the second tick on; tolerate a judge that omits it
    let last_action = if remaining_ticks < config.game.total_ticks - 1 {
        tokens.next::<i64>("memory").ok()
    } else {
        None
    };

    let mut world = World {
        remaining_ticks,
        items,
        agents,
        chests,
        keys,
        zone,
        next_zone,
        final_zone,
    };
    world.sync_key_holders();

    Ok(TickInput { world, last_action })
}

/// Action line plus the memory line for the next tick
pub fn format_response(action: Action) -> String {
    format!("{}\n{}\n", action.code(), action.code())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ME: i64 = 2024201552;

    fn sample(remaining: i32, memory: &str) -> String {
        format!(
            "{remaining}
3
4 5 3 -1
6 7 -2 -1
9 9 -3 20
2
{ME} 3 12 2 0 0
10 10 10 9 10 8
77 2 40 1 5 0
20 20 21 20
1
15 15 60
1
2 2 77 8
0 0 39 29
100 2 2 37 27
200 5 5 34 24
{memory}"
        )
    }

    #[test]
    fn test_parse_full_snapshot() {
        let config = Config::default_hardcoded();
        let tick = parse_tick(&sample(200, "3"), &config).unwrap();
        let world = &tick.world;

        assert_eq!(world.remaining_ticks, 200);
        assert_eq!(world.items.len(), 3);
        assert_eq!(world.items[0].cell, Cell::new(4, 5));
        assert_eq!(world.items[2].lifetime, 20);

        let me = world.agent(ME).unwrap();
        assert_eq!(me.length, 3);
        assert_eq!(me.heading, Direction::Right);
        assert_eq!(me.body[0], Cell::new(10, 10));
        assert!(!me.has_key);

        let rival = world.agent(77).unwrap();
        assert_eq!(rival.shield_cooldown, 5);
        assert!(rival.has_key);

        assert_eq!(world.chests[0], Chest { cell: Cell::new(15, 15), value: 60 });
        assert_eq!(world.keys[0].holder, Some(77));
        assert_eq!(world.zone, SafeZone { x_min: 0, y_min: 0, x_max: 39, y_max: 29 });
        assert_eq!(world.next_zone.tick, 100);
        assert_eq!(world.next_zone.zone.x_max, 37);
        assert_eq!(world.final_zone.zone.y_min, 5);
        assert_eq!(tick.last_action, Some(3));
    }

    #[test]
    fn test_first_tick_has_no_memory() {
        let config = Config::default_hardcoded();
        let tick = parse_tick(&sample(255, ""), &config).unwrap();
        assert_eq!(tick.last_action, None);

        let tick = parse_tick(&sample(100, ""), &config).unwrap();
        assert_eq!(tick.last_action, None);
    }

    #[test]
    fn test_negative_holder_means_ground_key() {
        let config = Config::default_hardcoded();
        let text = sample(200, "0").replace("2 2 77 8", "2 2 -1 8");
        let tick = parse_tick(&text, &config).unwrap();
        assert_eq!(tick.world.keys[0].holder, None);
        assert!(tick.world.agents.iter().all(|a| !a.has_key));
    }

    #[test]
    fn test_truncated_input_is_an_error() {
        let config = Config::default_hardcoded();
        let err = parse_tick("200\n2\n4 5 3", &config).unwrap_err();
        assert!(err.contains("item lifetime"), "{}", err);

        let err = parse_tick("abc", &config).unwrap_err();
        assert!(err.contains("remaining ticks"), "{}", err);
    }

    #[test]
    fn test_invalid_heading_is_an_error() {
        let config = Config::default_hardcoded();
        let text = sample(200, "0").replace(&format!("{} 3 12 2 0 0", ME), &format!("{} 3 12 9 0 0", ME));
        assert!(parse_tick(&text, &config).is_err());
    }

    #[test]
    fn test_response_echoes_code() {
        assert_eq!(format_response(Action::Move(Direction::Down)), "3\n3\n");
        assert_eq!(format_response(Action::ActivateShield), "4\n4\n");
    }
}
