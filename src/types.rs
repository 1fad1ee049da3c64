// World model types for the shrinking-zone snake game
// One World is built per tick and never mutated while a decision is computed.

use serde::{Deserialize, Serialize};

/// Grid cell as (row, column). Field order gives the derived row-major ordering.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Cell {
    pub y: i32,
    pub x: i32,
}

impl Cell {
    pub fn new(y: i32, x: i32) -> Self {
        Cell { y, x }
    }

    /// Calculates Manhattan distance between two cells
    pub fn manhattan(&self, other: &Cell) -> i32 {
        (self.y - other.y).abs() + (self.x - other.x).abs()
    }

    /// The four orthogonal neighbors, in direction code order
    pub fn neighbors(&self) -> [Cell; 4] {
        Direction::all().map(|dir| dir.apply(self))
    }
}

/// The four movement directions, carrying the judge's numeric codes
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Returns all directions in code order
    pub fn all() -> [Direction; 4] {
        [Direction::Left, Direction::Up, Direction::Right, Direction::Down]
    }

    pub fn code(&self) -> u8 {
        match self {
            Direction::Left => 0,
            Direction::Up => 1,
            Direction::Right => 2,
            Direction::Down => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Direction> {
        match code {
            0 => Some(Direction::Left),
            1 => Some(Direction::Up),
            2 => Some(Direction::Right),
            3 => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }

    /// Calculates the next cell when moving in this direction
    pub fn apply(&self, cell: &Cell) -> Cell {
        match self {
            Direction::Left => Cell { y: cell.y, x: cell.x - 1 },
            Direction::Up => Cell { y: cell.y - 1, x: cell.x },
            Direction::Right => Cell { y: cell.y, x: cell.x + 1 },
            Direction::Down => Cell { y: cell.y + 1, x: cell.x },
        }
    }
}

/// Action emitted for a tick: a move, or activating the shield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Direction),
    ActivateShield,
}

impl Action {
    pub const SHIELD_CODE: u8 = 4;

    pub fn code(&self) -> u8 {
        match self {
            Action::Move(dir) => dir.code(),
            Action::ActivateShield => Self::SHIELD_CODE,
        }
    }

    pub fn from_code(code: i64) -> Option<Action> {
        if code == Self::SHIELD_CODE as i64 {
            return Some(Action::ActivateShield);
        }
        Direction::from_code(code).map(Action::Move)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Move(dir) => dir.as_str(),
            Action::ActivateShield => "shield",
        }
    }

    /// Parses either a name ("up", "shield") or a numeric code
    pub fn parse(s: &str) -> Result<Action, String> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "left" => Ok(Action::Move(Direction::Left)),
            "up" => Ok(Action::Move(Direction::Up)),
            "right" => Ok(Action::Move(Direction::Right)),
            "down" => Ok(Action::Move(Direction::Down)),
            "shield" => Ok(Action::ActivateShield),
            other => other
                .parse::<i64>()
                .ok()
                .and_then(Action::from_code)
                .ok_or_else(|| format!("Invalid action: {}", other)),
        }
    }
}

/// Item variants decoded from the signed item value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Food(i32),
    GrowthBean,
    Trap,
    Key,
    Chest,
    Unknown(i32),
}

/// An item on the grid. `lifetime == -1` means it never expires.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Item {
    pub cell: Cell,
    pub value: i32,
    pub lifetime: i32,
}

impl Item {
    pub const NO_EXPIRY: i32 = -1;

    pub fn kind(&self) -> ItemKind {
        match self.value {
            v if v > 0 => ItemKind::Food(v),
            -1 => ItemKind::GrowthBean,
            -2 => ItemKind::Trap,
            -3 => ItemKind::Key,
            -5 => ItemKind::Chest,
            v => ItemKind::Unknown(v),
        }
    }

    pub fn is_trap(&self) -> bool {
        self.kind() == ItemKind::Trap
    }

    pub fn is_chest(&self) -> bool {
        self.kind() == ItemKind::Chest
    }
}

/// A snake agent; body runs from head (index 0) to tail
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: i64,
    pub length: usize,
    pub score: i32,
    pub heading: Direction,
    pub shield_cooldown: i32,
    pub shield_time: i32,
    #[serde(default)]
    pub has_key: bool,
    pub body: Vec<Cell>,
}

impl Agent {
    pub fn head(&self) -> Option<Cell> {
        self.body.first().copied()
    }

    /// Whether `dir` would reverse onto the neck (only meaningful once length > 1)
    pub fn is_reversal(&self, dir: Direction) -> bool {
        self.length > 1 && dir == self.heading.opposite()
    }

    /// Cells the head can legally reach next tick
    pub fn next_head_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let head = self.head();
        Direction::all()
            .into_iter()
            .filter(move |&dir| !self.is_reversal(dir))
            .filter_map(move |dir| head.map(|h| dir.apply(&h)))
    }
}

/// Inclusive axis-aligned safe-zone rectangle; x is the column, y the row
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeZone {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl SafeZone {
    pub fn contains(&self, cell: &Cell) -> bool {
        cell.x >= self.x_min && cell.x <= self.x_max && cell.y >= self.y_min && cell.y <= self.y_max
    }

    /// Whether `inner` lies entirely inside this zone
    pub fn encloses(&self, inner: &SafeZone) -> bool {
        inner.x_min >= self.x_min
            && inner.x_max <= self.x_max
            && inner.y_min >= self.y_min
            && inner.y_max <= self.y_max
    }
}

/// A scheduled zone and the tick it takes effect
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneShrink {
    pub tick: i32,
    pub zone: SafeZone,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chest {
    pub cell: Cell,
    pub value: i32,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub cell: Cell,
    pub holder: Option<i64>,
    pub remaining: i32,
}

/// Complete tick snapshot
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct World {
    pub remaining_ticks: i32,
    pub items: Vec<Item>,
    pub agents: Vec<Agent>,
    #[serde(default)]
    pub chests: Vec<Chest>,
    #[serde(default)]
    pub keys: Vec<Key>,
    pub zone: SafeZone,
    pub next_zone: ZoneShrink,
    pub final_zone: ZoneShrink,
}

impl World {
    pub fn agent(&self, id: i64) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Zone that becomes effective exactly at `tick`, if any
    pub fn zone_taking_effect_at(&self, tick: i32) -> Option<&SafeZone> {
        if self.next_zone.tick == tick {
            Some(&self.next_zone.zone)
        } else if self.final_zone.tick == tick {
            Some(&self.final_zone.zone)
        } else {
            None
        }
    }

    /// Whether the shrink schedule narrows monotonically: final within next within current
    pub fn zone_schedule_nested(&self) -> bool {
        self.zone.encloses(&self.next_zone.zone) && self.next_zone.zone.encloses(&self.final_zone.zone)
    }

    /// Recomputes every agent's key flag from the key holder list
    pub fn sync_key_holders(&mut self) {
        for agent in &mut self.agents {
            agent.has_key = self.keys.iter().any(|k| k.holder == Some(agent.id));
        }
    }

    pub fn has_trap_at(&self, cell: &Cell) -> bool {
        self.items.iter().any(|i| i.is_trap() && i.cell == *cell)
    }

    pub fn has_chest_at(&self, cell: &Cell) -> bool {
        self.items.iter().any(|i| i.is_chest() && i.cell == *cell)
            || self.chests.iter().any(|c| c.cell == *cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_order_is_row_major() {
        let mut cells = vec![Cell::new(2, 0), Cell::new(1, 5), Cell::new(1, 2)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(1, 2), Cell::new(1, 5), Cell::new(2, 0)]);
    }

    #[test]
    fn test_direction_codes_and_opposites() {
        for dir in Direction::all() {
            assert_eq!(Direction::from_code(dir.code() as i64), Some(dir));
            assert_eq!(dir.opposite().opposite(), dir);
            let back = dir.opposite().apply(&dir.apply(&Cell::new(4, 4)));
            assert_eq!(back, Cell::new(4, 4));
        }
        assert_eq!(Direction::Up.apply(&Cell::new(5, 5)), Cell::new(4, 5));
        assert_eq!(Direction::Left.apply(&Cell::new(5, 5)), Cell::new(5, 4));
    }

    #[test]
    fn test_item_kinds() {
        let item = |value| Item { cell: Cell::new(0, 0), value, lifetime: -1 };
        assert_eq!(item(3).kind(), ItemKind::Food(3));
        assert_eq!(item(-1).kind(), ItemKind::GrowthBean);
        assert_eq!(item(-2).kind(), ItemKind::Trap);
        assert_eq!(item(-3).kind(), ItemKind::Key);
        assert_eq!(item(-5).kind(), ItemKind::Chest);
        assert_eq!(item(-4).kind(), ItemKind::Unknown(-4));
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(Action::parse("UP").unwrap(), Action::Move(Direction::Up));
        assert_eq!(Action::parse("4").unwrap(), Action::ActivateShield);
        assert_eq!(Action::parse("2").unwrap(), Action::Move(Direction::Right));
        assert!(Action::parse("sideways").is_err());
        assert!(Action::parse("9").is_err());
    }

    #[test]
    fn test_next_head_cells_skip_reversal() {
        let agent = Agent {
            id: 1,
            length: 2,
            score: 0,
            heading: Direction::Right,
            shield_cooldown: 0,
            shield_time: 0,
            has_key: false,
            body: vec![Cell::new(3, 3), Cell::new(3, 2)],
        };
        let cells: Vec<Cell> = agent.next_head_cells().collect();
        assert_eq!(cells.len(), 3);
        assert!(!cells.contains(&Cell::new(3, 2)));

        let single = Agent { length: 1, body: vec![Cell::new(3, 3)], ..agent };
        assert_eq!(single.next_head_cells().count(), 4);
    }

    #[test]
    fn test_zone_nesting() {
        let outer = SafeZone { x_min: 0, y_min: 0, x_max: 39, y_max: 29 };
        let inner = SafeZone { x_min: 5, y_min: 5, x_max: 30, y_max: 20 };
        assert!(outer.encloses(&inner));
        assert!(!inner.encloses(&outer));
        assert!(inner.contains(&Cell::new(5, 30)));
        assert!(!inner.contains(&Cell::new(4, 30)));
    }

    #[test]
    fn test_zone_schedule_nesting() {
        let full = SafeZone { x_min: 0, y_min: 0, x_max: 39, y_max: 29 };
        let mid = SafeZone { x_min: 3, y_min: 3, x_max: 36, y_max: 26 };
        let small = SafeZone { x_min: 10, y_min: 10, x_max: 29, y_max: 19 };
        let mut world = World {
            remaining_ticks: 100,
            items: vec![],
            agents: vec![],
            chests: vec![],
            keys: vec![],
            zone: full,
            next_zone: ZoneShrink { tick: 180, zone: mid },
            final_zone: ZoneShrink { tick: 230, zone: small },
        };
        assert!(world.zone_schedule_nested());

        world.final_zone.zone = full;
        assert!(!world.zone_schedule_nested());
    }
}
