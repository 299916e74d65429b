//! Grid data model: rooms, boundaries and the dense cell arena.
//!
//! A `Grid` is a row-major array of `Room`s indexed by `Coord`. Cells
//! outside the playable footprint are present as `RoomType::Empty` rooms
//! with `Boundary::None` on every side, so neighbour lookups stay pure
//! index arithmetic.
//!
//! Once generation returns, consumers can read everything but may only
//! mutate item lists through [`Grid::remove_item`]. Boundary and type
//! writes are crate-private.

use serde::{Deserialize, Serialize};

/// Integer cell position. `y` grows northward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent coordinate in `dir`, without any bounds check.
    pub fn step(self, dir: Direction) -> Coord {
        let (dx, dy) = dir.offset();
        Coord::new(self.x + dx, self.y + dy)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compass direction. North is `y + 1`, south is `y - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    S,
    E,
    W,
}

impl Direction {
    /// Scan order used everywhere a deterministic direction order matters.
    pub const ALL: [Direction; 4] = [Direction::N, Direction::S, Direction::E, Direction::W];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::S => Direction::N,
            Direction::E => Direction::W,
            Direction::W => Direction::E,
        }
    }

    /// `(dx, dy)` for one step in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::N => (0, 1),
            Direction::S => (0, -1),
            Direction::E => (1, 0),
            Direction::W => (-1, 0),
        }
    }
}

/// Traversability of one room edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Boundary {
    /// No wall at all: outside the playable area, or open-plan space.
    None,
    Wall,
    Door,
}

impl Boundary {
    /// Anything but a wall can be walked through.
    pub fn is_passable(self) -> bool {
        self != Boundary::Wall
    }
}

/// Role of a room. Drives generation rules and, downstream, the visual theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Start,
    /// Parking/staging area in front of the building.
    Staging,
    Normal,
    Objective,
    Empty,
    End,
}

impl RoomType {
    /// Default display name for rooms of this type.
    pub fn default_name(self) -> &'static str {
        match self {
            RoomType::Start => "Entrance",
            RoomType::Staging => "Parking Lot",
            RoomType::Normal => "Corridor",
            RoomType::Objective => "Objective",
            RoomType::Empty => "Void",
            RoomType::End => "Exit",
        }
    }
}

/// Collectible content tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    RedFolder,
}

/// Gameplay flags. The generator only ever initializes these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomState {
    pub visited: bool,
    pub locked: bool,
}

/// Opaque room identity, independent of the room's array slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub u32);

/// The four edge states of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundaries {
    pub n: Boundary,
    pub s: Boundary,
    pub e: Boundary,
    pub w: Boundary,
}

impl Boundaries {
    pub const fn uniform(b: Boundary) -> Self {
        Self {
            n: b,
            s: b,
            e: b,
            w: b,
        }
    }

    pub fn get(&self, dir: Direction) -> Boundary {
        match dir {
            Direction::N => self.n,
            Direction::S => self.s,
            Direction::E => self.e,
            Direction::W => self.w,
        }
    }

    pub(crate) fn set(&mut self, dir: Direction, value: Boundary) {
        match dir {
            Direction::N => self.n = value,
            Direction::S => self.s = value,
            Direction::E => self.e = value,
            Direction::W => self.w = value,
        }
    }

    /// Number of edges equal to `value`.
    pub fn count(&self, value: Boundary) -> usize {
        Direction::ALL
            .iter()
            .filter(|&&d| self.get(d) == value)
            .count()
    }
}

/// One grid cell's content and topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub coord: Coord,
    pub room_type: RoomType,
    pub name: String,
    pub boundaries: Boundaries,
    pub items: Vec<Item>,
    pub state: RoomState,
}

impl Room {
    pub fn new(id: RoomId, coord: Coord, room_type: RoomType) -> Self {
        let fill = if room_type == RoomType::Empty {
            Boundary::None
        } else {
            Boundary::Wall
        };
        Self {
            id,
            coord,
            room_type,
            name: room_type.default_name().to_string(),
            boundaries: Boundaries::uniform(fill),
            items: Vec::new(),
            state: RoomState::default(),
        }
    }

    pub fn boundary(&self, dir: Direction) -> Boundary {
        self.boundaries.get(dir)
    }

    /// True for every room inside the playable footprint.
    pub fn is_playable(&self) -> bool {
        self.room_type != RoomType::Empty
    }

    pub fn has_item(&self, item: Item) -> bool {
        self.items.contains(&item)
    }
}

/// Fixed-size dense room arena, row-major with `y = 0` first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    rooms: Vec<Room>,
}

impl Grid {
    /// Build a grid by calling `make` once per cell, row-major from `y = 0`.
    /// `make` must return a room whose `coord` is the one it was given.
    pub(crate) fn from_fn(width: usize, height: usize, mut make: impl FnMut(Coord) -> Room) -> Self {
        let mut rooms = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let c = Coord::new(x as i32, y as i32);
                let mut room = make(c);
                room.coord = c;
                rooms.push(room);
            }
        }
        Self {
            width,
            height,
            rooms,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.width && (c.y as usize) < self.height
    }

    pub(crate) fn index_of(&self, c: Coord) -> Option<usize> {
        self.contains(c)
            .then(|| c.y as usize * self.width + c.x as usize)
    }

    /// Room at `(x, y)`, or `None` outside the grid.
    pub fn room(&self, x: i32, y: i32) -> Option<&Room> {
        self.room_at(Coord::new(x, y))
    }

    pub fn room_at(&self, c: Coord) -> Option<&Room> {
        self.index_of(c).map(|i| &self.rooms[i])
    }

    pub(crate) fn room_at_mut(&mut self, c: Coord) -> Option<&mut Room> {
        let i = self.index_of(c)?;
        Some(&mut self.rooms[i])
    }

    /// All rooms, row-major, including Empty cells.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    /// Rooms inside the playable footprint.
    pub fn playable_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|r| r.is_playable())
    }

    pub fn playable_count(&self) -> usize {
        self.playable_rooms().count()
    }

    pub fn room_by_id(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn rooms_of_type(&self, room_type: RoomType) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(move |r| r.room_type == room_type)
    }

    /// The first Start room. A valid grid has exactly one.
    pub fn start(&self) -> Option<&Room> {
        self.rooms_of_type(RoomType::Start).next()
    }

    pub fn objectives(&self) -> impl Iterator<Item = &Room> {
        self.rooms_of_type(RoomType::Objective)
    }

    /// Adjacent in-grid coordinate, if any.
    pub fn neighbor(&self, c: Coord, dir: Direction) -> Option<Coord> {
        let n = c.step(dir);
        self.contains(n).then_some(n)
    }

    /// Adjacent playable room, if any.
    pub fn playable_neighbor(&self, c: Coord, dir: Direction) -> Option<&Room> {
        self.neighbor(c, dir)
            .and_then(|n| self.room_at(n))
            .filter(|r| r.is_playable())
    }

    /// Remove one `item` from the room at `c`.
    ///
    /// Returns `true` if something was removed. Removing an absent item, or
    /// addressing a coordinate outside the grid, is a no-op.
    pub fn remove_item(&mut self, c: Coord, item: Item) -> bool {
        let Some(room) = self.room_at_mut(c) else {
            return false;
        };
        match room.items.iter().position(|&i| i == item) {
            Some(pos) => {
                room.items.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_boundary(&mut self, c: Coord, dir: Direction, value: Boundary) {
        if let Some(room) = self.room_at_mut(c) {
            room.boundaries.set(dir, value);
        }
    }

    /// Write `value` on both sides of the edge between `c` and its neighbour.
    pub(crate) fn set_shared_edge(&mut self, c: Coord, dir: Direction, value: Boundary) {
        self.set_boundary(c, dir, value);
        if let Some(n) = self.neighbor(c, dir) {
            self.set_boundary(n, dir.opposite(), value);
        }
    }
}
