//! Directions, exits, and doors.

use std::fmt;

use mudcore_foundation::ZonedKey;

use crate::character::Character;

/// Compass and vertical directions.
///
/// Declaration order is the order exits are listed and matched in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// North.
    North,
    /// East.
    East,
    /// South.
    South,
    /// West.
    West,
    /// Northeast.
    Northeast,
    /// Northwest.
    Northwest,
    /// Southeast.
    Southeast,
    /// Southwest.
    Southwest,
    /// Up.
    Up,
    /// Down.
    Down,
}

impl Direction {
    /// All directions in listing order.
    pub const ALL: [Direction; 10] = [
        Self::North,
        Self::East,
        Self::South,
        Self::West,
        Self::Northeast,
        Self::Northwest,
        Self::Southeast,
        Self::Southwest,
        Self::Up,
        Self::Down,
    ];

    /// Full lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
            Self::Northeast => "northeast",
            Self::Northwest => "northwest",
            Self::Southeast => "southeast",
            Self::Southwest => "southwest",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Short alias (`n`, `ne`, `u`, ...).
    #[must_use]
    pub const fn alias(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::East => "e",
            Self::South => "s",
            Self::West => "w",
            Self::Northeast => "ne",
            Self::Northwest => "nw",
            Self::Southeast => "se",
            Self::Southwest => "sw",
            Self::Up => "u",
            Self::Down => "d",
        }
    }

    /// The direction leading back.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::Northeast => Self::Southwest,
            Self::Northwest => Self::Southeast,
            Self::Southeast => Self::Northwest,
            Self::Southwest => Self::Northeast,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Whether `word` names this direction or its alias, ignoring case.
    #[must_use]
    pub fn matches(self, word: &str) -> bool {
        word.eq_ignore_ascii_case(self.name()) || word.eq_ignore_ascii_case(self.alias())
    }

    /// Parses a direction name or alias, ignoring case.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.matches(word))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A door across an exit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Door {
    /// The door is shut.
    pub closed: bool,
    /// The door is locked (only meaningful while closed).
    pub locked: bool,
    /// The exit is hidden while the door is closed.
    pub secret: bool,
    /// Non-player characters may not pass.
    pub no_mob: bool,
}

impl Door {
    /// An open, ordinary door.
    #[must_use]
    pub fn open() -> Self {
        Self::default()
    }

    /// A closed, ordinary door.
    #[must_use]
    pub fn closed() -> Self {
        Self {
            closed: true,
            ..Self::default()
        }
    }

    /// Marks the door as locked (and closed).
    #[must_use]
    pub fn locked(mut self) -> Self {
        self.closed = true;
        self.locked = true;
        self
    }

    /// Marks the door as secret.
    #[must_use]
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Forbids NPCs from passing.
    #[must_use]
    pub fn no_mob(mut self) -> Self {
        self.no_mob = true;
        self
    }
}

/// One way out of a room.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exit {
    /// Which way it leads.
    pub direction: Direction,
    /// Zoned key of the destination room.
    pub destination: ZonedKey,
    /// Door across the exit, if any.
    pub door: Option<Door>,
}

impl Exit {
    /// Creates a doorless exit.
    #[must_use]
    pub fn new(direction: Direction, destination: ZonedKey) -> Self {
        Self {
            direction,
            destination,
            door: None,
        }
    }

    /// Puts a door across the exit.
    #[must_use]
    pub fn with_door(mut self, door: Door) -> Self {
        self.door = Some(door);
        self
    }

    /// Whether the exit has a shut door.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.door.is_some_and(|d| d.closed)
    }

    /// Secret exits are hidden while their door is shut.
    #[must_use]
    pub fn is_visible_to(&self, _actor: &Character) -> bool {
        !self.door.is_some_and(|d| d.secret && d.closed)
    }

    /// The actor could walk through right now.
    #[must_use]
    pub fn is_passable_by(&self, actor: &Character) -> bool {
        match self.door {
            None => true,
            Some(door) => !door.closed && (actor.is_player() || !door.no_mob),
        }
    }

    /// The actor can see what lies beyond.
    #[must_use]
    pub fn is_peekable_by(&self, actor: &Character) -> bool {
        self.is_visible_to(actor) && !self.is_closed()
    }

    /// There is an open door to shut.
    #[must_use]
    pub fn is_closeable(&self) -> bool {
        self.door.is_some_and(|d| !d.closed)
    }

    /// There is a shut door to open (locked doors still qualify).
    #[must_use]
    pub fn is_openable(&self) -> bool {
        self.is_closed()
    }
}
