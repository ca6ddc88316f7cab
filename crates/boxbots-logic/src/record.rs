//! Per-name bookkeeping: usage, survival time, deliveries, and fate.

use serde::{Deserialize, Serialize};

/// How a robot left the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cause {
    /// Flattened by a crusher
    Crusher,
    /// Fell into a pit
    Pit,
    /// Burned up
    Fire,
    /// Caught in an explosion
    Bomb,
    /// Removed without a recorded hazard
    Unknown,
}

impl Cause {
    /// Lead-in used in obituaries, immediately followed by the survival time.
    pub fn phrase(&self) -> &'static str {
        match self {
            Cause::Crusher => "and was crushed after ",
            Cause::Fire => "and got fired after ",
            Cause::Pit => "and fell in a pit after ",
            Cause::Bomb => "and was obliterated after ",
            Cause::Unknown => "and continued to live? after ",
        }
    }
}

/// Whether a named robot is still around
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fate {
    #[default]
    Alive,
    Died(Cause),
}

impl Fate {
    pub fn is_dead(&self) -> bool {
        matches!(self, Fate::Died(_))
    }

    pub fn cause(&self) -> Option<Cause> {
        match self {
            Fate::Alive => None,
            Fate::Died(cause) => Some(*cause),
        }
    }
}

/// Everything the roster knows about one name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRecord {
    pub name: String,
    /// Has this name ever been given to a robot
    pub used: bool,
    pub fate: Fate,
    /// Accumulated seconds on the floor across shifts
    pub time_survived: f32,
    pub boxes_delivered: u32,
    /// Handed out during the current shift
    #[serde(default)]
    pub(crate) claimed: bool,
}

impl NameRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            used: false,
            fate: Fate::Alive,
            time_survived: 0.0,
            boxes_delivered: 0,
            claimed: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.fate.is_dead()
    }

    /// Used and still alive: eligible to come back next shift.
    pub fn is_survivor(&self) -> bool {
        self.used && !self.is_dead()
    }

    /// Whether the name has been handed out since the last shift reset.
    pub fn is_claimed(&self) -> bool {
        self.claimed
    }
}
