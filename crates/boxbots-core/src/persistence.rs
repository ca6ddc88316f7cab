//! Save/Load functionality for carrying the roster between sessions
//!
//! Uses bincode for compact binary serialization. Only the roster and campaign
//! counters are written: saves happen between shifts, when no robot entities
//! are on the floor.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use boxbots_logic::error::RosterError;
use boxbots_logic::roster::{RobotRoster, RosterSnapshot};

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of a campaign between shifts
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Shifts played so far
    pub shift: u32,
    /// Robots built over the whole campaign
    pub robots_built: u32,
    /// Time scale
    pub time_scale: f32,
    /// Every name record
    pub roster: RosterSnapshot,
}

/// Result of loading a campaign
pub struct LoadedCampaign {
    pub roster: RobotRoster,
    pub shift: u32,
    pub robots_built: u32,
    pub time_scale: f32,
}

/// Save the roster and campaign counters to a writer
pub fn save_campaign<W: Write>(
    writer: W,
    roster: &RobotRoster,
    shift: u32,
    robots_built: u32,
    time_scale: f32,
) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        shift,
        robots_built,
        time_scale,
        roster: roster.snapshot(),
    };

    bincode::serialize_into(writer, &save_data)?;
    log::info!(
        "Saved campaign at shift {} ({} names tracked)",
        shift,
        roster.num_robot_names()
    );
    Ok(())
}

/// Load a campaign from a reader. `seed` pins the restored roster's RNG.
pub fn load_campaign<R: Read>(reader: R, seed: Option<u64>) -> Result<LoadedCampaign, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let roster = RobotRoster::from_snapshot(save_data.roster, seed)?;
    log::info!("Loaded campaign at shift {}", save_data.shift);

    Ok(LoadedCampaign {
        roster,
        shift: save_data.shift,
        robots_built: save_data.robots_built,
        time_scale: save_data.time_scale,
    })
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
    /// Saved name pool failed validation
    Roster(RosterError),
    /// Robots are still on the floor
    ShiftInProgress,
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl From<RosterError> for SaveError {
    fn from(e: RosterError) -> Self {
        SaveError::Roster(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SaveError::Roster(e) => write!(f, "Invalid roster: {}", e),
            SaveError::ShiftInProgress => write!(f, "Cannot save while a shift is in progress"),
        }
    }
}

impl std::error::Error for SaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use boxbots_logic::prelude::*;

    #[test]
    fn test_save_load_roundtrip() {
        let mut roster = RobotRoster::with_config(RosterConfig::seeded(5)).unwrap();
        roster.add_robot_box_delivery("Gladis").unwrap();
        roster
            .add_robot_survival_time("Gladis", 75.0, Fate::Alive)
            .unwrap();
        roster
            .add_robot_survival_time("Keaton", 9.0, Fate::Died(Cause::Bomb))
            .unwrap();

        let mut buffer = Vec::new();
        save_campaign(&mut buffer, &roster, 3, 7, 1.5).expect("Save failed");

        let loaded = load_campaign(&buffer[..], Some(5)).expect("Load failed");
        assert_eq!(loaded.shift, 3);
        assert_eq!(loaded.robots_built, 7);
        assert!((loaded.time_scale - 1.5).abs() < f32::EPSILON);
        assert_eq!(loaded.roster.record("Gladis"), roster.record("Gladis"));
        assert_eq!(loaded.roster.obituaries(), roster.obituaries());
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let data = SaveData {
            version: SAVE_VERSION + 1,
            shift: 0,
            robots_built: 0,
            time_scale: 1.0,
            roster: RobotRoster::new().snapshot(),
        };
        let buffer = bincode::serialize(&data).unwrap();

        match load_campaign(&buffer[..], None) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, SAVE_VERSION + 1);
            }
            _ => panic!("expected version mismatch"),
        }
    }

    #[test]
    fn test_truncated_save_is_an_error() {
        let roster = RobotRoster::new();
        let mut buffer = Vec::new();
        save_campaign(&mut buffer, &roster, 1, 1, 1.0).unwrap();
        buffer.truncate(buffer.len() / 2);
        assert!(load_campaign(&buffer[..], None).is_err());
    }
}
