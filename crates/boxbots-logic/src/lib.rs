//! Pure roster logic for BoxBots.
//!
//! This crate contains the bookkeeping that sits behind every robot on the
//! floor: which names are free, which robots survived to the next shift, how
//! long each one lasted and how many boxes it delivered. Nothing here knows
//! about entities, rendering or save files, so everything is unit-testable
//! with plain data.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Roster configuration (name pool, RNG seed) |
//! | [`error`] | Roster error type |
//! | [`names`] | The built-in 60-name pool |
//! | [`obituary`] | Ranking and formatting of obituary lines |
//! | [`record`] | Per-name record, fate and cause of death |
//! | [`roster`] | Name allocation, survivor hand-back, stat updates |
//!
//! # Example
//!
//! ```rust
//! use boxbots_logic::prelude::*;
//!
//! let mut roster = RobotRoster::with_config(RosterConfig::seeded(42)).unwrap();
//! let name = roster.try_get_survivor_name().unwrap().into_name();
//! roster.add_robot_box_delivery(&name).unwrap();
//! roster
//!     .add_robot_survival_time(&name, 61.0, Fate::Died(Cause::Crusher))
//!     .unwrap();
//!
//! assert_eq!(
//!     roster.obituaries()[0],
//!     format!("{} delivered 1 boxes, and was crushed after 61 seconds.", name)
//! );
//! ```

pub mod config;
pub mod error;
pub mod names;
pub mod obituary;
pub mod record;
pub mod roster;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::RosterConfig;
    pub use crate::error::RosterError;
    pub use crate::record::{Cause, Fate, NameRecord};
    pub use crate::roster::{Assignment, RobotRoster, RosterSnapshot};
}
