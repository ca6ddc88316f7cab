//! BoxBots Core - Shift Engine
//!
//! Runs the robot floor of a box-delivery game on top of the pure roster logic
//! in `boxbots-logic`.
//!
//! # Architecture
//!
//! The floor uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Robots currently deployed
//! - **Components**: Pure data attached to entities (Robot, Survival, Carrying)
//! - **Engine**: Shift lifecycle that queries components and updates the roster
//!
//! # Example
//!
//! ```rust
//! use boxbots_core::prelude::*;
//!
//! let mut engine = ShiftEngine::new();
//! let robots = engine.begin_shift().unwrap();
//!
//! engine.update(1.0 / 60.0);
//! engine.pick_up_box(robots[0]).unwrap();
//! engine.deliver_box(robots[0]).unwrap();
//! engine.destroy_robot(robots[1], Cause::Pit).unwrap();
//!
//! let summary = engine.end_shift().unwrap();
//! assert_eq!(summary.deaths, 1);
//! assert_eq!(engine.obituaries().len(), 1);
//! ```

pub mod components;
pub mod engine;
pub mod persistence;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{ShiftConfig, ShiftEngine, ShiftError, ShiftSummary};
    pub use boxbots_logic::prelude::*;
}
