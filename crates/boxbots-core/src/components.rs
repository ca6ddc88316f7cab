//! Robot components attached to entities on the shift floor.

use serde::{Deserialize, Serialize};

/// A named robot on the floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Robot {
    /// Roster name; the key for every roster update
    pub name: String,
    /// Shift this body was deployed in
    pub deployed_shift: u32,
    /// Deployment order within that shift
    pub slot: u32,
    /// Built fresh this shift rather than returning from a previous one
    pub recruit: bool,
}

/// Seconds this robot has been on the floor during the current shift
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Survival {
    pub seconds: f32,
}

impl Survival {
    pub fn tick(&mut self, seconds: f32) {
        self.seconds += seconds.max(0.0);
    }
}

/// Marker component: the robot is holding a box
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Carrying;
