//! Roster configuration.
//!
//! The default configuration uses the built-in 60-name pool and an entropy
//! seeded RNG. Tests and replays pin `seed` so allocation is reproducible.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::RosterError;
use crate::names::default_names;

/// Configuration for a [`RobotRoster`](crate::roster::RobotRoster).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Name pool, in roster order
    pub names: Vec<String>,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            names: default_names(),
            seed: None,
        }
    }
}

impl RosterConfig {
    /// Default pool with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Reject blank or repeated names.
    pub fn validate(&self) -> Result<(), RosterError> {
        let mut seen = HashSet::with_capacity(self.names.len());
        for name in &self.names {
            if name.trim().is_empty() {
                return Err(RosterError::EmptyName);
            }
            if !seen.insert(name.as_str()) {
                return Err(RosterError::DuplicateName(name.clone()));
            }
        }
        Ok(())
    }
}
