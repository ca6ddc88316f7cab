//! Shift engine - main entry point for running a BoxBots campaign

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use boxbots_logic::prelude::*;

use crate::components::*;
use crate::persistence::{self, SaveError};

/// Configuration for a campaign
#[derive(Debug, Clone)]
pub struct ShiftConfig {
    /// Robots deployed when a shift begins
    pub robots_per_shift: u32,
    /// 1.0 = real-time, 2.0 = 2x speed, etc.
    pub time_scale: f32,
    pub roster: RosterConfig,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            robots_per_shift: 5,
            time_scale: 1.0,
            roster: RosterConfig::default(),
        }
    }
}

/// What happened during one shift
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftSummary {
    pub shift: u32,
    /// Scaled seconds the shift lasted
    pub duration: f64,
    /// Robots still standing at the end, in deployment order
    pub survivors: Vec<String>,
    pub deployed: u32,
    pub deaths: u32,
    pub boxes_delivered: u32,
    pub recruits: u32,
}

/// Errors from shift operations
#[derive(Debug, Clone, PartialEq)]
pub enum ShiftError {
    Roster(RosterError),
    /// The operation needs an active shift
    NoShiftInProgress,
    /// `begin_shift` called twice without `end_shift`
    ShiftInProgress,
    /// The entity is not a robot on the floor
    NotARobot(Entity),
    /// Delivery attempted by a robot with empty hands
    NotCarrying(Entity),
}

impl From<RosterError> for ShiftError {
    fn from(e: RosterError) -> Self {
        ShiftError::Roster(e)
    }
}

impl std::fmt::Display for ShiftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftError::Roster(e) => write!(f, "Roster error: {}", e),
            ShiftError::NoShiftInProgress => write!(f, "No shift in progress"),
            ShiftError::ShiftInProgress => write!(f, "A shift is already in progress"),
            ShiftError::NotARobot(e) => write!(f, "Entity {:?} is not a robot", e),
            ShiftError::NotCarrying(e) => write!(f, "Robot {:?} is not carrying a box", e),
        }
    }
}

impl std::error::Error for ShiftError {}

/// Main shift engine
pub struct ShiftEngine {
    /// ECS world containing robots on the floor
    pub world: World,
    /// Every robot name and its history
    pub roster: RobotRoster,
    /// Shifts started so far (the current one, while in progress)
    pub shift: u32,
    /// Scaled seconds since the current shift began
    pub shift_time: f64,
    /// Robots built over the whole campaign
    pub robots_built: u32,

    in_progress: bool,
    current: ShiftSummary,

    // Configuration
    robots_per_shift: u32,
    time_scale: f32,
}

impl ShiftEngine {
    /// Create an engine over the built-in name pool
    pub fn new() -> Self {
        let config = ShiftConfig::default();
        Self::from_roster(RobotRoster::new(), &config)
    }

    /// Create an engine from a config; fails if the name pool is invalid
    pub fn with_config(config: ShiftConfig) -> Result<Self, ShiftError> {
        let roster = RobotRoster::with_config(config.roster.clone())?;
        Ok(Self::from_roster(roster, &config))
    }

    fn from_roster(roster: RobotRoster, config: &ShiftConfig) -> Self {
        Self {
            world: World::new(),
            roster,
            shift: 0,
            shift_time: 0.0,
            robots_built: 0,
            in_progress: false,
            current: ShiftSummary::default(),
            robots_per_shift: config.robots_per_shift,
            time_scale: config.time_scale.max(0.0),
        }
    }

    /// Start a new shift and deploy the configured number of robots.
    ///
    /// Deployment stops early when the name pool runs dry; that is only an
    /// error when not a single robot could be deployed.
    pub fn begin_shift(&mut self) -> Result<Vec<Entity>, ShiftError> {
        if self.in_progress {
            return Err(ShiftError::ShiftInProgress);
        }

        self.shift += 1;
        self.shift_time = 0.0;
        self.in_progress = true;
        self.current = ShiftSummary {
            shift: self.shift,
            ..Default::default()
        };
        self.roster.reset_survivor_names_used();

        let mut deployed = Vec::with_capacity(self.robots_per_shift as usize);
        for _ in 0..self.robots_per_shift {
            match self.deploy_robot() {
                Ok(entity) => deployed.push(entity),
                Err(ShiftError::Roster(RosterError::PoolExhausted)) if !deployed.is_empty() => {
                    log::warn!(
                        "Shift {}: only {} of {} robots deployed, name pool exhausted",
                        self.shift,
                        deployed.len(),
                        self.robots_per_shift
                    );
                    break;
                }
                Err(e) => {
                    self.shift -= 1;
                    self.in_progress = false;
                    return Err(e);
                }
            }
        }

        log::info!("Shift {} started with {} robots", self.shift, deployed.len());
        Ok(deployed)
    }

    /// Put one more robot on the floor, preferring a returning survivor.
    pub fn deploy_robot(&mut self) -> Result<Entity, ShiftError> {
        if !self.in_progress {
            return Err(ShiftError::NoShiftInProgress);
        }

        let assignment = self.roster.try_get_survivor_name()?;
        let recruit = assignment.is_recruit();
        if recruit {
            self.robots_built += 1;
            self.current.recruits += 1;
            log::info!("Built new robot {}", assignment.name());
        } else {
            log::debug!("{} returns for shift {}", assignment.name(), self.shift);
        }

        let entity = self.world.spawn((
            Robot {
                name: assignment.into_name(),
                deployed_shift: self.shift,
                slot: self.current.deployed,
                recruit,
            },
            Survival::default(),
        ));
        self.current.deployed += 1;
        Ok(entity)
    }

    /// Advance the shift clock by delta_seconds
    pub fn update(&mut self, delta_seconds: f32) {
        if !self.in_progress {
            return;
        }
        let scaled_delta = delta_seconds.max(0.0) * self.time_scale;
        self.shift_time += scaled_delta as f64;

        for (_entity, survival) in self.world.query_mut::<&mut Survival>() {
            survival.tick(scaled_delta);
        }
    }

    /// Robot grabs a box. Returns false if it was already holding one.
    pub fn pick_up_box(&mut self, entity: Entity) -> Result<bool, ShiftError> {
        self.robot_name(entity)?;
        if self.world.get::<&Carrying>(entity).is_ok() {
            return Ok(false);
        }
        self.world
            .insert_one(entity, Carrying)
            .map_err(|_| ShiftError::NotARobot(entity))?;
        Ok(true)
    }

    /// Robot drops its box at the goal. Returns its lifetime delivery count.
    pub fn deliver_box(&mut self, entity: Entity) -> Result<u32, ShiftError> {
        let name = self.robot_name(entity)?;
        if self.world.get::<&Carrying>(entity).is_err() {
            return Err(ShiftError::NotCarrying(entity));
        }

        let total = self.roster.add_robot_box_delivery(&name)?;
        self.world.remove_one::<Carrying>(entity).ok();
        self.current.boxes_delivered += 1;
        Ok(total)
    }

    /// A hazard claims a robot. Its time on the floor is credited before it
    /// is removed.
    pub fn destroy_robot(&mut self, entity: Entity, cause: Cause) -> Result<(), ShiftError> {
        let name = self.robot_name(entity)?;
        let seconds = self.survival_seconds(entity);

        self.roster
            .add_robot_survival_time(&name, seconds, Fate::Died(cause))?;
        self.world.despawn(entity).ok();
        self.current.deaths += 1;
        Ok(())
    }

    /// Close the shift: survivors bank their time and leave the floor.
    ///
    /// Every robot is cleared and the shift always closes. A robot whose roster
    /// record can no longer be credited is left out of the survivors.
    pub fn end_shift(&mut self) -> Result<ShiftSummary, ShiftError> {
        if !self.in_progress {
            return Err(ShiftError::NoShiftInProgress);
        }

        let mut robots: Vec<(Entity, String, u32, f32)> = self
            .world
            .query::<(&Robot, &Survival)>()
            .iter()
            .map(|(e, (robot, survival))| (e, robot.name.clone(), robot.slot, survival.seconds))
            .collect();
        robots.sort_by_key(|(_, _, slot, _)| *slot);

        let mut summary = std::mem::take(&mut self.current);
        for (entity, name, _, seconds) in robots {
            self.world.despawn(entity).ok();
            match self
                .roster
                .add_robot_survival_time(&name, seconds, Fate::Alive)
            {
                Ok(()) => summary.survivors.push(name),
                Err(e) => log::warn!("Shift {}: {} not credited: {}", summary.shift, name, e),
            }
        }

        summary.duration = self.shift_time;
        self.in_progress = false;

        log::info!(
            "Shift {} ended after {:.1}s: {} survived, {} died, {} boxes delivered",
            summary.shift,
            summary.duration,
            summary.survivors.len(),
            summary.deaths,
            summary.boxes_delivered
        );
        Ok(summary)
    }

    /// No robot can ever take the floor again.
    pub fn is_game_over(&self) -> bool {
        self.robot_count() == 0
            && self.roster.alive_count() == 0
            && self.roster.names_remaining() == 0
    }

    pub fn is_shift_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Obituary lines for every dead robot, best first
    pub fn obituaries(&self) -> Vec<String> {
        self.roster.obituaries()
    }

    /// Count robots on the floor
    pub fn robot_count(&self) -> usize {
        self.world.query::<&Robot>().iter().count()
    }

    /// Robots on the floor with their names
    pub fn robots(&self) -> Vec<(Entity, String)> {
        self.world
            .query::<&Robot>()
            .iter()
            .map(|(e, robot)| (e, robot.name.clone()))
            .collect()
    }

    /// Find the robot entity wearing a name
    pub fn find_robot(&self, name: &str) -> Option<Entity> {
        self.world
            .query::<&Robot>()
            .iter()
            .find(|(_, robot)| robot.name == name)
            .map(|(e, _)| e)
    }

    pub fn robot_name(&self, entity: Entity) -> Result<String, ShiftError> {
        self.world
            .get::<&Robot>(entity)
            .map(|robot| robot.name.clone())
            .map_err(|_| ShiftError::NotARobot(entity))
    }

    fn survival_seconds(&self, entity: Entity) -> f32 {
        self.world
            .get::<&Survival>(entity)
            .map(|s| s.seconds)
            .unwrap_or(0.0)
    }

    /// Set time scale (1.0 = real-time, 2.0 = 2x speed, etc.)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Get current time scale
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Save the campaign to a writer. Only allowed between shifts.
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        if self.in_progress {
            return Err(SaveError::ShiftInProgress);
        }
        persistence::save_campaign(
            writer,
            &self.roster,
            self.shift,
            self.robots_built,
            self.time_scale,
        )
    }

    /// Load a campaign from a reader, replacing the current one
    pub fn load<R: std::io::Read>(&mut self, reader: R, seed: Option<u64>) -> Result<(), SaveError> {
        if self.in_progress {
            return Err(SaveError::ShiftInProgress);
        }
        let loaded = persistence::load_campaign(reader, seed)?;

        self.world.clear();
        self.roster = loaded.roster;
        self.shift = loaded.shift;
        self.robots_built = loaded.robots_built;
        self.time_scale = loaded.time_scale;
        self.shift_time = 0.0;
        self.current = ShiftSummary::default();

        Ok(())
    }
}

impl Default for ShiftEngine {
    fn default() -> Self {
        Self::new()
    }
}
