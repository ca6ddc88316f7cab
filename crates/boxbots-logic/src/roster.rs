//! The robot roster: name allocation, survivor hand-back, and per-name records.
//!
//! A roster owns one [`NameRecord`] per pool entry, kept in pool order. Names
//! move through a simple lifecycle:
//!
//! ```text
//! unused --claim--> in service --end of shift--> survivor --next shift--> in service
//!                        |                                                    |
//!                        +--------------------- death ------------------------+--> dead
//! ```
//!
//! Dead names stay dead until [`RobotRoster::reset_names`].

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::RosterConfig;
use crate::error::RosterError;
use crate::obituary;
use crate::record::{Fate, NameRecord};

/// Result of asking the roster for a robot name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// A robot that survived a previous shift returns
    Survivor(String),
    /// No survivors left to hand back; a new robot must be built under this name
    Recruit(String),
}

impl Assignment {
    pub fn name(&self) -> &str {
        match self {
            Assignment::Survivor(name) | Assignment::Recruit(name) => name,
        }
    }

    pub fn is_recruit(&self) -> bool {
        matches!(self, Assignment::Recruit(_))
    }

    pub fn into_name(self) -> String {
        match self {
            Assignment::Survivor(name) | Assignment::Recruit(name) => name,
        }
    }
}

/// Serializable roster state (the RNG is not persisted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub records: Vec<NameRecord>,
    pub survivor_names_used: u32,
}

/// Tracks every robot name, who is alive, and what they achieved
#[derive(Debug, Clone)]
pub struct RobotRoster {
    records: Vec<NameRecord>,
    index: HashMap<String, usize>,
    survivor_names_used: u32,
    rng: StdRng,
}

impl RobotRoster {
    /// Roster over the built-in pool with an entropy-seeded RNG.
    pub fn new() -> Self {
        let config = RosterConfig::default();
        Self::build(config.names, make_rng(config.seed))
    }

    /// Roster over a configured pool.
    pub fn with_config(config: RosterConfig) -> Result<Self, RosterError> {
        config.validate()?;
        Ok(Self::build(config.names, make_rng(config.seed)))
    }

    fn build(names: Vec<String>, rng: StdRng) -> Self {
        let records: Vec<NameRecord> = names.into_iter().map(NameRecord::new).collect();
        let index = build_index(&records);
        Self {
            records,
            index,
            survivor_names_used: 0,
            rng,
        }
    }

    /// Rebuild a roster from saved state.
    pub fn from_snapshot(snapshot: RosterSnapshot, seed: Option<u64>) -> Result<Self, RosterError> {
        let config = RosterConfig {
            names: snapshot.records.iter().map(|r| r.name.clone()).collect(),
            seed,
        };
        config.validate()?;

        let index = build_index(&snapshot.records);
        Ok(Self {
            records: snapshot.records,
            index,
            survivor_names_used: snapshot.survivor_names_used,
            rng: make_rng(seed),
        })
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            records: self.records.clone(),
            survivor_names_used: self.survivor_names_used,
        }
    }

    /// Number of tracked name records.
    pub fn num_robot_names(&self) -> usize {
        self.records.len()
    }

    /// Size of the raw name pool.
    pub fn max_available_names(&self) -> usize {
        self.index.len()
    }

    /// Forget every robot: all names unused, alive, with no history.
    pub fn reset_names(&mut self) {
        self.survivor_names_used = 0;
        for record in &mut self.records {
            *record = NameRecord::new(std::mem::take(&mut record.name));
        }
        log::debug!("Roster reset ({} names)", self.records.len());
    }

    /// Start handing survivors out again from the top of the roster.
    pub fn reset_survivor_names_used(&mut self) {
        self.survivor_names_used = 0;
        for record in &mut self.records {
            record.claimed = false;
        }
    }

    /// Names handed out since the last survivor reset.
    pub fn survivor_names_used(&self) -> u32 {
        self.survivor_names_used
    }

    /// Credit time on the floor to a robot and record how the stint ended.
    pub fn add_robot_survival_time(
        &mut self,
        name: &str,
        seconds: f32,
        fate: Fate,
    ) -> Result<(), RosterError> {
        let record = self.living_record_mut(name)?;
        record.used = true;
        record.time_survived += seconds.max(0.0);
        record.fate = fate;

        if let Fate::Died(cause) = fate {
            log::info!(
                "{} died ({:?}) after {:.1}s with {} boxes",
                record.name,
                cause,
                record.time_survived,
                record.boxes_delivered
            );
        }
        Ok(())
    }

    /// Count one delivered box. Returns the robot's new total.
    pub fn add_robot_box_delivery(&mut self, name: &str) -> Result<u32, RosterError> {
        let record = self.living_record_mut(name)?;
        record.used = true;
        record.boxes_delivered += 1;
        Ok(record.boxes_delivered)
    }

    /// Next name for a robot entering the floor.
    ///
    /// Survivors not yet handed out this shift come back first, in roster
    /// order. Once they run out a fresh name is drawn and the caller must build
    /// a new robot for it.
    pub fn try_get_survivor_name(&mut self) -> Result<Assignment, RosterError> {
        let survivor = self
            .records
            .iter()
            .position(|r| r.is_survivor() && !r.claimed);

        let assignment = match survivor {
            Some(idx) => {
                self.records[idx].claimed = true;
                Assignment::Survivor(self.records[idx].name.clone())
            }
            None => Assignment::Recruit(self.get_unused_name()?),
        };

        self.survivor_names_used += 1;
        Ok(assignment)
    }

    /// Claim a name nobody has used yet.
    ///
    /// Random picks are tried up to once per record; when the pool is nearly
    /// spent a linear scan takes the first unused name instead.
    pub fn get_unused_name(&mut self) -> Result<String, RosterError> {
        let total = self.records.len();
        if total == 0 {
            return Err(RosterError::PoolExhausted);
        }

        let mut picked = None;
        for _ in 0..total {
            let idx = self.rng.gen_range(0..total);
            if !self.records[idx].used {
                picked = Some(idx);
                break;
            }
        }

        let idx = match picked.or_else(|| self.records.iter().position(|r| !r.used)) {
            Some(idx) => idx,
            None => {
                log::warn!("Robot name pool exhausted ({} names)", total);
                return Err(RosterError::PoolExhausted);
            }
        };

        let record = &mut self.records[idx];
        record.used = true;
        record.claimed = true;
        log::debug!("Claimed unused name {}", record.name);
        Ok(record.name.clone())
    }

    /// Obituary lines for every dead robot, best first.
    pub fn obituaries(&self) -> Vec<String> {
        obituary::obituaries(&self.records)
    }

    /// Every robot that has ever been on the floor, ranked like the obituaries.
    pub fn standings(&self) -> Vec<&NameRecord> {
        let mut used: Vec<&NameRecord> = self.records.iter().filter(|r| r.used).collect();
        obituary::sort_ranked(&mut used);
        used
    }

    pub fn record(&self, name: &str) -> Option<&NameRecord> {
        self.index.get(name).map(|&idx| &self.records[idx])
    }

    pub fn records(&self) -> impl Iterator<Item = &NameRecord> {
        self.records.iter()
    }

    pub fn alive_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_survivor()).count()
    }

    pub fn dead_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_dead()).count()
    }

    /// Names that have never been handed out.
    pub fn names_remaining(&self) -> usize {
        self.records.iter().filter(|r| !r.used).count()
    }

    pub fn total_boxes_delivered(&self) -> u32 {
        self.records.iter().map(|r| r.boxes_delivered).sum()
    }

    fn living_record_mut(&mut self, name: &str) -> Result<&mut NameRecord, RosterError> {
        let idx = *self
            .index
            .get(name)
            .ok_or_else(|| RosterError::UnknownName(name.to_string()))?;
        let record = &mut self.records[idx];
        if record.is_dead() {
            return Err(RosterError::AlreadyDead(record.name.clone()));
        }
        Ok(record)
    }
}

impl Default for RobotRoster {
    fn default() -> Self {
        Self::new()
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn build_index(records: &[NameRecord]) -> HashMap<String, usize> {
    records
        .iter()
        .enumerate()
        .map(|(idx, r)| (r.name.clone(), idx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Cause;
    use std::collections::HashSet;

    fn roster() -> RobotRoster {
        RobotRoster::with_config(RosterConfig::seeded(7)).unwrap()
    }

    fn small_roster(names: &[&str]) -> RobotRoster {
        RobotRoster::with_config(RosterConfig {
            names: names.iter().map(|n| n.to_string()).collect(),
            seed: Some(3),
        })
        .unwrap()
    }

    #[test]
    fn test_fresh_roster_counts() {
        let r = roster();
        assert_eq!(r.num_robot_names(), 60);
        assert_eq!(r.max_available_names(), 60);
        assert_eq!(r.names_remaining(), 60);
        assert_eq!(r.alive_count(), 0);
        assert_eq!(r.dead_count(), 0);
        assert!(r.obituaries().is_empty());
    }

    #[test]
    fn test_first_assignment_is_recruit() {
        let mut r = roster();
        let a = r.try_get_survivor_name().unwrap();
        assert!(a.is_recruit());
        let record = r.record(a.name()).unwrap();
        assert!(record.used);
        assert!(record.is_claimed());
        assert_eq!(r.survivor_names_used(), 1);
    }

    #[test]
    fn test_unused_names_are_distinct_until_exhausted() {
        let mut r = roster();
        let mut seen = HashSet::new();
        for _ in 0..60 {
            let name = r.get_unused_name().unwrap();
            assert!(seen.insert(name));
        }
        assert_eq!(r.names_remaining(), 0);
        assert_eq!(r.get_unused_name(), Err(RosterError::PoolExhausted));
    }

    #[test]
    fn test_linear_fallback_finds_last_name() {
        let mut r = small_roster(&["A", "B", "C"]);
        r.add_robot_box_delivery("A").unwrap();
        r.add_robot_box_delivery("C").unwrap();
        // Only B is unused; whatever the random picks do, B must come back.
        assert_eq!(r.get_unused_name().unwrap(), "B");
    }

    #[test]
    fn test_survivors_return_in_roster_order() {
        let mut r = small_roster(&["A", "B", "C", "D"]);
        r.add_robot_survival_time("C", 10.0, Fate::Alive).unwrap();
        r.add_robot_survival_time("A", 5.0, Fate::Alive).unwrap();
        r.reset_survivor_names_used();

        assert_eq!(
            r.try_get_survivor_name().unwrap(),
            Assignment::Survivor("A".into())
        );
        assert_eq!(
            r.try_get_survivor_name().unwrap(),
            Assignment::Survivor("C".into())
        );
        let third = r.try_get_survivor_name().unwrap();
        assert!(third.is_recruit());
        assert!(matches!(third.name(), "B" | "D"));
        assert_eq!(r.survivor_names_used(), 3);
    }

    #[test]
    fn test_recruit_not_handed_back_same_shift() {
        let mut r = small_roster(&["A", "B"]);
        let first = r.try_get_survivor_name().unwrap().into_name();
        let second = r.try_get_survivor_name().unwrap().into_name();
        assert_ne!(first, second);
        assert_eq!(r.try_get_survivor_name(), Err(RosterError::PoolExhausted));
    }

    #[test]
    fn test_dead_survivor_skipped() {
        let mut r = small_roster(&["A", "B", "C"]);
        r.add_robot_survival_time("A", 3.0, Fate::Died(Cause::Pit)).unwrap();
        r.add_robot_survival_time("B", 3.0, Fate::Alive).unwrap();
        r.reset_survivor_names_used();
        assert_eq!(
            r.try_get_survivor_name().unwrap(),
            Assignment::Survivor("B".into())
        );
        assert_eq!(
            r.try_get_survivor_name().unwrap(),
            Assignment::Recruit("C".into())
        );
    }

    #[test]
    fn test_survival_time_accumulates() {
        let mut r = roster();
        r.add_robot_survival_time("Kyle", 12.5, Fate::Alive).unwrap();
        r.add_robot_survival_time("Kyle", 7.5, Fate::Died(Cause::Bomb))
            .unwrap();
        let kyle = r.record("Kyle").unwrap();
        assert_eq!(kyle.time_survived, 20.0);
        assert_eq!(kyle.fate, Fate::Died(Cause::Bomb));
        assert_eq!(r.dead_count(), 1);
    }

    #[test]
    fn test_dead_records_are_final() {
        let mut r = roster();
        r.add_robot_survival_time("Fish", 1.0, Fate::Died(Cause::Fire))
            .unwrap();
        assert_eq!(
            r.add_robot_box_delivery("Fish"),
            Err(RosterError::AlreadyDead("Fish".into()))
        );
        assert_eq!(
            r.add_robot_survival_time("Fish", 1.0, Fate::Alive),
            Err(RosterError::AlreadyDead("Fish".into()))
        );
    }

    #[test]
    fn test_unknown_name_rejected() {
        let mut r = roster();
        assert_eq!(
            r.add_robot_box_delivery("Ghost"),
            Err(RosterError::UnknownName("Ghost".into()))
        );
    }

    #[test]
    fn test_box_delivery_counts() {
        let mut r = roster();
        assert_eq!(r.add_robot_box_delivery("Radar").unwrap(), 1);
        assert_eq!(r.add_robot_box_delivery("Radar").unwrap(), 2);
        r.add_robot_box_delivery("Lucy").unwrap();
        assert_eq!(r.total_boxes_delivered(), 3);
        assert!(r.record("Radar").unwrap().used);
    }

    #[test]
    fn test_obituaries_ranked() {
        let mut r = roster();
        for _ in 0..2 {
            r.add_robot_box_delivery("Mosh").unwrap();
        }
        r.add_robot_survival_time("Mosh", 30.0, Fate::Died(Cause::Crusher))
            .unwrap();
        r.add_robot_box_delivery("Disk").unwrap();
        r.add_robot_survival_time("Disk", 90.0, Fate::Died(Cause::Pit))
            .unwrap();
        r.add_robot_box_delivery("Dice").unwrap();
        r.add_robot_survival_time("Dice", 120.4, Fate::Died(Cause::Fire))
            .unwrap();
        r.add_robot_survival_time("Kit", 500.0, Fate::Alive).unwrap();

        assert_eq!(
            r.obituaries(),
            vec![
                "Mosh delivered 2 boxes, and was crushed after 30 seconds.".to_string(),
                "Dice delivered 1 boxes, and got fired after 120 seconds.".to_string(),
                "Disk delivered 1 boxes, and fell in a pit after 90 seconds.".to_string(),
            ]
        );
        let standings: Vec<_> = r.standings().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(standings, vec!["Mosh", "Dice", "Disk", "Kit"]);
    }

    #[test]
    fn test_reset_names_clears_history() {
        let mut r = roster();
        r.try_get_survivor_name().unwrap();
        r.add_robot_survival_time("Bob", 4.0, Fate::Died(Cause::Bomb)).unwrap();
        r.reset_names();
        assert_eq!(r.names_remaining(), 60);
        assert_eq!(r.dead_count(), 0);
        assert_eq!(r.survivor_names_used(), 0);
        assert_eq!(r.record("Bob").unwrap(), &NameRecord::new("Bob"));
    }

    #[test]
    fn test_seeded_rosters_agree() {
        let mut a = roster();
        let mut b = roster();
        for _ in 0..10 {
            assert_eq!(a.get_unused_name().unwrap(), b.get_unused_name().unwrap());
        }
    }

    #[test]
    fn test_snapshot_restores_records() {
        let mut r = roster();
        r.add_robot_box_delivery("Olivia").unwrap();
        r.add_robot_survival_time("Olivia", 8.0, Fate::Alive).unwrap();
        let restored = RobotRoster::from_snapshot(r.snapshot(), Some(1)).unwrap();
        assert_eq!(restored.record("Olivia"), r.record("Olivia"));
        assert_eq!(restored.num_robot_names(), 60);
    }

    #[test]
    fn test_empty_pool_exhausted() {
        let mut r = small_roster(&[]);
        assert_eq!(r.try_get_survivor_name(), Err(RosterError::PoolExhausted));
        assert_eq!(r.max_available_names(), 0);
    }
}
