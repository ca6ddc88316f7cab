//! BoxBots Headless Shift Harness
//!
//! Replays scripted shift scenarios through the shift engine and validates
//! roster bookkeeping. Runs entirely in-process — no rendering, no physics.
//!
//! Usage:
//!   cargo run -p boxbots-simtest
//!   cargo run -p boxbots-simtest -- --verbose
//!   RUST_LOG=debug cargo run -p boxbots-simtest

use std::collections::HashSet;

use boxbots_core::prelude::*;
use boxbots_logic::names::ROBOT_NAMES;
use boxbots_logic::obituary;
use serde::Deserialize;

// ── Scenario data ───────────────────────────────────────────────────────
const SCENARIOS_JSON: &str = include_str!("../../../data/shift_scenarios.json");

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    seed: u64,
    robots_per_shift: u32,
    time_scale: f32,
    shifts: Vec<ShiftScript>,
    expect_deaths: u32,
    expect_boxes: u32,
}

#[derive(Debug, Deserialize)]
struct ShiftScript {
    /// Real seconds before the shift closes
    length: f32,
    events: Vec<ScriptEvent>,
}

#[derive(Debug, Deserialize)]
struct ScriptEvent {
    /// Real seconds since the shift began
    at: f32,
    /// Deployment slot within the shift
    robot: usize,
    action: Action,
    #[serde(default)]
    cause: Option<Cause>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Action {
    Deliver,
    Die,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();

    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== BoxBots Shift Harness ===\n");

    let mut results = Vec::new();

    // 1. Name pool
    results.extend(validate_name_pool(verbose));

    // 2. Scripted scenarios
    results.extend(validate_scenarios(verbose));

    // 3. Pool exhaustion
    results.extend(validate_exhaustion(verbose));

    // 4. Save/load
    results.extend(validate_persistence(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Name Pool ────────────────────────────────────────────────────────

fn validate_name_pool(_verbose: bool) -> Vec<TestResult> {
    println!("--- Name Pool ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "pool_size".into(),
        passed: ROBOT_NAMES.len() == 60,
        detail: format!("{} names in pool", ROBOT_NAMES.len()),
    });

    let unique: HashSet<_> = ROBOT_NAMES.iter().collect();
    results.push(TestResult {
        name: "pool_unique".into(),
        passed: unique.len() == ROBOT_NAMES.len(),
        detail: format!("{} distinct names", unique.len()),
    });

    let roster = RobotRoster::new();
    results.push(TestResult {
        name: "pool_roster_matches".into(),
        passed: roster.num_robot_names() == ROBOT_NAMES.len()
            && roster.max_available_names() == ROBOT_NAMES.len(),
        detail: format!(
            "roster tracks {} of {} names",
            roster.num_robot_names(),
            roster.max_available_names()
        ),
    });

    results
}

// ── 2. Scenarios ────────────────────────────────────────────────────────

fn validate_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Scripted Shifts ---");
    let mut results = Vec::new();

    let scenarios: Vec<Scenario> = match serde_json::from_str(SCENARIOS_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "scenario_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "scenario_not_empty".into(),
        passed: !scenarios.is_empty(),
        detail: format!("{} scenarios loaded", scenarios.len()),
    });

    for scenario in &scenarios {
        match run_scenario(scenario, verbose) {
            Ok(r) => results.extend(r),
            Err(e) => results.push(TestResult {
                name: format!("{}_runs", scenario.name),
                passed: false,
                detail: e.to_string(),
            }),
        }
    }

    results
}

fn run_scenario(scenario: &Scenario, verbose: bool) -> Result<Vec<TestResult>, ShiftError> {
    let mut results = Vec::new();
    let mut engine = ShiftEngine::with_config(ShiftConfig {
        robots_per_shift: scenario.robots_per_shift,
        time_scale: scenario.time_scale,
        roster: RosterConfig::seeded(scenario.seed),
    })?;

    let mut dead: HashSet<String> = HashSet::new();
    let mut previous_survivors: Vec<String> = Vec::new();
    let mut unique_every_shift = true;
    let mut dead_never_return = true;
    let mut survivors_return = true;
    let mut total_deaths = 0;
    let mut total_boxes = 0;

    for script in &scenario.shifts {
        let robots = engine.begin_shift()?;
        let names: Vec<String> = robots
            .iter()
            .map(|&r| engine.robot_name(r))
            .collect::<Result<_, _>>()?;

        let live: HashSet<_> = names.iter().collect();
        unique_every_shift &= live.len() == names.len();
        dead_never_return &= names.iter().all(|n| !dead.contains(n));
        if previous_survivors.len() <= robots.len() {
            survivors_return &= previous_survivors.iter().all(|n| live.contains(n));
        }

        let mut events: Vec<&ScriptEvent> = script.events.iter().collect();
        events.sort_by(|a, b| a.at.partial_cmp(&b.at).unwrap_or(std::cmp::Ordering::Equal));

        let mut elapsed = 0.0;
        for event in events {
            engine.update(event.at - elapsed);
            elapsed = event.at;

            let Some(&robot) = robots.get(event.robot) else {
                log::warn!("{}: no robot in slot {}", scenario.name, event.robot);
                continue;
            };
            match event.action {
                Action::Deliver => {
                    engine.pick_up_box(robot)?;
                    engine.deliver_box(robot)?;
                }
                Action::Die => {
                    let cause = event.cause.unwrap_or(Cause::Unknown);
                    engine.destroy_robot(robot, cause)?;
                    dead.insert(names[event.robot].clone());
                }
            }
        }
        engine.update(script.length - elapsed);

        let summary = engine.end_shift()?;
        total_deaths += summary.deaths;
        total_boxes += summary.boxes_delivered;
        previous_survivors = summary.survivors;
    }

    let prefix = &scenario.name;
    results.push(TestResult {
        name: format!("{}_unique_names", prefix),
        passed: unique_every_shift,
        detail: "no name deployed twice in one shift".into(),
    });
    results.push(TestResult {
        name: format!("{}_dead_stay_dead", prefix),
        passed: dead_never_return,
        detail: format!("{} dead names never redeployed", dead.len()),
    });
    results.push(TestResult {
        name: format!("{}_survivors_return", prefix),
        passed: survivors_return,
        detail: "every survivor redeployed next shift".into(),
    });
    results.push(TestResult {
        name: format!("{}_deaths", prefix),
        passed: total_deaths == scenario.expect_deaths
            && engine.roster.dead_count() == scenario.expect_deaths as usize,
        detail: format!(
            "{} deaths (expected {})",
            total_deaths, scenario.expect_deaths
        ),
    });
    results.push(TestResult {
        name: format!("{}_boxes", prefix),
        passed: total_boxes == scenario.expect_boxes
            && engine.roster.total_boxes_delivered() == scenario.expect_boxes,
        detail: format!(
            "{} boxes delivered (expected {})",
            total_boxes, scenario.expect_boxes
        ),
    });

    let obituaries = engine.obituaries();
    let mut dead_records: Vec<&NameRecord> =
        engine.roster.records().filter(|r| r.is_dead()).collect();
    dead_records.sort_by(|a, b| {
        b.boxes_delivered
            .cmp(&a.boxes_delivered)
            .then(b.time_survived.total_cmp(&a.time_survived))
    });
    let expected: Vec<String> = dead_records
        .into_iter()
        .map(obituary::format_obituary)
        .collect();
    results.push(TestResult {
        name: format!("{}_obituary_order", prefix),
        passed: obituaries == expected,
        detail: format!("{} obituaries ranked by boxes, then time", obituaries.len()),
    });

    if verbose {
        println!("  {} (after {} shifts):", scenario.name, engine.shift);
        for line in &obituaries {
            println!("    {}", line);
        }
    }

    Ok(results)
}

// ── 3. Pool Exhaustion ──────────────────────────────────────────────────

fn validate_exhaustion(_verbose: bool) -> Vec<TestResult> {
    println!("--- Pool Exhaustion ---");
    let mut results = Vec::new();

    let mut engine = match ShiftEngine::with_config(ShiftConfig {
        robots_per_shift: 7,
        roster: RosterConfig::seeded(99),
        ..Default::default()
    }) {
        Ok(e) => e,
        Err(e) => {
            results.push(TestResult {
                name: "exhaustion_setup".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let mut shifts = 0;
    let mut outcome = Ok(());
    while !engine.is_game_over() && shifts < 20 {
        let robots = match engine.begin_shift() {
            Ok(r) => r,
            Err(e) => {
                outcome = Err(e);
                break;
            }
        };
        for robot in robots {
            engine.update(1.0);
            if let Err(e) = engine.destroy_robot(robot, Cause::Bomb) {
                outcome = Err(e);
            }
        }
        if let Err(e) = engine.end_shift() {
            outcome = Err(e);
        }
        shifts += 1;
    }

    results.push(TestResult {
        name: "exhaustion_game_over".into(),
        passed: outcome.is_ok() && engine.is_game_over(),
        detail: format!(
            "game over after {} shifts, {} robots built",
            shifts, engine.robots_built
        ),
    });
    results.push(TestResult {
        name: "exhaustion_all_names_used".into(),
        passed: engine.robots_built as usize == ROBOT_NAMES.len()
            && engine.obituaries().len() == ROBOT_NAMES.len(),
        detail: format!("{} obituaries", engine.obituaries().len()),
    });

    let refused = matches!(
        engine.begin_shift(),
        Err(ShiftError::Roster(RosterError::PoolExhausted))
    );
    results.push(TestResult {
        name: "exhaustion_refuses_shift".into(),
        passed: refused && !engine.is_shift_in_progress(),
        detail: "no shift starts once every name is dead".into(),
    });

    results
}

// ── 4. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(_verbose: bool) -> Vec<TestResult> {
    println!("--- Save/Load ---");
    let mut results = Vec::new();

    let mut engine = ShiftEngine::new();
    let played = engine.begin_shift().and_then(|robots| {
        engine.update(25.0);
        if let Some(&first) = robots.first() {
            engine.pick_up_box(first)?;
            engine.deliver_box(first)?;
            engine.destroy_robot(first, Cause::Crusher)?;
        }
        engine.end_shift()
    });

    let mut buffer = Vec::new();
    let saved = played.is_ok() && engine.save(&mut buffer).is_ok();
    results.push(TestResult {
        name: "persistence_save".into(),
        passed: saved,
        detail: format!("{} bytes written", buffer.len()),
    });

    let mut restored = ShiftEngine::new();
    let loaded = restored.load(&buffer[..], None);
    results.push(TestResult {
        name: "persistence_roundtrip".into(),
        passed: loaded.is_ok()
            && restored.shift == engine.shift
            && restored.obituaries() == engine.obituaries()
            && restored.roster.alive_count() == engine.roster.alive_count(),
        detail: match loaded {
            Ok(()) => format!("{} obituaries restored", restored.obituaries().len()),
            Err(e) => e.to_string(),
        },
    });

    results
}
