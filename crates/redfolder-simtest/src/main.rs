//! Red Folder Headless Generation Harness
//!
//! Generates levels without a renderer and checks every invariant the
//! game relies on: reachability, objectives, start placement, edge
//! symmetry, determinism and folder pickup.
//!
//! Usage:
//!   cargo run -p redfolder-simtest
//!   cargo run -p redfolder-simtest -- --seed 42 --runs 500 --verbose
//!   cargo run -p redfolder-simtest -- --config level.json --json

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use redfolder_logic::render::{legend, render_ascii};
use redfolder_logic::constants::DEFAULT_MAX_RETRIES;
use redfolder_logic::rng::level_rng;
use redfolder_logic::theme::{color_rgb, room_theme};
use redfolder_logic::validation::{errors_only, validate_grid, Severity};
use redfolder_logic::zones::ZoneLayout;
use redfolder_logic::{
    generate_with_config, generate_with_retries, validate_config, GenerationError,
    GeneratorConfig, Grid, Session,
};

/// CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file with a (partial) GeneratorConfig; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base seed for the sweep
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid width in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// First building row
    #[arg(short, long)]
    boundary: Option<usize>,

    /// Objective rooms per level
    #[arg(short, long)]
    objectives: Option<usize>,

    /// Probability an internal building edge starts as a wall
    #[arg(long)]
    wall_chance: Option<f64>,

    /// Place an exit room at the top of the building
    #[arg(long)]
    exit: bool,

    /// Levels to generate in the seed sweep
    #[arg(short, long, default_value = "200")]
    runs: u64,

    /// Regeneration attempts per level
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    retries: u32,

    /// Print one level as JSON and exit
    #[arg(long)]
    json: bool,

    /// Print every check, not just failures
    #[arg(short, long)]
    verbose: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: String) -> Self {
        Self {
            name: name.into(),
            passed,
            detail,
        }
    }
}

#[derive(Serialize)]
struct LevelDump<'a> {
    seed: Option<u64>,
    doors_carved: usize,
    grid: &'a Grid,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        std::process::exit(dump_json(&config, args.retries));
    }

    println!("=== Red Folder Generation Harness ===\n");
    info!("Harness config: {:?}", config);

    let mut results = Vec::new();

    // 1. Config sanity
    results.extend(validate_configuration(&config));

    // 2. Sample level
    results.extend(show_sample(&config, args.retries));

    // 3. Seed sweep
    results.extend(sweep_seeds(&config, args.runs, args.retries, args.verbose));

    // 4. Determinism
    results.extend(check_determinism(&config));

    // 5. Edge-case scenarios
    results.extend(check_scenarios());

    // 6. Folder pickup
    results.extend(check_session(&config, args.retries));

    // 7. Themes
    results.extend(check_themes(&config, args.retries));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
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

/// Defaults, then the config file, then individual flags.
fn build_config(args: &Args) -> Result<GeneratorConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            serde_json::from_str::<GeneratorConfig>(&text)
                .map_err(|e| format!("cannot parse {}: {}", path.display(), e))?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if let Some(b) = args.boundary {
        config.zone_boundary_row = b;
    }
    if let Some(o) = args.objectives {
        config.objective_count = o;
    }
    if let Some(p) = args.wall_chance {
        config.wall_chance = p;
    }
    if args.exit {
        config.place_exit = true;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn dump_json(config: &GeneratorConfig, retries: u32) -> i32 {
    let level = match generate_with_retries(config, retries) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {}", e);
            return 1;
        }
    };
    let dump = LevelDump {
        seed: level.seed,
        doors_carved: level.repair.doors_carved(),
        grid: &level.grid,
    };
    match serde_json::to_string_pretty(&dump) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("error: {}", e);
            1
        }
    }
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_configuration(config: &GeneratorConfig) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let errors = validate_config(config);
    vec![TestResult::new(
        "config_valid",
        errors.is_empty(),
        if errors.is_empty() {
            format!(
                "{}×{} grid, boundary row {}, {} objective(s), wall chance {:.2}",
                config.width,
                config.height,
                config.zone_boundary_row,
                config.objective_count,
                config.wall_chance
            )
        } else {
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    )]
}

// ── 2. Sample level ─────────────────────────────────────────────────────

fn show_sample(config: &GeneratorConfig, retries: u32) -> Vec<TestResult> {
    println!("--- Sample Level ---");
    match generate_with_retries(config, retries) {
        Ok(level) => {
            println!("{}", render_ascii(&level.grid));
            println!("{}\n", legend(&level.grid));
            vec![TestResult::new(
                "sample_generates",
                true,
                format!(
                    "seed {:?}, {} playable rooms, {} repair door(s)",
                    level.seed,
                    level.grid.playable_count(),
                    level.repair.doors_carved()
                ),
            )]
        }
        Err(e) => vec![TestResult::new("sample_generates", false, e.to_string())],
    }
}

// ── 3. Seed sweep ───────────────────────────────────────────────────────

fn sweep_seeds(config: &GeneratorConfig, runs: u64, retries: u32, verbose: bool) -> Vec<TestResult> {
    println!("--- Seed Sweep ({} runs) ---", runs);
    // per-run seeds come from their own stream, not the retry sequence
    let mut seeds = level_rng(Some(config.seed.unwrap_or(0)));
    let layout = ZoneLayout::from_config(config);
    let started = Instant::now();

    let mut generated = 0u64;
    let mut exhausted = 0u64;
    let mut retried = 0u64;
    let mut invalid = Vec::new();
    let mut near_objectives = 0usize;
    let mut total_doors = 0usize;

    for run in 0..runs {
        let seed: u64 = seeds.gen();
        let run_config = config.clone().with_seed(seed);
        match generate_with_retries(&run_config, retries) {
            Ok(level) => {
                generated += 1;
                total_doors += level.repair.doors_carved();
                if level.seed != Some(seed) {
                    retried += 1;
                }
                let checks = validate_grid(&level.grid, layout.start(), config.objective_count);
                near_objectives += checks
                    .iter()
                    .filter(|c| c.severity == Severity::Warning)
                    .count();
                let errors = errors_only(checks);
                if !errors.is_empty() {
                    invalid.push((seed, errors));
                }
            }
            Err(e) => {
                debug!("seed {} gave up: {}", seed, e);
                exhausted += 1;
            }
        }
        if verbose && run > 0 && run % 100 == 0 {
            println!("  ... {} levels", run);
        }
    }

    let elapsed = started.elapsed();
    let mut results = vec![
        TestResult::new(
            "sweep_all_generate",
            exhausted == 0,
            format!(
                "{}/{} generated, {} needed a reseed, {} gave up ({:.1?})",
                generated, runs, retried, exhausted, elapsed
            ),
        ),
        TestResult::new(
            "sweep_invariants_hold",
            invalid.is_empty(),
            match invalid.first() {
                None => format!("{} levels validated", generated),
                Some((seed, errors)) => format!(
                    "{} invalid level(s); seed {}: [{}] {}",
                    invalid.len(),
                    seed,
                    errors[0].category,
                    errors[0].message
                ),
            },
        ),
    ];
    if generated > 0 {
        results.push(TestResult::new(
            "sweep_repair_load",
            true,
            format!(
                "{:.2} repair door(s) per level on average",
                total_doors as f64 / generated as f64
            ),
        ));
        results.push(TestResult::new(
            "sweep_objective_spread",
            true,
            format!(
                "{} objective(s) within a few steps of start across {} levels",
                near_objectives, generated
            ),
        ));
    }
    results
}

// ── 4. Determinism ──────────────────────────────────────────────────────

fn check_determinism(config: &GeneratorConfig) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let seeds = [0u64, 1, 42, 9_999, u64::MAX];
    let mismatched: Vec<u64> = seeds
        .iter()
        .copied()
        .filter(|&s| {
            let c = config.clone().with_seed(s);
            generate_with_config(&c).ok() != generate_with_config(&c).ok()
        })
        .collect();

    vec![TestResult::new(
        "same_seed_same_grid",
        mismatched.is_empty(),
        if mismatched.is_empty() {
            format!("{} seeds replayed identically", seeds.len())
        } else {
            format!("seeds diverged: {:?}", mismatched)
        },
    )]
}

// ── 5. Scenarios ────────────────────────────────────────────────────────

fn check_scenarios() -> Vec<TestResult> {
    println!("--- Scenarios ---");
    let mut results = Vec::new();

    // 7×1 building row, fully walled, one objective
    let small = GeneratorConfig {
        width: 7,
        height: 4,
        zone_boundary_row: 3,
        objective_count: 1,
        wall_chance: 1.0,
        seed: Some(7),
        ..Default::default()
    };
    let layout = ZoneLayout::from_config(&small);
    results.push(match generate_with_config(&small) {
        Ok(grid) => {
            let errors = errors_only(validate_grid(&grid, layout.start(), 1));
            TestResult::new(
                "small_grid_repaired",
                errors.is_empty(),
                format!("{} playable rooms, {} violation(s)", grid.playable_count(), errors.len()),
            )
        }
        Err(e) => TestResult::new("small_grid_repaired", false, e.to_string()),
    });

    // staging band as wide as the grid over the same walled row
    let full_band = GeneratorConfig {
        staging_half_width: 3,
        ..small.clone()
    };
    let layout = ZoneLayout::from_config(&full_band);
    results.push(match generate_with_config(&full_band) {
        Ok(grid) => {
            let errors = errors_only(validate_grid(&grid, layout.start(), 1));
            let ok = grid.playable_count() == 28 && errors.is_empty();
            TestResult::new(
                "full_width_band_repaired",
                ok,
                format!("{} playable rooms, {} violation(s)", grid.playable_count(), errors.len()),
            )
        }
        Err(e) => TestResult::new("full_width_band_repaired", false, e.to_string()),
    });

    // building is a single reserved cell
    let cramped = GeneratorConfig {
        width: 1,
        height: 2,
        zone_boundary_row: 1,
        objective_count: 1,
        seed: Some(7),
        ..Default::default()
    };
    let outcome = generate_with_config(&cramped);
    results.push(TestResult::new(
        "placement_exhausted",
        matches!(outcome, Err(GenerationError::PlacementExhausted { .. })),
        match outcome {
            Ok(_) => "unexpectedly generated a level".into(),
            Err(e) => e.to_string(),
        },
    ));

    // repair budget too small for a fully walled default building
    let starved = GeneratorConfig {
        wall_chance: 1.0,
        repair_budget: 5,
        seed: Some(7),
        ..Default::default()
    };
    let outcome = generate_with_config(&starved);
    results.push(TestResult::new(
        "repair_budget_enforced",
        matches!(
            outcome,
            Err(GenerationError::ConnectivityRepairExhausted { carved: 5, .. })
        ),
        match outcome {
            Ok(_) => "unexpectedly generated a level".into(),
            Err(e) => e.to_string(),
        },
    ));

    results
}

// ── 6. Session ──────────────────────────────────────────────────────────

fn check_session(config: &GeneratorConfig, retries: u32) -> Vec<TestResult> {
    println!("--- Folder Pickup ---");
    let mut session = match Session::new(config.clone(), retries) {
        Ok(s) => s,
        Err(e) => return vec![TestResult::new("session_starts", false, e.to_string())],
    };

    let targets: Vec<_> = session.grid().objectives().map(|r| r.coord).collect();
    let first_pass = targets.iter().filter(|&&c| session.collect(c)).count();
    let snapshot = session.grid().clone();
    let second_pass = targets.iter().filter(|&&c| session.collect(c)).count();

    let restarted = session.restart().is_ok() && session.remaining() == config.objective_count;

    vec![
        TestResult::new(
            "pickup_collects_each_folder",
            first_pass == targets.len() && all_folders_gone(&snapshot),
            format!("{}/{} folders collected", first_pass, targets.len()),
        ),
        TestResult::new(
            "pickup_idempotent",
            second_pass == 0,
            format!("{} folder(s) collected twice", second_pass),
        ),
        TestResult::new(
            "restart_regenerates",
            restarted,
            format!("{} folder(s) after restart", session.remaining()),
        ),
    ]
}

fn all_folders_gone(grid: &Grid) -> bool {
    grid.rooms().all(|r| r.items.is_empty())
}

// ── 7. Themes ───────────────────────────────────────────────────────────

fn check_themes(config: &GeneratorConfig, retries: u32) -> Vec<TestResult> {
    println!("--- Themes ---");
    let grid = match generate_with_retries(config, retries) {
        Ok(level) => level.grid,
        Err(e) => return vec![TestResult::new("themes_resolve", false, e.to_string())],
    };
    let unthemed: Vec<_> = grid
        .playable_rooms()
        .filter(|r| room_theme(r.room_type).floor.is_none())
        .map(|r| r.coord.to_string())
        .collect();
    let bad_colours: Vec<_> = grid
        .playable_rooms()
        .map(|r| room_theme(r.room_type).color)
        .filter(|c| color_rgb(c).is_none())
        .collect();
    vec![
        TestResult::new(
            "playable_rooms_have_floors",
            unthemed.is_empty(),
            if unthemed.is_empty() {
                format!("{} rooms themed", grid.playable_count())
            } else {
                format!("no floor texture for {}", unthemed.join(", "))
            },
        ),
        TestResult::new(
            "theme_colours_parse",
            bad_colours.is_empty(),
            if bad_colours.is_empty() {
                "every playable colour is #rrggbb".into()
            } else {
                format!("unparseable colour(s): {}", bad_colours.join(", "))
            },
        ),
    ]
}
