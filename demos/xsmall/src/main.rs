//! xsmall: smallest example for the EMS dispatch simulator.
//!
//! Five ambulances at three bases serve one day of Poisson-arriving cases
//! in a synthetic service area inspired by Mobile, Alabama.  A stadium event
//! overlays a burst of urgent cases during hours 18 to 21 of the run.
//!
//! ```text
//! cargo run -p xsmall -- [fastest_travel_time|least_disruption|optimal_weighted_hybrid|random]
//! RUST_LOG=ems_cases=debug cargo run -p xsmall     # show scenario switches
//! ```

mod city;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use ems_analysis::CoverageRadii;
use ems_cases::{RandomCaseSet, Scenario, ScenarioCaseSet, ScenarioController};
use ems_core::{Priority, SimConfig, SimRng, SimTime};
use ems_dispatch::{PolicyKind, build_policy};
use ems_generators::{
    CircleLocation, FastestHospital, PoissonDuration, RandomPriority, TravelTimeDuration,
    UniformDuration,
};
use ems_model::FleetBuilder;
use ems_output::{CsvWriter, SimOutputObserver};
use ems_sim::{EventGenerator, HospitalTransport, SimBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:           u64 = 42;
const SIM_HOURS:      u64 = 24;
const EVENT_START_H:  u64 = 18;
const EVENT_END_H:    u64 = 21;
/// Background demand: one case every 15 minutes on average.
const BACKGROUND_PER_MIN: f64 = 1.0 / 15.0;
/// Stadium demand: one case every 4 minutes on average.
const STADIUM_PER_MIN:    f64 = 1.0 / 4.0;

fn hours(h: u64) -> SimTime {
    SimTime::from_secs(h * 3_600)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let kind = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<PolicyKind>()?,
        None => PolicyKind::default(),
    };

    println!("=== xsmall: EMS dispatch simulator ===");
    println!("Policy: {kind}  |  Hours: {SIM_HOURS}  |  Seed: {SEED}");
    println!();

    // 1. Service area.
    let times = Arc::new(city::travel_times()?);
    println!(
        "Service area: {} bases, {} demand points",
        times.origins().len(),
        times.destinations().len()
    );

    // 2. Sim config.
    let config = SimConfig {
        start_unix_secs: 1_700_000_000, // fixed reference Tuesday 22:13 UTC
        seed:            SEED,
        end_time:        Some(hours(SIM_HOURS)),
        ..SimConfig::default()
    };
    let mut rng = SimRng::new(config.seed);

    // 3. Case sources: a background city load plus the stadium event.
    let background = RandomCaseSet::new(
        SimTime::ZERO,
        PoissonDuration::new(BACKGROUND_PER_MIN, rng.child(1))?,
        CircleLocation::new(city::DOWNTOWN, 4.0, rng.child(2))?,
        RandomPriority::standard(rng.child(3))?,
    );
    let stadium = RandomCaseSet::new(
        SimTime::ZERO,
        PoissonDuration::new(STADIUM_PER_MIN, rng.child(4))?,
        CircleLocation::new(city::STADIUM, 0.5, rng.child(5))?,
        RandomPriority::new(vec![Priority(1), Priority(2)], Some(vec![0.3, 0.7]), rng.child(6))?,
    );
    let controller = ScenarioController::new(vec![
        Scenario::background("city", Box::new(background)),
        Scenario::windowed("stadium", hours(EVENT_START_H), Some(hours(EVENT_END_H)), Box::new(stadium)),
    ])?;
    let cases = ScenarioCaseSet::new(controller, SimTime::ZERO);

    // 4. Fleet: two at north, two downtown, one south.
    let bases = times.origins().points().to_vec();
    let mut fleet = FleetBuilder::new();
    fleet.add_vehicles(bases[0], 2);
    fleet.add_vehicles(bases[1], 2);
    fleet.add_vehicles(bases[2], 1);

    // 5. Lifecycle generators.
    let events = EventGenerator::new(
        Box::new(TravelTimeDuration::new(Arc::clone(&times), 1e-6)?),
        Box::new(UniformDuration::new(8.0, 20.0, rng.child(7))?),
        Box::new(UniformDuration::new(10.0, 30.0, rng.child(8))?),
        Box::new(FastestHospital::new(city::hospitals(), Arc::clone(&times))?),
    );

    // 6. Policy and sim.
    let radii = CoverageRadii::from_config(&config)?;
    let policy = build_policy(kind, Arc::clone(&times), times.destinations().points(), radii, &mut rng);
    let mut sim = SimBuilder::new(config.clone(), Arc::clone(&times), fleet, policy, cases, events)
        .transport(HospitalTransport::UpToPriority(Priority(2)))
        .build()?;

    // 7. Output.
    let out_dir = Path::new("output/xsmall").join(kind.name());
    let writer = CsvWriter::new(&out_dir, sim.metrics().tags())?;
    let mut obs = SimOutputObserver::new(writer, &config);
    tracing::info!(dir = %out_dir.display(), "writing reports");

    // 8. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 9. Summary.
    println!("Simulation complete in {:.3} s (sim clock {})", elapsed.as_secs_f64(), sim.now());
    println!("  cases arrived  : {}", sim.arrivals());
    println!("  cases finished : {}", sim.finished().len());
    println!("  still active   : {}", sim.active_count());
    println!("  still pending  : {}", sim.pending().len());
    println!("  {}/cases.csv   : {} rows", out_dir.display(), obs.cases_written());
    println!("  {}/metrics.csv : {} rows", out_dir.display(), obs.samples_written());
    println!();

    let finished = sim.finished();
    if !finished.is_empty() {
        let wait_secs: f64 = finished.iter().map(|c| c.delay(sim.now()).as_secs_f64()).sum();
        println!("Mean dispatch delay: {:.1} s", wait_secs / finished.len() as f64);
    }

    // 10. Final metric values.
    println!("{:<28} {:>10}", "Metric", "Last");
    println!("{}", "-".repeat(39));
    for tag in sim.metrics().tags() {
        let value = sim.metrics().latest(tag);
        println!("{:<28} {:>10}", tag, value.map_or("-".to_owned(), |v| format!("{v:.3}")));
    }

    Ok(())
}
