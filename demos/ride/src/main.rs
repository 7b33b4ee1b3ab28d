//! ride — drives one lift in real time with random passenger requests.
//!
//! Usage: `ride [CONFIG.json] [SEED]`
//!
//! The lift runs on its own thread with a wall-clock scheduler.  The main
//! thread plays the passengers: it sends a random hall call or cabin request,
//! then waits for the lift to stop at that floor before sending the next one.
//! Every status is logged and written to `output/ride/lift_status.csv`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use crossbeam_channel::{RecvTimeoutError, unbounded};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use lift_control::LiftBuilder;
use lift_core::{Floor, LiftConfig, LiftEvent, LiftStatus};
use lift_output::CsvStatusWriter;
use lift_schedule::ThreadScheduler;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:              u64 = 42;
const REQUESTS:          usize = 6;
const BOTTOM_FLOOR:      i32 = 0;
const TOP_FLOOR:         i32 = 10;
const FLOOR_INTERVAL_MS: u64 = 250;
const OUTPUT_DIR:        &str = "output/ride";

// ── Setup ─────────────────────────────────────────────────────────────────────

fn default_config() -> LiftConfig {
    LiftConfig {
        bottom_floor:      BOTTOM_FLOOR,
        top_floor:         TOP_FLOOR,
        starting_floor:    BOTTOM_FLOOR,
        floor_interval_ms: FLOOR_INTERVAL_MS,
    }
}

fn load_config(path: &Path) -> Result<LiftConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config: LiftConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// A random served floor other than `current`.
fn pick_floor(rng: &mut SmallRng, config: &LiftConfig, current: Floor) -> Floor {
    loop {
        let floor = Floor(rng.gen_range(config.bottom_floor..=config.top_floor));
        if floor != current || config.bottom_floor == config.top_floor {
            return floor;
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => default_config(),
    };
    let seed = match args.next() {
        Some(s) => s.parse::<u64>().with_context(|| format!("invalid seed {s:?}"))?,
        None => SEED,
    };

    println!("=== ride — single lift, real time ===");
    println!(
        "Floors: {}  |  Interval: {} ms  |  Requests: {REQUESTS}  |  Seed: {seed}",
        config.range(),
        config.floor_interval_ms
    );
    println!();

    // 1. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let trace_path = Path::new(OUTPUT_DIR).join("lift_status.csv");
    let writer = CsvStatusWriter::create(&trace_path)?;

    // 2. Lift thread.
    let (request_tx, request_rx) = unbounded::<LiftEvent>();
    let (status_tx, status_rx) = unbounded::<LiftStatus>();
    let lift_config = config.clone();
    let lift_thread = thread::spawn(move || -> lift_control::ControlResult<()> {
        let mut lift = LiftBuilder::new(ThreadScheduler::new())
            .config(lift_config)
            .observer(Box::new(status_tx))
            .observer(Box::new(writer))
            .build()?;
        lift.serve(&request_rx)
    });

    // 3. Passengers.
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut current = config.starting_floor();
    let worst_trip = config.floor_interval() * (config.range().len() as u32 + 2);
    let t0 = Instant::now();
    let mut statuses = 0usize;

    for n in 0..REQUESTS {
        let target = pick_floor(&mut rng, &config, current);
        let event = if rng.gen_bool(0.5) {
            LiftEvent::Call(target)
        } else {
            LiftEvent::MoveRequest(target)
        };
        info!(request = n, %event, from = %current, "sending request");
        request_tx
            .send(event)
            .map_err(|_| anyhow!("lift thread stopped before request {n}"))?;

        loop {
            let status = match status_rx.recv_timeout(worst_trip) {
                Ok(status) => status,
                Err(RecvTimeoutError::Timeout) => bail!("lift did not reach {target} within {worst_trip:?}"),
                Err(RecvTimeoutError::Disconnected) => bail!("lift thread stopped while serving {event}"),
            };
            statuses += 1;
            info!(%status, "lift status");
            current = status.current_floor;
            if status.is_stopped() && current == target {
                break;
            }
        }
    }

    // 4. Shut down.
    drop(request_tx);
    lift_thread
        .join()
        .map_err(|_| anyhow!("lift thread panicked"))??;
    let elapsed = t0.elapsed();

    // 5. Summary.
    println!();
    println!("Served {REQUESTS} requests in {:.3} s", elapsed.as_secs_f64());
    println!("  statuses published : {statuses}");
    println!("  final floor        : {current}");
    println!("  trace              : {}", trace_path.display());

    Ok(())
}
