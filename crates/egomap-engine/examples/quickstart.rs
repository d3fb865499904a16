//! egomap quickstart: a small robot driving diagonally across its own map.
//!
//! Demonstrates:
//!   1. Building a MapConfig and TickEngine
//!   2. Feeding odometry from another thread through a ChannelSource
//!   3. Implementing a downstream stage that reads the map snapshot
//!   4. Driving the engine at a fixed period
//!   5. Dumping the centred map and resetting after relocalization
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example quickstart

use std::thread;
use std::time::Duration;

use egomap_core::{CellClass, Displacement, StageError, TickId};
use egomap_engine::{ChannelSource, MapConfig, PeriodicDriver, Stage, StageContext, TickEngine};

// ─── Stage: free space straight ahead ───────────────────────────
//
// Counts how many cells in the robot's row, to the right of the robot,
// are walkable before the first non-walkable one. A real obstacle
// detector would plug in the same way.

struct ClearanceAhead;

impl Stage for ClearanceAhead {
    fn name(&self) -> &str {
        "clearance_ahead"
    }

    fn run(&mut self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        let half = ctx.snapshot.extent().half();
        let clear = (half + 1..=ctx.snapshot.extent().edge())
            .map_while(|lx| ctx.snapshot.logical(lx, half))
            .take_while(|cell| cell.is_walkable())
            .count();
        tracing::debug!(tick = ctx.tick.0, clear, "free cells ahead");
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "egomap_engine=info".into()),
        )
        .init();

    // 1. A 200 mm map at 10 mm per pixel for a 40 mm robot: small enough
    //    to print.
    let config = MapConfig {
        map_width_mm: 200,
        map_height_mm: 200,
        grid_step_mm: 10,
        robot_diameter_mm: 40,
        tick_period_ms: 20,
        max_speed_mm_per_s: Some(500.0),
        ..MapConfig::default()
    };

    // 2. Odometry producer: 2.5 mm increments at four times the tick rate.
    let (tx, source) = ChannelSource::unbounded("odometry");
    let producer = thread::spawn(move || {
        for _ in 0..48 {
            if tx.send(Displacement::new(-2.5, -2.5)).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
    });

    let mut engine = TickEngine::new(config, Box::new(source))?;
    engine.add_stage(Box::new(ClearanceAhead))?;

    // 3-4. Drive at the configured period.
    let driver = PeriodicDriver::for_engine(&engine);
    let summary = driver.run(&mut engine, 12, |engine, result| match result {
        Ok(tick) => println!(
            "tick {:>2}: shift ({:>2}, {:>2})  visited {:>3}  {} us",
            tick.tick.0,
            tick.shift.dx,
            tick.shift.dy,
            engine.snapshot().count_class(CellClass::Visited),
            tick.metrics.total_us,
        ),
        Err(e) => eprintln!("{e}"),
    });
    println!(
        "\n{} ticks, {} failed, {} overran\n",
        summary.ticks, summary.failures, summary.overruns
    );
    let _ = producer.join();

    // 5. Inspect, then relocalize.
    print!("{}", engine.snapshot().centered_at(engine.current_tick()));
    engine.reset();
    assert_eq!(engine.current_tick(), TickId(0));
    println!(
        "\nafter reset: {} neutral cells",
        engine.snapshot().count_class(CellClass::Neutral)
    );
    Ok(())
}
