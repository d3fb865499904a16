//! Fixed-period tick driver.
//!
//! Paces [`TickEngine::execute_tick()`] against absolute deadlines rather
//! than sleeping a fixed amount after each tick, so tick jitter does not
//! accumulate. A tick that runs past its deadline is logged and the
//! schedule is re-anchored to the current time: late ticks are never
//! followed by a burst of catch-up ticks.

use std::thread;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::tick::{TickEngine, TickError, TickResult};

/// Counters from one [`PeriodicDriver::run`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks attempted.
    pub ticks: u64,
    /// Ticks that returned an error.
    pub failures: u64,
    /// Ticks that finished after their deadline.
    pub overruns: u64,
}

/// Calls the engine once per period on the current thread.
#[derive(Clone, Debug)]
pub struct PeriodicDriver {
    period: Duration,
}

impl PeriodicDriver {
    /// Driver with an explicit period.
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Driver using the engine's configured tick period.
    pub fn for_engine(engine: &TickEngine) -> Self {
        Self::new(engine.geometry().tick_period)
    }

    /// The pacing period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run `ticks` ticks, passing every outcome to `on_result`.
    ///
    /// Failed ticks do not stop the driver; deciding what to do about
    /// them (reset, stop, keep going) is up to the caller.
    pub fn run<F>(&self, engine: &mut TickEngine, ticks: u64, mut on_result: F) -> RunSummary
    where
        F: FnMut(&TickEngine, Result<TickResult, TickError>),
    {
        let mut summary = RunSummary::default();
        let mut deadline = Instant::now() + self.period;
        for _ in 0..ticks {
            let result = engine.execute_tick();
            summary.ticks += 1;
            if result.is_err() {
                summary.failures += 1;
            }
            on_result(engine, result);

            let now = Instant::now();
            if now <= deadline {
                thread::sleep(deadline - now);
                deadline += self.period;
            } else {
                summary.overruns += 1;
                warn!(
                    tick = engine.current_tick().0,
                    late_by_us = (now - deadline).as_micros() as u64,
                    "tick overran its period"
                );
                deadline = now + self.period;
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::stage::{Stage, StageContext};
    use egomap_core::{Displacement, StageError, TickId};
    use egomap_test_utils::{ConstantSource, ScriptedSource};

    fn engine() -> TickEngine {
        TickEngine::new(
            MapConfig::default(),
            Box::new(ConstantSource::new(Displacement::new(5.0, 0.0))),
        )
        .unwrap()
    }

    struct Slow(Duration);

    impl Stage for Slow {
        fn name(&self) -> &str {
            "slow"
        }

        fn run(&mut self, _ctx: &StageContext<'_>) -> Result<(), StageError> {
            thread::sleep(self.0);
            Ok(())
        }
    }

    #[test]
    fn for_engine_uses_configured_period() {
        let e = engine();
        assert_eq!(PeriodicDriver::for_engine(&e).period(), Duration::from_millis(100));
    }

    #[test]
    fn paces_ticks_to_the_period() {
        let mut e = engine();
        let driver = PeriodicDriver::new(Duration::from_millis(2));
        let mut seen = Vec::new();
        let start = Instant::now();
        let summary = driver.run(&mut e, 5, |engine, result| {
            seen.push(result.unwrap().tick);
            assert_eq!(engine.current_tick(), *seen.last().unwrap());
        });
        assert!(start.elapsed() >= Duration::from_millis(10));
        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.failures, 0);
        assert_eq!(seen, (1..=5).map(TickId).collect::<Vec<_>>());
        assert_eq!(e.current_tick(), TickId(5));
    }

    #[test]
    fn overruns_are_counted_not_caught_up() {
        let mut e = engine();
        e.add_stage(Box::new(Slow(Duration::from_millis(3)))).unwrap();
        let driver = PeriodicDriver::new(Duration::from_millis(1));
        let summary = driver.run(&mut e, 3, |_, result| {
            result.unwrap();
        });
        assert_eq!(summary.overruns, 3);
        assert_eq!(e.current_tick(), TickId(3));
    }

    #[test]
    fn failures_do_not_stop_the_driver() {
        use egomap_core::LocalizationError;

        let mut e = TickEngine::new(
            MapConfig::default(),
            Box::new(ScriptedSource::new(vec![
                Err(LocalizationError::Disconnected),
                Ok(Displacement::ZERO),
            ])),
        )
        .unwrap();
        let driver = PeriodicDriver::new(Duration::ZERO);
        let mut errors = 0;
        let summary = driver.run(&mut e, 3, |_, result| {
            if result.is_err() {
                errors += 1;
            }
        });
        assert_eq!(errors, 1);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.ticks, 3);
        assert_eq!(e.current_tick(), TickId(2));
    }
}
