use log::{log_enabled, warn, Level};
use std::time::{Duration, Instant};

/// Traces the start and end of one phase of a simulation tick.
pub struct ScopedTimer<'a> {
    phase: &'a str,
    tick: u64,
    start: Instant,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(phase: &'a str, tick: u64) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("tick {tick}: start {phase}");
        }
        Self {
            phase,
            tick,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            log::trace!(
                "tick {}: end {} ({} µs)",
                self.tick,
                self.phase,
                self.start.elapsed().as_micros()
            );
        }
    }
}

/// Warns when `tick` took longer than `budget_ms`. Returns whether it did.
pub fn warn_if_frame_budget_exceeded(tick: u64, duration: Duration, budget_ms: f32) -> bool {
    let elapsed_ms = duration.as_secs_f32() * 1000.0;
    if elapsed_ms <= budget_ms {
        return false;
    }
    warn!("tick {tick} exceeded budget: {elapsed_ms:.2} ms > {budget_ms:.2} ms");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_check() {
        assert!(warn_if_frame_budget_exceeded(3, Duration::from_millis(20), 16.0));
        assert!(!warn_if_frame_budget_exceeded(4, Duration::from_millis(2), 16.0));
        assert!(!warn_if_frame_budget_exceeded(5, Duration::from_millis(15), 16.0));
    }
}
