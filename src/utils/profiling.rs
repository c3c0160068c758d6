use std::time::{Duration, Instant};

/// Timing and counts gathered over the last simulation tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepProfiler {
    pub force_time: Duration,
    pub integrator_time: Duration,
    pub total_frame_time: Duration,

    pub particle_count: usize,
    pub registration_count: usize,
    /// Registrations actually applied; lower than `registration_count` when some are stale.
    pub applied_count: usize,
}

impl StepProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn stale_registrations(&self) -> usize {
        self.registration_count.saturating_sub(self.applied_count)
    }

    pub fn report(&self) {
        let total_us = self.total_frame_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        log::debug!(
            "particles: {}, registrations: {} ({} stale), tick: {:.3} ms",
            self.particle_count,
            self.registration_count,
            self.stale_registrations(),
            self.total_frame_time.as_secs_f32() * 1000.0
        );
        log::debug!(
            "  forces:     {:.3} ms ({:.1}%)",
            self.force_time.as_secs_f32() * 1000.0,
            (self.force_time.as_micros() as f32 / total_us) * 100.0
        );
        log::debug!(
            "  integrator: {:.3} ms ({:.1}%)",
            self.integrator_time.as_secs_f32() * 1000.0,
            (self.integrator_time.as_micros() as f32 / total_us) * 100.0
        );
    }
}

/// Adds the elapsed time of its scope to `output` when dropped.
pub struct ScopedTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_timer_accumulates() {
        let mut profiler = StepProfiler::default();
        {
            let _timer = ScopedTimer::new(&mut profiler.force_time);
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(profiler.force_time >= Duration::from_millis(1));

        profiler.registration_count = 5;
        profiler.applied_count = 3;
        assert_eq!(profiler.stale_registrations(), 2);

        profiler.reset();
        assert_eq!(profiler.force_time, Duration::ZERO);
    }
}
