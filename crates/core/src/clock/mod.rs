use std::time::{Duration, Instant};

/// Decides which render-trigger events materialise a frame, and attributes
/// elapsed time to the running algorithm.
///
/// One materialisation per `skip_frames + 1` trigger events, exactly. Time
/// is charged between the previous call's exit stamp and the next event, so
/// frame-encoding overhead never counts against the algorithm.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    skip_frames: u32,
    accumulator: u32,
    process_time: Duration,
    exit_time: Instant,
}

impl RenderThrottle {
    pub fn new(skip_frames: u32) -> Self {
        Self {
            skip_frames,
            accumulator: 0,
            process_time: Duration::ZERO,
            exit_time: Instant::now(),
        }
    }

    pub fn skip_frames(&self) -> u32 {
        self.skip_frames
    }

    pub fn set_skip_frames(&mut self, skip_frames: u32) {
        self.skip_frames = skip_frames;
    }

    /// Accumulated algorithm-attributed time for the current run.
    pub fn process_time(&self) -> Duration {
        self.process_time
    }

    /// Restarts the per-run clock.
    pub fn begin_run(&mut self, now: Instant) {
        self.process_time = Duration::ZERO;
        self.exit_time = now;
    }

    /// Registers one render-trigger event; returns whether the frame should
    /// be materialised.
    pub fn on_event(&mut self, now: Instant) -> bool {
        self.process_time += now.saturating_duration_since(self.exit_time);
        self.accumulator += 1;
        if self.accumulator > self.skip_frames {
            self.accumulator = 0;
            true
        } else {
            false
        }
    }

    /// Stamps the moment the render call hands control back to the
    /// algorithm, materialised or not.
    pub fn mark_exit(&mut self, now: Instant) {
        self.exit_time = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn materialises_exactly_once_per_skip_plus_one_events() {
        for skip in [0u32, 1, 3, 8] {
            let mut throttle = RenderThrottle::new(skip);
            let now = Instant::now();

            let period = skip as usize + 1;
            let mut materialised = 0;
            for event in 1..=period * 4 {
                let fired = throttle.on_event(now);
                throttle.mark_exit(now);
                assert_eq!(fired, event % period == 0, "skip {skip}, event {event}");
                if fired {
                    materialised += 1;
                }
            }
            assert_eq!(materialised, 4);
        }
    }

    #[test]
    fn charges_time_between_exit_and_next_event() {
        let mut throttle = RenderThrottle::new(0);
        let start = Instant::now();
        throttle.begin_run(start);

        throttle.on_event(start + Duration::from_millis(5));
        throttle.mark_exit(start + Duration::from_millis(9));
        throttle.on_event(start + Duration::from_millis(10));

        // 5 ms before the first event plus 1 ms after the previous exit; the
        // 4 ms the render call itself took is excluded.
        assert_eq!(throttle.process_time(), Duration::from_millis(6));
    }

    #[test]
    fn begin_run_zeroes_the_clock() {
        let mut throttle = RenderThrottle::new(0);
        let start = Instant::now();
        throttle.begin_run(start);
        throttle.on_event(start + Duration::from_millis(3));

        throttle.begin_run(start + Duration::from_millis(3));

        assert_eq!(throttle.process_time(), Duration::ZERO);
    }
}
