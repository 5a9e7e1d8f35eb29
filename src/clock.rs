use std::time::{Duration, Instant};

/// Caps the loop at a fixed frame rate by sleeping off whatever is left of
/// each frame's budget. Unthrottled clocks never sleep (debug runs, tests).
pub struct FrameClock {
    budget: Duration,
    frame_start: Instant,
    throttled: bool,
}

impl FrameClock {
    pub fn new(fps: u32, throttled: bool) -> Self {
        FrameClock {
            budget: Duration::from_secs(1) / fps.max(1),
            frame_start: Instant::now(),
            throttled,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed)
    }

    /// Blocks until the current frame's budget is spent, then starts the next frame.
    pub fn tick(&mut self) {
        if self.throttled {
            let remaining = self.remaining(self.frame_start.elapsed());
            if !remaining.is_zero() {
                std::thread::sleep(remaining);
            }
        }
        self.frame_start = Instant::now();
    }

    /// Holds the current screen for `delay`. Returns the hold the round asked for,
    /// whether or not this clock actually slept.
    pub fn hold(&mut self, delay: Duration) -> Duration {
        if self.throttled {
            std::thread::sleep(delay);
        }
        self.frame_start = Instant::now();
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_fps_budget() {
        let clock = FrameClock::new(60, true);
        assert_eq!(clock.budget(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn remaining_never_underflows() {
        let clock = FrameClock::new(60, true);
        assert_eq!(clock.remaining(Duration::from_millis(6)), Duration::from_nanos(10_666_666));
        assert_eq!(clock.remaining(Duration::from_millis(40)), Duration::ZERO);
    }

    #[test]
    fn throttled_tick_waits_out_the_budget() {
        let mut clock = FrameClock::new(100, true);
        let start = Instant::now();
        clock.tick();
        clock.tick();
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn throttled_hold_sleeps_for_the_delay() {
        let mut clock = FrameClock::new(60, true);
        let start = Instant::now();
        assert_eq!(clock.hold(Duration::from_millis(30)), Duration::from_millis(30));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn unthrottled_hold_reports_without_sleeping() {
        let mut clock = FrameClock::new(60, false);
        let start = Instant::now();
        assert_eq!(clock.hold(Duration::from_secs(2)), Duration::from_secs(2));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn unthrottled_tick_does_not_sleep() {
        let mut clock = FrameClock::new(1, false);
        let start = Instant::now();
        clock.tick();
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}
