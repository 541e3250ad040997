use std::time::{Duration, Instant};

// A frame that took longer than this counts as this, so a stall never
// triggers a burst of catch-up steps.
const MAX_FRAME_LAG: Duration = Duration::from_millis(250);

/// Accumulated-time scheduler for the fixed simulation rate. The game loop
/// polls and renders as fast as it likes; `tick()` reports how many whole
/// simulation intervals have elapsed since the previous call.
pub struct TickClock {
    interval: Duration,
    last: Instant,
    accumulated: Duration,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        TickClock { interval, last: Instant::now(), accumulated: Duration::ZERO }
    }

    pub fn tick(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        self.advance(elapsed)
    }

    /// Forgets any banked time, e.g. after a pause.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.accumulated = Duration::ZERO;
    }

    fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed.min(MAX_FRAME_LAG);

        let mut steps = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_intervals_yield_steps() {
        let mut clock = TickClock::new(Duration::from_millis(80));
        assert_eq!(clock.advance(Duration::from_millis(160)), 2);
    }

    #[test]
    fn partial_intervals_accumulate() {
        let mut clock = TickClock::new(Duration::from_millis(80));
        assert_eq!(clock.advance(Duration::from_millis(79)), 0);
        assert_eq!(clock.advance(Duration::from_millis(1)), 1);
        assert_eq!(clock.advance(Duration::from_millis(40)), 0);
    }

    #[test]
    fn a_stalled_frame_is_clamped() {
        let mut clock = TickClock::new(Duration::from_millis(80));
        // 250 ms of credited lag at 80 ms per step
        assert_eq!(clock.advance(Duration::from_secs(10)), 3);
    }

    #[test]
    fn reset_discards_banked_time() {
        let mut clock = TickClock::new(Duration::from_millis(80));
        assert_eq!(clock.advance(Duration::from_millis(79)), 0);
        clock.reset();
        assert_eq!(clock.advance(Duration::from_millis(1)), 0);
    }
}
