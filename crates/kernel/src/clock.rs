use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Measures the wall-clock time between consecutive frames.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed time since the previous tick. The first tick reports zero.
    pub fn tick(&mut self, now: Instant) -> Duration {
        let elapsed = self
            .last
            .map(|prev| now.saturating_duration_since(prev))
            .unwrap_or(Duration::ZERO);
        self.last = Some(now);
        elapsed
    }

    /// Forget the previous tick, so the next frame starts from zero again.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Rolling window of recent frame times, for the HUD and logs.
#[derive(Debug, Clone)]
pub struct FrameStats {
    window: VecDeque<Duration>,
    capacity: usize,
}

impl FrameStats {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, frame_time: Duration) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(frame_time);
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn average(&self) -> Duration {
        if self.window.is_empty() {
            return Duration::ZERO;
        }
        self.window.iter().sum::<Duration>() / self.window.len() as u32
    }

    pub fn worst(&self) -> Duration {
        self.window.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    /// Frames per second over the window, or zero before any non-empty frame.
    pub fn fps(&self) -> f32 {
        let avg = self.average().as_secs_f32();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(120)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn tick_measures_elapsed() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick(t0);
        assert_eq!(clock.tick(t0 + Duration::from_millis(16)), Duration::from_millis(16));
        assert_eq!(clock.tick(t0 + Duration::from_millis(50)), Duration::from_millis(34));
    }

    #[test]
    fn tick_never_goes_backwards() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now() + Duration::from_secs(1);
        clock.tick(t0);
        assert_eq!(clock.tick(t0 - Duration::from_millis(5)), Duration::ZERO);
    }

    #[test]
    fn reset_restarts_from_zero() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick(t0);
        clock.reset();
        assert_eq!(clock.tick(t0 + Duration::from_secs(3)), Duration::ZERO);
    }

    #[test]
    fn stats_average_and_worst() {
        let mut stats = FrameStats::new(3);
        stats.record(Duration::from_millis(10));
        stats.record(Duration::from_millis(20));
        stats.record(Duration::from_millis(30));
        assert_eq!(stats.len(), 3);
        assert_eq!(stats.average(), Duration::from_millis(20));
        assert_eq!(stats.worst(), Duration::from_millis(30));
        assert!((stats.fps() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn stats_window_drops_oldest() {
        let mut stats = FrameStats::new(2);
        stats.record(Duration::from_millis(100));
        stats.record(Duration::from_millis(20));
        stats.record(Duration::from_millis(30));
        assert_eq!(stats.len(), 2);
        assert_eq!(stats.average(), Duration::from_millis(25));
        assert_eq!(stats.worst(), Duration::from_millis(30));
    }

    #[test]
    fn empty_stats() {
        let stats = FrameStats::default();
        assert!(stats.is_empty());
        assert_eq!(stats.fps(), 0.0);
    }
}
