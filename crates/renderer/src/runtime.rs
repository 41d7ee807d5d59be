use std::time::{Duration, Instant};

/// Snapshot of the time state supplied to the shader uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    /// Elapsed wall-clock time in seconds since the loop started.
    pub seconds: f32,
    /// Monotonic frame counter for the running session.
    pub frame_index: u64,
}

impl TimeSample {
    pub fn new(seconds: f32, frame_index: u64) -> Self {
        Self {
            seconds,
            frame_index,
        }
    }
}

/// Abstraction over where time values originate from.
pub trait TimeSource {
    /// Resets the source so elapsed time restarts from zero.
    fn reset(&mut self);
    /// Produces a time sample for the next frame.
    fn sample(&mut self) -> TimeSample;
}

/// Time source backed by the system monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
    frame: u64,
}

impl SystemTimeSource {
    /// Creates a system time source initialised to `Instant::now()`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
            frame: 0,
        }
    }
}

impl TimeSource for SystemTimeSource {
    fn reset(&mut self) {
        self.origin = Instant::now();
        self.frame = 0;
    }

    fn sample(&mut self) -> TimeSample {
        let elapsed = self.origin.elapsed();
        let sample = TimeSample::new(elapsed.as_secs_f32(), self.frame);
        self.frame = self.frame.saturating_add(1);
        sample
    }
}

/// Wall-clock repeating schedule for the draw loop.
///
/// `start` records the schedule origin; starting again replaces the prior
/// schedule, so at most one deadline is ever outstanding. A completed tick
/// advances the deadline by exactly one period from the deadline itself,
/// not from the current time, so an overrunning frame makes later ticks
/// come due back to back.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl FrameClock {
    /// Creates a clock ticking at `fps` frames per second.
    pub fn new(fps: f32) -> Self {
        let fps = f64::from(fps.max(f32::MIN_POSITIVE));
        Self {
            period: Duration::from_secs_f64(1.0 / fps),
            next_deadline: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts (or restarts) the schedule; the first tick is due immediately.
    pub fn start(&mut self, now: Instant) {
        self.next_deadline = Some(now);
    }

    /// True when the next scheduled tick is due.
    pub fn ready_for_frame(&self, now: Instant) -> bool {
        self.next_deadline
            .map(|deadline| now >= deadline)
            .unwrap_or(false)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_deadline
    }

    /// Advances the schedule by one period after a tick has run.
    pub fn mark_rendered(&mut self) {
        if let Some(deadline) = self.next_deadline {
            self.next_deadline = Some(deadline + self.period);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_fps_period_is_one_sixtieth_second() {
        let clock = FrameClock::new(60.0);
        assert_eq!(clock.period(), Duration::from_secs_f64(1.0 / 60.0));
    }

    #[test]
    fn not_ready_before_start() {
        let clock = FrameClock::new(60.0);
        assert!(!clock.ready_for_frame(Instant::now()));
        assert!(clock.next_deadline().is_none());
    }

    #[test]
    fn first_tick_due_immediately_after_start() {
        let mut clock = FrameClock::new(60.0);
        let now = Instant::now();
        clock.start(now);
        assert!(clock.ready_for_frame(now));
    }

    #[test]
    fn tick_advances_deadline_by_exactly_one_period() {
        let mut clock = FrameClock::new(60.0);
        let now = Instant::now();
        clock.start(now);
        clock.mark_rendered();
        assert_eq!(clock.next_deadline(), Some(now + clock.period()));
        assert!(!clock.ready_for_frame(now));
        assert!(clock.ready_for_frame(now + clock.period()));
    }

    #[test]
    fn overrun_frames_keep_the_original_schedule() {
        // The deadline moves from the scheduled time, not from "now", so a
        // slow frame leaves the next tick already due.
        let mut clock = FrameClock::new(60.0);
        let now = Instant::now();
        clock.start(now);
        clock.mark_rendered();
        let late = now + clock.period() * 10;
        assert!(clock.ready_for_frame(late));
        clock.mark_rendered();
        assert_eq!(clock.next_deadline(), Some(now + clock.period() * 2));
    }

    #[test]
    fn restart_replaces_the_outstanding_schedule() {
        let mut clock = FrameClock::new(60.0);
        let first = Instant::now();
        clock.start(first);
        clock.mark_rendered();
        clock.mark_rendered();

        let second = first + Duration::from_secs(5);
        clock.start(second);
        assert_eq!(clock.next_deadline(), Some(second));
    }

    #[test]
    fn system_source_counts_frames_and_resets() {
        let mut source = SystemTimeSource::new();
        assert_eq!(source.sample().frame_index, 0);
        assert_eq!(source.sample().frame_index, 1);

        source.reset();
        let sample = source.sample();
        assert_eq!(sample.frame_index, 0);
        assert!(sample.seconds >= 0.0);
        assert!(sample.seconds < 1.0);
    }
}
