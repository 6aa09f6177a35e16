//! Elapsed-time measurement for gating timed transitions
//!
//! The game never sleeps: timers only compare the frame's clock reading with
//! the reading captured at the last restart.

use std::time::Instant;

/// Source of the current time in milliseconds
pub trait Clock {
    /// Milliseconds since the clock was created (monotonic)
    fn now_ms(&self) -> u64;

    /// Called once at the start of every frame
    fn advance_frame(&mut self) {}
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Deterministic clock that moves forward exactly one frame per `advance_frame`
#[derive(Debug, Clone)]
pub struct FrameClock {
    fps: u32,
    frames: u64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1),
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Clock for FrameClock {
    fn now_ms(&self) -> u64 {
        self.frames * 1000 / self.fps as u64
    }

    fn advance_frame(&mut self) {
        self.frames += 1;
    }
}

/// Stopwatch measuring milliseconds since the last `restart`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    start_ms: u64,
}

impl Timer {
    /// Create a timer started at `now_ms`
    pub fn new(now_ms: u64) -> Self {
        Self { start_ms: now_ms }
    }

    /// Capture `now_ms` as the new starting point
    pub fn restart(&mut self, now_ms: u64) {
        self.start_ms = now_ms;
    }

    /// Milliseconds elapsed since the last restart
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_measures_since_restart() {
        let mut timer = Timer::new(100);
        assert_eq!(timer.elapsed_ms(100), 0);
        assert_eq!(timer.elapsed_ms(1600), 1500);

        timer.restart(2000);
        assert_eq!(timer.elapsed_ms(2500), 500);
    }

    #[test]
    fn test_timer_never_negative() {
        let timer = Timer::new(1000);
        assert_eq!(timer.elapsed_ms(10), 0);
    }

    #[test]
    fn test_frame_clock_is_deterministic() {
        let mut clock = FrameClock::new(60);
        assert_eq!(clock.now_ms(), 0);
        for _ in 0..60 {
            clock.advance_frame();
        }
        assert_eq!(clock.frames(), 60);
        assert_eq!(clock.now_ms(), 1000);

        // A stalled clock stalls every timer reading
        let timer = Timer::new(clock.now_ms());
        assert_eq!(timer.elapsed_ms(clock.now_ms()), 0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
