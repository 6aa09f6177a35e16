//! Linear per-frame value ramps
//!
//! One algorithm backs both the alpha fader (0-255) and the zoom level (0-100%).
//! A ramp is armed once, advanced once per frame, and latches its `ended` flag
//! when the value reaches the target. Rising and falling ramps keep separate
//! started/ended flags so a pulse can rise and then fall on the same instance.

use serde::{Deserialize, Serialize};

/// Values within this distance of the target count as having reached it
const REACH_EPSILON: f32 = 1e-3;

/// Direction of a ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ramp {
    /// Value increases toward the target (fade in, zoom in)
    Rising,
    /// Value decreases toward the target (fade out, zoom out)
    Falling,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RampFlags {
    started: bool,
    ended: bool,
}

/// Bounded scalar that advances linearly toward a target once per tick
#[derive(Debug, Clone)]
pub struct Interpolator {
    value: f32,
    initial: f32,
    min: f32,
    max: f32,
    fps: f32,
    target: f32,
    step: f32,
    active: Option<Ramp>,
    rising: RampFlags,
    falling: RampFlags,
}

impl Interpolator {
    /// Create an interpolator over `[min, max]` starting (and resetting) to `initial`
    pub fn new(fps: u32, min: f32, max: f32, initial: f32) -> Self {
        let initial = initial.clamp(min, max);
        Self {
            value: initial,
            initial,
            min,
            max,
            fps: fps as f32,
            target: initial,
            step: 0.0,
            active: None,
            rising: RampFlags::default(),
            falling: RampFlags::default(),
        }
    }

    /// Alpha fader over 0-255
    pub fn alpha(fps: u32, initial: u8) -> Self {
        Self::new(fps, 0.0, 255.0, initial as f32)
    }

    /// Zoom level over 0-100 percent
    pub fn zoom(fps: u32, initial_percent: f32) -> Self {
        Self::new(fps, 0.0, 100.0, initial_percent)
    }

    fn flags(&self, ramp: Ramp) -> &RampFlags {
        match ramp {
            Ramp::Rising => &self.rising,
            Ramp::Falling => &self.falling,
        }
    }

    fn flags_mut(&mut self, ramp: Ramp) -> &mut RampFlags {
        match ramp {
            Ramp::Rising => &mut self.rising,
            Ramp::Falling => &mut self.falling,
        }
    }

    /// Arm a ramp from `start` (or the current value) to `target` over `duration_secs`.
    ///
    /// The step is `±|target - start| / (duration * fps)`. Arming a ramp that was
    /// already started is ignored until `reset()`.
    pub fn arm(&mut self, ramp: Ramp, duration_secs: f32, start: Option<f32>, target: f32) {
        if self.flags(ramp).started {
            return;
        }
        *self.flags_mut(ramp) = RampFlags {
            started: true,
            ended: false,
        };

        if let Some(start) = start {
            self.value = start.clamp(self.min, self.max);
        }
        self.target = target.clamp(self.min, self.max);

        let frames = duration_secs * self.fps;
        let distance = (self.target - self.value).abs();
        // Zero-length ramps complete on the next advance
        let magnitude = if frames > 0.0 { distance / frames } else { distance };
        self.step = match ramp {
            Ramp::Rising => magnitude,
            Ramp::Falling => -magnitude,
        };
        self.active = Some(ramp);
    }

    /// Advance one frame and return the new value
    pub fn advance(&mut self) -> f32 {
        if let Some(ramp) = self.active {
            self.value = (self.value + self.step).clamp(self.min, self.max);

            let reached = match ramp {
                Ramp::Rising => self.value >= self.target - REACH_EPSILON,
                Ramp::Falling => self.value <= self.target + REACH_EPSILON,
            };
            if reached {
                self.value = self.target;
                self.flags_mut(ramp).ended = true;
                self.active = None;
            }
        }
        self.value
    }

    /// Force a value, cancelling any ramp in progress (flags are kept)
    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(self.min, self.max);
        self.step = 0.0;
        self.active = None;
    }

    /// Return to the initial value and clear every started/ended flag
    pub fn reset(&mut self) {
        self.value = self.initial;
        self.target = self.initial;
        self.step = 0.0;
        self.active = None;
        self.rising = RampFlags::default();
        self.falling = RampFlags::default();
    }

    /// Current value
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current value rounded into a byte (for alpha)
    #[inline]
    pub fn value_u8(&self) -> u8 {
        self.value.round().clamp(0.0, 255.0) as u8
    }

    /// Per-frame step of the most recently armed ramp
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// True while a ramp is armed and has not reached its target
    #[inline]
    pub fn is_ramping(&self) -> bool {
        self.active.is_some()
    }

    pub fn started(&self, ramp: Ramp) -> bool {
        self.flags(ramp).started
    }

    pub fn ended(&self, ramp: Ramp) -> bool {
        self.flags(ramp).ended
    }

    /// Lower and upper bounds of the value domain
    pub fn domain(&self) -> (f32, f32) {
        (self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rising_ramp_reaches_target_in_expected_frames() {
        // 255 over 1 second at 60 fps
        let mut fader = Interpolator::alpha(60, 0);
        fader.arm(Ramp::Rising, 1.0, Some(0.0), 255.0);
        assert!(fader.started(Ramp::Rising));
        assert!((fader.step() - 4.25).abs() < 1e-4);

        for _ in 0..59 {
            fader.advance();
            assert!(!fader.ended(Ramp::Rising));
        }
        assert_eq!(fader.advance(), 255.0);
        assert!(fader.ended(Ramp::Rising));
        assert!(!fader.is_ramping());
    }

    #[test]
    fn test_falling_ramp_uses_current_value() {
        let mut zoom = Interpolator::zoom(60, 100.0);
        zoom.arm(Ramp::Falling, 2.0, None, 0.0);
        assert!(zoom.step() < 0.0);

        let mut frames = 0;
        while !zoom.ended(Ramp::Falling) {
            zoom.advance();
            frames += 1;
            assert!(frames <= 121, "zoom never finished");
        }
        assert_eq!(frames, 120);
        assert_eq!(zoom.value(), 0.0);
    }

    #[test]
    fn test_arm_is_idempotent() {
        let mut fader = Interpolator::alpha(60, 0);
        fader.arm(Ramp::Rising, 1.0, Some(0.0), 255.0);
        for _ in 0..10 {
            fader.advance();
        }
        let mid = fader.value();

        // Re-arming with a different start and duration changes nothing
        fader.arm(Ramp::Rising, 0.1, Some(0.0), 100.0);
        assert_eq!(fader.value(), mid);
        assert!((fader.step() - 4.25).abs() < 1e-4);
    }

    #[test]
    fn test_rise_then_fall_on_same_instance() {
        let mut fader = Interpolator::alpha(60, 0);
        fader.arm(Ramp::Rising, 0.2, Some(0.0), 170.0);
        while !fader.ended(Ramp::Rising) {
            fader.advance();
        }
        assert_eq!(fader.value_u8(), 170);

        fader.arm(Ramp::Falling, 0.2, Some(170.0), 0.0);
        while !fader.ended(Ramp::Falling) {
            fader.advance();
        }
        assert_eq!(fader.value_u8(), 0);
        // Rising flag stays latched
        assert!(fader.ended(Ramp::Rising));
    }

    #[test]
    fn test_zero_duration_completes_next_frame() {
        let mut fader = Interpolator::alpha(60, 0);
        fader.arm(Ramp::Rising, 0.0, None, 200.0);
        fader.advance();
        assert!(fader.ended(Ramp::Rising));
        assert_eq!(fader.value_u8(), 200);
    }

    #[test]
    fn test_set_value_cancels_ramp() {
        let mut fader = Interpolator::alpha(60, 0);
        fader.arm(Ramp::Rising, 1.0, None, 255.0);
        fader.advance();
        fader.set_value(200.0);
        assert!(!fader.is_ramping());
        assert_eq!(fader.advance(), 200.0);
        assert!(fader.started(Ramp::Rising));
        assert!(!fader.ended(Ramp::Rising));
    }

    #[test]
    fn test_reset_rearms() {
        let mut fader = Interpolator::alpha(60, 255);
        fader.arm(Ramp::Rising, 0.0, Some(0.0), 255.0);
        fader.advance();
        assert!(fader.ended(Ramp::Rising));

        fader.reset();
        assert_eq!(fader.value(), 255.0);
        assert!(!fader.started(Ramp::Rising));
        assert!(!fader.ended(Ramp::Rising));

        fader.arm(Ramp::Rising, 1.0, Some(0.0), 255.0);
        assert_eq!(fader.value(), 0.0);
        assert!(fader.is_ramping());
    }

    proptest! {
        #[test]
        fn prop_alpha_stays_in_domain(
            start in -500.0f32..500.0,
            target in -500.0f32..500.0,
            duration in 0.0f32..3.0,
            rising in any::<bool>(),
            ticks in 0usize..400,
        ) {
            let ramp = if rising { Ramp::Rising } else { Ramp::Falling };
            let mut fader = Interpolator::alpha(60, 0);
            fader.arm(ramp, duration, Some(start), target);
            for _ in 0..ticks {
                let v = fader.advance();
                prop_assert!((0.0..=255.0).contains(&v));
            }
        }

        #[test]
        fn prop_zoom_ended_latches_until_reset(
            start in 0.0f32..=100.0,
            duration in 0.01f32..2.0,
            extra in 0usize..50,
        ) {
            let mut zoom = Interpolator::zoom(60, 100.0);
            zoom.arm(Ramp::Falling, duration, Some(start), 0.0);
            let budget = (duration * 60.0).ceil() as usize + 2;
            let mut ended_at = None;
            for tick in 0..budget {
                let v = zoom.advance();
                prop_assert!((0.0..=100.0).contains(&v));
                if zoom.ended(Ramp::Falling) && ended_at.is_none() {
                    ended_at = Some(tick);
                    prop_assert!(v <= 0.0 + REACH_EPSILON);
                }
            }
            prop_assert!(ended_at.is_some());
            for _ in 0..extra {
                zoom.advance();
                prop_assert!(zoom.ended(Ramp::Falling));
            }
            zoom.reset();
            prop_assert!(!zoom.ended(Ramp::Falling));
        }
    }
}
