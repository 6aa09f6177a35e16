//! Whole-screen fade overlay
//!
//! Fading out raises a black overlay from transparent to opaque; fading in
//! lowers it again. Screens hold their pending transition until the fade-out
//! completes so transitions never cut mid-fade.

use super::interpolator::{Interpolator, Ramp};
use crate::renderer::{Canvas, Color};

#[derive(Debug, Clone)]
pub struct ScreenFader {
    overlay: Interpolator,
    color: Color,
}

impl ScreenFader {
    pub fn new(fps: u32) -> Self {
        Self {
            overlay: Interpolator::alpha(fps, 0),
            color: Color::BLACK,
        }
    }

    /// Fade the screen in from the overlay colour (overlay 255 -> 0)
    pub fn fade_in(&mut self, duration_secs: f32) {
        self.overlay
            .arm(Ramp::Falling, duration_secs, Some(255.0), 0.0);
    }

    /// Fade the screen out to the overlay colour (overlay 0 -> 255)
    pub fn fade_out(&mut self, duration_secs: f32) {
        self.overlay
            .arm(Ramp::Rising, duration_secs, Some(0.0), 255.0);
    }

    pub fn reset(&mut self) {
        self.overlay.reset();
    }

    pub fn fade_in_started(&self) -> bool {
        self.overlay.started(Ramp::Falling)
    }

    pub fn fade_in_completed(&self) -> bool {
        self.overlay.ended(Ramp::Falling)
    }

    pub fn fade_out_started(&self) -> bool {
        self.overlay.started(Ramp::Rising)
    }

    pub fn fade_out_completed(&self) -> bool {
        self.overlay.ended(Ramp::Rising)
    }

    pub fn in_progress(&self) -> bool {
        self.overlay.is_ramping()
    }

    /// Current overlay alpha
    pub fn alpha(&self) -> u8 {
        self.overlay.value_u8()
    }

    /// Advance the fade and paint the overlay on top of everything else
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.overlay.advance();
        let alpha = self.overlay.value_u8();
        if alpha > 0 {
            canvas.fill_screen(self.color, alpha);
        }
    }
}
