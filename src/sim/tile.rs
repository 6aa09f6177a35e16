//! A single highlightable board tile
//!
//! A tile is off, on (committed by the player), pulsing (played back by the
//! computer), or showing the selector cursor. Pulses rise to a peak and fall
//! back to zero, then latch `pulse_ended` until the tile is reset.

use serde::{Deserialize, Serialize};

use super::interpolator::{Interpolator, Ramp};
use crate::consts::{TILE_ON_ALPHA, TILE_PULSE_PEAK_ALPHA, TILE_SELECTOR_ALPHA};
use crate::renderer::{Canvas, Color, Rect, SelectorMask};

/// What a tile shows this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileMode {
    Off,
    On,
    Pulsing,
    Selector,
}

#[derive(Debug, Clone)]
pub struct TileLight {
    /// 1-based board index
    index: usize,
    rect: Rect,
    selector_mask: SelectorMask,
    on: bool,
    selector: bool,
    pulsing: bool,
    pulse_started: bool,
    pulse_ended: bool,
    pulse_duration: f32,
    fader: Interpolator,
}

impl TileLight {
    pub fn new(index: usize, rect: Rect, screen_width: f32, fps: u32) -> Self {
        Self {
            index,
            rect,
            selector_mask: SelectorMask::new(rect, screen_width),
            on: false,
            selector: false,
            pulsing: false,
            pulse_started: false,
            pulse_ended: false,
            pulse_duration: 0.0,
            fader: Interpolator::alpha(fps, 0),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Back to a fresh, dark tile with no pulse history
    pub fn reset(&mut self) {
        self.on = false;
        self.selector = false;
        self.pulsing = false;
        self.pulse_started = false;
        self.pulse_ended = false;
        self.fader.reset();
    }

    /// Light the whole tile, cancelling any pulse or selector
    pub fn turn_on(&mut self) {
        self.cancel_pulse();
        self.on = true;
        self.selector = false;
        self.fader.set_value(TILE_ON_ALPHA as f32);
    }

    pub fn turn_off(&mut self) {
        self.cancel_pulse();
        self.on = false;
        self.selector = false;
        self.fader.set_value(0.0);
    }

    pub fn selector_on(&mut self) {
        self.selector = true;
    }

    pub fn selector_off(&mut self) {
        self.selector = false;
    }

    /// Start a pulse: rise to the peak over `duration_secs`, then fall back over the same time.
    ///
    /// Ignored if this tile already pulsed since the last reset. Returns whether a
    /// pulse was started.
    pub fn pulse(&mut self, duration_secs: f32) -> bool {
        if self.pulse_started {
            return false;
        }
        self.pulse_duration = duration_secs;
        self.pulse_started = true;
        self.pulse_ended = false;
        self.pulsing = true;
        self.fader.reset();
        self.fader.arm(
            Ramp::Rising,
            duration_secs,
            Some(0.0),
            TILE_PULSE_PEAK_ALPHA as f32,
        );
        true
    }

    // A cut-short pulse counts as finished so nothing waits on it forever
    fn cancel_pulse(&mut self) {
        if self.pulsing {
            self.pulsing = false;
            self.pulse_ended = true;
        }
    }

    /// Advance the pulse by one frame
    pub fn update(&mut self) {
        if !self.pulsing {
            return;
        }
        self.fader.advance();

        if self.fader.ended(Ramp::Rising) && !self.fader.started(Ramp::Falling) {
            self.fader.arm(
                Ramp::Falling,
                self.pulse_duration,
                Some(TILE_PULSE_PEAK_ALPHA as f32),
                0.0,
            );
        }
        if self.fader.ended(Ramp::Falling) {
            self.pulse_ended = true;
            self.pulsing = false;
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulsing
    }

    pub fn pulse_started(&self) -> bool {
        self.pulse_started
    }

    pub fn pulse_ended(&self) -> bool {
        self.pulse_ended
    }

    pub fn selector_active(&self) -> bool {
        self.selector
    }

    /// Dominant visual mode: pulse, then on, then selector
    pub fn mode(&self) -> TileMode {
        if self.pulsing {
            TileMode::Pulsing
        } else if self.on {
            TileMode::On
        } else if self.selector {
            TileMode::Selector
        } else {
            TileMode::Off
        }
    }

    /// Alpha the tile is drawn with this frame
    pub fn alpha(&self) -> u8 {
        match self.mode() {
            TileMode::Pulsing => self.fader.value_u8(),
            TileMode::On => TILE_ON_ALPHA,
            TileMode::Selector => TILE_SELECTOR_ALPHA,
            TileMode::Off => 0,
        }
    }

    /// Advance one frame and paint the tile
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.update();
        let alpha = self.alpha();
        match self.mode() {
            TileMode::Off => {}
            TileMode::Selector => canvas.draw_selector(&self.selector_mask, Color::WHITE, alpha),
            TileMode::On | TileMode::Pulsing => {
                if alpha > 0 {
                    canvas.fill_rect(self.rect, Color::WHITE, alpha)
                }
            }
        }
    }
}
