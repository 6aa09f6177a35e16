//! Secret chamber screen
//!
//! Shown after the final winning round: chamber art for the difficulty just
//! beaten, a randomly picked heading and a Continue button back to the menu.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{FrameCtx, Screen, ScreenId, Transition};
use crate::audio::SoundEffect;
use crate::input::{InputEvent, Key};
use crate::renderer::{Canvas, Color, ImageId, Rect, TextPlacement};
use crate::settings::{Difficulty, Settings};
use crate::sim::ScreenFader;

const FADE_SECS: f32 = 0.5;

/// Headings per difficulty, one picked at random per visit
const WIN_TEXT: [[&str; 3]; 3] = [
    [
        "You found a hidden artifact!",
        "You uncovered an old mystery",
        "You found a long lost toy!",
    ],
    [
        "You found a priceless artifact!",
        "You found the Eye of Ra! ",
        "Someone's keeping an eye on you...",
    ],
    [
        "You've uncovered an ancient tomb!",
        "You found a room of treasure. But no way out! Goodbye!",
        "Someone died in here!",
    ],
];

pub struct SecretChamber {
    fader: ScreenFader,
    started: bool,
    exiting: bool,
    /// Difficulty whose chamber is on show
    difficulty: Difficulty,
    heading: &'static str,
    button: Rect,
    button_hover: bool,
    rng: Pcg32,
}

impl SecretChamber {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let (sx, sy) = (settings.scale_x(), settings.scale_y());
        let button = Rect::centered_at(
            Vec2::new(
                settings.screen_width - 80.0 * sx,
                settings.screen_height - 40.0 * sy,
            ),
            Vec2::new(140.0 * sx, 40.0 * sy),
        );

        Self {
            fader: ScreenFader::new(settings.fps),
            started: false,
            exiting: false,
            difficulty: settings.difficulty,
            heading: WIN_TEXT[settings.difficulty.index()][0],
            button,
            button_hover: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn heading(&self) -> &'static str {
        self.heading
    }

    pub fn button(&self) -> Rect {
        self.button
    }

    fn enter(&mut self, ctx: &mut FrameCtx<'_>) {
        self.started = true;
        self.difficulty = ctx.settings.difficulty;
        let choice = self.rng.random_range(0..WIN_TEXT[0].len());
        self.heading = WIN_TEXT[self.difficulty.index()][choice];
        self.fader.fade_in(FADE_SECS);
        ctx.audio.play(SoundEffect::ChamberChant);
        log::info!("Secret chamber opened ({})", self.difficulty.as_str());
    }

    fn leave(&mut self) {
        if !self.fader.fade_out_started() {
            self.fader.fade_out(FADE_SECS);
        }
    }

    fn reset(&mut self) {
        self.fader.reset();
        self.started = false;
        self.exiting = false;
        self.button_hover = false;
    }
}

impl Screen for SecretChamber {
    fn update(&mut self, ctx: &mut FrameCtx<'_>, events: &[InputEvent]) -> Transition {
        if !self.started {
            self.enter(ctx);
        }

        for event in events {
            match *event {
                InputEvent::KeyDown(Key::Escape) | InputEvent::KeyDown(Key::Quit) => {
                    self.exiting = true;
                    self.leave();
                }
                InputEvent::PointerDown(pos) if self.button.contains(pos) => {
                    // Continuing starts over from the first level
                    ctx.settings.set_difficulty(Difficulty::Easy);
                    self.leave();
                }
                InputEvent::PointerMoved(pos) => {
                    self.button_hover = self.button.contains(pos);
                }
                _ => {}
            }
        }

        if self.fader.fade_out_completed() {
            let exiting = self.exiting;
            self.reset();
            return if exiting {
                log::info!("Quitting from the chamber");
                Transition::Quit
            } else {
                Transition::Goto(ScreenId::Menu)
            };
        }

        Transition::Stay
    }

    fn draw(&mut self, settings: &Settings, canvas: &mut dyn Canvas) {
        let screen = Vec2::new(settings.screen_width, settings.screen_height);
        let art = Rect::centered_at(screen / 2.0, Vec2::splat(screen.y));
        canvas.draw_image(ImageId::Chamber(self.difficulty), art, 255);

        let text_size = 25.0 * settings.scale_x();
        canvas.draw_text(
            self.heading,
            TextPlacement::CenteredX {
                y: screen.y * 0.02,
            },
            text_size,
            Color::WHITE,
        );

        let color = if self.button_hover {
            Color::BUTTON_HOVER
        } else {
            Color::BUTTON
        };
        canvas.fill_rect(self.button, color, 255);
        canvas.draw_text(
            "Continue",
            TextPlacement::At(self.button.pos + Vec2::new(10.0, 5.0) * settings.scale_x()),
            text_size,
            Color::WHITE,
        );

        self.fader.draw(canvas);
    }
}
