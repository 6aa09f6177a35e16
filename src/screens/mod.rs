//! Screen contract
//!
//! Screens never hold references to each other. Each frame the game loop
//! calls `update` on the current screen, which answers with a `Transition`
//! naming the next screen symbolically; the loop owns every screen and does
//! the switch.

pub mod chamber;

pub use chamber::SecretChamber;

use crate::audio::AudioManager;
use crate::input::InputEvent;
use crate::renderer::Canvas;
use crate::settings::Settings;

/// Screens the game loop can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Menu,
    GamePlay,
    SecretChamber,
}

/// What the game loop should do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep running this screen
    Stay,
    /// Switch to another screen
    Goto(ScreenId),
    /// Quit the game
    Quit,
}

/// Per-frame context handed to `Screen::update`
pub struct FrameCtx<'a> {
    /// Clock reading for this frame
    pub now_ms: u64,
    pub settings: &'a mut Settings,
    pub audio: &'a mut AudioManager,
}

pub trait Screen {
    /// Handle this frame's input and advance game logic
    fn update(&mut self, ctx: &mut FrameCtx<'_>, events: &[InputEvent]) -> Transition;

    /// Paint the current state. Fades and pulses advance here, once per frame.
    fn draw(&mut self, settings: &Settings, canvas: &mut dyn Canvas);
}
