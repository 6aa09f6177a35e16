//! Demo player
//!
//! Watches the gameplay screen and answers the computer's sequence with
//! pointer clicks, a few frames apart, the way a player would. Used by the
//! headless binary and by end-to-end tests.

use super::gameplay::GamePlay;
use crate::input::InputEvent;

/// Frames between clicks (about a third of a second at 60 fps)
const DEFAULT_CLICK_INTERVAL: u32 = 20;

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    click_interval: u32,
    countdown: u32,
    /// Get the last tile of the next answer wrong once
    mistake_pending: bool,
}

impl Default for AutoPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_CLICK_INTERVAL)
    }
}

impl AutoPlayer {
    pub fn new(click_interval: u32) -> Self {
        Self {
            click_interval: click_interval.max(1),
            countdown: click_interval.max(1),
            mistake_pending: false,
        }
    }

    /// Answer the first sequence wrongly before playing correctly
    pub fn with_mistake(mut self) -> Self {
        self.mistake_pending = true;
        self
    }

    /// Input for this frame
    pub fn next_events(&mut self, gameplay: &GamePlay) -> Vec<InputEvent> {
        if !gameplay.accepting_input() {
            self.countdown = self.click_interval;
            return Vec::new();
        }

        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return Vec::new();
        }
        self.countdown = self.click_interval;

        let round = gameplay.round();
        let position = round.player_sequence.len();
        let Some(&expected) = round.computer_sequence.get(position) else {
            return Vec::new();
        };

        let last = position + 1 == round.computer_sequence.len();
        let tile = if self.mistake_pending && last && position > 0 {
            self.mistake_pending = false;
            // Sequences never repeat a tile, so the first one is always wrong here
            round.computer_sequence[0]
        } else {
            expected
        };

        log::debug!("Autoplay clicks tile {}", tile);
        gameplay
            .board()
            .tile_center(tile)
            .map(|pos| vec![InputEvent::PointerDown(pos)])
            .unwrap_or_default()
    }
}
