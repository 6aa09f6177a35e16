//! Gameplay state types
//!
//! Phase of the gameplay state machine and the data of the round in play.

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::settings::Difficulty;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Board fades in
    Init,
    /// Computer plays the sequence back
    ComputerTurn,
    /// Player repeats the sequence
    PlayerTurn,
    /// Final round won, board zooms out
    GameWin,
    /// Fade finished, hand off to the chamber
    SecretChamber,
    /// Fading out to the menu
    ReturnToMenu,
    /// Fading out to quit
    GameExit,
}

impl GamePhase {
    /// Phases that only wait for the screen fade-out before leaving
    pub fn is_leaving(&self) -> bool {
        matches!(self, GamePhase::ReturnToMenu | GamePhase::GameExit)
    }
}

/// Draw `len` distinct tile indices from `1..=num_tiles`, in random order
pub fn generate_sequence<R: Rng + ?Sized>(rng: &mut R, num_tiles: usize, len: usize) -> Vec<usize> {
    let len = len.min(num_tiles);
    index::sample(rng, num_tiles, len)
        .into_iter()
        .map(|i| i + 1)
        .collect()
}

/// Outcome of comparing a completed player sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Correct,
    Incorrect,
}

/// The round in play
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRound {
    pub difficulty: Difficulty,
    /// Tiles the computer pulses
    pub computer_sequence: Vec<usize>,
    /// Position in the computer sequence currently being pulsed
    pub computer_index: usize,
    pub computer_started: bool,
    /// Tiles the player has committed so far
    pub player_sequence: Vec<usize>,
    pub player_started: bool,
    /// Latched once the player sequence is complete and compared
    pub player_ended: bool,
    /// Keyboard selector position (tile index)
    pub selector: usize,
    /// Result of the last comparison
    pub result: Option<RoundResult>,
    /// Correct rounds this game
    pub score: u32,
}

impl GameRound {
    pub fn new(difficulty: Difficulty, center_tile: usize) -> Self {
        Self {
            difficulty,
            computer_sequence: Vec::new(),
            computer_index: 0,
            computer_started: false,
            player_sequence: Vec::new(),
            player_started: false,
            player_ended: false,
            selector: center_tile,
            result: None,
            score: 0,
        }
    }

    /// Clear the computer's side before a new playback
    pub fn begin_computer_turn(&mut self) {
        self.computer_sequence.clear();
        self.computer_index = 0;
        self.computer_started = false;
    }

    /// Clear the player's side and re-centre the selector
    pub fn begin_player_turn(&mut self, center_tile: usize) {
        self.player_sequence.clear();
        self.player_started = false;
        self.player_ended = false;
        self.selector = center_tile;
        self.result = None;
    }

    /// Whether the player has entered as many tiles as the computer showed
    pub fn player_complete(&self) -> bool {
        self.player_sequence.len() >= self.computer_sequence.len()
    }

    /// Append a tile to the player sequence; refused once complete
    pub fn commit(&mut self, tile: usize) -> bool {
        if self.player_complete() {
            return false;
        }
        self.player_sequence.push(tile);
        true
    }

    /// Compare the two sequences and score a match
    pub fn compare(&mut self) -> RoundResult {
        let result = if self.player_sequence == self.computer_sequence {
            self.score += 1;
            RoundResult::Correct
        } else {
            RoundResult::Incorrect
        };
        self.result = Some(result);
        result
    }
}
