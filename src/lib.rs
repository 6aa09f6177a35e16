//! Tomb Tiles - a Simon-says memory game
//!
//! Core modules:
//! - `sim`: Frame-driven game core (interpolators, tiles, board, gameplay state machine)
//! - `screens`: Screen contract and the secret chamber screen
//! - `game_loop`: Owning coordinator that dispatches to the current screen
//! - `renderer`: Render surface contract consumed by the core
//! - `settings`: Game configuration shared across screens
//! - `audio`: Sound effect queue and mixer settings

pub mod audio;
pub mod game_loop;
pub mod input;
pub mod renderer;
pub mod screens;
pub mod settings;
pub mod sim;

pub use game_loop::{GameLoop, LoopStatus};
pub use settings::{Difficulty, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Target frame rate (one logical tick per rendered frame)
    pub const FPS: u32 = 60;

    /// Tiles per row and per column
    pub const GRID_COLS: usize = 3;
    pub const GRID_ROWS: usize = 3;

    /// Screen size the artwork is designed for
    pub const DESIGN_WIDTH: f32 = 800.0;
    pub const DESIGN_HEIGHT: f32 = 480.0;

    /// Board height as a fraction of the screen height (440 px on a 480 px screen)
    pub const BOARD_HEIGHT_NUM: f32 = 440.0;
    pub const BOARD_HEIGHT_DEN: f32 = 480.0;
    /// Board is centred this many pixels above the screen centre
    pub const BOARD_LIFT: f32 = 10.0;

    /// Gate between starting consecutive pulses of the computer's sequence (ms)
    pub const PULSE_GATE_MS: u64 = 1500;
    /// Pause after the player completes a sequence before moving on (ms)
    pub const ROUND_END_DELAY_MS: u64 = 2500;

    /// Board fade-in when a game starts (seconds)
    pub const BOARD_FADE_IN_SECS: f32 = 1.0;
    /// Whole-screen fade-out before leaving gameplay (seconds)
    pub const SCREEN_FADE_OUT_SECS: f32 = 1.0;

    /// Tile alpha levels
    pub const TILE_ON_ALPHA: u8 = 255;
    pub const TILE_PULSE_PEAK_ALPHA: u8 = 170;
    pub const TILE_SELECTOR_ALPHA: u8 = 255;

    /// Number of alternating tile pulse sounds
    pub const TILE_PULSE_VARIANTS: u8 = 2;
}
