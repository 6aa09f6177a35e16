//! Frame-driven game core
//!
//! Everything that decides what happens on screen lives here:
//! - Timing only through clock readings and per-frame interpolators, never sleeps
//! - Seeded RNG only, so a run replays exactly from its seed
//! - No platform dependencies; drawing goes through the `Canvas` trait

pub mod autoplay;
pub mod board;
pub mod gameplay;
pub mod interpolator;
pub mod screen_fader;
pub mod state;
pub mod tile;
pub mod timer;

pub use autoplay::AutoPlayer;
pub use board::Board;
pub use gameplay::GamePlay;
pub use interpolator::{Interpolator, Ramp};
pub use screen_fader::ScreenFader;
pub use state::{GamePhase, GameRound, RoundResult, generate_sequence};
pub use tile::{TileLight, TileMode};
pub use timer::{Clock, FrameClock, SystemClock, Timer};
