//! Render surface contract
//!
//! The core never touches pixels itself. Screens describe each frame through
//! the `Canvas` trait; a platform backend (or the recording canvas used by the
//! headless binary and the tests) turns those calls into output.

pub mod shapes;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use shapes::{Color, Rect, SelectorMask};

use crate::settings::Difficulty;

/// Pattern-board artwork sizes, picked by the board's on-screen height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternBoard {
    Small,
    Medium,
    Large,
}

impl PatternBoard {
    pub fn for_height(board_height: f32) -> Self {
        if board_height <= 480.0 {
            PatternBoard::Small
        } else if board_height <= 1200.0 {
            PatternBoard::Medium
        } else {
            PatternBoard::Large
        }
    }

    /// Asset file under the gameplay image folder
    pub fn file_name(&self) -> &'static str {
        match self {
            PatternBoard::Small => "patternboard_440.png",
            PatternBoard::Medium => "patternboard_1000.png",
            PatternBoard::Large => "patternboard_1680.png",
        }
    }
}

/// Logical image names resolved to files by the asset collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageId {
    /// The tile grid artwork
    PatternBoard(PatternBoard),
    /// Chamber art; the backend picks a random file from the difficulty's folder
    Chamber(Difficulty),
}

/// Where a line of text goes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TextPlacement {
    /// Horizontally centred on the screen at this top y
    CenteredX { y: f32 },
    /// Top-left corner of the text
    At(Vec2),
}

/// Drawing operations the core needs from a render surface
pub trait Canvas {
    /// Surface size in pixels
    fn size(&self) -> Vec2;

    /// Draw an image scaled into `rect`
    fn draw_image(&mut self, image: ImageId, rect: Rect, alpha: u8);

    /// Solid rectangle (tile highlight, buttons)
    fn fill_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    /// Tile cursor overlay
    fn draw_selector(&mut self, mask: &SelectorMask, color: Color, alpha: u8);

    /// Line of text at `size` pixels
    fn draw_text(&mut self, text: &str, placement: TextPlacement, size: f32, color: Color);

    /// Cover the whole surface (screen fades)
    fn fill_screen(&mut self, color: Color, alpha: u8);
}

/// A single recorded canvas call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Image {
        image: ImageId,
        rect: Rect,
        alpha: u8,
    },
    FillRect {
        rect: Rect,
        color: Color,
        alpha: u8,
    },
    Selector {
        mask: SelectorMask,
        color: Color,
        alpha: u8,
    },
    Text {
        text: String,
        placement: TextPlacement,
        size: f32,
        color: Color,
    },
    FillScreen {
        color: Color,
        alpha: u8,
    },
}

/// Canvas that stores every call, for headless runs and tests
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingCanvas {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text drawn since the last clear
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn draw_image(&mut self, image: ImageId, rect: Rect, alpha: u8) {
        self.commands.push(DrawCommand::Image { image, rect, alpha });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        self.commands.push(DrawCommand::FillRect { rect, color, alpha });
    }

    fn draw_selector(&mut self, mask: &SelectorMask, color: Color, alpha: u8) {
        self.commands.push(DrawCommand::Selector {
            mask: *mask,
            color,
            alpha,
        });
    }

    fn draw_text(&mut self, text: &str, placement: TextPlacement, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            placement,
            size,
            color,
        });
    }

    fn fill_screen(&mut self, color: Color, alpha: u8) {
        self.commands.push(DrawCommand::FillScreen { color, alpha });
    }
}
