//! The tile grid
//!
//! The board is a square pattern image centred on the screen, split into
//! `cols x rows` tiles numbered from 1 in row-major order. Index 0 means
//! "no tile" everywhere: out-of-bounds lookups return it and commands given
//! it are ignored.
//!
//! Besides the tiles, the board carries its own fade (game start) and zoom
//! (winning zoom-out) interpolators applied to the board image.

use glam::Vec2;

use super::interpolator::{Interpolator, Ramp};
use super::tile::TileLight;
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::{BOARD_HEIGHT_DEN, BOARD_HEIGHT_NUM, BOARD_LIFT, TILE_PULSE_VARIANTS};
use crate::renderer::{Canvas, ImageId, PatternBoard, Rect};
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Board {
    cols: usize,
    rows: usize,
    fps: u32,
    screen_width: f32,
    /// Board centre on screen (fixed while zooming)
    center: Vec2,
    /// Board size at 100% zoom
    full_size: Vec2,
    /// Current on-screen board rectangle
    rect: Rect,
    tile_size: Vec2,
    art: PatternBoard,
    tiles: Vec<TileLight>,
    fader: Interpolator,
    zoomer: Interpolator,
    last_pulse_sound: u8,
}

impl Board {
    pub fn new(settings: &Settings) -> Self {
        let screen = Vec2::new(settings.screen_width, settings.screen_height);
        let height = (screen.y * BOARD_HEIGHT_NUM / BOARD_HEIGHT_DEN).floor();
        let full_size = Vec2::splat(height);
        let center = screen / 2.0 - Vec2::new(0.0, BOARD_LIFT);
        let tile_size = Vec2::new(
            (full_size.x / settings.cols as f32).floor(),
            (full_size.y / settings.rows as f32).floor(),
        );

        let mut board = Self {
            cols: settings.cols,
            rows: settings.rows,
            fps: settings.fps,
            screen_width: screen.x,
            center,
            full_size,
            rect: Rect::centered_at(center, full_size),
            tile_size,
            art: PatternBoard::for_height(height),
            tiles: Vec::with_capacity(settings.num_tiles()),
            fader: Interpolator::alpha(settings.fps, 255),
            zoomer: Interpolator::zoom(settings.fps, 100.0),
            last_pulse_sound: 0,
        };
        board.reset();
        board
    }

    /// Full size, fresh tiles, no fade or zoom in progress
    pub fn reset(&mut self) {
        self.rect = Rect::centered_at(self.center, self.full_size);
        self.fade_reset();
        self.zoom_reset();
        self.setup_tiles();
    }

    fn setup_tiles(&mut self) {
        self.tiles.clear();
        for index in 1..=self.num_tiles() {
            let offset = self.index_to_coordinates(index);
            let rect = Rect {
                pos: self.rect.pos + offset,
                size: self.tile_size,
            };
            self.tiles
                .push(TileLight::new(index, rect, self.screen_width, self.fps));
        }
    }

    pub fn num_tiles(&self) -> usize {
        self.cols * self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn art(&self) -> PatternBoard {
        self.art
    }

    /// Tile in the middle of the grid (5 on a 3x3 board)
    pub fn center_index(&self) -> usize {
        1 + (self.rows / 2) * self.cols + self.cols / 2
    }

    /// Whether `index` names a tile on this board
    pub fn is_valid_index(&self, index: usize) -> bool {
        (1..=self.num_tiles()).contains(&index)
    }

    pub fn tile(&self, index: usize) -> Option<&TileLight> {
        index.checked_sub(1).and_then(|i| self.tiles.get(i))
    }

    fn tile_mut(&mut self, index: usize) -> Option<&mut TileLight> {
        let tile = index.checked_sub(1).and_then(|i| self.tiles.get_mut(i));
        if tile.is_none() {
            log::debug!("Ignoring command for tile {}", index);
        }
        tile
    }

    /// Whether a screen position lies on the board
    pub fn contains(&self, pos: Vec2) -> bool {
        self.rect.contains(pos)
    }

    /// Tile under a screen position, or 0 when outside the board
    pub fn coordinates_to_index(&self, pos: Vec2) -> usize {
        if !self.contains(pos) {
            return 0;
        }
        let local = pos - self.rect.pos;
        // Clamp so the sliver left over by whole-pixel tiles maps to the last row/column
        let col = ((local.x / self.tile_size.x).floor().max(0.0) as usize).min(self.cols - 1);
        let row = ((local.y / self.tile_size.y).floor().max(0.0) as usize).min(self.rows - 1);
        1 + row * self.cols + col
    }

    /// Top-left of a tile relative to the board's top-left
    pub fn index_to_coordinates(&self, index: usize) -> Vec2 {
        let i = index.saturating_sub(1);
        let col = i % self.cols;
        let row = i / self.cols;
        Vec2::new(col as f32 * self.tile_size.x, row as f32 * self.tile_size.y)
    }

    /// Screen position of a tile's centre
    pub fn tile_center(&self, index: usize) -> Option<Vec2> {
        self.tile(index).map(|t| t.rect().center())
    }

    // === Tile commands ===

    pub fn turn_on(&mut self, index: usize, audio: &mut AudioManager) {
        if let Some(tile) = self.tile_mut(index) {
            tile.turn_on();
            self.play_pulse_sound(audio);
        }
    }

    pub fn turn_on_selector(&mut self, index: usize, audio: &mut AudioManager) {
        if let Some(tile) = self.tile_mut(index) {
            tile.selector_on();
            audio.play(SoundEffect::TileSelector);
        }
    }

    pub fn turn_off_selector(&mut self, index: usize) {
        if let Some(tile) = self.tile_mut(index) {
            tile.selector_off();
        }
    }

    /// Pulse a tile; returns whether a new pulse started
    pub fn pulse(&mut self, index: usize, duration_secs: f32, audio: &mut AudioManager) -> bool {
        let started = match self.tile_mut(index) {
            Some(tile) if !tile.is_pulsing() => tile.pulse(duration_secs),
            _ => false,
        };
        if started {
            log::debug!("Pulsing tile {}", index);
            self.play_pulse_sound(audio);
        }
        started
    }

    pub fn turn_off_all(&mut self) {
        for tile in &mut self.tiles {
            tile.turn_off();
        }
    }

    pub fn pulse_started(&self, index: usize) -> bool {
        self.tile(index).is_some_and(|t| t.pulse_started())
    }

    pub fn pulse_ended(&self, index: usize) -> bool {
        self.tile(index).is_some_and(|t| t.pulse_ended())
    }

    pub fn is_pulsing(&self, index: usize) -> bool {
        self.tile(index).is_some_and(|t| t.is_pulsing())
    }

    pub fn is_on(&self, index: usize) -> bool {
        self.tile(index).is_some_and(|t| t.is_on())
    }

    // Alternate between the pulse sounds
    fn play_pulse_sound(&mut self, audio: &mut AudioManager) {
        self.last_pulse_sound = (self.last_pulse_sound + 1) % TILE_PULSE_VARIANTS;
        audio.play(SoundEffect::TilePulse(self.last_pulse_sound));
    }

    // === Board fade ===

    pub fn fade_in(&mut self, duration_secs: f32) {
        self.fader.arm(Ramp::Rising, duration_secs, Some(0.0), 255.0);
    }

    pub fn fade_out(&mut self, duration_secs: f32) {
        self.fader.arm(Ramp::Falling, duration_secs, None, 0.0);
    }

    pub fn fade_reset(&mut self) {
        self.fader.reset();
    }

    pub fn fade_in_started(&self) -> bool {
        self.fader.started(Ramp::Rising)
    }

    pub fn fade_in_ended(&self) -> bool {
        self.fader.ended(Ramp::Rising)
    }

    pub fn fade_out_started(&self) -> bool {
        self.fader.started(Ramp::Falling)
    }

    pub fn fade_out_ended(&self) -> bool {
        self.fader.ended(Ramp::Falling)
    }

    pub fn alpha(&self) -> u8 {
        self.fader.value_u8()
    }

    // === Board zoom ===

    pub fn zoom_in(&mut self, duration_secs: f32) {
        self.zoomer.arm(Ramp::Rising, duration_secs, Some(0.0), 100.0);
    }

    pub fn zoom_out(&mut self, duration_secs: f32) {
        self.zoomer.arm(Ramp::Falling, duration_secs, None, 0.0);
    }

    pub fn zoom_reset(&mut self) {
        self.zoomer.reset();
        self.rect = Rect::centered_at(self.center, self.full_size);
    }

    pub fn zoom_in_started(&self) -> bool {
        self.zoomer.started(Ramp::Rising)
    }

    pub fn zoom_in_ended(&self) -> bool {
        self.zoomer.ended(Ramp::Rising)
    }

    pub fn zoom_out_started(&self) -> bool {
        self.zoomer.started(Ramp::Falling)
    }

    pub fn zoom_out_ended(&self) -> bool {
        self.zoomer.ended(Ramp::Falling)
    }

    /// Current zoom level in percent
    pub fn zoom(&self) -> f32 {
        self.zoomer.value()
    }

    /// Advance fade, zoom and tile pulses by one frame and paint the board
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        let zoom = self.zoomer.advance();
        let size = (self.full_size * zoom / 100.0).floor();
        self.rect = Rect::centered_at(self.center, size);

        let alpha = self.fader.advance().round() as u8;
        canvas.draw_image(ImageId::PatternBoard(self.art), self.rect, alpha);

        for tile in &mut self.tiles {
            tile.draw(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingCanvas;
    use proptest::prelude::*;

    fn board() -> Board {
        Board::new(&Settings::default())
    }

    #[test]
    fn test_default_geometry() {
        let b = board();
        // 440 px board centred on 800x480, lifted 10 px
        assert_eq!(b.rect(), Rect::new(180.0, 10.0, 440.0, 440.0));
        assert_eq!(b.tile_size, Vec2::new(146.0, 146.0));
        assert_eq!(b.art(), PatternBoard::Small);
        assert_eq!(b.num_tiles(), 9);
    }

    #[test]
    fn test_coordinates_to_index() {
        let b = board();
        assert_eq!(b.coordinates_to_index(Vec2::new(180.0, 10.0)), 1);
        assert_eq!(b.coordinates_to_index(Vec2::new(400.0, 230.0)), 5);
        assert_eq!(b.coordinates_to_index(Vec2::new(619.0, 10.0)), 3);
        // The two-pixel sliver past the last whole tile still maps to the last tile
        assert_eq!(b.coordinates_to_index(Vec2::new(619.5, 449.5)), 9);
        // Outside
        assert_eq!(b.coordinates_to_index(Vec2::new(179.9, 100.0)), 0);
        assert_eq!(b.coordinates_to_index(Vec2::new(620.0, 100.0)), 0);
        assert_eq!(b.coordinates_to_index(Vec2::new(10.0, 470.0)), 0);
    }

    #[test]
    fn test_index_round_trip() {
        let b = board();
        for index in 1..=9 {
            let center = b.tile_center(index).unwrap();
            assert_eq!(b.coordinates_to_index(center), index);
        }
        assert_eq!(b.index_to_coordinates(6), Vec2::new(292.0, 146.0));
    }

    #[test]
    fn test_invalid_indices_are_ignored() {
        let mut b = board();
        let mut audio = AudioManager::new();
        b.turn_on(0, &mut audio);
        b.turn_on(10, &mut audio);
        assert!(!b.pulse(0, 0.4, &mut audio));
        assert!(audio.pending().is_empty());
        assert!(!b.is_on(0));
        assert!(!b.pulse_ended(42));
    }

    #[test]
    fn test_pulse_sounds_alternate() {
        let mut b = board();
        let mut audio = AudioManager::new();
        b.pulse(1, 0.4, &mut audio);
        b.pulse(2, 0.4, &mut audio);
        b.pulse(3, 0.4, &mut audio);
        // Second pulse on a pulsing tile makes no sound
        b.pulse(3, 0.4, &mut audio);
        let sounds: Vec<_> = audio.pending().iter().map(|(s, _)| *s).collect();
        assert_eq!(
            sounds,
            vec![
                SoundEffect::TilePulse(1),
                SoundEffect::TilePulse(0),
                SoundEffect::TilePulse(1)
            ]
        );
    }

    #[test]
    fn test_pulse_completes_through_draw() {
        let mut b = board();
        let mut audio = AudioManager::new();
        let mut canvas = RecordingCanvas::new(800.0, 480.0);
        b.pulse(4, 0.2, &mut audio);
        assert!(b.pulse_started(4));
        for _ in 0..30 {
            b.draw(&mut canvas);
        }
        assert!(b.pulse_ended(4));
        assert!(!b.is_pulsing(4));
    }

    #[test]
    fn test_reset_clears_tiles() {
        let mut b = board();
        let mut audio = AudioManager::new();
        b.turn_on(2, &mut audio);
        b.turn_on_selector(5, &mut audio);
        b.pulse(7, 0.4, &mut audio);
        b.reset();
        for index in 1..=9 {
            let t = b.tile(index).unwrap();
            assert!(!t.is_on() && !t.selector_active() && !t.pulse_started());
        }
    }

    #[test]
    fn test_fade_in_then_zoom_out() {
        let mut b = board();
        let mut canvas = RecordingCanvas::new(800.0, 480.0);

        b.fade_in(1.0);
        assert_eq!(b.alpha(), 0);
        for _ in 0..60 {
            b.draw(&mut canvas);
        }
        assert!(b.fade_in_ended());
        assert_eq!(b.alpha(), 255);

        b.zoom_out(1.0);
        for _ in 0..30 {
            b.draw(&mut canvas);
        }
        let half = b.rect();
        assert!(half.size.x < 230.0 && half.size.x > 210.0);
        assert_eq!(half.center(), Vec2::new(400.0, 230.0));
        for _ in 0..31 {
            b.draw(&mut canvas);
        }
        assert!(b.zoom_out_ended());
        assert_eq!(b.rect().size, Vec2::ZERO);

        b.zoom_reset();
        assert_eq!(b.rect().size, Vec2::splat(440.0));
        assert!(!b.zoom_out_started());
    }

    #[test]
    fn test_zoom_in_and_fade_out() {
        let mut b = board();
        let mut canvas = RecordingCanvas::new(800.0, 480.0);
        b.zoom_in(0.5);
        b.fade_out(0.5);
        assert_eq!(b.zoom(), 0.0);
        for _ in 0..30 {
            b.draw(&mut canvas);
        }
        assert!(b.zoom_in_ended() && b.fade_out_ended());
        assert_eq!(b.rect(), Rect::new(180.0, 10.0, 440.0, 440.0));
        assert_eq!(b.alpha(), 0);
        assert_eq!(b.center_index(), 5);
    }

    proptest! {
        #[test]
        fn prop_mapping_is_total(x in -200.0f32..1000.0, y in -200.0f32..700.0) {
            let b = board();
            let pos = Vec2::new(x, y);
            let index = b.coordinates_to_index(pos);
            if b.contains(pos) {
                prop_assert!((1..=9).contains(&index));
            } else {
                prop_assert_eq!(index, 0);
            }
            // Same answer every time
            prop_assert_eq!(b.coordinates_to_index(pos), index);
        }
    }
}
