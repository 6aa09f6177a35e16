//! Gameplay screen
//!
//! Drives the round sequence: the board fades in, the computer pulses a random
//! sequence, the player repeats it by clicking or with the arrow keys, and a
//! correct answer scores. Enough correct rounds zoom the board away and open
//! the secret chamber. Everything timed is carried across frames by timers and
//! interpolators; nothing here blocks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::board::Board;
use super::screen_fader::ScreenFader;
use super::state::{GamePhase, GameRound, RoundResult, generate_sequence};
use super::timer::Timer;
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::{BOARD_FADE_IN_SECS, PULSE_GATE_MS, ROUND_END_DELAY_MS, SCREEN_FADE_OUT_SECS};
use crate::input::{InputEvent, Key};
use crate::renderer::{Canvas, Color, Rect, TextPlacement};
use crate::screens::{FrameCtx, Screen, ScreenId, Transition};
use crate::settings::Settings;

const STATUS_COMPUTER_TURN: &str = "Computer's Turn";
const STATUS_PLAYER_TURN: &str = "Your Turn";
const STATUS_CORRECT: &str = "Correct!";
const STATUS_INCORRECT: &str = "Incorrect!";
const STATUS_GAME_WIN: &str = "You unlocked the treasure!";

/// Status/score text height at the design size
const TEXT_SIZE: f32 = 25.0;

pub struct GamePlay {
    board: Board,
    screen_fader: ScreenFader,
    phase: GamePhase,
    /// Restarted on every phase change
    phase_timer: Timer,
    /// Restarted when each computer pulse starts
    pulse_timer: Timer,
    /// Restarted when the player completes a sequence
    delay_timer: Timer,
    round: GameRound,
    status: Option<&'static str>,
    score_visible: bool,
    exit_button: Rect,
    rng: Pcg32,
}

impl GamePlay {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let board = Board::new(settings);
        let center = board.center_index();
        let (sx, sy) = (settings.scale_x(), settings.scale_y());
        let exit_button = Rect::centered_at(
            Vec2::new(settings.screen_width - 15.0 * sx, 15.0 * sy),
            Vec2::new(22.0 * sx, 22.0 * sy),
        );

        Self {
            board,
            screen_fader: ScreenFader::new(settings.fps),
            phase: GamePhase::Init,
            phase_timer: Timer::default(),
            pulse_timer: Timer::default(),
            delay_timer: Timer::default(),
            round: GameRound::new(settings.difficulty, center),
            status: None,
            score_visible: false,
            exit_button,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn round(&self) -> &GameRound {
        &self.round
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.round.score
    }

    /// Status line currently shown, if any
    pub fn status(&self) -> Option<&'static str> {
        self.status
    }

    pub fn score_visible(&self) -> bool {
        self.score_visible
    }

    pub fn exit_button(&self) -> Rect {
        self.exit_button
    }

    /// Whether the player can enter tiles right now
    pub fn accepting_input(&self) -> bool {
        self.phase == GamePhase::PlayerTurn
            && self.round.player_started
            && !self.round.player_ended
    }

    fn set_phase(&mut self, phase: GamePhase, now_ms: u64) {
        log::info!("Game phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.status = None;

        match phase {
            GamePhase::ComputerTurn => {
                self.round.begin_computer_turn();
                self.board.reset();
            }
            GamePhase::PlayerTurn => {
                self.round.begin_player_turn(self.board.center_index());
                self.board.turn_off_all();
            }
            _ => {}
        }

        self.phase_timer.restart(now_ms);
    }

    /// Menu and quit requests wait for the screen fade; a second request is ignored
    fn request_leave(&mut self, phase: GamePhase, now_ms: u64) {
        if self.phase.is_leaving() {
            log::debug!("Already leaving ({:?}), ignoring {:?}", self.phase, phase);
            return;
        }
        self.set_phase(phase, now_ms);
    }

    fn fade_screen(&mut self) {
        if !self.screen_fader.fade_out_started() {
            self.screen_fader.fade_out(SCREEN_FADE_OUT_SECS);
        }
    }

    /// Back to a fresh game for the next visit
    fn cleanup(&mut self, now_ms: u64) {
        self.board.reset();
        self.screen_fader.reset();
        self.round = GameRound::new(self.round.difficulty, self.board.center_index());
        self.score_visible = false;
        self.set_phase(GamePhase::Init, now_ms);
    }

    fn init(&mut self, now_ms: u64) {
        if !self.board.fade_in_started() {
            self.board.fade_in(BOARD_FADE_IN_SECS);
        }
        if self.board.fade_in_ended() {
            self.set_phase(GamePhase::ComputerTurn, now_ms);
        }
    }

    fn computer_turn(&mut self, ctx: &mut FrameCtx<'_>) {
        if !self.round.computer_started {
            self.round.difficulty = ctx.settings.difficulty;
            self.round.computer_sequence = generate_sequence(
                &mut self.rng,
                self.board.num_tiles(),
                ctx.settings.tiles_per_sequence(),
            );
            self.round.computer_started = true;
            log::info!(
                "Computer sequence ({}): {:?}",
                self.round.difficulty.as_str(),
                self.round.computer_sequence
            );
        }

        self.status = Some(STATUS_COMPUTER_TURN);
        self.score_visible = true;

        let Some(&tile) = self.round.computer_sequence.get(self.round.computer_index) else {
            self.set_phase(GamePhase::PlayerTurn, ctx.now_ms);
            return;
        };

        if !self.board.pulse_started(tile) {
            let gate = if self.round.computer_index == 0 {
                self.phase_timer
            } else {
                self.pulse_timer
            };
            if gate.elapsed_ms(ctx.now_ms) >= PULSE_GATE_MS {
                self.board
                    .pulse(tile, ctx.settings.pulse_duration(), ctx.audio);
                self.pulse_timer.restart(ctx.now_ms);
            }
            return;
        }

        if self.board.pulse_ended(tile) {
            self.round.computer_index += 1;
            if self.round.computer_index >= self.round.computer_sequence.len() {
                self.set_phase(GamePhase::PlayerTurn, ctx.now_ms);
            }
        }
    }

    fn player_turn(&mut self, ctx: &mut FrameCtx<'_>, events: &[InputEvent]) {
        if !self.round.player_started {
            self.status = Some(STATUS_PLAYER_TURN);
            self.board.turn_on_selector(self.round.selector, ctx.audio);
            self.round.player_started = true;
            return;
        }

        if self.round.player_ended {
            if self.delay_timer.elapsed_ms(ctx.now_ms) >= ROUND_END_DELAY_MS {
                let next = match self.round.result {
                    Some(RoundResult::Correct)
                        if self.round.score >= ctx.settings.wins_to_open_chamber =>
                    {
                        GamePhase::GameWin
                    }
                    Some(RoundResult::Correct) => GamePhase::ComputerTurn,
                    // Retry the same sequence
                    _ => GamePhase::PlayerTurn,
                };
                self.set_phase(next, ctx.now_ms);
            }
            return;
        }

        for event in events {
            if self.round.player_complete() {
                break;
            }
            match *event {
                InputEvent::PointerDown(pos) => {
                    if self.board.contains(pos) {
                        let tile = self.board.coordinates_to_index(pos);
                        self.commit_tile(tile, ctx.audio);
                    }
                }
                InputEvent::PointerMoved(pos) => {
                    let tile = self.board.coordinates_to_index(pos);
                    self.move_selector(tile, ctx.audio);
                }
                InputEvent::KeyDown(Key::Confirm) => {
                    self.commit_tile(self.round.selector, ctx.audio);
                }
                InputEvent::KeyDown(key) => {
                    if let Some(tile) = self.selector_target(key) {
                        self.move_selector(tile, ctx.audio);
                    }
                }
            }
        }

        if self.round.player_complete() {
            self.round.player_ended = true;
            self.board.turn_off_selector(self.round.selector);
            self.delay_timer.restart(ctx.now_ms);

            let result = self.round.compare();
            self.status = Some(match result {
                RoundResult::Correct => STATUS_CORRECT,
                RoundResult::Incorrect => STATUS_INCORRECT,
            });
            log::info!(
                "Player sequence {:?} vs {:?}: {:?} (score {})",
                self.round.player_sequence,
                self.round.computer_sequence,
                result,
                self.round.score
            );
        }
    }

    fn commit_tile(&mut self, tile: usize, audio: &mut AudioManager) {
        if !self.board.is_valid_index(tile) {
            return;
        }
        if self.round.commit(tile) {
            log::debug!("Player committed tile {}", tile);
            self.board.turn_on(tile, audio);
        }
    }

    fn move_selector(&mut self, tile: usize, audio: &mut AudioManager) {
        if !self.board.is_valid_index(tile) || tile == self.round.selector {
            return;
        }
        self.board.turn_off_selector(self.round.selector);
        self.round.selector = tile;
        self.board.turn_on_selector(tile, audio);
    }

    /// Tile an arrow key moves the selector to.
    ///
    /// Left/Right step through tiles in row-major order, so they wrap across rows;
    /// Up/Down step a whole row. Moves that would leave the board go nowhere.
    fn selector_target(&self, key: Key) -> Option<usize> {
        let selector = self.round.selector as isize;
        let cols = self.board.cols() as isize;
        let target = match key {
            Key::Up => selector - cols,
            Key::Down => selector + cols,
            Key::Left => selector - 1,
            Key::Right => selector + 1,
            _ => return None,
        };
        (target >= 1 && target <= self.board.num_tiles() as isize).then_some(target as usize)
    }

    fn game_win(&mut self, ctx: &mut FrameCtx<'_>) {
        if !self.board.zoom_out_started() {
            self.board.turn_off_all();
            self.status = Some(STATUS_GAME_WIN);
            self.score_visible = false;
            self.board.zoom_out(ctx.settings.zoom_out_duration);
            ctx.audio.play(SoundEffect::Rumble);
        }

        if self.board.zoom_out_ended() {
            self.status = None;
            self.fade_screen();
        }

        if self.screen_fader.fade_out_completed() {
            self.set_phase(GamePhase::SecretChamber, ctx.now_ms);
        }
    }
}

impl Screen for GamePlay {
    fn update(&mut self, ctx: &mut FrameCtx<'_>, events: &[InputEvent]) -> Transition {
        for event in events {
            match *event {
                InputEvent::KeyDown(Key::Escape) => {
                    self.request_leave(GamePhase::ReturnToMenu, ctx.now_ms)
                }
                InputEvent::KeyDown(Key::Quit) => {
                    self.request_leave(GamePhase::GameExit, ctx.now_ms)
                }
                InputEvent::PointerDown(pos) if self.exit_button.contains(pos) => {
                    self.request_leave(GamePhase::ReturnToMenu, ctx.now_ms)
                }
                _ => {}
            }
        }

        match self.phase {
            GamePhase::Init => self.init(ctx.now_ms),
            GamePhase::ComputerTurn => self.computer_turn(ctx),
            GamePhase::PlayerTurn => self.player_turn(ctx, events),
            GamePhase::GameWin => self.game_win(ctx),
            GamePhase::ReturnToMenu | GamePhase::GameExit => self.fade_screen(),
            GamePhase::SecretChamber => {}
        }

        // Leave only once the screen is fully faded
        if self.screen_fader.fade_out_completed() {
            match self.phase {
                GamePhase::GameExit => {
                    log::info!("Quitting from gameplay");
                    return Transition::Quit;
                }
                GamePhase::ReturnToMenu => {
                    self.cleanup(ctx.now_ms);
                    return Transition::Goto(ScreenId::Menu);
                }
                GamePhase::SecretChamber => {
                    self.cleanup(ctx.now_ms);
                    return Transition::Goto(ScreenId::SecretChamber);
                }
                _ => {}
            }
        }

        Transition::Stay
    }

    fn draw(&mut self, settings: &Settings, canvas: &mut dyn Canvas) {
        self.board.draw(canvas);

        let scale = settings.scale_x();
        let text_size = TEXT_SIZE * scale;
        let y = settings.screen_height - text_size;
        let half_width = settings.screen_width / 2.0;
        let half_board = self.board.rect().size.x.max(0.0) / 2.0;

        if let Some(message) = self.status {
            let placement = if self.score_visible {
                TextPlacement::At(Vec2::new(half_width - half_board, y))
            } else {
                TextPlacement::CenteredX { y }
            };
            canvas.draw_text(message, placement, text_size, Color::WHITE);
        }

        if self.score_visible {
            let score = format!(
                "Score: {}/{}",
                self.round.score, settings.wins_to_open_chamber
            );
            canvas.draw_text(
                &score,
                TextPlacement::At(Vec2::new(half_width + half_board - 100.0 * scale, y)),
                text_size,
                Color::WHITE,
            );
        }

        canvas.fill_rect(self.exit_button, Color::RED, 255);
        canvas.draw_text(
            "X",
            TextPlacement::At(self.exit_button.pos),
            self.exit_button.size.y,
            Color::WHITE,
        );

        self.screen_fader.draw(canvas);
    }
}
