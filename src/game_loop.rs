//! Owning screen coordinator
//!
//! The loop owns the settings, the audio queue and every screen. Each tick it
//! advances the clock, updates the current screen with this frame's input and
//! either draws it or switches to the screen the update asked for.

use crate::audio::{AudioManager, SoundSink};
use crate::input::InputEvent;
use crate::renderer::Canvas;
use crate::screens::{FrameCtx, Screen, ScreenId, SecretChamber, Transition};
use crate::settings::Settings;
use crate::sim::{Clock, GamePlay};

/// Whether the loop should keep ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    Finished,
}

pub struct GameLoop {
    settings: Settings,
    audio: AudioManager,
    clock: Box<dyn Clock>,
    sink: Box<dyn SoundSink>,
    /// Menu is supplied by the front end
    menu: Box<dyn Screen>,
    gameplay: GamePlay,
    chamber: SecretChamber,
    current: ScreenId,
    frames: u64,
}

impl GameLoop {
    pub fn new(
        settings: Settings,
        seed: u64,
        clock: Box<dyn Clock>,
        sink: Box<dyn SoundSink>,
        menu: Box<dyn Screen>,
    ) -> Self {
        let gameplay = GamePlay::new(&settings, seed);
        // Separate stream so chamber headings don't shift the tile sequences
        let chamber = SecretChamber::new(&settings, seed.wrapping_add(1));
        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);

        log::info!(
            "Game loop started: {}x{} at {} fps, seed {}",
            settings.screen_width,
            settings.screen_height,
            settings.fps,
            seed
        );

        Self {
            settings,
            audio,
            clock,
            sink,
            menu,
            gameplay,
            chamber,
            current: ScreenId::Menu,
            frames: 0,
        }
    }

    /// Run one frame: update the current screen, then draw it or switch screens
    pub fn tick(&mut self, events: &[InputEvent], canvas: &mut dyn Canvas) -> LoopStatus {
        self.clock.advance_frame();
        self.frames += 1;
        let frames = self.frames;

        self.audio.set_muted(!self.settings.sound_fx_on);
        self.audio.set_master_volume(self.settings.master_volume);
        self.audio.set_sfx_volume(self.settings.sfx_volume);

        let Self {
            settings,
            audio,
            clock,
            sink,
            menu,
            gameplay,
            chamber,
            current,
            ..
        } = self;

        let screen: &mut dyn Screen = match *current {
            ScreenId::Menu => menu.as_mut(),
            ScreenId::GamePlay => gameplay,
            ScreenId::SecretChamber => chamber,
        };

        let mut ctx = FrameCtx {
            now_ms: clock.now_ms(),
            settings: &mut *settings,
            audio: &mut *audio,
        };
        let transition = screen.update(&mut ctx, events);

        let status = match transition {
            Transition::Stay => {
                screen.draw(settings, canvas);
                LoopStatus::Running
            }
            Transition::Goto(next) => {
                log::info!("Screen {:?} -> {:?}", current, next);
                *current = next;
                LoopStatus::Running
            }
            Transition::Quit => {
                log::info!("Quit after {} frames", frames);
                LoopStatus::Finished
            }
        };

        audio.flush(sink.as_mut());
        status
    }

    pub fn current(&self) -> ScreenId {
        self.current
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn gameplay(&self) -> &GamePlay {
        &self.gameplay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::input::Key;
    use crate::renderer::{Color, RecordingCanvas, Rect, TextPlacement};
    use crate::settings::Difficulty;
    use glam::Vec2;
    use crate::sim::{AutoPlayer, FrameClock};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Menu that starts a game on Confirm and quits on Escape
    struct TestMenu;

    impl Screen for TestMenu {
        fn update(&mut self, _ctx: &mut FrameCtx<'_>, events: &[InputEvent]) -> Transition {
            for event in events {
                match event.key() {
                    Some(Key::Confirm) => return Transition::Goto(ScreenId::GamePlay),
                    Some(Key::Escape) => return Transition::Quit,
                    _ => {}
                }
            }
            Transition::Stay
        }

        fn draw(&mut self, _settings: &Settings, canvas: &mut dyn Canvas) {
            canvas.draw_text(
                "menu",
                TextPlacement::CenteredX { y: 0.0 },
                10.0,
                Color::WHITE,
            );
        }
    }

    #[derive(Clone, Default)]
    struct SharedSink(Rc<RefCell<Vec<SoundEffect>>>);

    impl SoundSink for SharedSink {
        fn play(&mut self, effect: SoundEffect, _volume: f32) {
            self.0.borrow_mut().push(effect);
        }
    }

    fn game_loop(settings: Settings, sink: SharedSink) -> GameLoop {
        let fps = settings.fps;
        GameLoop::new(
            settings,
            11,
            Box::new(FrameClock::new(fps)),
            Box::new(sink),
            Box::new(TestMenu),
        )
    }

    #[test]
    fn test_switch_skips_draw_for_that_frame() {
        let mut game = game_loop(Settings::default(), SharedSink::default());
        let mut canvas = RecordingCanvas::new(800.0, 480.0);

        game.tick(&[], &mut canvas);
        assert_eq!(canvas.texts().collect::<Vec<_>>(), vec!["menu"]);

        canvas.clear();
        let status = game.tick(&[InputEvent::KeyDown(Key::Confirm)], &mut canvas);
        assert_eq!(status, LoopStatus::Running);
        assert_eq!(game.current(), ScreenId::GamePlay);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_quit_from_menu_finishes() {
        let mut game = game_loop(Settings::default(), SharedSink::default());
        let mut canvas = RecordingCanvas::new(800.0, 480.0);
        let status = game.tick(&[InputEvent::KeyDown(Key::Escape)], &mut canvas);
        assert_eq!(status, LoopStatus::Finished);
    }

    #[test]
    fn test_sound_setting_mutes_cues() {
        let sink = SharedSink::default();
        let settings = Settings {
            sound_fx_on: false,
            ..Default::default()
        };
        let mut game = game_loop(settings, sink.clone());
        let mut canvas = RecordingCanvas::new(800.0, 480.0);
        game.tick(&[InputEvent::KeyDown(Key::Confirm)], &mut canvas);
        for _ in 0..400 {
            game.tick(&[], &mut canvas);
        }
        assert!(game.gameplay().board().pulse_started(game.gameplay().round().computer_sequence[0]));
        assert!(sink.0.borrow().is_empty());
    }

    #[test]
    fn test_full_game_reaches_chamber_and_returns_to_menu() {
        let sink = SharedSink::default();
        let settings = Settings {
            difficulty: Difficulty::Hard,
            zoom_out_duration: 0.5,
            ..Default::default()
        };
        let mut game = game_loop(settings, sink.clone());
        let mut canvas = RecordingCanvas::new(800.0, 480.0);
        let mut player = AutoPlayer::default();

        game.tick(&[InputEvent::KeyDown(Key::Confirm)], &mut canvas);
        while game.current() == ScreenId::GamePlay {
            let events = player.next_events(game.gameplay());
            canvas.clear();
            assert_eq!(game.tick(&events, &mut canvas), LoopStatus::Running);
            assert!(game.frames() < 10_000);
        }
        assert_eq!(game.current(), ScreenId::SecretChamber);

        game.tick(&[], &mut canvas);
        assert!(sink.0.borrow().contains(&SoundEffect::Rumble));
        assert!(sink.0.borrow().contains(&SoundEffect::ChamberChant));

        // Continue: back to the menu with the difficulty reset
        let button = Rect::centered_at(Vec2::new(720.0, 440.0), Vec2::new(140.0, 40.0));
        game.tick(&[InputEvent::PointerDown(button.center())], &mut canvas);
        while game.current() == ScreenId::SecretChamber {
            game.tick(&[], &mut canvas);
            assert!(game.frames() < 20_000);
        }
        assert_eq!(game.current(), ScreenId::Menu);
        assert_eq!(game.settings().difficulty, Difficulty::Easy);
    }
}
