//! Tomb Tiles - headless demo runner
//!
//! Plays one scripted game with the demo player: menu, gameplay until the
//! chamber opens, then quit. Drawing goes to a recording canvas and sounds to
//! the log, so the whole run is visible with `RUST_LOG=info`.
//!
//! Usage: `tomb-tiles [settings.json] [--seed N] [--mistake]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use tomb_tiles::audio::{SoundEffect, SoundSink};
    use tomb_tiles::input::{InputEvent, Key};
    use tomb_tiles::renderer::{Canvas, RecordingCanvas};
    use tomb_tiles::screens::{FrameCtx, Screen, ScreenId, Transition};
    use tomb_tiles::sim::{AutoPlayer, FrameClock};
    use tomb_tiles::{GameLoop, LoopStatus, Settings};

    /// Give up after this many frames (ten minutes of play)
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    #[derive(Debug, Default)]
    struct Options {
        settings_path: Option<String>,
        seed: Option<u64>,
        mistake: bool,
    }

    fn parse_args(args: impl Iterator<Item = String>) -> Result<Options, String> {
        let mut options = Options::default();
        let mut args = args;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = args.next().ok_or("--seed needs a value")?;
                    let seed = value
                        .parse()
                        .map_err(|_| format!("invalid seed: {}", value))?;
                    options.seed = Some(seed);
                }
                "--mistake" => options.mistake = true,
                _ if arg.starts_with("--") => return Err(format!("unknown option: {}", arg)),
                _ => options.settings_path = Some(arg),
            }
        }
        Ok(options)
    }

    /// Menu stand-in: starts a game straight away
    struct DemoMenu;

    impl Screen for DemoMenu {
        fn update(&mut self, ctx: &mut FrameCtx<'_>, _events: &[InputEvent]) -> Transition {
            log::info!("Menu: starting a {} game", ctx.settings.difficulty.as_str());
            Transition::Goto(ScreenId::GamePlay)
        }

        fn draw(&mut self, _settings: &Settings, _canvas: &mut dyn Canvas) {}
    }

    /// Logs each sound instead of playing it
    struct LogSink;

    impl SoundSink for LogSink {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            log::info!("Sound: {} at {:.2}", effect.asset_name(), volume);
        }
    }

    pub fn run() {
        let options = match parse_args(std::env::args().skip(1)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{}", e);
                eprintln!("usage: tomb-tiles [settings.json] [--seed N] [--mistake]");
                std::process::exit(2);
            }
        };

        let settings = options
            .settings_path
            .as_deref()
            .map(|path| Settings::load_or_default(path))
            .unwrap_or_default();
        let seed = options.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        let mut canvas = RecordingCanvas::new(settings.screen_width, settings.screen_height);
        let mut player = if options.mistake {
            AutoPlayer::default().with_mistake()
        } else {
            AutoPlayer::default()
        };
        let mut game = GameLoop::new(
            settings.clone(),
            seed,
            Box::new(FrameClock::new(settings.fps)),
            Box::new(LogSink),
            Box::new(DemoMenu),
        );

        let mut in_chamber = false;
        let mut heading_logged = false;
        while game.frames() < MAX_FRAMES {
            let mut events = match game.current() {
                ScreenId::GamePlay => player.next_events(game.gameplay()),
                _ => Vec::new(),
            };
            // Leave once the chamber has been shown for a frame
            if in_chamber {
                events.push(InputEvent::KeyDown(Key::Quit));
            }

            canvas.clear();
            if game.tick(&events, &mut canvas) == LoopStatus::Finished {
                log::info!("Finished after {} frames", game.frames());
                return;
            }
            in_chamber = game.current() == ScreenId::SecretChamber;
            if in_chamber && !heading_logged {
                if let Some(heading) = canvas.texts().next() {
                    log::info!("Chamber: {}", heading);
                    heading_logged = true;
                }
            }
        }
        log::warn!("Stopped after {} frames without finishing", MAX_FRAMES);
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tomb Tiles (headless) starting...");
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is driven by the host page
}
