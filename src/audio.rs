//! Sound effect cues
//!
//! The core only decides *which* sound plays and when. Cues are queued on the
//! `AudioManager` during the frame and flushed by the game loop into a
//! `SoundSink` supplied by the platform.

use crate::consts::TILE_PULSE_VARIANTS;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Tile pulse or commit; variants alternate round-robin
    TilePulse(u8),
    /// Selector moved onto a tile
    TileSelector,
    /// Board zooms out after the winning round
    Rumble,
    /// Secret chamber opens
    ChamberChant,
}

impl SoundEffect {
    /// Asset file name, resolved to a path by the asset collaborator
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::TilePulse(v) if v % TILE_PULSE_VARIANTS == 0 => "tile_pulse_1.ogg",
            SoundEffect::TilePulse(_) => "tile_pulse_2.ogg",
            SoundEffect::TileSelector => "tile_selector.ogg",
            SoundEffect::Rumble => "rumble3.ogg",
            SoundEffect::ChamberChant => "deep_voice_chant2.ogg",
        }
    }
}

/// Platform audio output
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that drops every cue
#[derive(Debug, Default)]
pub struct SilentSink;

impl SoundSink for SilentSink {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    pending: Vec<(SoundEffect, f32)>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            pending: Vec::new(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Queue a sound effect for this frame
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("Sound {:?} at {:.2}", effect, vol);
        self.pending.push((effect, vol));
    }

    /// Cues queued since the last flush
    pub fn pending(&self) -> &[(SoundEffect, f32)] {
        &self.pending
    }

    /// Send queued cues to the platform sink
    pub fn flush(&mut self, sink: &mut dyn SoundSink) {
        for (effect, vol) in self.pending.drain(..) {
            sink.play(effect, vol);
        }
    }
}
