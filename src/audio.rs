//! Audio direction without a platform backend
//!
//! Mixes volumes and turns game cues into playback commands; the actual
//! sample playback belongs to the platform collaborator consuming the
//! commands. Also runs the fever background loop fade.

use crate::lerp_toward;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits wall
    WallHit,
    /// Brick destroyed (pitched up with the combo)
    BrickBreak,
    /// Power-up collected
    PowerUpCollect,
    /// Ball hits the boss
    BossHit,
    /// Countdown beat
    CountdownBeep,
    /// Countdown GO! banner
    CountdownGo,
    /// Ball lost to the death zone
    BallLost,
    /// Level cleared
    LevelClear,
    /// Run ended
    GameOver,
    /// Menu button press
    UiClick,
}

/// A one-shot playback request for the platform audio backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackCommand {
    pub effect: SoundEffect,
    pub volume: f32,
    pub pitch: f32,
}

/// Fever loop settles at this fraction of the effects volume
const FEVER_LOOP_TARGET: f32 = 0.5;
/// Fade rate for the fever loop, per second
const FEVER_FADE_RATE: f32 = 5.0;
/// Loop stops once faded below this gain
const FEVER_LOOP_CUTOFF: f32 = 0.01;

/// Audio mixer front-end for the game
pub struct AudioDirector {
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    fever_loop_gain: f32,
    fever_loop_playing: bool,
}

impl Default for AudioDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioDirector {
    pub fn new() -> Self {
        Self {
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            fever_loop_gain: 0.0,
            fever_loop_playing: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut director = Self::new();
        director.set_sfx_volume(settings.sfx_volume);
        director.set_music_volume(settings.music_volume);
        director
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective SFX volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    /// Music channel gain for the platform backend
    pub fn music_gain(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }

    /// Request a sound effect at neutral pitch
    pub fn play(&self, effect: SoundEffect) -> Option<PlaybackCommand> {
        self.play_pitched(effect, 1.0)
    }

    /// Request a pitched sound effect (combo hit sounds rise in pitch).
    /// Returns `None` when the mix is effectively silent.
    pub fn play_pitched(&self, effect: SoundEffect, pitch: f32) -> Option<PlaybackCommand> {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return None;
        }
        Some(PlaybackCommand {
            effect,
            volume,
            pitch,
        })
    }

    /// Advance the fever background loop: fade in toward half the
    /// effects volume while fever is active, fade out and stop otherwise.
    pub fn tick(&mut self, dt: f32, fever_active: bool) {
        if fever_active {
            if !self.fever_loop_playing {
                self.fever_loop_playing = true;
                self.fever_loop_gain = 0.0;
                log::debug!("fever loop started");
            }
            let target = FEVER_LOOP_TARGET * self.effective_volume();
            self.fever_loop_gain = lerp_toward(self.fever_loop_gain, target, FEVER_FADE_RATE, dt);
        } else if self.fever_loop_playing {
            self.fever_loop_gain = lerp_toward(self.fever_loop_gain, 0.0, FEVER_FADE_RATE, dt);
            if self.fever_loop_gain < FEVER_LOOP_CUTOFF {
                self.fever_loop_gain = 0.0;
                self.fever_loop_playing = false;
                log::debug!("fever loop stopped");
            }
        }
    }

    /// Current fever loop gain, `None` while the loop is stopped
    pub fn fever_loop(&self) -> Option<f32> {
        self.fever_loop_playing.then_some(self.fever_loop_gain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_play_carries_mix_volume_and_pitch() {
        let mut director = AudioDirector::new();
        director.set_sfx_volume(0.8);
        let command = director.play_pitched(SoundEffect::BrickBreak, 1.4).unwrap();
        assert_eq!(command.effect, SoundEffect::BrickBreak);
        assert_eq!(command.volume, 0.8);
        assert_eq!(command.pitch, 1.4);
    }

    #[test]
    fn test_silent_mix_plays_nothing() {
        let mut director = AudioDirector::new();
        director.set_sfx_volume(0.0);
        assert_eq!(director.play(SoundEffect::PaddleHit), None);

        director.set_sfx_volume(1.0);
        director.set_muted(true);
        assert_eq!(director.play(SoundEffect::PaddleHit), None);
        assert_eq!(director.music_gain(), 0.0);
    }

    #[test]
    fn test_volume_setters_clamp() {
        let mut director = AudioDirector::new();
        director.set_sfx_volume(2.0);
        assert_eq!(director.play(SoundEffect::UiClick).unwrap().volume, 1.0);
    }

    #[test]
    fn test_fever_loop_fades_in_toward_half_sfx() {
        let mut director = AudioDirector::new();
        assert_eq!(director.fever_loop(), None);

        for _ in 0..(2.0 / SIM_DT) as u32 {
            director.tick(SIM_DT, true);
        }
        let gain = director.fever_loop().unwrap();
        assert!(gain > 0.45 && gain <= 0.5);
    }

    #[test]
    fn test_fever_loop_respects_volume_slider() {
        let mut director = AudioDirector::new();
        director.set_sfx_volume(0.4);
        for _ in 0..(2.0 / SIM_DT) as u32 {
            director.tick(SIM_DT, true);
        }
        let gain = director.fever_loop().unwrap();
        assert!(gain <= 0.2);
    }

    #[test]
    fn test_fever_loop_fades_out_and_stops() {
        let mut director = AudioDirector::new();
        for _ in 0..(2.0 / SIM_DT) as u32 {
            director.tick(SIM_DT, true);
        }
        assert!(director.fever_loop().is_some());

        for _ in 0..(2.0 / SIM_DT) as u32 {
            director.tick(SIM_DT, false);
        }
        assert_eq!(director.fever_loop(), None);

        // Staying out of fever keeps it stopped
        director.tick(SIM_DT, false);
        assert_eq!(director.fever_loop(), None);
    }

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.set_sfx_volume(0.3);
        settings.set_music_volume(0.9);
        let director = AudioDirector::from_settings(&settings);
        assert_eq!(director.play(SoundEffect::UiClick).unwrap().volume, 0.3);
        assert_eq!(director.music_gain(), 0.9);
    }
}
