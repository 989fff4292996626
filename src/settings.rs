//! Game settings and preferences
//!
//! Owned by the options screen; the session and audio director consult
//! these values, they never mutate them.

use serde::{Deserialize, Serialize};

/// User preferences. `vibration` is the haptics flag the combo engine
/// consults when deciding whether a hit produces a pulse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Tilt-to-move paddle control
    pub gyroscope: bool,
    /// Haptic feedback on hits
    pub vibration: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx_volume: 1.0,
            music_volume: 0.5,
            gyroscope: true,
            vibration: true,
        }
    }
}

impl Settings {
    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    /// Restore the defaults (options screen reset button)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.sfx_volume, 1.0);
        assert_eq!(settings.music_volume, 0.5);
        assert!(settings.gyroscope);
        assert!(settings.vibration);
    }

    #[test]
    fn test_volume_setters_clamp() {
        let mut settings = Settings::default();
        settings.set_sfx_volume(1.7);
        assert_eq!(settings.sfx_volume, 1.0);
        settings.set_music_volume(-0.3);
        assert_eq!(settings.music_volume, 0.0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut settings = Settings::default();
        settings.set_sfx_volume(0.2);
        settings.vibration = false;
        settings.reset();
        assert_eq!(settings, Settings::default());
    }
}
