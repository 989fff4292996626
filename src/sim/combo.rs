//! Combo/fever scoring engine
//!
//! Tracks consecutive hits, a decaying reset timer, and fever mode. Each
//! registered hit yields the presentation parameters (score, text scale,
//! pitch, vibration) that the floating-text, audio, and haptics
//! collaborators consume. The engine never performs side effects itself.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Combo engine tuning. Defaults match the shipped game feel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComboConfig {
    /// Hits required to enter fever mode
    pub fever_threshold: u32,
    /// Time allowed between hits before the combo lapses (seconds)
    pub reset_window: f32,
    /// Score multiplier applied per hit while fever is active
    pub fever_score_multiplier: f32,
    /// Floating text grows by this much per combo step
    pub scale_per_hit: f32,
    /// Extra flat text scale factor while fever is active
    pub fever_scale_boost: f32,
    /// Hit sound pitch rises by this much per combo step
    pub pitch_step: f32,
    /// Hit sound pitch ceiling
    pub max_pitch: f32,
    /// Haptic pulse length at combo 0 (milliseconds)
    pub base_vibration_ms: u32,
    /// Extra pulse length per combo step (milliseconds)
    pub vibration_step_ms: u32,
    /// Haptic pulse ceiling (milliseconds)
    pub max_vibration_ms: u32,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            fever_threshold: 5,
            reset_window: 1.5,
            fever_score_multiplier: 1.5,
            scale_per_hit: 0.5,
            fever_scale_boost: 3.0,
            pitch_step: 0.1,
            max_pitch: 2.5,
            base_vibration_ms: 20,
            vibration_step_ms: 10,
            max_vibration_ms: 80,
        }
    }
}

/// Rejected combo configurations. An engine with an invalid config
/// cannot be constructed.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("fever threshold must be at least 1")]
    ZeroFeverThreshold,
    #[error("combo reset window must be a positive number of seconds, got {0}")]
    BadResetWindow(f32),
    #[error("fever score multiplier must be at least 1, got {0}")]
    BadScoreMultiplier(f32),
    #[error("max pitch must be at least 1, got {0}")]
    BadMaxPitch(f32),
    #[error("{0} must not be negative")]
    NegativeStep(&'static str),
}

impl ComboConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.fever_threshold == 0 {
            return Err(ConfigError::ZeroFeverThreshold);
        }
        if !self.reset_window.is_finite() || self.reset_window <= 0.0 {
            return Err(ConfigError::BadResetWindow(self.reset_window));
        }
        if !self.fever_score_multiplier.is_finite() || self.fever_score_multiplier < 1.0 {
            return Err(ConfigError::BadScoreMultiplier(self.fever_score_multiplier));
        }
        if !self.max_pitch.is_finite() || self.max_pitch < 1.0 {
            return Err(ConfigError::BadMaxPitch(self.max_pitch));
        }
        if self.scale_per_hit < 0.0 {
            return Err(ConfigError::NegativeStep("scale_per_hit"));
        }
        if self.pitch_step < 0.0 {
            return Err(ConfigError::NegativeStep("pitch_step"));
        }
        Ok(())
    }
}

/// Everything a single hit produces for the presentation collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HitResult {
    /// World position of the hit (opaque pass-through for the text spawner)
    pub position: Vec2,
    pub base_score: u32,
    /// Base score with the fever multiplier applied when fever is active
    pub final_score: u32,
    /// Combo count after this hit
    pub combo: u32,
    pub fever: bool,
    /// Floating text scale (unclamped, grows with the combo)
    pub text_scale: f32,
    /// Hit sound pitch, clamped to the configured ceiling
    pub audio_pitch: f32,
    /// Haptic pulse length; `None` when the player disabled vibration
    pub vibration_ms: Option<u32>,
}

/// Read-only combo state for HUD/telemetry collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComboSnapshot {
    pub combo: u32,
    /// Seconds left before the combo lapses (0 when no combo is running)
    pub timer: f32,
    pub fever: bool,
}

/// The combo/fever state machine. One instance per active session,
/// driven by the owning game loop: `register_hit` for each collision
/// resolved this step, then `tick` once with the step's delta time.
#[derive(Debug, Clone, Serialize)]
pub struct ComboFeverEngine {
    config: ComboConfig,
    combo: u32,
    timer: f32,
    fever: bool,
}

impl ComboFeverEngine {
    pub fn new(config: ComboConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            combo: 0,
            timer: 0.0,
            fever: false,
        })
    }

    pub fn config(&self) -> &ComboConfig {
        &self.config
    }

    /// Register one successful hit. Refreshes the reset timer and enters
    /// fever at the threshold (staying there until the combo lapses).
    pub fn register_hit(
        &mut self,
        position: Vec2,
        base_score: u32,
        haptics_enabled: bool,
    ) -> HitResult {
        self.combo += 1;
        self.timer = self.config.reset_window;

        if self.combo >= self.config.fever_threshold && !self.fever {
            self.fever = true;
            log::debug!("fever mode entered at combo {}", self.combo);
        }

        let final_score = if self.fever {
            (base_score as f32 * self.config.fever_score_multiplier).round() as u32
        } else {
            base_score
        };

        let mut text_scale = 1.0 + self.combo as f32 * self.config.scale_per_hit;
        if self.fever {
            text_scale *= self.config.fever_scale_boost;
        }

        let audio_pitch =
            (1.0 + self.combo as f32 * self.config.pitch_step).min(self.config.max_pitch);

        let vibration_ms = haptics_enabled.then(|| {
            (self.config.base_vibration_ms + self.combo * self.config.vibration_step_ms)
                .min(self.config.max_vibration_ms)
        });

        HitResult {
            position,
            base_score,
            final_score,
            combo: self.combo,
            fever: self.fever,
            text_scale,
            audio_pitch,
            vibration_ms,
        }
    }

    /// Advance the reset timer. When it crosses zero the whole combo
    /// (count and fever) resets in one step; further ticks are no-ops
    /// until the next hit.
    pub fn tick(&mut self, dt: f32) {
        if self.combo == 0 {
            return;
        }
        self.timer -= dt;
        if self.timer <= 0.0 {
            log::debug!("combo lapsed at {}", self.combo);
            self.combo = 0;
            self.timer = 0.0;
            self.fever = false;
        }
    }

    /// Score multiplier as a pure function of the fever state
    pub fn score_multiplier(&self) -> f32 {
        if self.fever {
            self.config.fever_score_multiplier
        } else {
            1.0
        }
    }

    pub fn snapshot(&self) -> ComboSnapshot {
        ComboSnapshot {
            combo: self.combo,
            timer: self.timer,
            fever: self.fever,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine() -> ComboFeverEngine {
        ComboFeverEngine::new(ComboConfig::default()).unwrap()
    }

    fn hit(engine: &mut ComboFeverEngine) -> HitResult {
        engine.register_hit(Vec2::ZERO, 100, true)
    }

    #[test]
    fn test_combo_counts_consecutive_hits() {
        let mut e = engine();
        for expected in 1..=4 {
            let result = hit(&mut e);
            assert_eq!(result.combo, expected);
            assert!(!result.fever);
        }
    }

    #[test]
    fn test_fever_entered_at_threshold_and_latched() {
        let mut e = engine();
        for _ in 0..4 {
            assert!(!hit(&mut e).fever);
        }
        let fifth = hit(&mut e);
        assert!(fifth.fever);
        assert_eq!(fifth.combo, 5);

        // Stays in fever as the combo keeps rising
        for _ in 0..10 {
            assert!(hit(&mut e).fever);
        }
        assert!(e.snapshot().fever);
    }

    #[test]
    fn test_timeout_resets_combo_and_fever_once() {
        let mut e = engine();
        for _ in 0..5 {
            hit(&mut e);
        }
        assert!(e.snapshot().fever);
        assert_eq!(e.snapshot().combo, 5);

        // One big tick past the window resets everything in one step
        e.tick(2.0);
        let snap = e.snapshot();
        assert_eq!(snap.combo, 0);
        assert!(!snap.fever);
        assert_eq!(snap.timer, 0.0);

        // Further ticks are no-ops
        e.tick(10.0);
        assert_eq!(e.snapshot().combo, 0);
        assert_eq!(e.snapshot().timer, 0.0);
    }

    #[test]
    fn test_hits_within_window_keep_combo_alive() {
        let mut e = engine();
        for expected in 1..=5u32 {
            let result = hit(&mut e);
            assert_eq!(result.combo, expected);
            e.tick(0.1);
        }
        let snap = e.snapshot();
        assert_eq!(snap.combo, 5);
        assert!(snap.fever);

        e.tick(2.0);
        assert_eq!(e.snapshot().combo, 0);
        assert!(!e.snapshot().fever);
    }

    #[test]
    fn test_fever_score_multiplier() {
        let mut e = engine();
        let normal = hit(&mut e);
        assert_eq!(normal.final_score, 100);
        assert_eq!(e.score_multiplier(), 1.0);

        for _ in 0..4 {
            hit(&mut e);
        }
        assert_eq!(e.score_multiplier(), 1.5);
        let fevered = hit(&mut e);
        assert!(fevered.fever);
        assert_eq!(fevered.final_score, 150);
    }

    #[test]
    fn test_vibration_clamped() {
        // base=20, step=10, max=80: combo 10 would be 120, clamps to 80
        let mut e = engine();
        let mut last = hit(&mut e);
        for _ in 0..9 {
            last = hit(&mut e);
        }
        assert_eq!(last.combo, 10);
        assert_eq!(last.vibration_ms, Some(80));
    }

    #[test]
    fn test_vibration_suppressed_when_haptics_disabled() {
        let mut e = engine();
        let result = e.register_hit(Vec2::new(1.0, 2.0), 100, false);
        assert_eq!(result.vibration_ms, None);
        assert_eq!(result.position, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_text_scale_grows_and_boosts_in_fever() {
        let mut e = engine();
        let first = hit(&mut e);
        assert_eq!(first.text_scale, 1.5);
        let second = hit(&mut e);
        assert_eq!(second.text_scale, 2.0);

        for _ in 0..2 {
            hit(&mut e);
        }
        let fifth = hit(&mut e);
        // (1 + 5 * 0.5) * 3
        assert_eq!(fifth.text_scale, 10.5);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut cfg = ComboConfig::default();
        cfg.fever_threshold = 0;
        assert_eq!(
            ComboFeverEngine::new(cfg).unwrap_err(),
            ConfigError::ZeroFeverThreshold
        );

        let mut cfg = ComboConfig::default();
        cfg.reset_window = 0.0;
        assert!(matches!(
            ComboFeverEngine::new(cfg).unwrap_err(),
            ConfigError::BadResetWindow(_)
        ));

        let mut cfg = ComboConfig::default();
        cfg.reset_window = f32::NAN;
        assert!(matches!(
            ComboFeverEngine::new(cfg).unwrap_err(),
            ConfigError::BadResetWindow(_)
        ));

        let mut cfg = ComboConfig::default();
        cfg.fever_score_multiplier = 0.5;
        assert!(matches!(
            ComboFeverEngine::new(cfg).unwrap_err(),
            ConfigError::BadScoreMultiplier(_)
        ));

        let mut cfg = ComboConfig::default();
        cfg.pitch_step = -0.1;
        assert!(matches!(
            ComboFeverEngine::new(cfg).unwrap_err(),
            ConfigError::NegativeStep("pitch_step")
        ));
    }

    proptest! {
        #[test]
        fn prop_combo_equals_hit_count_without_timeouts(hits in 1u32..200) {
            let mut e = engine();
            let mut last = 0;
            for _ in 0..hits {
                last = hit(&mut e).combo;
                // Small ticks well inside the reset window
                e.tick(0.01);
            }
            prop_assert_eq!(last, hits);
        }

        #[test]
        fn prop_pitch_and_vibration_never_exceed_maxima(hits in 1u32..500) {
            let mut e = engine();
            for _ in 0..hits {
                let result = hit(&mut e);
                prop_assert!(result.audio_pitch <= e.config().max_pitch);
                prop_assert!(result.vibration_ms.unwrap() <= e.config().max_vibration_ms);
            }
        }

        #[test]
        fn prop_zero_combo_implies_no_fever(
            ops in prop::collection::vec(prop_oneof![Just(0.0f32), 0.0f32..3.0], 1..100)
        ) {
            // Interleave hits (0.0 marker) and arbitrary ticks; the
            // invariant combo == 0 => !fever must hold at every step.
            let mut e = engine();
            for op in ops {
                if op == 0.0 {
                    hit(&mut e);
                } else {
                    e.tick(op);
                }
                let snap = e.snapshot();
                prop_assert!(snap.combo > 0 || !snap.fever);
            }
        }
    }
}
