//! Floating score text
//!
//! Timer-driven animation state for the "+150" popups: elastic pop-in,
//! upward drift, fever rainbow, fade-out. The renderer collaborator just
//! draws whatever `texts()` currently holds.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::sim::HitResult;
use crate::{hsv_to_rgb, ping_pong};

/// Pop-in animation length
const POP_SECS: f32 = 0.4;
/// Fraction of the pop where the overshoot peaks
const POP_PEAK_AT: f32 = 0.7;
/// Overshoot factor at the peak
const POP_OVERSHOOT: f32 = 1.2;
/// Total lifetime of one popup
const LIFETIME_SECS: f32 = 1.2;
/// Fade starts at this fraction of the lifetime
const FADE_START: f32 = 0.6;
/// Upward drift speed
const RISE_SPEED: f32 = 3.0;
/// Big fever numbers rise slower for weight
const FEVER_RISE_SPEED: f32 = 1.5;
/// Fever popups cluster around this point instead of the hit position
const FEVER_CLUSTER_CENTER: Vec2 = Vec2::new(0.0, 4.0);
const FEVER_CLUSTER_RADIUS: f32 = 2.5;
const FEVER_TILT_DEG: f32 = 25.0;
/// Fever gold before the rainbow mix
const FEVER_GOLD: [f32; 3] = [1.0, 0.8, 0.0];

/// Elastic pop curve: 0 at start, overshoots to 1.2 at 70%, settles at 1
fn pop_curve(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < POP_PEAK_AT {
        POP_OVERSHOOT * t / POP_PEAK_AT
    } else {
        POP_OVERSHOOT + (1.0 - POP_OVERSHOOT) * (t - POP_PEAK_AT) / (1.0 - POP_PEAK_AT)
    }
}

/// One live score popup
#[derive(Debug, Clone, Serialize)]
pub struct FloatingText {
    pub value: u32,
    pub pos: Vec2,
    /// Random tilt in degrees (fever popups only)
    pub tilt_deg: f32,
    pub fever: bool,
    target_scale: f32,
    age: f32,
}

impl FloatingText {
    /// Current scale: pop-in, then a gentle shake while in fever
    pub fn scale(&self) -> f32 {
        if self.age <= POP_SECS {
            self.target_scale * pop_curve(self.age / POP_SECS)
        } else if self.fever {
            self.target_scale + (self.age * 20.0).sin() * 0.1 * self.target_scale
        } else {
            self.target_scale
        }
    }

    /// Opacity, fading over the last stretch of the lifetime
    pub fn alpha(&self) -> f32 {
        let fade_from = LIFETIME_SECS * FADE_START;
        if self.age <= fade_from {
            1.0
        } else {
            (1.0 - (self.age - fade_from) / (LIFETIME_SECS - fade_from)).max(0.0)
        }
    }

    /// Text color: white normally, gold/rainbow mix in fever
    pub fn color(&self) -> [f32; 3] {
        if !self.fever {
            return [1.0, 1.0, 1.0];
        }
        let rainbow = hsv_to_rgb(ping_pong(self.age * 2.0, 1.0), 0.7, 1.0);
        [
            FEVER_GOLD[0] + (rainbow[0] - FEVER_GOLD[0]) * 0.5,
            FEVER_GOLD[1] + (rainbow[1] - FEVER_GOLD[1]) * 0.5,
            FEVER_GOLD[2] + (rainbow[2] - FEVER_GOLD[2]) * 0.5,
        ]
    }

    fn rise_speed(&self) -> f32 {
        if self.fever { FEVER_RISE_SPEED } else { RISE_SPEED }
    }
}

/// All live popups for the current session
pub struct FloatingScoreFeed {
    texts: Vec<FloatingText>,
    rng: Pcg32,
}

impl FloatingScoreFeed {
    pub fn new(seed: u64) -> Self {
        Self {
            texts: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Spawn a popup for a hit. Fever popups pile up near the cluster
    /// point with random offset and tilt; normal ones sit on the brick.
    pub fn spawn(&mut self, hit: &HitResult) {
        let (pos, tilt_deg) = if hit.fever {
            let theta = self.rng.random_range(0.0..std::f32::consts::TAU);
            let radius = FEVER_CLUSTER_RADIUS * self.rng.random_range(0.0f32..1.0).sqrt();
            (
                FEVER_CLUSTER_CENTER + Vec2::new(theta.cos(), theta.sin()) * radius,
                self.rng.random_range(-FEVER_TILT_DEG..FEVER_TILT_DEG),
            )
        } else {
            (hit.position, 0.0)
        };

        self.texts.push(FloatingText {
            value: hit.final_score,
            pos,
            tilt_deg,
            fever: hit.fever,
            target_scale: hit.text_scale,
            age: 0.0,
        });
    }

    /// Advance all popups and drop the expired ones
    pub fn tick(&mut self, dt: f32) {
        for text in &mut self.texts {
            text.age += dt;
            text.pos.y += text.rise_speed() * dt;
        }
        self.texts.retain(|t| t.age < LIFETIME_SECS);
    }

    pub fn texts(&self) -> &[FloatingText] {
        &self.texts
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}
