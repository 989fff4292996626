//! Fever Break - Breakout-style game core
//!
//! Core modules:
//! - `sim`: Deterministic game logic (combo/fever scoring, session control, levels)
//! - `settings`: User preferences
//! - `audio`: Platform-free audio mixing and playback commands
//! - `floating_text`: Floating score text animation state
//! - `ranking`: Per-level leaderboards

pub mod audio;
pub mod floating_text;
pub mod ranking;
pub mod settings;
pub mod sim;

pub use ranking::RankingBook;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Score and lives
    pub const SCORE_PER_BRICK: u32 = 100;
    pub const SCORE_PER_BOSS_HIT: u32 = 500;
    pub const START_LIVES: u8 = 3;

    /// Ball speed envelope - the physics collaborator reads the current
    /// speed from the session; power-ups adjust it within these bounds
    pub const BALL_BASE_SPEED: f32 = 15.0;
    pub const BALL_MIN_SPEED: f32 = 10.0;
    pub const BALL_MAX_SPEED: f32 = 35.0;
    pub const SPEED_UP_FACTOR: f32 = 1.3;
    pub const SLOW_DOWN_FACTOR: f32 = 0.8;

    /// Safety net stays up this long after the power-up
    pub const SAFETY_NET_SECS: f32 = 10.0;

    /// Pre-launch countdown: three 1-second beats, then a short GO banner
    pub const COUNTDOWN_BEATS: u8 = 3;
    pub const COUNTDOWN_BEAT_SECS: f32 = 1.0;
    pub const COUNTDOWN_GO_SECS: f32 = 0.5;

    /// Level layout
    pub const LEVEL_COLUMNS: u32 = 6;
    pub const LEVEL_BASE_ROWS: u32 = 2;
    pub const LEVEL_MAX_ROWS: u32 = 15;
    pub const BRICK_WIDTH: f32 = 1.5;
    pub const BRICK_DEPTH: f32 = 0.5;
    pub const BRICK_PADDING_X: f32 = 0.2;
    pub const BRICK_PADDING_Z: f32 = 0.2;
    pub const LEVEL_START_Z: f32 = 8.0;
    pub const POWER_UP_CHANCE: f64 = 0.2;

    /// Boss levels
    pub const BOSS_LEVEL_INTERVAL: u32 = 5;
    pub const BOSS_MAX_HEALTH: u32 = 20;
    pub const BOSS_FIRST_SHOT_SECS: f32 = 1.0;
    pub const BOSS_ATTACK_RATE_SECS: f32 = 2.0;
    pub const BOSS_FLASH_SECS: f32 = 0.1;
    pub const BOSS_HEALTH_BAR_SMOOTHING: f32 = 5.0;
}

/// Convert HSV (all components in [0, 1]) to linear RGB
#[inline]
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0) * 6.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i as u32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Bounce `t` back and forth in [0, len]
#[inline]
pub fn ping_pong(t: f32, len: f32) -> f32 {
    if len <= 0.0 {
        return 0.0;
    }
    let t = t.rem_euclid(len * 2.0);
    len - (t - len).abs()
}

/// Frame-rate-dependent exponential approach, `rate` per second
#[inline]
pub fn lerp_toward(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (rate * dt).clamp(0.0, 1.0)
}
