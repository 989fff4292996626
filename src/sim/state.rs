//! Session state and event types
//!
//! Data shared between the session controller and its collaborators. The
//! physics/input side reports `CollisionEvent`s; the session answers with
//! `Cue`s for the presentation side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::combo::HitResult;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-launch countdown is running, controls locked
    Countdown,
    /// Ball attached to paddle, waiting for launch input
    Serve,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// All bricks (or the boss) cleared
    LevelComplete,
    /// Out of lives
    GameOver,
}

/// Power-ups a brick can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    ExtraBall,
    SpeedUp,
    SlowDown,
    SafetyNet,
}

/// A brick entity. Position is the center of the brick in the play
/// plane (x across, y away from the paddle).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub pos: Vec2,
    pub row: u32,
    pub col: u32,
    /// Row-derived rainbow hue in [0, 1] for the renderer
    pub hue: f32,
    pub power_up: Option<PowerUpKind>,
}

/// Collision outcomes reported by the physics collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    /// A ball destroyed the brick with this id
    Brick { id: u32 },
    /// A ball struck the boss at this position
    Boss { position: Vec2 },
    /// A ball bounced off the paddle
    Paddle,
    /// A ball bounced off a wall
    Wall,
    /// A ball crossed the bottom death zone
    BallLost,
}

/// Presentation cues emitted by the session for its collaborators
/// (floating text spawner, audio player, haptic trigger, HUD).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Cue {
    BrickDestroyed { hit: HitResult },
    PowerUpCollected { kind: PowerUpKind, position: Vec2 },
    ExtraBallSpawned { position: Vec2 },
    PaddleBounce,
    WallBounce,
    BarrierRaised { seconds: f32 },
    BarrierLowered,
    /// The safety net absorbed a would-be ball loss
    BarrierSaved,
    BossHit { hit: HitResult, hp_left: u32 },
    BossFired,
    CountdownBeat { value: u8 },
    CountdownGo,
    BallLaunched,
    BallLost { balls_left: u32 },
    LifeLost { lives_left: u8 },
    FeverStarted,
    FeverEnded,
    LevelCompleted { score: u64 },
    GameOver { score: u64 },
}
