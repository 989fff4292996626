//! Session/level controller
//!
//! Owns the score/lives ledger, the brick field, the combo engine, and
//! every gameplay timer (countdown, safety net, boss cadence). The game
//! loop feeds it collision events and a fixed-step `tick`; it answers
//! with presentation cues. All collision events for a step must be
//! applied before that step's `tick`.

use glam::Vec2;
use serde::Serialize;

use super::boss::{BossAction, BossState};
use super::combo::{ComboConfig, ComboFeverEngine, ComboSnapshot, ConfigError};
use super::level::generate_level;
use super::state::{Brick, CollisionEvent, Cue, GamePhase, PowerUpKind};
use crate::consts::*;
use crate::settings::Settings;

/// Total pre-launch countdown time
const COUNTDOWN_TOTAL_SECS: f32 =
    COUNTDOWN_BEATS as f32 * COUNTDOWN_BEAT_SECS + COUNTDOWN_GO_SECS;

/// Banner shown for a given countdown time remaining: `Some(3..=1)` for
/// the numbered beats, `Some(0)` for the GO banner, `None` once expired.
fn countdown_banner(remaining: f32) -> Option<u8> {
    if remaining <= 0.0 {
        None
    } else if remaining <= COUNTDOWN_GO_SECS {
        Some(0)
    } else {
        Some(((remaining - COUNTDOWN_GO_SECS) / COUNTDOWN_BEAT_SECS).ceil() as u8)
    }
}

/// One level's worth of play: created at level start, discarded at level
/// end. Collaborators are injected at construction; there is no global
/// state anywhere.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    level: u32,
    seed: u64,
    phase: GamePhase,
    score: u64,
    lives: u8,
    balls_in_play: u32,
    /// Current ball speed for the physics collaborator
    ball_speed: f32,
    bricks: Vec<Brick>,
    boss: Option<BossState>,
    combo: ComboFeverEngine,
    /// Countdown time remaining before launch
    countdown: f32,
    banner: Option<u8>,
    /// Safety net time remaining (0 = down)
    safety_net: f32,
    haptics_enabled: bool,
    time_ticks: u64,
}

impl Session {
    pub fn new(
        level: u32,
        seed: u64,
        settings: &Settings,
        combo_config: ComboConfig,
    ) -> Result<Self, ConfigError> {
        let combo = ComboFeverEngine::new(combo_config)?;
        let layout = generate_level(level, seed);
        log::info!(
            "session start: level {level}, seed {seed}, {} bricks{}",
            layout.bricks.len(),
            if layout.boss.is_some() { ", boss" } else { "" }
        );
        Ok(Self {
            level,
            seed,
            phase: GamePhase::Countdown,
            score: 0,
            lives: START_LIVES,
            balls_in_play: 0,
            ball_speed: BALL_BASE_SPEED,
            bricks: layout.bricks,
            boss: layout.boss,
            combo,
            countdown: COUNTDOWN_TOTAL_SECS,
            banner: None,
            safety_net: 0.0,
            haptics_enabled: settings.vibration,
            time_ticks: 0,
        })
    }

    // === Accessors for HUD/physics collaborators ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn balls_in_play(&self) -> u32 {
        self.balls_in_play
    }

    pub fn ball_speed(&self) -> f32 {
        self.ball_speed
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn bricks_remaining(&self) -> usize {
        self.bricks.len()
    }

    pub fn boss(&self) -> Option<&BossState> {
        self.boss.as_ref()
    }

    pub fn combo(&self) -> ComboSnapshot {
        self.combo.snapshot()
    }

    pub fn safety_net_active(&self) -> bool {
        self.safety_net > 0.0
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::LevelComplete | GamePhase::GameOver)
    }

    /// Launch the held ball (tap input during Serve)
    pub fn launch(&mut self) -> Vec<Cue> {
        if self.phase != GamePhase::Serve {
            return Vec::new();
        }
        self.phase = GamePhase::Playing;
        self.balls_in_play = 1;
        vec![Cue::BallLaunched]
    }

    /// Toggle pause from Serve/Playing; countdown and end states ignore it
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Serve | GamePhase::Playing => self.phase = GamePhase::Paused,
            GamePhase::Paused => {
                self.phase = if self.balls_in_play == 0 {
                    GamePhase::Serve
                } else {
                    GamePhase::Playing
                };
            }
            _ => {}
        }
    }

    /// Advance the session by one fixed timestep
    pub fn tick(&mut self, dt: f32) -> Vec<Cue> {
        let mut cues = Vec::new();

        match self.phase {
            GamePhase::Paused | GamePhase::LevelComplete | GamePhase::GameOver => return cues,
            GamePhase::Countdown => {
                self.countdown -= dt;
                let banner = countdown_banner(self.countdown);
                if banner != self.banner {
                    match banner {
                        Some(0) => cues.push(Cue::CountdownGo),
                        Some(value) => cues.push(Cue::CountdownBeat { value }),
                        None => {}
                    }
                    self.banner = banner;
                }
                if self.countdown <= 0.0 {
                    self.phase = GamePhase::Playing;
                    self.balls_in_play = 1;
                    cues.push(Cue::BallLaunched);
                }
                return cues;
            }
            GamePhase::Serve | GamePhase::Playing => {}
        }

        self.time_ticks += 1;

        if self.safety_net > 0.0 {
            self.safety_net -= dt;
            if self.safety_net <= 0.0 {
                self.safety_net = 0.0;
                log::debug!("safety net lowered");
                cues.push(Cue::BarrierLowered);
            }
        }

        if self.phase == GamePhase::Playing {
            if let Some(boss) = &mut self.boss {
                if boss.tick(dt) == Some(BossAction::Fire) {
                    cues.push(Cue::BossFired);
                }
            }
        }

        let fever_before = self.combo.snapshot().fever;
        self.combo.tick(dt);
        if fever_before && !self.combo.snapshot().fever {
            cues.push(Cue::FeverEnded);
        }

        cues
    }

    /// Apply one collision outcome reported by the physics collaborator
    pub fn handle_collision(&mut self, event: CollisionEvent) -> Vec<Cue> {
        if self.phase != GamePhase::Playing {
            return Vec::new();
        }
        match event {
            CollisionEvent::Brick { id } => self.on_brick_destroyed(id),
            CollisionEvent::Boss { position } => self.on_boss_hit(position),
            CollisionEvent::Paddle => vec![Cue::PaddleBounce],
            CollisionEvent::Wall => vec![Cue::WallBounce],
            CollisionEvent::BallLost => self.on_ball_lost(),
        }
    }

    fn on_brick_destroyed(&mut self, id: u32) -> Vec<Cue> {
        let Some(index) = self.bricks.iter().position(|b| b.id == id) else {
            log::debug!("collision for unknown brick {id}");
            return Vec::new();
        };
        let brick = self.bricks.swap_remove(index);

        let mut cues = self.score_hit(brick.pos, SCORE_PER_BRICK, |hit| Cue::BrickDestroyed {
            hit,
        });

        if let Some(kind) = brick.power_up {
            self.apply_power_up(kind, brick.pos, &mut cues);
        }

        if self.bricks.is_empty() && self.boss.is_none() {
            self.complete_level(&mut cues);
        }
        cues
    }

    fn on_boss_hit(&mut self, position: Vec2) -> Vec<Cue> {
        let Some(boss) = &mut self.boss else {
            return Vec::new();
        };
        let defeated = boss.take_hit();
        let hp_left = boss.hp();

        let mut cues = self.score_hit(position, SCORE_PER_BOSS_HIT, |hit| Cue::BossHit {
            hit,
            hp_left,
        });

        if defeated {
            self.complete_level(&mut cues);
        }
        cues
    }

    /// Route a hit through the combo engine and the score ledger
    fn score_hit(
        &mut self,
        position: Vec2,
        base_score: u32,
        cue: impl FnOnce(super::combo::HitResult) -> Cue,
    ) -> Vec<Cue> {
        let fever_before = self.combo.snapshot().fever;
        let hit = self
            .combo
            .register_hit(position, base_score, self.haptics_enabled);
        self.score += hit.final_score as u64;

        let mut cues = Vec::new();
        if !fever_before && hit.fever {
            cues.push(Cue::FeverStarted);
        }
        cues.push(cue(hit));
        cues
    }

    fn apply_power_up(&mut self, kind: PowerUpKind, position: Vec2, cues: &mut Vec<Cue>) {
        cues.push(Cue::PowerUpCollected { kind, position });
        match kind {
            PowerUpKind::ExtraBall => {
                self.balls_in_play += 1;
                cues.push(Cue::ExtraBallSpawned { position });
            }
            PowerUpKind::SpeedUp => {
                self.ball_speed =
                    (self.ball_speed * SPEED_UP_FACTOR).clamp(BALL_MIN_SPEED, BALL_MAX_SPEED);
            }
            PowerUpKind::SlowDown => {
                self.ball_speed =
                    (self.ball_speed * SLOW_DOWN_FACTOR).clamp(BALL_MIN_SPEED, BALL_MAX_SPEED);
            }
            PowerUpKind::SafetyNet => {
                self.safety_net = SAFETY_NET_SECS;
                cues.push(Cue::BarrierRaised {
                    seconds: SAFETY_NET_SECS,
                });
            }
        }
    }

    fn on_ball_lost(&mut self) -> Vec<Cue> {
        if self.safety_net > 0.0 {
            return vec![Cue::BarrierSaved];
        }

        self.balls_in_play = self.balls_in_play.saturating_sub(1);
        if self.balls_in_play > 0 {
            log::debug!("ball lost, {} still in play", self.balls_in_play);
            return vec![Cue::BallLost {
                balls_left: self.balls_in_play,
            }];
        }

        self.lives = self.lives.saturating_sub(1);
        let mut cues = vec![Cue::LifeLost {
            lives_left: self.lives,
        }];
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("game over at level {} with score {}", self.level, self.score);
            cues.push(Cue::GameOver { score: self.score });
        } else {
            self.phase = GamePhase::Serve;
        }
        cues
    }

    fn complete_level(&mut self, cues: &mut Vec<Cue>) {
        self.phase = GamePhase::LevelComplete;
        log::info!("level {} completed with score {}", self.level, self.score);
        cues.push(Cue::LevelCompleted { score: self.score });
    }
}
