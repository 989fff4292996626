//! Boss encounter state
//!
//! Attack cadence, hit flash, and the smoothed health-bar value are all
//! explicit timer fields advanced by `tick` - the lateral sine movement
//! and projectile flight belong to the physics collaborator.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::lerp_toward;

/// Actions the boss requests from the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossAction {
    /// Spawn a projectile toward the paddle
    Fire,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossState {
    hp: u32,
    max_hp: u32,
    /// Seconds until the next projectile
    fire_timer: f32,
    /// Red-flash feedback time remaining after a hit
    flash_timer: f32,
    /// Health-bar value chasing `hp` for the juice effect
    displayed_hp: f32,
}

impl BossState {
    pub fn new(max_hp: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            fire_timer: BOSS_FIRST_SHOT_SECS,
            flash_timer: 0.0,
            displayed_hp: max_hp as f32,
        }
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// True while the hit flash should tint the boss red
    pub fn is_flashing(&self) -> bool {
        self.flash_timer > 0.0
    }

    /// Smoothed health fraction in [0, 1] for the health bar
    pub fn displayed_health_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.displayed_hp / self.max_hp as f32
        }
    }

    /// Take one hit. Returns true when this hit defeated the boss.
    pub fn take_hit(&mut self) -> bool {
        if self.hp == 0 {
            return false;
        }
        self.hp -= 1;
        self.flash_timer = BOSS_FLASH_SECS;
        self.hp == 0
    }

    /// Advance timers; fires at 1s after spawn and every 2s after.
    pub fn tick(&mut self, dt: f32) -> Option<BossAction> {
        if self.flash_timer > 0.0 {
            self.flash_timer = (self.flash_timer - dt).max(0.0);
        }
        self.displayed_hp = lerp_toward(
            self.displayed_hp,
            self.hp as f32,
            BOSS_HEALTH_BAR_SMOOTHING,
            dt,
        );

        if self.hp == 0 {
            return None;
        }
        self.fire_timer -= dt;
        if self.fire_timer <= 0.0 {
            self.fire_timer += BOSS_ATTACK_RATE_SECS;
            return Some(BossAction::Fire);
        }
        None
    }
}
