//! Procedural level layout
//!
//! Deterministic brick grid generation: same level + seed, same layout.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::boss::BossState;
use super::state::{Brick, PowerUpKind};
use crate::consts::*;

/// A generated level: a brick grid, or a boss on boss levels
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub bricks: Vec<Brick>,
    pub boss: Option<BossState>,
}

impl LevelLayout {
    pub fn is_boss_level(&self) -> bool {
        self.boss.is_some()
    }
}

/// Number of brick rows for a level (difficulty ramp, capped)
pub fn rows_for_level(level: u32) -> u32 {
    (LEVEL_BASE_ROWS + level).min(LEVEL_MAX_ROWS)
}

/// Generate the layout for a level. Every `BOSS_LEVEL_INTERVAL`th level
/// is a boss arena with no bricks.
pub fn generate_level(level: u32, seed: u64) -> LevelLayout {
    if level > 0 && level % BOSS_LEVEL_INTERVAL == 0 {
        log::info!("level {level}: boss arena");
        return LevelLayout {
            bricks: Vec::new(),
            boss: Some(BossState::new(BOSS_MAX_HEALTH)),
        };
    }

    let mut rng = Pcg32::seed_from_u64(seed ^ ((level as u64) << 32));

    let rows = rows_for_level(level);
    let total_width = LEVEL_COLUMNS as f32 * (BRICK_WIDTH + BRICK_PADDING_X);
    let start_x = -(total_width / 2.0) + BRICK_WIDTH / 2.0 + BRICK_PADDING_X / 2.0;

    let mut bricks = Vec::with_capacity((rows * LEVEL_COLUMNS) as usize);
    let mut next_id = 1;

    for row in 0..rows {
        for col in 0..LEVEL_COLUMNS {
            let x = start_x + col as f32 * (BRICK_WIDTH + BRICK_PADDING_X);
            let z = LEVEL_START_Z - row as f32 * (BRICK_DEPTH + BRICK_PADDING_Z);

            let power_up = if rng.random_bool(POWER_UP_CHANCE) {
                Some(match rng.random_range(0..4) {
                    0 => PowerUpKind::ExtraBall,
                    1 => PowerUpKind::SpeedUp,
                    2 => PowerUpKind::SlowDown,
                    _ => PowerUpKind::SafetyNet,
                })
            } else {
                None
            };

            bricks.push(Brick {
                id: next_id,
                pos: Vec2::new(x, z),
                row,
                col,
                hue: row as f32 / rows as f32,
                power_up,
            });
            next_id += 1;
        }
    }

    log::info!("level {level}: {rows} rows, {} bricks", bricks.len());
    LevelLayout { bricks, boss: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_layout() {
        let a = generate_level(3, 12345);
        let b = generate_level(3, 12345);
        assert_eq!(a.bricks, b.bricks);
    }

    #[test]
    fn test_different_seed_different_power_ups() {
        let a = generate_level(8, 1);
        let b = generate_level(8, 2);
        let ups = |layout: &LevelLayout| {
            layout
                .bricks
                .iter()
                .map(|brick| brick.power_up)
                .collect::<Vec<_>>()
        };
        assert_ne!(ups(&a), ups(&b));
    }

    #[test]
    fn test_row_count_ramps_and_caps() {
        assert_eq!(rows_for_level(1), 3);
        assert_eq!(rows_for_level(11), 13);
        assert_eq!(rows_for_level(13), 15);
        assert_eq!(rows_for_level(100), 15);

        let layout = generate_level(1, 7);
        assert_eq!(layout.bricks.len(), (3 * LEVEL_COLUMNS) as usize);
    }

    #[test]
    fn test_grid_centered_on_x() {
        let layout = generate_level(2, 99);
        let sum_x: f32 = layout.bricks.iter().map(|b| b.pos.x).sum();
        assert!(sum_x.abs() < 0.001 * layout.bricks.len() as f32);
    }

    #[test]
    fn test_rows_recede_from_start_z() {
        let layout = generate_level(2, 99);
        for brick in &layout.bricks {
            assert!(brick.pos.y <= LEVEL_START_Z);
            if brick.row > 0 {
                assert!(brick.pos.y < LEVEL_START_Z);
            }
        }
    }

    #[test]
    fn test_hue_increases_with_row() {
        let layout = generate_level(4, 5);
        let first = layout.bricks.iter().find(|b| b.row == 0).unwrap();
        let last = layout.bricks.iter().max_by_key(|b| b.row).unwrap();
        assert!(first.hue < last.hue);
        assert!(last.hue < 1.0);
    }

    #[test]
    fn test_power_up_chance_is_roughly_honored() {
        // 15 rows x 6 cols = 90 bricks; at 20% a run of zero or all
        // power-ups would mean the chance is not being applied.
        let layout = generate_level(13, 42);
        let count = layout.bricks.iter().filter(|b| b.power_up.is_some()).count();
        assert!(count > 0);
        assert!(count < layout.bricks.len() / 2);
    }

    #[test]
    fn test_boss_levels() {
        assert!(!generate_level(4, 1).is_boss_level());
        let boss_level = generate_level(5, 1);
        assert!(boss_level.is_boss_level());
        assert!(boss_level.bricks.is_empty());
        assert!(generate_level(10, 1).is_boss_level());
    }

    #[test]
    fn test_brick_ids_unique() {
        let layout = generate_level(6, 3);
        let mut ids: Vec<u32> = layout.bricks.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), layout.bricks.len());
    }
}
