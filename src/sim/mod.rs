//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The owning game loop applies all collision events for a step before
//! calling `tick` for that step, so a hit landing in the same step as an
//! expiring combo timer refreshes the combo rather than losing it.

pub mod boss;
pub mod combo;
pub mod level;
pub mod session;
pub mod state;

pub use boss::{BossAction, BossState};
pub use combo::{ComboConfig, ComboFeverEngine, ComboSnapshot, ConfigError, HitResult};
pub use level::{LevelLayout, generate_level};
pub use session::Session;
pub use state::{Brick, CollisionEvent, Cue, GamePhase, PowerUpKind};
