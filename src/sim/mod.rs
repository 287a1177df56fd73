//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (pool slot order)
//! - No rendering, audio or platform dependencies

pub mod ambient;
pub mod boss;
pub mod collision;
pub mod obstacles;
pub mod player;
pub mod pool;
pub mod rect;
pub mod state;
pub mod tick;
pub mod viewport;

pub use collision::{MeteorContact, meteor_contact};
pub use pool::{Pool, Poolable};
pub use rect::Rect;
pub use state::{
    BossFight, Cloud, DayNight, GameEvent, GameMode, GameState, Meteor, MeteorState, Obstacle,
    ObstacleKind, Outcome, Player, ScreenShake,
};
pub use tick::{TickInput, autopilot_input, tick};
pub use viewport::Viewport;
