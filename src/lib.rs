//! Dino Run - A side-scrolling desert runner
//!
//! Core modules:
//! - `sim`: Simulation (player physics, obstacles, boss fight, ambient cycles)
//! - `session`: Game lifecycle around the simulation (menu, pause, restart)
//! - `render_snapshot`: Read-only per-frame view handed to the renderer
//! - `highscores`: Single-integer high score persistence
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod audio;
pub mod error;
pub mod highscores;
pub mod render_snapshot;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::StorageError;
pub use highscores::{FileScoreStore, MemoryScoreStore, ScoreStore};
pub use session::{Session, SessionPhase};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical resolution every gameplay distance is authored against
    pub const BASE_WIDTH: f32 = 1600.0;
    pub const BASE_HEIGHT: f32 = 900.0;

    /// Height of the ground strip at the bottom of the screen
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Simulation rates are authored per frame at this rate
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Longest real frame the session will simulate (stall guard)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Longest single sub-step handed to `tick`
    pub const MAX_STEP_DT: f32 = 1.0 / 60.0;

    /// Player sprite frames (base units)
    pub const RUN_FRAME_SIZE: (f32, f32) = (88.0, 94.0);
    pub const CROUCH_FRAME_SIZE: (f32, f32) = (118.0, 60.0);
    /// Player stands at 10% of the base width
    pub const PLAYER_X: f32 = BASE_WIDTH * 0.1;
    /// Run/crouch animation frame delay (seconds)
    pub const FRAME_DELAY: f32 = 0.15;

    /// Score ticks once per this many seconds
    pub const SCORE_INTERVAL: f64 = 0.1;

    /// Inset applied to obstacle collision rects on every side
    pub const COLLISION_OFFSET: f32 = 3.0;

    /// Meteor impact: collision strip at the base of the sprite
    pub const METEOR_COLLISION_INSET_X: f32 = 10.0;
    pub const METEOR_COLLISION_HEIGHT: f32 = 25.0;
    /// Impact animation plays during the first second on the ground
    pub const METEOR_IMPACT_ANIM_WINDOW: f32 = 1.0;
    pub const METEOR_IMPACT_FRAMES: u32 = 3;

    /// Night visibility cutout around the player
    pub const LIGHT_RADIUS: f32 = 400.0;
    pub const LIGHT_FADE_DISTANCE: f32 = 100.0;

    /// Clouds wrap once fully this far past the left edge
    pub const CLOUD_WRAP_MARGIN: f32 = 100.0;
    /// Vertical band clouds drift in (base units)
    pub const CLOUD_MIN_Y: f32 = 20.0;
    pub const CLOUD_MAX_Y: f32 = 120.0;
}
