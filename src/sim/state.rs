//! Game state and core simulation types
//!
//! Everything one run needs lives here. Entity pools are built once with
//! the tuning capacities and recycled in place by [`GameState::reset`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::{Pool, Poolable};
use super::rect::Rect;
use super::viewport::Viewport;
use crate::assets::AssetHandles;
use crate::consts::*;
use crate::tuning::Tuning;

/// Which game the player picked from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Endless run, no boss
    #[default]
    Normal,
    /// Run that ends in the meteor boss fight
    Story,
}

/// How the current run stands.
///
/// A won run is always over, so the terminal flags are derived from this
/// single value rather than stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Running,
    /// Player hit a hazard
    Lost,
    /// Boss defeated
    Won,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::Running
    }

    pub fn is_won(self) -> bool {
        self == Outcome::Won
    }
}

/// Side effects produced during a tick, drained by the host each step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    MeteorImpact,
    BossAppeared,
    GameOver,
    Won,
}

/// Edge detection for the jump key (was it down last tick?)
#[derive(Debug, Clone, Copy, Default)]
pub struct InputEdges {
    jump_was_down: bool,
}

/// Transitions of a held key between two samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyEdge {
    pub pressed: bool,
    pub released: bool,
}

impl InputEdges {
    /// Sample the jump key and report press/release edges
    pub fn sample_jump(&mut self, down: bool) -> KeyEdge {
        let edge = KeyEdge {
            pressed: down && !self.jump_was_down,
            released: !down && self.jump_was_down,
        };
        self.jump_was_down = down;
        edge
    }

    /// Whether the jump key was down at the last sample
    pub fn jump_held(&self) -> bool {
        self.jump_was_down
    }
}

/// The runner
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left in base resolution units
    pub base_pos: Vec2,
    /// Current frame size in base units (run or crouch)
    pub base_size: Vec2,
    /// Screen-space rect, used for collision
    pub rect: Rect,
    /// Vertical velocity (base units per 1/60 s, negative is up)
    pub velocity: f32,
    pub is_jumping: bool,
    pub is_crouching: bool,
    pub is_jump_charging: bool,
    pub jump_charge_time: f32,
    pub frame: u32,
    pub frame_time: f32,
}

impl Default for Player {
    fn default() -> Self {
        let mut player = Self {
            base_pos: Vec2::new(PLAYER_X, 0.0),
            base_size: Player::frame_size(false),
            rect: Rect::ZERO,
            velocity: 0.0,
            is_jumping: false,
            is_crouching: false,
            is_jump_charging: false,
            jump_charge_time: 0.0,
            frame: 0,
            frame_time: 0.0,
        };
        player.base_pos.y = player.ground_line();
        player
    }
}

impl Player {
    /// Sprite frame size for a stance
    pub fn frame_size(crouching: bool) -> Vec2 {
        let (w, h) = if crouching {
            CROUCH_FRAME_SIZE
        } else {
            RUN_FRAME_SIZE
        };
        Vec2::new(w, h)
    }

    /// Base-unit y where the player stands for the current stance
    pub fn ground_line(&self) -> f32 {
        BASE_HEIGHT - GROUND_HEIGHT - Self::frame_size(self.is_crouching).y
    }

    /// Recompute the screen rect from base position and size
    pub fn sync_rect(&mut self, scale: f32) {
        self.rect = Rect::from_pos_size(self.base_pos * scale, self.base_size * scale);
    }
}

/// Ground obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    #[default]
    CactusSmall,
    CactusPair,
    CactusTriple,
    CactusTall,
    CactusTallPair,
    CactusCluster,
    Bird,
}

/// Obstacle footprint in base units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleDimensions {
    pub width: f32,
    pub height: f32,
    /// Offset from resting on the ground (negative lifts it)
    pub y_offset: f32,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 7] = [
        ObstacleKind::CactusSmall,
        ObstacleKind::CactusPair,
        ObstacleKind::CactusTriple,
        ObstacleKind::CactusTall,
        ObstacleKind::CactusTallPair,
        ObstacleKind::CactusCluster,
        ObstacleKind::Bird,
    ];

    pub fn dimensions(self) -> ObstacleDimensions {
        let (width, height, y_offset) = match self {
            ObstacleKind::CactusSmall => (34.0, 68.0, 0.0),
            ObstacleKind::CactusPair => (68.0, 68.0, 0.0),
            ObstacleKind::CactusTriple => (102.0, 68.0, 0.0),
            ObstacleKind::CactusTall => (50.0, 94.0, 0.0),
            ObstacleKind::CactusTallPair => (100.0, 94.0, 0.0),
            ObstacleKind::CactusCluster => (150.0, 95.0, 0.0),
            ObstacleKind::Bird => (93.0, 80.0, -61.0),
        };
        ObstacleDimensions {
            width,
            height,
            y_offset,
        }
    }

    /// Index into [`ObstacleKind::ALL`]
    pub fn index(self) -> u32 {
        self as u32
    }
}

/// Obstacle pool entry
#[derive(Debug, Clone, Default)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub active: bool,
    pub rect: Rect,
    pub collision_rect: Rect,
    /// Wing frame (birds only)
    pub frame: u32,
    pub frame_time: f32,
}

impl Poolable for Obstacle {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

impl Obstacle {
    /// Size and seat the obstacle on the ground for `viewport`, keeping its x
    pub fn place(&mut self, viewport: &Viewport) {
        let scale = viewport.scale();
        let dims = self.kind.dimensions();
        self.rect.w = dims.width * scale;
        self.rect.h = dims.height * scale;
        self.rect.y = viewport.ground_y() - self.rect.h + dims.y_offset * scale;
        self.collision_rect = self.rect.inset(COLLISION_OFFSET * scale);
    }
}

/// Meteor lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeteorState {
    #[default]
    Inactive,
    Falling,
    Impact,
}

/// Meteor pool entry (screen space, not viewport-scaled)
#[derive(Debug, Clone, Default)]
pub struct Meteor {
    pub pos: Vec2,
    pub rect: Rect,
    /// Zero while falling; a strip at the base once landed
    pub collision_rect: Rect,
    pub state: MeteorState,
    pub frame: u32,
    pub frame_time: f32,
    /// Seconds spent on the ground
    pub impact_time: f32,
    pub has_dealt_damage: bool,
}

impl Poolable for Meteor {
    fn is_active(&self) -> bool {
        self.state != MeteorState::Inactive
    }

    fn deactivate(&mut self) {
        self.state = MeteorState::Inactive;
    }
}

impl Meteor {
    /// Rest the meteor's base on `ground_y` and rebuild its collision strip
    pub fn seat_on_ground(&mut self, ground_y: f32) {
        self.pos.y = ground_y - self.rect.h;
        self.rect.x = self.pos.x;
        self.rect.y = self.pos.y;
        self.collision_rect = Rect::new(
            self.pos.x + METEOR_COLLISION_INSET_X,
            self.pos.y + self.rect.h - METEOR_COLLISION_HEIGHT,
            self.rect.w - 2.0 * METEOR_COLLISION_INSET_X,
            METEOR_COLLISION_HEIGHT,
        );
    }

    /// Opacity: solid until the ground lifetime runs out, then a linear fade
    pub fn alpha(&self, tuning: &Tuning) -> f32 {
        if self.state != MeteorState::Impact || self.impact_time <= tuning.meteor_ground_lifetime {
            return 1.0;
        }
        if tuning.meteor_fade_time <= 0.0 {
            return 0.0;
        }
        let faded = (self.impact_time - tuning.meteor_ground_lifetime) / tuning.meteor_fade_time;
        (1.0 - faded).clamp(0.0, 1.0)
    }
}

/// Decorative cloud (base units)
#[derive(Debug, Clone, Default)]
pub struct Cloud {
    pub pos: Vec2,
    pub speed: f32,
    pub scale: f32,
    pub alpha: f32,
    pub active: bool,
}

impl Poolable for Cloud {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Obstacle pool plus its spawn timer
#[derive(Debug, Clone)]
pub struct ObstacleField {
    pub pool: Pool<Obstacle>,
    pub spawn_timer: f32,
    pub next_spawn_time: f32,
}

/// Boss encounter and its meteor pool
#[derive(Debug, Clone)]
pub struct BossFight {
    pub active: bool,
    pub hp: u32,
    pub hp_max: u32,
    pub meteors: Pool<Meteor>,
    pub spawn_timer: f32,
    pub next_spawn_time: f32,
}

/// Camera shake request, consumed by the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenShake {
    pub timer: f32,
    pub intensity: f32,
}

impl ScreenShake {
    pub fn trigger(&mut self, duration: f32, intensity: f32) {
        self.timer = duration;
        self.intensity = intensity;
    }

    pub fn decay(&mut self, dt: f32) {
        if self.timer > 0.0 {
            self.timer -= dt;
            if self.timer <= 0.0 {
                self.timer = 0.0;
                self.intensity = 0.0;
            }
        }
    }

    /// Intensity right now (zero once the timer runs out)
    pub fn current(&self) -> f32 {
        if self.timer > 0.0 { self.intensity } else { 0.0 }
    }
}

/// Repeating day/night cycle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayNight {
    pub active: bool,
    /// Seconds into the current cycle
    pub timer: f32,
    /// 0 = full day, 1 = full night
    pub alpha: f32,
}

/// Uniform roll in `[min, max]` that tolerates an empty range
pub(crate) fn roll(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    if max <= min {
        min
    } else {
        rng.random_range(min..=max)
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub assets: AssetHandles,
    pub mode: GameMode,
    /// Viewport the cached screen rects were computed for
    pub viewport: Viewport,
    pub player: Player,
    pub score: u32,
    /// Best score seen, including the current run
    pub high_score: u32,
    pub score_timer: f64,
    pub obstacles: ObstacleField,
    pub boss: BossFight,
    pub shake: ScreenShake,
    pub day_night: DayNight,
    pub clouds: Pool<Cloud>,
    /// Whether the terminal sound for the current outcome has fired
    pub outcome_announced: bool,
    pub edges: InputEdges,
    /// Events from the last tick
    pub events: Vec<GameEvent>,
    outcome: Outcome,
}

impl GameState {
    /// Create a new game state with default tuning and assets
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), AssetHandles::default())
    }

    pub fn with_config(seed: u64, tuning: Tuning, assets: AssetHandles) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let next_spawn_time = roll(&mut rng, tuning.min_spawn_interval, tuning.max_spawn_interval);
        let next_meteor = roll(
            &mut rng,
            tuning.meteor_spawn_interval_min,
            tuning.meteor_spawn_interval_max,
        );

        let mut state = Self {
            seed,
            rng,
            obstacles: ObstacleField {
                pool: Pool::new(tuning.obstacle_capacity),
                spawn_timer: 0.0,
                next_spawn_time,
            },
            boss: BossFight {
                active: false,
                hp: tuning.boss_hp_max,
                hp_max: tuning.boss_hp_max,
                meteors: Pool::new(tuning.meteor_capacity),
                spawn_timer: 0.0,
                next_spawn_time: next_meteor,
            },
            clouds: Pool::new(tuning.cloud_capacity),
            tuning,
            assets,
            mode: GameMode::Normal,
            viewport: Viewport::BASE,
            player: Player::default(),
            score: 0,
            high_score: 0,
            score_timer: 0.0,
            shake: ScreenShake::default(),
            day_night: DayNight::default(),
            outcome_announced: false,
            edges: InputEdges::default(),
            events: Vec::with_capacity(8),
            outcome: Outcome::Running,
        };
        state.player.sync_rect(state.viewport.scale());
        super::ambient::scatter_clouds(&mut state);
        state
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    pub fn is_won(&self) -> bool {
        self.outcome.is_won()
    }

    /// Player died; a run that is already over keeps its outcome
    pub fn lose(&mut self) {
        if self.outcome == Outcome::Running {
            log::info!("Game over at score {}", self.score);
            self.outcome = Outcome::Lost;
        }
    }

    /// Boss defeated; ends the run as won
    pub fn win(&mut self) {
        if self.outcome == Outcome::Running {
            log::info!("Boss defeated at score {}", self.score);
            self.outcome = Outcome::Won;
        }
    }

    /// Reinitialize every pool, timer and flag for a fresh run in `mode`.
    /// Seed stream, high score, viewport, assets and key edges carry over.
    pub fn reset(&mut self, mode: GameMode) {
        self.mode = mode;
        self.player = Player::default();
        self.player.sync_rect(self.viewport.scale());
        self.score = 0;
        self.score_timer = 0.0;

        self.obstacles.pool.clear();
        self.obstacles.spawn_timer = 0.0;
        self.obstacles.next_spawn_time = roll(
            &mut self.rng,
            self.tuning.min_spawn_interval,
            self.tuning.max_spawn_interval,
        );

        self.boss.active = false;
        self.boss.hp_max = self.tuning.boss_hp_max;
        self.boss.hp = self.boss.hp_max;
        self.boss.meteors.clear();
        self.boss.spawn_timer = 0.0;
        self.boss.next_spawn_time = roll(
            &mut self.rng,
            self.tuning.meteor_spawn_interval_min,
            self.tuning.meteor_spawn_interval_max,
        );

        self.shake = ScreenShake::default();
        self.day_night = DayNight::default();
        self.clouds.clear();
        super::ambient::scatter_clouds(self);

        self.outcome = Outcome::Running;
        self.outcome_announced = false;
        self.events.clear();
        log::debug!("Run reset ({:?})", mode);
    }

    /// Re-derive every size-dependent screen rect for a new viewport
    pub fn rescale(&mut self, viewport: Viewport) {
        log::debug!(
            "Rescaling {}x{} -> {}x{}",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
        self.player.sync_rect(viewport.scale());
        for obstacle in self.obstacles.pool.iter_active_mut() {
            obstacle.place(&viewport);
        }
        let ground_y = viewport.ground_y();
        for meteor in self.boss.meteors.iter_active_mut() {
            if meteor.state == MeteorState::Impact {
                meteor.seat_on_ground(ground_y);
            }
        }
    }
}
