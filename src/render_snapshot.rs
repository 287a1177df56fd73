//! Read-only per-frame view of the game for the renderer
//!
//! Built after all of a frame's ticks have run. Everything is already in
//! screen space, so the renderer never needs the scale factor or tuning.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::assets::{TextureId, atlas};
use crate::consts::{LIGHT_FADE_DISTANCE, LIGHT_RADIUS};
use crate::settings::Settings;
use crate::sim::GameState;
use crate::sim::rect::Rect;

/// Sprite categories, for draw ordering and debugging
pub mod sprite_kind {
    pub const CLOUD: u32 = 0;
    pub const OBSTACLE: u32 = 1;
    pub const METEOR: u32 = 2;
    pub const PLAYER: u32 = 3;
}

/// One textured quad, laid out for direct upload as instance data
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Screen rect `[x, y, w, h]`
    pub dest: [f32; 4],
    /// Atlas rect `[x, y, w, h]`
    pub source: [f32; 4],
    pub alpha: f32,
    pub texture: u32,
    /// Animation frame the source rect was picked for
    pub frame: u32,
    /// See [`sprite_kind`]
    pub kind: u32,
}

impl SpriteInstance {
    fn new(dest: Rect, source: Rect, alpha: f32, texture: TextureId, frame: u32, kind: u32) -> Self {
        Self {
            dest: dest.to_array(),
            source: source.to_array(),
            alpha,
            texture: texture.0,
            frame,
            kind,
        }
    }
}

/// Darkness overlay with a lit circle around the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NightOverlay {
    /// 0 = day, 1 = full night
    pub alpha: f32,
    pub light_center: Vec2,
    pub light_radius: f32,
    /// Width of the soft edge of the lit circle
    pub fade_distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub high_score: u32,
    pub boss_active: bool,
    pub boss_hp: u32,
    pub boss_hp_max: u32,
}

impl Hud {
    /// Boss health bar fill (0.0 - 1.0)
    pub fn boss_hp_ratio(&self) -> f32 {
        if self.boss_hp_max == 0 {
            0.0
        } else {
            self.boss_hp as f32 / self.boss_hp_max as f32
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    /// Back-to-front: clouds, obstacles, meteors, player
    pub sprites: Vec<SpriteInstance>,
    pub night: NightOverlay,
    pub hud: Hud,
    /// Camera shake to apply (0 when disabled in settings)
    pub shake_intensity: f32,
    pub ground_y: f32,
    pub scale: f32,
    pub game_over: bool,
    pub game_won: bool,
}

impl RenderSnapshot {
    /// Raw instance bytes for a GPU upload
    pub fn sprite_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }

    pub fn sprites_of(&self, kind: u32) -> impl Iterator<Item = &SpriteInstance> {
        self.sprites.iter().filter(move |s| s.kind == kind)
    }
}

/// Copy what the renderer needs out of the game state
pub fn build_render_snapshot(state: &GameState, settings: &Settings) -> RenderSnapshot {
    let scale = state.viewport.scale();
    let textures = state.assets.textures;
    let mut sprites = Vec::with_capacity(
        state.clouds.active_count()
            + state.obstacles.pool.active_count()
            + state.boss.meteors.active_count()
            + 1,
    );

    // 1. Clouds (base units, scaled here)
    let cloud_size = state.assets.cloud_size;
    for cloud in state.clouds.iter_active() {
        let size = cloud_size * cloud.scale * scale;
        sprites.push(SpriteInstance::new(
            Rect::from_pos_size(cloud.pos * scale, size),
            Rect::from_pos_size(Vec2::ZERO, cloud_size),
            cloud.alpha,
            textures.cloud,
            0,
            sprite_kind::CLOUD,
        ));
    }

    // 2. Obstacles
    for obstacle in state.obstacles.pool.iter_active() {
        sprites.push(SpriteInstance::new(
            obstacle.rect,
            atlas::obstacle(obstacle.kind, obstacle.frame),
            1.0,
            textures.sprite_sheet,
            obstacle.frame,
            sprite_kind::OBSTACLE,
        ));
    }

    // 3. Meteors
    for meteor in state.boss.meteors.iter_active() {
        let Some(source) = atlas::meteor(meteor.state, meteor.frame) else {
            continue;
        };
        sprites.push(SpriteInstance::new(
            meteor.rect,
            source,
            meteor.alpha(&state.tuning),
            textures.sprite_sheet,
            meteor.frame,
            sprite_kind::METEOR,
        ));
    }

    // 4. Player
    let player = &state.player;
    sprites.push(SpriteInstance::new(
        player.rect,
        atlas::player(player.is_crouching, player.frame),
        1.0,
        textures.sprite_sheet,
        player.frame,
        sprite_kind::PLAYER,
    ));

    let night = NightOverlay {
        alpha: state.day_night.alpha,
        light_center: player.rect.center(),
        light_radius: LIGHT_RADIUS * scale,
        fade_distance: LIGHT_FADE_DISTANCE * scale,
    };

    let hud = Hud {
        score: state.score,
        high_score: state.high_score,
        boss_active: state.boss.active,
        boss_hp: state.boss.hp,
        boss_hp_max: state.boss.hp_max,
    };

    let shake_intensity = if settings.effective_screen_shake() {
        state.shake.current()
    } else {
        0.0
    };

    RenderSnapshot {
        sprites,
        night,
        hud,
        shake_intensity,
        ground_y: state.viewport.ground_y(),
        scale,
        game_over: state.is_over(),
        game_won: state.is_won(),
    }
}
