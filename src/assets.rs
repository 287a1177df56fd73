//! Opaque asset handles
//!
//! The asset loader (outside this crate) owns textures and sound buffers and
//! hands the simulation plain identifiers. The simulation only passes them
//! back out to the renderer and the audio backend.

use glam::Vec2;

use crate::sim::rect::Rect;
use crate::sim::state::{MeteorState, ObstacleKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SoundId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureHandles {
    /// Player, cacti, birds and meteors share one atlas
    pub sprite_sheet: TextureId,
    pub cloud: TextureId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SoundHandles {
    pub jump: SoundId,
    pub game_over: SoundId,
    pub win: SoundId,
    pub meteor_impact: SoundId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetHandles {
    pub textures: TextureHandles,
    pub sounds: SoundHandles,
    /// Cloud texture size in base units (drives wrap-around)
    pub cloud_size: Vec2,
}

impl Default for AssetHandles {
    fn default() -> Self {
        Self {
            textures: TextureHandles {
                sprite_sheet: TextureId(0),
                cloud: TextureId(1),
            },
            sounds: SoundHandles {
                jump: SoundId(0),
                game_over: SoundId(1),
                win: SoundId(2),
                meteor_impact: SoundId(3),
            },
            cloud_size: Vec2::new(256.0, 128.0),
        }
    }
}

/// Source rects inside the sprite sheet
pub mod atlas {
    use super::*;

    const RUN_FRAMES: [Rect; 2] = [
        Rect::new(1514.0, -4.0, 88.0, 94.0),
        Rect::new(1602.0, -4.0, 88.0, 94.0),
    ];
    const CROUCH_FRAMES: [Rect; 2] = [
        Rect::new(1866.0, 34.0, 118.0, 60.0),
        Rect::new(1984.0, 34.0, 118.0, 60.0),
    ];
    const METEOR_FALLING: [Rect; 2] = [
        Rect::new(2158.0, 6.0, 110.0, 120.0),
        Rect::new(2275.0, 6.0, 110.0, 120.0),
    ];
    const METEOR_IMPACT: [Rect; 3] = [
        Rect::new(2392.0, 34.0, 103.0, 68.0),
        Rect::new(2497.0, 34.0, 129.0, 74.0),
        Rect::new(2643.0, 34.0, 90.0, 51.0),
    ];

    pub fn player(crouching: bool, frame: u32) -> Rect {
        let frames = if crouching { &CROUCH_FRAMES } else { &RUN_FRAMES };
        frames[(frame as usize).min(1)]
    }

    pub fn obstacle(kind: ObstacleKind, frame: u32) -> Rect {
        match kind {
            ObstacleKind::CactusSmall => Rect::new(446.0, 0.0, 34.0, 68.0),
            ObstacleKind::CactusPair => Rect::new(480.0, 0.0, 68.0, 68.0),
            ObstacleKind::CactusTriple => Rect::new(548.0, 0.0, 102.0, 68.0),
            ObstacleKind::CactusTall => Rect::new(650.0, 0.0, 50.0, 94.0),
            ObstacleKind::CactusTallPair => Rect::new(700.0, 0.0, 100.0, 94.0),
            ObstacleKind::CactusCluster => Rect::new(800.0, 0.0, 150.0, 95.0),
            ObstacleKind::Bird => Rect::new(260.0 + (frame.min(1) as f32) * 93.0, 0.0, 93.0, 80.0),
        }
    }

    /// `None` for inactive meteors (nothing to draw)
    pub fn meteor(state: MeteorState, frame: u32) -> Option<Rect> {
        match state {
            MeteorState::Falling => Some(METEOR_FALLING[(frame as usize).min(1)]),
            MeteorState::Impact => Some(METEOR_IMPACT[(frame as usize).min(2)]),
            MeteorState::Inactive => None,
        }
    }
}
