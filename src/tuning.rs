//! Data-driven game balance
//!
//! Every knob the simulation reads lives here so a JSON file can override it.
//! Speeds and forces are authored per 1/60 s frame unless noted as per second.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration (units/frame²)
    pub gravity: f32,
    /// Initial jump velocity (units/frame, negative is up)
    pub jump_force: f32,
    /// Extra upward force while the jump key is held (decays to zero)
    pub jump_charge_force: f32,
    /// Maximum time a held jump keeps adding force (seconds)
    pub max_jump_charge_time: f32,
    /// Velocity forced while crouching in the air (units/frame)
    pub fast_fall_velocity: f32,

    // === Obstacles ===
    pub obstacle_capacity: usize,
    /// Horizontal scroll speed (units/second, viewport-scaled)
    pub obstacle_speed: f32,
    pub min_spawn_interval: f32,
    pub max_spawn_interval: f32,
    pub bird_anim_delay: f32,

    // === Boss / meteors ===
    pub boss_threshold_score: u32,
    /// Obstacles stop spawning this many points before the boss
    pub pre_boss_gap: u32,
    pub boss_hp_max: u32,
    pub meteor_capacity: usize,
    pub meteor_spawn_interval_min: f32,
    pub meteor_spawn_interval_max: f32,
    /// Delay before the first meteor once the boss appears
    pub first_meteor_delay: f32,
    /// Falling speeds (units/second, not viewport-scaled)
    pub meteor_fall_speed_x: f32,
    pub meteor_fall_speed_y: f32,
    pub meteor_anim_delay: f32,
    pub meteor_ground_lifetime: f32,
    pub meteor_fade_time: f32,
    pub meteor_min_size: f32,
    pub meteor_max_size: f32,

    // === Screen shake ===
    pub boss_shake_duration: f32,
    pub boss_shake_intensity: f32,
    pub impact_shake_duration: f32,
    pub impact_shake_intensity: f32,

    // === Day / night ===
    pub night_start_score: u32,
    pub day_duration: f32,
    pub night_duration: f32,
    pub fade_duration: f32,

    // === Clouds ===
    pub cloud_capacity: usize,
    pub cloud_min_speed: f32,
    pub cloud_max_speed: f32,
    pub cloud_min_alpha: f32,
    pub cloud_max_alpha: f32,
    pub cloud_min_scale: f32,
    pub cloud_max_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1.8,
            jump_force: -5.0,
            jump_charge_force: -4.5,
            max_jump_charge_time: 0.3,
            fast_fall_velocity: 20.0,

            obstacle_capacity: 7,
            obstacle_speed: 700.0,
            min_spawn_interval: 1.5,
            max_spawn_interval: 2.0,
            bird_anim_delay: 0.2,

            boss_threshold_score: 100,
            pre_boss_gap: 20,
            boss_hp_max: 10,
            meteor_capacity: 15,
            meteor_spawn_interval_min: 0.5,
            meteor_spawn_interval_max: 1.5,
            first_meteor_delay: 0.3,
            meteor_fall_speed_x: 700.0,
            meteor_fall_speed_y: 1000.0,
            meteor_anim_delay: 0.08,
            meteor_ground_lifetime: 10.0,
            meteor_fade_time: 3.0,
            meteor_min_size: 100.0,
            meteor_max_size: 160.0,

            boss_shake_duration: 1.0,
            boss_shake_intensity: 10.0,
            impact_shake_duration: 0.3,
            impact_shake_intensity: 8.0,

            night_start_score: 50,
            day_duration: 20.0,
            night_duration: 10.0,
            fade_duration: 0.2,

            cloud_capacity: 4,
            cloud_min_speed: 50.0,
            cloud_max_speed: 150.0,
            cloud_min_alpha: 0.5,
            cloud_max_alpha: 0.9,
            cloud_min_scale: 0.5,
            cloud_max_scale: 0.8,
        }
    }
}

impl Tuning {
    /// Score at which ordinary obstacles stop spawning in story mode
    pub fn pre_boss_threshold(&self) -> u32 {
        self.boss_threshold_score.saturating_sub(self.pre_boss_gap)
    }

    /// Read tuning overrides from a JSON file
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Read tuning overrides, falling back to defaults when absent or malformed
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No tuning file, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
