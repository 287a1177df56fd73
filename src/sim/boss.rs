//! Story-mode boss fight
//!
//! Once the score reaches the boss threshold the boss appears and starts
//! dropping meteors. A meteor falls diagonally, lands, then slides left with
//! the ground. Every landed meteor that gets past the player costs the boss
//! one HP; touching one is fatal unless it is the boss's last HP.

use glam::Vec2;
use rand::Rng;

use super::collision::{MeteorContact, has_passed, meteor_contact};
use super::rect::Rect;
use super::state::{GameEvent, GameMode, GameState, MeteorState, Outcome, roll};
use super::viewport::Viewport;
use crate::consts::{METEOR_COLLISION_INSET_X, METEOR_IMPACT_ANIM_WINDOW, METEOR_IMPACT_FRAMES};

/// Where a meteor enters the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnRegion {
    /// Just past the right edge, high up
    FarRightHigh,
    /// Over the right third, very high
    MidRightVeryHigh,
    /// Just past the right edge, medium height
    FarRightMedium,
}

impl SpawnRegion {
    pub const ALL: [SpawnRegion; 3] = [
        SpawnRegion::FarRightHigh,
        SpawnRegion::MidRightVeryHigh,
        SpawnRegion::FarRightMedium,
    ];

    /// Jittered top-left for a new meteor
    pub fn origin(self, viewport: &Viewport, rng: &mut impl Rng) -> Vec2 {
        let (x, y) = match self {
            SpawnRegion::FarRightHigh => (
                viewport.width + rng.random_range(50.0..=250.0),
                -rng.random_range(100.0..=300.0),
            ),
            SpawnRegion::MidRightVeryHigh => (
                viewport.width * 0.7 + rng.random_range(-100.0..=100.0),
                -rng.random_range(200.0..=400.0),
            ),
            SpawnRegion::FarRightMedium => (
                viewport.width + rng.random_range(50.0..=150.0),
                -rng.random_range(50.0..=150.0),
            ),
        };
        Vec2::new(x, y)
    }
}

/// Boss activation, shake decay and meteor updates for one tick
pub fn update_boss_fight(state: &mut GameState, dt: f32) {
    if state.mode != GameMode::Story || state.is_over() {
        return;
    }

    if !state.boss.active && state.score >= state.tuning.boss_threshold_score {
        activate_boss(state);
    }

    state.shake.decay(dt);

    if state.boss.active {
        update_meteors(state, dt);
    }
}

fn activate_boss(state: &mut GameState) {
    log::info!("Boss appears at score {}", state.score);
    state.boss.active = true;
    state.boss.hp = state.boss.hp_max;
    state.shake.trigger(
        state.tuning.boss_shake_duration,
        state.tuning.boss_shake_intensity,
    );
    state.boss.spawn_timer = 0.0;
    state.boss.next_spawn_time = state.tuning.first_meteor_delay;
    state.events.push(GameEvent::BossAppeared);
}

/// Drop a meteor from a random region.
/// Returns false (and does nothing) when the pool is exhausted.
pub fn spawn_meteor(state: &mut GameState) -> bool {
    let viewport = state.viewport;
    let Some(meteor) = state.boss.meteors.allocate() else {
        log::trace!("Meteor pool full, spawn skipped");
        return false;
    };

    let region = SpawnRegion::ALL[state.rng.random_range(0..SpawnRegion::ALL.len())];
    let pos = region.origin(&viewport, &mut state.rng);
    let size = roll(
        &mut state.rng,
        state.tuning.meteor_min_size,
        state.tuning.meteor_max_size,
    );

    meteor.pos = pos;
    meteor.rect = Rect::new(pos.x, pos.y, size, size);
    meteor.collision_rect = Rect::ZERO;
    meteor.state = MeteorState::Falling;
    meteor.frame = 0;
    meteor.frame_time = 0.0;
    meteor.impact_time = 0.0;
    meteor.has_dealt_damage = false;
    true
}

/// Spawn, move, land, fade and resolve damage for every meteor
pub fn update_meteors(state: &mut GameState, dt: f32) {
    if state.mode != GameMode::Story || !state.boss.active || state.is_over() {
        return;
    }

    state.boss.spawn_timer += dt;
    if state.boss.spawn_timer >= state.boss.next_spawn_time {
        spawn_meteor(state);
        state.boss.spawn_timer = 0.0;
        state.boss.next_spawn_time = roll(
            &mut state.rng,
            state.tuning.meteor_spawn_interval_min,
            state.tuning.meteor_spawn_interval_max,
        );
    }

    let tuning = &state.tuning;
    let ground_y = state.viewport.ground_y();
    let slide = tuning.obstacle_speed * state.viewport.scale() * dt;
    let player_rect = state.player.rect;
    let mut verdict = Outcome::Running;

    for meteor in state.boss.meteors.iter_active_mut() {
        meteor.frame_time += dt;

        match meteor.state {
            MeteorState::Falling => {
                meteor.pos.x -= tuning.meteor_fall_speed_x * dt;
                meteor.pos.y += tuning.meteor_fall_speed_y * dt;
                meteor.rect.x = meteor.pos.x;
                meteor.rect.y = meteor.pos.y;

                if meteor.frame_time >= tuning.meteor_anim_delay {
                    meteor.frame_time = 0.0;
                    meteor.frame ^= 1;
                }

                if meteor.rect.bottom() >= ground_y {
                    meteor.state = MeteorState::Impact;
                    meteor.seat_on_ground(ground_y);
                    meteor.frame = 0;
                    meteor.frame_time = 0.0;
                    state.shake.trigger(
                        tuning.impact_shake_duration,
                        tuning.impact_shake_intensity,
                    );
                    state.events.push(GameEvent::MeteorImpact);
                }
            }
            MeteorState::Impact => {
                meteor.pos.x -= slide;
                meteor.rect.x = meteor.pos.x;
                meteor.collision_rect.x = meteor.pos.x + METEOR_COLLISION_INSET_X;

                if !meteor.has_dealt_damage && has_passed(&meteor.rect, player_rect.x) {
                    meteor.has_dealt_damage = true;
                    state.boss.hp = state.boss.hp.saturating_sub(1);
                    log::debug!("Meteor got past the player, boss HP {}", state.boss.hp);
                    if state.boss.hp == 0 {
                        verdict = Outcome::Won;
                        break;
                    }
                }

                if meteor.impact_time < METEOR_IMPACT_ANIM_WINDOW
                    && meteor.frame_time >= tuning.meteor_anim_delay * 1.5
                {
                    meteor.frame_time = 0.0;
                    if meteor.frame < METEOR_IMPACT_FRAMES - 1 {
                        meteor.frame += 1;
                    }
                }

                meteor.impact_time += dt;
                if meteor.impact_time > tuning.meteor_ground_lifetime + tuning.meteor_fade_time {
                    meteor.state = MeteorState::Inactive;
                    continue;
                }

                if player_rect.overlaps(&meteor.collision_rect) {
                    match meteor_contact(state.boss.hp, meteor.has_dealt_damage) {
                        MeteorContact::Lethal => {
                            verdict = Outcome::Lost;
                            break;
                        }
                        MeteorContact::FinalBlow => {
                            meteor.has_dealt_damage = true;
                            state.boss.hp = 0;
                            verdict = Outcome::Won;
                            break;
                        }
                        MeteorContact::Spent => {}
                    }
                }
            }
            MeteorState::Inactive => {}
        }
    }

    match verdict {
        Outcome::Won => state.win(),
        Outcome::Lost => state.lose(),
        Outcome::Running => {}
    }
}
