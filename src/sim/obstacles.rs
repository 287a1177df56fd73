//! Ground obstacles: timed spawning, scrolling, bird animation, collision

use rand::Rng;

use super::state::{GameMode, GameState, ObstacleKind, roll};
use crate::consts::COLLISION_OFFSET;

/// Story mode clears the ground before the boss shows up
pub fn spawn_suppressed(state: &GameState) -> bool {
    state.mode == GameMode::Story && state.score >= state.tuning.pre_boss_threshold()
}

/// Put a random obstacle at the right screen edge.
/// Returns false (and does nothing) when the pool is exhausted.
pub fn spawn_obstacle(state: &mut GameState) -> bool {
    let viewport = state.viewport;
    let Some(obstacle) = state.obstacles.pool.allocate() else {
        log::trace!("Obstacle pool full, spawn skipped");
        return false;
    };

    let kind = ObstacleKind::ALL[state.rng.random_range(0..ObstacleKind::ALL.len())];
    obstacle.kind = kind;
    obstacle.active = true;
    obstacle.frame = 0;
    obstacle.frame_time = 0.0;
    obstacle.rect.x = viewport.width;
    obstacle.place(&viewport);
    true
}

/// Advance spawning, movement and collision for one tick
pub fn update_obstacles(state: &mut GameState, dt: f32) {
    if state.is_over() {
        return;
    }

    if !spawn_suppressed(state) {
        state.obstacles.spawn_timer += dt;
        if state.obstacles.spawn_timer >= state.obstacles.next_spawn_time {
            spawn_obstacle(state);
            state.obstacles.spawn_timer = 0.0;
            state.obstacles.next_spawn_time = roll(
                &mut state.rng,
                state.tuning.min_spawn_interval,
                state.tuning.max_spawn_interval,
            );
        }
    }

    let scale = state.viewport.scale();
    let step = state.tuning.obstacle_speed * scale * dt;
    let bird_delay = state.tuning.bird_anim_delay;
    let player_rect = state.player.rect;
    let mut hit = false;

    // Each obstacle is tested right after it moves; the first hit stops the pass
    for obstacle in state.obstacles.pool.iter_active_mut() {
        obstacle.rect.x -= step;
        obstacle.collision_rect.x = obstacle.rect.x + COLLISION_OFFSET * scale;

        if obstacle.kind == ObstacleKind::Bird {
            obstacle.frame_time += dt;
            if obstacle.frame_time >= bird_delay {
                obstacle.frame_time = 0.0;
                obstacle.frame ^= 1;
            }
        }

        if obstacle.rect.right() < 0.0 {
            obstacle.active = false;
            continue;
        }

        if player_rect.overlaps(&obstacle.collision_rect) {
            hit = true;
            break;
        }
    }

    if hit {
        state.lose();
    }
}
