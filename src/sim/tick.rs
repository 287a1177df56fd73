//! Per-frame simulation tick
//!
//! Runs every subsystem in a fixed order so a seed plus an input sequence
//! always replays the same run.

use super::ambient::{update_clouds, update_day_night};
use super::boss::update_boss_fight;
use super::obstacles::update_obstacles;
use super::player::{advance_physics, handle_jump_crouch_input, update_animation};
use super::state::{GameEvent, GameState, MeteorState, ObstacleKind, Outcome};
use super::viewport::Viewport;
use crate::consts::SCORE_INTERVAL;

/// How far ahead (in seconds of scrolling) the autopilot reacts
const AUTOPILOT_LEAD: f32 = 0.2;

/// Key state for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key held
    pub jump: bool,
    /// Crouch key held
    pub crouch: bool,
    /// Demo mode - the game plays itself and the keys are ignored
    pub autopilot: bool,
}

/// Advance the run by `dt` seconds.
///
/// Order: input, physics, score, obstacles, boss, ambient, animation.
/// A finished run is frozen; only a viewport change and the one-shot
/// outcome event still apply.
pub fn tick(state: &mut GameState, input: &TickInput, viewport: Viewport, dt: f32) {
    state.events.clear();
    let dt = dt.max(0.0);

    if viewport != state.viewport {
        state.rescale(viewport);
    }

    if state.is_over() {
        announce_outcome(state);
        return;
    }

    let input = if input.autopilot {
        autopilot_input(state)
    } else {
        input.clone()
    };

    handle_jump_crouch_input(state, input.jump, input.crouch);
    advance_physics(
        &mut state.player,
        &state.tuning,
        state.viewport.scale(),
        dt,
    );
    update_score(state, dt);
    update_obstacles(state, dt);
    update_boss_fight(state, dt);
    update_clouds(state, dt);
    update_day_night(state, dt);
    update_animation(&mut state.player, dt);

    announce_outcome(state);
}

/// One point per elapsed score interval, carrying the remainder
pub fn update_score(state: &mut GameState, dt: f32) {
    state.score_timer += f64::from(dt);
    while state.score_timer >= SCORE_INTERVAL {
        state.score += 1;
        state.score_timer -= SCORE_INTERVAL;
    }
    if state.score > state.high_score {
        state.high_score = state.score;
    }
}

/// Emit the terminal event exactly once per run
fn announce_outcome(state: &mut GameState) {
    if state.outcome_announced {
        return;
    }
    let event = match state.outcome() {
        Outcome::Running => return,
        Outcome::Lost => GameEvent::GameOver,
        Outcome::Won => GameEvent::Won,
    };
    state.outcome_announced = true;
    state.events.push(event);
}

/// Pick keys that keep the runner alive.
///
/// Jumps ground hazards, ducks birds, and lets landed meteors slide into it
/// once the boss is on its last HP.
pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let player = &state.player.rect;
    let reach = state.tuning.obstacle_speed * state.viewport.scale() * AUTOPILOT_LEAD;
    let near = |left: f32, right: f32| right > player.x && left - player.right() < reach;

    let bird_near = state.obstacles.pool.iter_active().any(|o| {
        o.kind == ObstacleKind::Bird && near(o.collision_rect.x, o.collision_rect.right())
    });
    let cactus_near = state.obstacles.pool.iter_active().any(|o| {
        o.kind != ObstacleKind::Bird && near(o.collision_rect.x, o.collision_rect.right())
    });
    let meteor_near = state.boss.active
        && state.boss.hp > 1
        && state.boss.meteors.iter_active().any(|m| {
            m.state == MeteorState::Impact
                && near(m.collision_rect.x, m.collision_rect.right())
        });

    if cactus_near || meteor_near {
        // Let go for a tick after landing so the next press registers
        input.jump = state.player.is_jumping || !state.edges.jump_held();
    } else if bird_near && !state.player.is_jumping {
        input.crouch = true;
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetHandles;
    use crate::sim::rect::Rect;
    use crate::sim::state::{GameMode, Meteor};
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 60.0;

    fn quiet_state() -> GameState {
        let tuning = Tuning {
            obstacle_capacity: 0,
            ..Default::default()
        };
        GameState::with_config(11, tuning, AssetHandles::default())
    }

    #[test]
    fn test_score_accrues_every_interval() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput::default(), Viewport::BASE, 0.05);
        assert_eq!(state.score, 0);
        tick(&mut state, &TickInput::default(), Viewport::BASE, 0.0501);
        assert_eq!(state.score, 1);
        assert_eq!(state.high_score, 1);
    }

    #[test]
    fn test_long_step_awards_every_point() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput::default(), Viewport::BASE, 0.35);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_sixty_hz_for_ten_seconds() {
        let mut state = quiet_state();
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), Viewport::BASE, DT);
        }
        assert_eq!(state.score, 100);
        assert!(!state.is_over());
    }

    #[test]
    fn test_frozen_after_game_over() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput::default(), Viewport::BASE, 0.2);
        state.lose();
        let score = state.score;
        let y = state.player.base_pos.y;
        tick(&mut state, &TickInput { jump: true, ..Default::default() }, Viewport::BASE, 1.0);
        assert_eq!(state.score, score);
        assert_eq!(state.player.base_pos.y, y);
        assert_eq!(state.events, vec![GameEvent::GameOver]);

        tick(&mut state, &TickInput::default(), Viewport::BASE, 1.0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_outcome_announced_once() {
        let mut state = quiet_state();
        state.mode = GameMode::Story;
        state.boss.active = true;
        state.boss.hp = 1;
        state.boss.next_spawn_time = f32::MAX;
        let rect = state.player.rect;
        let y = rect.bottom() - 100.0;
        if let Some(meteor) = state.boss.meteors.allocate() {
            *meteor = Meteor {
                rect: Rect::new(rect.x, y, 100.0, 100.0),
                collision_rect: Rect::new(rect.x + 10.0, rect.bottom() - 25.0, 80.0, 25.0),
                state: MeteorState::Impact,
                ..Default::default()
            };
            meteor.pos = glam::Vec2::new(meteor.rect.x, meteor.rect.y);
        }
        tick(&mut state, &TickInput::default(), Viewport::BASE, 0.0);
        assert!(state.is_won());
        assert_eq!(state.events, vec![GameEvent::Won]);

        tick(&mut state, &TickInput::default(), Viewport::BASE, DT);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_viewport_change_rescales() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput::default(), Viewport::new(1920.0, 1080.0), DT);
        assert_eq!(state.viewport, Viewport::new(1920.0, 1080.0));
        assert!((state.player.rect.h - 94.0 * 1.2).abs() < 1e-3);
    }

    #[test]
    fn test_jump_emits_event() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput { jump: true, ..Default::default() }, Viewport::BASE, DT);
        assert!(state.player.is_jumping);
        assert_eq!(state.events, vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_autopilot_jumps_cactus_and_ducks_bird() {
        let mut state = GameState::new(3);
        let player_right = state.player.rect.right();
        if let Some(obstacle) = state.obstacles.pool.allocate() {
            obstacle.active = true;
            obstacle.kind = ObstacleKind::CactusSmall;
            obstacle.rect.x = player_right + 20.0;
            obstacle.place(&Viewport::BASE);
        }
        let input = autopilot_input(&state);
        assert!(input.jump);
        assert!(!input.crouch);

        state.obstacles.pool.slots_mut()[0].kind = ObstacleKind::Bird;
        state.obstacles.pool.slots_mut()[0].place(&Viewport::BASE);
        let input = autopilot_input(&state);
        assert!(input.crouch);
        assert!(!input.jump);
    }

    #[test]
    fn test_autopilot_idles_on_clear_road() {
        let state = GameState::new(3);
        let input = autopilot_input(&state);
        assert!(!input.jump);
        assert!(!input.crouch);
    }

    #[test]
    fn test_autopilot_drives_a_run() {
        let mut state = GameState::new(21);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..60 * 20 {
            tick(&mut state, &input, Viewport::BASE, DT);
        }
        assert!(state.score > 0);
        assert!(state.player.base_pos.y <= state.player.ground_line());
    }
}
