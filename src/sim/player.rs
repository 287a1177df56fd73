//! Player controller: jump/crouch input, vertical physics, run animation
//!
//! Velocities are in base units per 1/60 s frame, so every integration is
//! multiplied by `dt * REFERENCE_FPS` to stay frame-rate independent.

use super::state::{GameEvent, GameState, Player};
use crate::consts::{FRAME_DELAY, REFERENCE_FPS};
use crate::tuning::Tuning;

/// Extra upward force a held jump adds at `elapsed` seconds of charge.
///
/// Decays linearly from `jump_charge_force` to zero at the charge cap and
/// stays zero past it. Negative values push up.
pub fn charge_bonus(elapsed: f32, tuning: &Tuning) -> f32 {
    let cap = tuning.max_jump_charge_time;
    if cap <= 0.0 || elapsed >= cap {
        return 0.0;
    }
    let progress = (elapsed / cap).clamp(0.0, 1.0);
    tuning.jump_charge_force * (1.0 - progress)
}

/// Apply this tick's jump/crouch key state
pub fn handle_jump_crouch_input(state: &mut GameState, jump_down: bool, crouch_down: bool) {
    let edge = state.edges.sample_jump(jump_down);
    let scale = state.viewport.scale();
    let tuning = &state.tuning;
    let player = &mut state.player;

    if crouch_down != player.is_crouching {
        player.is_crouching = crouch_down;
        player.base_size = Player::frame_size(crouch_down);
        // Mid-air stance changes only affect the hitbox
        if !player.is_jumping {
            player.base_pos.y = player.ground_line();
            player.frame = 0;
            player.frame_time = 0.0;
        }
    }

    if edge.pressed && !player.is_jumping && !player.is_crouching {
        player.is_jumping = true;
        player.is_jump_charging = true;
        player.jump_charge_time = 0.0;
        player.velocity = tuning.jump_force;
        state.events.push(GameEvent::Jumped);
    }

    if edge.released {
        player.is_jump_charging = false;
    }

    // Fast fall
    if player.is_crouching && player.is_jumping {
        player.velocity = tuning.fast_fall_velocity;
        player.is_jump_charging = false;
    }

    player.sync_rect(scale);
}

/// Integrate charge, gravity and landing for one step
pub fn advance_physics(player: &mut Player, tuning: &Tuning, scale: f32, dt: f32) {
    let frames = dt.max(0.0) * REFERENCE_FPS;

    if player.is_jumping {
        if player.is_jump_charging && player.jump_charge_time < tuning.max_jump_charge_time {
            player.jump_charge_time += dt;
            player.velocity += charge_bonus(player.jump_charge_time, tuning) * frames;
        }
        player.velocity += tuning.gravity * frames;
        player.base_pos.y += player.velocity * frames;
    }

    let ground = player.ground_line();
    if player.base_pos.y >= ground {
        player.base_pos.y = ground;
        if player.is_jumping {
            player.is_jumping = false;
            player.is_jump_charging = false;
            player.velocity = 0.0;
        }
    }

    player.sync_rect(scale);
}

/// Two-frame run/crouch cycle
pub fn update_animation(player: &mut Player, dt: f32) {
    player.frame_time += dt;
    if player.frame_time >= FRAME_DELAY {
        player.frame_time = 0.0;
        player.frame ^= 1;
        player.base_size = Player::frame_size(player.is_crouching);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BASE_HEIGHT, CROUCH_FRAME_SIZE, GROUND_HEIGHT, RUN_FRAME_SIZE};

    const DT: f32 = 1.0 / 60.0;

    fn run_ground() -> f32 {
        BASE_HEIGHT - GROUND_HEIGHT - RUN_FRAME_SIZE.1
    }

    fn crouch_ground() -> f32 {
        BASE_HEIGHT - GROUND_HEIGHT - CROUCH_FRAME_SIZE.1
    }

    #[test]
    fn test_jump_starts_on_press_edge_only() {
        let mut state = GameState::new(1);
        handle_jump_crouch_input(&mut state, true, false);
        assert!(state.player.is_jumping);
        assert!(state.player.is_jump_charging);
        assert_eq!(state.player.velocity, state.tuning.jump_force);
        assert_eq!(state.events, vec![GameEvent::Jumped]);

        // Land, still holding: no second jump without a new press
        while state.player.is_jumping {
            advance_physics(&mut state.player, &state.tuning, 1.0, DT);
        }
        state.events.clear();
        handle_jump_crouch_input(&mut state, true, false);
        assert!(!state.player.is_jumping);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_cannot_jump_while_crouching() {
        let mut state = GameState::new(1);
        handle_jump_crouch_input(&mut state, true, true);
        assert!(!state.player.is_jumping);
        assert!(state.player.is_crouching);
        assert_eq!(state.player.base_pos.y, crouch_ground());
    }

    #[test]
    fn test_release_ends_charge_without_cancelling_velocity() {
        let mut state = GameState::new(1);
        handle_jump_crouch_input(&mut state, true, false);
        advance_physics(&mut state.player, &state.tuning, 1.0, DT);
        let velocity = state.player.velocity;

        handle_jump_crouch_input(&mut state, false, false);
        assert!(!state.player.is_jump_charging);
        assert_eq!(state.player.velocity, velocity);
    }

    #[test]
    fn test_held_jump_goes_higher() {
        let apex = |hold: bool| {
            let mut state = GameState::new(1);
            handle_jump_crouch_input(&mut state, true, false);
            let mut highest = state.player.base_pos.y;
            for _ in 0..240 {
                handle_jump_crouch_input(&mut state, hold, false);
                advance_physics(&mut state.player, &state.tuning, 1.0, DT);
                highest = highest.min(state.player.base_pos.y);
            }
            highest
        };
        assert!(apex(true) < apex(false));
    }

    #[test]
    fn test_crouch_in_air_fast_falls_without_resnap() {
        let mut state = GameState::new(1);
        handle_jump_crouch_input(&mut state, true, false);
        for _ in 0..5 {
            handle_jump_crouch_input(&mut state, true, false);
            advance_physics(&mut state.player, &state.tuning, 1.0, DT);
        }
        let y_before = state.player.base_pos.y;

        handle_jump_crouch_input(&mut state, true, true);
        assert_eq!(state.player.base_pos.y, y_before);
        assert_eq!(state.player.velocity, state.tuning.fast_fall_velocity);
        assert_eq!(state.player.base_size.y, CROUCH_FRAME_SIZE.1);

        while state.player.is_jumping {
            handle_jump_crouch_input(&mut state, true, true);
            advance_physics(&mut state.player, &state.tuning, 1.0, DT);
        }
        assert_eq!(state.player.base_pos.y, crouch_ground());
        assert_eq!(state.player.velocity, 0.0);
    }

    #[test]
    fn test_standing_up_resnaps_to_run_ground() {
        let mut state = GameState::new(1);
        handle_jump_crouch_input(&mut state, false, true);
        handle_jump_crouch_input(&mut state, false, false);
        assert_eq!(state.player.base_pos.y, run_ground());
        assert_eq!(state.player.frame, 0);
    }

    #[test]
    fn test_charge_bonus_decays_to_zero() {
        let tuning = Tuning::default();
        assert_eq!(charge_bonus(0.0, &tuning), tuning.jump_charge_force);
        assert!(charge_bonus(0.15, &tuning).abs() < tuning.jump_charge_force.abs());
        assert_eq!(charge_bonus(0.3, &tuning), 0.0);
        assert_eq!(charge_bonus(1.0, &tuning), 0.0);
    }

    #[test]
    fn test_animation_toggles() {
        let mut player = Player::default();
        update_animation(&mut player, 0.1);
        assert_eq!(player.frame, 0);
        update_animation(&mut player, 0.06);
        assert_eq!(player.frame, 1);
    }

    #[test]
    fn test_screen_rect_scales() {
        let mut player = Player::default();
        advance_physics(&mut player, &Tuning::default(), 2.0, DT);
        assert_eq!(player.rect.y, run_ground() * 2.0);
        assert_eq!(player.rect.w, RUN_FRAME_SIZE.0 * 2.0);
    }
}
