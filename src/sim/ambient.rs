//! Ambient visuals: the day/night cycle and drifting clouds
//!
//! Neither affects collision. Clouds live in base units; the renderer scales them.

use super::state::{Cloud, GameState, roll};
use crate::consts::{BASE_WIDTH, CLOUD_MAX_Y, CLOUD_MIN_Y, CLOUD_WRAP_MARGIN};
use crate::tuning::Tuning;

/// Length of one full day → dusk → night → dawn cycle
pub fn cycle_length(tuning: &Tuning) -> f32 {
    tuning.day_duration + tuning.night_duration + 2.0 * tuning.fade_duration
}

/// Night darkness at `t` seconds into the cycle (0 = day, 1 = night)
pub fn night_alpha(t: f32, tuning: &Tuning) -> f32 {
    let fade = tuning.fade_duration;
    let dusk = tuning.day_duration;
    let night = dusk + fade;
    let dawn = night + tuning.night_duration;

    if t < dusk {
        0.0
    } else if t < night {
        if fade > 0.0 { (t - dusk) / fade } else { 1.0 }
    } else if t < dawn {
        1.0
    } else if fade > 0.0 {
        (1.0 - (t - dawn) / fade).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Start cycling once the score allows it, then keep cycling forever
pub fn update_day_night(state: &mut GameState, dt: f32) {
    let day_night = &mut state.day_night;
    if !day_night.active {
        if state.score < state.tuning.night_start_score {
            return;
        }
        log::debug!("Day/night cycle starts at score {}", state.score);
        day_night.active = true;
        day_night.timer = 0.0;
    }

    let period = cycle_length(&state.tuning);
    day_night.timer += dt;
    if period > 0.0 {
        day_night.timer = day_night.timer.rem_euclid(period);
    }
    day_night.alpha = night_alpha(day_night.timer, &state.tuning);
}

fn randomize_cloud(cloud: &mut Cloud, x: f32, rng: &mut rand_pcg::Pcg32, tuning: &Tuning) {
    cloud.pos.x = x;
    cloud.pos.y = roll(rng, CLOUD_MIN_Y, CLOUD_MAX_Y);
    cloud.speed = roll(rng, tuning.cloud_min_speed, tuning.cloud_max_speed);
    cloud.scale = roll(rng, tuning.cloud_min_scale, tuning.cloud_max_scale);
    cloud.alpha = roll(rng, tuning.cloud_min_alpha, tuning.cloud_max_alpha);
    cloud.active = true;
}

/// Spread every cloud slot evenly across the sky with a little jitter
pub fn scatter_clouds(state: &mut GameState) {
    let count = state.clouds.capacity();
    if count == 0 {
        return;
    }
    let spacing = BASE_WIDTH / count as f32;
    for (i, cloud) in state.clouds.slots_mut().iter_mut().enumerate() {
        let x = spacing * i as f32 + roll(&mut state.rng, -50.0, 50.0);
        randomize_cloud(cloud, x, &mut state.rng, &state.tuning);
    }
}

/// Drift clouds left; a cloud leaving the screen wraps to the right edge
/// with fresh parameters instead of being freed
pub fn update_clouds(state: &mut GameState, dt: f32) {
    let cloud_width = state.assets.cloud_size.x;
    for cloud in state.clouds.iter_active_mut() {
        cloud.pos.x -= cloud.speed * dt;
        if cloud.pos.x + cloud_width * cloud.scale < -CLOUD_WRAP_MARGIN {
            randomize_cloud(cloud, BASE_WIDTH, &mut state.rng, &state.tuning);
        }
    }
}
