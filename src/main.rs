//! Dino Run entry point
//!
//! Headless native runner: loads settings, tuning and the high score, then
//! lets the autopilot play a story-mode run at 60 Hz and reports the result.

use std::path::Path;

use dino_run::assets::AssetHandles;
use dino_run::audio::{AudioManager, NullBackend};
use dino_run::highscores::{DEFAULT_HIGH_SCORE_FILE, FileScoreStore};
use dino_run::session::FrameInput;
use dino_run::settings::DEFAULT_SETTINGS_FILE;
use dino_run::sim::{GameMode, Viewport};
use dino_run::{Session, SessionPhase, Settings, Tuning};

const TUNING_FILE: &str = "tuning.json";
/// Give up after five simulated minutes
const MAX_FRAMES: u32 = 60 * 60 * 5;

fn main() {
    env_logger::init();
    log::info!("Dino Run (headless) starting...");

    let settings = Settings::load_or_default(Path::new(DEFAULT_SETTINGS_FILE));
    let tuning = Tuning::load_or_default(Path::new(TUNING_FILE));
    let store = FileScoreStore::new(DEFAULT_HIGH_SCORE_FILE);

    let (width, height) = settings.window_size();
    let viewport = Viewport::new(width as f32, height as f32);
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xD1_70);

    let assets = AssetHandles::default();
    let mut audio = AudioManager::new(NullBackend, assets.sounds);
    audio.apply_settings(&settings);

    let mut session = Session::new(seed, tuning, assets, store);
    session.start(GameMode::Story);

    let input = FrameInput {
        autopilot: true,
        ..Default::default()
    };
    let mut frames = 0;
    while session.phase() == SessionPhase::Playing && frames < MAX_FRAMES {
        session.frame(&input, viewport, 1.0 / 60.0, &mut audio);
        frames += 1;
    }

    let state = session.state();
    let verdict = if state.is_won() {
        "boss defeated"
    } else if state.is_over() {
        "game over"
    } else {
        "time limit reached"
    };
    log::info!(
        "Run finished after {:.1}s: {} (score {}, high score {}, boss HP {}/{})",
        frames as f32 / 60.0,
        verdict,
        state.score,
        state.high_score,
        state.boss.hp,
        state.boss.hp_max
    );

    session.shutdown();
}
