//! Game lifecycle around the simulation
//!
//! Owns the game state, the high score store and the menu/pause/over phase.
//! The host calls [`Session::frame`] once per display frame with the real
//! elapsed time; the session splits it into simulation steps.

use crate::assets::AssetHandles;
use crate::audio::{AudioBackend, AudioManager};
use crate::consts::{MAX_FRAME_DT, MAX_STEP_DT};
use crate::highscores::ScoreStore;
use crate::render_snapshot::{RenderSnapshot, build_render_snapshot};
use crate::settings::Settings;
use crate::sim::{GameMode, GameState, TickInput, Viewport, tick};
use crate::tuning::Tuning;

/// Where the player is in the game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Menu,
    Playing,
    Paused,
    /// Run finished (lost or won), waiting for restart
    GameOver,
}

/// Keyboard state sampled for one display frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub jump_down: bool,
    pub crouch_down: bool,
    /// Pause key went down this frame
    pub pause_pressed: bool,
    /// Restart key went down this frame
    pub restart_pressed: bool,
    pub autopilot: bool,
}

impl FrameInput {
    fn tick_input(&self) -> TickInput {
        TickInput {
            jump: self.jump_down,
            crouch: self.crouch_down,
            autopilot: self.autopilot,
        }
    }
}

pub struct Session<S: ScoreStore> {
    state: GameState,
    phase: SessionPhase,
    store: S,
    /// Best score currently on disk
    stored_high: u32,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(seed: u64, tuning: Tuning, assets: AssetHandles, store: S) -> Self {
        let stored_high = store.load();
        let mut state = GameState::with_config(seed, tuning, assets);
        state.high_score = stored_high;
        log::info!("Session created (seed {}, high score {})", seed, stored_high);
        Self {
            state,
            phase: SessionPhase::Menu,
            store,
            stored_high,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn stored_high_score(&self) -> u32 {
        self.stored_high
    }

    /// Begin a fresh run from the menu
    pub fn start(&mut self, mode: GameMode) {
        self.state.reset(mode);
        self.phase = SessionPhase::Playing;
        log::info!("Starting {:?} run", mode);
    }

    /// Advance one display frame.
    ///
    /// `dt` is clamped to [`MAX_FRAME_DT`] and simulated in steps of at most
    /// [`MAX_STEP_DT`]. Simulation events are forwarded to `audio`.
    pub fn frame<B: AudioBackend>(
        &mut self,
        input: &FrameInput,
        viewport: Viewport,
        dt: f32,
        audio: &mut AudioManager<B>,
    ) {
        match self.phase {
            SessionPhase::Menu => {
                if viewport != self.state.viewport {
                    self.state.rescale(viewport);
                }
            }
            SessionPhase::Playing => {
                if input.pause_pressed {
                    self.phase = SessionPhase::Paused;
                    log::debug!("Paused");
                    return;
                }
                self.simulate(input, viewport, dt, audio);
            }
            SessionPhase::Paused => {
                if input.pause_pressed {
                    self.phase = SessionPhase::Playing;
                    log::debug!("Resumed");
                }
            }
            SessionPhase::GameOver => {
                // Let the final outcome event out even if the run ended mid-frame
                self.simulate(input, viewport, 0.0, audio);
                if input.restart_pressed {
                    audio.stop_all();
                    if self.state.is_won() {
                        self.reset();
                        self.phase = SessionPhase::Menu;
                    } else {
                        self.restart();
                    }
                }
            }
        }
    }

    fn simulate<B: AudioBackend>(
        &mut self,
        input: &FrameInput,
        viewport: Viewport,
        dt: f32,
        audio: &mut AudioManager<B>,
    ) {
        let tick_input = input.tick_input();
        let mut remaining = dt.clamp(0.0, MAX_FRAME_DT);
        loop {
            let step = remaining.min(MAX_STEP_DT);
            tick(&mut self.state, &tick_input, viewport, step);
            for event in self.state.events.drain(..) {
                audio.handle_event(event);
            }
            remaining -= step;

            if self.state.is_over() {
                self.phase = SessionPhase::GameOver;
                break;
            }
            if remaining <= 0.0 {
                break;
            }
        }
    }

    /// Reset the run in the same mode and keep playing
    pub fn restart(&mut self) {
        self.reset();
        self.phase = SessionPhase::Playing;
    }

    /// Reset the run and persist a beaten high score
    pub fn reset(&mut self) {
        self.persist_high_score();
        let mode = self.state.mode;
        self.state.reset(mode);
    }

    /// Leave a paused or finished run for the menu
    pub fn quit_to_menu(&mut self) {
        if matches!(self.phase, SessionPhase::Paused | SessionPhase::GameOver) {
            self.reset();
            self.phase = SessionPhase::Menu;
        }
    }

    /// Write the high score if this session beat the stored one.
    /// Returns whether anything was written.
    pub fn persist_high_score(&mut self) -> bool {
        let best = self.state.score.max(self.state.high_score);
        self.state.high_score = best;
        if best <= self.stored_high {
            return false;
        }
        match self.store.save(best) {
            Ok(()) => {
                self.stored_high = best;
                true
            }
            Err(e) => {
                log::warn!("Failed to save high score {}: {}", best, e);
                false
            }
        }
    }

    /// Persist and hand back the store
    pub fn shutdown(mut self) -> S {
        self.persist_high_score();
        self.store
    }

    pub fn snapshot(&self, settings: &Settings) -> RenderSnapshot {
        build_render_snapshot(&self.state, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SoundId;
    use crate::highscores::MemoryScoreStore;

    #[derive(Default)]
    struct Recorder {
        played: Vec<SoundId>,
        stops: usize,
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, sound: SoundId, _gain: f32) {
            self.played.push(sound);
        }

        fn stop_all(&mut self) {
            self.stops += 1;
        }
    }

    fn audio() -> AudioManager<Recorder> {
        AudioManager::new(Recorder::default(), AssetHandles::default().sounds)
    }

    fn session(high: u32) -> Session<MemoryScoreStore> {
        let tuning = Tuning {
            obstacle_capacity: 0,
            ..Default::default()
        };
        Session::new(5, tuning, AssetHandles::default(), MemoryScoreStore::with_score(high))
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    #[test]
    fn test_menu_does_not_simulate() {
        let mut session = session(0);
        let mut audio = audio();
        session.frame(&idle(), Viewport::BASE, 0.1, &mut audio);
        assert_eq!(session.phase(), SessionPhase::Menu);
        assert_eq!(session.state().score, 0);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut session = session(0);
        let mut audio = audio();
        session.start(GameMode::Normal);
        session.frame(&idle(), Viewport::BASE, 5.0, &mut audio);
        let state = session.state();
        let simulated = f64::from(state.score) * 0.1 + state.score_timer;
        assert!((simulated - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_pause_toggles() {
        let mut session = session(0);
        let mut audio = audio();
        session.start(GameMode::Normal);
        let pause = FrameInput {
            pause_pressed: true,
            ..Default::default()
        };

        session.frame(&pause, Viewport::BASE, 0.05, &mut audio);
        assert_eq!(session.phase(), SessionPhase::Paused);
        session.frame(&idle(), Viewport::BASE, 0.1, &mut audio);
        assert_eq!(session.state().score, 0);

        session.frame(&pause, Viewport::BASE, 0.05, &mut audio);
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_loss_restarts_and_keeps_playing() {
        let mut session = session(0);
        let mut audio = audio();
        session.start(GameMode::Story);
        session.frame(&idle(), Viewport::BASE, 0.1, &mut audio);
        session.state_mut().lose();
        session.frame(&idle(), Viewport::BASE, 0.016, &mut audio);
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert_eq!(audio.backend().played, vec![AssetHandles::default().sounds.game_over]);

        let restart = FrameInput {
            restart_pressed: true,
            ..Default::default()
        };
        session.frame(&restart, Viewport::BASE, 0.016, &mut audio);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.state().mode, GameMode::Story);
        assert_eq!(session.state().score, 0);
        assert!(!session.state().is_over());
        assert_eq!(audio.backend().stops, 1);
        // The game-over sound played exactly once
        assert_eq!(audio.backend().played.len(), 1);
    }

    #[test]
    fn test_win_restart_returns_to_menu() {
        let mut session = session(0);
        let mut audio = audio();
        session.start(GameMode::Story);
        session.state_mut().win();
        session.frame(&idle(), Viewport::BASE, 0.016, &mut audio);
        assert_eq!(session.phase(), SessionPhase::GameOver);

        let restart = FrameInput {
            restart_pressed: true,
            ..Default::default()
        };
        session.frame(&restart, Viewport::BASE, 0.016, &mut audio);
        assert_eq!(session.phase(), SessionPhase::Menu);
        assert!(!session.state().is_won());
    }

    #[test]
    fn test_high_score_is_monotonic() {
        let mut session = session(30);
        assert_eq!(session.state().high_score, 30);

        session.start(GameMode::Normal);
        session.state_mut().score = 50;
        session.state_mut().high_score = 50;
        session.reset();
        assert_eq!(session.store().score, 50);
        assert_eq!(session.store().saves, 1);

        session.state_mut().score = 10;
        session.reset();
        assert_eq!(session.store().score, 50);
        assert_eq!(session.store().saves, 1);
        assert_eq!(session.state().high_score, 50);
    }

    #[test]
    fn test_reset_saves_a_beaten_score() {
        let mut session = session(30);
        session.start(GameMode::Normal);
        session.state_mut().score = 50;
        session.reset();
        assert_eq!(session.store().score, 50);
        assert_eq!(session.stored_high_score(), 50);
        assert_eq!(session.state().high_score, 50);

        session.state_mut().score = 10;
        session.reset();
        assert_eq!(session.store().score, 50);
        assert_eq!(session.store().saves, 1);
    }

    #[test]
    fn test_live_high_score_persists_on_shutdown() {
        let mut session = session(3);
        let mut audio = audio();
        session.start(GameMode::Normal);
        for _ in 0..10 {
            session.frame(&idle(), Viewport::BASE, 0.1, &mut audio);
        }
        assert!(session.state().high_score >= 9);
        assert_eq!(session.store().saves, 0);

        let store = session.shutdown();
        assert!(store.score >= 9);
    }

    #[test]
    fn test_quit_to_menu_from_pause() {
        let mut session = session(0);
        let mut audio = audio();
        session.start(GameMode::Normal);
        session.quit_to_menu();
        assert_eq!(session.phase(), SessionPhase::Playing);

        let pause = FrameInput {
            pause_pressed: true,
            ..Default::default()
        };
        session.frame(&pause, Viewport::BASE, 0.0, &mut audio);
        session.quit_to_menu();
        assert_eq!(session.phase(), SessionPhase::Menu);
    }

    #[test]
    fn test_jump_sound_reaches_backend() {
        let mut session = session(0);
        let mut audio = audio();
        session.start(GameMode::Normal);
        let jump = FrameInput {
            jump_down: true,
            ..Default::default()
        };
        session.frame(&jump, Viewport::BASE, 0.016, &mut audio);
        assert_eq!(audio.backend().played, vec![AssetHandles::default().sounds.jump]);
        assert!(session.state().events.is_empty());
    }
}
