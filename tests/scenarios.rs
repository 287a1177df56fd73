use dino_run::assets::AssetHandles;
use dino_run::audio::{AudioManager, NullBackend};
use dino_run::session::FrameInput;
use dino_run::sim::{GameMode, GameState, TickInput, Viewport, tick};
use dino_run::{MemoryScoreStore, Session, SessionPhase, Tuning};

fn empty_road() -> Tuning {
    Tuning {
        obstacle_capacity: 0,
        ..Default::default()
    }
}

#[test]
fn score_ticks_after_one_interval() {
    let mut state = GameState::with_config(1, empty_road(), AssetHandles::default());
    tick(&mut state, &TickInput::default(), Viewport::BASE, 0.1001);
    assert_eq!(state.score, 1);
}

#[test]
fn hundred_seconds_on_an_empty_road() {
    let mut state = GameState::with_config(2, empty_road(), AssetHandles::default());
    for _ in 0..1000 {
        tick(&mut state, &TickInput::default(), Viewport::BASE, 0.1);
    }
    assert_eq!(state.score, 1000);
    assert!(!state.is_over());
    assert!(state.day_night.active);
}

#[test]
fn story_boss_arrives_at_threshold() {
    let mut state = GameState::with_config(3, empty_road(), AssetHandles::default());
    state.reset(GameMode::Story);
    state.score = 99;
    state.score_timer = 0.0;

    tick(&mut state, &TickInput::default(), Viewport::BASE, 0.1001);
    assert_eq!(state.score, 100);
    assert!(state.boss.active);
    assert_eq!(state.boss.hp, state.boss.hp_max);

    // First meteor is due within 0.3 s of activation
    let mut elapsed = 0.0;
    while state.boss.meteors.active_count() == 0 && elapsed < 1.0 {
        tick(&mut state, &TickInput::default(), Viewport::BASE, 0.01);
        elapsed += 0.01;
    }
    assert!(state.boss.meteors.active_count() > 0);
    assert!(elapsed <= 0.31);
}

#[test]
fn normal_mode_never_summons_the_boss() {
    let mut state = GameState::new(4);
    state.score = 500;
    let input = TickInput::default();
    for _ in 0..130 {
        tick(&mut state, &input, Viewport::BASE, 1.0 / 60.0);
        if state.is_over() {
            break;
        }
    }
    assert!(!state.boss.active);
}

#[test]
fn high_score_only_ever_grows() {
    let tuning = empty_road();
    let mut session = Session::new(5, tuning, AssetHandles::default(), MemoryScoreStore::with_score(30));
    let mut audio = AudioManager::new(NullBackend, AssetHandles::default().sounds);

    session.start(GameMode::Normal);
    for _ in 0..50 {
        session.frame(&FrameInput::default(), Viewport::BASE, 0.1, &mut audio);
    }
    let best = session.state().high_score;
    assert!(best >= 49);

    session.state_mut().lose();
    session.frame(&FrameInput::default(), Viewport::BASE, 0.016, &mut audio);
    assert_eq!(session.phase(), SessionPhase::GameOver);
    let restart = FrameInput {
        restart_pressed: true,
        ..Default::default()
    };
    session.frame(&restart, Viewport::BASE, 0.016, &mut audio);
    assert_eq!(session.store().score, best);

    // A worse run leaves the stored value alone
    for _ in 0..10 {
        session.frame(&FrameInput::default(), Viewport::BASE, 0.1, &mut audio);
    }
    session.restart();
    assert_eq!(session.store().score, best);
    assert_eq!(session.store().saves, 1);
}
