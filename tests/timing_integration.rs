//! Integration tests for delay sampling, timeouts, false-start policy
//! and output formatting

use pretty_assertions::assert_eq;
use redlight::core::{
    ManualClock, PresenterEvent, ReactionController, RecordingPresenter, ScriptedCuePlayer,
};
use redlight::types::{
    FalseStartPolicy, GameConfig, GameState, ReasonCode, StateOutput,
};

const CUE_MS: u64 = 4000;

fn controller(config: GameConfig) -> (ReactionController, ManualClock) {
    let clock = ManualClock::new();
    let ctrl = ReactionController::with_clock(
        config,
        Box::new(ScriptedCuePlayer::ready(CUE_MS)),
        Box::new(RecordingPresenter::new()),
        Box::new(clock.clone()),
    )
    .expect("valid config");
    (ctrl, clock)
}

/// Drive one session to the scheduled delay and report the draw
fn observe_delay(ctrl: &mut ReactionController) -> u64 {
    ctrl.start();
    ctrl.on_cue_released();
    let delay = ctrl.remaining_delay_ms().expect("delay scheduled");
    ctrl.retry();
    delay
}

#[test]
fn test_delay_redrawn_every_session_within_bounds() {
    let (mut ctrl, _clock) = controller(GameConfig {
        delay_min_ms: 200,
        delay_max_ms: 3000,
        seed: Some(11),
        ..GameConfig::default()
    });

    let draws: Vec<u64> = (0..30).map(|_| observe_delay(&mut ctrl)).collect();
    for delay in &draws {
        assert!((200..=3000).contains(delay), "delay {} out of bounds", delay);
    }
    // A single draw must not be reused session after session
    assert!(
        draws.iter().any(|d| *d != draws[0]),
        "30 sessions all drew {}ms",
        draws[0]
    );
}

#[test]
fn test_seeded_sessions_are_reproducible() {
    let config = GameConfig {
        delay_min_ms: 0,
        delay_max_ms: 1000,
        seed: Some(42),
        ..GameConfig::default()
    };
    let (mut a, _) = controller(config.clone());
    let (mut b, _) = controller(config);

    for _ in 0..10 {
        assert_eq!(observe_delay(&mut a), observe_delay(&mut b));
    }
}

#[test]
fn test_go_timeout_resolves_without_score() {
    let clock = ManualClock::new();
    let presenter = RecordingPresenter::new();
    let presented = presenter.log_handle();
    let mut ctrl = ReactionController::with_clock(
        GameConfig {
            delay_min_ms: 100,
            delay_max_ms: 100,
            go_timeout_ms: Some(2000),
            ..GameConfig::default()
        },
        Box::new(ScriptedCuePlayer::ready(CUE_MS)),
        Box::new(presenter),
        Box::new(clock.clone()),
    )
    .unwrap();

    ctrl.start();
    ctrl.on_cue_released();
    clock.advance(100);
    ctrl.tick();
    assert_eq!(ctrl.state(), GameState::GoSignaled);

    // Just inside the window: still waiting
    clock.advance(1999);
    assert_eq!(ctrl.tick().reason, ReasonCode::R002_STATE_GO);

    clock.advance(1);
    let out = ctrl.tick();
    assert_eq!(out.reason, ReasonCode::R001_GO_TIMED_OUT);
    assert_eq!(out.state, GameState::Resolved);
    assert_eq!(ctrl.elapsed_ms(), None);
    assert_eq!(
        *presented.lock().unwrap(),
        vec![PresenterEvent::Result(None)]
    );

    // A tap after the window closed is a recorded no-op
    assert_eq!(ctrl.on_tap().reason, ReasonCode::R003_INVALID_TRANSITION);
}

#[test]
fn test_false_start_resolve_policy_ends_session() {
    let clock = ManualClock::new();
    let presenter = RecordingPresenter::new();
    let presented = presenter.log_handle();
    let mut ctrl = ReactionController::with_clock(
        GameConfig {
            delay_min_ms: 500,
            delay_max_ms: 500,
            false_start_policy: FalseStartPolicy::Resolve,
            ..GameConfig::default()
        },
        Box::new(ScriptedCuePlayer::ready(CUE_MS)),
        Box::new(presenter),
        Box::new(clock.clone()),
    )
    .unwrap();

    ctrl.start();
    ctrl.on_cue_released();
    clock.advance(120); // jump the start mid-delay

    let out = ctrl.on_tap();
    assert_eq!(out.reason, ReasonCode::R003_FALSE_START);
    assert_eq!(ctrl.state(), GameState::Resolved);
    assert_eq!(ctrl.elapsed_ms(), None);
    assert!(ctrl.session().unwrap().false_start);
    assert_eq!(
        *presented.lock().unwrap(),
        vec![PresenterEvent::Result(None)]
    );

    // The orphaned delay never fires afterward
    clock.advance(10_000);
    assert_eq!(ctrl.tick().reason, ReasonCode::R002_STATE_RESOLVED);
}

#[test]
fn test_false_start_ignore_policy_keeps_session_alive() {
    let (mut ctrl, clock) = controller(GameConfig {
        delay_min_ms: 500,
        delay_max_ms: 500,
        false_start_policy: FalseStartPolicy::Ignore,
        ..GameConfig::default()
    });

    ctrl.start();
    ctrl.on_cue_released();
    clock.advance(120);
    assert_eq!(ctrl.on_tap().reason, ReasonCode::R003_TAP_BEFORE_GO);

    // Session continues to a normal score
    clock.advance(380);
    ctrl.tick();
    clock.advance(205);
    assert_eq!(ctrl.on_tap().reason, ReasonCode::R001_TAP_SCORED);
    assert_eq!(ctrl.elapsed_ms(), Some(205));
}

#[test]
fn test_output_formats_seconds_with_three_decimals() {
    let (mut ctrl, clock) = controller(GameConfig {
        delay_min_ms: 100,
        delay_max_ms: 100,
        ..GameConfig::default()
    });
    ctrl.start();
    ctrl.on_cue_released();
    clock.advance(100);
    ctrl.tick();
    clock.advance(1234);
    let out = ctrl.on_tap();

    assert_eq!(out.elapsed_ms, Some(1234));
    assert!(out.to_parseable_string().contains("elapsed=1.234s"));
    assert!(out.to_terminal_string().contains("1.234s"));
}

#[test]
fn test_json_output_valid() {
    let (mut ctrl, clock) = controller(GameConfig {
        delay_min_ms: 100,
        delay_max_ms: 100,
        ..GameConfig::default()
    });
    ctrl.start();
    ctrl.on_cue_released();
    clock.advance(100);
    ctrl.tick();
    clock.advance(230);
    let out = ctrl.on_tap();

    let json = serde_json::to_string(&out).unwrap();
    assert!(json.contains("\"state\":\"RESOLVED\""));
    assert!(json.contains("\"elapsed_ms\":230"));
    assert!(json.contains("\"reason\""));

    let back: StateOutput = serde_json::from_str(&json).unwrap();
    assert_eq!(back.state, GameState::Resolved);
    assert_eq!(back.elapsed_ms, Some(230));
}

#[test]
fn test_cue_player_driven_through_the_session() {
    use redlight::core::CueCommand;

    let clock = ManualClock::new();
    let cue = ScriptedCuePlayer::ready(CUE_MS);
    let cue_log = cue.log_handle();
    let mut ctrl = ReactionController::with_clock(
        GameConfig {
            delay_min_ms: 100,
            delay_max_ms: 100,
            ..GameConfig::default()
        },
        Box::new(cue),
        Box::new(RecordingPresenter::new()),
        Box::new(clock.clone()),
    )
    .unwrap();

    ctrl.start(); // play
    ctrl.on_cue_released();
    clock.advance(100);
    ctrl.tick();
    clock.advance(200);
    ctrl.on_tap(); // pause at the tap
    ctrl.retry(); // reset for the next attempt

    assert_eq!(
        *cue_log.lock().unwrap(),
        vec![CueCommand::Play, CueCommand::Pause, CueCommand::Reset]
    );
}
