//! Reaction Controller: the game's state machine
//!
//! State transitions:
//! - IDLE → ARMED: start(), cue ready, cue playing
//! - ARMED → WAITING_FOR_GO: on_cue_released(), delay drawn
//! - WAITING_FOR_GO → GO_SIGNALED: tick() at the go deadline
//! - GO_SIGNALED → TAPPED → RESOLVED: on_tap(), result handed over
//! - any → IDLE: retry() or playback error
//!
//! Single-threaded and poll-driven: the one outstanding timer is a
//! stored deadline checked by `tick`, guarded by a session generation
//! counter so a deadline outliving its session is a detected no-op.

use crate::core::{Clock, CuePlayer, DelaySampler, MonotonicClock, ResultPresenter};
use crate::types::{
    GameConfig, GameError, GameState, ReactionSession, ReasonCode, StateOutput, TapDisposition,
};
use tracing::{debug, warn};

/// Scheduled go-signal, tagged with the session that armed it
#[derive(Debug, Clone, Copy)]
struct PendingGo {
    deadline_ms: u64,
    generation: u64,
}

/// Reaction-time state machine engine
pub struct ReactionController {
    /// Timing and policy knobs
    config: GameConfig,
    /// Current state
    state: GameState,
    /// Current attempt, None outside a session
    session: Option<ReactionSession>,
    /// Bumped on every new session and every reset
    generation: u64,
    /// Outstanding go-signal deadline, at most one
    pending_go: Option<PendingGo>,
    /// Last session-fatal error message
    last_error: Option<String>,
    /// Set by teardown(); every later call is a no-op
    torn_down: bool,
    clock: Box<dyn Clock>,
    sampler: DelaySampler,
    cue: Box<dyn CuePlayer>,
    presenter: Box<dyn ResultPresenter>,
}

impl ReactionController {
    /// Create a controller on the real monotonic clock
    pub fn new(
        config: GameConfig,
        cue: Box<dyn CuePlayer>,
        presenter: Box<dyn ResultPresenter>,
    ) -> Result<Self, GameError> {
        Self::with_clock(config, cue, presenter, Box::new(MonotonicClock::new()))
    }

    /// Create a controller on an injected clock (tests, scripted runs)
    pub fn with_clock(
        config: GameConfig,
        cue: Box<dyn CuePlayer>,
        presenter: Box<dyn ResultPresenter>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let sampler = DelaySampler::new(config.delay_min_ms, config.delay_max_ms, config.seed);
        Ok(Self {
            config,
            state: GameState::Idle,
            session: None,
            generation: 0,
            pending_go: None,
            last_error: None,
            torn_down: false,
            clock,
            sampler,
            cue,
            presenter,
        })
    }

    /// Begin a session. Valid only from IDLE with a ready cue player;
    /// anywhere else this is a recorded no-op.
    pub fn start(&mut self) -> StateOutput {
        if self.torn_down {
            return self.output(ReasonCode::R004_AFTER_TEARDOWN);
        }
        if self.state != GameState::Idle {
            return self.output(ReasonCode::R003_ALREADY_RUNNING);
        }
        if !self.cue.is_ready() {
            return self.output(ReasonCode::R003_CUE_NOT_READY);
        }

        self.generation += 1;
        let mut session = ReactionSession::new(self.generation);
        session.cue_started_at = Some(self.clock.now_ms());
        self.session = Some(session);
        self.last_error = None;

        if let Err(e) = self.cue.play() {
            return self.fail_session(&e.to_string());
        }

        self.transition(GameState::Armed);
        self.output(ReasonCode::R001_SESSION_ARMED)
    }

    /// Cue player reports the lights-out instant. Valid only from ARMED.
    pub fn on_cue_released(&mut self) -> StateOutput {
        if self.torn_down {
            return self.output(ReasonCode::R004_AFTER_TEARDOWN);
        }
        if self.state != GameState::Armed {
            return self.output(ReasonCode::R003_INVALID_TRANSITION);
        }

        let delay_ms = self.sampler.draw();
        let deadline_ms = self.clock.now_ms() + delay_ms;
        self.pending_go = Some(PendingGo {
            deadline_ms,
            generation: self.generation,
        });
        debug!(delay_ms, deadline_ms, "go-signal scheduled");

        self.transition(GameState::WaitingForGo);
        self.output(ReasonCode::R001_CUE_RELEASED)
    }

    /// Timer pump. Fires the go-signal once its deadline passes and,
    /// when a tap timeout is configured, resolves an expired window.
    /// Call as often as convenient; between deadlines it only reports
    /// status.
    pub fn tick(&mut self) -> StateOutput {
        if self.torn_down {
            return self.output(ReasonCode::R004_AFTER_TEARDOWN);
        }
        let now = self.clock.now_ms();

        if let Some(pending) = self.pending_go {
            if pending.generation != self.generation {
                // Timer outlived its session
                warn!(
                    timer_generation = pending.generation,
                    current_generation = self.generation,
                    "stale go-signal timer dropped"
                );
                self.pending_go = None;
                return self.output(ReasonCode::R004_STALE_TIMER);
            }
            if self.state == GameState::WaitingForGo && now >= pending.deadline_ms {
                self.pending_go = None;
                if let Some(session) = self.session.as_mut() {
                    session.signal_go(now);
                }
                self.transition(GameState::GoSignaled);
                return self.output(ReasonCode::R001_GO_SIGNALED);
            }
        }

        if self.state == GameState::GoSignaled {
            if let (Some(timeout), Some(go_at)) = (
                self.config.go_timeout_ms,
                self.session.as_ref().and_then(|s| s.go_signaled_at),
            ) {
                if now >= go_at + timeout {
                    debug!(timeout, "tap window expired");
                    self.cue.pause();
                    self.transition(GameState::Resolved);
                    self.presenter.show_result(None);
                    return self.output(ReasonCode::R001_GO_TIMED_OUT);
                }
            }
        }

        self.output(Self::status_reason(self.state))
    }

    /// User tap. Scores only while the window is open; early taps
    /// follow the configured false-start policy, everything else is a
    /// recorded no-op.
    pub fn on_tap(&mut self) -> StateOutput {
        if self.torn_down {
            return self.output(ReasonCode::R004_AFTER_TEARDOWN);
        }

        match self.config.tap_disposition(self.state) {
            TapDisposition::Score => {
                let now = self.clock.now_ms();
                let elapsed = self
                    .session
                    .as_mut()
                    .and_then(|session| session.register_tap(now));
                match elapsed {
                    Some(elapsed_ms) => {
                        self.pending_go = None;
                        self.cue.pause();
                        self.transition(GameState::Tapped);
                        self.transition(GameState::Resolved);
                        self.presenter.show_result(Some(elapsed_ms));
                        self.output(ReasonCode::R001_TAP_SCORED)
                    }
                    // Window open but no session go timestamp: nothing to score
                    None => self.output(ReasonCode::R003_INVALID_TRANSITION),
                }
            }
            TapDisposition::FalseStart => {
                debug!(state = %self.state, "false start");
                self.pending_go = None;
                self.cue.pause();
                if let Some(session) = self.session.as_mut() {
                    session.false_start = true;
                }
                self.transition(GameState::Resolved);
                self.presenter.show_result(None);
                self.output(ReasonCode::R003_FALSE_START)
            }
            TapDisposition::Ignore => {
                let reason = match self.state {
                    GameState::Armed | GameState::WaitingForGo => ReasonCode::R003_TAP_BEFORE_GO,
                    _ => ReasonCode::R003_INVALID_TRANSITION,
                };
                self.output(reason)
            }
        }
    }

    /// Reset to IDLE from any state. Idempotent, and safe while a
    /// timer is in flight: the generation bump orphans any deadline
    /// that might still be observed.
    pub fn retry(&mut self) -> StateOutput {
        if self.torn_down {
            return self.output(ReasonCode::R004_AFTER_TEARDOWN);
        }
        self.generation += 1;
        self.pending_go = None;
        self.session = None;
        self.last_error = None;
        self.cue.reset();
        self.presenter.clear();
        self.transition(GameState::Idle);
        self.output(ReasonCode::R005_RETRY_RESET)
    }

    /// Terminate the controller. Cancels the pending timer and resets
    /// the cue; every call after the first is a detected no-op.
    pub fn teardown(&mut self) -> StateOutput {
        if self.torn_down {
            return self.output(ReasonCode::R004_AFTER_TEARDOWN);
        }
        self.generation += 1;
        self.pending_go = None;
        self.session = None;
        self.cue.pause();
        self.cue.reset();
        self.transition(GameState::Idle);
        self.torn_down = true;
        self.output(ReasonCode::R005_TEARDOWN)
    }

    /// Cue player failed mid-session. Fatal to the session, not the
    /// process: back to IDLE with the message surfaced.
    pub fn on_playback_error(&mut self, message: &str) -> StateOutput {
        if self.torn_down {
            return self.output(ReasonCode::R004_AFTER_TEARDOWN);
        }
        self.fail_session(message)
    }

    fn fail_session(&mut self, message: &str) -> StateOutput {
        warn!(message, "cue playback error, session aborted");
        self.generation += 1;
        self.pending_go = None;
        self.session = None;
        self.last_error = Some(message.to_string());
        self.cue.reset();
        self.presenter.show_error(message);
        self.transition(GameState::Idle);
        self.output(ReasonCode::R005_PLAYBACK_ERROR)
    }

    fn transition(&mut self, to: GameState) {
        if to != self.state {
            debug!(from = %self.state, to = %to, "state transition");
            self.state = to;
        }
    }

    fn status_reason(state: GameState) -> ReasonCode {
        match state {
            GameState::Idle => ReasonCode::R002_STATE_IDLE,
            GameState::Armed => ReasonCode::R002_STATE_ARMED,
            GameState::WaitingForGo => ReasonCode::R002_STATE_WAITING,
            GameState::GoSignaled => ReasonCode::R002_STATE_GO,
            GameState::Tapped | GameState::Resolved => ReasonCode::R002_STATE_RESOLVED,
        }
    }

    fn output(&self, reason: ReasonCode) -> StateOutput {
        StateOutput::new(self.state, self.elapsed_ms(), reason)
    }

    /// Get current state
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Get the current session, if one exists
    pub fn session(&self) -> Option<&ReactionSession> {
        self.session.as_ref()
    }

    /// Measured reaction time of the current session, if resolved
    pub fn elapsed_ms(&self) -> Option<u64> {
        self.session.as_ref().and_then(|s| s.elapsed_ms)
    }

    /// Last session-fatal error message
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Milliseconds until the scheduled go-signal, if one is pending
    pub fn remaining_delay_ms(&self) -> Option<u64> {
        self.pending_go
            .map(|p| p.deadline_ms.saturating_sub(self.clock.now_ms()))
    }

    /// Has teardown() run?
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Nominal cue length, for drivers that pace the release signal
    pub fn cue_duration_ms(&self) -> u64 {
        self.cue.cue_duration_ms()
    }

    /// Get configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get current output without mutating anything
    pub fn current_output(&self) -> StateOutput {
        self.output(Self::status_reason(self.state))
    }
}

impl std::fmt::Debug for ReactionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionController")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("session", &self.session)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
