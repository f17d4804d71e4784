//! Cue player boundary
//!
//! The controller never inspects frames; it drives playback through
//! this trait and trusts the release signal it is fed via
//! `ReactionController::on_cue_released`. If a player fires the release
//! late or early, the measured reaction time is systematically biased,
//! so the scripted player exists to test the contract without decoding
//! real media.

use crate::types::GameError;
use std::sync::{Arc, Mutex};

/// Playback primitive for the visual cue
pub trait CuePlayer {
    /// Load/buffer the cue. Must succeed before `play` is attempted.
    fn prepare(&mut self) -> Result<(), GameError>;

    /// True once the cue can play through without stalling
    fn is_ready(&self) -> bool;

    /// Start (or restart) playback from the top
    fn play(&mut self) -> Result<(), GameError>;

    /// Freeze playback in place
    fn pause(&mut self);

    /// Rewind and unload transient state
    fn reset(&mut self);

    /// Nominal length of the cue (ms), for drivers that schedule the
    /// release signal themselves
    fn cue_duration_ms(&self) -> u64;
}

/// Commands a `ScriptedCuePlayer` has received, oldest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueCommand {
    Prepare,
    Play,
    Pause,
    Reset,
}

/// Shared view of a scripted player's command log
pub type CueLog = Arc<Mutex<Vec<CueCommand>>>;

/// Fake player that fires on a scripted clock: fixed duration, scripted
/// readiness, optional injected failure. Used by tests and the CLI
/// simulator.
#[derive(Debug)]
pub struct ScriptedCuePlayer {
    duration_ms: u64,
    ready: bool,
    fail_on_play: bool,
    log: CueLog,
}

impl ScriptedCuePlayer {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            ready: false,
            fail_on_play: false,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A player that is ready immediately
    pub fn ready(duration_ms: u64) -> Self {
        Self {
            ready: true,
            ..Self::new(duration_ms)
        }
    }

    /// Make the next `play` call fail
    pub fn fail_on_play(mut self) -> Self {
        self.fail_on_play = true;
        self
    }

    /// Handle for asserting on received commands after the player has
    /// been boxed into a controller
    pub fn log_handle(&self) -> CueLog {
        Arc::clone(&self.log)
    }

    fn record(&self, cmd: CueCommand) {
        self.log.lock().expect("cue log poisoned").push(cmd);
    }
}

impl CuePlayer for ScriptedCuePlayer {
    fn prepare(&mut self) -> Result<(), GameError> {
        self.record(CueCommand::Prepare);
        self.ready = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn play(&mut self) -> Result<(), GameError> {
        self.record(CueCommand::Play);
        if self.fail_on_play {
            return Err(GameError::CuePlayback(
                "scripted playback failure".to_string(),
            ));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.record(CueCommand::Pause);
    }

    fn reset(&mut self) {
        self.record(CueCommand::Reset);
    }

    fn cue_duration_ms(&self) -> u64 {
        self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_until_prepared() {
        let mut player = ScriptedCuePlayer::new(4000);
        assert!(!player.is_ready());
        player.prepare().unwrap();
        assert!(player.is_ready());
    }

    #[test]
    fn test_command_log_records_order() {
        let mut player = ScriptedCuePlayer::ready(4000);
        let log = player.log_handle();

        player.play().unwrap();
        player.pause();
        player.reset();

        assert_eq!(
            *log.lock().unwrap(),
            vec![CueCommand::Play, CueCommand::Pause, CueCommand::Reset]
        );
    }

    #[test]
    fn test_injected_play_failure() {
        let mut player = ScriptedCuePlayer::ready(4000).fail_on_play();
        assert!(player.play().is_err());
    }
}
