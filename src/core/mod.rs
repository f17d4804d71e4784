//! Core modules for Redlight

pub mod clock;
pub mod controller;
pub mod cue;
pub mod delay;
pub mod presenter;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use controller::ReactionController;
pub use cue::{CueCommand, CueLog, CuePlayer, ScriptedCuePlayer};
pub use delay::DelaySampler;
pub use presenter::{
    PresenterEvent, PresenterLog, RecordingPresenter, ResultPresenter, TerminalPresenter,
};
