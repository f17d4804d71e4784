//! Core types for Redlight

mod config;
mod error;
mod output;
mod reason;
mod session;
mod state;

pub use config::{FalseStartPolicy, GameConfig, TapDisposition};
pub use error::GameError;
pub use output::StateOutput;
pub use reason::ReasonCode;
pub use session::ReactionSession;
pub use state::GameState;
