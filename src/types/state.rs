//! Game state definitions

use serde::{Deserialize, Serialize};

/// The six possible states of a reaction session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    /// Nothing running, start available
    Idle,
    /// Cue is playing, tap window not yet open
    Armed,
    /// Cue released, randomized delay in flight
    WaitingForGo,
    /// Go-signal fired, tap window open
    GoSignaled,
    /// Tap registered, result computed
    Tapped,
    /// Result handed to the presenter
    Resolved,
}

impl GameState {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            GameState::Idle => "\x1b[90m",         // Gray
            GameState::Armed => "\x1b[31m",        // Red (lights on)
            GameState::WaitingForGo => "\x1b[33m", // Yellow
            GameState::GoSignaled => "\x1b[32m",   // Green (lights out)
            GameState::Tapped => "\x1b[36m",       // Cyan
            GameState::Resolved => "\x1b[1m",      // Bold
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// True while the tap control is on screen at all.
    /// The original keeps the button visible from cue start onward,
    /// dimmed until the window opens.
    pub fn tap_visible(&self) -> bool {
        matches!(
            self,
            GameState::Armed | GameState::WaitingForGo | GameState::GoSignaled
        )
    }

    /// True only while a tap is actually scored
    pub fn tap_window_open(&self) -> bool {
        *self == GameState::GoSignaled
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameState::Idle => "IDLE",
            GameState::Armed => "ARMED",
            GameState::WaitingForGo => "WAITING_FOR_GO",
            GameState::GoSignaled => "GO_SIGNALED",
            GameState::Tapped => "TAPPED",
            GameState::Resolved => "RESOLVED",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_window_only_in_go_signaled() {
        assert!(GameState::GoSignaled.tap_window_open());
        for state in [
            GameState::Idle,
            GameState::Armed,
            GameState::WaitingForGo,
            GameState::Tapped,
            GameState::Resolved,
        ] {
            assert!(!state.tap_window_open());
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(GameState::WaitingForGo.to_string(), "WAITING_FOR_GO");
        assert_eq!(GameState::GoSignaled.to_string(), "GO_SIGNALED");
    }
}
