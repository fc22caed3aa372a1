//! Playback state machine
//!
//! Two transport states, Playing and Paused, switched only by toggling.
//! Speed is orthogonal and only changes tick cadence.

use super::PlaybackSpeed;

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportState {
    /// Frames advance on every tick
    #[default]
    Playing,
    /// Ticks are ignored; the last frame stays on screen
    Paused,
}

impl TransportState {
    /// The other state
    pub fn toggled(self) -> Self {
        match self {
            TransportState::Playing => TransportState::Paused,
            TransportState::Paused => TransportState::Playing,
        }
    }

    /// Label for the play/pause button in this state
    pub fn control_label(self) -> &'static str {
        match self {
            TransportState::Playing => "Pause",
            TransportState::Paused => "Resume",
        }
    }
}

/// User-controlled playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    /// Current transport state
    pub transport: TransportState,
    /// Current speed multiplier
    pub speed: PlaybackSpeed,
}

impl PlaybackState {
    /// Create a playing state at the given speed
    pub fn new(speed: PlaybackSpeed) -> Self {
        Self {
            transport: TransportState::Playing,
            speed,
        }
    }

    /// Check if playing
    pub fn is_playing(&self) -> bool {
        self.transport == TransportState::Playing
    }

    /// Toggle between playing and paused
    pub fn toggle(&mut self) -> TransportState {
        self.transport = self.transport.toggled();
        self.transport
    }

    /// Label for the play/pause button
    pub fn control_label(&self) -> &'static str {
        self.transport.control_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_playing() {
        let state = PlaybackState::default();
        assert!(state.is_playing());
        assert_eq!(state.control_label(), "Pause");
        assert_eq!(state.speed, PlaybackSpeed::Normal);
    }

    #[test]
    fn test_toggle() {
        let mut state = PlaybackState::new(PlaybackSpeed::Double);

        assert_eq!(state.toggle(), TransportState::Paused);
        assert!(!state.is_playing());
        assert_eq!(state.control_label(), "Resume");

        assert_eq!(state.toggle(), TransportState::Playing);
        assert_eq!(state.control_label(), "Pause");
        assert_eq!(state.speed, PlaybackSpeed::Double);
    }
}
