//! Playback control
//!
//! Play/pause state machine, speed selection, tick scheduling and the
//! controller that ties a frame source to a filter and a display sink.

mod controller;
mod speed;
mod state;
mod timer;

pub use controller::{FrameSink, PlaybackController, PlayerError, TickOutcome};
pub use speed::{PlaybackSpeed, BASE_TICK_INTERVAL};
pub use state::{PlaybackState, TransportState};
pub use timer::{TickTimer, MAX_TICKS_PER_POLL};
