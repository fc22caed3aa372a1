//! Playback controller
//!
//! Owns the frame source and the filter, and turns timer ticks into filtered
//! frames for the display sink. The stream loops forever: end-of-stream is
//! answered with a rewind and never reaches the caller.

use std::time::Duration;

use thiserror::Error;

use super::{PlaybackSpeed, PlaybackState, TransportState};
use crate::effects::{FilterError, FrameFilter};
use crate::video::{Frame, SourceError, VideoSource};

/// Errors surfaced by a tick
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Reading or rewinding the source failed
    #[error(transparent)]
    Source(#[from] SourceError),
    /// Filtering the frame failed
    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Receives filtered frames for display
pub trait FrameSink {
    /// Show a BGR frame
    fn present(&mut self, frame: &Frame);
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or released; nothing was read
    Skipped,
    /// A frame was read, filtered and presented
    Presented { frame_index: u64 },
    /// The source hit end-of-stream and restarted; its first frame was presented
    Restarted { frame_index: u64 },
}

/// Drives a `VideoSource` through a `FrameFilter` on each tick
pub struct PlaybackController<S: VideoSource, F: FrameFilter> {
    source: S,
    filter: F,
    state: PlaybackState,
    /// Tick interval at 1.0x
    base_interval: Duration,
    /// Last frame handed to the sink
    last_frame: Option<Frame>,
    /// Number of times the source wrapped around
    loop_count: u64,
}

impl<S: VideoSource, F: FrameFilter> PlaybackController<S, F> {
    /// Create a controller that starts playing at the given speed
    pub fn new(source: S, filter: F, base_interval: Duration, speed: PlaybackSpeed) -> Self {
        let (width, height) = source.dimensions();
        tracing::info!(
            "Playback controller ready: {}x{}, filter: {}, speed: {}",
            width,
            height,
            filter.name(),
            speed
        );
        Self {
            source,
            filter,
            state: PlaybackState::new(speed),
            base_interval,
            last_frame: None,
            loop_count: 0,
        }
    }

    /// Advance one frame if playing and present it
    pub fn tick<K: FrameSink + ?Sized>(&mut self, sink: &mut K) -> Result<TickOutcome, PlayerError> {
        self.tick_many(1, sink)
    }

    /// Advance `count` frames if playing, presenting only the last one.
    ///
    /// Every skipped-over frame is still read and filtered, so the source
    /// position moves exactly as `count` single ticks would move it.
    pub fn tick_many<K: FrameSink + ?Sized>(&mut self, count: u32, sink: &mut K) -> Result<TickOutcome, PlayerError> {
        if count == 0 || !self.state.is_playing() || self.source.is_released() {
            return Ok(TickOutcome::Skipped);
        }

        let mut restarted = false;
        for _ in 0..count {
            restarted |= self.advance()?;
        }

        let Some(frame) = self.last_frame.as_ref() else {
            return Ok(TickOutcome::Skipped);
        };
        sink.present(frame);

        let frame_index = frame.frame_index;
        Ok(if restarted {
            TickOutcome::Restarted { frame_index }
        } else {
            TickOutcome::Presented { frame_index }
        })
    }

    /// Read and filter one frame into `last_frame`, rewinding at end of stream.
    /// Returns true if the source wrapped around.
    fn advance(&mut self) -> Result<bool, PlayerError> {
        let (frame, restarted) = match self.source.read_next()? {
            Some(frame) => (frame, false),
            None => {
                self.source.rewind()?;
                let frame = self.source.read_next()?.ok_or(SourceError::EmptyStream)?;
                self.loop_count += 1;
                tracing::debug!("End of stream, restarting (loop {})", self.loop_count);
                (frame, true)
            }
        };

        self.last_frame = Some(self.filter.apply(&frame)?);
        Ok(restarted)
    }

    /// Toggle between playing and paused, returning the new state
    pub fn toggle_play(&mut self) -> TransportState {
        let transport = self.state.toggle();
        tracing::info!("Playback {:?}", transport);
        transport
    }

    /// Label for the play/pause control
    pub fn control_label(&self) -> &'static str {
        self.state.control_label()
    }

    /// Change speed and return the new tick interval
    pub fn set_speed(&mut self, speed: PlaybackSpeed) -> Duration {
        self.state.speed = speed;
        let interval = self.tick_interval();
        tracing::info!("Playback speed {} (tick interval {:?})", speed, interval);
        interval
    }

    /// Change speed by selector index; out-of-range indices leave the speed unchanged
    pub fn set_speed_index(&mut self, index: usize) -> Option<Duration> {
        match PlaybackSpeed::from_index(index) {
            Some(speed) => Some(self.set_speed(speed)),
            None => {
                tracing::warn!("Ignoring unknown speed index {}", index);
                None
            }
        }
    }

    /// Current tick interval: base interval / speed multiplier
    pub fn tick_interval(&self) -> Duration {
        self.state.speed.interval(self.base_interval)
    }

    /// Release the source; subsequent ticks are skipped
    pub fn shutdown(&mut self) {
        if !self.source.is_released() {
            tracing::info!("Shutting down playback after {} loop(s)", self.loop_count);
            self.source.release();
        }
    }

    /// Check if playing
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Current speed
    pub fn speed(&self) -> PlaybackSpeed {
        self.state.speed
    }

    /// Last frame presented to the sink
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Number of loop restarts so far
    pub fn loop_count(&self) -> u64 {
        self.loop_count
    }

    /// Source dimensions (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.source.dimensions()
    }

    /// Borrow the source
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: VideoSource, F: FrameFilter> Drop for PlaybackController<S, F> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
