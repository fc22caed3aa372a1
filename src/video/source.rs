//! Frame source abstraction
//!
//! A `VideoSource` is a finite, restartable sequence of BGR frames. The
//! playback controller owns exactly one and drives it from its tick.

use thiserror::Error;

use super::Frame;

/// Errors that can occur while opening or reading a frame source
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to open the video file
    #[error("Failed to open video file: {0}")]
    Open(String),
    /// No video stream found in the file
    #[error("No video stream found in file")]
    NoVideoStream,
    /// Failed to create the decoder
    #[error("Failed to create decoder: {0}")]
    Decoder(String),
    /// Failed to create the pixel format converter
    #[error("Failed to create scaler: {0}")]
    Scaler(String),
    /// Decoding error
    #[error("Decoding failed: {0}")]
    Decode(String),
    /// The source produced no frames even after a rewind
    #[error("Video stream contains no frames")]
    EmptyStream,
    /// The source was used after being released
    #[error("Video source has been released")]
    Released,
    /// FFmpeg error
    #[error("FFmpeg error: {0}")]
    Ffmpeg(#[from] ffmpeg_next::Error),
}

/// A restartable sequence of decoded frames
pub trait VideoSource {
    /// Decode the next frame, returning None at end of stream
    fn read_next(&mut self) -> Result<Option<Frame>, SourceError>;

    /// Move the cursor back to the first frame
    fn rewind(&mut self) -> Result<(), SourceError>;

    /// Release decoder resources. Calling it more than once is harmless.
    fn release(&mut self);

    /// Whether `release` has been called
    fn is_released(&self) -> bool;

    /// Frame dimensions (width, height)
    fn dimensions(&self) -> (u32, u32);
}
