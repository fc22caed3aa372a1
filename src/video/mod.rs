//! Video decoding module
//!
//! Provides video file decoding using FFmpeg via the `ffmpeg-next` crate.
//! Decoded frames are returned as packed BGR24 buffers.

mod decoder;
mod frame;
mod source;

pub use decoder::VideoFile;
pub use frame::{Frame, BGR_CHANNELS};
pub use source::{SourceError, VideoSource};
