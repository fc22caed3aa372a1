//! Filter traits
//!
//! `FrameFilter` is the seam between playback and image processing: the
//! controller hands every admitted frame to one filter and presents whatever
//! comes back.

use thiserror::Error;

use crate::video::Frame;

/// Errors raised while filtering a frame
#[derive(Debug, Error)]
pub enum FilterError {
    /// Frame buffer does not match its declared dimensions
    #[error("Invalid frame: {width}x{height} with {len} bytes")]
    InvalidFrame { width: u32, height: u32, len: usize },
    /// Underlying OpenCV call failed
    #[error("OpenCV error: {0}")]
    OpenCv(#[from] opencv::Error),
}

/// A per-frame image transform
///
/// Implementations must be stateless across frames: the same input always
/// produces the same output.
pub trait FrameFilter {
    /// Display name for logs
    fn name(&self) -> &str;

    /// Transform one BGR frame into a displayable BGR frame of the same size
    fn apply(&self, frame: &Frame) -> Result<Frame, FilterError>;
}
