//! Frame effects
//!
//! Per-frame CPU filters built on OpenCV. The player runs every decoded frame
//! through a single `FrameFilter` before display.

mod pseudo3d;
mod traits;

pub use pseudo3d::{Pseudo3dFilter, Pseudo3dParams};
pub use traits::{FilterError, FrameFilter};
