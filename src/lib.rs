//! Pseudo-3D Player Library
//!
//! A looping video player that renders every frame as a pseudo-3D edge
//! silhouette, with play/pause and speed controls.

pub mod app;
pub mod effects;
pub mod playback;
pub mod settings;
pub mod telemetry;
pub mod ui;
pub mod video;

// Re-export commonly used types
pub use app::PlayerApp;
pub use effects::{FilterError, FrameFilter, Pseudo3dFilter, Pseudo3dParams};
pub use playback::{FrameSink, PlaybackController, PlaybackSpeed, PlayerError, TickOutcome, TickTimer};
pub use settings::PlayerSettings;
pub use video::{Frame, SourceError, VideoFile, VideoSource};
