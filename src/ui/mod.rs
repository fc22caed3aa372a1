//! User interface components

mod transport_controls;
mod video_view;

pub use transport_controls::{TransportAction, TransportControls, TransportView};
pub use video_view::VideoView;
