//! Video display surface
//!
//! Uploads filtered BGR frames into an egui texture and draws it.

use egui::{Color32, ColorImage, Context, TextureHandle, TextureOptions};

use crate::playback::FrameSink;
use crate::video::Frame;

/// egui texture that always holds the most recently presented frame
pub struct VideoView {
    ctx: Context,
    texture: Option<TextureHandle>,
}

impl VideoView {
    /// Create a view that allocates its texture in `ctx`
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            texture: None,
        }
    }

    /// Convert a BGR frame into an egui image (RGB order)
    pub fn frame_to_image(frame: &Frame) -> ColorImage {
        let rgb: Vec<u8> = frame.rgb_pixels().flatten().collect();
        ColorImage::from_rgb([frame.width as usize, frame.height as usize], &rgb)
    }

    /// Size of the current texture in pixels, if any frame was presented
    pub fn texture_size(&self) -> Option<[usize; 2]> {
        self.texture.as_ref().map(|t| t.size())
    }

    /// Draw the current frame at its native size, or a black area until one arrives
    pub fn show(&self, ui: &mut egui::Ui) {
        match &self.texture {
            Some(texture) => {
                ui.centered_and_justified(|ui| {
                    ui.image((texture.id(), texture.size_vec2()));
                });
            }
            None => {
                let rect = ui.available_rect_before_wrap();
                ui.painter().rect_filled(rect, 0.0, Color32::BLACK);
            }
        }
    }
}

impl FrameSink for VideoView {
    fn present(&mut self, frame: &Frame) {
        let image = Self::frame_to_image(frame);
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                self.texture = Some(self.ctx.load_texture("video_frame", image, TextureOptions::LINEAR));
            }
        }
    }
}
