//! Decoded video frame representation
//!
//! Frames are packed BGR24: three bytes per pixel in blue, green, red order,
//! rows laid out back to back with no padding.

/// Bytes per pixel of a packed BGR24 frame
pub const BGR_CHANNELS: usize = 3;

/// A decoded (or filtered) video frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Raw pixel data, BGR24
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Position of the frame in the stream (0-based)
    pub frame_index: u64,
}

impl Frame {
    /// Create a new BGR frame
    pub fn new(data: Vec<u8>, width: u32, height: u32, frame_index: u64) -> Self {
        Self {
            data,
            width,
            height,
            frame_index,
        }
    }

    /// Create a frame filled with a single BGR color
    pub fn filled(width: u32, height: u32, bgr: [u8; 3]) -> Self {
        let data = bgr
            .iter()
            .copied()
            .cycle()
            .take(Self::expected_size(width, height))
            .collect();
        Self::new(data, width, height, 0)
    }

    /// Expected data size for the given dimensions (width * height * 3)
    pub fn expected_size(width: u32, height: u32) -> usize {
        (width as usize) * (height as usize) * BGR_CHANNELS
    }

    /// Check if the frame data has the correct size
    pub fn is_valid(&self) -> bool {
        self.data.len() == Self::expected_size(self.width, self.height)
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        (self.width as usize) * BGR_CHANNELS
    }

    /// BGR triple at (x, y), or None if out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride() + x as usize * BGR_CHANNELS;
        let px = self.data.get(offset..offset + BGR_CHANNELS)?;
        Some([px[0], px[1], px[2]])
    }

    /// Iterate pixels converted to RGB order
    pub fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data
            .chunks_exact(BGR_CHANNELS)
            .map(|px| [px[2], px[1], px[0]])
    }
}
