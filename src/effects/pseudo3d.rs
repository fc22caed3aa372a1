//! Pseudo-3D edge effect
//!
//! Reduces each frame to its Canny edge silhouette and offsets the red and
//! blue channels in opposite diagonal directions, giving an anaglyph-like
//! depth illusion from pure edges.

use opencv::core::{self, Mat, Scalar, Size, Vector, CV_8UC3};
use opencv::imgproc;
use opencv::prelude::*;

use super::{FilterError, FrameFilter};
use crate::video::Frame;

/// Fixed parameters of the pseudo-3D effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pseudo3dParams {
    /// Channel offset in pixels; red moves by (+shift, +shift), blue by (-shift, -shift)
    pub shift: i32,
    /// Canny hysteresis low threshold
    pub low_threshold: f64,
    /// Canny hysteresis high threshold
    pub high_threshold: f64,
    /// Sobel aperture used by Canny
    pub aperture_size: i32,
}

impl Default for Pseudo3dParams {
    fn default() -> Self {
        Self {
            shift: 5,
            low_threshold: 50.0,
            high_threshold: 150.0,
            aperture_size: 3,
        }
    }
}

/// Grayscale -> Canny -> channel-shift composite
#[derive(Debug, Clone, Default)]
pub struct Pseudo3dFilter {
    params: Pseudo3dParams,
}

impl Pseudo3dFilter {
    /// Create a filter with the given parameters
    pub fn new(params: Pseudo3dParams) -> Self {
        Self { params }
    }

    /// Get the filter parameters
    pub fn params(&self) -> &Pseudo3dParams {
        &self.params
    }

    /// Wrap a BGR frame in an owned 8UC3 matrix
    pub fn frame_to_mat(frame: &Frame) -> Result<Mat, FilterError> {
        if !frame.is_valid() || frame.width == 0 || frame.height == 0 {
            return Err(FilterError::InvalidFrame {
                width: frame.width,
                height: frame.height,
                len: frame.data.len(),
            });
        }

        let mut mat = Mat::new_rows_cols_with_default(
            frame.height as i32,
            frame.width as i32,
            CV_8UC3,
            Scalar::all(0.0),
        )?;
        mat.data_bytes_mut()?.copy_from_slice(&frame.data);
        Ok(mat)
    }

    /// Copy an 8UC3 matrix back into a frame
    pub fn mat_to_frame(mat: &Mat, frame_index: u64) -> Result<Frame, FilterError> {
        let continuous;
        let mat = if mat.is_continuous() {
            mat
        } else {
            continuous = mat.try_clone()?;
            &continuous
        };

        Ok(Frame::new(
            mat.data_bytes()?.to_vec(),
            mat.cols() as u32,
            mat.rows() as u32,
            frame_index,
        ))
    }

    /// Step 1: BGR to single-channel luma
    pub fn luminance(&self, bgr: &Mat) -> Result<Mat, FilterError> {
        let mut gray = Mat::default();
        imgproc::cvt_color_def(bgr, &mut gray, imgproc::COLOR_BGR2GRAY)?;
        Ok(gray)
    }

    /// Step 2: Canny edge map (0 or 255 per pixel)
    pub fn edge_map(&self, gray: &Mat) -> Result<Mat, FilterError> {
        let mut edges = Mat::default();
        imgproc::canny(
            gray,
            &mut edges,
            self.params.low_threshold,
            self.params.high_threshold,
            self.params.aperture_size,
            false,
        )?;
        Ok(edges)
    }

    /// Steps 3-5: replicate edges to BGR, shift red and blue, merge
    pub fn composite(&self, edges: &Mat) -> Result<Mat, FilterError> {
        let mut colored = Mat::default();
        let replicated: Vector<Mat> =
            Vector::from_iter([edges.try_clone()?, edges.try_clone()?, edges.try_clone()?]);
        core::merge(&replicated, &mut colored)?;

        let mut channels: Vector<Mat> = Vector::new();
        core::split(&colored, &mut channels)?;
        let blue = channels.get(0)?;
        let green = channels.get(1)?;
        let red = channels.get(2)?;

        let shift = self.params.shift;
        let red_shifted = Self::translate(&red, shift, shift)?;
        let blue_shifted = Self::translate(&blue, -shift, -shift)?;

        let mut output = Mat::default();
        let merged: Vector<Mat> = Vector::from_iter([blue_shifted, green, red_shifted]);
        core::merge(&merged, &mut output)?;
        Ok(output)
    }

    /// Rigid translation of a single channel; uncovered pixels become zero
    fn translate(channel: &Mat, dx: i32, dy: i32) -> Result<Mat, FilterError> {
        let transform = Mat::from_slice_2d(&[
            [1.0f32, 0.0, dx as f32],
            [0.0, 1.0, dy as f32],
        ])?;
        let size = Size::new(channel.cols(), channel.rows());

        let mut shifted = Mat::default();
        imgproc::warp_affine(
            channel,
            &mut shifted,
            &transform,
            size,
            imgproc::INTER_LINEAR,
            core::BORDER_CONSTANT,
            Scalar::default(),
        )?;
        Ok(shifted)
    }
}

impl FrameFilter for Pseudo3dFilter {
    fn name(&self) -> &str {
        "pseudo-3d edges"
    }

    fn apply(&self, frame: &Frame) -> Result<Frame, FilterError> {
        let bgr = Self::frame_to_mat(frame)?;
        let gray = self.luminance(&bgr)?;
        let edges = self.edge_map(&gray)?;
        let output = self.composite(&edges)?;
        Self::mat_to_frame(&output, frame.frame_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::CV_8UC1;

    fn blank_edges(width: i32, height: i32) -> Mat {
        Mat::new_rows_cols_with_default(height, width, CV_8UC1, Scalar::all(0.0)).unwrap()
    }

    fn square_frame(size: u32, lo: u32, hi: u32) -> Frame {
        let mut frame = Frame::filled(size, size, [0, 0, 0]);
        let stride = frame.stride();
        for y in lo..hi {
            for x in lo..hi {
                let offset = y as usize * stride + x as usize * 3;
                frame.data[offset..offset + 3].copy_from_slice(&[255, 255, 255]);
            }
        }
        frame
    }

    #[test]
    fn test_default_params() {
        let params = Pseudo3dParams::default();
        assert_eq!(params.shift, 5);
        assert_eq!(params.low_threshold, 50.0);
        assert_eq!(params.high_threshold, 150.0);
    }

    #[test]
    fn test_black_frame_stays_black() {
        let filter = Pseudo3dFilter::default();
        let input = Frame::filled(10, 10, [0, 0, 0]);

        let bgr = Pseudo3dFilter::frame_to_mat(&input).unwrap();
        let gray = filter.luminance(&bgr).unwrap();
        assert_eq!(core::count_non_zero(&gray).unwrap(), 0);
        let edges = filter.edge_map(&gray).unwrap();
        assert_eq!(core::count_non_zero(&edges).unwrap(), 0);

        let output = filter.apply(&input).unwrap();
        assert_eq!(output.width, 10);
        assert_eq!(output.height, 10);
        assert!(output.is_valid());
        assert!(output.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_single_edge_pixel_shift() {
        let filter = Pseudo3dFilter::default();
        let mut edges = blank_edges(20, 20);
        *edges.at_2d_mut::<u8>(8, 7).unwrap() = 255;

        let output = filter.composite(&edges).unwrap();
        let frame = Pseudo3dFilter::mat_to_frame(&output, 0).unwrap();

        // Green stays in place
        assert_eq!(frame.pixel(7, 8), Some([0, 255, 0]));
        // Red lands at (x+5, y+5)
        assert_eq!(frame.pixel(12, 13), Some([0, 0, 255]));
        // Blue lands at (x-5, y-5)
        assert_eq!(frame.pixel(2, 3), Some([255, 0, 0]));

        let lit = frame.data.iter().filter(|&&b| b != 0).count();
        assert_eq!(lit, 3);
    }

    #[test]
    fn test_shift_out_of_bounds_is_dropped() {
        let filter = Pseudo3dFilter::default();

        // Blue would land at (-3, -3)
        let mut near_origin = blank_edges(10, 10);
        *near_origin.at_2d_mut::<u8>(2, 2).unwrap() = 255;
        let frame = Pseudo3dFilter::mat_to_frame(&filter.composite(&near_origin).unwrap(), 0).unwrap();
        assert_eq!(frame.pixel(2, 2), Some([0, 255, 0]));
        assert_eq!(frame.pixel(7, 7), Some([0, 0, 255]));
        assert!(frame.rgb_pixels().all(|[_, _, b]| b == 0));

        // Red would land at (13, 13)
        let mut near_corner = blank_edges(10, 10);
        *near_corner.at_2d_mut::<u8>(8, 8).unwrap() = 255;
        let frame = Pseudo3dFilter::mat_to_frame(&filter.composite(&near_corner).unwrap(), 0).unwrap();
        assert_eq!(frame.pixel(8, 8), Some([0, 255, 0]));
        assert_eq!(frame.pixel(3, 3), Some([255, 0, 0]));
        assert!(frame.rgb_pixels().all(|[r, _, _]| r == 0));
    }

    #[test]
    fn test_channels_are_shifted_copies_of_green() {
        let filter = Pseudo3dFilter::default();
        let input = square_frame(48, 16, 32);
        let output = filter.apply(&input).unwrap();
        let shift = filter.params().shift as u32;

        let green_lit = output.rgb_pixels().filter(|[_, g, _]| *g != 0).count();
        assert!(green_lit > 0, "square should produce edges");

        for y in 0..output.height {
            for x in 0..output.width {
                let [b, _, r] = output.pixel(x, y).unwrap();
                let expected_r = if x >= shift && y >= shift {
                    output.pixel(x - shift, y - shift).unwrap()[1]
                } else {
                    0
                };
                let expected_b = if x + shift < output.width && y + shift < output.height {
                    output.pixel(x + shift, y + shift).unwrap()[1]
                } else {
                    0
                };
                assert_eq!(r, expected_r, "red mismatch at ({}, {})", x, y);
                assert_eq!(b, expected_b, "blue mismatch at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_apply_is_deterministic() {
        let filter = Pseudo3dFilter::default();
        let input = square_frame(32, 8, 20);

        let first = filter.apply(&input).unwrap();
        let second = filter.apply(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_apply_preserves_frame_index() {
        let filter = Pseudo3dFilter::default();
        let mut input = Frame::filled(8, 6, [40, 80, 120]);
        input.frame_index = 42;

        let output = filter.apply(&input).unwrap();
        assert_eq!(output.frame_index, 42);
        assert_eq!((output.width, output.height), (8, 6));
    }

    #[test]
    fn test_invalid_frame_rejected() {
        let filter = Pseudo3dFilter::default();
        let input = Frame::new(vec![0u8; 5], 4, 4, 0);
        assert!(matches!(
            filter.apply(&input),
            Err(FilterError::InvalidFrame { width: 4, height: 4, len: 5 })
        ));
    }
}
