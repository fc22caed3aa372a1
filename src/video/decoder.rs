//! Video file decoding using FFmpeg
//!
//! Provides a `VideoSource` backed by the ffmpeg-next crate. Every decoded
//! frame is converted to tightly packed BGR24, which is the layout the
//! filter pipeline and the display sink agree on.

use std::path::Path;

use ffmpeg_next::format::Pixel;
use ffmpeg_next::software::scaling;

use super::{Frame, SourceError, VideoSource};

/// Decoder resources, dropped on release
struct DecoderState {
    /// The input format context
    input: ffmpeg_next::format::context::Input,
    /// Index of the video stream
    video_stream_index: usize,
    /// Video decoder
    decoder: ffmpeg_next::decoder::Video,
    /// Scaler converting decoder output to BGR24
    scaler: scaling::Context,
    /// End of input reached and EOF sent to the decoder
    draining: bool,
}

/// A local video file opened for sequential decoding
pub struct VideoFile {
    state: Option<DecoderState>,
    /// Video width
    width: u32,
    /// Video height
    height: u32,
    /// Frame rate (fps)
    frame_rate: f64,
    /// Codec name
    codec_name: String,
    /// Index of the next frame to be returned
    frame_index: u64,
    /// Whether the decoder has been fully drained
    eof: bool,
}

impl std::fmt::Debug for VideoFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoFile")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("frame_rate", &self.frame_rate)
            .field("codec_name", &self.codec_name)
            .field("frame_index", &self.frame_index)
            .field("released", &self.state.is_none())
            .finish()
    }
}

impl VideoFile {
    /// Open a video file for decoding
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        // Initialize FFmpeg (safe to call multiple times)
        ffmpeg_next::init()?;

        let path = path.as_ref();
        let path_str = path.to_string_lossy().to_string();

        let input = ffmpeg_next::format::input(&path)
            .map_err(|e| SourceError::Open(format!("{}: {}", path_str, e)))?;

        let video_stream = input
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or(SourceError::NoVideoStream)?;
        let video_stream_index = video_stream.index();

        let frame_rate = video_stream.avg_frame_rate();
        let frame_rate_f64 = if frame_rate.denominator() > 0 {
            frame_rate.numerator() as f64 / frame_rate.denominator() as f64
        } else {
            30.0
        };

        let context = ffmpeg_next::codec::context::Context::from_parameters(video_stream.parameters())?;
        let decoder = context
            .decoder()
            .video()
            .map_err(|e| SourceError::Decoder(e.to_string()))?;

        let codec_name = decoder
            .codec()
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let width = decoder.width();
        let height = decoder.height();

        let scaler = Self::create_scaler(decoder.format(), width, height)?;

        tracing::info!(
            "Opened video {}: {}x{} @ {:.2}fps, codec: {}",
            path_str,
            width,
            height,
            frame_rate_f64,
            codec_name
        );

        Ok(Self {
            state: Some(DecoderState {
                input,
                video_stream_index,
                decoder,
                scaler,
                draining: false,
            }),
            width,
            height,
            frame_rate: frame_rate_f64,
            codec_name,
            frame_index: 0,
            eof: false,
        })
    }

    fn create_scaler(format: Pixel, width: u32, height: u32) -> Result<scaling::Context, SourceError> {
        scaling::Context::get(
            format,
            width,
            height,
            Pixel::BGR24,
            width,
            height,
            scaling::Flags::BILINEAR,
        )
        .map_err(|e| SourceError::Scaler(e.to_string()))
    }

    /// Get the video frame rate (fps)
    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Get the codec name
    pub fn codec_name(&self) -> &str {
        &self.codec_name
    }

    /// Index of the next frame to be decoded
    pub fn current_frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Convert a decoded frame to packed BGR24, dropping row padding
    fn convert_frame(
        state: &mut DecoderState,
        decoded: &ffmpeg_next::frame::Video,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, SourceError> {
        // Recreate scaler if format changed mid-stream
        if decoded.format() != state.scaler.input().format {
            state.scaler = Self::create_scaler(decoded.format(), width, height)?;
        }

        let mut bgr_frame = ffmpeg_next::frame::Video::empty();
        state.scaler.run(decoded, &mut bgr_frame)?;

        let data = bgr_frame.data(0);
        let stride = bgr_frame.stride(0);
        let row_bytes = width as usize * 3;
        let expected = Frame::expected_size(width, height);

        if stride == row_bytes {
            return Ok(data[..expected].to_vec());
        }

        let mut output = Vec::with_capacity(expected);
        for y in 0..height as usize {
            let row_start = y * stride;
            output.extend_from_slice(&data[row_start..row_start + row_bytes]);
        }
        Ok(output)
    }
}

impl VideoSource for VideoFile {
    fn read_next(&mut self) -> Result<Option<Frame>, SourceError> {
        if self.eof {
            return Ok(None);
        }
        let (width, height) = (self.width, self.height);
        let state = self.state.as_mut().ok_or(SourceError::Released)?;
        let mut decoded = ffmpeg_next::frame::Video::empty();

        loop {
            match state.decoder.receive_frame(&mut decoded) {
                Ok(()) => {
                    let data = Self::convert_frame(state, &decoded, width, height)?;
                    let frame = Frame::new(data, width, height, self.frame_index);
                    self.frame_index += 1;
                    return Ok(Some(frame));
                }
                Err(ffmpeg_next::Error::Other {
                    errno: ffmpeg_next::error::EAGAIN,
                }) => {
                    // Need more input
                }
                Err(ffmpeg_next::Error::Eof) => {
                    self.eof = true;
                    return Ok(None);
                }
                Err(e) => return Err(SourceError::Decode(e.to_string())),
            }

            if state.draining {
                // EAGAIN after EOF was sent means the decoder has nothing left
                self.eof = true;
                return Ok(None);
            }

            // Feed the next video packet, or EOF once the container is exhausted
            loop {
                match state.input.packets().next() {
                    Some((stream, packet)) => {
                        if stream.index() == state.video_stream_index {
                            state.decoder.send_packet(&packet)?;
                            break;
                        }
                    }
                    None => {
                        state.decoder.send_eof()?;
                        state.draining = true;
                        break;
                    }
                }
            }
        }
    }

    fn rewind(&mut self) -> Result<(), SourceError> {
        let state = self.state.as_mut().ok_or(SourceError::Released)?;
        state.input.seek(0, ..)?;
        state.decoder.flush();
        state.draining = false;
        self.frame_index = 0;
        self.eof = false;
        tracing::debug!("Rewound video to first frame");
        Ok(())
    }

    fn release(&mut self) {
        if self.state.take().is_some() {
            tracing::info!("Released video decoder ({})", self.codec_name);
        }
    }

    fn is_released(&self) -> bool {
        self.state.is_none()
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
