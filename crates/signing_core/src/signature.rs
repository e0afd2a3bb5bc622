//! Freehand signature capture onto an owned raster buffer.
//!
//! The pad is a two-state machine (idle/drawing). A down event opens a
//! stroke and marks the signature present; moves extend it progressively;
//! up, leave, and cancel all close it so the next down starts a visually
//! disconnected stroke. Moves while idle are ignored.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, Rgba, RgbaImage};
use shared::error::SigningError;
use tracing::debug;

use crate::geometry::SurfacePoint;

/// Fixed stroke width in logical units, matching the exported look.
pub const STROKE_WIDTH: f32 = 3.0;

const INK: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xff]);
const PAPER: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Idle,
    Drawing,
}

pub struct SignaturePad {
    buffer: RgbaImage,
    logical_width: f32,
    logical_height: f32,
    pixel_ratio: f32,
    state: CaptureState,
    last_point: Option<SurfacePoint>,
    has_signature: bool,
}

impl SignaturePad {
    pub fn new(logical_width: f32, logical_height: f32, pixel_ratio: f32) -> Self {
        let mut pad = Self {
            buffer: RgbaImage::new(1, 1),
            logical_width: 0.0,
            logical_height: 0.0,
            pixel_ratio: 1.0,
            state: CaptureState::Idle,
            last_point: None,
            has_signature: false,
        };
        pad.resize(logical_width, logical_height, pixel_ratio);
        pad
    }

    /// Rebuild the backing buffer for a new on-screen size. Prior strokes
    /// are discarded, so the completion gate blocks until the user re-signs.
    pub fn resize(&mut self, logical_width: f32, logical_height: f32, pixel_ratio: f32) {
        let pixel_ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        let logical_width = logical_width.max(1.0);
        let logical_height = logical_height.max(1.0);

        let width_px = (logical_width * pixel_ratio).round().max(1.0) as u32;
        let height_px = (logical_height * pixel_ratio).round().max(1.0) as u32;
        self.buffer = RgbaImage::from_pixel(width_px, height_px, PAPER);
        self.logical_width = logical_width;
        self.logical_height = logical_height;
        self.pixel_ratio = pixel_ratio;
        self.state = CaptureState::Idle;
        self.last_point = None;
        self.has_signature = false;
        debug!(
            width_px,
            height_px, pixel_ratio, "signature surface re-established"
        );
    }

    /// The on-screen size still fits the buffer, so a resize would only
    /// wipe the drawing for nothing.
    pub fn matches(&self, logical_width: f32, logical_height: f32, pixel_ratio: f32) -> bool {
        (self.logical_width - logical_width).abs() < 0.5
            && (self.logical_height - logical_height).abs() < 0.5
            && (self.pixel_ratio - pixel_ratio).abs() < f32::EPSILON
    }

    pub fn pointer_down(&mut self, point: SurfacePoint) {
        self.state = CaptureState::Drawing;
        self.has_signature = true;
        self.last_point = Some(point);
    }

    pub fn pointer_move(&mut self, point: SurfacePoint) {
        if self.state != CaptureState::Drawing {
            return;
        }
        if let Some(last) = self.last_point {
            self.draw_segment(last, point);
        }
        self.last_point = Some(point);
    }

    /// Close the current stroke. Also used for pointer-leave and
    /// touch-cancel; closing an already-idle pad is a no-op.
    pub fn pointer_up(&mut self) {
        self.state = CaptureState::Idle;
        self.last_point = None;
    }

    /// Reset to a blank white surface at the current size and drop the
    /// presence flag. Valid from either state.
    pub fn clear(&mut self) {
        for pixel in self.buffer.pixels_mut() {
            *pixel = PAPER;
        }
        self.state = CaptureState::Idle;
        self.last_point = None;
        self.has_signature = false;
    }

    pub fn has_signature(&self) -> bool {
        self.has_signature
    }

    pub fn is_drawing(&self) -> bool {
        self.state == CaptureState::Drawing
    }

    pub fn logical_size(&self) -> (f32, f32) {
        (self.logical_width, self.logical_height)
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn pixel_dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Raw RGBA bytes of the backing buffer, row-major.
    pub fn raw_rgba(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    pub fn is_blank(&self) -> bool {
        self.buffer.pixels().all(|pixel| *pixel == PAPER)
    }

    /// Encode the current raster as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, SigningError> {
        let mut bytes = Vec::new();
        self.buffer
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|err| SigningError::SignatureEncoding(err.to_string()))?;
        Ok(bytes)
    }

    /// The wire format the webhook consumer expects for the signature.
    pub fn to_data_url(&self) -> Result<String, SigningError> {
        let png = self.to_png()?;
        Ok(encode_signature_data_url(&png))
    }

    fn draw_segment(&mut self, from: SurfacePoint, to: SurfacePoint) {
        let ratio = self.pixel_ratio;
        let (x0, y0) = (from.x * ratio, from.y * ratio);
        let (x1, y1) = (to.x * ratio, to.y * ratio);
        let radius = STROKE_WIDTH * ratio / 2.0;

        let dx = x1 - x0;
        let dy = y1 - y0;
        let length = (dx * dx + dy * dy).sqrt();
        // Stamping round dots at sub-pixel steps gives round caps and
        // joins without a dedicated path rasterizer.
        let steps = (length * 2.0).ceil().max(1.0) as u32;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            self.stamp_dot(x0 + dx * t, y0 + dy * t, radius);
        }
    }

    fn stamp_dot(&mut self, cx: f32, cy: f32, radius: f32) {
        let (width, height) = self.buffer.dimensions();
        let min_x = (cx - radius).floor().max(0.0) as u32;
        let min_y = (cy - radius).floor().max(0.0) as u32;
        let max_x = ((cx + radius).ceil() as i64).min(width as i64 - 1);
        let max_y = ((cy + radius).ceil() as i64).min(height as i64 - 1);
        if max_x < 0 || max_y < 0 {
            return;
        }
        for y in min_y..=max_y as u32 {
            for x in min_x..=max_x as u32 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    self.buffer.put_pixel(x, y, INK);
                }
            }
        }
    }
}

pub fn encode_signature_data_url(png_bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png_bytes))
}
