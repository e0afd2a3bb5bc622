//! Mapping from raw pointer/touch input to drawing-surface coordinates.

/// On-screen bounds of the drawing surface, in the same client coordinate
/// space the input events report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, point: SurfacePoint) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x <= self.width && point.y <= self.height
    }
}

/// A point in surface-local logical units. No device-pixel-ratio scaling is
/// applied here; the pad's raster context is pre-scaled at resize time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub x: f32,
    pub y: f32,
}

impl SurfacePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub client_x: f32,
    pub client_y: f32,
}

/// Raw input as reported by the windowing layer, before surface mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    Pointer { client_x: f32, client_y: f32 },
    Touch { touches: Vec<TouchPoint> },
}

impl RawInput {
    /// Translate client coordinates into surface-local logical coordinates.
    /// Touch input uses the primary (first) touch point; an empty touch
    /// list yields `None` and the caller treats the event as a no-op.
    pub fn surface_position(&self, rect: SurfaceRect) -> Option<SurfacePoint> {
        let (client_x, client_y) = match self {
            RawInput::Pointer { client_x, client_y } => (*client_x, *client_y),
            RawInput::Touch { touches } => {
                let primary = touches.first()?;
                (primary.client_x, primary.client_y)
            }
        };
        Some(SurfacePoint::new(client_x - rect.left, client_y - rect.top))
    }
}
