//! Screen geometry and gesture descriptions
//!
//! Produces the press-and-slide strokes executed by the Android Accessibility
//! Service.

use serde::{Deserialize, Serialize};

use crate::error::{ClickerError, Result};

/// Reference width all pixel-like configuration values are expressed in
pub const REFERENCE_WIDTH: f32 = 1080.0;
/// Reference height all pixel-like configuration values are expressed in
pub const REFERENCE_HEIGHT: f32 = 1920.0;

/// Actual screen size with scale factors relative to the reference screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMetrics {
    /// Current screen width
    pub width: u32,
    /// Current screen height
    pub height: u32,
    scale_x: f32,
    scale_y: f32,
}

impl ScreenMetrics {
    /// Create metrics for a screen; both dimensions must be non-zero
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ClickerError::InvalidScreenSize { width, height });
        }

        Ok(Self {
            width,
            height,
            scale_x: width as f32 / REFERENCE_WIDTH,
            scale_y: height as f32 / REFERENCE_HEIGHT,
        })
    }

    /// Scale a horizontal reference distance to actual pixels
    pub fn scale_x(&self, distance: f32) -> f32 {
        distance * self.scale_x
    }

    /// Scale a vertical reference distance to actual pixels
    pub fn scale_y(&self, distance: f32) -> f32 {
        distance * self.scale_y
    }

    /// Scale a radius using the mean of both axis factors
    pub fn scale_radius(&self, distance: f32) -> f32 {
        distance * (self.scale_x + self.scale_y) / 2.0
    }

    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }

    /// Geometric center of the screen
    pub fn center(&self) -> Point {
        Point::new(self.width_f32() / 2.0, self.height_f32() / 2.0)
    }

    /// Point at the given fractions of the screen size
    pub fn at_ratio(&self, x_ratio: f32, y_ratio: f32) -> Point {
        Point::new(self.width_f32() * x_ratio, self.height_f32() * y_ratio)
    }

    /// Clamp a point into `[0, width] x [0, height]`
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(0.0, self.width_f32()),
            point.y.clamp(0.0, self.height_f32()),
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.width_f32()).contains(&point.x) && (0.0..=self.height_f32()).contains(&point.y)
    }
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self {
            width: REFERENCE_WIDTH as u32,
            height: REFERENCE_HEIGHT as u32,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

/// Screen position in actual pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A synthesized contact point plus the settle slide that follows it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapPoint {
    pub x: f32,
    pub y: f32,
    /// Slide vector applied after contact
    pub slide: (f32, f32),
}

impl TapPoint {
    pub fn press(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn release(&self) -> Point {
        self.press().offset(self.slide.0, self.slide.1)
    }
}

/// Which phase produced a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapKind {
    /// Attention tap near the screen center
    Center,
    /// Repeated tap around the anchor
    Like,
}

/// One stroke for the input dispatcher: ordered path points and total hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    pub kind: TapKind,
    /// Press point followed by the settle point
    pub path: Vec<Point>,
    /// Total stroke duration in ms
    pub duration_ms: u64,
}

impl Gesture {
    /// Build the two-point press-and-slide stroke for a tap
    pub fn tap(kind: TapKind, tap: TapPoint, duration_ms: u64) -> Self {
        Self {
            kind,
            path: vec![tap.press(), tap.release()],
            duration_ms,
        }
    }

    /// First contact point
    pub fn press_point(&self) -> Option<Point> {
        self.path.first().copied()
    }
}
