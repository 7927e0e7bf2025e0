//! Geometric core shared by every connector generator.
//!
//! All coordinates are millimetres in KiCad footprint space: x grows to the
//! right, y grows downwards, and pin 1 usually sits at the origin.
//!
//! - [`grid`] - snapping coordinates to a manufacturing grid
//! - [`pad`] - pad size calculation and pad array placement
//! - [`outline`] - body-edge landmarks, markers and courtyards

pub mod grid;
pub mod outline;
pub mod pad;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use grid::round_to_base;
pub use outline::{BodyEdges, CourtyardBuilder, Landmark, MarkerDirection};
pub use pad::{PadArray, PadGeometry, PadKind, PadNumber, PadShape, PadSpec};

/// A 2D point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `dx`, `dy`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Board layers a footprint draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Front silkscreen.
    #[serde(rename = "F.SilkS")]
    FrontSilkscreen,
    /// Front fabrication drawing.
    #[serde(rename = "F.Fab")]
    FrontFab,
    /// Front courtyard.
    #[serde(rename = "F.CrtYd")]
    FrontCourtyard,
    /// User drawings.
    #[serde(rename = "Dwgs.User")]
    UserDrawings,
}

impl Layer {
    /// Returns the KiCad layer name.
    #[must_use]
    pub const fn kicad_name(self) -> &'static str {
        match self {
            Self::FrontSilkscreen => "F.SilkS",
            Self::FrontFab => "F.Fab",
            Self::FrontCourtyard => "F.CrtYd",
            Self::UserDrawings => "Dwgs.User",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kicad_name())
    }
}

/// An ordered stroke on one layer.
///
/// The vertex order is the drawn path. Nothing closes the polyline
/// implicitly: a closed outline repeats its first vertex at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonLine {
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Target layer.
    pub layer: Layer,
    /// Stroke width (mm).
    pub width: f64,
}

impl PolygonLine {
    /// Creates a polyline from anything convertible into points.
    #[must_use]
    pub fn new<P: Into<Point>>(points: impl IntoIterator<Item = P>, layer: Layer, width: f64) -> Self {
        Self {
            points: points.into_iter().map(Into::into).collect(),
            layer,
            width,
        }
    }

    /// Creates a single straight segment.
    #[must_use]
    pub fn line(start: impl Into<Point>, end: impl Into<Point>, layer: Layer, width: f64) -> Self {
        Self {
            points: vec![start.into(), end.into()],
            layer,
            width,
        }
    }

    /// Creates a closed axis-aligned rectangle from two opposite corners.
    #[must_use]
    pub fn rect(start: impl Into<Point>, end: impl Into<Point>, layer: Layer, width: f64) -> Self {
        let a = start.into();
        let b = end.into();
        Self::new(
            [
                Point::new(a.x, a.y),
                Point::new(b.x, a.y),
                Point::new(b.x, b.y),
                Point::new(a.x, b.y),
                Point::new(a.x, a.y),
            ],
            layer,
            width,
        )
    }

    /// Returns the consecutive segments of this polyline.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Returns whether the last vertex coincides with the first.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 2 => first == last,
            _ => false,
        }
    }

    /// Returns `(min_x, min_y, max_x, max_y)` over all vertices.
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.points.first()?;
        Some(self.points.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        ))
    }
}
