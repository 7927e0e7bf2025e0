//! Body-edge landmarks and the layer outlines derived from them.
//!
//! Every connector family measures its housing once into a [`BodyEdges`]
//! value. Fabrication outlines trace those edges directly, silkscreen
//! outlines sit `nudge` further out, and courtyards are pushed out by the
//! courtyard clearance and snapped to the courtyard grid.
//!
//! Family-specific slot and latch routing lives next to each generator; this
//! module only holds the pieces every family draws the same way.

use std::f64::consts::SQRT_2;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::{round_to_base, Layer, Point, PolygonLine};

/// Default edge length (mm) of the fabrication pin-1 triangle.
pub const PIN1_MARKER_SIZE: f64 = 1.0;

/// Named body-edge landmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landmark {
    /// Leftmost housing edge.
    Left,
    /// Rightmost housing edge.
    Right,
    /// Top housing edge.
    Top,
    /// Bottom housing edge.
    Bottom,
    /// Left side of the latch.
    LatchLeft,
    /// Right side of the latch.
    LatchRight,
    /// Lowest point of the latch.
    LatchBottom,
    /// Left side of the tail.
    TailLeft,
    /// Right side of the tail.
    TailRight,
    /// Top of the tail.
    TailTop,
}

impl Landmark {
    /// Returns the landmark's snake-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::LatchLeft => "latch_left",
            Self::LatchRight => "latch_right",
            Self::LatchBottom => "latch_bottom",
            Self::TailLeft => "tail_left",
            Self::TailRight => "tail_right",
            Self::TailTop => "tail_top",
        }
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Measured housing edges of one footprint (mm).
///
/// The bounding box is always present. Latch and tail landmarks only exist
/// for the families that have those features; reading one that was never set
/// is a [`GeometryError::MissingLandmark`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyEdges {
    /// Left edge x.
    pub left: f64,
    /// Right edge x.
    pub right: f64,
    /// Top edge y.
    pub top: f64,
    /// Bottom edge y.
    pub bottom: f64,
    /// Latch left x.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latch_left: Option<f64>,
    /// Latch right x.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latch_right: Option<f64>,
    /// Latch bottom y.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latch_bottom: Option<f64>,
    /// Tail left x.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail_left: Option<f64>,
    /// Tail right x.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail_right: Option<f64>,
    /// Tail top y.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail_top: Option<f64>,
}

impl BodyEdges {
    /// Creates edges with only the bounding box set.
    #[must_use]
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
            latch_left: None,
            latch_right: None,
            latch_bottom: None,
            tail_left: None,
            tail_right: None,
            tail_top: None,
        }
    }

    /// Sets the horizontal extent of a latch.
    #[must_use]
    pub const fn with_latch(mut self, left: f64, right: f64) -> Self {
        self.latch_left = Some(left);
        self.latch_right = Some(right);
        self
    }

    /// Sets how far the latch protrudes below the body.
    #[must_use]
    pub const fn with_latch_bottom(mut self, bottom: f64) -> Self {
        self.latch_bottom = Some(bottom);
        self
    }

    /// Sets the tail section of a right-angle housing.
    #[must_use]
    pub const fn with_tail(mut self, left: f64, right: f64, top: f64) -> Self {
        self.tail_left = Some(left);
        self.tail_right = Some(right);
        self.tail_top = Some(top);
        self
    }

    /// Looks up a landmark.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::MissingLandmark`] if the landmark is unset.
    pub fn get(&self, landmark: Landmark) -> Result<f64, GeometryError> {
        let value = match landmark {
            Landmark::Left => Some(self.left),
            Landmark::Right => Some(self.right),
            Landmark::Top => Some(self.top),
            Landmark::Bottom => Some(self.bottom),
            Landmark::LatchLeft => self.latch_left,
            Landmark::LatchRight => self.latch_right,
            Landmark::LatchBottom => self.latch_bottom,
            Landmark::TailLeft => self.tail_left,
            Landmark::TailRight => self.tail_right,
            Landmark::TailTop => self.tail_top,
        };
        value.ok_or(GeometryError::MissingLandmark { landmark })
    }

    /// Checks that every listed landmark is set.
    ///
    /// # Errors
    ///
    /// Returns the first missing landmark.
    pub fn require(&self, landmarks: &[Landmark]) -> Result<(), GeometryError> {
        landmarks.iter().try_for_each(|&l| self.get(l).map(|_| ()))
    }

    /// Returns the body width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Returns the body height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Returns the centre of the bounding box.
    #[must_use]
    pub fn centre(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Fabrication rectangle tracing the bounding box.
    #[must_use]
    pub fn fab_rect(&self, width: f64) -> PolygonLine {
        PolygonLine::rect(
            (self.left, self.top),
            (self.right, self.bottom),
            Layer::FrontFab,
            width,
        )
    }

    /// Closed silkscreen rectangle `nudge` outside the bounding box.
    #[must_use]
    pub fn silk_rect(&self, nudge: f64, width: f64) -> PolygonLine {
        PolygonLine::rect(
            (self.left - nudge, self.top - nudge),
            (self.right + nudge, self.bottom + nudge),
            Layer::FrontSilkscreen,
            width,
        )
    }

    /// Silkscreen box open along the bottom edge.
    ///
    /// Drawn left-bottom, left-top, right-top, right-bottom so the bottom
    /// edge can be routed separately around latches.
    #[must_use]
    pub fn silk_open_bottom(&self, nudge: f64, width: f64) -> PolygonLine {
        let left = self.left - nudge;
        let right = self.right + nudge;
        let top = self.top - nudge;
        let bottom = self.bottom + nudge;
        PolygonLine::new(
            [(left, bottom), (left, top), (right, top), (right, bottom)],
            Layer::FrontSilkscreen,
            width,
        )
    }
}

/// Direction the pin-1 triangle points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerDirection {
    /// Base on a vertical line, apex to the right.
    Right,
    /// Base on a horizontal line, apex below.
    Down,
}

/// Fabrication-layer pin-1 triangle.
///
/// `base` is the midpoint of the triangle's base; the apex sits
/// `size / sqrt(2)` away from it in `direction`, giving a 45 degree
/// isosceles triangle.
#[must_use]
pub fn pin1_triangle(base: Point, size: f64, direction: MarkerDirection, width: f64) -> PolygonLine {
    let half = size / 2.0;
    let depth = size / SQRT_2;
    let points = match direction {
        MarkerDirection::Right => [
            base.offset(0.0, -half),
            base.offset(depth, 0.0),
            base.offset(0.0, half),
        ],
        MarkerDirection::Down => [
            base.offset(-half, 0.0),
            base.offset(0.0, depth),
            base.offset(half, 0.0),
        ],
    };
    PolygonLine::new(points, Layer::FrontFab, width)
}

/// Short vertical silkscreen bar left of pin 1.
#[must_use]
pub fn pin1_silk_bar(body_left: f64, width: f64) -> PolygonLine {
    PolygonLine::line(
        (body_left - 0.4, -2.0),
        (body_left - 0.4, 2.0),
        Layer::FrontSilkscreen,
        width,
    )
}

/// Pushes landmarks out by the courtyard clearance and snaps them to grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtyardBuilder {
    /// Clearance between body and courtyard (mm).
    pub clearance: f64,
    /// Grid the courtyard is snapped to (mm, 0 disables snapping).
    pub grid: f64,
    /// Courtyard stroke width (mm).
    pub line_width: f64,
}

impl CourtyardBuilder {
    /// Creates a builder.
    #[must_use]
    pub const fn new(clearance: f64, grid: f64, line_width: f64) -> Self {
        Self {
            clearance,
            grid,
            line_width,
        }
    }

    /// Snaps a coordinate pushed towards negative x or y.
    #[must_use]
    pub fn outward_min(&self, value: f64) -> f64 {
        round_to_base(value - self.clearance, self.grid)
    }

    /// Snaps a coordinate pushed towards positive x or y.
    #[must_use]
    pub fn outward_max(&self, value: f64) -> f64 {
        round_to_base(value + self.clearance, self.grid)
    }

    /// Courtyard polyline through already snapped vertices.
    #[must_use]
    pub fn polyline(&self, points: impl IntoIterator<Item = (f64, f64)>) -> PolygonLine {
        PolygonLine::new(points, Layer::FrontCourtyard, self.line_width)
    }

    /// Rectangular courtyard around the bounding box.
    #[must_use]
    pub fn rect(&self, edges: &BodyEdges) -> Courtyard {
        let left = self.outward_min(edges.left);
        let top = self.outward_min(edges.top);
        let right = self.outward_max(edges.right);
        let bottom = self.outward_max(edges.bottom);
        Courtyard {
            outline: PolygonLine::rect(
                (left, top),
                (right, bottom),
                Layer::FrontCourtyard,
                self.line_width,
            ),
            top,
            bottom,
        }
    }
}

/// A finished courtyard plus its vertical extent for text placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Courtyard {
    /// Courtyard stroke.
    pub outline: PolygonLine,
    /// Topmost courtyard y (mm).
    pub top: f64,
    /// Bottommost courtyard y (mm).
    pub bottom: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn optional_landmarks_report_missing() {
        let edges = BodyEdges::new(-2.0, 2.0, -1.0, 1.0);
        assert_eq!(edges.get(Landmark::Left), Ok(-2.0));
        assert_eq!(
            edges.get(Landmark::LatchLeft),
            Err(GeometryError::MissingLandmark {
                landmark: Landmark::LatchLeft
            })
        );
        assert!(edges.require(&[Landmark::Top, Landmark::Bottom]).is_ok());
        assert_eq!(
            edges.require(&[Landmark::Top, Landmark::TailTop, Landmark::LatchBottom]),
            Err(GeometryError::MissingLandmark {
                landmark: Landmark::TailTop
            })
        );
    }

    #[test]
    fn builders_set_landmarks() {
        let edges = BodyEdges::new(-2.0, 2.0, -1.0, 1.0)
            .with_latch(-1.0, 1.0)
            .with_latch_bottom(2.5)
            .with_tail(-1.5, 1.5, 0.5);
        assert!(edges
            .require(&[
                Landmark::LatchLeft,
                Landmark::LatchRight,
                Landmark::LatchBottom,
                Landmark::TailLeft,
                Landmark::TailRight,
                Landmark::TailTop,
            ])
            .is_ok());
        assert!((edges.width() - 4.0).abs() < TOLERANCE);
        assert!((edges.height() - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn pin1_triangle_apex() {
        let marker = pin1_triangle(Point::new(0.0, 0.0), PIN1_MARKER_SIZE, MarkerDirection::Right, 0.1);
        assert_eq!(marker.points.len(), 3);
        assert!((marker.points[1].x - 0.707_106_781).abs() < 1e-6);
        assert!(marker.points[1].y.abs() < TOLERANCE);
        assert!((marker.points[0].y + 0.5).abs() < TOLERANCE);
        assert!((marker.points[2].y - 0.5).abs() < TOLERANCE);
        assert_eq!(marker.layer, Layer::FrontFab);
    }

    #[test]
    fn pin1_triangle_follows_body_left() {
        let left = -2.545;
        let marker = pin1_triangle(Point::new(left, 0.0), 1.0, MarkerDirection::Right, 0.1);
        assert!((marker.points[1].x - (left + 1.0 / SQRT_2)).abs() < TOLERANCE);
        assert!((marker.points[0].x - left).abs() < TOLERANCE);
    }

    #[test]
    fn downward_triangle() {
        let marker = pin1_triangle(Point::new(0.0, -4.0), 1.0, MarkerDirection::Down, 0.1);
        assert!((marker.points[1].y - (-4.0 + 1.0 / SQRT_2)).abs() < TOLERANCE);
        assert!((marker.points[0].x + 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn silk_is_nudged_outwards() {
        let edges = BodyEdges::new(-5.08, 15.24, -5.715, 3.175);
        let silk = edges.silk_rect(0.11, 0.12);
        let fab = edges.fab_rect(0.1);
        let (sx0, sy0, sx1, sy1) = silk.bounds().unwrap();
        let (fx0, fy0, fx1, fy1) = fab.bounds().unwrap();
        assert!((fx0 - sx0 - 0.11).abs() < TOLERANCE);
        assert!((fy0 - sy0 - 0.11).abs() < TOLERANCE);
        assert!((sx1 - fx1 - 0.11).abs() < TOLERANCE);
        assert!((sy1 - fy1 - 0.11).abs() < TOLERANCE);

        let open = edges.silk_open_bottom(0.11, 0.12);
        assert_eq!(open.points.len(), 4);
        assert!(!open.is_closed());
    }

    #[test]
    fn courtyard_is_snapped() {
        let builder = CourtyardBuilder::new(0.5, 0.01, 0.05);
        let edges = BodyEdges::new(-2.545, 5.085, -2.54, 2.54);
        let courtyard = builder.rect(&edges);
        let (x0, y0, x1, y1) = courtyard.outline.bounds().unwrap();
        for v in [x0, y0, x1, y1] {
            let ratio = v / 0.01;
            assert!((ratio - ratio.round()).abs() < 1e-6, "{v} not on grid");
        }
        assert!(x0 <= edges.left - 0.49);
        assert!(x1 >= edges.right + 0.49);
        assert!((courtyard.top - y0).abs() < TOLERANCE);
        assert!((courtyard.bottom - y1).abs() < TOLERANCE);
        assert_eq!(courtyard.outline.layer, Layer::FrontCourtyard);
    }
}
