//! Pad size calculation and pad array placement.
//!
//! Through-hole connector pads are sized from the pin pitch and the drill:
//! the pad is as wide as the pitch allows (minus a copper-to-copper
//! clearance) while keeping the annular ring between configured bounds, and as
//! tall as the maximum annular ring permits.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Default corner radius ratio for rounded-rectangle pads.
pub const ROUNDRECT_RADIUS_RATIO: f64 = 0.25;

/// Largest corner radius (mm) a rounded-rectangle pad may get.
pub const ROUNDRECT_MAX_RADIUS: f64 = 0.25;

/// Copper shape of a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadShape {
    /// Circular pad.
    Circle,
    /// Oval/oblong pad.
    Oval,
    /// Rectangular pad.
    Rect,
    /// Rectangle with rounded corners.
    RoundRect,
}

impl PadShape {
    /// Returns the KiCad shape keyword.
    #[must_use]
    pub const fn kicad_name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Oval => "oval",
            Self::Rect => "rect",
            Self::RoundRect => "roundrect",
        }
    }
}

/// Plating of a drilled pad, which also selects its layer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadKind {
    /// Plated through-hole.
    ThroughHole,
    /// Non-plated through-hole (mounting/alignment holes).
    NonPlatedThroughHole,
}

impl PadKind {
    /// Returns the KiCad pad type keyword.
    #[must_use]
    pub const fn kicad_name(self) -> &'static str {
        match self {
            Self::ThroughHole => "thru_hole",
            Self::NonPlatedThroughHole => "np_thru_hole",
        }
    }

    /// Returns the layers the pad occupies.
    #[must_use]
    pub const fn layers(self) -> &'static [&'static str] {
        match self {
            Self::ThroughHole | Self::NonPlatedThroughHole => &["*.Cu", "*.Mask"],
        }
    }
}

/// Pad designator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PadNumber {
    /// Numbered pin.
    Number(u32),
    /// Named pin, e.g. `T` (tip) or `G` (ground).
    Name(String),
    /// No designator (mechanical holes).
    Unnumbered,
}

impl PadNumber {
    /// Creates a named designator.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl From<u32> for PadNumber {
    fn from(n: u32) -> Self {
        Self::Number(n)
    }
}

impl fmt::Display for PadNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(name) => f.write_str(name),
            Self::Unnumbered => Ok(()),
        }
    }
}

/// Calculated pad size and shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadGeometry {
    /// Pad size along the pitch direction (mm).
    pub width: f64,
    /// Pad size across the pitch direction (mm).
    pub height: f64,
    /// Drill diameter (mm).
    pub drill: f64,
    /// Circle when width and height coincide, oval otherwise.
    pub shape: PadShape,
}

impl PadGeometry {
    /// Derives the pad size from pitch, clearance, drill and annular-ring bounds.
    ///
    /// The width starts at `pitch - pad_to_pad_clearance`. It is widened to
    /// `drill + 2 * min_annular_ring` if the ring would be too thin, and only
    /// then narrowed to `drill + 2 * max_annular_ring` if the ring would be too
    /// wide. The height is always `drill + 2 * max_annular_ring`.
    ///
    /// Callers must keep `min_annular_ring <= max_annular_ring`; the bounds are
    /// not checked.
    ///
    /// # Examples
    ///
    /// ```
    /// use connector_footprints::geometry::{PadGeometry, PadShape};
    ///
    /// let pad = PadGeometry::calculate(2.54, 0.8, 1.2, 0.15, 0.5);
    /// assert!((pad.width - 1.74).abs() < 1e-9);
    /// assert!((pad.height - 2.2).abs() < 1e-9);
    /// assert_eq!(pad.shape, PadShape::Oval);
    /// ```
    #[must_use]
    pub fn calculate(
        pitch: f64,
        pad_to_pad_clearance: f64,
        drill: f64,
        min_annular_ring: f64,
        max_annular_ring: f64,
    ) -> Self {
        let mut width = pitch - pad_to_pad_clearance;
        let height = 2.0f64.mul_add(max_annular_ring, drill);

        if width - drill < 2.0 * min_annular_ring {
            width = 2.0f64.mul_add(min_annular_ring, drill);
        }
        if width - drill > 2.0 * max_annular_ring {
            width = 2.0f64.mul_add(max_annular_ring, drill);
        }

        #[allow(clippy::float_cmp)] // exact match selects the round pad
        let shape = if width == height {
            PadShape::Circle
        } else {
            PadShape::Oval
        };

        Self {
            width,
            height,
            drill,
            shape,
        }
    }

    /// A round pad with a uniform annular ring.
    #[must_use]
    pub fn circular(drill: f64, annular_ring: f64) -> Self {
        let size = 2.0f64.mul_add(annular_ring, drill);
        Self {
            width: size,
            height: size,
            drill,
            shape: PadShape::Circle,
        }
    }

    /// Returns the annular ring across the width.
    #[must_use]
    pub fn width_ring(&self) -> f64 {
        (self.width - self.drill) / 2.0
    }
}

/// A single pad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadSpec {
    /// Designator.
    pub number: PadNumber,
    /// Pad centre (mm).
    pub position: Point,
    /// Copper shape.
    pub shape: PadShape,
    /// Size in x (mm).
    pub width: f64,
    /// Size in y (mm).
    pub height: f64,
    /// Drill diameter (mm).
    pub drill: f64,
    /// Plated or non-plated.
    pub kind: PadKind,
}

impl PadSpec {
    /// Creates a plated through-hole pad from a calculated geometry.
    #[must_use]
    pub fn through_hole(number: impl Into<PadNumber>, position: Point, geometry: &PadGeometry) -> Self {
        Self {
            number: number.into(),
            position,
            shape: geometry.shape,
            width: geometry.width,
            height: geometry.height,
            drill: geometry.drill,
            kind: PadKind::ThroughHole,
        }
    }

    /// Creates an unnumbered non-plated hole sized to its drill.
    #[must_use]
    pub const fn npth(position: Point, drill: f64) -> Self {
        Self {
            number: PadNumber::Unnumbered,
            position,
            shape: PadShape::Circle,
            width: drill,
            height: drill,
            drill,
            kind: PadKind::NonPlatedThroughHole,
        }
    }

    /// Corner radius ratio used for rounded-rectangle pads.
    ///
    /// The default ratio is reduced so the radius never exceeds
    /// [`ROUNDRECT_MAX_RADIUS`].
    #[must_use]
    pub fn roundrect_ratio(&self) -> f64 {
        let shortest = self.width.min(self.height);
        if shortest <= 0.0 {
            return ROUNDRECT_RADIUS_RATIO;
        }
        ROUNDRECT_RADIUS_RATIO.min(ROUNDRECT_MAX_RADIUS / shortest)
    }
}

/// A straight run of equally spaced pads.
///
/// Multi-row headers are built from one array per row; interleaved numbering
/// comes from `initial` and `increment` rather than from a 2D grid.
#[derive(Debug, Clone)]
pub struct PadArray {
    start: Point,
    spacing: Point,
    count: u32,
    initial: u32,
    increment: u32,
    geometry: PadGeometry,
    first_pad_shape: Option<PadShape>,
}

impl PadArray {
    /// Creates an array of `count` pads starting at `start`, numbered from 1.
    #[must_use]
    pub const fn new(start: Point, count: u32, geometry: PadGeometry) -> Self {
        Self {
            start,
            spacing: Point::new(0.0, 0.0),
            count,
            initial: 1,
            increment: 1,
            geometry,
            first_pad_shape: None,
        }
    }

    /// Sets the spacing along x.
    #[must_use]
    pub const fn x_spacing(mut self, spacing: f64) -> Self {
        self.spacing.x = spacing;
        self
    }

    /// Sets the spacing along y.
    #[must_use]
    pub const fn y_spacing(mut self, spacing: f64) -> Self {
        self.spacing.y = spacing;
        self
    }

    /// Sets the number of the first pad.
    #[must_use]
    pub const fn initial(mut self, initial: u32) -> Self {
        self.initial = initial;
        self
    }

    /// Sets the step between consecutive pad numbers.
    #[must_use]
    pub const fn increment(mut self, increment: u32) -> Self {
        self.increment = increment;
        self
    }

    /// Overrides the shape of the first pad (pin-1 marker).
    #[must_use]
    pub const fn first_pad_shape(mut self, shape: Option<PadShape>) -> Self {
        self.first_pad_shape = shape;
        self
    }

    /// Places the pads.
    #[must_use]
    pub fn build(&self) -> Vec<PadSpec> {
        (0..self.count)
            .map(|i| {
                let step = f64::from(i);
                let position = Point::new(
                    self.spacing.x.mul_add(step, self.start.x),
                    self.spacing.y.mul_add(step, self.start.y),
                );
                let mut pad = PadSpec::through_hole(
                    self.initial + i * self.increment,
                    position,
                    &self.geometry,
                );
                if i == 0 {
                    if let Some(shape) = self.first_pad_shape {
                        pad.shape = shape;
                    }
                }
                pad
            })
            .collect()
    }
}
