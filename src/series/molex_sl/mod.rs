//! Molex SL single-row modular headers.
//!
//! Housing measurements, slot templates and latch outlines shared by the
//! through-hole generator ([`tht`]) and the top-entry generator
//! ([`tht_top`]).

pub mod tht;
pub mod tht_top;

use crate::error::GeometryError;
use crate::geometry::outline::Courtyard;
use crate::geometry::{BodyEdges, CourtyardBuilder, Landmark, Layer, PolygonLine};
use crate::series::HeaderPads;

pub use tht::MolexSlTht;
pub use tht_top::MolexSlThtTop;

pub(crate) const SERIES: &str = "SL";
pub(crate) const SERIES_LONG: &str = "SL Modular Connectors";
pub(crate) const MANUFACTURER: &str = "Molex";

/// Smallest and largest pin count of the SL family.
pub const PIN_RANGE: std::ops::RangeInclusive<u32> = 2..=25;

pub(crate) const PADS: HeaderPads = HeaderPads {
    pitch: 2.54,
    drill: 1.2,
    pad_to_pad_clearance: 0.8,
    min_annular_ring: 0.15,
    max_annular_ring: 0.5,
};

/// Housing wall thickness (mm).
pub(crate) const WALL: f64 = 1.02;

/// Width of a keying slot (mm).
const SLOT_WIDTH: f64 = 1.25;

/// Width of the latch opening in the bottom wall (mm).
const LATCH_SLOT_WIDTH: f64 = 3.0;

/// Keying slot centre inset from the outer pins (mm).
const SLOT_CENTRE_OFFSET: f64 = 1.27;

/// Housing end beyond the outer pins, excluding the wall (mm).
const END_INSET: f64 = 1.525;

/// Narrower end inset of the two-pin housing (mm).
const END_INSET_TWO_PIN: f64 = 1.395;

/// Housing depth of the vertical parts (mm).
const VERTICAL_DEPTH: f64 = 5.08;

/// How far the latch protrudes below the vertical housing (mm).
const LATCH_PROTRUSION: f64 = 1.53;

/// Engineering part number suffix is `pin_count - 1` (3.30 mm tail, gold).
///
/// Saturates at zero for a zero pin count.
#[must_use]
pub const fn part_suffix(pin_count: u32) -> u32 {
    pin_count.saturating_sub(1)
}

/// Position of the last pin (mm); zero when there are no pins.
#[must_use]
pub fn end_x(pin_count: u32) -> f64 {
    PADS.pitch * f64::from(pin_count.saturating_sub(1))
}

/// Horizontal extent of the housing.
fn housing_x(pin_count: u32) -> (f64, f64) {
    let inset = if pin_count == 2 {
        END_INSET_TWO_PIN
    } else {
        END_INSET
    };
    (-(inset + WALL), end_x(pin_count) + inset + WALL)
}

/// Vertical housing with its latch.
///
/// The two-pin part has no separate latch; its latch spans the full body.
#[must_use]
pub fn vertical_body(pin_count: u32) -> BodyEdges {
    let (left, right) = housing_x(pin_count);
    let centre_x = end_x(pin_count) / 2.0;
    let (latch_left, latch_right) = if pin_count == 2 {
        (left, right)
    } else {
        let half = PADS.pitch * 3.0 / 2.0;
        (centre_x - half, centre_x + half)
    };
    BodyEdges::new(left, right, -VERTICAL_DEPTH / 2.0, VERTICAL_DEPTH / 2.0)
        .with_latch(latch_left, latch_right)
        .with_latch_bottom(VERTICAL_DEPTH / 2.0 + LATCH_PROTRUSION)
}

/// Horizontal housing with its tail (mm).
#[must_use]
pub fn horizontal_body(pin_count: u32) -> BodyEdges {
    const TOP: f64 = -13.21 + 0.64 / 2.0;
    const DEPTH: f64 = 13.59;
    const TAIL_LENGTH: f64 = 2.16;

    let (left, right) = housing_x(pin_count);
    let tail_inset = if pin_count == 2 { 0.51 } else { 1.02 };
    let bottom = TOP + DEPTH;
    BodyEdges::new(left, right, TOP, bottom).with_tail(left + tail_inset, right - tail_inset, bottom - TAIL_LENGTH)
}

/// Keying slot layout, chosen once per pin count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotTemplate {
    /// One centred slot, latch spanning the body.
    TwoPin,
    /// One slot inset from pin 1.
    ThreePin,
    /// Two slots inset from pins 1 and n.
    NOrMore,
}

impl SlotTemplate {
    /// Selects the template for a pin count.
    #[must_use]
    pub const fn for_pin_count(pin_count: u32) -> Self {
        match pin_count {
            2 => Self::TwoPin,
            3 => Self::ThreePin,
            _ => Self::NOrMore,
        }
    }
}

/// How latch outlines meet the body outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchStyle {
    /// Body outline left open at the bottom and joined to the latch with
    /// extra strokes.
    Joined,
    /// Latch drawn over a closed body outline.
    Overlay,
}

/// Silkscreen y levels of the slot and latch features.
#[derive(Debug, Clone, Copy)]
struct Levels {
    /// Outer top.
    ys1: f64,
    /// Inner top wall.
    ys2: f64,
    /// Inner bottom wall.
    ys3: f64,
    /// Outer bottom.
    ys4: f64,
    /// Latch outer bottom.
    yl2: f64,
    /// Latch inner bottom.
    yl3: f64,
}

impl Levels {
    fn new(edges: &BodyEdges, nudge: f64) -> Result<Self, GeometryError> {
        let ys1 = edges.top - nudge;
        let ys4 = edges.bottom + nudge;
        let yl2 = edges.get(Landmark::LatchBottom)? + nudge;
        Ok(Self {
            ys1,
            ys2: ys1 + WALL,
            ys3: ys4 - WALL,
            ys4,
            yl2,
            yl3: yl2 - WALL,
        })
    }
}

/// Silkscreen strokes of the slots and latch for a vertical SL housing.
///
/// # Errors
///
/// Returns [`GeometryError::MissingLandmark`] if the latch landmarks are unset.
pub fn slot_and_latch_outlines(
    pin_count: u32,
    edges: &BodyEdges,
    nudge: f64,
    width: f64,
    style: LatchStyle,
) -> Result<Vec<PolygonLine>, GeometryError> {
    let template = SlotTemplate::for_pin_count(pin_count);
    let levels = Levels::new(edges, nudge)?;
    let latch_left = edges.get(Landmark::LatchLeft)?;
    let latch_right = edges.get(Landmark::LatchRight)?;
    let start_x = 0.0;
    let end = end_x(pin_count);
    let centre_x = end / 2.0;

    let Levels {
        ys1,
        ys2,
        ys3,
        ys4,
        yl2,
        yl3,
    } = levels;

    let xs2 = edges.left - nudge + WALL;
    let xs3 = centre_x - LATCH_SLOT_WIDTH / 2.0;
    let xs4 = xs3 + LATCH_SLOT_WIDTH;
    let xs5 = edges.right + nudge - WALL;
    let (xs1, xs6) = match template {
        SlotTemplate::TwoPin => (centre_x - SLOT_WIDTH / 2.0, centre_x + SLOT_WIDTH / 2.0),
        SlotTemplate::ThreePin => (
            start_x + SLOT_CENTRE_OFFSET - SLOT_WIDTH / 2.0,
            start_x + SLOT_CENTRE_OFFSET + SLOT_WIDTH / 2.0,
        ),
        SlotTemplate::NOrMore => (
            start_x + SLOT_CENTRE_OFFSET - SLOT_WIDTH / 2.0,
            end - SLOT_CENTRE_OFFSET + SLOT_WIDTH / 2.0,
        ),
    };

    let mut slots = vec![
        (xs1, ys1),
        (xs1, ys2),
        (xs2, ys2),
        (xs2, ys3),
        (xs3, ys3),
        (xs3, ys4),
        (xs4, ys4),
        (xs4, ys3),
        (xs5, ys3),
        (xs5, ys2),
        (xs6, ys2),
        (xs6, ys1),
    ];
    if template == SlotTemplate::NOrMore {
        let xs7 = xs6 - SLOT_WIDTH;
        let xs8 = xs1 + SLOT_WIDTH;
        slots.extend([(xs7, ys1), (xs7, ys2), (xs8, ys2), (xs8, ys1)]);
    }

    let silk = |points: Vec<(f64, f64)>| PolygonLine::new(points, Layer::FrontSilkscreen, width);
    let mut lines = vec![silk(slots)];

    let xl1 = latch_left - nudge;
    let xl2 = latch_right + nudge;
    let (xl3, xl4) = match template {
        SlotTemplate::TwoPin => (xs2, xs5),
        SlotTemplate::ThreePin | SlotTemplate::NOrMore => (latch_left + WALL + nudge, latch_right - WALL - nudge),
    };

    match style {
        LatchStyle::Overlay => {
            lines.push(silk(vec![(xl1, ys4), (xl1, yl2), (xl2, yl2), (xl2, ys4)]));
            lines.push(silk(vec![(xl3, ys4), (xl3, yl3), (xl4, yl3), (xl4, ys4)]));
        }
        LatchStyle::Joined => {
            // The inner cutout starts at the inner wall.
            let yl1 = ys3;
            if template == SlotTemplate::TwoPin {
                lines.push(silk(vec![(xl1, yl1), (xl1, yl2), (xl2, yl2), (xl2, yl1)]));
            } else {
                lines.push(silk(vec![(xl1, ys4), (xl1, yl2), (xl2, yl2), (xl2, ys4)]));
                lines.push(silk(vec![(edges.left - nudge, ys4), (xl1, ys4)]));
                lines.push(silk(vec![(edges.right + nudge, ys4), (xl2, ys4)]));
            }
            lines.push(silk(vec![(xl3, yl1), (xl3, yl3), (xl4, yl3), (xl4, yl1)]));
            lines.push(silk(vec![(xl3, ys4), (xs3, ys4)]));
            lines.push(silk(vec![(xl4, ys4), (xs4, ys4)]));
        }
    }
    Ok(lines)
}

/// Extent of the courtyard notch below the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Notch {
    /// Left side x.
    pub left: f64,
    /// Right side x.
    pub right: f64,
    /// Lowest y the notch reaches.
    pub bottom: f64,
}

impl Notch {
    /// Notch around the latch of a vertical housing.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::MissingLandmark`] if the latch is unset.
    pub fn latch(edges: &BodyEdges) -> Result<Self, GeometryError> {
        Ok(Self {
            left: edges.get(Landmark::LatchLeft)?,
            right: edges.get(Landmark::LatchRight)?,
            bottom: edges.get(Landmark::LatchBottom)?,
        })
    }

    /// Degenerate notch spanning the whole bottom edge.
    #[must_use]
    pub const fn flush(edges: &BodyEdges) -> Self {
        Self {
            left: edges.left,
            right: edges.right,
            bottom: edges.bottom,
        }
    }
}

/// Nine-vertex courtyard with a notch below the body.
///
/// The returned bottom is the notch bottom, which text placement uses.
#[must_use]
pub fn notched_courtyard(builder: &CourtyardBuilder, edges: &BodyEdges, notch: Notch) -> Courtyard {
    let cx1 = builder.outward_min(edges.left);
    let cy1 = builder.outward_min(edges.top);
    let cy2 = builder.outward_max(edges.bottom);
    let cx2 = builder.outward_min(notch.left);
    let cx3 = builder.outward_max(notch.right);
    let cy3 = builder.outward_max(notch.bottom);
    let cx4 = builder.outward_max(edges.right);

    Courtyard {
        outline: builder.polyline([
            (cx1, cy1),
            (cx1, cy2),
            (cx2, cy2),
            (cx2, cy3),
            (cx3, cy3),
            (cx3, cy2),
            (cx4, cy2),
            (cx4, cy1),
            (cx1, cy1),
        ]),
        top: cy1,
        bottom: cy3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn template_selection() {
        assert_eq!(SlotTemplate::for_pin_count(2), SlotTemplate::TwoPin);
        assert_eq!(SlotTemplate::for_pin_count(3), SlotTemplate::ThreePin);
        for n in 4..=25 {
            assert_eq!(SlotTemplate::for_pin_count(n), SlotTemplate::NOrMore);
        }
    }

    #[test]
    fn zero_pins_do_not_underflow() {
        assert_eq!(part_suffix(0), 0);
        assert!(end_x(0).abs() < TOLERANCE);
        assert_eq!(part_suffix(4), 3);
        assert!((end_x(4) - 3.0 * 2.54).abs() < TOLERANCE);
    }

    #[test]
    fn two_pin_housing_is_narrower() {
        let two = vertical_body(2);
        assert!((two.left + 2.415).abs() < TOLERANCE);
        assert_eq!(two.latch_left, Some(two.left));
        assert_eq!(two.latch_right, Some(two.right));

        let four = vertical_body(4);
        assert!((four.left + 2.545).abs() < TOLERANCE);
        let centre = 3.0 * 2.54 / 2.0;
        assert!((four.latch_left.unwrap() - (centre - 3.81)).abs() < TOLERANCE);
        assert!((four.latch_bottom.unwrap() - 4.07).abs() < TOLERANCE);
    }

    #[test]
    fn horizontal_tail() {
        let body = horizontal_body(5);
        assert!((body.top + 12.89).abs() < TOLERANCE);
        assert!((body.bottom - 0.7).abs() < 1e-9);
        assert!((body.tail_top.unwrap() - (0.7 - 2.16)).abs() < 1e-9);
        assert!((body.tail_left.unwrap() - (body.left + 1.02)).abs() < TOLERANCE);

        let two = horizontal_body(2);
        assert!((two.tail_right.unwrap() - (two.right - 0.51)).abs() < TOLERANCE);
    }

    #[test]
    fn slot_vertex_counts() {
        for (pins, vertices) in [(2, 12), (3, 12), (4, 16), (25, 16)] {
            let lines = slot_and_latch_outlines(pins, &vertical_body(pins), 0.11, 0.12, LatchStyle::Overlay).unwrap();
            assert_eq!(lines[0].points.len(), vertices, "{pins} pins");
            assert_eq!(lines.len(), 3);
        }
    }

    #[test]
    fn joined_latch_adds_strokes() {
        let two = slot_and_latch_outlines(2, &vertical_body(2), 0.11, 0.12, LatchStyle::Joined).unwrap();
        assert_eq!(two.len(), 5);
        let many = slot_and_latch_outlines(6, &vertical_body(6), 0.11, 0.12, LatchStyle::Joined).unwrap();
        assert_eq!(many.len(), 7);
        assert!(many.iter().all(|l| l.layer == Layer::FrontSilkscreen));
    }

    #[test]
    fn latch_required() {
        let edges = BodyEdges::new(-2.0, 2.0, -2.54, 2.54);
        let err = slot_and_latch_outlines(4, &edges, 0.11, 0.12, LatchStyle::Overlay).unwrap_err();
        assert_eq!(
            err,
            GeometryError::MissingLandmark {
                landmark: Landmark::LatchBottom
            }
        );
    }

    #[test]
    fn courtyard_notch() {
        let builder = CourtyardBuilder::new(0.5, 0.01, 0.05);
        let edges = vertical_body(4);
        let courtyard = notched_courtyard(&builder, &edges, Notch::latch(&edges).unwrap());
        assert_eq!(courtyard.outline.points.len(), 9);
        assert!(courtyard.outline.is_closed());
        assert!((courtyard.bottom - 4.57).abs() < 1e-6);
        assert!((courtyard.top + 3.04).abs() < 1e-6);
    }
}
