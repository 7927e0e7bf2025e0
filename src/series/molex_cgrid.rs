//! Molex C-Grid shrouded two-row vertical header (70246).
//!
//! Odd pins sit in the row at y = 0, even pins in the row above at
//! y = -pitch. The housing extends 5.08 mm past the outer columns and has a
//! polarising latch slot centred in the bottom wall.

use tracing::debug;

use crate::config::{Configuration, Orientation};
use crate::error::GeneratorError;
use crate::footprint::{add_text_fields, CourtyardSpan, Footprint, InsidePosition};
use crate::geometry::{
    outline::{pin1_silk_bar, pin1_triangle, PIN1_MARKER_SIZE},
    BodyEdges, Landmark, Layer, MarkerDirection, Point, PolygonLine,
};
use crate::naming::{format_template, FormatArg};
use crate::series::{
    attach_model, molex_description, reject_series_number, series_library_name, unsupported, FootprintGenerator,
    HeaderPads, NameParts, Variant,
};

const NAME: &str = "molex_cgrid";
const SERIES: &str = "C-Grid";
const SERIES_LONG: &str = "C-Grid Connector Products";
const MANUFACTURER: &str = "Molex";
const DATASHEET: &str = "https://www.molex.com/pdm_docs/sd/702460801_sd.pdf";
const ROWS: u32 = 2;

/// Supported total pin counts.
pub const PIN_COUNTS: [u32; 11] = [8, 10, 12, 14, 16, 20, 24, 26, 30, 34, 40];

const PADS: HeaderPads = HeaderPads {
    pitch: 2.54,
    drill: 1.14,
    pad_to_pad_clearance: 0.8,
    min_annular_ring: 0.15,
    max_annular_ring: 0.5,
};

/// Shroud wall thickness (mm).
const WALL: f64 = 2.54 / 2.0;

/// Housing overhang past the outer pin columns (mm).
const END_OVERHANG: f64 = 5.08;

/// Housing depth across the rows (mm).
const BODY_DEPTH: f64 = 8.89;

/// Width of the polarising latch slot (mm).
const LATCH_WIDTH: f64 = 4.11;

/// Generator for the 70246 shrouded header.
#[derive(Debug, Default)]
pub struct MolexCGrid;

impl MolexCGrid {
    /// Creates the generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Measured housing for a header with `pins_per_row` columns.
    #[must_use]
    pub fn body_edges(pins_per_row: u32) -> BodyEdges {
        let end_x = PADS.pitch * f64::from(pins_per_row.saturating_sub(1));
        let centre_x = end_x / 2.0;
        BodyEdges::new(
            -END_OVERHANG,
            end_x + END_OVERHANG,
            -BODY_DEPTH / 2.0 - WALL,
            BODY_DEPTH / 2.0 - WALL,
        )
        .with_latch(centre_x - LATCH_WIDTH / 2.0, centre_x + LATCH_WIDTH / 2.0)
    }
}

/// Silkscreen trace of the shroud interior and latch opening.
///
/// Starts and ends on the inner bottom wall so the latch gap stays open.
fn slot_outline(edges: &BodyEdges, nudge: f64, width: f64) -> Result<PolygonLine, GeneratorError> {
    let ys1 = edges.top - nudge;
    let ys2 = ys1 + WALL;
    let ys4 = edges.bottom + nudge;
    let ys3 = ys4 - WALL;

    let xs1 = edges.left - nudge;
    let xs2 = xs1 + WALL;
    let xs3 = edges.get(Landmark::LatchLeft)? + nudge;
    let xs4 = edges.get(Landmark::LatchRight)? - nudge;
    let xs6 = edges.right + nudge;
    let xs5 = xs6 - WALL;

    Ok(PolygonLine::new(
        [
            (xs3, ys3),
            (xs3, ys4),
            (xs1, ys4),
            (xs1, ys1),
            (xs6, ys1),
            (xs6, ys4),
            (xs4, ys4),
            (xs4, ys3),
            (xs5, ys3),
            (xs5, ys2),
            (xs2, ys2),
            (xs2, ys3),
            (xs3, ys3),
            (xs4, ys3),
        ],
        Layer::FrontSilkscreen,
        width,
    ))
}

impl FootprintGenerator for MolexCGrid {
    fn name(&self) -> &'static str {
        NAME
    }

    fn variants(&self) -> Vec<Variant> {
        PIN_COUNTS.iter().copied().map(Variant::pins).collect()
    }

    fn generate(&self, variant: &Variant, config: &Configuration) -> Result<Footprint, GeneratorError> {
        reject_series_number(variant)?;
        let pin_count = variant.pin_count;
        if pin_count < 4 || pin_count % 2 != 0 {
            return Err(unsupported(NAME, pin_count));
        }
        let pins_per_row = pin_count / ROWS;

        let pin_arg = [("n", FormatArg::from(pin_count))];
        let mpn = format_template("70246-{n:02d}01", &pin_arg)?;
        let new_mpn = format_template("70246{n:02d}01", &pin_arg)?;

        let parts = NameParts {
            man: MANUFACTURER,
            series: SERIES,
            mpn: &mpn,
            num_rows: ROWS,
            pins_per_row,
            mounting_pad: "",
            pitch: PADS.pitch,
            orientation: Orientation::Vertical,
        };
        let name = parts.footprint_name(config)?;
        let library = series_library_name(config, MANUFACTURER, SERIES)?;
        debug!(footprint = %name, pins = pin_count, "Generating C-Grid header");

        let mut fp = Footprint::new(name, library.clone());
        fp.description = molex_description(SERIES_LONG, &mpn, &new_mpn, pin_count, DATASHEET);
        fp.tags = parts.tags(config)?;

        let nudge = config.silk_fab_offset;
        let silk_w = config.silk_line_width;
        let fab_w = config.fab_line_width;

        let edges = Self::body_edges(pins_per_row);
        edges.require(&[Landmark::LatchLeft, Landmark::LatchRight])?;

        // Two interleaved rows; only pin 1 carries the marker shape.
        fp.add_pads(
            PADS.row(Point::new(0.0, 0.0), pins_per_row)
                .increment(2)
                .first_pad_shape(Some(config.pad1_shape()))
                .build(),
        );
        fp.add_pads(
            PADS.row(Point::new(0.0, -PADS.pitch), pins_per_row)
                .initial(2)
                .increment(2)
                .build(),
        );

        fp.add_line(edges.fab_rect(fab_w));
        fp.add_line(edges.silk_open_bottom(nudge, silk_w));
        fp.add_line(pin1_silk_bar(edges.left, silk_w));
        fp.add_line(pin1_triangle(
            Point::new(edges.left, 0.0),
            PIN1_MARKER_SIZE,
            MarkerDirection::Right,
            fab_w,
        ));
        fp.add_line(slot_outline(&edges, nudge, silk_w)?);

        let crtyd = config.connector_courtyard()?;
        let cx1 = crtyd.outward_min(edges.left);
        let cy1 = crtyd.outward_min(edges.top);
        let cx2 = crtyd.outward_min(edges.get(Landmark::LatchLeft)?);
        let cy2 = crtyd.outward_max(edges.bottom);
        let cx3 = crtyd.outward_max(edges.get(Landmark::LatchRight)?);
        let cx4 = crtyd.outward_max(edges.right);
        fp.add_line(crtyd.polyline([
            (cx1, cy1),
            (cx1, cy2),
            (cx2, cy2),
            (cx3, cy2),
            (cx4, cy2),
            (cx4, cy1),
            (cx1, cy1),
        ]));

        add_text_fields(&mut fp, config, &edges, CourtyardSpan::new(cy1, cy2), InsidePosition::Top)?;
        attach_model(&mut fp, config, &library);
        Ok(fp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_configuration;
    use crate::geometry::{PadNumber, PadShape};

    const TOLERANCE: f64 = 1e-9;

    fn ten_pin() -> Footprint {
        MolexCGrid::new()
            .generate(&Variant::pins(10), &test_configuration())
            .unwrap()
    }

    #[test]
    fn rows_are_interleaved() {
        let fp = ten_pin();
        assert_eq!(fp.pads.len(), 10);
        for pad in &fp.pads {
            let PadNumber::Number(n) = pad.number else {
                panic!("unexpected pad {:?}", pad.number);
            };
            let column = f64::from((n - 1) / 2);
            assert!((pad.position.x - 2.54 * column).abs() < TOLERANCE);
            let expected_y = if n % 2 == 1 { 0.0 } else { -2.54 };
            assert!((pad.position.y - expected_y).abs() < TOLERANCE, "pad {n}");
        }
    }

    #[test]
    fn only_pin_one_is_marked() {
        let fp = ten_pin();
        let marked: Vec<_> = fp.pads.iter().filter(|p| p.shape == PadShape::RoundRect).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].number, PadNumber::Number(1));
        assert!(fp.pads.iter().skip(1).all(|p| p.shape == PadShape::Oval));
    }

    #[test]
    fn fab_spans_overhang() {
        let fp = ten_pin();
        let fab = fp.lines_on(Layer::FrontFab).next().unwrap();
        let (x0, y0, x1, y1) = fab.bounds().unwrap();
        assert!((x0 + 5.08).abs() < TOLERANCE);
        assert!((x1 - (4.0 * 2.54 + 5.08)).abs() < TOLERANCE);
        assert!((y0 + 5.715).abs() < TOLERANCE);
        assert!((y1 - 3.175).abs() < TOLERANCE);
    }

    #[test]
    fn slot_and_courtyard_shapes() {
        let fp = ten_pin();
        let slot = fp
            .lines_on(Layer::FrontSilkscreen)
            .find(|l| l.points.len() == 14)
            .expect("slot outline");
        assert_eq!(slot.points.first(), slot.points.get(12));

        let courtyard = fp.lines_on(Layer::FrontCourtyard).next().unwrap();
        assert_eq!(courtyard.points.len(), 7);
        assert!(courtyard.is_closed());
        let (x0, y0, _, y1) = courtyard.bounds().unwrap();
        assert!((x0 + 5.58).abs() < 1e-6);
        assert!((y0 + 6.22).abs() < 1e-6);
        assert!((y1 - 3.68).abs() < 1e-6);
    }

    #[test]
    fn naming_and_library() {
        let fp = ten_pin();
        assert_eq!(fp.name, "Molex_C-Grid_70246-1001_2x05_P2.54mm_Vertical");
        assert_eq!(fp.library, "Connector_Molex");
        assert!(fp.description.contains("702461001"));
        assert_eq!(
            fp.model.as_ref().unwrap().path,
            "${KISYS3DMOD}/Connector_Molex.3dshapes/Molex_C-Grid_70246-1001_2x05_P2.54mm_Vertical.wrl"
        );
    }

    #[test]
    fn empty_row_body_does_not_underflow() {
        let edges = MolexCGrid::body_edges(0);
        assert!((edges.left + 5.08).abs() < TOLERANCE);
        assert!((edges.right - 5.08).abs() < TOLERANCE);
    }

    #[test]
    fn series_number_is_rejected() {
        let err = MolexCGrid::new()
            .generate(&Variant::series(70246, 10), &test_configuration())
            .unwrap_err();
        assert!(matches!(err, GeneratorError::UnsupportedSeries { series: 70246 }));
    }

    #[test]
    fn odd_pin_count_is_rejected() {
        let err = MolexCGrid::new()
            .generate(&Variant::pins(9), &test_configuration())
            .unwrap_err();
        assert!(matches!(err, GeneratorError::UnsupportedPinCount { pin_count: 9, .. }));
    }
}
