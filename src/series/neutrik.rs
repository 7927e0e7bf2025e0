//! Neutrik NCJ6FA-H combo XLR / 1/4" jack, horizontal PCB mount.
//!
//! A single fixed footprint. Datasheet coordinates are measured from the
//! jack centre at the bulkhead; they are shifted so pin 1 lands on the
//! origin.

use tracing::debug;

use crate::config::{Configuration, Orientation};
use crate::error::GeneratorError;
use crate::footprint::{add_text_fields, CourtyardSpan, Footprint, InsidePosition, TextField};
use crate::geometry::outline::{pin1_triangle, PIN1_MARKER_SIZE};
use crate::geometry::{BodyEdges, Layer, MarkerDirection, PadGeometry, PadNumber, PadSpec, Point, PolygonLine};
use crate::naming::{format_template, FormatArg};
use crate::series::{
    attach_model, category_library_name, reject_series_number, unsupported, FootprintGenerator, NameParts, Variant,
};

const NAME: &str = "neutrik_ncj6fah";
const SERIES: &str = "Combo-A";
const SERIES_LONG: &str = "Combo A Series";
const MANUFACTURER: &str = "Neutrik";
const MPN: &str = "NCJ6FA-H";
const DATASHEET: &str = "https://www.neutrik.com/en/product/ncj6fa-h";
const CATEGORY: &str = "Audio";

/// Electrical pads; the three mounting holes are not counted.
pub const PIN_COUNT: u32 = 8;

const DRILL_SMALL: f64 = 1.2;
const DRILL_LARGE: f64 = 1.6;
const RING_SMALL: f64 = 0.25;
const RING_LARGE: f64 = 0.35;

/// Shift from datasheet coordinates to footprint coordinates (mm).
const X_OFFSET: f64 = -13.97 / 2.0;
const Y_OFFSET: f64 = 18.415;

const FLANGE_WIDTH: f64 = 25.0;
const BODY_WIDTH: f64 = 22.0;
const FACE_WIDTH: f64 = 15.5;
const LENGTH_TO_BULKHEAD: f64 = 24.5;
const OVERHANG: f64 = 5.7;
const FLANGE_DEPTH: f64 = 6.25;
const SHELL_DEPTH: f64 = 3.4;

/// Pin-1 marker inset from the flange edge (mm).
const MARKER_INSET: f64 = 3.5;

/// Overhang of the bulkhead line past the flange (mm).
const BULKHEAD_OVERHANG: f64 = 5.0;

/// Generator for the NCJ6FA-H.
#[derive(Debug, Default)]
pub struct NeutrikNcj6fah;

impl NeutrikNcj6fah {
    /// Creates the generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Flange and body extent.
    #[must_use]
    pub fn body_edges() -> BodyEdges {
        BodyEdges::new(
            -FLANGE_WIDTH / 2.0 - X_OFFSET,
            FLANGE_WIDTH / 2.0 - X_OFFSET,
            -OVERHANG - Y_OFFSET,
            LENGTH_TO_BULKHEAD - Y_OFFSET,
        )
    }

    /// Pads in datasheet order.
    #[must_use]
    pub fn pads() -> Vec<PadSpec> {
        let small = PadGeometry::circular(DRILL_SMALL, RING_SMALL);
        let large = PadGeometry::circular(DRILL_LARGE, RING_LARGE);
        let at = |x: f64, y: f64| Point::new(x - X_OFFSET, y - Y_OFFSET);

        let plated: [(PadNumber, (f64, f64), &PadGeometry); 8] = [
            (1.into(), (-6.985, 18.415), &small),
            (2.into(), (6.985, 19.05), &small),
            (3.into(), (0.0, 23.495), &small),
            (PadNumber::name("T"), (-4.445, 15.875), &large),
            (PadNumber::name("T"), (4.445, 15.875), &large),
            (PadNumber::name("R"), (2.8575, 22.876), &small),
            (PadNumber::name("S"), (-2.8575, 22.876), &small),
            (PadNumber::name("G"), (-8.255, 6.985), &large),
        ];
        let holes = [(-5.715, 6.35), (5.715, 6.35), (0.0, 9.525)];

        plated
            .into_iter()
            .map(|(number, (x, y), geometry)| PadSpec::through_hole(number, at(x, y), geometry))
            .chain(holes.into_iter().map(|(x, y)| PadSpec::npth(at(x, y), DRILL_LARGE)))
            .collect()
    }
}

impl FootprintGenerator for NeutrikNcj6fah {
    fn name(&self) -> &'static str {
        NAME
    }

    fn variants(&self) -> Vec<Variant> {
        vec![Variant::pins(PIN_COUNT)]
    }

    fn generate(&self, variant: &Variant, config: &Configuration) -> Result<Footprint, GeneratorError> {
        reject_series_number(variant)?;
        if variant.pin_count != PIN_COUNT {
            return Err(unsupported(NAME, variant.pin_count));
        }

        let orientation = Orientation::Horizontal;
        let orientation_label = config.orientation_label(orientation)?;
        let name = format_template(
            "Jack_Combo_{man:s}_{mpn:s}_{orientation:s}",
            &[
                ("man", FormatArg::from(MANUFACTURER)),
                ("mpn", FormatArg::from(MPN)),
                ("orientation", FormatArg::from(orientation_label)),
            ],
        )?;
        let library = category_library_name(config, CATEGORY)?;
        debug!(footprint = %name, "Generating Neutrik combo jack");

        let parts = NameParts {
            man: MANUFACTURER,
            series: SERIES,
            mpn: MPN,
            num_rows: 1,
            pins_per_row: PIN_COUNT,
            mounting_pad: "",
            pitch: 0.0,
            orientation,
        };
        let mut fp = Footprint::new(name, library.clone());
        fp.description = format!(
            "Neutrik {SERIES_LONG}, part number: {MPN}, 3 pole XLR female receptacle with 1/4\" stereo jack, \
             {orientation_label} PCB mount ({DATASHEET}), generated with connector-footprints"
        );
        fp.tags = parts.tags(config)?;
        fp.add_pads(Self::pads());

        let nudge = config.silk_fab_offset;
        let silk_w = config.silk_line_width;
        let fab_w = config.fab_line_width;
        let edges = Self::body_edges();

        let y_flange_top = -Y_OFFSET;
        let y_flange_bottom = y_flange_top + FLANGE_DEPTH;
        let y_shell_top = y_flange_top - SHELL_DEPTH;
        let x_face_left = -FACE_WIDTH / 2.0 - X_OFFSET;
        let x_face_right = FACE_WIDTH / 2.0 - X_OFFSET;
        let x_body_left = -BODY_WIDTH / 2.0 - X_OFFSET;
        let x_body_right = BODY_WIDTH / 2.0 - X_OFFSET;
        let x_flange_left = edges.left;
        let x_flange_right = edges.right;

        // Only the part behind the bulkhead is on the board.
        fp.add_line(PolygonLine::new(
            [
                (x_flange_right + nudge, y_flange_top),
                (x_flange_right + nudge, y_flange_bottom + nudge),
                (x_body_right + nudge, y_flange_bottom + nudge),
                (x_body_right + nudge, edges.bottom + nudge),
                (x_body_left - nudge, edges.bottom + nudge),
                (x_body_left - nudge, y_flange_bottom + nudge),
                (x_flange_left - nudge, y_flange_bottom + nudge),
                (x_flange_left - nudge, y_flange_top),
            ],
            Layer::FrontSilkscreen,
            silk_w,
        ));
        fp.add_line(PolygonLine::new(
            [
                (x_body_left, edges.bottom),
                (x_body_left, y_flange_bottom),
                (x_flange_left, y_flange_bottom),
                (x_flange_left, y_flange_top),
                (x_body_left, y_flange_top),
                (x_body_left, y_shell_top),
                (x_body_right, y_shell_top),
                (x_body_right, y_flange_top),
                (x_flange_right, y_flange_top),
                (x_flange_right, y_flange_bottom),
                (x_body_right, y_flange_bottom),
                (x_body_right, edges.bottom),
                (x_body_left, edges.bottom),
            ],
            Layer::FrontFab,
            fab_w,
        ));
        fp.add_line(PolygonLine::new(
            [
                (x_face_left, y_shell_top),
                (x_face_left, edges.top),
                (x_face_right, edges.top),
                (x_face_right, y_shell_top),
            ],
            Layer::FrontFab,
            fab_w,
        ));

        fp.add_line(PolygonLine::line(
            (x_flange_left - BULKHEAD_OVERHANG, y_flange_top),
            (x_flange_right + BULKHEAD_OVERHANG, y_flange_top),
            Layer::UserDrawings,
            config.courtyard_line_width,
        ));
        fp.add_text(TextField::user(
            "Bulkhead",
            Point::new(x_flange_left - 2.5, y_flange_top - 0.5),
            Layer::UserDrawings,
            [0.5, 0.5],
            0.075,
        ));

        fp.add_line(pin1_triangle(
            Point::new(edges.left + MARKER_INSET, 0.0),
            PIN1_MARKER_SIZE,
            MarkerDirection::Right,
            fab_w,
        ));

        let courtyard = config.connector_courtyard()?.rect(&edges);
        let span = CourtyardSpan::new(courtyard.top, courtyard.bottom);
        fp.add_line(courtyard.outline);

        add_text_fields(&mut fp, config, &edges, span, InsidePosition::Center)?;
        attach_model(&mut fp, config, &library);
        Ok(fp)
    }
}
