//! Molex SL single-row through-hole headers, vertical and right-angle.
//!
//! Footprints go to a `<lib>_custom` library; the 3D model path still
//! points at the regular library.

use tracing::debug;

use crate::config::{Configuration, Orientation};
use crate::error::GeneratorError;
use crate::footprint::{add_text_fields, CourtyardSpan, Footprint, InsidePosition};
use crate::geometry::outline::{pin1_silk_bar, pin1_triangle, PIN1_MARKER_SIZE};
use crate::geometry::{BodyEdges, Landmark, Layer, MarkerDirection, Point, PolygonLine};
use crate::naming::{format_template, FormatArg};
use crate::series::molex_sl::{
    horizontal_body, notched_courtyard, part_suffix, slot_and_latch_outlines, vertical_body, LatchStyle, Notch,
    MANUFACTURER, PADS, PIN_RANGE, SERIES, SERIES_LONG,
};
use crate::series::{
    attach_model, molex_description, series_library_name, unsupported, FootprintGenerator, NameParts, Variant,
};

const NAME: &str = "molex_sl";

/// Vertical series sharing the 70543 footprint.
pub const VERTICAL_SERIES: [u32; 4] = [70543, 70541, 70545, 74099];

/// Right-angle series sharing the 70553 footprint.
pub const HORIZONTAL_SERIES: [u32; 4] = [70553, 70551, 70555, 70634];

/// Series generated by default.
pub const DEFAULT_SERIES: [u32; 2] = [70543, 70553];

/// Suffix of the output library.
const CUSTOM_SUFFIX: &str = "_custom";

/// Distance of the right-angle pin-1 marker above the tail (mm).
const HORIZONTAL_MARKER_GAP: f64 = 1.0;

/// Generator for SL through-hole headers.
#[derive(Debug, Default)]
pub struct MolexSlTht;

impl MolexSlTht {
    /// Creates the generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Orientation of a series.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::UnsupportedSeries`] for unknown series.
    pub fn orientation(series: u32) -> Result<Orientation, GeneratorError> {
        if VERTICAL_SERIES.contains(&series) {
            Ok(Orientation::Vertical)
        } else if HORIZONTAL_SERIES.contains(&series) {
            Ok(Orientation::Horizontal)
        } else {
            Err(GeneratorError::UnsupportedSeries { series })
        }
    }
}

fn vertical_outlines(
    fp: &mut Footprint,
    config: &Configuration,
    pin_count: u32,
    edges: &BodyEdges,
) -> Result<(), GeneratorError> {
    let nudge = config.silk_fab_offset;
    let silk_w = config.silk_line_width;
    let fab_w = config.fab_line_width;
    let latch_left = edges.get(Landmark::LatchLeft)?;
    let latch_right = edges.get(Landmark::LatchRight)?;
    let latch_bottom = edges.get(Landmark::LatchBottom)?;

    fp.add_line(PolygonLine::new(
        [
            (edges.left, edges.top),
            (edges.left, edges.bottom),
            (latch_left, edges.bottom),
            (latch_left, latch_bottom),
            (latch_right, latch_bottom),
            (latch_right, edges.bottom),
            (edges.right, edges.bottom),
            (edges.right, edges.top),
            (edges.left, edges.top),
        ],
        Layer::FrontFab,
        fab_w,
    ));
    fp.add_line(pin1_triangle(
        Point::new(edges.left, 0.0),
        PIN1_MARKER_SIZE,
        MarkerDirection::Right,
        fab_w,
    ));

    fp.add_line(edges.silk_open_bottom(nudge, silk_w));
    for line in slot_and_latch_outlines(pin_count, edges, nudge, silk_w, LatchStyle::Joined)? {
        fp.add_line(line);
    }
    fp.add_line(pin1_silk_bar(edges.left, silk_w));
    Ok(())
}

fn horizontal_outlines(fp: &mut Footprint, config: &Configuration, edges: &BodyEdges) -> Result<(), GeneratorError> {
    let nudge = config.silk_fab_offset;
    let silk_w = config.silk_line_width;
    let fab_w = config.fab_line_width;
    let tail_left = edges.get(Landmark::TailLeft)?;
    let tail_right = edges.get(Landmark::TailRight)?;
    let tail_top = edges.get(Landmark::TailTop)?;

    fp.add_line(PolygonLine::new(
        [
            (edges.left, edges.top),
            (edges.left, tail_top),
            (tail_left, tail_top),
            (tail_left, edges.bottom),
            (tail_right, edges.bottom),
            (tail_right, tail_top),
            (edges.right, tail_top),
            (edges.right, edges.top),
            (edges.left, edges.top),
        ],
        Layer::FrontFab,
        fab_w,
    ));

    // Points down at pin 1 from above the tail.
    let marker_base = Point::new(0.0, tail_top - HORIZONTAL_MARKER_GAP);
    fp.add_line(pin1_triangle(marker_base, PIN1_MARKER_SIZE, MarkerDirection::Down, fab_w));

    let silk = |points: Vec<(f64, f64)>| PolygonLine::new(points, Layer::FrontSilkscreen, silk_w);
    fp.add_line(silk(vec![
        (edges.left - nudge, tail_top + nudge),
        (edges.left - nudge, edges.top - nudge),
        (edges.right + nudge, edges.top - nudge),
        (edges.right + nudge, tail_top + nudge),
    ]));

    let xb1 = edges.left - nudge;
    let xb2 = tail_left - nudge;
    let xb3 = xb2 + 0.3;
    let xb5 = tail_right + nudge;
    let xb4 = xb5 - 0.3;
    let xb6 = edges.right + nudge;
    let yb1 = tail_top + nudge;
    let yb2 = edges.bottom + nudge;
    fp.add_line(silk(vec![(xb1, yb1), (xb2, yb1), (xb2, yb2), (xb3, yb2)]));
    fp.add_line(silk(vec![(xb6, yb1), (xb5, yb1), (xb5, yb2), (xb4, yb2)]));

    let step = 0.4 - nudge;
    fp.add_line(silk(vec![
        (edges.left - 0.4, -2.0),
        (edges.left - 0.4, yb1 + step),
        (xb2 + nudge - 0.4, yb1 + step),
        (xb2 + nudge - 0.4, yb2 + step),
        (xb3, yb2 + step),
    ]));
    Ok(())
}

impl FootprintGenerator for MolexSlTht {
    fn name(&self) -> &'static str {
        NAME
    }

    fn variants(&self) -> Vec<Variant> {
        DEFAULT_SERIES
            .iter()
            .flat_map(|&series| PIN_RANGE.map(move |pins| Variant::series(series, pins)))
            .collect()
    }

    fn generate(&self, variant: &Variant, config: &Configuration) -> Result<Footprint, GeneratorError> {
        let pin_count = variant.pin_count;
        let series_number = variant.series_number.unwrap_or(DEFAULT_SERIES[0]);
        let orientation = Self::orientation(series_number)?;
        if !PIN_RANGE.contains(&pin_count) {
            return Err(unsupported(NAME, pin_count));
        }

        let args = [
            ("series", FormatArg::from(series_number)),
            ("n", FormatArg::from(part_suffix(pin_count))),
        ];
        let mpn = format_template("A-{series:05d}-{n:04d}", &args)?;
        let new_mpn = format_template("{series:05d}-{n:04d}", &args)?;
        let datasheet = format_template("https://www.molex.com/pdm_docs/sd/{series:05d}0001_sd.pdf", &args)?;

        let parts = NameParts {
            man: MANUFACTURER,
            series: SERIES,
            mpn: &mpn,
            num_rows: 1,
            pins_per_row: pin_count,
            mounting_pad: "",
            pitch: PADS.pitch,
            orientation,
        };
        let name = parts.footprint_name(config)?;
        let model_library = series_library_name(config, MANUFACTURER, SERIES)?;
        debug!(footprint = %name, series = series_number, %orientation, "Generating SL header");

        let mut fp = Footprint::new(name, format!("{model_library}{CUSTOM_SUFFIX}"));
        fp.description = molex_description(SERIES_LONG, &mpn, &new_mpn, pin_count, &datasheet);
        fp.tags = parts.tags(config)?;
        fp.add_pads(PADS.single_row(pin_count, config));

        let crtyd = config.connector_courtyard()?;
        let (edges, courtyard) = match orientation {
            Orientation::Vertical => {
                let edges = vertical_body(pin_count);
                edges.require(&[Landmark::LatchLeft, Landmark::LatchRight, Landmark::LatchBottom])?;
                vertical_outlines(&mut fp, config, pin_count, &edges)?;
                let courtyard = notched_courtyard(&crtyd, &edges, Notch::latch(&edges)?);
                (edges, courtyard)
            }
            Orientation::Horizontal => {
                let edges = horizontal_body(pin_count);
                edges.require(&[Landmark::TailLeft, Landmark::TailRight, Landmark::TailTop])?;
                horizontal_outlines(&mut fp, config, &edges)?;
                let courtyard = notched_courtyard(&crtyd, &edges, Notch::flush(&edges));
                (edges, courtyard)
            }
        };
        let span = CourtyardSpan::new(courtyard.top, courtyard.bottom);
        fp.add_line(courtyard.outline);

        add_text_fields(&mut fp, config, &edges, span, InsidePosition::Top)?;
        attach_model(&mut fp, config, &model_library);
        Ok(fp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_configuration;
    use crate::geometry::PadShape;

    const TOLERANCE: f64 = 1e-9;

    fn generate(series: u32, pins: u32) -> Result<Footprint, GeneratorError> {
        MolexSlTht::new().generate(&Variant::series(series, pins), &test_configuration())
    }

    #[test]
    fn series_orientation() {
        assert_eq!(MolexSlTht::orientation(70545).unwrap(), Orientation::Vertical);
        assert_eq!(MolexSlTht::orientation(70634).unwrap(), Orientation::Horizontal);
        assert!(matches!(
            MolexSlTht::orientation(87898),
            Err(GeneratorError::UnsupportedSeries { series: 87898 })
        ));
    }

    #[test]
    fn default_variants() {
        let variants = MolexSlTht::new().variants();
        assert_eq!(variants.len(), 48);
        assert_eq!(variants[0], Variant::series(70543, 2));
        assert_eq!(variants[47], Variant::series(70553, 25));
    }

    #[test]
    fn vertical_naming() {
        let fp = generate(70543, 4).unwrap();
        assert_eq!(fp.name, "Molex_SL_A-70543-0003_1x04_P2.54mm_Vertical");
        assert_eq!(fp.library, "Connector_Molex_custom");
        assert!(fp.description.contains("70543-0003"));
        assert!(fp.description.contains("705430001_sd.pdf"));
        assert!(fp
            .model
            .as_ref()
            .unwrap()
            .path
            .contains("/Connector_Molex.3dshapes/"));
    }

    #[test]
    fn horizontal_naming_uses_series() {
        let fp = generate(70553, 2).unwrap();
        assert_eq!(fp.name, "Molex_SL_A-70553-0001_1x02_P2.54mm_Horizontal");
        assert!(fp.description.contains("example for new part number: 70553-0001"));
        assert!(fp.tags.contains("side entry"));
    }

    #[test]
    fn pads_in_one_row() {
        let fp = generate(70543, 5).unwrap();
        assert_eq!(fp.pads.len(), 5);
        assert_eq!(fp.pads[0].shape, PadShape::RoundRect);
        assert!((fp.pads[4].position.x - 10.16).abs() < TOLERANCE);
        assert!(fp.pads.iter().all(|p| p.position.y.abs() < TOLERANCE));
    }

    #[test]
    fn vertical_fab_has_latch() {
        let fp = generate(70543, 6).unwrap();
        let fab = fp.lines_on(Layer::FrontFab).next().unwrap();
        assert_eq!(fab.points.len(), 9);
        let (_, _, _, max_y) = fab.bounds().unwrap();
        assert!((max_y - 4.07).abs() < TOLERANCE);
    }

    #[test]
    fn horizontal_marker_points_down() {
        let fp = generate(70553, 3).unwrap();
        let marker = fp.lines_on(Layer::FrontFab).find(|l| l.points.len() == 3).unwrap();
        let tail_top = horizontal_body(3).tail_top.unwrap();
        assert!((marker.points[0].y - (tail_top - 1.0)).abs() < TOLERANCE);
        assert!(marker.points[1].y > marker.points[0].y);
        assert!(marker.points[1].x.abs() < TOLERANCE);
    }

    #[test]
    fn courtyard_has_nine_vertices() {
        for series in DEFAULT_SERIES {
            let fp = generate(series, 8).unwrap();
            let courtyard = fp.lines_on(Layer::FrontCourtyard).next().unwrap();
            assert_eq!(courtyard.points.len(), 9);
            assert!(courtyard.is_closed());
        }
    }

    #[test]
    fn pin_count_out_of_range() {
        assert!(matches!(
            generate(70543, 1),
            Err(GeneratorError::UnsupportedPinCount { pin_count: 1, .. })
        ));
        assert!(matches!(
            generate(70543, 26),
            Err(GeneratorError::UnsupportedPinCount { pin_count: 26, .. })
        ));
    }

    #[test]
    fn unknown_series_is_rejected() {
        assert!(matches!(
            generate(12345, 4),
            Err(GeneratorError::UnsupportedSeries { series: 12345 })
        ));
    }
}
