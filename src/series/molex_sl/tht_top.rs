//! Molex SL 70543 vertical header with the latch overlaid on a closed body.

use tracing::debug;

use crate::config::{Configuration, Orientation};
use crate::error::GeneratorError;
use crate::footprint::{add_text_fields, CourtyardSpan, Footprint, InsidePosition};
use crate::geometry::outline::{pin1_silk_bar, pin1_triangle, PIN1_MARKER_SIZE};
use crate::geometry::{Landmark, MarkerDirection, Point};
use crate::naming::{format_template, FormatArg};
use crate::series::molex_sl::{
    notched_courtyard, part_suffix, slot_and_latch_outlines, vertical_body, LatchStyle, Notch, MANUFACTURER, PADS,
    PIN_RANGE, SERIES, SERIES_LONG,
};
use crate::series::{
    attach_model, molex_description, reject_series_number, series_library_name, unsupported, FootprintGenerator,
    NameParts, Variant,
};

const NAME: &str = "molex_sl_top";
const DATASHEET: &str = "https://www.molex.com/pdm_docs/sd/705430003_sd.pdf";

/// Generator for the 70543 top-entry layout.
#[derive(Debug, Default)]
pub struct MolexSlThtTop;

impl MolexSlThtTop {
    /// Creates the generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FootprintGenerator for MolexSlThtTop {
    fn name(&self) -> &'static str {
        NAME
    }

    fn variants(&self) -> Vec<Variant> {
        PIN_RANGE.map(Variant::pins).collect()
    }

    fn generate(&self, variant: &Variant, config: &Configuration) -> Result<Footprint, GeneratorError> {
        reject_series_number(variant)?;
        let pin_count = variant.pin_count;
        if !PIN_RANGE.contains(&pin_count) {
            return Err(unsupported(NAME, pin_count));
        }

        let args = [("n", FormatArg::from(part_suffix(pin_count)))];
        let mpn = format_template("A-70543-{n:04d}", &args)?;
        let new_mpn = format_template("70543-{n:04d}", &args)?;

        let parts = NameParts {
            man: MANUFACTURER,
            series: SERIES,
            mpn: &mpn,
            num_rows: 1,
            pins_per_row: pin_count,
            mounting_pad: "",
            pitch: PADS.pitch,
            orientation: Orientation::Vertical,
        };
        let name = parts.footprint_name(config)?;
        let library = series_library_name(config, MANUFACTURER, SERIES)?;
        debug!(footprint = %name, pins = pin_count, "Generating SL top-entry header");

        let mut fp = Footprint::new(name, library.clone());
        fp.description = molex_description(SERIES_LONG, &mpn, &new_mpn, pin_count, DATASHEET);
        fp.tags = parts.tags(config)?;

        let nudge = config.silk_fab_offset;
        let silk_w = config.silk_line_width;
        let fab_w = config.fab_line_width;

        let edges = vertical_body(pin_count);
        edges.require(&[Landmark::LatchLeft, Landmark::LatchRight, Landmark::LatchBottom])?;

        fp.add_pads(PADS.single_row(pin_count, config));

        fp.add_line(edges.fab_rect(fab_w));
        fp.add_line(edges.silk_rect(nudge, silk_w));
        fp.add_line(pin1_silk_bar(edges.left, silk_w));
        fp.add_line(pin1_triangle(
            Point::new(edges.left, 0.0),
            PIN1_MARKER_SIZE,
            MarkerDirection::Right,
            fab_w,
        ));
        for line in slot_and_latch_outlines(pin_count, &edges, nudge, silk_w, LatchStyle::Overlay)? {
            fp.add_line(line);
        }

        let courtyard = notched_courtyard(&config.connector_courtyard()?, &edges, Notch::latch(&edges)?);
        let span = CourtyardSpan::new(courtyard.top, courtyard.bottom);
        fp.add_line(courtyard.outline);

        add_text_fields(&mut fp, config, &edges, span, InsidePosition::Top)?;
        attach_model(&mut fp, config, &library);
        Ok(fp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_configuration;
    use crate::geometry::Layer;

    fn generate(pins: u32) -> Footprint {
        MolexSlThtTop::new()
            .generate(&Variant::pins(pins), &test_configuration())
            .unwrap()
    }

    #[test]
    fn closed_body_outlines() {
        let fp = generate(4);
        let fab = fp.lines_on(Layer::FrontFab).next().unwrap();
        assert_eq!(fab.points.len(), 5);
        assert!(fab.is_closed());
        let silk_box = fp.lines_on(Layer::FrontSilkscreen).next().unwrap();
        assert!(silk_box.is_closed());
    }

    #[test]
    fn silk_stroke_count_per_template() {
        // Box, pin-1 bar, slots, outer latch, inner latch.
        for pins in [2, 3, 4, 25] {
            assert_eq!(generate(pins).lines_on(Layer::FrontSilkscreen).count(), 5, "{pins} pins");
        }
    }

    #[test]
    fn library_is_not_custom() {
        let fp = generate(2);
        assert_eq!(fp.library, "Connector_Molex");
        assert_eq!(fp.name, "Molex_SL_A-70543-0001_1x02_P2.54mm_Vertical");
    }

    #[test]
    fn reference_above_courtyard() {
        let fp = generate(6);
        let courtyard = fp.lines_on(Layer::FrontCourtyard).next().unwrap();
        let (_, top, _, _) = courtyard.bounds().unwrap();
        assert!(fp.reference().unwrap().position.y < top);
    }

    #[test]
    fn series_number_is_rejected() {
        let err = MolexSlThtTop::new()
            .generate(&Variant::series(70543, 4), &test_configuration())
            .unwrap_err();
        assert!(matches!(err, GeneratorError::UnsupportedSeries { series: 70543 }));
    }

    #[test]
    fn kicad4_pad_shape() {
        let mut value = crate::config::test_config_json();
        value["kicad4_compatible"] = serde_json::json!(true);
        let config = Configuration::from_value(value).unwrap();
        let fp = MolexSlThtTop::new().generate(&Variant::pins(3), &config).unwrap();
        assert_eq!(fp.pads[0].shape, crate::geometry::PadShape::Rect);
    }
}
