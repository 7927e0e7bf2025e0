//! Per-series footprint generators.
//!
//! Each connector family knows its own measurements and pin-count range and
//! turns one [`Variant`] into a finished [`Footprint`]. Shared naming and
//! model bookkeeping lives here.

pub mod molex_cgrid;
pub mod molex_sl;
pub mod neutrik;

use std::fmt;

use crate::config::{Configuration, Orientation};
use crate::error::GeneratorError;
use crate::footprint::{Footprint, Model3D};
use crate::geometry::{PadArray, PadGeometry, PadSpec, Point};
use crate::naming::{format_template, model_path, FormatArg};

pub use molex_cgrid::MolexCGrid;
pub use molex_sl::{MolexSlTht, MolexSlThtTop};
pub use neutrik::NeutrikNcj6fah;

/// One footprint a generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
    /// Manufacturer series number, for generators covering several series.
    pub series_number: Option<u32>,
    /// Total pin count.
    pub pin_count: u32,
}

impl Variant {
    /// A variant of a single-series generator.
    #[must_use]
    pub const fn pins(pin_count: u32) -> Self {
        Self {
            series_number: None,
            pin_count,
        }
    }

    /// A variant of a multi-series generator.
    #[must_use]
    pub const fn series(series_number: u32, pin_count: u32) -> Self {
        Self {
            series_number: Some(series_number),
            pin_count,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.series_number {
            Some(series) => write!(f, "{series}/{} pins", self.pin_count),
            None => write!(f, "{} pins", self.pin_count),
        }
    }
}

/// A connector family.
pub trait FootprintGenerator {
    /// Short name used by `--series` filters and in logs.
    fn name(&self) -> &'static str;

    /// Every variant this family produces by default.
    fn variants(&self) -> Vec<Variant>;

    /// Builds one footprint.
    ///
    /// # Errors
    ///
    /// Returns an error if the variant is unsupported, a configuration key
    /// is missing, or a naming template fails to expand.
    fn generate(&self, variant: &Variant, config: &Configuration) -> Result<Footprint, GeneratorError>;
}

/// Every generator shipped with the crate.
#[must_use]
pub fn all_generators() -> Vec<Box<dyn FootprintGenerator>> {
    vec![
        Box::new(MolexCGrid::new()),
        Box::new(MolexSlTht::new()),
        Box::new(MolexSlThtTop::new()),
        Box::new(NeutrikNcj6fah::new()),
    ]
}

/// Looks up generators by name.
#[must_use]
pub fn find_generator(name: &str) -> Option<Box<dyn FootprintGenerator>> {
    all_generators().into_iter().find(|g| g.name() == name)
}

/// Fields of the footprint name template.
#[derive(Debug, Clone)]
pub struct NameParts<'a> {
    /// Manufacturer.
    pub man: &'a str,
    /// Series short name.
    pub series: &'a str,
    /// Manufacturer part number.
    pub mpn: &'a str,
    /// Number of pin rows.
    pub num_rows: u32,
    /// Pins in each row.
    pub pins_per_row: u32,
    /// Mounting pad suffix, empty when there is none.
    pub mounting_pad: &'a str,
    /// Pin pitch (mm).
    pub pitch: f64,
    /// Mounting orientation.
    pub orientation: Orientation,
}

impl NameParts<'_> {
    /// Expands `fp_name_format_string`.
    ///
    /// # Errors
    ///
    /// Returns an error if the orientation is not configured or the
    /// template does not expand.
    pub fn footprint_name(&self, config: &Configuration) -> Result<String, GeneratorError> {
        let args = [
            ("man", FormatArg::from(self.man)),
            ("series", FormatArg::from(self.series)),
            ("mpn", FormatArg::from(self.mpn)),
            ("num_rows", FormatArg::from(self.num_rows)),
            ("pins_per_row", FormatArg::from(self.pins_per_row)),
            ("mounting_pad", FormatArg::from(self.mounting_pad)),
            ("pitch", FormatArg::from(self.pitch)),
            ("orientation", FormatArg::from(config.orientation_label(self.orientation)?)),
        ];
        Ok(format_template(&config.fp_name_format_string, &args)?)
    }

    /// Expands `keyword_fp_string`.
    ///
    /// # Errors
    ///
    /// Returns an error if the orientation is not configured or the
    /// template does not expand.
    pub fn tags(&self, config: &Configuration) -> Result<String, GeneratorError> {
        let args = [
            ("man", FormatArg::from(self.man)),
            ("series", FormatArg::from(self.series)),
            ("orientation", FormatArg::from(config.orientation_label(self.orientation)?)),
            ("entry", FormatArg::from(config.entry_label(self.orientation)?)),
        ];
        Ok(format_template(&config.keyword_fp_string, &args)?)
    }
}

/// Expands `lib_name_format_string` for a manufacturer series.
///
/// # Errors
///
/// Returns an error if the template does not expand.
pub fn series_library_name(config: &Configuration, man: &str, series: &str) -> Result<String, GeneratorError> {
    let args = [("man", FormatArg::from(man)), ("series", FormatArg::from(series))];
    Ok(format_template(&config.lib_name_format_string, &args)?)
}

/// Expands `lib_name_specific_function_format_string` for a category.
///
/// # Errors
///
/// Returns an error if the template does not expand.
pub fn category_library_name(config: &Configuration, category: &str) -> Result<String, GeneratorError> {
    let args = [("category", FormatArg::from(category))];
    Ok(format_template(&config.lib_name_specific_function_format_string, &args)?)
}

/// Attaches the 3D model, named after the model library rather than the
/// output library.
pub fn attach_model(fp: &mut Footprint, config: &Configuration, model_library: &str) {
    let path = model_path(&config.model3d_path_prefix, model_library, &fp.name);
    fp.model = Some(Model3D::new(path));
}

/// Standard description of a Molex header.
#[must_use]
pub fn molex_description(series_long: &str, mpn: &str, new_mpn: &str, pin_count: u32, datasheet: &str) -> String {
    format!(
        "Molex {series_long}, old/engineering part number: {mpn} example for new part number: {new_mpn}, \
         {pin_count} Pins ({datasheet}), generated with connector-footprints"
    )
}

/// Pitch-sized through-hole pad parameters shared by the header families.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderPads {
    /// Pin pitch (mm).
    pub pitch: f64,
    /// Drill diameter (mm).
    pub drill: f64,
    /// Copper gap between neighbouring pads (mm).
    pub pad_to_pad_clearance: f64,
    /// Smallest allowed annular ring (mm).
    pub min_annular_ring: f64,
    /// Largest allowed annular ring (mm).
    pub max_annular_ring: f64,
}

impl HeaderPads {
    /// Calculated pad geometry.
    #[must_use]
    pub fn geometry(&self) -> PadGeometry {
        PadGeometry::calculate(
            self.pitch,
            self.pad_to_pad_clearance,
            self.drill,
            self.min_annular_ring,
            self.max_annular_ring,
        )
    }

    /// One row of pads along x.
    #[must_use]
    pub fn row(&self, start: Point, count: u32) -> PadArray {
        PadArray::new(start, count, self.geometry()).x_spacing(self.pitch)
    }

    /// A single row numbered 1..=count with the pin-1 shape applied.
    #[must_use]
    pub fn single_row(&self, count: u32, config: &Configuration) -> Vec<PadSpec> {
        self.row(Point::default(), count)
            .first_pad_shape(Some(config.pad1_shape()))
            .build()
    }
}

/// Rejects a series number passed to a single-series generator.
pub(crate) fn reject_series_number(variant: &Variant) -> Result<(), GeneratorError> {
    match variant.series_number {
        Some(series) => Err(GeneratorError::UnsupportedSeries { series }),
        None => Ok(()),
    }
}

pub(crate) fn unsupported(generator: &str, pin_count: u32) -> GeneratorError {
    GeneratorError::UnsupportedPinCount {
        generator: generator.to_string(),
        pin_count,
    }
}
