//! Configuration structures for deserialisation.
//!
//! These structures map onto the merged JSON document: the global style
//! configuration overlaid by the series configuration.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;
use crate::geometry::{CourtyardBuilder, Layer, PadShape};

/// Keys that must be present in the merged configuration.
pub const REQUIRED_KEYS: &[&str] = &[
    "fp_name_format_string",
    "keyword_fp_string",
    "lib_name_format_string",
    "lib_name_specific_function_format_string",
    "orientation_options",
    "entry_direction",
    "silk_fab_offset",
    "silk_line_width",
    "fab_line_width",
    "courtyard_line_width",
    "courtyard_grid",
    "courtyard_offset",
    "references",
    "values",
];

/// Courtyard clearance class used by every connector generator.
pub const CONNECTOR_COURTYARD: &str = "connector";

/// Merged style and series configuration.
///
/// Built once before any footprint is generated and passed by reference to
/// every generator.
#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Footprint name template.
    pub fp_name_format_string: String,

    /// Tag/keyword template.
    pub keyword_fp_string: String,

    /// Library name template keyed by manufacturer and series.
    pub lib_name_format_string: String,

    /// Library name template keyed by function category.
    pub lib_name_specific_function_format_string: String,

    /// Orientation code (`V`, `H`) to display string.
    pub orientation_options: BTreeMap<String, String>,

    /// Orientation code to entry direction string.
    pub entry_direction: BTreeMap<String, String>,

    /// Gap between fabrication and silkscreen outlines (mm).
    pub silk_fab_offset: f64,

    /// Silkscreen stroke width (mm).
    pub silk_line_width: f64,

    /// Fabrication stroke width (mm).
    pub fab_line_width: f64,

    /// Courtyard stroke width (mm).
    pub courtyard_line_width: f64,

    /// Grid courtyard coordinates are snapped to (mm).
    pub courtyard_grid: f64,

    /// Courtyard clearance per component class (mm).
    pub courtyard_offset: BTreeMap<String, f64>,

    /// Prefix of 3D model paths.
    #[serde(rename = "3d_model_prefix", default = "default_model_prefix")]
    pub model3d_path_prefix: String,

    /// Reference designator fields; the first is the real reference.
    pub references: Vec<TextFieldSpec>,

    /// Value fields; the first is the real value.
    pub values: Vec<TextFieldSpec>,

    /// Emit pads KiCad 4 can read (rectangular pin-1 pad).
    #[serde(default)]
    pub kicad4_compatible: bool,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_model_prefix() -> String {
    "${KISYS3DMOD}/".to_string()
}

impl Configuration {
    /// Builds a configuration from a merged JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if a required key is absent
    /// (including both orientation and entry labels and the connector
    /// courtyard clearance), [`ConfigError::Invalid`] if a value has the wrong type, and
    /// [`ConfigError::ValidationError`] if a value is out of range.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let object = value.as_object().ok_or_else(|| ConfigError::ValidationError {
            message: "configuration root must be a JSON object".to_string(),
        })?;
        if let Some(key) = REQUIRED_KEYS.iter().find(|key| !object.contains_key(**key)) {
            return Err(ConfigError::MissingKey {
                key: (*key).to_string(),
            });
        }

        let config: Self = serde_json::from_value(value).map_err(|source| ConfigError::Invalid { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let widths = [
            ("silk_line_width", self.silk_line_width),
            ("fab_line_width", self.fab_line_width),
            ("courtyard_line_width", self.courtyard_line_width),
        ];
        for (key, width) in widths {
            if width <= 0.0 {
                return Err(ConfigError::ValidationError {
                    message: format!("{key} must be positive, got {width}"),
                });
            }
        }
        if self.courtyard_grid < 0.0 || self.silk_fab_offset < 0.0 {
            return Err(ConfigError::ValidationError {
                message: "courtyard_grid and silk_fab_offset must not be negative".to_string(),
            });
        }
        if self.references.is_empty() {
            return Err(ConfigError::MissingKey {
                key: "references[0]".to_string(),
            });
        }
        if self.values.is_empty() {
            return Err(ConfigError::MissingKey {
                key: "values[0]".to_string(),
            });
        }
        for field in self.references.iter().chain(&self.values) {
            field.validate()?;
        }

        // Nested keys every generator looks up; missing ones are fatal here
        // rather than once per footprint.
        for orientation in Orientation::ALL {
            self.orientation_label(orientation)?;
            self.entry_label(orientation)?;
        }
        let clearance = self.courtyard_clearance(CONNECTOR_COURTYARD)?;
        if clearance < 0.0 {
            return Err(ConfigError::ValidationError {
                message: format!("courtyard_offset.{CONNECTOR_COURTYARD} must not be negative, got {clearance}"),
            });
        }
        Ok(())
    }

    /// Display string for an orientation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if the orientation is not listed.
    pub fn orientation_label(&self, orientation: Orientation) -> Result<&str, ConfigError> {
        lookup(&self.orientation_options, "orientation_options", orientation.code())
    }

    /// Entry direction string for an orientation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if the orientation is not listed.
    pub fn entry_label(&self, orientation: Orientation) -> Result<&str, ConfigError> {
        lookup(&self.entry_direction, "entry_direction", orientation.code())
    }

    /// Courtyard clearance for a component class.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if the class is not configured.
    pub fn courtyard_clearance(&self, class: &str) -> Result<f64, ConfigError> {
        self.courtyard_offset
            .get(class)
            .copied()
            .ok_or_else(|| ConfigError::MissingKey {
                key: format!("courtyard_offset.{class}"),
            })
    }

    /// Courtyard builder for connectors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if `courtyard_offset.connector` is absent.
    pub fn connector_courtyard(&self) -> Result<CourtyardBuilder, ConfigError> {
        Ok(CourtyardBuilder::new(
            self.courtyard_clearance(CONNECTOR_COURTYARD)?,
            self.courtyard_grid,
            self.courtyard_line_width,
        ))
    }

    /// Shape of the pin-1 pad.
    #[must_use]
    pub const fn pad1_shape(&self) -> PadShape {
        if self.kicad4_compatible {
            PadShape::Rect
        } else {
            PadShape::RoundRect
        }
    }
}

fn lookup<'a>(map: &'a BTreeMap<String, String>, table: &str, key: &str) -> Result<&'a str, ConfigError> {
    map.get(key)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::MissingKey {
            key: format!("{table}.{key}"),
        })
}

/// Mounting orientation of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Mates perpendicular to the board.
    Vertical,
    /// Mates parallel to the board.
    Horizontal,
}

impl Orientation {
    /// Every orientation, in configuration table order.
    pub const ALL: [Self; 2] = [Self::Vertical, Self::Horizontal];

    /// Returns the configuration table key.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Vertical => "V",
            Self::Horizontal => "H",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Vertical placement rule for a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPlacement {
    /// Above the courtyard.
    OutsideTop,
    /// Below the courtyard.
    OutsideBottom,
    /// Inside the body outline.
    Inside,
}

/// Definition of one reference or value text field.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextFieldSpec {
    /// Layer the text is drawn on.
    pub layer: Layer,

    /// Where the field goes vertically.
    pub position_y: TextPlacement,

    /// Fixed character size (mm).
    #[serde(default)]
    pub size: Option<[f64; 2]>,

    /// Fixed stroke thickness (mm).
    #[serde(default)]
    pub fontwidth: Option<f64>,

    /// Smallest auto-sized character size (mm).
    #[serde(default)]
    pub size_min: Option<[f64; 2]>,

    /// Largest auto-sized character size (mm).
    #[serde(default)]
    pub size_max: Option<[f64; 2]>,

    /// Stroke thickness relative to character size.
    #[serde(default = "default_thickness_factor")]
    pub thickness_factor: f64,
}

const fn default_thickness_factor() -> f64 {
    0.15
}

impl TextFieldSpec {
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.size, self.size_min, self.size_max) {
            (Some(_), _, _) | (None, Some(_), Some(_)) => Ok(()),
            _ => Err(ConfigError::ValidationError {
                message: format!(
                    "text field on {} needs either size or size_min and size_max",
                    self.layer
                ),
            }),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_json as klc_json;
    use serde_json::json;

    #[test]
    fn parse_full_config() {
        let config = Configuration::from_value(klc_json()).unwrap();
        assert!((config.silk_fab_offset - 0.11).abs() < f64::EPSILON);
        assert_eq!(config.orientation_label(Orientation::Vertical).unwrap(), "Vertical");
        assert_eq!(config.entry_label(Orientation::Horizontal).unwrap(), "side entry");
        assert!((config.courtyard_clearance("connector").unwrap() - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.model3d_path_prefix, "${KISYS3DMOD}/");
        assert_eq!(config.references.len(), 2);
        assert_eq!(config.references[0].position_y, TextPlacement::OutsideTop);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.pad1_shape(), PadShape::RoundRect);
    }

    #[test]
    fn missing_key_is_reported() {
        let mut value = klc_json();
        value.as_object_mut().unwrap().remove("silk_fab_offset");
        let err = Configuration::from_value(value).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { ref key } if key == "silk_fab_offset"));
    }

    #[test]
    fn missing_courtyard_class_fails_to_load() {
        let mut value = klc_json();
        value["courtyard_offset"] = json!({ "default": 0.25 });
        let err = Configuration::from_value(value).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { ref key } if key == "courtyard_offset.connector"));
    }

    #[test]
    fn missing_orientation_fails_to_load() {
        let mut value = klc_json();
        value["orientation_options"] = json!({ "V": "Vertical" });
        let err = Configuration::from_value(value).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { ref key } if key == "orientation_options.H"));
    }

    #[test]
    fn missing_entry_direction_fails_to_load() {
        let mut value = klc_json();
        value["entry_direction"] = json!({ "H": "side entry" });
        let err = Configuration::from_value(value).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { ref key } if key == "entry_direction.V"));
    }

    #[test]
    fn reject_negative_connector_clearance() {
        let mut value = klc_json();
        value["courtyard_offset"] = json!({ "connector": -0.5 });
        let err = Configuration::from_value(value).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn wrong_type_is_invalid() {
        let mut value = klc_json();
        value["silk_line_width"] = json!("thin");
        let err = Configuration::from_value(value).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn reject_negative_width() {
        let mut value = klc_json();
        value["fab_line_width"] = json!(-0.1);
        let err = Configuration::from_value(value).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn reject_text_field_without_size() {
        let mut value = klc_json();
        value["values"] = json!([{ "layer": "F.Fab", "position_y": "outside_bottom" }]);
        assert!(Configuration::from_value(value).is_err());
    }

    #[test]
    fn reject_empty_references() {
        let mut value = klc_json();
        value["references"] = json!([]);
        let err = Configuration::from_value(value).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { .. }));
    }

    #[test]
    fn kicad4_uses_rect_pad() {
        let mut value = klc_json();
        value["kicad4_compatible"] = json!(true);
        let config = Configuration::from_value(value).unwrap();
        assert_eq!(config.pad1_shape(), PadShape::Rect);
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
    }
}
