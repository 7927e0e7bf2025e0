//! Configuration file loading and merging.
//!
//! Two JSON documents drive the generators: a global style configuration
//! (line widths, naming templates, text fields) and a series configuration
//! with connector-specific settings. The series document is laid over the
//! global one before anything is parsed: each top-level key it sets replaces
//! the global value for that key as a whole.
//!
//! # Configuration File Locations
//!
//! Each file is taken from its CLI flag (`--global-config`,
//! `--series-config`) or else from the default directory:
//!
//! - **Linux/macOS:** `~/.connector-footprints/{global,series}.json`
//! - **Windows:** `%USERPROFILE%\.connector-footprints\{global,series}.json`
//!
//! # Example Configuration
//!
//! See `config/global.json` and `config/series.json`.

mod settings;

pub use settings::{
    Configuration, LoggingConfig, Orientation, TextFieldSpec, TextPlacement, CONNECTOR_COURTYARD,
    REQUIRED_KEYS,
};

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::ConfigError;

/// Returns the default configuration directory.
///
/// - **Linux/macOS:** `~/.connector-footprints/`
/// - **Windows:** `%USERPROFILE%\.connector-footprints\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".connector-footprints"))
}

/// Returns the default global style configuration path.
#[must_use]
pub fn default_global_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("global.json"))
}

/// Returns the default series configuration path.
#[must_use]
pub fn default_series_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("series.json"))
}

/// Loads both configuration files and merges them.
///
/// If a path is `None`, the platform-specific default location is used.
///
/// # Errors
///
/// Returns an error if:
/// - A configuration file cannot be found or read
/// - The JSON is malformed
/// - A required key is missing from the merged document
/// - A value has the wrong type or is out of range
pub fn load_configuration(global: Option<&Path>, series: Option<&Path>) -> Result<Configuration, ConfigError> {
    let global_path = resolve(global, default_global_config_path)?;
    let series_path = resolve(series, default_series_config_path)?;

    let mut merged = read_json(&global_path)?;
    merge_json(&mut merged, read_json(&series_path)?);

    tracing::debug!(
        global = %global_path.display(),
        series = %series_path.display(),
        "Merged configuration files"
    );

    Configuration::from_value(merged)
}

fn resolve(path: Option<&Path>, default: fn() -> Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => default().ok_or_else(|| ConfigError::NotFound {
            path: PathBuf::from("<default config path>"),
        }),
    }
}

/// Reads one JSON document from disk.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`], [`ConfigError::ReadError`] or
/// [`ConfigError::ParseError`].
pub fn read_json(path: &Path) -> Result<Value, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Lays `overlay` over `base`.
///
/// Top-level keys of `overlay` replace those of `base` whole; nested objects
/// are not merged. If either document is not an object, `overlay` wins.
pub fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                base.insert(key, value);
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Style configuration matching the shipped `config/global.json`.
#[cfg(test)]
pub(crate) fn test_config_json() -> Value {
    serde_json::json!({
        "fp_name_format_string": "{man:s}_{series:s}_{mpn:s}_{num_rows:01}x{pins_per_row:02}{mounting_pad:s}_P{pitch:.2f}mm_{orientation:s}",
        "keyword_fp_string": "connector {man:s} {series:s} {orientation:s} {entry:s}",
        "lib_name_format_string": "Connector_{man:s}",
        "lib_name_specific_function_format_string": "Connector_{category:s}",
        "orientation_options": { "V": "Vertical", "H": "Horizontal" },
        "entry_direction": { "V": "top entry", "H": "side entry" },
        "silk_fab_offset": 0.11,
        "silk_line_width": 0.12,
        "fab_line_width": 0.1,
        "courtyard_line_width": 0.05,
        "courtyard_grid": 0.01,
        "courtyard_offset": { "connector": 0.5, "default": 0.25 },
        "references": [
            { "layer": "F.SilkS", "position_y": "outside_top", "size": [1.0, 1.0], "fontwidth": 0.15 },
            { "layer": "F.Fab", "position_y": "inside", "size_min": [0.25, 0.25], "size_max": [1.0, 1.0] }
        ],
        "values": [
            { "layer": "F.Fab", "position_y": "outside_bottom", "size": [1.0, 1.0], "fontwidth": 0.15 }
        ]
    })
}

#[cfg(test)]
pub(crate) fn test_configuration() -> Configuration {
    Configuration::from_value(test_config_json()).expect("test configuration is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_config_dir_exists() {
        assert!(default_config_dir().is_some());
    }

    #[test]
    fn default_config_paths() {
        let global = default_global_config_path().unwrap();
        let series = default_series_config_path().unwrap();
        assert!(global.to_string_lossy().ends_with("global.json"));
        assert!(series.to_string_lossy().ends_with("series.json"));
        assert!(global.to_string_lossy().contains(".connector-footprints"));
    }

    #[test]
    fn merge_replaces_top_level_keys() {
        let mut base = json!({
            "silk_line_width": 0.12,
            "fab_line_width": 0.1,
            "courtyard_offset": { "connector": 0.5, "default": 0.25 },
            "references": [1, 2]
        });
        merge_json(
            &mut base,
            json!({
                "silk_line_width": 0.15,
                "courtyard_offset": { "connector": 0.4 },
                "references": [3],
                "kicad4_compatible": true
            }),
        );
        assert_eq!(base["silk_line_width"], json!(0.15));
        assert_eq!(base["fab_line_width"], json!(0.1));
        assert_eq!(base["courtyard_offset"], json!({ "connector": 0.4 }));
        assert_eq!(base["references"], json!([3]));
        assert_eq!(base["kicad4_compatible"], json!(true));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = read_json(Path::new("/nonexistent/global.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }
}
