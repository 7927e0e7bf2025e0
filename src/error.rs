//! Error types for connector-footprints.
//!
//! Configuration problems are fatal and surface before any geometry is
//! computed. Everything else aborts only the footprint being generated.

use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::Landmark;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// A required style or series key is absent.
    #[error("missing configuration key: {key}")]
    MissingKey {
        /// Dotted path of the missing key.
        key: String,
    },

    /// The merged configuration could not be mapped onto the typed structure.
    #[error("invalid configuration: {source}")]
    Invalid {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors raised by the outline builder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A body-edge landmark was required but never set.
    #[error("body edge landmark '{landmark}' is not defined")]
    MissingLandmark {
        /// The absent landmark.
        landmark: Landmark,
    },
}

/// Errors raised while expanding a naming template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template references a key that was not supplied.
    #[error("unknown placeholder '{name}' in template \"{template}\"")]
    UnknownPlaceholder {
        /// Placeholder name.
        name: String,
        /// The template being expanded.
        template: String,
    },

    /// The format spec does not apply to the argument.
    #[error("format spec '{spec}' cannot be applied to '{name}'")]
    BadSpec {
        /// Placeholder name.
        name: String,
        /// The offending spec.
        spec: String,
    },
}

/// Errors raised when writing footprint files.
#[derive(Error, Debug)]
pub enum OutputError {
    /// The library directory could not be created.
    #[error("failed to create library directory: {path}")]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The footprint file could not be written.
    #[error("failed to write footprint file: {path}")]
    WriteFile {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort generation of a single footprint.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Configuration lookup failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Outline construction failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A naming template could not be expanded.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The footprint could not be written.
    #[error(transparent)]
    Output(#[from] OutputError),

    /// The requested series number is not recognised.
    #[error("unsupported series: {series}")]
    UnsupportedSeries {
        /// The rejected series number.
        series: u32,
    },

    /// The pin count is outside the range this generator supports.
    #[error("{generator}: unsupported pin count {pin_count}")]
    UnsupportedPinCount {
        /// Generator name.
        generator: String,
        /// The rejected pin count.
        pin_count: u32,
    },
}

/// Errors raised before a generation run starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// A `--series` filter named no known generator.
    #[error("unknown series '{name}' (known: {known})")]
    UnknownSeries {
        /// The requested name.
        name: String,
        /// Comma separated list of valid names.
        known: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let error = ConfigError::NotFound {
            path: PathBuf::from("/path/to/global.json"),
        };
        let msg = error.to_string();
        assert!(msg.contains("not found"));
        assert!(msg.contains("global.json"));
    }

    #[test]
    fn missing_key_display() {
        let error = ConfigError::MissingKey {
            key: "courtyard_offset.connector".to_string(),
        };
        assert!(error.to_string().contains("courtyard_offset.connector"));
    }

    #[test]
    fn missing_landmark_display() {
        let error = GeometryError::MissingLandmark {
            landmark: Landmark::LatchLeft,
        };
        assert!(error.to_string().contains("latch_left"));
    }

    #[test]
    fn generator_error_wraps_sources() {
        let error: GeneratorError = GeometryError::MissingLandmark {
            landmark: Landmark::TailTop,
        }
        .into();
        assert!(matches!(error, GeneratorError::Geometry(_)));
        assert!(error.to_string().contains("tail_top"));

        let error = GeneratorError::UnsupportedSeries { series: 12345 };
        assert!(error.to_string().contains("12345"));
    }
}
