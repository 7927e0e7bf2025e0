//! connector-footprints: parametric KiCad footprints for through-hole connectors
//!
//! Each supported connector family is described by a handful of datasheet
//! measurements. From those the generators compute pads, fabrication and
//! silkscreen outlines, a grid-snapped courtyard and text fields, and write
//! KiCad `.kicad_mod` files grouped into `.pretty` libraries.
//!
//! # Architecture
//!
//! - Style rules (line widths, courtyard clearances, naming templates, text
//!   fields) come from a JSON [`config::Configuration`] and are never
//!   hard-coded in the generators.
//! - Generators implement [`series::FootprintGenerator`] and return an
//!   in-memory [`footprint::Footprint`].
//! - The [`driver`] runs generators over their variants and hands the results
//!   to [`kicad::LibraryWriter`].
//!
//! # Modules
//!
//! - [`config`] - Configuration loading, merging and validation
//! - [`driver`] - Generation runs and failure policy
//! - [`error`] - Error types
//! - [`footprint`] - Footprint model and text field placement
//! - [`geometry`] - Grid rounding, pads and outlines
//! - [`kicad`] - S-expression output
//! - [`naming`] - Name and tag templates
//! - [`series`] - Connector family generators

pub mod config;
pub mod driver;
pub mod error;
pub mod footprint;
pub mod geometry;
pub mod kicad;
pub mod naming;
pub mod series;
