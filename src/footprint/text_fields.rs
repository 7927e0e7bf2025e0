//! Reference and value text placement.

use crate::config::{Configuration, TextFieldSpec, TextPlacement};
use crate::error::ConfigError;
use crate::footprint::{Footprint, TextField, TextKind};
use crate::geometry::{round_to_base, BodyEdges, Point};

/// Grid text positions are rounded to (mm).
const TEXT_GRID: f64 = 0.01;

/// Gap between the courtyard and text placed outside it (mm).
const OUTSIDE_GAP: f64 = 0.2;

/// Characters that must fit across the body for auto-sized text.
const AUTO_SIZE_CHARS: f64 = 3.0;

/// Vertical extent of the courtyard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtyardSpan {
    /// Topmost courtyard y (mm).
    pub top: f64,
    /// Bottommost courtyard y (mm).
    pub bottom: f64,
}

impl CourtyardSpan {
    /// Creates a span from its top and bottom.
    #[must_use]
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }
}

/// Where `inside` text sits within the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsidePosition {
    /// One text height below the body top.
    Top,
    /// Body centre.
    #[default]
    Center,
    /// One text height above the body bottom.
    Bottom,
}

/// Adds the configured reference and value fields to a footprint.
///
/// The first reference becomes `REF**` and the first value the footprint
/// name; any further entries become `%R` / `%V` user text.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] if a field has neither a fixed
/// size nor a size range.
pub fn add_text_fields(
    fp: &mut Footprint,
    config: &Configuration,
    edges: &BodyEdges,
    courtyard: CourtyardSpan,
    inside: InsidePosition,
) -> Result<(), ConfigError> {
    let value_text = fp.name.clone();
    let groups = [
        (&config.references, TextKind::Reference, "REF**".to_string(), "%R"),
        (&config.values, TextKind::Value, value_text, "%V"),
    ];

    for (specs, kind, first_text, user_text) in groups {
        for (i, spec) in specs.iter().enumerate() {
            let (position, size, thickness) = place(spec, edges, courtyard, inside)?;
            let (kind, text) = if i == 0 {
                (kind, first_text.clone())
            } else {
                (TextKind::User, user_text.to_string())
            };
            fp.add_text(TextField {
                kind,
                text,
                position,
                layer: spec.layer,
                size,
                thickness,
            });
        }
    }
    Ok(())
}

fn place(
    spec: &TextFieldSpec,
    edges: &BodyEdges,
    courtyard: CourtyardSpan,
    inside: InsidePosition,
) -> Result<(Point, [f64; 2], f64), ConfigError> {
    let (size, thickness) = text_size(spec, edges)?;
    let centre = edges.centre();

    let y = match spec.position_y {
        TextPlacement::OutsideTop => courtyard.top - size[1] - OUTSIDE_GAP,
        TextPlacement::OutsideBottom => courtyard.bottom + size[1] + OUTSIDE_GAP,
        TextPlacement::Inside => match inside {
            InsidePosition::Top => edges.top + size[1],
            InsidePosition::Center => centre.y,
            InsidePosition::Bottom => edges.bottom - size[1],
        },
    };

    let position = Point::new(
        round_to_base(centre.x, TEXT_GRID),
        round_to_base(y, TEXT_GRID),
    );
    Ok((position, size, thickness))
}

fn text_size(spec: &TextFieldSpec, edges: &BodyEdges) -> Result<([f64; 2], f64), ConfigError> {
    if let Some(size) = spec.size {
        let thickness = spec
            .fontwidth
            .unwrap_or_else(|| round_to_base(size[0] * spec.thickness_factor, TEXT_GRID));
        return Ok((size, thickness));
    }

    let (Some(min), Some(max)) = (spec.size_min, spec.size_max) else {
        return Err(ConfigError::ValidationError {
            message: format!("text field on {} has no size", spec.layer),
        });
    };
    let fit = edges.width() / AUTO_SIZE_CHARS;
    let size = [fit.max(min[0]).min(max[0]), fit.max(min[1]).min(max[1])];
    let thickness = round_to_base(size[0] * spec.thickness_factor, TEXT_GRID);
    Ok((size, thickness))
}
