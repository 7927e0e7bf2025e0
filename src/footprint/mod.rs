//! The footprint aggregate handed to the file writer.
//!
//! A [`Footprint`] is assembled once by a generator and not touched again
//! before it is written.

pub mod text_fields;

use serde::{Deserialize, Serialize};

use crate::geometry::{Layer, PadSpec, Point, PolygonLine};

pub use text_fields::{add_text_fields, CourtyardSpan, InsidePosition};

/// A complete footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Footprint name, also the file stem.
    pub name: String,

    /// Library the footprint is written to (without `.pretty`).
    pub library: String,

    /// Human readable description.
    #[serde(default)]
    pub description: String,

    /// Space separated search keywords.
    #[serde(default)]
    pub tags: String,

    /// Pads in manufacturer numbering order.
    #[serde(default)]
    pub pads: Vec<PadSpec>,

    /// Outline strokes on all layers.
    #[serde(default)]
    pub lines: Vec<PolygonLine>,

    /// Reference, value and user text.
    #[serde(default)]
    pub texts: Vec<TextField>,

    /// 3D model reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Model3D>,
}

impl Footprint {
    /// Creates an empty footprint.
    #[must_use]
    pub fn new(name: impl Into<String>, library: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            library: library.into(),
            description: String::new(),
            tags: String::new(),
            pads: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
            model: None,
        }
    }

    /// Adds pads.
    pub fn add_pads(&mut self, pads: impl IntoIterator<Item = PadSpec>) {
        self.pads.extend(pads);
    }

    /// Adds an outline stroke.
    pub fn add_line(&mut self, line: PolygonLine) {
        self.lines.push(line);
    }

    /// Adds a text field.
    pub fn add_text(&mut self, text: TextField) {
        self.texts.push(text);
    }

    /// Returns the strokes on one layer.
    pub fn lines_on(&self, layer: Layer) -> impl Iterator<Item = &PolygonLine> + '_ {
        self.lines.iter().filter(move |l| l.layer == layer)
    }

    /// Returns the reference designator field, if placed.
    #[must_use]
    pub fn reference(&self) -> Option<&TextField> {
        self.texts.iter().find(|t| t.kind == TextKind::Reference)
    }
}

/// Role of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// Reference designator (`REF**`).
    Reference,
    /// Value (the footprint name).
    Value,
    /// Free text.
    User,
}

impl TextKind {
    /// Returns the KiCad text type keyword.
    #[must_use]
    pub const fn kicad_name(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Value => "value",
            Self::User => "user",
        }
    }
}

/// A placed text item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    /// Reference, value or user text.
    pub kind: TextKind,
    /// Displayed text.
    pub text: String,
    /// Text centre (mm).
    pub position: Point,
    /// Target layer.
    pub layer: Layer,
    /// Character width and height (mm).
    pub size: [f64; 2],
    /// Stroke thickness (mm).
    pub thickness: f64,
}

impl TextField {
    /// Creates a user text item.
    #[must_use]
    pub fn user(text: impl Into<String>, position: Point, layer: Layer, size: [f64; 2], thickness: f64) -> Self {
        Self {
            kind: TextKind::User,
            text: text.into(),
            position,
            layer,
            size,
            thickness,
        }
    }
}

/// Reference to a 3D model file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model3D {
    /// Model path, usually prefixed with an environment variable.
    pub path: String,
}

impl Model3D {
    /// Creates a model reference.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PadGeometry, PadArray};

    #[test]
    fn collects_items() {
        let mut fp = Footprint::new("TEST", "Connector_Test");
        let geometry = PadGeometry::circular(1.0, 0.3);
        fp.add_pads(PadArray::new(Point::default(), 3, geometry).x_spacing(2.54).build());
        fp.add_line(PolygonLine::line((0.0, 0.0), (1.0, 0.0), Layer::FrontFab, 0.1));
        fp.add_line(PolygonLine::line((0.0, 1.0), (1.0, 1.0), Layer::FrontSilkscreen, 0.12));
        fp.add_text(TextField::user("x", Point::default(), Layer::UserDrawings, [0.5, 0.5], 0.075));

        assert_eq!(fp.pads.len(), 3);
        assert_eq!(fp.lines_on(Layer::FrontFab).count(), 1);
        assert_eq!(fp.lines_on(Layer::FrontCourtyard).count(), 0);
        assert!(fp.reference().is_none());
        assert!(fp.model.is_none());
    }
}
