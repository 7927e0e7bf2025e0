//! S-expression serialisation of footprints.

use std::io::{self, Write};

use crate::footprint::{Footprint, Model3D, TextField};
use crate::geometry::{PadShape, PadSpec, PolygonLine};
use crate::kicad::{fmt_num, quote, quote_always};

/// Writes an item as KiCad s-expressions.
pub trait SexpWriter {
    fn write(&self, out: &mut dyn Write, indent: usize) -> io::Result<()>;
}

fn pad_indent(out: &mut dyn Write, indent: usize) -> io::Result<()> {
    out.write_all("  ".repeat(indent).as_bytes())
}

impl SexpWriter for TextField {
    fn write(&self, out: &mut dyn Write, indent: usize) -> io::Result<()> {
        pad_indent(out, indent)?;
        out.write_all(b"(fp_text ")?;
        out.write_all(self.kind.kicad_name().as_bytes())?;
        out.write_all(b" ")?;
        out.write_all(quote(&self.text).as_bytes())?;
        out.write_all(b" (at ")?;
        out.write_all(fmt_num(self.position.x).as_bytes())?;
        out.write_all(b" ")?;
        out.write_all(fmt_num(self.position.y).as_bytes())?;
        out.write_all(b") (layer ")?;
        out.write_all(self.layer.kicad_name().as_bytes())?;
        out.write_all(b")\n")?;
        pad_indent(out, indent + 1)?;
        out.write_all(b"(effects (font (size ")?;
        out.write_all(fmt_num(self.size[0]).as_bytes())?;
        out.write_all(b" ")?;
        out.write_all(fmt_num(self.size[1]).as_bytes())?;
        out.write_all(b") (thickness ")?;
        out.write_all(fmt_num(self.thickness).as_bytes())?;
        out.write_all(b")))\n")?;
        pad_indent(out, indent)?;
        out.write_all(b")\n")?;
        Ok(())
    }
}

impl SexpWriter for PolygonLine {
    /// One `fp_line` per segment.
    fn write(&self, out: &mut dyn Write, indent: usize) -> io::Result<()> {
        for (start, end) in self.segments() {
            pad_indent(out, indent)?;
            writeln!(
                out,
                "(fp_line (start {} {}) (end {} {}) (layer {}) (width {}))",
                fmt_num(start.x),
                fmt_num(start.y),
                fmt_num(end.x),
                fmt_num(end.y),
                self.layer.kicad_name(),
                fmt_num(self.width),
            )?;
        }
        Ok(())
    }
}

impl SexpWriter for PadSpec {
    fn write(&self, out: &mut dyn Write, indent: usize) -> io::Result<()> {
        pad_indent(out, indent)?;
        write!(
            out,
            "(pad {} {} {} (at {} {}) (size {} {}) (drill {}) (layers {})",
            quote(&self.number.to_string()),
            self.kind.kicad_name(),
            self.shape.kicad_name(),
            fmt_num(self.position.x),
            fmt_num(self.position.y),
            fmt_num(self.width),
            fmt_num(self.height),
            fmt_num(self.drill),
            self.kind.layers().join(" "),
        )?;
        if self.shape == PadShape::RoundRect {
            out.write_all(b"\n")?;
            pad_indent(out, indent + 1)?;
            write!(out, "(roundrect_rratio {})", fmt_num(self.roundrect_ratio()))?;
        }
        out.write_all(b")\n")?;
        Ok(())
    }
}

impl SexpWriter for Model3D {
    fn write(&self, out: &mut dyn Write, indent: usize) -> io::Result<()> {
        pad_indent(out, indent)?;
        out.write_all(b"(model ")?;
        out.write_all(quote(&self.path).as_bytes())?;
        out.write_all(b"\n")?;
        for key in ["at", "scale", "rotate"] {
            let value = if key == "scale" { "1 1 1" } else { "0 0 0" };
            pad_indent(out, indent + 1)?;
            writeln!(out, "({key} (xyz {value}))")?;
        }
        pad_indent(out, indent)?;
        out.write_all(b")\n")?;
        Ok(())
    }
}

impl SexpWriter for Footprint {
    /// Writes the `module` with a zero edit timestamp.
    ///
    /// Use [`write_footprint`] to stamp a real edit time.
    fn write(&self, out: &mut dyn Write, indent: usize) -> io::Result<()> {
        write_module(self, 0, out, indent)
    }
}

/// Writes a complete `module` s-expression.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_footprint(fp: &Footprint, tedit: i64, out: &mut dyn Write) -> io::Result<()> {
    write_module(fp, tedit, out, 0)
}

fn write_module(fp: &Footprint, tedit: i64, out: &mut dyn Write, indent: usize) -> io::Result<()> {
    pad_indent(out, indent)?;
    writeln!(out, "(module {} (layer F.Cu) (tedit {tedit:X})", quote(&fp.name))?;
    if !fp.description.is_empty() {
        pad_indent(out, indent + 1)?;
        writeln!(out, "(descr {})", quote_always(&fp.description))?;
    }
    if !fp.tags.is_empty() {
        pad_indent(out, indent + 1)?;
        writeln!(out, "(tags {})", quote_always(&fp.tags))?;
    }
    for text in &fp.texts {
        text.write(out, indent + 1)?;
    }
    for line in &fp.lines {
        line.write(out, indent + 1)?;
    }
    for pad in &fp.pads {
        pad.write(out, indent + 1)?;
    }
    if let Some(model) = &fp.model {
        model.write(out, indent + 1)?;
    }
    pad_indent(out, indent)?;
    out.write_all(b")\n")?;
    Ok(())
}

/// Renders a footprint to a string.
///
/// # Errors
///
/// Only fails if the output is not valid UTF-8, which cannot happen for
/// footprints built from Rust strings.
pub fn render(fp: &Footprint, tedit: i64) -> io::Result<String> {
    let mut buffer = Vec::new();
    write_footprint(fp, tedit, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::TextKind;
    use crate::geometry::{Layer, PadArray, PadGeometry, Point};

    fn sample() -> Footprint {
        let mut fp = Footprint::new("Test_1x02_P2.54mm", "Connector_Test");
        fp.description = "Test connector, 2 Pins".to_string();
        fp.tags = "connector test".to_string();
        let geometry = PadGeometry::calculate(2.54, 0.8, 1.2, 0.15, 0.5);
        fp.add_pads(
            PadArray::new(Point::default(), 2, geometry)
                .x_spacing(2.54)
                .first_pad_shape(Some(PadShape::RoundRect))
                .build(),
        );
        fp.add_pads([PadSpec::npth(Point::new(1.27, 3.0), 1.6)]);
        fp.add_line(PolygonLine::rect((-1.0, -1.5), (3.54, 1.5), Layer::FrontFab, 0.1));
        fp.add_text(TextField {
            kind: TextKind::Reference,
            text: "REF**".to_string(),
            position: Point::new(1.27, -2.5),
            layer: Layer::FrontSilkscreen,
            size: [1.0, 1.0],
            thickness: 0.15,
        });
        fp.model = Some(Model3D::new("${KISYS3DMOD}/Connector_Test.3dshapes/Test_1x02_P2.54mm.wrl"));
        fp
    }

    #[test]
    fn module_header_and_footer() {
        let text = render(&sample(), 0x5B1F_0F3C).unwrap();
        assert!(text.starts_with("(module Test_1x02_P2.54mm (layer F.Cu) (tedit 5B1F0F3C)\n"));
        assert!(text.contains("  (descr \"Test connector, 2 Pins\")\n"));
        assert!(text.contains("  (tags \"connector test\")\n"));
        assert!(text.ends_with(")\n"));
    }

    #[test]
    fn one_fp_line_per_segment() {
        let text = render(&sample(), 0).unwrap();
        assert_eq!(text.matches("(fp_line ").count(), 4);
        assert!(text.contains("(fp_line (start -1 -1.5) (end 3.54 -1.5) (layer F.Fab) (width 0.1))"));
    }

    #[test]
    fn pads_are_written() {
        let text = render(&sample(), 0).unwrap();
        assert!(text.contains(
            "(pad 1 thru_hole roundrect (at 0 0) (size 1.74 2.2) (drill 1.2) (layers *.Cu *.Mask)\n    (roundrect_rratio 0.143678))"
        ));
        assert!(text.contains(
            "(pad 2 thru_hole oval (at 2.54 0) (size 1.74 2.2) (drill 1.2) (layers *.Cu *.Mask))"
        ));
        assert!(text.contains("(pad \"\" np_thru_hole circle (at 1.27 3) (size 1.6 1.6) (drill 1.6)"));
    }

    #[test]
    fn text_and_model() {
        let text = render(&sample(), 0).unwrap();
        assert!(text.contains("  (fp_text reference REF** (at 1.27 -2.5) (layer F.SilkS)\n"));
        assert!(text.contains("    (effects (font (size 1 1) (thickness 0.15)))\n"));
        assert!(text.contains("  (model ${KISYS3DMOD}/Connector_Test.3dshapes/Test_1x02_P2.54mm.wrl\n"));
        assert!(text.contains("    (scale (xyz 1 1 1))\n"));
    }

    #[test]
    fn trait_write_matches_render() {
        let fp = sample();
        let mut buffer = Vec::new();
        fp.write(&mut buffer, 0).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), render(&fp, 0).unwrap());
    }
}
