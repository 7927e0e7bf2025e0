//! Footprint, library and tag names from configuration templates.
//!
//! Templates use `{key}` or `{key:spec}` placeholders, for example
//! `{man:s}_{series:s}_{mpn:s}_{num_rows:01}x{pins_per_row:02}_P{pitch:.2f}mm_{orientation:s}`.
//!
//! Supported specs:
//!
//! - `s` - string, optional width (left aligned)
//! - `d` - integer, optional width, `0` flag for zero padding (`02d`, `02`)
//! - `f` - float with optional precision (`.2f`)

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::TemplateError;

/// A value substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    /// Text.
    Str(String),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
}

impl From<&str> for FormatArg {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<u32> for FormatArg {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for FormatArg {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)(?::([^{}]*))?\}").expect("placeholder pattern is valid")
    })
}

fn spec_regex() -> &'static Regex {
    static SPEC: OnceLock<Regex> = OnceLock::new();
    SPEC.get_or_init(|| Regex::new(r"^(0)?(\d+)?(?:\.(\d+))?([sdf])?$").expect("spec pattern is valid"))
}

/// Parsed `{key:spec}` format spec.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Spec {
    zero: bool,
    width: usize,
    precision: Option<usize>,
    kind: Option<char>,
}

impl Spec {
    fn parse(name: &str, raw: &str) -> Result<Self, TemplateError> {
        let bad = || TemplateError::BadSpec {
            name: name.to_string(),
            spec: raw.to_string(),
        };
        let caps = spec_regex().captures(raw).ok_or_else(bad)?;
        let number = |i: usize| -> Result<Option<usize>, TemplateError> {
            caps.get(i)
                .map(|m| m.as_str().parse::<usize>().map_err(|_| bad()))
                .transpose()
        };
        Ok(Self {
            zero: caps.get(1).is_some(),
            width: number(2)?.unwrap_or(0),
            precision: number(3)?,
            kind: caps.get(4).and_then(|m| m.as_str().chars().next()),
        })
    }
}

fn render(name: &str, raw_spec: &str, arg: &FormatArg) -> Result<String, TemplateError> {
    let spec = Spec::parse(name, raw_spec)?;
    let bad = || TemplateError::BadSpec {
        name: name.to_string(),
        spec: raw_spec.to_string(),
    };
    let width = spec.width;

    let text = match (arg, spec.kind) {
        (FormatArg::Str(s), None | Some('s')) => {
            if spec.zero || spec.precision.is_some() {
                return Err(bad());
            }
            format!("{s:<width$}")
        }
        (FormatArg::Int(n), None | Some('d')) => {
            if spec.precision.is_some() {
                return Err(bad());
            }
            if spec.zero {
                format!("{n:0width$}")
            } else {
                format!("{n:>width$}")
            }
        }
        #[allow(clippy::cast_precision_loss)] // pin counts and similar small integers
        (FormatArg::Int(n), Some('f')) => float_text(*n as f64, spec),
        (FormatArg::Float(v), None | Some('f')) => float_text(*v, spec),
        _ => return Err(bad()),
    };
    Ok(text)
}

fn float_text(value: f64, spec: Spec) -> String {
    let width = spec.width;
    let body = match (spec.precision, spec.kind) {
        (Some(precision), _) => format!("{value:.precision$}"),
        (None, Some('f')) => format!("{value:.6}"),
        // Plain `{x}` keeps one decimal for whole numbers, e.g. `2.0`.
        (None, _) if value.fract() == 0.0 => format!("{value:.1}"),
        (None, _) => format!("{value}"),
    };
    if spec.zero {
        // Zeros go between the sign and the digits.
        let (sign, digits) = body.strip_prefix('-').map_or(("", body.as_str()), |d| ("-", d));
        let width = width.saturating_sub(sign.len());
        format!("{sign}{digits:0>width$}")
    } else {
        format!("{body:>width$}")
    }
}

/// Expands every placeholder in `template` from `args`.
///
/// # Errors
///
/// Returns [`TemplateError::UnknownPlaceholder`] for a key missing from
/// `args`, and [`TemplateError::BadSpec`] for a spec that does not fit the
/// argument.
///
/// # Examples
///
/// ```
/// use connector_footprints::naming::{format_template, FormatArg};
///
/// let name = format_template(
///     "{man:s}_{mpn:s}_1x{pins:02}_P{pitch:.2f}mm",
///     &[
///         ("man", FormatArg::from("Molex")),
///         ("mpn", FormatArg::from("A-70543-0001")),
///         ("pins", FormatArg::from(2_u32)),
///         ("pitch", FormatArg::from(2.54)),
///     ],
/// )
/// .unwrap();
/// assert_eq!(name, "Molex_A-70543-0001_1x02_P2.54mm");
/// ```
pub fn format_template(template: &str, args: &[(&str, FormatArg)]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut last = 0;

    for caps in placeholder_regex().captures_iter(template) {
        let (whole, name, spec) = split_captures(&caps);
        let arg = args
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, arg)| arg)
            .ok_or_else(|| TemplateError::UnknownPlaceholder {
                name: name.to_string(),
                template: template.to_string(),
            })?;

        out.push_str(&template[last..whole.start()]);
        out.push_str(&render(name, spec, arg)?);
        last = whole.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}

fn split_captures<'t>(caps: &Captures<'t>) -> (regex::Match<'t>, &'t str, &'t str) {
    let whole = caps.get(0).expect("group 0 always matches");
    let name = caps.get(1).map_or("", |m| m.as_str());
    let spec = caps.get(2).map_or("", |m| m.as_str());
    (whole, name, spec)
}

/// Path of the VRML model for a footprint.
///
/// Format: `{prefix}{lib_name}.3dshapes/{fp_name}.wrl`.
#[must_use]
pub fn model_path(prefix: &str, lib_name: &str, fp_name: &str) -> String {
    format!("{prefix}{lib_name}.3dshapes/{fp_name}.wrl")
}
