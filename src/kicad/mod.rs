//! KiCad footprint file output.
//!
//! Footprints are written in the KiCad 5 `module` s-expression format, one
//! `.kicad_mod` file per footprint inside a `<Library>.pretty/` directory.
//!
//! - [`write`] - s-expression serialisation
//! - [`library`] - `.pretty` directory layout

pub mod library;
pub mod write;

pub use library::LibraryWriter;
pub use write::{render, SexpWriter};

/// Formats a coordinate or size.
///
/// At most six decimals, trailing zeros trimmed, negative zero written as `0`.
#[must_use]
pub fn fmt_num(value: f64) -> String {
    let text = format!("{value:.6}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" || text.is_empty() {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Formats a string atom, quoting it when KiCad requires quotes.
#[must_use]
pub fn quote(text: &str) -> String {
    let needs_quotes = text.is_empty()
        || text
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"' | '\\'));
    if needs_quotes {
        quote_always(text)
    } else {
        text.to_string()
    }
}

/// Formats a string atom, always quoted.
#[must_use]
pub fn quote_always(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
