//! Row re-indentation.
//!
//! parquet-tools prints one compact JSON document per row. Each row is parsed
//! and written back the way `JSON.stringify(value, null, space)` would write
//! it, so output matches what users of the JavaScript tooling expect.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use serde_json::Value;

use crate::config::JsonSpace;
use crate::error::ViewerError;

/// Longest indent `JSON.stringify` honors.
const MAX_GAP: usize = 10;

/// The indent string for a `space` setting. Empty means compact output.
pub fn gap(space: &JsonSpace) -> String {
    match space {
        JsonSpace::Number(n) => " ".repeat((*n as usize).min(MAX_GAP)),
        JsonSpace::Text(s) => s.chars().take(MAX_GAP).collect(),
    }
}

pub fn reindent(line: &str, space: &JsonSpace) -> Result<String, ViewerError> {
    let value: Value = serde_json::from_str(line).map_err(|source| ViewerError::InvalidJson {
        line: line.to_string(),
        source,
    })?;
    Ok(stringify(&value, space))
}

pub fn stringify(value: &Value, space: &JsonSpace) -> String {
    let gap = gap(space);
    let mut out = Vec::with_capacity(128);
    let written = if gap.is_empty() {
        write_with(value, &mut out, JsStyle(CompactFormatter))
    } else {
        write_with(
            value,
            &mut out,
            JsStyle(PrettyFormatter::with_indent(gap.as_bytes())),
        )
    };
    // Serializing a `Value` into a Vec cannot fail and only emits UTF-8.
    debug_assert!(written.is_ok());
    String::from_utf8(out).unwrap_or_default()
}

fn write_with<F: Formatter>(value: &Value, out: &mut Vec<u8>, f: F) -> serde_json::Result<()> {
    let mut ser = serde_json::Serializer::with_formatter(out, f);
    value.serialize(&mut ser)
}

/// Wraps a formatter so floats print the way JavaScript prints numbers:
/// integral values without a fraction, positive exponents with a `+`, and
/// positional notation down to `1e-6`.
struct JsStyle<F>(F);

impl<F: Formatter> Formatter for JsStyle<F> {
    fn write_f64<W: ?Sized + Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        if value == 0.0 {
            return writer.write_all(b"0");
        }
        if value.fract() == 0.0 && value.abs() < 1e21 {
            return write!(writer, "{value:.0}");
        }
        let mut buf = Vec::with_capacity(24);
        self.0.write_f64(&mut buf, value)?;
        let Some(pos) = buf.iter().position(|&b| b == b'e') else {
            return writer.write_all(&buf);
        };
        let exp = std::str::from_utf8(&buf[pos + 1..])
            .ok()
            .and_then(|e| e.parse::<i32>().ok())
            .unwrap_or(0);
        if (-6..0).contains(&exp) {
            return writer.write_all(&positional(&buf[..pos], exp));
        }
        if exp >= 0 {
            buf.insert(pos + 1, b'+');
        }
        writer.write_all(&buf)
    }

    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }
}

/// `-1.5` with exponent `-6` becomes `-0.0000015`.
fn positional(mantissa: &[u8], exp: i32) -> Vec<u8> {
    let (sign, digits) = match mantissa.split_first() {
        Some((b'-', rest)) => (&b"-"[..], rest),
        _ => (&b""[..], mantissa),
    };
    let mut out = Vec::with_capacity(digits.len() + 10);
    out.extend_from_slice(sign);
    out.extend_from_slice(b"0.");
    out.resize(out.len() + (-exp - 1) as usize, b'0');
    out.extend(digits.iter().copied().filter(|&b| b != b'.'));
    out
}
