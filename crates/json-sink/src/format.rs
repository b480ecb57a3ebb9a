//! Output layout and text encoding for the JSON writer.
//!
//! Both are implemented as `serde_json` formatters so serialization stays a
//! single pass over the rows.

use serde_json::ser::Formatter;
use std::io;

/// Text encoding of the JSON output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputEncoding {
    /// Non-ASCII characters are written as `\uXXXX` escapes, so the file is
    /// plain ASCII and reads the same under any Latin-1-family decoder.
    #[default]
    Ascii,
    /// Non-ASCII characters are written as raw UTF-8.
    Utf8,
}

/// Whitespace layout of the JSON output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonStyle {
    /// Single line with `", "` between items and `": "` after keys.
    #[default]
    Spaced,
    /// Single line, no whitespace.
    Compact,
    /// Indented, one item per line.
    Pretty,
}

/// Single-line formatter that puts a space after item and key separators.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Wraps another formatter and escapes every non-ASCII character (and DEL) in strings.
///
/// Characters outside the Basic Multilingual Plane are written as a UTF-16
/// surrogate pair, as JSON requires.
#[derive(Debug, Clone, Default)]
pub struct AsciiFormatter<F> {
    inner: F,
}

impl<F: Formatter> AsciiFormatter<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: Formatter> Formatter for AsciiFormatter<F> {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            // DEL is escaped too, like every other non-printable
            if ch.is_ascii() && ch != '\u{7f}' {
                continue;
            }
            if start < i {
                self.inner.write_string_fragment(writer, &fragment[start..i])?;
            }
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        if start < fragment.len() {
            self.inner.write_string_fragment(writer, &fragment[start..])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::ser::CompactFormatter;

    fn render<F: Formatter, T: Serialize>(value: &T, formatter: F) -> String {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_spaced_layout() {
        let value = serde_json::json!([{"a": "1"}, {"a": "2"}]);
        assert_eq!(
            render(&value, SpacedFormatter),
            r#"[{"a": "1"}, {"a": "2"}]"#
        );
    }

    #[test]
    fn test_ascii_escapes_latin1_and_bmp() {
        let rendered = render(
            &"S\u{e3}o Paulo \u{2013} \u{6771}\u{4eac}",
            AsciiFormatter::new(CompactFormatter),
        );
        assert_eq!(rendered, r#""S\u00e3o Paulo \u2013 \u6771\u4eac""#);
        assert!(rendered.is_ascii());
    }

    #[test]
    fn test_ascii_escapes_astral_as_surrogates() {
        let rendered = render(&"a\u{1f600}b", AsciiFormatter::new(CompactFormatter));
        assert_eq!(rendered, r#""a\ud83d\ude00b""#);
    }

    #[test]
    fn test_ascii_keeps_standard_escapes() {
        let rendered = render(&"q\"\n\u{e9}", AsciiFormatter::new(CompactFormatter));
        assert_eq!(rendered, r#""q\"\n\u00e9""#);
    }

    #[test]
    fn test_ascii_escapes_delete() {
        let rendered = render(&"x\u{7f}y~", AsciiFormatter::new(CompactFormatter));
        assert_eq!(rendered, r#""x\u007fy~""#);
    }

    #[test]
    fn test_utf8_keeps_delete_raw() {
        let rendered = render(&"x\u{7f}y", CompactFormatter);
        assert_eq!(rendered, "\"x\u{7f}y\"");
    }

    #[test]
    fn test_ascii_output_parses_back() {
        let original = "K\u{f6}ln \u{1f600}";
        let rendered = render(&original, AsciiFormatter::new(SpacedFormatter));
        let parsed: String = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, original);
    }
}
