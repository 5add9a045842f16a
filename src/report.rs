//! Report construction primitives.
//!
//! Every per-format renderer builds its output through [`Report`], so the
//! value-to-line conventions live in exactly one place:
//!
//! - absent booleans print as `false`, absent integers as `0 (0x0)`;
//! - absent arrays print as `[NULL]`, absent strings as empty text (the
//!   asymmetry is deliberate and matched across all renderers);
//! - present integers print as `<decimal> (0x<HEX>)`;
//! - byte arrays print as upper-case space-separated hex pairs, or decoded
//!   as text with embedded NUL characters stripped.

use std::fmt;

/// Integer types printable in the `<decimal> (0x<HEX>)` form.
pub trait Scalar: fmt::Display + fmt::UpperHex + Default + Copy {}

impl Scalar for u8 {}
impl Scalar for i8 {}
impl Scalar for u16 {}
impl Scalar for i16 {}
impl Scalar for u32 {}
impl Scalar for i32 {}
impl Scalar for u64 {}
impl Scalar for i64 {}

/// Encoding used when a byte array is rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// 7-bit ASCII; bytes outside the range print as `?`.
    Ascii,
    /// UTF-8 with lossy replacement.
    Utf8,
    /// Little-endian UTF-16 with lossy replacement.
    Utf16Le,
}

/// Accumulates one textual report.
///
/// Rendering never fails: absent values degrade to their placeholder
/// representation and accumulation continues.
#[derive(Debug, Default)]
pub struct Report {
    buf: String,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one literal line.
    pub fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Append a blank line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Append a report title followed by its divider.
    pub fn title(&mut self, text: &str) {
        self.line(text);
        self.line("-------------------------");
    }

    /// Append a section heading followed by a divider at the same indent.
    pub fn section(&mut self, heading: &str) {
        let indent: String = heading
            .chars()
            .take_while(|c| c.is_whitespace())
            .collect();
        self.line(heading);
        self.line(&format!("{indent}-------------------------"));
    }

    /// Append a boolean field; absent values print as `false`.
    pub fn field_bool(&mut self, label: &str, value: Option<bool>) {
        let value = value.unwrap_or(false);
        self.line(&format!("{label}: {value}"));
    }

    /// Append an integer field as `<decimal> (0x<HEX>)`; absent values
    /// print as `0 (0x0)`.
    pub fn field_num<T: Scalar>(&mut self, label: &str, value: Option<T>) {
        let value = value.unwrap_or_default();
        self.line(&format!("{label}: {value} (0x{value:X})"));
    }

    /// Append a string field; absent values print as empty text, not
    /// `[NULL]`.
    pub fn field_str(&mut self, label: &str, value: Option<&str>) {
        let value = value.unwrap_or("");
        self.line(&format!("{label}: {value}"));
    }

    /// Append a unique identifier field; absent values print as the
    /// all-zero identifier.
    pub fn field_guid(&mut self, label: &str, value: Option<[u8; 16]>) {
        let value = value.unwrap_or_default();
        self.line(&format!("{label}: {}", format_guid(&value)));
    }

    /// Append a byte array as upper-case space-separated hex pairs; absent
    /// arrays print as `[NULL]`.
    pub fn field_bytes(&mut self, label: &str, value: Option<&[u8]>) {
        let rendered = match value {
            None => String::from("[NULL]"),
            Some(bytes) => spaced_hex(bytes),
        };
        self.line(&format!("{label}: {rendered}"));
    }

    /// Append a byte array decoded as text in the given encoding, with
    /// embedded NUL characters stripped; absent arrays print as `[NULL]`.
    pub fn field_text(&mut self, label: &str, value: Option<&[u8]>, encoding: TextEncoding) {
        let rendered = match value {
            None => String::from("[NULL]"),
            Some(bytes) => decode(bytes, encoding).replace('\0', ""),
        };
        self.line(&format!("{label}: {rendered}"));
    }

    /// Append a numeric or character array as comma-space-joined values;
    /// absent arrays print as `[NULL]`.
    pub fn field_array<T: fmt::Display>(&mut self, label: &str, value: Option<&[T]>) {
        let rendered = match value {
            None => String::from("[NULL]"),
            Some(items) => items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        };
        self.line(&format!("{label}: {rendered}"));
    }

    /// View the accumulated text.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consume the report and return the accumulated text.
    pub fn into_string(self) -> String {
        self.buf
    }
}

fn spaced_hex(bytes: &[u8]) -> String {
    let encoded = hex::encode_upper(bytes);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / 2);
    for (i, ch) in encoded.chars().enumerate() {
        if i > 0 && i % 2 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

fn decode(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Ascii => bytes
            .iter()
            .map(|&b| if b.is_ascii() { b as char } else { '?' })
            .collect(),
        TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        TextEncoding::Utf16Le => {
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
    }
}

fn format_guid(guid: &[u8; 16]) -> String {
    format!(
        "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        u32::from_le_bytes([guid[0], guid[1], guid[2], guid[3]]),
        u16::from_le_bytes([guid[4], guid[5]]),
        u16::from_le_bytes([guid[6], guid[7]]),
        guid[8],
        guid[9],
        guid[10],
        guid[11],
        guid[12],
        guid[13],
        guid[14],
        guid[15],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_num_present_and_absent() {
        let mut report = Report::new();
        report.field_num("Value", Some(255u8));
        report.field_num::<u8>("Value", None);
        assert_eq!(report.as_str(), "Value: 255 (0xFF)\nValue: 0 (0x0)\n");
    }

    #[test]
    fn test_num_wider_types() {
        let mut report = Report::new();
        report.field_num("Offset", Some(16u32));
        report.field_num("Size", Some(0x1234_5678_9ABCu64));
        assert_eq!(
            report.as_str(),
            "Offset: 16 (0x10)\nSize: 20015998343868 (0x123456789ABC)\n"
        );
    }

    #[test]
    fn test_string_absent_is_empty_not_null() {
        let mut report = Report::new();
        report.field_str("Name", None);
        report.field_bytes("Data", None);
        assert_eq!(report.as_str(), "Name: \nData: [NULL]\n");
    }

    #[test]
    fn test_bool_absent_is_false() {
        let mut report = Report::new();
        report.field_bool("Deleted", None);
        report.field_bool("Deleted", Some(true));
        assert_eq!(report.as_str(), "Deleted: false\nDeleted: true\n");
    }

    #[test]
    fn test_bytes_upper_hex_pairs() {
        let mut report = Report::new();
        report.field_bytes("Hash", Some(&[0xDE, 0xAD, 0xBE, 0xEF]));
        assert_eq!(report.as_str(), "Hash: DE AD BE EF\n");
    }

    #[test]
    fn test_text_strips_embedded_nuls() {
        let mut report = Report::new();
        report.field_text("Magic", Some(b"PACK\0\0\0"), TextEncoding::Ascii);
        assert_eq!(report.as_str(), "Magic: PACK\n");
    }

    #[test]
    fn test_text_utf16() {
        let bytes = [b'H', 0, b'L', 0];
        let mut report = Report::new();
        report.field_text("Name", Some(&bytes), TextEncoding::Utf16Le);
        assert_eq!(report.as_str(), "Name: HL\n");
    }

    #[test]
    fn test_numeric_array_join() {
        let mut report = Report::new();
        report.field_array("Indexes", Some(&[1u16, 2, 3]));
        report.field_array::<u16>("Indexes", None);
        assert_eq!(report.as_str(), "Indexes: 1, 2, 3\nIndexes: [NULL]\n");
    }

    #[test]
    fn test_guid_absent_all_zero() {
        let mut report = Report::new();
        report.field_guid("UID", None);
        assert_eq!(
            report.as_str(),
            "UID: 00000000-0000-0000-0000-000000000000\n"
        );
    }

    #[test]
    fn test_section_divider_indent() {
        let mut report = Report::new();
        report.section("  Header Information:");
        assert_eq!(
            report.as_str(),
            "  Header Information:\n  -------------------------\n"
        );
    }

    #[test]
    fn test_negative_scalar_two_complement_hex() {
        let mut report = Report::new();
        report.field_num("Delta", Some(-1i16));
        assert_eq!(report.as_str(), "Delta: -1 (0xFFFF)\n");
    }
}
