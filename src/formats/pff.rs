//! NovaLogic game archive (PFF).

use crate::formats::ParsedFile;
use crate::report::{Report, TextEncoding};
use serde::Serialize;

/// Parsed PFF archive.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Archive {
    pub header: Option<Header>,
    pub segments: Option<Vec<Option<Segment>>>,
    pub footer: Option<Footer>,
}

/// PFF header. The signature follows the leading header-size field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub header_size: Option<u32>,
    pub signature: Option<String>,
    pub number_of_files: Option<u32>,
    pub file_segment_size: Option<u32>,
    pub file_list_offset: Option<u32>,
}

/// One file segment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Segment {
    pub deleted: Option<bool>,
    pub file_location: Option<u32>,
    pub file_size: Option<u32>,
    pub packed_date: Option<u32>,
    pub file_name: Option<Vec<u8>>,
    pub modified_date: Option<u32>,
    pub compression_level: Option<u32>,
}

/// PFF footer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Footer {
    pub system_ip: Option<u32>,
    pub reserved: Option<u32>,
    pub king_tag: Option<String>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Pff(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Pff(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a PFF report.
pub fn print(report: &mut Report, archive: &Archive) {
    report.title("PFF Information:");
    report.blank();

    print_header(report, archive.header.as_ref());
    print_segments(report, archive.segments.as_deref());
    print_footer(report, archive.footer.as_ref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_num("  Header size", header.header_size);
    report.field_str("  Signature", header.signature.as_deref());
    report.field_num("  Number of files", header.number_of_files);
    report.field_num("  File segment size", header.file_segment_size);
    report.field_num("  File list offset", header.file_list_offset);
    report.blank();
}

fn print_segments(report: &mut Report, segments: Option<&[Option<Segment>]>) {
    report.section("  Segments Information:");
    let segments = match segments {
        Some(segments) if !segments.is_empty() => segments,
        _ => {
            report.line("  No segments");
            report.blank();
            return;
        }
    };

    for (i, segment) in segments.iter().enumerate() {
        report.line(&format!("  Segment {i}"));
        let Some(segment) = segment else {
            report.line("    [NULL]");
            continue;
        };

        report.field_bool("    Deleted", segment.deleted);
        report.field_num("    File location", segment.file_location);
        report.field_num("    File size", segment.file_size);
        report.field_num("    Packed date", segment.packed_date);
        report.field_text("    File name", segment.file_name.as_deref(), TextEncoding::Ascii);
        report.field_num("    Modified date", segment.modified_date);
        report.field_num("    Compression level", segment.compression_level);
    }
    report.blank();
}

fn print_footer(report: &mut Report, footer: Option<&Footer>) {
    report.section("  Footer Information:");
    let Some(footer) = footer else {
        report.line("  No footer");
        report.blank();
        return;
    };

    report.field_num("  System IP", footer.system_ip);
    report.field_num("  Reserved", footer.reserved);
    report.field_str("  King tag", footer.king_tag.as_deref());
    report.blank();
}
