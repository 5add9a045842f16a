//! Quantum compressed archive.

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed Quantum archive.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Archive {
    pub header: Option<Header>,
    pub file_list: Option<Vec<Option<FileDescriptor>>>,
    pub compressed_data_offset: Option<i64>,
}

/// Quantum header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub signature: Option<String>,
    pub major_version: Option<u8>,
    pub minor_version: Option<u8>,
    pub file_count: Option<u16>,
    pub table_size: Option<u8>,
    pub compression_flags: Option<u8>,
}

/// One file descriptor. The trailing checksum word only exists in some
/// archives.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileDescriptor {
    pub file_name_size: Option<u8>,
    pub file_name: Option<String>,
    pub comment_field_size: Option<u8>,
    pub comment_field: Option<String>,
    pub expanded_file_size: Option<u32>,
    pub file_time: Option<u16>,
    pub file_date: Option<u16>,
    pub unknown: Option<u16>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Quantum(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Quantum(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a Quantum report.
pub fn print(report: &mut Report, archive: &Archive) {
    report.title("Quantum Information:");
    report.blank();

    print_header(report, archive.header.as_ref());
    print_file_list(report, archive.file_list.as_deref());
    report.field_num("  Compressed data offset", archive.compressed_data_offset);
    report.blank();
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_str("  Signature", header.signature.as_deref());
    report.field_num("  Major version", header.major_version);
    report.field_num("  Minor version", header.minor_version);
    report.field_num("  File count", header.file_count);
    report.field_num("  Table size", header.table_size);
    report.field_num("  Compression flags", header.compression_flags);
    report.blank();
}

fn print_file_list(report: &mut Report, entries: Option<&[Option<FileDescriptor>]>) {
    report.section("  File List Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No file list items");
            report.blank();
            return;
        }
    };

    for (i, descriptor) in entries.iter().enumerate() {
        report.line(&format!("  File Descriptor {i}"));
        let Some(descriptor) = descriptor else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    File name size", descriptor.file_name_size);
        report.field_str("    File name", descriptor.file_name.as_deref());
        report.field_num("    Comment field size", descriptor.comment_field_size);
        report.field_str("    Comment field", descriptor.comment_field.as_deref());
        report.field_num("    Expanded file size", descriptor.expanded_file_size);
        report.field_num("    File time", descriptor.file_time);
        report.field_num("    File date", descriptor.file_date);
        if let Some(unknown) = descriptor.unknown {
            report.field_num("    Unknown (Checksum?)", Some(unknown));
        }
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_checksum_only_when_present() {
        let with = FileDescriptor {
            file_name: Some(String::from("readme.txt")),
            unknown: Some(0xBEEF),
            ..FileDescriptor::default()
        };
        let without = FileDescriptor {
            file_name: Some(String::from("setup.inf")),
            ..FileDescriptor::default()
        };
        let archive = Archive {
            header: None,
            file_list: Some(vec![Some(with), Some(without)]),
            compressed_data_offset: Some(512),
        };

        let mut report = Report::new();
        print(&mut report, &archive);
        let text = report.as_str();
        assert_eq!(text.matches("Unknown (Checksum?)").count(), 1);
        assert!(text.contains("Unknown (Checksum?): 48879 (0xBEEF)"));
        assert!(text.contains("Compressed data offset: 512 (0x200)"));
    }

    #[test]
    fn test_empty_file_list() {
        let mut report = Report::new();
        print(&mut report, &Archive::default());
        assert!(report.as_str().contains("No file list items"));
        assert!(report.as_str().contains("No header"));
    }
}
