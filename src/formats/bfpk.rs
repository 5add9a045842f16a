//! BFPK custom archive.

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed BFPK archive.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Archive {
    pub header: Option<Header>,
    pub files: Option<Vec<Option<FileEntry>>>,
}

/// BFPK header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub magic: Option<String>,
    pub version: Option<i32>,
    pub files: Option<i32>,
}

/// One file table entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileEntry {
    pub name_size: Option<i32>,
    pub name: Option<String>,
    pub uncompressed_size: Option<i32>,
    pub offset: Option<i32>,
    pub compressed_size: Option<i32>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Bfpk(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Bfpk(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a BFPK report.
pub fn print(report: &mut Report, archive: &Archive) {
    report.title("BFPK Information:");
    report.blank();

    print_header(report, archive.header.as_ref());
    print_files(report, archive.files.as_deref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_str("  Magic", header.magic.as_deref());
    report.field_num("  Version", header.version);
    report.field_num("  Files", header.files);
    report.blank();
}

fn print_files(report: &mut Report, files: Option<&[Option<FileEntry>]>) {
    report.section("  File Table Information:");
    let files = match files {
        Some(files) if !files.is_empty() => files,
        _ => {
            report.line("  No file table items");
            return;
        }
    };

    for (i, entry) in files.iter().enumerate() {
        report.line(&format!("  File Table Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Name size", entry.name_size);
        report.field_str("    Name", entry.name.as_deref());
        report.field_num("    Uncompressed size", entry.uncompressed_size);
        report.field_num("    Offset", entry.offset);
        report.field_num("    Compressed size", entry.compressed_size);
    }
}
