//! Half-Life package file (PAK).

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed PAK file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct File {
    pub header: Option<Header>,
    pub directory_items: Option<Vec<Option<DirectoryItem>>>,
}

/// PAK header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub signature: Option<String>,
    pub directory_offset: Option<u32>,
    pub directory_length: Option<u32>,
}

/// One directory item.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryItem {
    pub item_name: Option<String>,
    pub item_offset: Option<u32>,
    pub item_length: Option<u32>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Pak(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Pak(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a PAK report.
pub fn print(report: &mut Report, file: &File) {
    report.title("PAK Information:");
    report.blank();

    print_header(report, file.header.as_ref());
    print_directory_items(report, file.directory_items.as_deref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_str("  Signature", header.signature.as_deref());
    report.field_num("  Directory offset", header.directory_offset);
    report.field_num("  Directory length", header.directory_length);
    report.blank();
}

fn print_directory_items(report: &mut Report, entries: Option<&[Option<DirectoryItem>]>) {
    report.section("  Directory Items Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No directory items");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Directory Item {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_str("    Item name", entry.item_name.as_deref());
        report.field_num("    Item offset", entry.item_offset);
        report.field_num("    Item length", entry.item_length);
    }
    report.blank();
}
