//! Xbox package file (XZP).

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed XZP file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct File {
    pub header: Option<Header>,
    pub directory_entries: Option<Vec<Option<DirectoryEntry>>>,
    pub preload_directory_entries: Option<Vec<Option<DirectoryEntry>>>,
    pub preload_directory_mappings: Option<Vec<Option<DirectoryMapping>>>,
    pub directory_items: Option<Vec<Option<DirectoryItem>>>,
    pub footer: Option<Footer>,
}

/// XZP header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub signature: Option<String>,
    pub version: Option<u32>,
    pub preload_directory_entry_count: Option<u32>,
    pub directory_entry_count: Option<u32>,
    pub preload_bytes: Option<u32>,
    pub header_length: Option<u32>,
    pub directory_item_count: Option<u32>,
    pub directory_item_offset: Option<u32>,
    pub directory_item_length: Option<u32>,
}

/// One directory entry; also used for the preload directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryEntry {
    pub file_name_crc: Option<u32>,
    pub entry_length: Option<u32>,
    pub entry_offset: Option<u32>,
}

/// Mapping from a file to its preload directory slot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryMapping {
    pub preload_directory_entry_index: Option<u16>,
}

/// One named directory item.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryItem {
    pub file_name_crc: Option<u32>,
    pub name_offset: Option<u32>,
    pub name: Option<String>,
    pub time_created: Option<u32>,
}

/// XZP footer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Footer {
    pub file_length: Option<u32>,
    pub signature: Option<String>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Xzp(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Xzp(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render an XZP report.
pub fn print(report: &mut Report, file: &File) {
    report.title("XZP Information:");
    report.blank();

    print_header(report, file.header.as_ref());
    print_directory_entries(report, file.directory_entries.as_deref(), "Directory");
    print_directory_entries(
        report,
        file.preload_directory_entries.as_deref(),
        "Preload Directory",
    );
    print_directory_mappings(report, file.preload_directory_mappings.as_deref());
    print_directory_items(report, file.directory_items.as_deref());
    print_footer(report, file.footer.as_ref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_str("  Signature", header.signature.as_deref());
    report.field_num("  Version", header.version);
    report.field_num(
        "  Preload directory entry count",
        header.preload_directory_entry_count,
    );
    report.field_num("  Directory entry count", header.directory_entry_count);
    report.field_num("  Preload bytes", header.preload_bytes);
    report.field_num("  Header length", header.header_length);
    report.field_num("  Directory item count", header.directory_item_count);
    report.field_num("  Directory item offset", header.directory_item_offset);
    report.field_num("  Directory item length", header.directory_item_length);
    report.blank();
}

fn print_directory_entries(
    report: &mut Report,
    entries: Option<&[Option<DirectoryEntry>]>,
    prefix: &str,
) {
    report.section(&format!("  {prefix} Entries Information:"));
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No directory entries");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Directory Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    File name CRC", entry.file_name_crc);
        report.field_num("    Entry length", entry.entry_length);
        report.field_num("    Entry offset", entry.entry_offset);
    }
    report.blank();
}

fn print_directory_mappings(report: &mut Report, entries: Option<&[Option<DirectoryMapping>]>) {
    report.section("  Preload Directory Mappings Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No preload directory mappings");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Directory Mapping {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num(
            "    Preload directory entry index",
            entry.preload_directory_entry_index,
        );
    }
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

        report.field_num("    File name CRC", entry.file_name_crc);
        report.field_num("    Name offset", entry.name_offset);
        report.field_str("    Name", entry.name.as_deref());
        report.field_num("    Time created", entry.time_created);
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

    report.field_num("  File length", footer.file_length);
    report.field_str("  Signature", footer.signature.as_deref());
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_entry_printer_uses_prefix() {
        let file = File {
            directory_entries: Some(vec![Some(DirectoryEntry::default())]),
            preload_directory_entries: Some(vec![Some(DirectoryEntry::default())]),
            ..File::default()
        };
        let mut report = Report::new();
        print(&mut report, &file);
        let text = report.as_str();
        assert!(text.contains("  Directory Entries Information:"));
        assert!(text.contains("  Preload Directory Entries Information:"));
    }

    #[test]
    fn test_footer_fields() {
        let file = File {
            footer: Some(Footer {
                file_length: Some(8192),
                signature: Some(String::from("tFzX")),
            }),
            ..File::default()
        };
        let mut report = Report::new();
        print(&mut report, &file);
        let text = report.as_str();
        assert!(text.contains("File length: 8192 (0x2000)"));
        assert!(text.contains("Signature: tFzX"));
    }

    #[test]
    fn test_all_absent_sections() {
        let mut report = Report::new();
        print(&mut report, &File::default());
        let text = report.as_str();
        assert!(text.contains("No header"));
        assert!(text.contains("No preload directory mappings"));
        assert!(text.contains("No directory items"));
        assert!(text.contains("No footer"));
    }
}
