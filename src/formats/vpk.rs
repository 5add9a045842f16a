//! Valve package file (VPK).

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed VPK directory file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct File {
    pub header: Option<Header>,
    pub extended_header: Option<ExtendedHeader>,
    pub archive_hashes: Option<Vec<Option<ArchiveHash>>>,
    pub directory_items: Option<Vec<Option<DirectoryItem>>>,
}

/// VPK header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub signature: Option<u32>,
    pub version: Option<u32>,
    pub directory_length: Option<u32>,
}

/// Version 2 extended header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtendedHeader {
    pub dummy_0: Option<u32>,
    pub archive_hash_length: Option<u32>,
    pub extra_length: Option<u32>,
    pub dummy_1: Option<u32>,
}

/// One archive hash entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArchiveHash {
    pub archive_index: Option<u32>,
    pub archive_offset: Option<u32>,
    pub length: Option<u32>,
    pub hash: Option<Vec<u8>>,
}

/// One directory item with its nested entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryItem {
    pub extension: Option<String>,
    pub path: Option<String>,
    pub name: Option<String>,
    pub directory_entry: Option<DirectoryEntry>,
}

/// Location record nested inside a directory item.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryEntry {
    pub crc: Option<u32>,
    pub preload_bytes: Option<u16>,
    pub archive_index: Option<u16>,
    pub entry_offset: Option<u32>,
    pub entry_length: Option<u32>,
    pub dummy_0: Option<u16>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Vpk(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Vpk(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a VPK report.
pub fn print(report: &mut Report, file: &File) {
    report.title("VPK Information:");
    report.blank();

    print_header(report, file.header.as_ref());
    print_extended_header(report, file.extended_header.as_ref());
    print_archive_hashes(report, file.archive_hashes.as_deref());
    print_directory_items(report, file.directory_items.as_deref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_num("  Signature", header.signature);
    report.field_num("  Version", header.version);
    report.field_num("  Directory length", header.directory_length);
    report.blank();
}

fn print_extended_header(report: &mut Report, header: Option<&ExtendedHeader>) {
    report.section("  Extended Header Information:");
    let Some(header) = header else {
        report.line("  No extended header");
        report.blank();
        return;
    };

    report.field_num("  Dummy 0", header.dummy_0);
    report.field_num("  Archive hash length", header.archive_hash_length);
    report.field_num("  Extra length", header.extra_length);
    report.field_num("  Dummy 1", header.dummy_1);
    report.blank();
}

fn print_archive_hashes(report: &mut Report, entries: Option<&[Option<ArchiveHash>]>) {
    report.section("  Archive Hashes Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No archive hashes");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Archive Hash {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Archive index", entry.archive_index);
        report.field_num("    Archive offset", entry.archive_offset);
        report.field_num("    Length", entry.length);
        report.field_bytes("    Hash", entry.hash.as_deref());
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
            report.blank();
            continue;
        };

        report.field_str("    Extension", entry.extension.as_deref());
        report.field_str("    Path", entry.path.as_deref());
        report.field_str("    Name", entry.name.as_deref());
        report.blank();

        print_directory_entry(report, entry.directory_entry.as_ref());
    }
    report.blank();
}

fn print_directory_entry(report: &mut Report, entry: Option<&DirectoryEntry>) {
    report.section("    Directory Entry:");
    let Some(entry) = entry else {
        report.line("    [NULL]");
        return;
    };

    report.field_num("    CRC", entry.crc);
    report.field_num("    Preload bytes", entry.preload_bytes);
    report.field_num("    Archive index", entry.archive_index);
    report.field_num("    Entry offset", entry.entry_offset);
    report.field_num("    Entry length", entry.entry_length);
    report.field_num("    Dummy 0", entry.dummy_0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_directory_entry() {
        let file = File {
            header: Some(Header {
                signature: Some(0x55AA1234),
                version: Some(2),
                directory_length: Some(128),
            }),
            directory_items: Some(vec![Some(DirectoryItem {
                extension: Some(String::from("vtf")),
                path: Some(String::from("materials/brick")),
                name: Some(String::from("wall01")),
                directory_entry: Some(DirectoryEntry {
                    crc: Some(0xCAFEF00D),
                    preload_bytes: Some(0),
                    archive_index: Some(1),
                    entry_offset: Some(4096),
                    entry_length: Some(2048),
                    dummy_0: Some(0xFFFF),
                }),
            })]),
            ..File::default()
        };
        let mut report = Report::new();
        print(&mut report, &file);
        let text = report.as_str();
        assert!(text.contains("Extension: vtf"));
        assert!(text.contains("Directory Entry:"));
        assert!(text.contains("CRC: 3405705229 (0xCAFEF00D)"));
        assert!(text.contains("Dummy 0: 65535 (0xFFFF)"));
    }

    #[test]
    fn test_item_missing_nested_entry() {
        let file = File {
            directory_items: Some(vec![Some(DirectoryItem::default())]),
            ..File::default()
        };
        let mut report = Report::new();
        print(&mut report, &file);
        let text = report.as_str();
        assert!(text.contains("Directory Entry:"));
        assert!(text.contains("    [NULL]"));
    }

    #[test]
    fn test_all_sections_absent() {
        let mut report = Report::new();
        print(&mut report, &File::default());
        let text = report.as_str();
        assert!(text.contains("No header"));
        assert!(text.contains("No extended header"));
        assert!(text.contains("No archive hashes"));
        assert!(text.contains("No directory items"));
    }
}
