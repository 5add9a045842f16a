//! Half-Life No Cache File (NCF).

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed NCF file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct File {
    pub header: Option<Header>,
    pub directory_header: Option<DirectoryHeader>,
    pub directory_entries: Option<Vec<Option<DirectoryEntry>>>,
    pub directory_info_1_entries: Option<Vec<Option<DirectoryInfoEntry>>>,
    pub directory_info_2_entries: Option<Vec<Option<DirectoryInfoEntry>>>,
    pub directory_copy_entries: Option<Vec<Option<DirectoryCopyEntry>>>,
    pub directory_local_entries: Option<Vec<Option<DirectoryLocalEntry>>>,
    pub unknown_header: Option<UnknownHeader>,
    pub unknown_entries: Option<Vec<Option<UnknownEntry>>>,
    pub checksum_header: Option<ChecksumHeader>,
    pub checksum_map_header: Option<ChecksumMapHeader>,
    pub checksum_map_entries: Option<Vec<Option<ChecksumMapEntry>>>,
    pub checksum_entries: Option<Vec<Option<ChecksumEntry>>>,
}

/// File header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub dummy_0: Option<u32>,
    pub major_version: Option<u32>,
    pub minor_version: Option<u32>,
    pub cache_id: Option<u32>,
    pub last_version_played: Option<u32>,
    pub dummy_1: Option<u32>,
    pub dummy_2: Option<u32>,
    pub file_size: Option<u32>,
    pub block_size: Option<u32>,
    pub block_count: Option<u32>,
    pub dummy_3: Option<u32>,
}

/// Directory header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryHeader {
    pub dummy_0: Option<u32>,
    pub cache_id: Option<u32>,
    pub last_version_played: Option<u32>,
    pub item_count: Option<u32>,
    pub file_count: Option<u32>,
    pub checksum_data_length: Option<u32>,
    pub directory_size: Option<u32>,
    pub name_size: Option<u32>,
    pub info_1_count: Option<u32>,
    pub copy_count: Option<u32>,
    pub local_count: Option<u32>,
    pub dummy_1: Option<u32>,
    pub dummy_2: Option<u32>,
    pub checksum: Option<u32>,
}

/// One directory entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryEntry {
    pub name_offset: Option<u32>,
    pub name: Option<String>,
    pub item_size: Option<u32>,
    pub checksum_index: Option<u32>,
    pub directory_flags: Option<u32>,
    pub parent_index: Option<u32>,
    pub next_index: Option<u32>,
    pub first_index: Option<u32>,
}

/// Single-field info entry, shared by both info tables.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryInfoEntry {
    pub dummy_0: Option<u32>,
}

/// One copy entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryCopyEntry {
    pub directory_index: Option<u32>,
}

/// One local entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryLocalEntry {
    pub directory_index: Option<u32>,
}

/// Header of the unknown trailing block.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnknownHeader {
    pub dummy_0: Option<u32>,
    pub dummy_1: Option<u32>,
}

/// One unknown trailing entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnknownEntry {
    pub dummy_0: Option<u32>,
}

/// Checksum header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChecksumHeader {
    pub dummy_0: Option<u32>,
    pub checksum_size: Option<u32>,
}

/// Checksum map header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChecksumMapHeader {
    pub dummy_0: Option<u32>,
    pub dummy_1: Option<u32>,
    pub item_count: Option<u32>,
    pub checksum_count: Option<u32>,
}

/// One checksum map entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChecksumMapEntry {
    pub checksum_count: Option<u32>,
    pub first_checksum_index: Option<u32>,
}

/// One checksum entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChecksumEntry {
    pub checksum: Option<u32>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Ncf(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Ncf(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render an NCF report. Sections follow on-disk order: file header,
/// directory block, unknown block, checksum block.
pub fn print(report: &mut Report, file: &File) {
    report.title("NCF Information:");
    report.blank();

    print_header(report, file.header.as_ref());

    print_directory_header(report, file.directory_header.as_ref());
    print_directory_entries(report, file.directory_entries.as_deref());
    print_info_entries(report, file.directory_info_1_entries.as_deref(), 1);
    print_info_entries(report, file.directory_info_2_entries.as_deref(), 2);
    print_copy_entries(report, file.directory_copy_entries.as_deref());
    print_local_entries(report, file.directory_local_entries.as_deref());
    print_unknown_header(report, file.unknown_header.as_ref());
    print_unknown_entries(report, file.unknown_entries.as_deref());

    print_checksum_header(report, file.checksum_header.as_ref());
    print_checksum_map_header(report, file.checksum_map_header.as_ref());
    print_checksum_map_entries(report, file.checksum_map_entries.as_deref());
    print_checksum_entries(report, file.checksum_entries.as_deref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_num("  Dummy 0", header.dummy_0);
    report.field_num("  Major version", header.major_version);
    report.field_num("  Minor version", header.minor_version);
    report.field_num("  Cache ID", header.cache_id);
    report.field_num("  Last version played", header.last_version_played);
    report.field_num("  Dummy 1", header.dummy_1);
    report.field_num("  Dummy 2", header.dummy_2);
    report.field_num("  File size", header.file_size);
    report.field_num("  Block size", header.block_size);
    report.field_num("  Block count", header.block_count);
    report.field_num("  Dummy 3", header.dummy_3);
    report.blank();
}

fn print_directory_header(report: &mut Report, header: Option<&DirectoryHeader>) {
    report.section("  Directory Header Information:");
    let Some(header) = header else {
        report.line("  No directory header");
        report.blank();
        return;
    };

    report.field_num("  Dummy 0", header.dummy_0);
    report.field_num("  Cache ID", header.cache_id);
    report.field_num("  Last version played", header.last_version_played);
    report.field_num("  Item count", header.item_count);
    report.field_num("  File count", header.file_count);
    report.field_num("  Checksum data length", header.checksum_data_length);
    report.field_num("  Directory size", header.directory_size);
    report.field_num("  Name size", header.name_size);
    report.field_num("  Info 1 count", header.info_1_count);
    report.field_num("  Copy count", header.copy_count);
    report.field_num("  Local count", header.local_count);
    report.field_num("  Dummy 1", header.dummy_1);
    report.field_num("  Dummy 2", header.dummy_2);
    report.field_num("  Checksum", header.checksum);
    report.blank();
}

fn print_directory_entries(report: &mut Report, entries: Option<&[Option<DirectoryEntry>]>) {
    report.section("  Directory Entries Information:");
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

        report.field_num("    Name offset", entry.name_offset);
        report.field_str("    Name", entry.name.as_deref());
        report.field_num("    Item size", entry.item_size);
        report.field_num("    Checksum index", entry.checksum_index);
        report.field_num("    Directory flags", entry.directory_flags);
        report.field_num("    Parent index", entry.parent_index);
        report.field_num("    Next index", entry.next_index);
        report.field_num("    First index", entry.first_index);
    }
    report.blank();
}

fn print_info_entries(
    report: &mut Report,
    entries: Option<&[Option<DirectoryInfoEntry>]>,
    table: u8,
) {
    report.section(&format!("  Directory Info {table} Entries Information:"));
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line(&format!("  No directory info {table} entries"));
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Directory Info {table} Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Dummy 0", entry.dummy_0);
    }
    report.blank();
}

fn print_copy_entries(report: &mut Report, entries: Option<&[Option<DirectoryCopyEntry>]>) {
    report.section("  Directory Copy Entries Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No directory copy entries");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Directory Copy Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Directory index", entry.directory_index);
    }
    report.blank();
}

fn print_local_entries(report: &mut Report, entries: Option<&[Option<DirectoryLocalEntry>]>) {
    report.section("  Directory Local Entries Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No directory local entries");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Directory Local Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Directory index", entry.directory_index);
    }
    report.blank();
}

fn print_unknown_header(report: &mut Report, header: Option<&UnknownHeader>) {
    report.section("  Unknown Header Information:");
    let Some(header) = header else {
        report.line("  No unknown header");
        report.blank();
        return;
    };

    report.field_num("  Dummy 0", header.dummy_0);
    report.field_num("  Dummy 1", header.dummy_1);
    report.blank();
}

fn print_unknown_entries(report: &mut Report, entries: Option<&[Option<UnknownEntry>]>) {
    report.section("  Unknown Entries Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No unknown entries");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Unknown Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Dummy 0", entry.dummy_0);
    }
    report.blank();
}

fn print_checksum_header(report: &mut Report, header: Option<&ChecksumHeader>) {
    report.section("  Checksum Header Information:");
    let Some(header) = header else {
        report.line("  No checksum header");
        report.blank();
        return;
    };

    report.field_num("  Dummy 0", header.dummy_0);
    report.field_num("  Checksum size", header.checksum_size);
    report.blank();
}

fn print_checksum_map_header(report: &mut Report, header: Option<&ChecksumMapHeader>) {
    report.section("  Checksum Map Header Information:");
    let Some(header) = header else {
        report.line("  No checksum map header");
        report.blank();
        return;
    };

    report.field_num("  Dummy 0", header.dummy_0);
    report.field_num("  Dummy 1", header.dummy_1);
    report.field_num("  Item count", header.item_count);
    report.field_num("  Checksum count", header.checksum_count);
    report.blank();
}

fn print_checksum_map_entries(report: &mut Report, entries: Option<&[Option<ChecksumMapEntry>]>) {
    report.section("  Checksum Map Entries Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No checksum map entries");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Checksum Map Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Checksum count", entry.checksum_count);
        report.field_num("    First checksum index", entry.first_checksum_index);
    }
    report.blank();
}

fn print_checksum_entries(report: &mut Report, entries: Option<&[Option<ChecksumEntry>]>) {
    report.section("  Checksum Entries Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No checksum entries");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Checksum Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Checksum", entry.checksum);
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sections_emit_placeholders_when_absent() {
        let mut report = Report::new();
        print(&mut report, &File::default());
        let text = report.as_str();
        for placeholder in [
            "No header",
            "No directory header",
            "No directory entries",
            "No directory info 1 entries",
            "No directory info 2 entries",
            "No directory copy entries",
            "No directory local entries",
            "No unknown header",
            "No unknown entries",
            "No checksum header",
            "No checksum map header",
            "No checksum map entries",
            "No checksum entries",
        ] {
            assert!(text.contains(placeholder), "missing: {placeholder}");
        }
    }

    #[test]
    fn test_directory_entry_fields() {
        let file = File {
            directory_entries: Some(vec![Some(DirectoryEntry {
                name_offset: Some(1),
                name: Some(String::from("half-life")),
                item_size: Some(2),
                checksum_index: Some(3),
                directory_flags: Some(4),
                parent_index: Some(5),
                next_index: Some(6),
                first_index: Some(7),
            })]),
            ..File::default()
        };
        let mut report = Report::new();
        print(&mut report, &file);
        let text = report.as_str();
        assert!(text.contains("Name: half-life"));
        assert!(text.contains("Directory flags: 4 (0x4)"));
        assert!(text.contains("First index: 7 (0x7)"));
    }

    #[test]
    fn test_info_tables_numbered_independently() {
        let file = File {
            directory_info_1_entries: Some(vec![Some(DirectoryInfoEntry { dummy_0: Some(1) })]),
            directory_info_2_entries: Some(vec![Some(DirectoryInfoEntry { dummy_0: Some(2) })]),
            ..File::default()
        };
        let mut report = Report::new();
        print(&mut report, &file);
        let text = report.as_str();
        assert!(text.contains("Directory Info 1 Entry 0"));
        assert!(text.contains("Directory Info 2 Entry 0"));
    }
}
