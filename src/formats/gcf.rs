//! Half-Life Game Cache File (GCF).

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed GCF file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct File {
    pub header: Option<Header>,
    pub block_entry_header: Option<BlockEntryHeader>,
    pub block_entries: Option<Vec<Option<BlockEntry>>>,
    pub fragmentation_map_header: Option<FragmentationMapHeader>,
    pub fragmentation_maps: Option<Vec<Option<FragmentationMap>>>,
    pub directory_header: Option<DirectoryHeader>,
    pub directory_entries: Option<Vec<Option<DirectoryEntry>>>,
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

/// Block entry table header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlockEntryHeader {
    pub block_count: Option<u32>,
    pub blocks_used: Option<u32>,
    pub dummy_0: Option<u32>,
    pub dummy_1: Option<u32>,
    pub dummy_2: Option<u32>,
    pub dummy_3: Option<u32>,
    pub dummy_4: Option<u32>,
    pub checksum: Option<u32>,
}

/// One block entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlockEntry {
    pub entry_flags: Option<u32>,
    pub file_data_offset: Option<u32>,
    pub file_data_size: Option<u32>,
    pub first_data_block_index: Option<u32>,
    pub next_block_entry_index: Option<u32>,
    pub previous_block_entry_index: Option<u32>,
    pub directory_index: Option<u32>,
}

/// Fragmentation map header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FragmentationMapHeader {
    pub block_count: Option<u32>,
    pub first_unused_entry: Option<u32>,
    pub terminator: Option<u32>,
    pub checksum: Option<u32>,
}

/// One fragmentation map entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FragmentationMap {
    pub next_data_block_index: Option<u32>,
}

/// Directory header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryHeader {
    pub dummy_0: Option<u32>,
    pub cache_id: Option<u32>,
    pub last_version_played: Option<u32>,
    pub item_count: Option<u32>,
    pub file_count: Option<u32>,
    pub dummy_1: Option<u32>,
    pub directory_size: Option<u32>,
    pub name_size: Option<u32>,
    pub info_1_count: Option<u32>,
    pub copy_count: Option<u32>,
    pub local_count: Option<u32>,
    pub dummy_2: Option<u32>,
    pub dummy_3: Option<u32>,
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

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Gcf(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Gcf(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a GCF report.
pub fn print(report: &mut Report, file: &File) {
    report.title("GCF Information:");
    report.blank();

    print_header(report, file.header.as_ref());
    print_block_entry_header(report, file.block_entry_header.as_ref());
    print_block_entries(report, file.block_entries.as_deref());
    print_fragmentation_map_header(report, file.fragmentation_map_header.as_ref());
    print_fragmentation_maps(report, file.fragmentation_maps.as_deref());
    print_directory_header(report, file.directory_header.as_ref());
    print_directory_entries(report, file.directory_entries.as_deref());
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

fn print_block_entry_header(report: &mut Report, header: Option<&BlockEntryHeader>) {
    report.section("  Block Entry Header Information:");
    let Some(header) = header else {
        report.line("  No block entry header");
        report.blank();
        return;
    };

    report.field_num("  Block count", header.block_count);
    report.field_num("  Blocks used", header.blocks_used);
    report.field_num("  Dummy 0", header.dummy_0);
    report.field_num("  Dummy 1", header.dummy_1);
    report.field_num("  Dummy 2", header.dummy_2);
    report.field_num("  Dummy 3", header.dummy_3);
    report.field_num("  Dummy 4", header.dummy_4);
    report.field_num("  Checksum", header.checksum);
    report.blank();
}

fn print_block_entries(report: &mut Report, entries: Option<&[Option<BlockEntry>]>) {
    report.section("  Block Entries Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No block entries");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Block Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Entry flags", entry.entry_flags);
        report.field_num("    File data offset", entry.file_data_offset);
        report.field_num("    File data size", entry.file_data_size);
        report.field_num("    First data block index", entry.first_data_block_index);
        report.field_num("    Next block entry index", entry.next_block_entry_index);
        report.field_num(
            "    Previous block entry index",
            entry.previous_block_entry_index,
        );
        report.field_num("    Directory index", entry.directory_index);
    }
    report.blank();
}

fn print_fragmentation_map_header(report: &mut Report, header: Option<&FragmentationMapHeader>) {
    report.section("  Fragmentation Map Header Information:");
    let Some(header) = header else {
        report.line("  No fragmentation map header");
        report.blank();
        return;
    };

    report.field_num("  Block count", header.block_count);
    report.field_num("  First unused entry", header.first_unused_entry);
    report.field_num("  Terminator", header.terminator);
    report.field_num("  Checksum", header.checksum);
    report.blank();
}

fn print_fragmentation_maps(report: &mut Report, entries: Option<&[Option<FragmentationMap>]>) {
    report.section("  Fragmentation Maps Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No fragmentation maps");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Fragmentation Map {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Next data block index", entry.next_data_block_index);
    }
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
    report.field_num("  Dummy 1", header.dummy_1);
    report.field_num("  Directory size", header.directory_size);
    report.field_num("  Name size", header.name_size);
    report.field_num("  Info 1 count", header.info_1_count);
    report.field_num("  Copy count", header.copy_count);
    report.field_num("  Local count", header.local_count);
    report.field_num("  Dummy 2", header.dummy_2);
    report.field_num("  Dummy 3", header.dummy_3);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_absent_sections() {
        let mut report = Report::new();
        print(&mut report, &File::default());
        let text = report.as_str();
        assert!(text.contains("No header"));
        assert!(text.contains("No block entries"));
        assert!(text.contains("No fragmentation maps"));
        assert!(text.contains("No directory entries"));
    }

    #[test]
    fn test_block_entry_links() {
        let file = File {
            block_entries: Some(vec![Some(BlockEntry {
                entry_flags: Some(0x8000),
                first_data_block_index: Some(3),
                next_block_entry_index: Some(4),
                ..BlockEntry::default()
            })]),
            ..File::default()
        };
        let mut report = Report::new();
        print(&mut report, &file);
        let text = report.as_str();
        assert!(text.contains("Entry flags: 32768 (0x8000)"));
        assert!(text.contains("Next block entry index: 4 (0x4)"));
    }
}
