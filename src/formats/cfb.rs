//! Compound File Binary.

use crate::formats::ParsedFile;
use crate::report::{Report, TextEncoding};
use serde::Serialize;

/// Parsed compound file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Binary {
    pub header: Option<Header>,
    pub directory_entries: Option<Vec<Option<DirectoryEntry>>>,
}

/// Compound file header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub signature: Option<u64>,
    pub clsid: Option<[u8; 16]>,
    pub minor_version: Option<u16>,
    pub major_version: Option<u16>,
    pub byte_order: Option<u16>,
    pub sector_shift: Option<u16>,
    pub mini_sector_shift: Option<u16>,
    pub number_of_directory_sectors: Option<u32>,
    pub number_of_fat_sectors: Option<u32>,
    pub first_directory_sector_location: Option<u32>,
    pub transaction_signature_number: Option<u32>,
    pub mini_stream_cutoff_size: Option<u32>,
    pub first_mini_fat_sector_location: Option<u32>,
    pub number_of_mini_fat_sectors: Option<u32>,
    pub first_difat_sector_location: Option<u32>,
    pub number_of_difat_sectors: Option<u32>,
    pub difat: Option<Vec<u32>>,
}

/// One directory entry. Names are stored as UTF-16.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryEntry {
    pub name: Option<Vec<u8>>,
    pub name_length: Option<u16>,
    pub object_type: Option<u8>,
    pub color_flag: Option<u8>,
    pub left_sibling_id: Option<u32>,
    pub right_sibling_id: Option<u32>,
    pub child_id: Option<u32>,
    pub clsid: Option<[u8; 16]>,
    pub state_bits: Option<u32>,
    pub creation_time: Option<u64>,
    pub modified_time: Option<u64>,
    pub starting_sector_location: Option<u32>,
    pub stream_size: Option<u64>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Cfb(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Cfb(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a compound file report.
pub fn print(report: &mut Report, binary: &Binary) {
    report.title("Compound File Binary Information:");
    report.blank();

    print_header(report, binary.header.as_ref());
    print_directory_entries(report, binary.directory_entries.as_deref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_num("  Signature", header.signature);
    report.field_guid("  CLSID", header.clsid);
    report.field_num("  Minor version", header.minor_version);
    report.field_num("  Major version", header.major_version);
    report.field_num("  Byte order", header.byte_order);
    report.field_num("  Sector shift", header.sector_shift);
    report.field_num("  Mini sector shift", header.mini_sector_shift);
    report.field_num(
        "  Number of directory sectors",
        header.number_of_directory_sectors,
    );
    report.field_num("  Number of FAT sectors", header.number_of_fat_sectors);
    report.field_num(
        "  First directory sector location",
        header.first_directory_sector_location,
    );
    report.field_num(
        "  Transaction signature number",
        header.transaction_signature_number,
    );
    report.field_num("  Mini stream cutoff size", header.mini_stream_cutoff_size);
    report.field_num(
        "  First mini FAT sector location",
        header.first_mini_fat_sector_location,
    );
    report.field_num(
        "  Number of mini FAT sectors",
        header.number_of_mini_fat_sectors,
    );
    report.field_num(
        "  First DIFAT sector location",
        header.first_difat_sector_location,
    );
    report.field_num("  Number of DIFAT sectors", header.number_of_difat_sectors);
    report.field_array("  DIFAT", header.difat.as_deref());
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

        report.field_text("    Name", entry.name.as_deref(), TextEncoding::Utf16Le);
        report.field_num("    Name length", entry.name_length);
        report.field_num("    Object type", entry.object_type);
        report.field_num("    Color flag", entry.color_flag);
        report.field_num("    Left sibling ID", entry.left_sibling_id);
        report.field_num("    Right sibling ID", entry.right_sibling_id);
        report.field_num("    Child ID", entry.child_id);
        report.field_guid("    CLSID", entry.clsid);
        report.field_num("    State bits", entry.state_bits);
        report.field_num("    Creation time", entry.creation_time);
        report.field_num("    Modified time", entry.modified_time);
        report.field_num(
            "    Starting sector location",
            entry.starting_sector_location,
        );
        report.field_num("    Stream size", entry.stream_size);
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clsid_absent_prints_zero_guid() {
        let binary = Binary {
            header: Some(Header::default()),
            ..Binary::default()
        };
        let mut report = Report::new();
        print(&mut report, &binary);
        assert!(report
            .as_str()
            .contains("CLSID: 00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn test_utf16_entry_name() {
        let name: Vec<u8> = "Root Entry"
            .encode_utf16()
            .flat_map(u16::to_le_bytes)
            .collect();
        let binary = Binary {
            directory_entries: Some(vec![Some(DirectoryEntry {
                name: Some(name),
                name_length: Some(22),
                object_type: Some(5),
                ..DirectoryEntry::default()
            })]),
            ..Binary::default()
        };
        let mut report = Report::new();
        print(&mut report, &binary);
        let text = report.as_str();
        assert!(text.contains("Name: Root Entry"));
        assert!(text.contains("Object type: 5 (0x5)"));
    }
}
