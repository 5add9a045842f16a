//! Nintendo DS/DSi cart image.

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed DS cart image.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    pub common_header: Option<CommonHeader>,
    pub file_allocation_table: Option<Vec<Option<FileAllocationEntry>>>,
}

/// Common cart header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommonHeader {
    pub game_title: Option<String>,
    pub game_code: Option<String>,
    pub maker_code: Option<String>,
    pub unit_code: Option<u8>,
    pub encryption_seed_select: Option<u8>,
    pub device_capacity: Option<u8>,
    pub reserved: Option<Vec<u8>>,
    pub game_revision: Option<u16>,
    pub rom_version: Option<u8>,
    pub internal_flags: Option<u8>,
    pub arm9_rom_offset: Option<u32>,
    pub arm9_entry_address: Option<u32>,
    pub arm9_load_address: Option<u32>,
    pub arm9_size: Option<u32>,
    pub arm7_rom_offset: Option<u32>,
    pub arm7_entry_address: Option<u32>,
    pub arm7_load_address: Option<u32>,
    pub arm7_size: Option<u32>,
    pub file_name_table_offset: Option<u32>,
    pub file_name_table_length: Option<u32>,
    pub file_allocation_table_offset: Option<u32>,
    pub file_allocation_table_length: Option<u32>,
    pub secure_area_checksum: Option<u16>,
    pub header_checksum: Option<u16>,
}

/// One file allocation table entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileAllocationEntry {
    pub start_offset: Option<u32>,
    pub end_offset: Option<u32>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Nitro(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Nitro(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a DS cart report.
pub fn print(report: &mut Report, cart: &Cart) {
    report.title("DS Cart Image Information:");
    report.blank();

    print_common_header(report, cart.common_header.as_ref());
    print_file_allocation_table(report, cart.file_allocation_table.as_deref());
}

fn print_common_header(report: &mut Report, header: Option<&CommonHeader>) {
    report.section("  Common Header Information:");
    let Some(header) = header else {
        report.line("  No common header");
        report.blank();
        return;
    };

    report.field_str("  Game title", header.game_title.as_deref());
    report.field_str("  Game code", header.game_code.as_deref());
    report.field_str("  Maker code", header.maker_code.as_deref());
    report.field_num("  Unit code", header.unit_code);
    report.field_num("  Encryption seed select", header.encryption_seed_select);
    report.field_num("  Device capacity", header.device_capacity);
    report.field_bytes("  Reserved", header.reserved.as_deref());
    report.field_num("  Game revision", header.game_revision);
    report.field_num("  ROM version", header.rom_version);
    report.field_num("  Internal flags", header.internal_flags);
    report.field_num("  ARM9 ROM offset", header.arm9_rom_offset);
    report.field_num("  ARM9 entry address", header.arm9_entry_address);
    report.field_num("  ARM9 load address", header.arm9_load_address);
    report.field_num("  ARM9 size", header.arm9_size);
    report.field_num("  ARM7 ROM offset", header.arm7_rom_offset);
    report.field_num("  ARM7 entry address", header.arm7_entry_address);
    report.field_num("  ARM7 load address", header.arm7_load_address);
    report.field_num("  ARM7 size", header.arm7_size);
    report.field_num("  File name table offset", header.file_name_table_offset);
    report.field_num("  File name table length", header.file_name_table_length);
    report.field_num(
        "  File allocation table offset",
        header.file_allocation_table_offset,
    );
    report.field_num(
        "  File allocation table length",
        header.file_allocation_table_length,
    );
    report.field_num("  Secure area checksum", header.secure_area_checksum);
    report.field_num("  Header checksum", header.header_checksum);
    report.blank();
}

fn print_file_allocation_table(
    report: &mut Report,
    entries: Option<&[Option<FileAllocationEntry>]>,
) {
    report.section("  File Allocation Table Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No file allocation table items");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  File Allocation Table Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Start offset", entry.start_offset);
        report.field_num("    End offset", entry.end_offset);
    }
    report.blank();
}
