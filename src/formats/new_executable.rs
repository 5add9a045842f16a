//! New Executable (NE), the 16-bit segmented format.

use crate::formats::ParsedFile;
use crate::report::{Report, TextEncoding};
use serde::Serialize;

/// Parsed New Executable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Executable {
    pub header: Option<Header>,
    pub segment_table: Option<Vec<Option<SegmentEntry>>>,
    pub resident_names: Option<Vec<Option<ResidentName>>>,
}

/// NE information block.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub magic: Option<String>,
    pub linker_version: Option<u8>,
    pub linker_revision: Option<u8>,
    pub entry_table_offset: Option<u16>,
    pub entry_table_size: Option<u16>,
    pub crc_checksum: Option<u32>,
    pub flag_word: Option<u16>,
    pub automatic_data_segment_number: Option<u16>,
    pub initial_heap_alloc: Option<u16>,
    pub initial_stack_alloc: Option<u16>,
    pub initial_cs_ip_setting: Option<u32>,
    pub initial_ss_sp_setting: Option<u32>,
    pub file_segment_count: Option<u16>,
    pub module_reference_table_size: Option<u16>,
    pub non_resident_name_table_size: Option<u16>,
    pub segment_table_offset: Option<u16>,
    pub resource_table_offset: Option<u16>,
    pub resident_name_table_offset: Option<u16>,
    pub module_reference_table_offset: Option<u16>,
    pub imported_names_table_offset: Option<u16>,
    pub non_resident_names_table_offset: Option<u32>,
    pub movable_entries_count: Option<u16>,
    pub segment_alignment_shift_count: Option<u16>,
    pub resource_entries_count: Option<u16>,
    pub target_operating_system: Option<u8>,
    pub additional_flags: Option<u8>,
    pub return_thunk_offset: Option<u16>,
    pub segment_reference_thunk_offset: Option<u16>,
    pub min_code_swap_area_size: Option<u16>,
    pub windows_sdk_revision: Option<u8>,
    pub windows_sdk_version: Option<u8>,
}

/// One segment table entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SegmentEntry {
    pub offset: Option<u16>,
    pub length: Option<u16>,
    pub flag_word: Option<u16>,
    pub minimum_allocation_size: Option<u16>,
}

/// One resident name table entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResidentName {
    pub length: Option<u8>,
    pub name_string: Option<Vec<u8>>,
    pub ordinal_number: Option<u16>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::NewExecutable(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::NewExecutable(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a New Executable report.
pub fn print(report: &mut Report, executable: &Executable) {
    report.title("New Executable Information:");
    report.blank();

    print_header(report, executable.header.as_ref());
    print_segment_table(report, executable.segment_table.as_deref());
    print_resident_names(report, executable.resident_names.as_deref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_str("  Magic", header.magic.as_deref());
    report.field_num("  Linker version", header.linker_version);
    report.field_num("  Linker revision", header.linker_revision);
    report.field_num("  Entry table offset", header.entry_table_offset);
    report.field_num("  Entry table size", header.entry_table_size);
    report.field_num("  CRC checksum", header.crc_checksum);
    report.field_num("  Flag word", header.flag_word);
    report.field_num(
        "  Automatic data segment number",
        header.automatic_data_segment_number,
    );
    report.field_num("  Initial heap allocation", header.initial_heap_alloc);
    report.field_num("  Initial stack allocation", header.initial_stack_alloc);
    report.field_num("  Initial CS:IP setting", header.initial_cs_ip_setting);
    report.field_num("  Initial SS:SP setting", header.initial_ss_sp_setting);
    report.field_num("  File segment count", header.file_segment_count);
    report.field_num(
        "  Module reference table size",
        header.module_reference_table_size,
    );
    report.field_num(
        "  Non-resident name table size",
        header.non_resident_name_table_size,
    );
    report.field_num("  Segment table offset", header.segment_table_offset);
    report.field_num("  Resource table offset", header.resource_table_offset);
    report.field_num(
        "  Resident name table offset",
        header.resident_name_table_offset,
    );
    report.field_num(
        "  Module reference table offset",
        header.module_reference_table_offset,
    );
    report.field_num(
        "  Imported names table offset",
        header.imported_names_table_offset,
    );
    report.field_num(
        "  Non-resident names table offset",
        header.non_resident_names_table_offset,
    );
    report.field_num("  Movable entries count", header.movable_entries_count);
    report.field_num(
        "  Segment alignment shift count",
        header.segment_alignment_shift_count,
    );
    report.field_num("  Resource entries count", header.resource_entries_count);
    report.field_num(
        "  Target operating system",
        header.target_operating_system,
    );
    report.field_num("  Additional flags", header.additional_flags);
    report.field_num("  Return thunk offset", header.return_thunk_offset);
    report.field_num(
        "  Segment reference thunk offset",
        header.segment_reference_thunk_offset,
    );
    report.field_num("  Minimum code swap area size", header.min_code_swap_area_size);
    report.field_num("  Windows SDK revision", header.windows_sdk_revision);
    report.field_num("  Windows SDK version", header.windows_sdk_version);
    report.blank();
}

fn print_segment_table(report: &mut Report, entries: Option<&[Option<SegmentEntry>]>) {
    report.section("  Segment Table Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No segment table items");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Segment Table Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Offset", entry.offset);
        report.field_num("    Length", entry.length);
        report.field_num("    Flag word", entry.flag_word);
        report.field_num("    Minimum allocation size", entry.minimum_allocation_size);
    }
    report.blank();
}

fn print_resident_names(report: &mut Report, entries: Option<&[Option<ResidentName>]>) {
    report.section("  Resident Name Table Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No resident name table items");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Resident Name Table Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Length", entry.length);
        report.field_text("    Name string", entry.name_string.as_deref(), TextEncoding::Ascii);
        report.field_num("    Ordinal number", entry.ordinal_number);
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_fields() {
        let executable = Executable {
            header: Some(Header {
                magic: Some(String::from("NE")),
                linker_version: Some(5),
                linker_revision: Some(1),
                file_segment_count: Some(2),
                target_operating_system: Some(2),
                ..Header::default()
            }),
            ..Executable::default()
        };
        let mut report = Report::new();
        print(&mut report, &executable);
        let text = report.as_str();
        assert!(text.contains("Magic: NE"));
        assert!(text.contains("Linker version: 5 (0x5)"));
        assert!(text.contains("Target operating system: 2 (0x2)"));
        assert!(text.contains("No segment table items"));
    }

    #[test]
    fn test_resident_name_decodes_ascii() {
        let executable = Executable {
            resident_names: Some(vec![Some(ResidentName {
                length: Some(6),
                name_string: Some(b"MODULE".to_vec()),
                ordinal_number: Some(0),
            })]),
            ..Executable::default()
        };
        let mut report = Report::new();
        print(&mut report, &executable);
        assert!(report.as_str().contains("Name string: MODULE"));
    }
}
