//! Linear Executable (LE/LX), the linear/paged format.

use crate::formats::ParsedFile;
use crate::report::{Report, TextEncoding};
use serde::Serialize;

/// Parsed Linear Executable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Executable {
    pub information_block: Option<InformationBlock>,
    pub object_table: Option<Vec<Option<ObjectEntry>>>,
    pub resident_names: Option<Vec<Option<ResidentName>>>,
}

/// LE/LX information block. Only the fields common to both signature
/// variants are modeled.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InformationBlock {
    pub signature: Option<String>,
    pub byte_order: Option<u8>,
    pub word_order: Option<u8>,
    pub executable_format_level: Option<u32>,
    pub cpu_type: Option<u16>,
    pub module_os: Option<u16>,
    pub module_version: Option<u32>,
    pub module_type_flags: Option<u32>,
    pub module_number_pages: Option<u32>,
    pub initial_object_cs: Option<u32>,
    pub initial_eip: Option<u32>,
    pub initial_object_ss: Option<u32>,
    pub initial_esp: Option<u32>,
    pub memory_page_size: Option<u32>,
    pub bytes_on_last_page: Option<u32>,
    pub fixup_section_size: Option<u32>,
    pub fixup_section_checksum: Option<u32>,
    pub loader_section_size: Option<u32>,
    pub loader_section_checksum: Option<u32>,
    pub object_table_offset: Option<u32>,
    pub object_table_count: Option<u32>,
    pub object_page_map_offset: Option<u32>,
    pub resident_names_table_offset: Option<u32>,
    pub entry_table_offset: Option<u32>,
}

/// One object table entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ObjectEntry {
    pub virtual_segment_size: Option<u32>,
    pub relocation_base_address: Option<u32>,
    pub object_flags: Option<u32>,
    pub page_table_index: Option<u32>,
    pub page_table_entries: Option<u32>,
    pub reserved: Option<u32>,
}

/// One resident names table entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResidentName {
    pub length: Option<u8>,
    pub name: Option<Vec<u8>>,
    pub ordinal_number: Option<u16>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::LinearExecutable(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::LinearExecutable(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a Linear Executable report.
pub fn print(report: &mut Report, executable: &Executable) {
    report.title("Linear Executable Information:");
    report.blank();

    print_information_block(report, executable.information_block.as_ref());
    print_object_table(report, executable.object_table.as_deref());
    print_resident_names(report, executable.resident_names.as_deref());
}

fn print_information_block(report: &mut Report, block: Option<&InformationBlock>) {
    report.section("  Information Block Information:");
    let Some(block) = block else {
        report.line("  No information block");
        report.blank();
        return;
    };

    report.field_str("  Signature", block.signature.as_deref());
    report.field_num("  Byte order", block.byte_order);
    report.field_num("  Word order", block.word_order);
    report.field_num("  Executable format level", block.executable_format_level);
    report.field_num("  CPU type", block.cpu_type);
    report.field_num("  Module OS", block.module_os);
    report.field_num("  Module version", block.module_version);
    report.field_num("  Module type flags", block.module_type_flags);
    report.field_num("  Module number of pages", block.module_number_pages);
    report.field_num("  Initial object CS", block.initial_object_cs);
    report.field_num("  Initial EIP", block.initial_eip);
    report.field_num("  Initial object SS", block.initial_object_ss);
    report.field_num("  Initial ESP", block.initial_esp);
    report.field_num("  Memory page size", block.memory_page_size);
    report.field_num("  Bytes on last page", block.bytes_on_last_page);
    report.field_num("  Fixup section size", block.fixup_section_size);
    report.field_num("  Fixup section checksum", block.fixup_section_checksum);
    report.field_num("  Loader section size", block.loader_section_size);
    report.field_num("  Loader section checksum", block.loader_section_checksum);
    report.field_num("  Object table offset", block.object_table_offset);
    report.field_num("  Object table count", block.object_table_count);
    report.field_num("  Object page map offset", block.object_page_map_offset);
    report.field_num(
        "  Resident names table offset",
        block.resident_names_table_offset,
    );
    report.field_num("  Entry table offset", block.entry_table_offset);
    report.blank();
}

fn print_object_table(report: &mut Report, entries: Option<&[Option<ObjectEntry>]>) {
    report.section("  Object Table Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No object table items");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Object Table Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Virtual segment size", entry.virtual_segment_size);
        report.field_num("    Relocation base address", entry.relocation_base_address);
        report.field_num("    Object flags", entry.object_flags);
        report.field_num("    Page table index", entry.page_table_index);
        report.field_num("    Page table entries", entry.page_table_entries);
        report.field_num("    Reserved", entry.reserved);
    }
    report.blank();
}

fn print_resident_names(report: &mut Report, entries: Option<&[Option<ResidentName>]>) {
    report.section("  Resident Names Table Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No resident names table items");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Resident Names Table Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Length", entry.length);
        report.field_text("    Name", entry.name.as_deref(), TextEncoding::Ascii);
        report.field_num("    Ordinal number", entry.ordinal_number);
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_information_block_signature_variants() {
        for signature in ["LE", "LX"] {
            let executable = Executable {
                information_block: Some(InformationBlock {
                    signature: Some(String::from(signature)),
                    cpu_type: Some(0x03),
                    memory_page_size: Some(4096),
                    ..InformationBlock::default()
                }),
                ..Executable::default()
            };
            let mut report = Report::new();
            print(&mut report, &executable);
            let text = report.as_str();
            assert!(text.contains(&format!("Signature: {signature}")));
            assert!(text.contains("Memory page size: 4096 (0x1000)"));
        }
    }

    #[test]
    fn test_object_table_null_hole() {
        let executable = Executable {
            object_table: Some(vec![None, Some(ObjectEntry::default())]),
            ..Executable::default()
        };
        let mut report = Report::new();
        print(&mut report, &executable);
        let text = report.as_str();
        assert!(text.contains("Object Table Entry 0"));
        assert!(text.contains("    [NULL]"));
        assert!(text.contains("Object Table Entry 1"));
    }
}
