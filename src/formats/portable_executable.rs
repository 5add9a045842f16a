//! Portable Executable (PE).
//!
//! The optional header comes in two layouts selected by its magic word:
//! PE32 carries a data base and a 32-bit image base, PE32+ drops the data
//! base and widens the image base to 64 bits. The windows-specific fields
//! that follow are common to both layouts and print after the
//! layout-specific block.

use crate::formats::ParsedFile;
use crate::report::{Report, TextEncoding};
use serde::Serialize;

/// Optional header magic for the PE32 layout.
pub const OPTIONAL_MAGIC_PE32: u16 = 0x010B;

/// Optional header magic for the PE32+ layout.
pub const OPTIONAL_MAGIC_PE32_PLUS: u16 = 0x020B;

/// Parsed Portable Executable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Executable {
    pub coff_header: Option<CoffHeader>,
    pub optional_header: Option<OptionalHeader>,
    pub section_table: Option<Vec<Option<SectionHeader>>>,
}

/// COFF file header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoffHeader {
    pub signature: Option<String>,
    pub machine: Option<u16>,
    pub number_of_sections: Option<u16>,
    pub time_date_stamp: Option<u32>,
    pub pointer_to_symbol_table: Option<u32>,
    pub number_of_symbols: Option<u32>,
    pub size_of_optional_header: Option<u16>,
    pub characteristics: Option<u16>,
}

/// Optional header: the magic-selected base block plus the fields shared
/// by both layouts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OptionalHeader {
    pub magic: Option<u16>,
    pub major_linker_version: Option<u8>,
    pub minor_linker_version: Option<u8>,
    pub size_of_code: Option<u32>,
    pub size_of_initialized_data: Option<u32>,
    pub size_of_uninitialized_data: Option<u32>,
    pub address_of_entry_point: Option<u32>,
    pub base_of_code: Option<u32>,
    pub base: BaseFields,
    pub section_alignment: Option<u32>,
    pub file_alignment: Option<u32>,
    pub major_operating_system_version: Option<u16>,
    pub minor_operating_system_version: Option<u16>,
    pub major_image_version: Option<u16>,
    pub minor_image_version: Option<u16>,
    pub major_subsystem_version: Option<u16>,
    pub minor_subsystem_version: Option<u16>,
    pub win32_version_value: Option<u32>,
    pub size_of_image: Option<u32>,
    pub size_of_headers: Option<u32>,
    pub checksum: Option<u32>,
    pub subsystem: Option<u16>,
    pub dll_characteristics: Option<u16>,
    pub number_of_rva_and_sizes: Option<u32>,
}

/// Magic-selected base block of the optional header.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseFields {
    Pe32 {
        base_of_data: Option<u32>,
        image_base: Option<u32>,
    },
    Pe32Plus {
        image_base: Option<u64>,
    },
    /// Magic values with no known layout.
    #[default]
    Unrecognized,
}

/// One section table entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SectionHeader {
    pub name: Option<Vec<u8>>,
    pub virtual_size: Option<u32>,
    pub virtual_address: Option<u32>,
    pub size_of_raw_data: Option<u32>,
    pub pointer_to_raw_data: Option<u32>,
    pub pointer_to_relocations: Option<u32>,
    pub pointer_to_linenumbers: Option<u32>,
    pub number_of_relocations: Option<u16>,
    pub number_of_linenumbers: Option<u16>,
    pub characteristics: Option<u32>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::PortableExecutable(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::PortableExecutable(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a Portable Executable report.
pub fn print(report: &mut Report, executable: &Executable) {
    report.title("Portable Executable Information:");
    report.blank();

    print_coff_header(report, executable.coff_header.as_ref());
    print_optional_header(report, executable.optional_header.as_ref());
    print_section_table(report, executable.section_table.as_deref());
}

fn print_coff_header(report: &mut Report, header: Option<&CoffHeader>) {
    report.section("  COFF File Header Information:");
    let Some(header) = header else {
        report.line("  No COFF file header");
        report.blank();
        return;
    };

    report.field_str("  Signature", header.signature.as_deref());
    report.field_num("  Machine", header.machine);
    report.field_num("  Number of sections", header.number_of_sections);
    report.field_num("  Time/date stamp", header.time_date_stamp);
    report.field_num("  Pointer to symbol table", header.pointer_to_symbol_table);
    report.field_num("  Number of symbols", header.number_of_symbols);
    report.field_num("  Size of optional header", header.size_of_optional_header);
    report.field_num("  Characteristics", header.characteristics);
    report.blank();
}

fn print_optional_header(report: &mut Report, header: Option<&OptionalHeader>) {
    report.section("  Optional Header Information:");
    let Some(header) = header else {
        report.line("  No optional header");
        report.blank();
        return;
    };

    report.field_num("  Magic", header.magic);
    report.field_num("  Major linker version", header.major_linker_version);
    report.field_num("  Minor linker version", header.minor_linker_version);
    report.field_num("  Size of code", header.size_of_code);
    report.field_num("  Size of initialized data", header.size_of_initialized_data);
    report.field_num(
        "  Size of uninitialized data",
        header.size_of_uninitialized_data,
    );
    report.field_num("  Address of entry point", header.address_of_entry_point);
    report.field_num("  Base of code", header.base_of_code);

    match &header.base {
        BaseFields::Pe32 {
            base_of_data,
            image_base,
        } => {
            report.field_num("  Base of data", *base_of_data);
            report.field_num("  Image base", *image_base);
        }
        BaseFields::Pe32Plus { image_base } => {
            report.field_num("  Image base", *image_base);
        }
        BaseFields::Unrecognized => {
            report.line("  Unrecognized version, not parsed...");
        }
    }

    report.field_num("  Section alignment", header.section_alignment);
    report.field_num("  File alignment", header.file_alignment);
    report.field_num(
        "  Major operating system version",
        header.major_operating_system_version,
    );
    report.field_num(
        "  Minor operating system version",
        header.minor_operating_system_version,
    );
    report.field_num("  Major image version", header.major_image_version);
    report.field_num("  Minor image version", header.minor_image_version);
    report.field_num("  Major subsystem version", header.major_subsystem_version);
    report.field_num("  Minor subsystem version", header.minor_subsystem_version);
    report.field_num("  Win32 version value", header.win32_version_value);
    report.field_num("  Size of image", header.size_of_image);
    report.field_num("  Size of headers", header.size_of_headers);
    report.field_num("  Checksum", header.checksum);
    report.field_num("  Subsystem", header.subsystem);
    report.field_num("  DLL characteristics", header.dll_characteristics);
    report.field_num("  Number of RVA and sizes", header.number_of_rva_and_sizes);
    report.blank();
}

fn print_section_table(report: &mut Report, entries: Option<&[Option<SectionHeader>]>) {
    report.section("  Section Table Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No section table items");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Section Table Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_text("    Name", entry.name.as_deref(), TextEncoding::Ascii);
        report.field_num("    Virtual size", entry.virtual_size);
        report.field_num("    Virtual address", entry.virtual_address);
        report.field_num("    Size of raw data", entry.size_of_raw_data);
        report.field_num("    Pointer to raw data", entry.pointer_to_raw_data);
        report.field_num("    Pointer to relocations", entry.pointer_to_relocations);
        report.field_num("    Pointer to line numbers", entry.pointer_to_linenumbers);
        report.field_num("    Number of relocations", entry.number_of_relocations);
        report.field_num("    Number of line numbers", entry.number_of_linenumbers);
        report.field_num("    Characteristics", entry.characteristics);
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pe32_layout_prints_base_of_data() {
        let executable = Executable {
            optional_header: Some(OptionalHeader {
                magic: Some(OPTIONAL_MAGIC_PE32),
                base: BaseFields::Pe32 {
                    base_of_data: Some(0x2000),
                    image_base: Some(0x0040_0000),
                },
                section_alignment: Some(0x1000),
                ..OptionalHeader::default()
            }),
            ..Executable::default()
        };
        let mut report = Report::new();
        print(&mut report, &executable);
        let text = report.as_str();
        assert!(text.contains("Magic: 267 (0x10B)"));
        assert!(text.contains("Base of data: 8192 (0x2000)"));
        assert!(text.contains("Image base: 4194304 (0x400000)"));
        assert!(text.contains("Section alignment: 4096 (0x1000)"));
    }

    #[test]
    fn test_pe32_plus_layout_wide_image_base() {
        let executable = Executable {
            optional_header: Some(OptionalHeader {
                magic: Some(OPTIONAL_MAGIC_PE32_PLUS),
                base: BaseFields::Pe32Plus {
                    image_base: Some(0x0001_4000_0000),
                },
                ..OptionalHeader::default()
            }),
            ..Executable::default()
        };
        let mut report = Report::new();
        print(&mut report, &executable);
        let text = report.as_str();
        assert!(text.contains("Image base: 5368709120 (0x140000000)"));
        assert!(!text.contains("Base of data"));
    }

    #[test]
    fn test_unrecognized_optional_magic_falls_back() {
        let executable = Executable {
            optional_header: Some(OptionalHeader {
                magic: Some(0x0107),
                base: BaseFields::Unrecognized,
                size_of_image: Some(0x8000),
                ..OptionalHeader::default()
            }),
            ..Executable::default()
        };
        let mut report = Report::new();
        print(&mut report, &executable);
        let text = report.as_str();
        assert!(text.contains("  Unrecognized version, not parsed..."));
        // Shared trailing fields still print.
        assert!(text.contains("Size of image: 32768 (0x8000)"));
    }

    #[test]
    fn test_section_names_decode() {
        let executable = Executable {
            section_table: Some(vec![Some(SectionHeader {
                name: Some(b".text\0\0\0".to_vec()),
                virtual_size: Some(0x400),
                ..SectionHeader::default()
            })]),
            ..Executable::default()
        };
        let mut report = Report::new();
        print(&mut report, &executable);
        assert!(report.as_str().contains("Name: .text\n"));
    }
}
