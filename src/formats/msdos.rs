//! MS-DOS executable (MZ).

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed MS-DOS executable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Executable {
    pub header: Option<Header>,
    pub relocation_table: Option<Vec<Option<RelocationEntry>>>,
}

/// Legacy executable header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub magic: Option<String>,
    pub last_page_bytes: Option<u16>,
    pub pages: Option<u16>,
    pub relocation_items: Option<u16>,
    pub header_paragraph_size: Option<u16>,
    pub minimum_extra_paragraphs: Option<u16>,
    pub maximum_extra_paragraphs: Option<u16>,
    pub initial_ss_value: Option<u16>,
    pub initial_sp_value: Option<u16>,
    pub checksum: Option<u16>,
    pub initial_ip_value: Option<u16>,
    pub initial_cs_value: Option<u16>,
    pub relocation_table_addr: Option<u16>,
    pub overlay_number: Option<u16>,
    pub reserved_1: Option<Vec<u16>>,
    pub oem_identifier: Option<u16>,
    pub oem_information: Option<u16>,
    pub reserved_2: Option<Vec<u16>>,
    pub new_exe_header_addr: Option<u32>,
}

/// One relocation table entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RelocationEntry {
    pub offset: Option<u16>,
    pub segment: Option<u16>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Msdos(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Msdos(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render an MS-DOS executable report.
pub fn print(report: &mut Report, executable: &Executable) {
    report.title("MS-DOS Executable Information:");
    report.blank();

    print_header(report, executable.header.as_ref());
    print_relocation_table(report, executable.relocation_table.as_deref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_str("  Magic", header.magic.as_deref());
    report.field_num("  Last page bytes", header.last_page_bytes);
    report.field_num("  Pages", header.pages);
    report.field_num("  Relocation items", header.relocation_items);
    report.field_num("  Header paragraph size", header.header_paragraph_size);
    report.field_num("  Minimum extra paragraphs", header.minimum_extra_paragraphs);
    report.field_num("  Maximum extra paragraphs", header.maximum_extra_paragraphs);
    report.field_num("  Initial SS value", header.initial_ss_value);
    report.field_num("  Initial SP value", header.initial_sp_value);
    report.field_num("  Checksum", header.checksum);
    report.field_num("  Initial IP value", header.initial_ip_value);
    report.field_num("  Initial CS value", header.initial_cs_value);
    report.field_num("  Relocation table address", header.relocation_table_addr);
    report.field_num("  Overlay number", header.overlay_number);
    report.field_array("  Reserved 1", header.reserved_1.as_deref());
    report.field_num("  OEM identifier", header.oem_identifier);
    report.field_num("  OEM information", header.oem_information);
    report.field_array("  Reserved 2", header.reserved_2.as_deref());
    report.field_num("  New EXE header address", header.new_exe_header_addr);
    report.blank();
}

fn print_relocation_table(report: &mut Report, entries: Option<&[Option<RelocationEntry>]>) {
    report.section("  Relocation Table Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No relocation table items");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Relocation Table Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Offset", entry.offset);
        report.field_num("    Segment", entry.segment);
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_with_new_exe_address() {
        let executable = Executable {
            header: Some(Header {
                magic: Some(String::from("MZ")),
                pages: Some(3),
                relocation_items: Some(1),
                new_exe_header_addr: Some(0x80),
                ..Header::default()
            }),
            relocation_table: Some(vec![Some(RelocationEntry {
                offset: Some(0x12),
                segment: Some(0x34),
            })]),
        };
        let mut report = Report::new();
        print(&mut report, &executable);
        let text = report.as_str();
        assert!(text.contains("Magic: MZ"));
        assert!(text.contains("New EXE header address: 128 (0x80)"));
        assert!(text.contains("Relocation Table Entry 0"));
        assert!(text.contains("Segment: 52 (0x34)"));
    }

    #[test]
    fn test_reserved_words_render_as_array() {
        let executable = Executable {
            header: Some(Header {
                reserved_1: Some(vec![0, 0, 0, 0]),
                ..Header::default()
            }),
            relocation_table: None,
        };
        let mut report = Report::new();
        print(&mut report, &executable);
        let text = report.as_str();
        assert!(text.contains("Reserved 1: 0, 0, 0, 0"));
        assert!(text.contains("Reserved 2: [NULL]"));
        assert!(text.contains("No relocation table items"));
    }
}
