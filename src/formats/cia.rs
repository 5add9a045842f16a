//! CTR Importable Archive (CIA).

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed CIA archive.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Archive {
    pub header: Option<Header>,
    pub meta: Option<MetaData>,
}

/// CIA header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub header_size: Option<u32>,
    pub archive_type: Option<u16>,
    pub version: Option<u16>,
    pub certificate_chain_size: Option<u32>,
    pub ticket_size: Option<u32>,
    pub tmd_file_size: Option<u32>,
    pub meta_size: Option<u32>,
    pub content_size: Option<u64>,
    pub content_index: Option<Vec<u8>>,
}

/// Optional trailing meta block.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetaData {
    pub title_id_dependency_list: Option<Vec<u8>>,
    pub reserved_1: Option<Vec<u8>>,
    pub core_version: Option<u32>,
    pub reserved_2: Option<Vec<u8>>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Cia(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Cia(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a CIA report.
pub fn print(report: &mut Report, archive: &Archive) {
    report.title("CIA Information:");
    report.blank();

    print_header(report, archive.header.as_ref());
    print_meta(report, archive.meta.as_ref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_num("  Header size", header.header_size);
    report.field_num("  Type", header.archive_type);
    report.field_num("  Version", header.version);
    report.field_num("  Certificate chain size", header.certificate_chain_size);
    report.field_num("  Ticket size", header.ticket_size);
    report.field_num("  TMD file size", header.tmd_file_size);
    report.field_num("  Meta size", header.meta_size);
    report.field_num("  Content size", header.content_size);
    report.field_bytes("  Content index", header.content_index.as_deref());
    report.blank();
}

fn print_meta(report: &mut Report, meta: Option<&MetaData>) {
    report.section("  Meta Data Information:");
    let Some(meta) = meta else {
        report.line("  No meta data");
        report.blank();
        return;
    };

    report.field_bytes(
        "  Title ID dependency list",
        meta.title_id_dependency_list.as_deref(),
    );
    report.field_bytes("  Reserved 1", meta.reserved_1.as_deref());
    report.field_num("  Core version", meta.core_version);
    report.field_bytes("  Reserved 2", meta.reserved_2.as_deref());
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_sizes() {
        let archive = Archive {
            header: Some(Header {
                header_size: Some(0x2020),
                archive_type: Some(0),
                version: Some(0),
                certificate_chain_size: Some(0xA00),
                ticket_size: Some(0x350),
                tmd_file_size: Some(0xB34),
                meta_size: Some(0x3AC0),
                content_size: Some(0x10_0000),
                content_index: Some(vec![0x80, 0x00]),
            }),
            meta: None,
        };
        let mut report = Report::new();
        print(&mut report, &archive);
        let text = report.as_str();
        assert!(text.contains("Header size: 8224 (0x2020)"));
        assert!(text.contains("Content index: 80 00"));
        assert!(text.contains("No meta data"));
    }

    #[test]
    fn test_meta_core_version() {
        let archive = Archive {
            meta: Some(MetaData {
                core_version: Some(2),
                ..MetaData::default()
            }),
            ..Archive::default()
        };
        let mut report = Report::new();
        print(&mut report, &archive);
        assert!(report.as_str().contains("Core version: 2 (0x2)"));
    }
}
