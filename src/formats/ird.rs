//! PS3 ISO rebuild data (IRD).

use crate::formats::ParsedFile;
use crate::report::{Report, TextEncoding};
use serde::Serialize;

/// Parsed IRD file.
///
/// The stored region and file counts are printed as raw data; the hash and
/// key tables are walked by their actual lengths.
#[derive(Debug, Clone, Default, Serialize)]
pub struct File {
    pub magic: Option<Vec<u8>>,
    pub version: Option<u8>,
    pub title_id: Option<String>,
    pub title_length: Option<u8>,
    pub title: Option<String>,
    pub system_version: Option<String>,
    pub game_version: Option<String>,
    pub app_version: Option<String>,
    pub header_length: Option<u32>,
    pub header: Option<Vec<u8>>,
    pub footer_length: Option<u32>,
    pub footer: Option<Vec<u8>>,
    pub region_count: Option<u8>,
    pub region_hashes: Option<Vec<Option<Vec<u8>>>>,
    pub file_count: Option<u32>,
    pub file_keys: Option<Vec<u64>>,
    pub file_hashes: Option<Vec<Option<Vec<u8>>>>,
    pub extra_config: Option<u16>,
    pub attachments: Option<u16>,
    pub data_1_key: Option<Vec<u8>>,
    pub data_2_key: Option<Vec<u8>>,
    pub pic: Option<Vec<u8>>,
    pub uid: Option<u32>,
    pub crc: Option<u32>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Ird(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Ird(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render an IRD report.
pub fn print(report: &mut Report, ird: &File) {
    report.title("IRD Information:");
    report.field_text("Magic", ird.magic.as_deref(), TextEncoding::Ascii);
    report.field_num("Version", ird.version);
    report.field_str("Title ID", ird.title_id.as_deref());
    report.field_num("Title length", ird.title_length);
    report.field_str("Title", ird.title.as_deref());
    report.field_str("System version", ird.system_version.as_deref());
    report.field_str("Game version", ird.game_version.as_deref());
    report.field_str("App version", ird.app_version.as_deref());
    report.field_num("Header length", ird.header_length);
    report.field_bytes("Header", ird.header.as_deref());
    report.field_num("Footer length", ird.footer_length);
    report.field_bytes("Footer", ird.footer.as_deref());

    report.field_num("Region count", ird.region_count);
    if let Some(hashes) = ird.region_hashes.as_deref() {
        for (i, hash) in hashes.iter().enumerate() {
            report.field_bytes(&format!("Region {i} hash"), hash.as_deref());
        }
    }

    report.field_num("File count", ird.file_count);
    let keys = ird.file_keys.as_deref().unwrap_or(&[]);
    let hashes = ird.file_hashes.as_deref().unwrap_or(&[]);
    for (i, key) in keys.iter().enumerate() {
        report.field_num(&format!("File {i} key"), Some(*key));
        if let Some(hash) = hashes.get(i) {
            report.field_bytes(&format!("File {i} hash"), hash.as_deref());
        }
    }

    report.field_num("Extra config", ird.extra_config);
    report.field_num("Attachments", ird.attachments);
    report.field_bytes("Data 1 key", ird.data_1_key.as_deref());
    report.field_bytes("Data 2 key", ird.data_2_key.as_deref());
    report.field_bytes("PIC", ird.pic.as_deref());
    report.field_num("UID", ird.uid);
    report.field_num("CRC", ird.crc);
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_follow_actual_length() {
        // The stored counts disagree with the tables on purpose.
        let ird = File {
            magic: Some(b"3IRD".to_vec()),
            region_count: Some(9),
            region_hashes: Some(vec![Some(vec![0xAA; 4]), None]),
            file_count: Some(0),
            file_keys: Some(vec![1, 2]),
            file_hashes: Some(vec![Some(vec![0xBB; 4]), Some(vec![0xCC; 4])]),
            ..File::default()
        };
        let mut report = Report::new();
        print(&mut report, &ird);
        let text = report.as_str();

        assert!(text.contains("Magic: 3IRD"));
        assert!(text.contains("Region count: 9 (0x9)"));
        assert_eq!(text.matches("Region ").count(), 3); // count line + 2 hashes
        assert!(text.contains("Region 1 hash: [NULL]"));
        assert!(text.contains("File count: 0 (0x0)"));
        assert!(text.contains("File 0 key: 1 (0x1)"));
        assert!(text.contains("File 1 hash: CC CC CC CC"));
    }

    #[test]
    fn test_absent_everything() {
        let mut report = Report::new();
        print(&mut report, &File::default());
        let text = report.as_str();
        assert!(text.contains("Magic: [NULL]"));
        assert!(text.contains("Title ID: \n"));
        assert!(text.contains("UID: 0 (0x0)"));
    }
}
