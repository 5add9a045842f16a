//! AACS media key block.
//!
//! A media key block is a flat sequence of records. Every record carries a
//! type code and a length; the payload shape is selected by the type code,
//! so the payload is a tagged union with one arm per known record kind. The
//! type and length print for every record regardless of payload shape.

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed media key block.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaKeyBlock {
    pub records: Option<Vec<Option<Record>>>,
}

/// One record: common fields plus the type-selected payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Record {
    pub record_type: Option<u8>,
    pub record_length: Option<u32>,
    pub payload: RecordPayload,
}

/// Payload shapes, selected by the record type code.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordPayload {
    EndOfMediaKeyBlock {
        signature_data: Option<Vec<u8>>,
    },
    ExplicitSubsetDifference {
        subset_differences: Option<Vec<Option<SubsetDifference>>>,
    },
    MediaKeyData {
        media_key_data: Option<Vec<Option<Vec<u8>>>>,
    },
    SubsetDifferenceIndex {
        span: Option<u32>,
        offsets: Option<Vec<u32>>,
    },
    TypeAndVersion {
        media_key_block_type: Option<u32>,
        version_number: Option<u32>,
    },
    DriveRevocationList {
        total_number_of_entries: Option<u32>,
        signature_blocks: Option<Vec<Option<RevocationSignatureBlock>>>,
    },
    HostRevocationList {
        total_number_of_entries: Option<u32>,
        signature_blocks: Option<Vec<Option<RevocationSignatureBlock>>>,
    },
    VerifyMediaKey {
        ciphertext_value: Option<Vec<u8>>,
    },
    Copyright {
        copyright: Option<String>,
    },
    /// Record types with no known payload shape carry nothing extra.
    #[default]
    Unrecognized,
}

/// One subset difference.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubsetDifference {
    pub mask: Option<u8>,
    pub number: Option<u32>,
}

/// One signature block inside a revocation list record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RevocationSignatureBlock {
    pub number_of_entries: Option<u32>,
    pub entry_fields: Option<Vec<Option<RevocationListEntry>>>,
}

/// One revocation list entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RevocationListEntry {
    pub range: Option<u16>,
    pub id: Option<Vec<u8>>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Aacs(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Aacs(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render an AACS media key block report.
pub fn print(report: &mut Report, block: &MediaKeyBlock) {
    report.title("AACS Media Key Block Information:");
    report.blank();

    print_records(report, block.records.as_deref());
}

fn print_records(report: &mut Report, records: Option<&[Option<Record>]>) {
    report.section("  Records Information:");
    let records = match records {
        Some(records) if !records.is_empty() => records,
        _ => {
            report.line("  No records");
            report.blank();
            return;
        }
    };

    for (i, record) in records.iter().enumerate() {
        print_record(report, record.as_ref(), i);
    }
    report.blank();
}

fn print_record(report: &mut Report, record: Option<&Record>, index: usize) {
    report.line(&format!("  Record Entry {index}"));
    let Some(record) = record else {
        report.line("    [NULL]");
        return;
    };

    report.field_num("    Record type", record.record_type);
    report.field_num("    Record length", record.record_length);

    match &record.payload {
        RecordPayload::EndOfMediaKeyBlock { signature_data } => {
            report.field_bytes("    Signature data", signature_data.as_deref());
        }
        RecordPayload::ExplicitSubsetDifference { subset_differences } => {
            print_subset_differences(report, subset_differences.as_deref());
        }
        RecordPayload::MediaKeyData { media_key_data } => {
            print_media_keys(report, media_key_data.as_deref());
        }
        RecordPayload::SubsetDifferenceIndex { span, offsets } => {
            report.field_num("    Span", *span);
            print_offsets(report, offsets.as_deref());
        }
        RecordPayload::TypeAndVersion {
            media_key_block_type,
            version_number,
        } => {
            report.field_num("    Media key block type", *media_key_block_type);
            report.field_num("    Version number", *version_number);
        }
        RecordPayload::DriveRevocationList {
            total_number_of_entries,
            signature_blocks,
        } => {
            report.field_num("    Total number of entries", *total_number_of_entries);
            print_signature_blocks(report, signature_blocks.as_deref(), "Drive ID");
        }
        RecordPayload::HostRevocationList {
            total_number_of_entries,
            signature_blocks,
        } => {
            report.field_num("    Total number of entries", *total_number_of_entries);
            print_signature_blocks(report, signature_blocks.as_deref(), "Host ID");
        }
        RecordPayload::VerifyMediaKey { ciphertext_value } => {
            report.field_bytes("    Ciphertext value", ciphertext_value.as_deref());
        }
        RecordPayload::Copyright { copyright } => {
            report.field_str("    Copyright", copyright.as_deref());
        }
        RecordPayload::Unrecognized => {}
    }
}

fn print_subset_differences(report: &mut Report, entries: Option<&[Option<SubsetDifference>]>) {
    report.section("    Subset Differences:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("    No subset differences");
            return;
        }
    };

    for (j, difference) in entries.iter().enumerate() {
        report.line(&format!("    Subset Difference {j}"));
        match difference {
            None => report.line("      [NULL]"),
            Some(difference) => {
                report.field_num("      Mask", difference.mask);
                report.field_num("      Number", difference.number);
            }
        }
    }
}

fn print_media_keys(report: &mut Report, keys: Option<&[Option<Vec<u8>>]>) {
    report.section("    Media Keys:");
    let keys = match keys {
        Some(keys) if !keys.is_empty() => keys,
        _ => {
            report.line("    No media keys");
            return;
        }
    };

    for (j, key) in keys.iter().enumerate() {
        report.field_bytes(&format!("      Media key {j}"), key.as_deref());
    }
}

fn print_offsets(report: &mut Report, offsets: Option<&[u32]>) {
    report.section("    Offsets:");
    let offsets = match offsets {
        Some(offsets) if !offsets.is_empty() => offsets,
        _ => {
            report.line("    No offsets");
            return;
        }
    };

    for (j, offset) in offsets.iter().enumerate() {
        report.field_num(&format!("      Offset {j}"), Some(*offset));
    }
}

fn print_signature_blocks(
    report: &mut Report,
    blocks: Option<&[Option<RevocationSignatureBlock>]>,
    id_label: &str,
) {
    report.section("    Signature Blocks:");
    let blocks = match blocks {
        Some(blocks) if !blocks.is_empty() => blocks,
        _ => {
            report.line("    No signature blocks");
            return;
        }
    };

    for (j, block) in blocks.iter().enumerate() {
        report.line(&format!("    Signature Block {j}"));
        let Some(block) = block else {
            report.line("      [NULL]");
            continue;
        };

        report.field_num("      Number of entries", block.number_of_entries);
        report.section("      Entry Fields:");
        let entries = match block.entry_fields.as_deref() {
            Some(entries) if !entries.is_empty() => entries,
            _ => {
                report.line("      No entry fields");
                continue;
            }
        };

        for (k, entry) in entries.iter().enumerate() {
            report.line(&format!("      Entry {k}"));
            match entry {
                None => report.line("        [NULL]"),
                Some(entry) => {
                    report.field_num("        Range", entry.range);
                    report.field_bytes(&format!("        {id_label}"), entry.id.as_deref());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_records() {
        let mut report = Report::new();
        print(&mut report, &MediaKeyBlock::default());
        assert!(report.as_str().contains("No records"));
    }

    #[test]
    fn test_type_and_version_record() {
        let block = MediaKeyBlock {
            records: Some(vec![Some(Record {
                record_type: Some(0x10),
                record_length: Some(12),
                payload: RecordPayload::TypeAndVersion {
                    media_key_block_type: Some(0x0003_1003),
                    version_number: Some(70),
                },
            })]),
        };
        let mut report = Report::new();
        print(&mut report, &block);
        let text = report.as_str();
        assert!(text.contains("Record type: 16 (0x10)"));
        assert!(text.contains("Media key block type: 200708099 (0x31003)"));
        assert!(text.contains("Version number: 70 (0x46)"));
    }

    #[test]
    fn test_unrecognized_record_prints_common_fields_only() {
        let block = MediaKeyBlock {
            records: Some(vec![Some(Record {
                record_type: Some(0x99),
                record_length: Some(4),
                payload: RecordPayload::Unrecognized,
            })]),
        };
        let mut report = Report::new();
        print(&mut report, &block);
        let text = report.as_str();
        assert!(text.contains("Record type: 153 (0x99)"));
        assert!(text.contains("Record length: 4 (0x4)"));
    }

    #[test]
    fn test_revocation_list_nesting() {
        let entry = RevocationListEntry {
            range: Some(1),
            id: Some(vec![0x01; 6]),
        };
        let block = MediaKeyBlock {
            records: Some(vec![Some(Record {
                record_type: Some(0x21),
                record_length: Some(64),
                payload: RecordPayload::HostRevocationList {
                    total_number_of_entries: Some(1),
                    signature_blocks: Some(vec![Some(RevocationSignatureBlock {
                        number_of_entries: Some(1),
                        entry_fields: Some(vec![Some(entry), None]),
                    })]),
                },
            })]),
        };
        let mut report = Report::new();
        print(&mut report, &block);
        let text = report.as_str();
        assert!(text.contains("Signature Block 0"));
        assert!(text.contains("Host ID: 01 01 01 01 01 01"));
        assert!(text.contains("Entry 1"));
        assert!(text.contains("        [NULL]"));
    }

    #[test]
    fn test_null_record_then_live_record() {
        let block = MediaKeyBlock {
            records: Some(vec![
                None,
                Some(Record {
                    record_type: Some(0x02),
                    record_length: Some(20),
                    payload: RecordPayload::EndOfMediaKeyBlock {
                        signature_data: Some(vec![0xAB, 0xCD]),
                    },
                }),
            ]),
        };
        let mut report = Report::new();
        print(&mut report, &block);
        let text = report.as_str();
        assert!(text.contains("Record Entry 0"));
        assert!(text.contains("    [NULL]"));
        assert!(text.contains("Record Entry 1"));
        assert!(text.contains("Signature data: AB CD"));
    }
}
