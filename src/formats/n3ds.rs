//! Nintendo 3DS cart image (NCSD).

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed 3DS cart image.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    pub header: Option<Header>,
    pub partition_table: Option<Vec<Option<PartitionEntry>>>,
}

/// NCSD header. The leading RSA signature block is carried for structured
/// export but stays out of the text report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub rsa_signature: Option<Vec<u8>>,
    pub magic: Option<String>,
    pub image_size_in_media_units: Option<u32>,
    pub media_id: Option<Vec<u8>>,
    pub partitions_fs_type: Option<u64>,
    pub partitions_crypt_type: Option<u64>,
}

/// One partition table entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PartitionEntry {
    pub offset: Option<u32>,
    pub length: Option<u32>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::N3ds(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::N3ds(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a 3DS cart report.
pub fn print(report: &mut Report, cart: &Cart) {
    report.title("3DS Cart Image Information:");
    report.blank();

    print_header(report, cart.header.as_ref());
    print_partition_table(report, cart.partition_table.as_deref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  NCSD Header Information:");
    let Some(header) = header else {
        report.line("  No NCSD header");
        report.blank();
        return;
    };

    report.field_str("  Magic", header.magic.as_deref());
    report.field_num(
        "  Image size in media units",
        header.image_size_in_media_units,
    );
    report.field_bytes("  Media ID", header.media_id.as_deref());
    report.field_num("  Partitions FS type", header.partitions_fs_type);
    report.field_num("  Partitions crypt type", header.partitions_crypt_type);
    report.blank();
}

fn print_partition_table(report: &mut Report, entries: Option<&[Option<PartitionEntry>]>) {
    report.section("  Partition Table Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No partition table items");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Partition Table Entry {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Offset", entry.offset);
        report.field_num("    Length", entry.length);
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_without_signature_dump() {
        let cart = Cart {
            header: Some(Header {
                rsa_signature: Some(vec![0xAB; 0x100]),
                magic: Some(String::from("NCSD")),
                image_size_in_media_units: Some(0x40000),
                media_id: Some(vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]),
                ..Header::default()
            }),
            partition_table: None,
        };
        let mut report = Report::new();
        print(&mut report, &cart);
        let text = report.as_str();
        assert!(text.contains("Magic: NCSD"));
        assert!(text.contains("Media ID: 01 02 03 04 05 06 07 08"));
        // The signature block stays out of the text report.
        assert!(!text.contains("AB AB"));
    }

    #[test]
    fn test_partition_entries() {
        let cart = Cart {
            partition_table: Some(vec![Some(PartitionEntry {
                offset: Some(1),
                length: Some(0x3FFF),
            })]),
            ..Cart::default()
        };
        let mut report = Report::new();
        print(&mut report, &cart);
        assert!(report.as_str().contains("Length: 16383 (0x3FFF)"));
    }
}
