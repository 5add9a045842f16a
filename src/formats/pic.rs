//! Permanent Information and Control data (PIC) for Blu-ray discs.

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed disc information block.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscInformation {
    pub data_structure_length: Option<u16>,
    pub reserved_0: Option<u8>,
    pub reserved_1: Option<u8>,
    pub units: Option<Vec<Option<DiscInformationUnit>>>,
}

/// One disc information unit: header, body, trailer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscInformationUnit {
    pub header: Option<UnitHeader>,
    pub body: Option<UnitBody>,
    pub trailer: Option<UnitTrailer>,
}

/// Unit header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnitHeader {
    pub disc_information_identifier: Option<String>,
    pub disc_information_format: Option<u8>,
    pub reserved_0: Option<u8>,
    pub sequence_number: Option<u8>,
    pub bytes_in_use: Option<u8>,
    pub reserved_1: Option<u8>,
}

/// Unit body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnitBody {
    pub disc_type_identifier: Option<String>,
    pub disc_size_class_version: Option<u8>,
    pub format_dependent_contents: Option<Vec<u8>>,
}

/// Unit trailer, only present on BD-R/RE.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnitTrailer {
    pub disc_manufacturer_id: Option<Vec<u8>>,
    pub media_type_id: Option<Vec<u8>>,
    pub time_stamp: Option<u16>,
    pub product_revision_number: Option<u8>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Pic(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Pic(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a PIC report.
pub fn print(report: &mut Report, di: &DiscInformation) {
    report.title("PIC Information:");
    report.field_num("Data structure length", di.data_structure_length);
    report.field_num("Reserved", di.reserved_0);
    report.field_num("Reserved", di.reserved_1);
    report.blank();

    print_units(report, di.units.as_deref());
}

fn print_units(report: &mut Report, units: Option<&[Option<DiscInformationUnit>]>) {
    report.section("  Disc Information Units:");
    let units = match units {
        Some(units) if !units.is_empty() => units,
        _ => {
            report.line("  No disc information units");
            report.blank();
            return;
        }
    };

    for (i, unit) in units.iter().enumerate() {
        report.line(&format!("  Disc Information Unit {i}"));
        let Some(unit) = unit else {
            report.line("    [NULL]");
            continue;
        };

        match unit.header.as_ref() {
            None => report.line("    No header"),
            Some(header) => {
                report.field_str(
                    "    Disc information identifier",
                    header.disc_information_identifier.as_deref(),
                );
                report.field_num(
                    "    Disc information format",
                    header.disc_information_format,
                );
                report.field_num("    Reserved", header.reserved_0);
                report.field_num("    Sequence number", header.sequence_number);
                report.field_num("    Bytes in use", header.bytes_in_use);
                report.field_num("    Reserved", header.reserved_1);
            }
        }

        match unit.body.as_ref() {
            None => report.line("    No body"),
            Some(body) => {
                report.field_str(
                    "    Disc type identifier",
                    body.disc_type_identifier.as_deref(),
                );
                report.field_num("    Disc size class version", body.disc_size_class_version);
                report.field_bytes(
                    "    Format-dependent contents",
                    body.format_dependent_contents.as_deref(),
                );
            }
        }

        match unit.trailer.as_ref() {
            None => report.line("    No trailer"),
            Some(trailer) => {
                report.field_bytes(
                    "    Disc manufacturer ID",
                    trailer.disc_manufacturer_id.as_deref(),
                );
                report.field_bytes("    Media type ID", trailer.media_type_id.as_deref());
                report.field_num("    Timestamp", trailer.time_stamp);
                report.field_num(
                    "    Product revision number",
                    trailer.product_revision_number,
                );
            }
        }
    }
    report.blank();
}
