//! Half-Life texture package file (WAD3).

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed WAD file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct File {
    pub header: Option<Header>,
    pub lumps: Option<Vec<Option<Lump>>>,
}

/// WAD header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub signature: Option<String>,
    pub lump_count: Option<u32>,
    pub lump_offset: Option<u32>,
}

/// One lump directory entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Lump {
    pub offset: Option<u32>,
    pub disk_length: Option<u32>,
    pub length: Option<u32>,
    pub lump_type: Option<u8>,
    pub compression: Option<u8>,
    pub padding_0: Option<u8>,
    pub padding_1: Option<u8>,
    pub name: Option<String>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Wad(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Wad(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a WAD report.
pub fn print(report: &mut Report, file: &File) {
    report.title("WAD Information:");
    report.blank();

    print_header(report, file.header.as_ref());
    print_lumps(report, file.lumps.as_deref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_str("  Signature", header.signature.as_deref());
    report.field_num("  Lump count", header.lump_count);
    report.field_num("  Lump offset", header.lump_offset);
    report.blank();
}

fn print_lumps(report: &mut Report, lumps: Option<&[Option<Lump>]>) {
    report.section("  Lumps Information:");
    let lumps = match lumps {
        Some(lumps) if !lumps.is_empty() => lumps,
        _ => {
            report.line("  No lumps");
            report.blank();
            return;
        }
    };

    for (i, lump) in lumps.iter().enumerate() {
        report.line(&format!("  Lump {i}"));
        let Some(lump) = lump else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Offset", lump.offset);
        report.field_num("    Disk length", lump.disk_length);
        report.field_num("    Length", lump.length);
        report.field_num("    Type", lump.lump_type);
        report.field_num("    Compression", lump.compression);
        report.field_num("    Padding 0", lump.padding_0);
        report.field_num("    Padding 1", lump.padding_1);
        report.field_str("    Name", lump.name.as_deref());
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_lump() {
        let file = File {
            header: Some(Header {
                signature: Some(String::from("WAD3")),
                lump_count: Some(1),
                lump_offset: Some(12),
            }),
            lumps: Some(vec![Some(Lump {
                offset: Some(12),
                disk_length: Some(85488),
                length: Some(85488),
                lump_type: Some(0x43),
                compression: Some(0),
                padding_0: Some(0),
                padding_1: Some(0),
                name: Some(String::from("{BLUE")),
            })]),
        };
        let mut report = Report::new();
        print(&mut report, &file);
        let text = report.as_str();
        assert!(text.contains("Signature: WAD3"));
        assert!(text.contains("Type: 67 (0x43)"));
        assert!(text.contains("Name: {BLUE"));
    }

    #[test]
    fn test_no_lumps() {
        let mut report = Report::new();
        print(&mut report, &File::default());
        assert!(report.as_str().contains("No lumps"));
    }
}
