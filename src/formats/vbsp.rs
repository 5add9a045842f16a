//! Half-Life 2 level (VBSP).

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Lump index that carries the entity list.
pub const LUMP_ENTITIES: usize = 0;

/// Lump index that carries the embedded pakfile.
pub const LUMP_PAKFILE: usize = 40;

/// Parsed VBSP level.
#[derive(Debug, Clone, Default, Serialize)]
pub struct File {
    pub header: Option<Header>,
}

/// VBSP header with its lump directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub signature: Option<String>,
    pub version: Option<i32>,
    pub lumps: Option<Vec<Option<Lump>>>,
    pub map_revision: Option<i32>,
}

/// One lump directory entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Lump {
    pub offset: Option<i32>,
    pub length: Option<i32>,
    pub version: Option<i32>,
    pub four_cc: Option<Vec<char>>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Vbsp(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Vbsp(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a VBSP report.
pub fn print(report: &mut Report, file: &File) {
    report.title("VBSP Information:");
    report.blank();

    print_header(report, file.header.as_ref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_str("  Signature", header.signature.as_deref());
    report.field_num("  Version", header.version);
    report.field_num("  Map revision", header.map_revision);
    report.blank();

    print_lumps(report, header.lumps.as_deref());
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
        let special = match i {
            LUMP_ENTITIES => " (entities)",
            LUMP_PAKFILE => " (pakfile)",
            _ => "",
        };
        report.line(&format!("  Lump {i}{special}"));
        let Some(lump) = lump else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Offset", lump.offset);
        report.field_num("    Length", lump.length);
        report.field_num("    Version", lump.version);
        report.field_array("    4CC", lump.four_cc.as_deref());
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_lump_labels() {
        let lumps: Vec<Option<Lump>> = (0..=LUMP_PAKFILE)
            .map(|_| Some(Lump::default()))
            .collect();
        let file = File {
            header: Some(Header {
                signature: Some(String::from("VBSP")),
                version: Some(20),
                lumps: Some(lumps),
                map_revision: Some(3),
            }),
        };
        let mut report = Report::new();
        print(&mut report, &file);
        let text = report.as_str();
        assert!(text.contains("Lump 0 (entities)"));
        assert!(text.contains("Lump 40 (pakfile)"));
        assert!(text.contains("Lump 1\n"));
    }

    #[test]
    fn test_four_cc_renders_comma_joined() {
        let file = File {
            header: Some(Header {
                lumps: Some(vec![Some(Lump {
                    four_cc: Some(vec!['L', 'Z', 'M', 'A']),
                    ..Lump::default()
                })]),
                ..Header::default()
            }),
        };
        let mut report = Report::new();
        print(&mut report, &file);
        assert!(report.as_str().contains("4CC: L, Z, M, A"));
    }

    #[test]
    fn test_absent_header() {
        let mut report = Report::new();
        print(&mut report, &File::default());
        assert!(report.as_str().contains("No header"));
        assert!(!report.as_str().contains("Lumps Information"));
    }
}
