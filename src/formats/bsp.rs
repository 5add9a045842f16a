//! Half-Life level (BSP version 30).

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Lump index that carries the entity list.
pub const LUMP_ENTITIES: usize = 0;

/// Lump index that carries the texture directory.
pub const LUMP_TEXTURES: usize = 2;

/// Parsed BSP level.
#[derive(Debug, Clone, Default, Serialize)]
pub struct File {
    pub header: Option<Header>,
    pub texture_header: Option<TextureHeader>,
}

/// BSP header with its lump directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub version: Option<i32>,
    pub lumps: Option<Vec<Option<Lump>>>,
}

/// One lump directory entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Lump {
    pub offset: Option<i32>,
    pub length: Option<i32>,
}

/// Texture directory header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TextureHeader {
    pub texture_count: Option<u32>,
    pub offsets: Option<Vec<i32>>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Bsp(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Bsp(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a BSP report.
pub fn print(report: &mut Report, file: &File) {
    report.title("BSP Information:");
    report.blank();

    print_header(report, file.header.as_ref());
    print_texture_header(report, file.texture_header.as_ref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_num("  Version", header.version);
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
            LUMP_TEXTURES => " (textures)",
            _ => "",
        };
        report.line(&format!("  Lump {i}{special}"));
        let Some(lump) = lump else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Offset", lump.offset);
        report.field_num("    Length", lump.length);
    }
    report.blank();
}

fn print_texture_header(report: &mut Report, header: Option<&TextureHeader>) {
    report.section("  Texture Header Information:");
    let Some(header) = header else {
        report.line("  No texture header");
        report.blank();
        return;
    };

    report.field_num("  Texture count", header.texture_count);
    report.field_array("  Offsets", header.offsets.as_deref());
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_lump_labels() {
        let file = File {
            header: Some(Header {
                version: Some(30),
                lumps: Some(vec![
                    Some(Lump::default()),
                    Some(Lump::default()),
                    Some(Lump::default()),
                ]),
            }),
            texture_header: None,
        };
        let mut report = Report::new();
        print(&mut report, &file);
        let text = report.as_str();
        assert!(text.contains("Version: 30 (0x1E)"));
        assert!(text.contains("Lump 0 (entities)"));
        assert!(text.contains("Lump 2 (textures)"));
        assert!(text.contains("No texture header"));
    }

    #[test]
    fn test_texture_offsets_array() {
        let file = File {
            texture_header: Some(TextureHeader {
                texture_count: Some(2),
                offsets: Some(vec![40, 512]),
            }),
            ..File::default()
        };
        let mut report = Report::new();
        print(&mut report, &file);
        let text = report.as_str();
        assert!(text.contains("Texture count: 2 (0x2)"));
        assert!(text.contains("Offsets: 40, 512"));
    }
}
