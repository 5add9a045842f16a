//! Microsoft cabinet file.

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed Microsoft cabinet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cabinet {
    pub header: Option<Header>,
    pub folders: Option<Vec<Option<Folder>>>,
    pub files: Option<Vec<Option<FileEntry>>>,
}

/// Cabinet header.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub signature: Option<String>,
    pub reserved_1: Option<u32>,
    pub cabinet_size: Option<u32>,
    pub reserved_2: Option<u32>,
    pub files_offset: Option<u32>,
    pub reserved_3: Option<u32>,
    pub version_minor: Option<u8>,
    pub version_major: Option<u8>,
    pub folder_count: Option<u16>,
    pub file_count: Option<u16>,
    pub flags: Option<u16>,
    pub set_id: Option<u16>,
    pub cabinet_index: Option<u16>,
}

/// One folder entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Folder {
    pub cab_start_offset: Option<u32>,
    pub data_count: Option<u16>,
    pub compression_type: Option<u16>,
}

/// One file entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileEntry {
    pub file_size: Option<u32>,
    pub folder_start_offset: Option<u32>,
    pub folder_index: Option<u16>,
    pub date: Option<u16>,
    pub time: Option<u16>,
    pub attributes: Option<u16>,
    pub name: Option<String>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::MicrosoftCab(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::MicrosoftCab(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a Microsoft cabinet report.
pub fn print(report: &mut Report, cabinet: &Cabinet) {
    report.title("Microsoft Cabinet Information:");
    report.blank();

    print_header(report, cabinet.header.as_ref());
    print_folders(report, cabinet.folders.as_deref());
    print_files(report, cabinet.files.as_deref());
}

fn print_header(report: &mut Report, header: Option<&Header>) {
    report.section("  Header Information:");
    let Some(header) = header else {
        report.line("  No header");
        report.blank();
        return;
    };

    report.field_str("  Signature", header.signature.as_deref());
    report.field_num("  Reserved 1", header.reserved_1);
    report.field_num("  Cabinet size", header.cabinet_size);
    report.field_num("  Reserved 2", header.reserved_2);
    report.field_num("  Files offset", header.files_offset);
    report.field_num("  Reserved 3", header.reserved_3);
    report.field_num("  Minor version", header.version_minor);
    report.field_num("  Major version", header.version_major);
    report.field_num("  Folder count", header.folder_count);
    report.field_num("  File count", header.file_count);
    report.field_num("  Flags", header.flags);
    report.field_num("  Set ID", header.set_id);
    report.field_num("  Cabinet index", header.cabinet_index);
    report.blank();
}

fn print_folders(report: &mut Report, entries: Option<&[Option<Folder>]>) {
    report.section("  Folders Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No folders");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Folder {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Cab start offset", entry.cab_start_offset);
        report.field_num("    Data count", entry.data_count);
        report.field_num("    Compression type", entry.compression_type);
    }
    report.blank();
}

fn print_files(report: &mut Report, entries: Option<&[Option<FileEntry>]>) {
    report.section("  Files Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No files");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  File {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    File size", entry.file_size);
        report.field_num("    Folder start offset", entry.folder_start_offset);
        report.field_num("    Folder index", entry.folder_index);
        report.field_num("    Date", entry.date);
        report.field_num("    Time", entry.time);
        report.field_num("    Attributes", entry.attributes);
        report.field_str("    Name", entry.name.as_deref());
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_versions() {
        let cabinet = Cabinet {
            header: Some(Header {
                signature: Some(String::from("MSCF")),
                version_minor: Some(3),
                version_major: Some(1),
                folder_count: Some(1),
                file_count: Some(2),
                ..Header::default()
            }),
            ..Cabinet::default()
        };
        let mut report = Report::new();
        print(&mut report, &cabinet);
        let text = report.as_str();
        assert!(text.contains("Signature: MSCF"));
        assert!(text.contains("Minor version: 3 (0x3)"));
        assert!(text.contains("Major version: 1 (0x1)"));
        assert!(text.contains("No folders"));
        assert!(text.contains("No files"));
    }

    #[test]
    fn test_folder_and_file_entries() {
        let cabinet = Cabinet {
            folders: Some(vec![Some(Folder {
                cab_start_offset: Some(0x5C),
                data_count: Some(4),
                compression_type: Some(1),
            })]),
            files: Some(vec![Some(FileEntry {
                file_size: Some(100),
                name: Some(String::from("readme.txt")),
                ..FileEntry::default()
            })]),
            ..Cabinet::default()
        };
        let mut report = Report::new();
        print(&mut report, &cabinet);
        let text = report.as_str();
        assert!(text.contains("Compression type: 1 (0x1)"));
        assert!(text.contains("Name: readme.txt"));
    }
}
