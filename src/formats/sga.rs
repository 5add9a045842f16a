//! SGA game archive.
//!
//! The header layout changed across major versions: version 4 carries two
//! MD5 digests around the archive name, version 6 dropped them. The version
//! fields and the directory tables are common to all layouts.

use crate::formats::ParsedFile;
use crate::report::{Report, TextEncoding};
use serde::Serialize;

/// Parsed SGA archive.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Archive {
    pub signature: Option<String>,
    pub major_version: Option<u16>,
    pub minor_version: Option<u16>,
    pub header: HeaderVariant,
    pub directory_header: Option<DirectoryHeader>,
    pub folders: Option<Vec<Option<FolderEntry>>>,
    pub files: Option<Vec<Option<FileEntry>>>,
}

/// Version-selected header block.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderVariant {
    V4 {
        file_md5: Option<Vec<u8>>,
        name: Option<Vec<u8>>,
        header_md5: Option<Vec<u8>>,
        header_length: Option<u32>,
        file_data_offset: Option<u32>,
        dummy_0: Option<u32>,
    },
    V6 {
        name: Option<Vec<u8>>,
        header_length: Option<u32>,
        file_data_offset: Option<u32>,
        dummy_0: Option<u32>,
    },
    /// Major versions with no known header layout.
    #[default]
    Unrecognized,
}

/// Directory header with the table counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryHeader {
    pub section_offset: Option<u32>,
    pub section_count: Option<u32>,
    pub folder_offset: Option<u32>,
    pub folder_count: Option<u32>,
    pub file_offset: Option<u32>,
    pub file_count: Option<u32>,
    pub string_table_offset: Option<u32>,
    pub string_table_count: Option<u32>,
}

/// One folder entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FolderEntry {
    pub name_offset: Option<u32>,
    pub name: Option<String>,
    pub folder_start_index: Option<u32>,
    pub folder_end_index: Option<u32>,
    pub file_start_index: Option<u32>,
    pub file_end_index: Option<u32>,
}

/// One file entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileEntry {
    pub name_offset: Option<u32>,
    pub name: Option<String>,
    pub compression_flags: Option<u32>,
    pub data_offset: Option<u32>,
    pub compressed_size: Option<u32>,
    pub uncompressed_size: Option<u32>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::Sga(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::Sga(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render an SGA report.
pub fn print(report: &mut Report, archive: &Archive) {
    report.title("SGA Information:");
    report.blank();

    print_header(report, archive);
    print_directory_header(report, archive.directory_header.as_ref());
    print_folders(report, archive.folders.as_deref());
    print_files(report, archive.files.as_deref());
}

fn print_header(report: &mut Report, archive: &Archive) {
    report.section("  Header Information:");
    report.field_str("  Signature", archive.signature.as_deref());
    report.field_num("  Major version", archive.major_version);
    report.field_num("  Minor version", archive.minor_version);

    match &archive.header {
        HeaderVariant::V4 {
            file_md5,
            name,
            header_md5,
            header_length,
            file_data_offset,
            dummy_0,
        } => {
            report.field_bytes("  File MD5", file_md5.as_deref());
            report.field_text("  Name", name.as_deref(), TextEncoding::Utf16Le);
            report.field_bytes("  Header MD5", header_md5.as_deref());
            report.field_num("  Header length", *header_length);
            report.field_num("  File data offset", *file_data_offset);
            report.field_num("  Dummy 0", *dummy_0);
        }
        HeaderVariant::V6 {
            name,
            header_length,
            file_data_offset,
            dummy_0,
        } => {
            report.field_text("  Name", name.as_deref(), TextEncoding::Utf16Le);
            report.field_num("  Header length", *header_length);
            report.field_num("  File data offset", *file_data_offset);
            report.field_num("  Dummy 0", *dummy_0);
        }
        HeaderVariant::Unrecognized => {
            report.line("  Unrecognized version, not parsed...");
        }
    }
    report.blank();
}

fn print_directory_header(report: &mut Report, header: Option<&DirectoryHeader>) {
    report.section("  Directory Header Information:");
    let Some(header) = header else {
        report.line("  No directory header");
        report.blank();
        return;
    };

    report.field_num("  Section offset", header.section_offset);
    report.field_num("  Section count", header.section_count);
    report.field_num("  Folder offset", header.folder_offset);
    report.field_num("  Folder count", header.folder_count);
    report.field_num("  File offset", header.file_offset);
    report.field_num("  File count", header.file_count);
    report.field_num("  String table offset", header.string_table_offset);
    report.field_num("  String table count", header.string_table_count);
    report.blank();
}

fn print_folders(report: &mut Report, entries: Option<&[Option<FolderEntry>]>) {
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

        report.field_num("    Name offset", entry.name_offset);
        report.field_str("    Name", entry.name.as_deref());
        report.field_num("    Folder start index", entry.folder_start_index);
        report.field_num("    Folder end index", entry.folder_end_index);
        report.field_num("    File start index", entry.file_start_index);
        report.field_num("    File end index", entry.file_end_index);
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

        report.field_num("    Name offset", entry.name_offset);
        report.field_str("    Name", entry.name.as_deref());
        report.field_num("    Compression flags", entry.compression_flags);
        report.field_num("    Data offset", entry.data_offset);
        report.field_num("    Compressed size", entry.compressed_size);
        report.field_num("    Uncompressed size", entry.uncompressed_size);
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16_bytes(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }

    #[test]
    fn test_v4_header_prints_digests() {
        let archive = Archive {
            signature: Some(String::from("_ARCHIVE")),
            major_version: Some(4),
            minor_version: Some(0),
            header: HeaderVariant::V4 {
                file_md5: Some(vec![0x11; 4]),
                name: Some(utf16_bytes("data")),
                header_md5: Some(vec![0x22; 4]),
                header_length: Some(180),
                file_data_offset: Some(4096),
                dummy_0: Some(1),
            },
            ..Archive::default()
        };
        let mut report = Report::new();
        print(&mut report, &archive);
        let text = report.as_str();
        assert!(text.contains("File MD5: 11 11 11 11"));
        assert!(text.contains("Name: data"));
        assert!(text.contains("Header MD5: 22 22 22 22"));
    }

    #[test]
    fn test_v6_header_has_no_digests() {
        let archive = Archive {
            signature: Some(String::from("_ARCHIVE")),
            major_version: Some(6),
            minor_version: Some(0),
            header: HeaderVariant::V6 {
                name: Some(utf16_bytes("dow3")),
                header_length: Some(120),
                file_data_offset: Some(2048),
                dummy_0: Some(0),
            },
            ..Archive::default()
        };
        let mut report = Report::new();
        print(&mut report, &archive);
        let text = report.as_str();
        assert!(text.contains("Name: dow3"));
        assert!(!text.contains("MD5"));
    }

    #[test]
    fn test_unrecognized_version_still_prints_tables() {
        let archive = Archive {
            signature: Some(String::from("_ARCHIVE")),
            major_version: Some(99),
            minor_version: Some(0),
            header: HeaderVariant::Unrecognized,
            files: Some(vec![Some(FileEntry {
                name: Some(String::from("art.rgd")),
                ..FileEntry::default()
            })]),
            ..Archive::default()
        };
        let mut report = Report::new();
        print(&mut report, &archive);
        let text = report.as_str();
        assert!(text.contains("  Unrecognized version, not parsed..."));
        assert!(text.contains("Name: art.rgd"));
    }
}
