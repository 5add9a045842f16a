//! InstallShield cabinet file.

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed InstallShield cabinet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cabinet {
    pub common_header: Option<CommonHeader>,
    pub descriptor: Option<Descriptor>,
    pub file_descriptors: Option<Vec<Option<FileDescriptor>>>,
}

/// Common header shared by cabinet and header files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommonHeader {
    pub signature: Option<String>,
    pub version: Option<u32>,
    pub volume_info: Option<u32>,
    pub descriptor_offset: Option<u32>,
    pub descriptor_size: Option<u32>,
}

/// Cabinet descriptor.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Descriptor {
    pub strings_offset: Option<u32>,
    pub component_count: Option<u16>,
    pub file_group_count: Option<u16>,
    pub file_count: Option<u32>,
    pub file_table_offset: Option<u32>,
    pub file_table_size: Option<u32>,
    pub directory_count: Option<u16>,
}

/// One file descriptor.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileDescriptor {
    pub name_offset: Option<u32>,
    pub name: Option<String>,
    pub directory_index: Option<u32>,
    pub flags: Option<u16>,
    pub expanded_size: Option<u64>,
    pub compressed_size: Option<u64>,
    pub data_offset: Option<u64>,
    pub md5: Option<Vec<u8>>,
    pub link_previous: Option<u32>,
    pub link_next: Option<u32>,
    pub link_flags: Option<u8>,
    pub volume: Option<u16>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::InstallShieldCab(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::InstallShieldCab(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render an InstallShield cabinet report.
pub fn print(report: &mut Report, cabinet: &Cabinet) {
    report.title("InstallShield Cabinet Information:");
    report.blank();

    print_common_header(report, cabinet.common_header.as_ref());
    print_descriptor(report, cabinet.descriptor.as_ref());
    print_file_descriptors(report, cabinet.file_descriptors.as_deref());
}

fn print_common_header(report: &mut Report, header: Option<&CommonHeader>) {
    report.section("  Common Header Information:");
    let Some(header) = header else {
        report.line("  No common header");
        report.blank();
        return;
    };

    report.field_str("  Signature", header.signature.as_deref());
    report.field_num("  Version", header.version);
    report.field_num("  Volume info", header.volume_info);
    report.field_num("  Descriptor offset", header.descriptor_offset);
    report.field_num("  Descriptor size", header.descriptor_size);
    report.blank();
}

fn print_descriptor(report: &mut Report, descriptor: Option<&Descriptor>) {
    report.section("  Descriptor Information:");
    let Some(descriptor) = descriptor else {
        report.line("  No descriptor");
        report.blank();
        return;
    };

    report.field_num("  Strings offset", descriptor.strings_offset);
    report.field_num("  Component count", descriptor.component_count);
    report.field_num("  File group count", descriptor.file_group_count);
    report.field_num("  File count", descriptor.file_count);
    report.field_num("  File table offset", descriptor.file_table_offset);
    report.field_num("  File table size", descriptor.file_table_size);
    report.field_num("  Directory count", descriptor.directory_count);
    report.blank();
}

fn print_file_descriptors(report: &mut Report, entries: Option<&[Option<FileDescriptor>]>) {
    report.section("  File Descriptors Information:");
    let entries = match entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            report.line("  No file descriptors");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  File Descriptor {i}"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Name offset", entry.name_offset);
        report.field_str("    Name", entry.name.as_deref());
        report.field_num("    Directory index", entry.directory_index);
        report.field_num("    Flags", entry.flags);
        report.field_num("    Expanded size", entry.expanded_size);
        report.field_num("    Compressed size", entry.compressed_size);
        report.field_num("    Data offset", entry.data_offset);
        report.field_bytes("    MD5", entry.md5.as_deref());
        report.field_num("    Link previous", entry.link_previous);
        report.field_num("    Link next", entry.link_next);
        report.field_num("    Link flags", entry.link_flags);
        report.field_num("    Volume", entry.volume);
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_counts() {
        let cabinet = Cabinet {
            common_header: Some(CommonHeader {
                signature: Some(String::from("ISc(")),
                version: Some(0x0100_600C),
                ..CommonHeader::default()
            }),
            descriptor: Some(Descriptor {
                file_count: Some(12),
                directory_count: Some(3),
                ..Descriptor::default()
            }),
            file_descriptors: None,
        };
        let mut report = Report::new();
        print(&mut report, &cabinet);
        let text = report.as_str();
        assert!(text.contains("Signature: ISc("));
        assert!(text.contains("File count: 12 (0xC)"));
        assert!(text.contains("No file descriptors"));
    }

    #[test]
    fn test_file_descriptor_md5() {
        let cabinet = Cabinet {
            file_descriptors: Some(vec![Some(FileDescriptor {
                name: Some(String::from("setup.ini")),
                md5: Some(vec![0x00, 0xFF]),
                ..FileDescriptor::default()
            })]),
            ..Cabinet::default()
        };
        let mut report = Report::new();
        print(&mut report, &cabinet);
        let text = report.as_str();
        assert!(text.contains("Name: setup.ini"));
        assert!(text.contains("MD5: 00 FF"));
    }
}
