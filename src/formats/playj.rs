//! PlayJ audio file.
//!
//! The header version selects both the version-specific header block and
//! which trailing sections exist: version 0 files carry an extra value and
//! a third unknown block, version 10 files carry a data-file table. The
//! metadata fields (track, artist, album, and so on) are common to every
//! version and print after the version-specific block.

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Header version for the original file layout.
pub const VERSION_V1: u32 = 0x0000_0000;

/// Header version for the later multi-file layout.
pub const VERSION_V2: u32 = 0x0000_000A;

/// Parsed PlayJ audio file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AudioFile {
    pub header: Option<AudioHeader>,
    pub unknown_block_1: Option<UnknownBlock1>,
    pub unknown_value_2: Option<u32>,
    pub unknown_block_3: Option<UnknownBlock3>,
    pub data_files_count: Option<u32>,
    pub data_files: Option<Vec<Option<DataFile>>>,
}

/// Audio header: signature and version, the version-selected block, then
/// the metadata fields shared by every version.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AudioHeader {
    pub signature: Option<u32>,
    pub version: Option<u32>,
    pub variant: AudioHeaderVariant,
    pub track_length: Option<u16>,
    pub track: Option<String>,
    pub artist_length: Option<u16>,
    pub artist: Option<String>,
    pub album_length: Option<u16>,
    pub album: Option<String>,
    pub writer_length: Option<u16>,
    pub writer: Option<String>,
    pub publisher_length: Option<u16>,
    pub publisher: Option<String>,
    pub label_length: Option<u16>,
    pub label: Option<String>,
    pub comments_length: Option<u16>,
    pub comments: Option<String>,
}

/// Version-selected header block.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioHeaderVariant {
    V1 {
        track_id: Option<u32>,
        unknown_offset_1: Option<u32>,
        unknown_offset_2: Option<u32>,
        unknown_offset_3: Option<u32>,
        unknown_1: Option<u16>,
        unknown_2: Option<u32>,
        year: Option<u32>,
        track_number: Option<u8>,
        subgenre: Option<u8>,
        duration: Option<u32>,
    },
    V2 {
        unknown_1: Option<u32>,
        unknown_2: Option<u32>,
        unknown_3: Option<u32>,
        unknown_4: Option<u32>,
        unknown_5: Option<u32>,
        unknown_6: Option<u32>,
        unknown_offset_1: Option<u32>,
        unknown_7: Option<u16>,
        unknown_8: Option<u16>,
        unknown_9: Option<u32>,
        unknown_offset_2: Option<u32>,
        unknown_10: Option<u16>,
        unknown_11: Option<u16>,
        unknown_12: Option<u32>,
        unknown_13: Option<u32>,
        unknown_14: Option<u32>,
        unknown_15: Option<u32>,
        unknown_16: Option<u32>,
        unknown_17: Option<u32>,
        track_id: Option<u32>,
        year: Option<u32>,
        track_number: Option<u32>,
        unknown_18: Option<u32>,
    },
    /// Versions with no known header layout.
    #[default]
    Unrecognized,
}

/// First unknown block.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnknownBlock1 {
    pub length: Option<u32>,
    pub data: Option<Vec<u8>>,
}

/// Third unknown block, version 0 only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnknownBlock3 {
    pub data: Option<Vec<u8>>,
}

/// One data file entry, version 10 only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataFile {
    pub file_name_length: Option<u16>,
    pub file_name: Option<String>,
    pub data_length: Option<u32>,
    pub data: Option<Vec<u8>>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::PlayJAudio(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::PlayJAudio(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a PlayJ audio report. The trailing sections are selected by the
/// header version, so the report shape is a function of the model alone.
pub fn print(report: &mut Report, audio: &AudioFile) {
    report.title("PlayJ Audio File Information:");
    report.blank();

    print_header(report, audio.header.as_ref());
    print_unknown_block_1(report, audio.unknown_block_1.as_ref());

    let version = audio.header.as_ref().and_then(|header| header.version);
    if version == Some(VERSION_V1) {
        print_unknown_value_2(report, audio.unknown_value_2);
        print_unknown_block_3(report, audio.unknown_block_3.as_ref());
    } else if version == Some(VERSION_V2) {
        print_data_files(report, audio.data_files_count, audio.data_files.as_deref());
    }
}

fn print_header(report: &mut Report, header: Option<&AudioHeader>) {
    report.section("  Audio Header Information:");
    let Some(header) = header else {
        report.line("  No audio header");
        report.blank();
        return;
    };

    report.field_num("  Signature", header.signature);
    report.field_num("  Version", header.version);

    match &header.variant {
        AudioHeaderVariant::V1 {
            track_id,
            unknown_offset_1,
            unknown_offset_2,
            unknown_offset_3,
            unknown_1,
            unknown_2,
            year,
            track_number,
            subgenre,
            duration,
        } => {
            report.field_num("  Track ID", *track_id);
            report.field_num("  Unknown offset 1", *unknown_offset_1);
            report.field_num("  Unknown offset 2", *unknown_offset_2);
            report.field_num("  Unknown offset 3", *unknown_offset_3);
            report.field_num("  Unknown 1", *unknown_1);
            report.field_num("  Unknown 2", *unknown_2);
            report.field_num("  Year", *year);
            report.field_num("  Track number", *track_number);
            report.field_num("  Subgenre", *subgenre);
            report.field_num("  Duration in seconds", *duration);
        }
        AudioHeaderVariant::V2 {
            unknown_1,
            unknown_2,
            unknown_3,
            unknown_4,
            unknown_5,
            unknown_6,
            unknown_offset_1,
            unknown_7,
            unknown_8,
            unknown_9,
            unknown_offset_2,
            unknown_10,
            unknown_11,
            unknown_12,
            unknown_13,
            unknown_14,
            unknown_15,
            unknown_16,
            unknown_17,
            track_id,
            year,
            track_number,
            unknown_18,
        } => {
            report.field_num("  Unknown 1", *unknown_1);
            report.field_num("  Unknown 2", *unknown_2);
            report.field_num("  Unknown 3", *unknown_3);
            report.field_num("  Unknown 4", *unknown_4);
            report.field_num("  Unknown 5", *unknown_5);
            report.field_num("  Unknown 6", *unknown_6);
            report.field_num("  Unknown Offset 1", *unknown_offset_1);
            report.field_num("  Unknown 7", *unknown_7);
            report.field_num("  Unknown 8", *unknown_8);
            report.field_num("  Unknown 9", *unknown_9);
            report.field_num("  Unknown Offset 2", *unknown_offset_2);
            report.field_num("  Unknown 10", *unknown_10);
            report.field_num("  Unknown 11", *unknown_11);
            report.field_num("  Unknown 12", *unknown_12);
            report.field_num("  Unknown 13", *unknown_13);
            report.field_num("  Unknown 14", *unknown_14);
            report.field_num("  Unknown 15", *unknown_15);
            report.field_num("  Unknown 16", *unknown_16);
            report.field_num("  Unknown 17", *unknown_17);
            report.field_num("  Track ID", *track_id);
            report.field_num("  Year", *year);
            report.field_num("  Track number", *track_number);
            report.field_num("  Unknown 18", *unknown_18);
        }
        AudioHeaderVariant::Unrecognized => {
            report.line("  Unrecognized version, not parsed...");
        }
    }

    report.field_num("  Track length", header.track_length);
    report.field_str("  Track", header.track.as_deref());
    report.field_num("  Artist length", header.artist_length);
    report.field_str("  Artist", header.artist.as_deref());
    report.field_num("  Album length", header.album_length);
    report.field_str("  Album", header.album.as_deref());
    report.field_num("  Writer length", header.writer_length);
    report.field_str("  Writer", header.writer.as_deref());
    report.field_num("  Publisher length", header.publisher_length);
    report.field_str("  Publisher", header.publisher.as_deref());
    report.field_num("  Label length", header.label_length);
    report.field_str("  Label", header.label.as_deref());
    report.field_num("  Comments length", header.comments_length);
    report.field_str("  Comments", header.comments.as_deref());
    report.blank();
}

fn print_unknown_block_1(report: &mut Report, block: Option<&UnknownBlock1>) {
    report.section("  Unknown Block 1 Information:");
    let Some(block) = block else {
        report.line("  No unknown block 1");
        report.blank();
        return;
    };

    report.field_num("  Length", block.length);
    report.field_bytes("  Data", block.data.as_deref());
    report.blank();
}

fn print_unknown_value_2(report: &mut Report, value: Option<u32>) {
    report.section("  Unknown Value 2 Information:");
    let Some(value) = value else {
        report.line("  No unknown value 2");
        report.blank();
        return;
    };

    report.field_num("  Value", Some(value));
    report.blank();
}

fn print_unknown_block_3(report: &mut Report, block: Option<&UnknownBlock3>) {
    report.section("  Unknown Block 3 Information:");
    let Some(block) = block else {
        report.line("  No unknown block 3");
        report.blank();
        return;
    };

    report.field_bytes("  Data", block.data.as_deref());
    report.blank();
}

fn print_data_files(
    report: &mut Report,
    count: Option<u32>,
    entries: Option<&[Option<DataFile>]>,
) {
    report.section("  Data Files Information:");
    report.field_num("  Data files count", count);
    let entries = match entries {
        Some(entries) if count.unwrap_or(0) != 0 && !entries.is_empty() => entries,
        _ => {
            report.line("  No data files");
            report.blank();
            return;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        report.line(&format!("  Data File {i}:"));
        let Some(entry) = entry else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    File name length", entry.file_name_length);
        report.field_str("    File name", entry.file_name.as_deref());
        report.field_num("    Data length", entry.data_length);
        report.field_bytes("    Data", entry.data.as_deref());
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v1_header() -> AudioHeader {
        AudioHeader {
            signature: Some(0xFF9D_534B),
            version: Some(VERSION_V1),
            variant: AudioHeaderVariant::V1 {
                track_id: Some(42),
                unknown_offset_1: Some(0),
                unknown_offset_2: Some(0),
                unknown_offset_3: Some(0),
                unknown_1: Some(0),
                unknown_2: Some(0),
                year: Some(1999),
                track_number: Some(7),
                subgenre: Some(3),
                duration: Some(215),
            },
            track: Some(String::from("Intro")),
            artist: Some(String::from("PlayJ")),
            ..AudioHeader::default()
        }
    }

    #[test]
    fn test_v1_selects_value_and_block_3_sections() {
        let audio = AudioFile {
            header: Some(v1_header()),
            unknown_value_2: Some(17),
            ..AudioFile::default()
        };
        let mut report = Report::new();
        print(&mut report, &audio);
        let text = report.as_str();
        assert!(text.contains("Track ID: 42 (0x2A)"));
        assert!(text.contains("Duration in seconds: 215 (0xD7)"));
        assert!(text.contains("Unknown Value 2 Information:"));
        assert!(text.contains("Value: 17 (0x11)"));
        assert!(text.contains("Unknown Block 3 Information:"));
        assert!(!text.contains("Data Files Information:"));
    }

    #[test]
    fn test_v2_selects_data_file_section() {
        let audio = AudioFile {
            header: Some(AudioHeader {
                version: Some(VERSION_V2),
                variant: AudioHeaderVariant::V2 {
                    unknown_1: None,
                    unknown_2: None,
                    unknown_3: None,
                    unknown_4: None,
                    unknown_5: None,
                    unknown_6: None,
                    unknown_offset_1: None,
                    unknown_7: None,
                    unknown_8: None,
                    unknown_9: None,
                    unknown_offset_2: None,
                    unknown_10: None,
                    unknown_11: None,
                    unknown_12: None,
                    unknown_13: None,
                    unknown_14: None,
                    unknown_15: None,
                    unknown_16: None,
                    unknown_17: None,
                    track_id: Some(9),
                    year: Some(2001),
                    track_number: Some(2),
                    unknown_18: None,
                },
                ..AudioHeader::default()
            }),
            data_files_count: Some(1),
            data_files: Some(vec![Some(DataFile {
                file_name_length: Some(9),
                file_name: Some(String::from("track.dat")),
                data_length: Some(2),
                data: Some(vec![0x0F, 0xF0]),
            })]),
            ..AudioFile::default()
        };
        let mut report = Report::new();
        print(&mut report, &audio);
        let text = report.as_str();
        assert!(text.contains("Data files count: 1 (0x1)"));
        assert!(text.contains("File name: track.dat"));
        assert!(text.contains("Data: 0F F0"));
        assert!(!text.contains("Unknown Value 2 Information:"));
    }

    #[test]
    fn test_unrecognized_version_fallback_line() {
        let audio = AudioFile {
            header: Some(AudioHeader {
                version: Some(5),
                variant: AudioHeaderVariant::Unrecognized,
                track: Some(String::from("Still printed")),
                ..AudioHeader::default()
            }),
            ..AudioFile::default()
        };
        let mut report = Report::new();
        print(&mut report, &audio);
        let text = report.as_str();
        assert!(text.contains("  Unrecognized version, not parsed..."));
        // Shared trailing fields still print after the fallback.
        assert!(text.contains("Track: Still printed"));
        // Neither version-specific trailing section is selected.
        assert!(!text.contains("Unknown Value 2 Information:"));
        assert!(!text.contains("Data Files Information:"));
    }

    #[test]
    fn test_data_files_iterate_actual_length() {
        // Count claims one entry, the table holds three.
        let audio = AudioFile {
            header: Some(AudioHeader {
                version: Some(VERSION_V2),
                ..AudioHeader::default()
            }),
            data_files_count: Some(1),
            data_files: Some(vec![
                Some(DataFile::default()),
                None,
                Some(DataFile::default()),
            ]),
            ..AudioFile::default()
        };
        let mut report = Report::new();
        print(&mut report, &audio);
        let text = report.as_str();
        assert_eq!(text.matches("  Data File ").count(), 3);
        assert!(text.contains("    [NULL]"));
    }
}
