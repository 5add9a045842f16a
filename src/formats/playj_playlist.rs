//! PlayJ playlist file.

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed PlayJ playlist.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Playlist {
    pub track_count: Option<u32>,
    pub tracks: Option<Vec<Option<TrackEntry>>>,
}

/// One playlist track entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackEntry {
    pub entry_length: Option<u32>,
    pub track_id: Option<u32>,
    pub data: Option<Vec<u8>>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::PlayJPlaylist(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::PlayJPlaylist(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a PlayJ playlist report.
pub fn print(report: &mut Report, playlist: &Playlist) {
    report.title("PlayJ Playlist Information:");
    report.blank();

    report.section("  Tracks Information:");
    report.field_num("  Track count", playlist.track_count);
    let tracks = match playlist.tracks.as_deref() {
        Some(tracks) if !tracks.is_empty() => tracks,
        _ => {
            report.line("  No tracks");
            report.blank();
            return;
        }
    };

    for (i, track) in tracks.iter().enumerate() {
        report.line(&format!("  Track {i}"));
        let Some(track) = track else {
            report.line("    [NULL]");
            continue;
        };

        report.field_num("    Entry length", track.entry_length);
        report.field_num("    Track ID", track.track_id);
        report.field_bytes("    Data", track.data.as_deref());
    }
    report.blank();
}
