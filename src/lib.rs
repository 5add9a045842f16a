//! Archive Inspector - Format Classification and Report Rendering
//!
//! This library identifies legacy game and media archive formats from
//! leading bytes or file extensions, and renders already-parsed models of
//! those formats into deterministic diagnostic reports.
//!
//! # Features
//!
//! - **Signature Classification**: ordered magic-byte table with don't-care
//!   positions, plus a case-insensitive extension fallback
//! - **Executable Cascade**: secondary classification of MZ containers into
//!   NE, LE/LX, and PE nested formats
//! - **Report Rendering**: ~30 per-format renderers sharing one set of
//!   value-to-line conventions, dispatched through an immutable registry
//! - **Structured Export**: JSON export of any renderable model
//!
//! # Quick Start
//!
//! ```rust
//! use archive_inspector::{classify_bytes, FormatTag};
//!
//! let window = [0x50, 0x41, 0x43, 0x4B, 0x10, 0x00, 0x00, 0x00];
//! assert_eq!(classify_bytes(&window), FormatTag::Pak);
//! ```
//!
//! Rendering consumes a model built by an external decoder:
//!
//! ```rust
//! use archive_inspector::formats::{pak, ParsedFile};
//!
//! let model = ParsedFile::Pak(pak::File::default());
//! let report = archive_inspector::render(&model).unwrap();
//! assert!(report.starts_with("PAK Information:"));
//! ```
//!
//! Classification and rendering are pure functions over their inputs; the
//! only process-wide state is the read-only dispatch tables. The one scoped
//! resource is the stream handed to the executable cascade, whose read
//! position is mutated during classification.

#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::too_many_lines)]

pub mod detection;
pub mod error;
pub mod formats;
pub mod registry;
pub mod report;
pub mod types;

pub use detection::{classify_by_extension, classify_by_magic, classify_executable};
pub use error::{InspectError, Result};
pub use formats::ParsedFile;
pub use registry::{export_json, render};
pub use report::{Report, TextEncoding};
pub use types::{ExecutableClass, FormatTag};

use std::io::Read;
use std::path::Path;

/// Largest byte window any registered signature needs.
const SNIFF_WINDOW: usize = 512;

/// Classify a byte window by magic bytes alone.
///
/// Empty or unrecognized input returns [`FormatTag::Unknown`].
pub fn classify_bytes(data: &[u8]) -> FormatTag {
    detection::classify_by_magic(data)
}

/// Classify a byte window with an optional extension hint.
///
/// Magic-byte classification always takes precedence; the hint is consulted
/// only when the bytes match nothing.
pub fn classify_bytes_with_hint(data: &[u8], extension_hint: Option<&str>) -> FormatTag {
    let tag = detection::classify_by_magic(data);
    if tag != FormatTag::Unknown {
        return tag;
    }
    extension_hint.map_or(FormatTag::Unknown, detection::classify_by_extension)
}

/// Classify a file by path.
///
/// Reads the leading bytes and classifies by magic first, falling back to
/// the file extension when the bytes match nothing.
///
/// # Errors
///
/// Returns an error only when the file cannot be opened or read; an
/// unrecognized format is `Ok(FormatTag::Unknown)`.
pub fn classify_file<P: AsRef<Path>>(path: P) -> Result<FormatTag> {
    let path = path.as_ref();
    let mut file = std::fs::File::open(path)?;
    let mut window = [0u8; SNIFF_WINDOW];
    let mut filled = 0;
    loop {
        let read = file.read(&mut window[filled..])?;
        if read == 0 {
            break;
        }
        filled += read;
    }

    let hint = path.extension().and_then(std::ffi::OsStr::to_str);
    Ok(classify_bytes_with_hint(&window[..filled], hint))
}

/// Get version information for this library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_classify_bytes_pack() {
        let window = *b"PACK\x10\x00\x00\x00\x00\x00\x00\x00";
        assert_eq!(classify_bytes(&window), FormatTag::Pak);
    }

    #[test]
    fn test_magic_wins_over_disagreeing_hint() {
        let window = *b"PACK\x10\x00\x00\x00";
        assert_eq!(
            classify_bytes_with_hint(&window, Some("wad")),
            FormatTag::Pak
        );
    }

    #[test]
    fn test_hint_used_when_bytes_unrecognized() {
        let window = [0u8; 16];
        assert_eq!(
            classify_bytes_with_hint(&window, Some(".mpq")),
            FormatTag::MoPaQ
        );
        assert_eq!(classify_bytes_with_hint(&window, None), FormatTag::Unknown);
    }

    #[test]
    fn test_classify_file_by_magic() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"MSCF\x00\x00\x00\x00").unwrap();
        let tag = classify_file(file.path()).unwrap();
        assert_eq!(tag, FormatTag::MicrosoftCab);
    }

    #[test]
    fn test_classify_file_extension_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.bsp");
        std::fs::write(&path, [0u8; 4]).unwrap();
        assert_eq!(classify_file(&path).unwrap(), FormatTag::Bsp);
    }

    #[test]
    fn test_classify_missing_file_is_io_error() {
        let result = classify_file("/nonexistent/path/archive.pak");
        assert!(matches!(result, Err(InspectError::Io(_))));
    }
}
