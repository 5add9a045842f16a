//! Extension-based classification.
//!
//! Lookup is case-insensitive and tolerates surrounding whitespace plus a
//! single leading dot. Extension matching is a fallback only: when magic
//! bytes are available they always win.
//!
//! Some formats have no entry here because their extension is shared with a
//! more common format and the shared key is registered to that format:
//! `.bsp` maps to the Half-Life level rather than the Half-Life 2 level,
//! `.cab` to the Microsoft cabinet rather than the InstallShield cabinet,
//! and `.plj` to the PlayJ audio file rather than the playlist.

use crate::types::FormatTag;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static EXTENSIONS: Lazy<HashMap<&'static str, FormatTag>> = Lazy::new(|| {
    use FormatTag::*;
    HashMap::from([
        ("3ds", N3ds),
        ("7z", SevenZip),
        ("bsp", Bsp),
        ("bz2", BZip2),
        ("cab", MicrosoftCab),
        ("cfb", Cfb),
        ("cia", Cia),
        ("dll", Executable),
        ("exe", Executable),
        ("gcf", Gcf),
        ("gz", GZip),
        ("ini", IniFile),
        ("ird", Ird),
        ("mez", RealArcadeMezzanine),
        ("mpq", MoPaQ),
        ("msi", Cfb),
        ("ncf", Ncf),
        ("nds", Nitro),
        ("pak", Pak),
        ("pff", Pff),
        ("plj", PlayJAudio),
        ("q", Quantum),
        ("rar", Rar),
        ("rgs", RealArcadeInstaller),
        ("sga", Sga),
        ("svm", BdPlusSvm),
        ("tar", TapeArchive),
        ("txt", Textfile),
        ("vpk", Vpk),
        ("wad", Wad),
        ("xz", Xz),
        ("xzp", Xzp),
        ("z", InstallShieldArchiveV3),
        ("zip", PkZip),
    ])
});

/// Classify a file extension.
///
/// Trims whitespace and one leading `.`, then performs a case-insensitive
/// lookup. Unmapped extensions return [`FormatTag::Unknown`]; the function
/// never fails.
pub fn classify_by_extension(ext: &str) -> FormatTag {
    let trimmed = ext.trim();
    let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return FormatTag::Unknown;
    }

    let key = trimmed.to_ascii_lowercase();
    EXTENSIONS
        .get(key.as_str())
        .copied()
        .unwrap_or(FormatTag::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_dot_insensitive() {
        assert_eq!(classify_by_extension("exe"), FormatTag::Executable);
        assert_eq!(classify_by_extension(".exe"), FormatTag::Executable);
        assert_eq!(classify_by_extension("EXE"), FormatTag::Executable);
        assert_eq!(classify_by_extension(" .ExE "), FormatTag::Executable);
    }

    #[test]
    fn test_unmapped_is_unknown() {
        assert_eq!(classify_by_extension("docx"), FormatTag::Unknown);
        assert_eq!(classify_by_extension(""), FormatTag::Unknown);
        assert_eq!(classify_by_extension("."), FormatTag::Unknown);
    }

    #[test]
    fn test_shared_extensions_resolve_to_registered_format() {
        assert_eq!(classify_by_extension("bsp"), FormatTag::Bsp);
        assert_eq!(classify_by_extension("cab"), FormatTag::MicrosoftCab);
        assert_eq!(classify_by_extension("plj"), FormatTag::PlayJAudio);
    }

    #[test]
    fn test_archive_extensions() {
        assert_eq!(classify_by_extension("mpq"), FormatTag::MoPaQ);
        assert_eq!(classify_by_extension("vpk"), FormatTag::Vpk);
        assert_eq!(classify_by_extension("xzp"), FormatTag::Xzp);
        assert_eq!(classify_by_extension("pak"), FormatTag::Pak);
    }
}
