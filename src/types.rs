//! Core types for the archive inspector.
//!
//! This module defines the closed set of recognizable formats and the
//! outcome type of the secondary executable classification.

use serde::Serialize;
use std::fmt;

/// Identifiers for every supported container, executable, and media format.
///
/// The set is closed: it is never extended at runtime, and classification
/// that matches nothing maps to [`FormatTag::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatTag {
    /// AACS media key block
    AacsMediaKeyBlock,
    /// BD+ SVM
    BdPlusSvm,
    /// BFPK custom archive
    Bfpk,
    /// Half-Life level
    Bsp,
    /// bzip2 archive
    BZip2,
    /// Compound File Binary
    Cfb,
    /// CTR Importable Archive
    Cia,
    /// Executable or library (MZ, NE, LE/LX, and PE)
    Executable,
    /// Half-Life Game Cache File
    Gcf,
    /// gzip archive
    GZip,
    /// Key-value pair INI file
    IniFile,
    /// InstallShield archive v3
    InstallShieldArchiveV3,
    /// InstallShield cabinet file
    InstallShieldCab,
    /// PS3 ISO rebuild data
    Ird,
    /// Link Data Security encrypted file
    LdsCrypt,
    /// Microsoft cabinet file
    MicrosoftCab,
    /// Microsoft LZ-compressed file
    MicrosoftLz,
    /// MPQ game data archive
    MoPaQ,
    /// Nintendo 3DS cart image
    N3ds,
    /// Half-Life No Cache File
    Ncf,
    /// Nintendo DS/DSi cart image
    Nitro,
    /// Half-Life Package File
    Pak,
    /// NovaLogic Game Archive Format
    Pff,
    /// Permanent Information and Control data
    Pic,
    /// PKWARE ZIP archive and derivatives
    PkZip,
    /// PlayJ audio file
    PlayJAudio,
    /// PlayJ playlist file
    PlayJPlaylist,
    /// Quantum archive
    Quantum,
    /// RAR archive
    Rar,
    /// RealArcade installer
    RealArcadeInstaller,
    /// RealArcade mezzanine
    RealArcadeMezzanine,
    /// 7-zip archive
    SevenZip,
    /// StarForce FileSystem file
    Sffs,
    /// SGA game archive
    Sga,
    /// Tape archive
    TapeArchive,
    /// Generic text file
    Textfile,
    /// Half-Life 2 level
    Vbsp,
    /// Valve Package File
    Vpk,
    /// Half-Life Texture Package File
    Wad,
    /// xz archive
    Xz,
    /// Xbox Package File
    Xzp,
    /// Unknown or unsupported
    Unknown,
}

impl FormatTag {
    /// Human-readable name of the format.
    pub fn name(&self) -> &'static str {
        match self {
            FormatTag::AacsMediaKeyBlock => "AACS media key block",
            FormatTag::BdPlusSvm => "BD+ SVM",
            FormatTag::Bfpk => "BFPK custom archive",
            FormatTag::Bsp => "Half-Life level",
            FormatTag::BZip2 => "bzip2 archive",
            FormatTag::Cfb => "Compound File Binary",
            FormatTag::Cia => "CTR Importable Archive",
            FormatTag::Executable => "Executable or library",
            FormatTag::Gcf => "Half-Life Game Cache File",
            FormatTag::GZip => "gzip archive",
            FormatTag::IniFile => "INI file",
            FormatTag::InstallShieldArchiveV3 => "InstallShield archive v3",
            FormatTag::InstallShieldCab => "InstallShield cabinet file",
            FormatTag::Ird => "PS3 ISO rebuild data",
            FormatTag::LdsCrypt => "Link Data Security encrypted file",
            FormatTag::MicrosoftCab => "Microsoft cabinet file",
            FormatTag::MicrosoftLz => "Microsoft LZ-compressed file",
            FormatTag::MoPaQ => "MPQ game data archive",
            FormatTag::N3ds => "Nintendo 3DS cart image",
            FormatTag::Ncf => "Half-Life No Cache File",
            FormatTag::Nitro => "Nintendo DS/DSi cart image",
            FormatTag::Pak => "Half-Life Package File",
            FormatTag::Pff => "NovaLogic Game Archive Format",
            FormatTag::Pic => "PIC disc information",
            FormatTag::PkZip => "PKWARE ZIP archive",
            FormatTag::PlayJAudio => "PlayJ audio file",
            FormatTag::PlayJPlaylist => "PlayJ playlist file",
            FormatTag::Quantum => "Quantum archive",
            FormatTag::Rar => "RAR archive",
            FormatTag::RealArcadeInstaller => "RealArcade installer",
            FormatTag::RealArcadeMezzanine => "RealArcade mezzanine",
            FormatTag::SevenZip => "7-zip archive",
            FormatTag::Sffs => "StarForce FileSystem file",
            FormatTag::Sga => "SGA game archive",
            FormatTag::TapeArchive => "Tape archive",
            FormatTag::Textfile => "Text file",
            FormatTag::Vbsp => "Half-Life 2 level",
            FormatTag::Vpk => "Valve Package File",
            FormatTag::Wad => "Half-Life Texture Package File",
            FormatTag::Xz => "xz archive",
            FormatTag::Xzp => "Xbox Package File",
            FormatTag::Unknown => "Unknown or unsupported",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of the secondary classification for legacy executable containers.
///
/// A plain MZ executable resolves to [`ExecutableClass::Legacy`]. When the
/// legacy header carries a valid extended-header offset, the four bytes at
/// that offset select one of the nested formats. Recognized outer container
/// with unrecognized nested bytes is reported as
/// [`ExecutableClass::Unrecognized`], which is deliberately distinct from
/// both `Legacy` and [`FormatTag::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutableClass {
    /// MZ container with no usable extended header.
    Legacy,
    /// 16-bit segmented New Executable.
    NewExecutable,
    /// Linear Executable (LE or LX variant).
    LinearExecutable,
    /// Portable Executable.
    PortableExecutable,
    /// Recognized MZ container, unrecognized nested format.
    Unrecognized,
}

impl ExecutableClass {
    /// Human-readable name of the executable class.
    pub fn name(&self) -> &'static str {
        match self {
            ExecutableClass::Legacy => "MS-DOS executable",
            ExecutableClass::NewExecutable => "New Executable",
            ExecutableClass::LinearExecutable => "Linear Executable",
            ExecutableClass::PortableExecutable => "Portable Executable",
            ExecutableClass::Unrecognized => "Unrecognized nested executable",
        }
    }
}

impl fmt::Display for ExecutableClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names_nonempty() {
        assert_eq!(FormatTag::Pak.name(), "Half-Life Package File");
        assert_eq!(FormatTag::Unknown.name(), "Unknown or unsupported");
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(FormatTag::MoPaQ.to_string(), FormatTag::MoPaQ.name());
        assert_eq!(
            ExecutableClass::PortableExecutable.to_string(),
            "Portable Executable"
        );
    }

    #[test]
    fn test_executable_class_distinct() {
        assert_ne!(ExecutableClass::Legacy, ExecutableClass::Unrecognized);
    }
}
