//! Magic-byte signature matching.
//!
//! Signatures are registered in a fixed order; registration order is match
//! precedence, so the first prefix-match wins. A pattern cell of `None` is a
//! don't-care position, used by formats whose discriminating bytes sit past
//! a variable leading field.
//!
//! When two formats would claim the same leading bytes, exactly one of them
//! is registered for that pattern and the loser relies on its extension or
//! goes undetected. These tradeoffs are fixed at build time and never
//! resolved heuristically at call time.

use crate::types::FormatTag;
use once_cell::sync::Lazy;

/// One registered byte signature.
#[derive(Debug, Clone)]
pub struct SignaturePattern {
    tag: FormatTag,
    pattern: Vec<Option<u8>>,
}

impl SignaturePattern {
    /// Signature matched literally from offset zero.
    fn exact(tag: FormatTag, bytes: &[u8]) -> Self {
        Self {
            tag,
            pattern: bytes.iter().copied().map(Some).collect(),
        }
    }

    /// Signature matched literally at a fixed offset, with don't-care
    /// positions before it.
    fn at_offset(tag: FormatTag, offset: usize, bytes: &[u8]) -> Self {
        let mut pattern = vec![None; offset];
        pattern.extend(bytes.iter().copied().map(Some));
        Self { tag, pattern }
    }

    /// The tag this signature classifies to.
    pub fn tag(&self) -> FormatTag {
        self.tag
    }

    /// Length of the window needed to test this signature.
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    /// True if the pattern contains no cells.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Prefix-match against a byte window. Windows shorter than the pattern
    /// never match.
    pub fn matches(&self, window: &[u8]) -> bool {
        if window.len() < self.pattern.len() {
            return false;
        }
        self.pattern
            .iter()
            .zip(window)
            .all(|(cell, byte)| match cell {
                Some(expected) => expected == byte,
                None => true,
            })
    }

    /// Smallest byte window this signature accepts, with don't-care
    /// positions zero-filled.
    pub fn sample(&self) -> Vec<u8> {
        self.pattern.iter().map(|cell| cell.unwrap_or(0)).collect()
    }
}

/// The signature table, in registration (= precedence) order.
pub static SIGNATURES: Lazy<Vec<SignaturePattern>> = Lazy::new(|| {
    use FormatTag::*;
    vec![
        // Offset-anchored signatures first: their leading don't-care runs
        // would otherwise be shadowed by short literal patterns.
        SignaturePattern::at_offset(TapeArchive, 257, b"ustar"),
        SignaturePattern::at_offset(N3ds, 0x100, b"NCSD"),
        SignaturePattern::at_offset(Nitro, 0xC0, &[0x24, 0xFF, 0xAE, 0x51, 0x69, 0x9A, 0xA2, 0x21]),
        SignaturePattern::at_offset(Pff, 4, b"PFF3"),
        SignaturePattern::at_offset(Pff, 4, b"PFF2"),
        // The MZ marker outranks every offset-anchored pattern below it so
        // that executables with coincidental interior bytes stay executables.
        SignaturePattern::exact(Executable, b"MZ"),
        SignaturePattern::at_offset(Pic, 4, b"DI"),
        // Long literal signatures.
        SignaturePattern::exact(BdPlusSvm, b"BDSVM_CC"),
        SignaturePattern::exact(LdsCrypt, b"LDSCRYPT"),
        SignaturePattern::exact(Sga, b"_ARCHIVE"),
        SignaturePattern::exact(Cfb, &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
        SignaturePattern::exact(Gcf, &[0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]),
        SignaturePattern::exact(Ncf, &[0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00]),
        SignaturePattern::exact(SevenZip, &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]),
        SignaturePattern::exact(Xz, &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00]),
        SignaturePattern::exact(Rar, &[0x52, 0x61, 0x72, 0x21, 0x1A, 0x07]),
        SignaturePattern::exact(MicrosoftLz, &[0x53, 0x5A, 0x44, 0x44, 0x88, 0xF0, 0x27, 0x33]),
        // Four-byte literal signatures.
        SignaturePattern::exact(AacsMediaKeyBlock, &[0x10, 0x00, 0x00, 0x0C]),
        SignaturePattern::exact(Bfpk, b"BFPK"),
        SignaturePattern::exact(Ird, b"3IRD"),
        SignaturePattern::exact(InstallShieldCab, b"ISc("),
        SignaturePattern::exact(InstallShieldArchiveV3, &[0x13, 0x5D, 0x65, 0x8C]),
        SignaturePattern::exact(MicrosoftCab, b"MSCF"),
        SignaturePattern::exact(MoPaQ, &[0x4D, 0x50, 0x51, 0x1A]),
        SignaturePattern::exact(MoPaQ, &[0x4D, 0x50, 0x51, 0x1B]),
        SignaturePattern::exact(Pak, b"PACK"),
        SignaturePattern::exact(PlayJAudio, &[0xFF, 0x9D, 0x53, 0x4B]),
        SignaturePattern::exact(PlayJPlaylist, &[0xFF, 0x9D, 0x53, 0x4C]),
        SignaturePattern::exact(PkZip, &[0x50, 0x4B, 0x03, 0x04]),
        SignaturePattern::exact(PkZip, &[0x50, 0x4B, 0x05, 0x06]),
        SignaturePattern::exact(PkZip, &[0x50, 0x4B, 0x07, 0x08]),
        SignaturePattern::exact(RealArcadeInstaller, b"RASF"),
        SignaturePattern::exact(RealArcadeMezzanine, b"RAMZ"),
        SignaturePattern::exact(Sffs, b"SFFS"),
        SignaturePattern::exact(Vbsp, b"VBSP"),
        SignaturePattern::exact(Vpk, &[0x34, 0x12, 0xAA, 0x55]),
        SignaturePattern::exact(Wad, b"WAD3"),
        SignaturePattern::exact(Wad, b"WAD2"),
        SignaturePattern::exact(Xzp, b"piZx"),
        SignaturePattern::exact(Cia, &[0x20, 0x20, 0x00, 0x00]),
        SignaturePattern::exact(Bsp, &[0x1E, 0x00, 0x00, 0x00]),
        // Short literal signatures last among binary formats.
        SignaturePattern::exact(BZip2, b"BZh"),
        SignaturePattern::exact(GZip, &[0x1F, 0x8B]),
        SignaturePattern::exact(Quantum, b"DS"),
        // Text formats: byte-order marks, then the section-header opener.
        SignaturePattern::exact(Textfile, &[0xEF, 0xBB, 0xBF]),
        SignaturePattern::exact(Textfile, &[0xFF, 0xFE]),
        SignaturePattern::exact(Textfile, &[0xFE, 0xFF]),
        SignaturePattern::exact(IniFile, b"["),
    ]
});

/// Classify a byte window against the signature table.
///
/// Scans registered signatures in precedence order and returns the tag of
/// the first prefix-match. Empty or non-matching input returns
/// [`FormatTag::Unknown`]; the function never fails. Callers should supply
/// at least 16 leading bytes to disambiguate the longer signatures (the
/// offset-anchored ones need correspondingly more).
pub fn classify_by_magic(window: &[u8]) -> FormatTag {
    if window.is_empty() {
        return FormatTag::Unknown;
    }

    SIGNATURES
        .iter()
        .find(|sig| sig.matches(window))
        .map_or(FormatTag::Unknown, SignaturePattern::tag)
}
