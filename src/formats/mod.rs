//! Per-format models and report renderers.
//!
//! Each submodule owns one format: the immutable model structs an external
//! decoder populates, the renderer that walks them, and the module's tests.
//! Models arrive fully built and are read-only here; renderers never
//! validate or mutate them, they only describe them.
//!
//! Adding a format means adding one submodule and one entry in
//! [`crate::registry`].

pub mod aacs;
pub mod bdplus;
pub mod bfpk;
pub mod bsp;
pub mod cfb;
pub mod cia;
pub mod gcf;
pub mod installshield_cab;
pub mod ird;
pub mod linear_executable;
pub mod microsoft_cab;
pub mod mopaq;
pub mod msdos;
pub mod n3ds;
pub mod ncf;
pub mod new_executable;
pub mod nitro;
pub mod pak;
pub mod pff;
pub mod pic;
pub mod playj;
pub mod playj_playlist;
pub mod portable_executable;
pub mod quantum;
pub mod sga;
pub mod vbsp;
pub mod vpk;
pub mod wad;
pub mod xzp;

use crate::types::FormatTag;

/// A fully parsed, immutable model for one classified stream.
///
/// One variant per renderable format. The four executable shapes share
/// [`FormatTag::Executable`]; the secondary cascade decides which of them a
/// given stream carries.
#[derive(Debug, Clone)]
pub enum ParsedFile {
    Aacs(aacs::MediaKeyBlock),
    BdPlus(bdplus::Svm),
    Bfpk(bfpk::Archive),
    Bsp(bsp::File),
    Cfb(cfb::Binary),
    Cia(cia::Archive),
    Gcf(gcf::File),
    InstallShieldCab(installshield_cab::Cabinet),
    Ird(ird::File),
    LinearExecutable(linear_executable::Executable),
    MicrosoftCab(microsoft_cab::Cabinet),
    MoPaQ(mopaq::Archive),
    Msdos(msdos::Executable),
    N3ds(n3ds::Cart),
    Ncf(ncf::File),
    NewExecutable(new_executable::Executable),
    Nitro(nitro::Cart),
    Pak(pak::File),
    Pff(pff::Archive),
    Pic(pic::DiscInformation),
    PlayJAudio(playj::AudioFile),
    PlayJPlaylist(playj_playlist::Playlist),
    PortableExecutable(portable_executable::Executable),
    Quantum(quantum::Archive),
    Sga(sga::Archive),
    Vbsp(vbsp::File),
    Vpk(vpk::File),
    Wad(wad::File),
    Xzp(xzp::File),
}

impl ParsedFile {
    /// The format tag this model belongs to.
    pub fn tag(&self) -> FormatTag {
        match self {
            ParsedFile::Aacs(_) => FormatTag::AacsMediaKeyBlock,
            ParsedFile::BdPlus(_) => FormatTag::BdPlusSvm,
            ParsedFile::Bfpk(_) => FormatTag::Bfpk,
            ParsedFile::Bsp(_) => FormatTag::Bsp,
            ParsedFile::Cfb(_) => FormatTag::Cfb,
            ParsedFile::Cia(_) => FormatTag::Cia,
            ParsedFile::Gcf(_) => FormatTag::Gcf,
            ParsedFile::InstallShieldCab(_) => FormatTag::InstallShieldCab,
            ParsedFile::Ird(_) => FormatTag::Ird,
            ParsedFile::LinearExecutable(_) => FormatTag::Executable,
            ParsedFile::MicrosoftCab(_) => FormatTag::MicrosoftCab,
            ParsedFile::MoPaQ(_) => FormatTag::MoPaQ,
            ParsedFile::Msdos(_) => FormatTag::Executable,
            ParsedFile::N3ds(_) => FormatTag::N3ds,
            ParsedFile::Ncf(_) => FormatTag::Ncf,
            ParsedFile::NewExecutable(_) => FormatTag::Executable,
            ParsedFile::Nitro(_) => FormatTag::Nitro,
            ParsedFile::Pak(_) => FormatTag::Pak,
            ParsedFile::Pff(_) => FormatTag::Pff,
            ParsedFile::Pic(_) => FormatTag::Pic,
            ParsedFile::PlayJAudio(_) => FormatTag::PlayJAudio,
            ParsedFile::PlayJPlaylist(_) => FormatTag::PlayJPlaylist,
            ParsedFile::PortableExecutable(_) => FormatTag::Executable,
            ParsedFile::Quantum(_) => FormatTag::Quantum,
            ParsedFile::Sga(_) => FormatTag::Sga,
            ParsedFile::Vbsp(_) => FormatTag::Vbsp,
            ParsedFile::Vpk(_) => FormatTag::Vpk,
            ParsedFile::Wad(_) => FormatTag::Wad,
            ParsedFile::Xzp(_) => FormatTag::Xzp,
        }
    }
}
