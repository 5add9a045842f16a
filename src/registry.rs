//! Format registry and report assembly.
//!
//! The dispatch tables are built once behind a [`Lazy`] and never mutated,
//! so concurrent readers need no synchronization. Each registration pairs a
//! render function with an optional structured-export function; the two are
//! looked up independently, and a tag missing from the table is a normal
//! "no information available" outcome rather than an error.

use crate::formats::{
    aacs, bdplus, bfpk, bsp, cfb, cia, gcf, installshield_cab, ird, linear_executable,
    microsoft_cab, mopaq, msdos, n3ds, ncf, new_executable, nitro, pak, pff, pic, playj,
    playj_playlist, portable_executable, quantum, sga, vbsp, vpk, wad, xzp, ParsedFile,
};
use crate::report::Report;
use crate::types::FormatTag;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Renders a model into the given report. Returns false when the model does
/// not belong to the registered format.
pub type RenderFn = fn(&ParsedFile, &mut Report) -> bool;

/// Serializes a model into a structured document.
pub type ExportFn = fn(&ParsedFile) -> Option<String>;

/// One registered format.
struct Registration {
    render: RenderFn,
    export: Option<ExportFn>,
}

impl Registration {
    fn new(render: RenderFn, export: ExportFn) -> Self {
        Self {
            render,
            export: Some(export),
        }
    }
}

/// The four executable shapes share one tag; dispatch walks them in cascade
/// order until one claims the model.
fn render_executable(file: &ParsedFile, report: &mut Report) -> bool {
    msdos::render_entry(file, report)
        || new_executable::render_entry(file, report)
        || linear_executable::render_entry(file, report)
        || portable_executable::render_entry(file, report)
}

fn export_executable(file: &ParsedFile) -> Option<String> {
    msdos::export_entry(file)
        .or_else(|| new_executable::export_entry(file))
        .or_else(|| linear_executable::export_entry(file))
        .or_else(|| portable_executable::export_entry(file))
}

static REGISTRY: Lazy<HashMap<FormatTag, Registration>> = Lazy::new(|| {
    use FormatTag::*;
    HashMap::from([
        (
            AacsMediaKeyBlock,
            Registration::new(aacs::render_entry, aacs::export_entry),
        ),
        (
            BdPlusSvm,
            Registration::new(bdplus::render_entry, bdplus::export_entry),
        ),
        (Bfpk, Registration::new(bfpk::render_entry, bfpk::export_entry)),
        (Bsp, Registration::new(bsp::render_entry, bsp::export_entry)),
        (Cfb, Registration::new(cfb::render_entry, cfb::export_entry)),
        (Cia, Registration::new(cia::render_entry, cia::export_entry)),
        (
            Executable,
            Registration::new(render_executable, export_executable),
        ),
        (Gcf, Registration::new(gcf::render_entry, gcf::export_entry)),
        (
            InstallShieldCab,
            Registration::new(installshield_cab::render_entry, installshield_cab::export_entry),
        ),
        (Ird, Registration::new(ird::render_entry, ird::export_entry)),
        (
            MicrosoftCab,
            Registration::new(microsoft_cab::render_entry, microsoft_cab::export_entry),
        ),
        (
            MoPaQ,
            Registration::new(mopaq::render_entry, mopaq::export_entry),
        ),
        (N3ds, Registration::new(n3ds::render_entry, n3ds::export_entry)),
        (Ncf, Registration::new(ncf::render_entry, ncf::export_entry)),
        (
            Nitro,
            Registration::new(nitro::render_entry, nitro::export_entry),
        ),
        (Pak, Registration::new(pak::render_entry, pak::export_entry)),
        (Pff, Registration::new(pff::render_entry, pff::export_entry)),
        (Pic, Registration::new(pic::render_entry, pic::export_entry)),
        (
            PlayJAudio,
            Registration::new(playj::render_entry, playj::export_entry),
        ),
        (
            PlayJPlaylist,
            Registration::new(playj_playlist::render_entry, playj_playlist::export_entry),
        ),
        (
            Quantum,
            Registration::new(quantum::render_entry, quantum::export_entry),
        ),
        (Sga, Registration::new(sga::render_entry, sga::export_entry)),
        (Vbsp, Registration::new(vbsp::render_entry, vbsp::export_entry)),
        (Vpk, Registration::new(vpk::render_entry, vpk::export_entry)),
        (Wad, Registration::new(wad::render_entry, wad::export_entry)),
        (Xzp, Registration::new(xzp::render_entry, xzp::export_entry)),
    ])
});

/// Render a parsed model into its textual report.
///
/// Returns `None` when no renderer is registered for the model's tag.
pub fn render(file: &ParsedFile) -> Option<String> {
    let registration = REGISTRY.get(&file.tag())?;
    let mut report = Report::new();
    if (registration.render)(file, &mut report) {
        Some(report.into_string())
    } else {
        None
    }
}

/// Export a parsed model as a structured JSON document.
///
/// Returns `None` when no exporter is registered for the model's tag. Text
/// rendering and structured export are independent registrations.
pub fn export_json(file: &ParsedFile) -> Option<String> {
    let registration = REGISTRY.get(&file.tag())?;
    registration.export.and_then(|export| export(file))
}

/// True when a renderer is registered for the tag.
pub fn renderer_registered(tag: FormatTag) -> bool {
    REGISTRY.contains_key(&tag)
}

/// True when a structured exporter is registered for the tag.
pub fn exporter_registered(tag: FormatTag) -> bool {
    REGISTRY
        .get(&tag)
        .is_some_and(|registration| registration.export.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_pak() -> ParsedFile {
        ParsedFile::Pak(pak::File {
            header: Some(pak::Header {
                signature: Some(String::from("PACK")),
                directory_offset: Some(16),
                directory_length: Some(0),
            }),
            directory_items: Some(Vec::new()),
        })
    }

    #[test]
    fn test_render_pak_end_to_end() {
        let report = render(&sample_pak()).unwrap();
        assert!(report.contains("PAK Information:"));
        assert!(report.contains("Signature: PACK"));
        assert!(report.contains("Directory offset: 16 (0x10)"));
        assert!(report.contains("Directory length: 0 (0x0)"));
        assert!(report.contains("No directory items"));
    }

    #[test]
    fn test_render_is_byte_identical_across_calls() {
        let file = sample_pak();
        assert_eq!(render(&file), render(&file));
    }

    #[test]
    fn test_export_json_contains_model_fields() {
        let json = export_json(&sample_pak()).unwrap();
        assert!(json.contains("\"signature\": \"PACK\""));
        assert!(json.contains("\"directory_offset\": 16"));
    }

    #[test]
    fn test_unregistered_tags_have_no_renderer_or_exporter() {
        for tag in [
            FormatTag::Rar,
            FormatTag::SevenZip,
            FormatTag::PkZip,
            FormatTag::Unknown,
        ] {
            assert!(!renderer_registered(tag));
            assert!(!exporter_registered(tag));
        }
    }

    #[test]
    fn test_executable_family_dispatch() {
        let msdos_model = ParsedFile::Msdos(msdos::Executable::default());
        let pe_model =
            ParsedFile::PortableExecutable(portable_executable::Executable::default());

        let msdos_report = render(&msdos_model).unwrap();
        assert!(msdos_report.contains("MS-DOS Executable Information:"));

        let pe_report = render(&pe_model).unwrap();
        assert!(pe_report.contains("Portable Executable Information:"));
    }

    #[test]
    fn test_every_parsed_variant_renders() {
        let models = [
            ParsedFile::Aacs(aacs::MediaKeyBlock::default()),
            ParsedFile::BdPlus(bdplus::Svm::default()),
            ParsedFile::Bfpk(bfpk::Archive::default()),
            ParsedFile::Bsp(bsp::File::default()),
            ParsedFile::Cfb(cfb::Binary::default()),
            ParsedFile::Cia(cia::Archive::default()),
            ParsedFile::Gcf(gcf::File::default()),
            ParsedFile::InstallShieldCab(installshield_cab::Cabinet::default()),
            ParsedFile::Ird(ird::File::default()),
            ParsedFile::LinearExecutable(linear_executable::Executable::default()),
            ParsedFile::MicrosoftCab(microsoft_cab::Cabinet::default()),
            ParsedFile::MoPaQ(mopaq::Archive::default()),
            ParsedFile::Msdos(msdos::Executable::default()),
            ParsedFile::N3ds(n3ds::Cart::default()),
            ParsedFile::Ncf(ncf::File::default()),
            ParsedFile::NewExecutable(new_executable::Executable::default()),
            ParsedFile::Nitro(nitro::Cart::default()),
            ParsedFile::Pak(pak::File::default()),
            ParsedFile::Pff(pff::Archive::default()),
            ParsedFile::Pic(pic::DiscInformation::default()),
            ParsedFile::PlayJAudio(playj::AudioFile::default()),
            ParsedFile::PlayJPlaylist(playj_playlist::Playlist::default()),
            ParsedFile::PortableExecutable(portable_executable::Executable::default()),
            ParsedFile::Quantum(quantum::Archive::default()),
            ParsedFile::Sga(sga::Archive::default()),
            ParsedFile::Vbsp(vbsp::File::default()),
            ParsedFile::Vpk(vpk::File::default()),
            ParsedFile::Wad(wad::File::default()),
            ParsedFile::Xzp(xzp::File::default()),
        ];

        for model in &models {
            let report = render(model).unwrap_or_default();
            assert!(!report.is_empty(), "no report for {:?}", model.tag());
            let export = export_json(model).unwrap_or_default();
            assert!(!export.is_empty(), "no export for {:?}", model.tag());
        }
    }
}
