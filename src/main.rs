//! Archive Inspector CLI
//!
//! Command-line tool for classifying archive, executable, and media files.

use anyhow::Context;
use archive_inspector::{classify_executable, classify_file, ExecutableClass, FormatTag};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use walkdir::WalkDir;

/// Signature-based classifier for legacy game and media archive formats.
///
/// Classifies each input file by magic bytes, falling back to the file
/// extension, and cascades into nested executable formats for MZ
/// containers.
#[derive(Parser, Debug)]
#[command(name = "archive-inspect")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file(s) or directory(ies) to classify
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Enable debug output
    #[arg(short = 'd', long)]
    debug: bool,

    /// Print classification results as JSON
    #[arg(short = 'j', long)]
    json: bool,
}

#[derive(serde::Serialize)]
struct Classification {
    path: String,
    format: FormatTag,
    format_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    executable_class: Option<ExecutableClass>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.debug {
        tracing_subscriber::fmt()
            .with_env_filter("archive_inspector=debug,archive_inspect=debug")
            .init();
    }

    let mut success = true;
    for path in &args.paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_map(std::result::Result::ok)
                .filter(|entry| entry.file_type().is_file())
            {
                success &= inspect_path(entry.path(), &args);
            }
        } else {
            success &= inspect_path(path, &args);
        }
    }

    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn inspect_path(path: &Path, args: &Args) -> bool {
    match inspect_file(path, args) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Error inspecting {}: {e:#}", path.display());
            false
        }
    }
}

fn inspect_file(path: &Path, args: &Args) -> anyhow::Result<()> {
    let format = classify_file(path).with_context(|| "classification failed")?;
    debug!(path = %path.display(), ?format, "classified");

    // MZ containers get a second pass to identify the nested format.
    let executable_class = if format == FormatTag::Executable {
        let mut stream = File::open(path).with_context(|| "reopen for cascade failed")?;
        classify_executable(&mut stream)?
    } else {
        None
    };

    if args.json {
        let classification = Classification {
            path: path.display().to_string(),
            format,
            format_name: format.name(),
            executable_class,
        };
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    }

    println!("File: {}", path.display());
    println!("  Format: {}", format.name());
    if let Some(class) = executable_class {
        println!("  Executable class: {}", class.name());
    }
    println!();

    Ok(())
}
