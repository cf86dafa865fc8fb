//! Non-interactive subcommands: list, export and preview

use crate::cache::PdfEncodingCache;
use crate::config::UserConfig;
use crate::domain::{filter_records, scan_directory, FileRecord};
use crate::error::{ExplorerError, Result};
use crate::export::{to_csv, write_export};
use crate::preview::PreviewRenderer;
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Prints the index of `dir`, optionally filtered by name
pub fn run_list(
    dir: &Path,
    search: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let index = scan_directory(dir);
    let records = filter_records(&index, search.unwrap_or(""));

    tracing::debug!(shown = records.len(), total = index.len(), "Listing files");

    if json {
        serde_json::to_writer_pretty(&mut *out, &records)?;
        writeln!(out)?;
        return Ok(());
    }

    for record in records {
        writeln!(
            out,
            "{}\t{}\t{}",
            record.name,
            record.kind,
            record.path.display()
        )?;
    }

    Ok(())
}

/// Writes the CSV listing of `dir` and returns where it went.
///
/// Without `output`, the configured file name is used in the current directory.
pub fn run_export(dir: &Path, output: Option<&Path>, config: &UserConfig) -> Result<PathBuf> {
    let target = match output {
        Some(path) => path.to_path_buf(),
        None => env::current_dir()?.join(&config.export_file_name),
    };

    let index = scan_directory(dir);
    let bytes = to_csv(&index)?;
    write_export(&target, &bytes)?;

    Ok(target)
}

/// Prints the render instruction for one file as JSON, or as HTML markup
/// when `html` is set and the file is a PDF
pub fn run_preview(
    file: &Path,
    html: bool,
    config: &UserConfig,
    out: &mut impl Write,
) -> Result<()> {
    let record =
        FileRecord::from_path(file).ok_or_else(|| ExplorerError::UnsupportedFile(file.into()))?;

    let renderer = PreviewRenderer::new(config.pdf_height);
    let mut pdf_cache = PdfEncodingCache::new();
    let instruction = renderer.render(&record, &mut pdf_cache)?;

    if html {
        match instruction.to_html() {
            Some(markup) => {
                writeln!(out, "{}", markup)?;
                return Ok(());
            }
            None => tracing::debug!(kind = %record.kind, "No HTML form, printing JSON"),
        }
    }

    serde_json::to_writer_pretty(&mut *out, &instruction)?;
    writeln!(out)?;
    Ok(())
}
