//! Process-lifetime caches for scans and PDF encodings

use crate::domain::{scan_directory, FileIndex};
use crate::error::Result;
use crate::export::CsvExporter;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Scan results keyed by the root path exactly as given (no canonicalization)
#[derive(Debug, Default)]
pub struct IndexCache {
    entries: HashMap<OsString, Arc<FileIndex>>,
    scans: usize,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index for `root`, scanning only on the first request
    pub fn get(&mut self, root: &Path) -> Arc<FileIndex> {
        match self.entries.entry(root.as_os_str().to_os_string()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                let index = Arc::new(scan_directory(root));
                self.scans += 1;
                tracing::debug!(
                    root = %root.display(),
                    files = index.len(),
                    "Index cache miss"
                );
                Arc::clone(entry.insert(index))
            }
        }
    }

    /// Number of scans performed so far
    pub fn scan_count(&self) -> usize {
        self.scans
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Base64 payloads of PDF files keyed by path.
///
/// Entries never expire and are not refreshed when the file changes on disk.
#[derive(Debug, Default)]
pub struct PdfEncodingCache {
    entries: HashMap<PathBuf, Arc<str>>,
    encodings: usize,
}

impl PdfEncodingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, path: &Path) -> Result<Arc<str>> {
        if let Some(encoded) = self.entries.get(path) {
            return Ok(Arc::clone(encoded));
        }

        let bytes = fs::read(path)?;
        let encoded: Arc<str> = BASE64.encode(&bytes).into();
        self.encodings += 1;

        tracing::debug!(
            path = %path.display(),
            bytes = bytes.len(),
            "Encoded PDF for preview"
        );

        self.entries.insert(path.to_path_buf(), Arc::clone(&encoded));
        Ok(encoded)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of files actually read and encoded
    pub fn encoding_count(&self) -> usize {
        self.encodings
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Every cache the explorer keeps, cleared together on refresh
#[derive(Debug, Default)]
pub struct Caches {
    pub index: IndexCache,
    pub pdf: PdfEncodingCache,
    pub export: CsvExporter,
}

impl Caches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every cached scan, PDF encoding and export
    pub fn invalidate(&mut self) {
        tracing::info!(
            roots = self.index.len(),
            pdfs = self.pdf.len(),
            "Invalidating caches"
        );
        self.index.clear();
        self.pdf.clear();
        self.export.clear();
    }
}
