//! Indexed file records and the directory scan that produces them

pub mod session;

use serde::{Serialize, Serializer};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use session::SessionState;

/// The document types the explorer indexes. Anything else is invisible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Tex,
    Markdown,
    Notebook,
    Csv,
    Python,
    Pdf,
}

impl FileKind {
    pub const ALL: [FileKind; 6] = [
        FileKind::Tex,
        FileKind::Markdown,
        FileKind::Notebook,
        FileKind::Csv,
        FileKind::Python,
        FileKind::Pdf,
    ];

    /// Matches an extension (without the leading dot), ignoring case
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "tex" => Some(FileKind::Tex),
            "md" => Some(FileKind::Markdown),
            "ipynb" => Some(FileKind::Notebook),
            "csv" => Some(FileKind::Csv),
            "py" => Some(FileKind::Python),
            "pdf" => Some(FileKind::Pdf),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Lowercase dotted extension, as shown in listings and exports
    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Tex => ".tex",
            FileKind::Markdown => ".md",
            FileKind::Notebook => ".ipynb",
            FileKind::Csv => ".csv",
            FileKind::Python => ".py",
            FileKind::Pdf => ".pdf",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl Serialize for FileKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.extension())
    }
}

/// One indexed file. Records are never mutated after the scan creates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub path: PathBuf,
}

impl FileRecord {
    /// Builds a record for `path`, or `None` if its extension is not indexed.
    ///
    /// Relative paths are resolved against the current directory.
    pub fn from_path(path: &Path) -> Option<Self> {
        let kind = FileKind::from_path(path)?;
        let name = path.file_name()?.to_string_lossy().into_owned();

        Some(FileRecord {
            name,
            kind,
            path: absolutize(path),
        })
    }
}

/// Records in traversal order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileIndex {
    records: Vec<FileRecord>,
}

impl FileIndex {
    pub fn new(records: Vec<FileRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<FileRecord> for FileIndex {
    fn from_iter<I: IntoIterator<Item = FileRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FileIndex {
    type Item = &'a FileRecord;
    type IntoIter = std::slice::Iter<'a, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Resolves a relative path against the current directory
pub(crate) fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// Recursively indexes every supported document under `root`.
///
/// # Behavior
/// - Extensions are matched case-insensitively
/// - Directories and unsupported files are skipped silently
/// - Unreadable entries are skipped; the rest of the tree is still scanned
/// - A missing or unreadable root yields an empty index
/// - Symlinked directories are not descended into
/// - Results keep traversal order and are not sorted
pub fn scan_directory(root: &Path) -> FileIndex {
    let base = absolutize(root);

    if !base.is_dir() {
        tracing::debug!(root = %base.display(), "Root is not a readable directory");
        return FileIndex::default();
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for entry_result in WalkDir::new(&base).follow_links(false) {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable entry");
                skipped += 1;
                continue;
            }
        };

        // Symlinks to regular files are listed, symlinked directories are not walked
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        if let Some(record) = FileRecord::from_path(entry.path()) {
            records.push(record);
        }
    }

    tracing::debug!(
        root = %base.display(),
        files = records.len(),
        skipped,
        "Directory scan complete"
    );

    FileIndex::new(records)
}

/// Keeps the records whose name contains `search`, ignoring case.
///
/// Index order is preserved. An empty search keeps everything.
pub fn filter_records<'a>(index: &'a FileIndex, search: &str) -> Vec<&'a FileRecord> {
    if search.is_empty() {
        return index.iter().collect();
    }

    let needle = search.to_lowercase();
    index
        .iter()
        .filter(|record| record.name.to_lowercase().contains(&needle))
        .collect()
}
