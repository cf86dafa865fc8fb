//! CSV export of the file index

use crate::domain::FileIndex;
use crate::error::{ExplorerError, Result};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Default name of the downloadable listing
pub const EXPORT_FILE_NAME: &str = "liste_fichiers_nsi.csv";

/// Column headers: file name, extension, absolute path
pub const CSV_HEADER: [&str; 3] = ["Fichier", "Type", "Complet"];

/// Serializes the index to UTF-8 CSV, one row per record in index order
pub fn to_csv(index: &FileIndex) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for record in index {
        let path = record.path.to_string_lossy();
        writer.write_record([record.name.as_str(), record.kind.extension(), &*path])?;
    }

    writer
        .into_inner()
        .map_err(|e| ExplorerError::Io(e.into_error()))
}

/// Remembers the CSV bytes of the last index it exported.
///
/// Asking again for the same index (same allocation or equal content)
/// returns the stored bytes without serializing.
#[derive(Debug, Default)]
pub struct CsvExporter {
    last: Option<(Arc<FileIndex>, Arc<[u8]>)>,
    renders: usize,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn export(&mut self, index: &Arc<FileIndex>) -> Result<Arc<[u8]>> {
        if let Some((cached_index, bytes)) = &self.last {
            if Arc::ptr_eq(cached_index, index) || cached_index.as_ref() == index.as_ref() {
                return Ok(Arc::clone(bytes));
            }
        }

        let bytes: Arc<[u8]> = to_csv(index)?.into();
        self.renders += 1;
        self.last = Some((Arc::clone(index), Arc::clone(&bytes)));

        tracing::debug!(records = index.len(), bytes = bytes.len(), "CSV export rendered");

        Ok(bytes)
    }

    /// Number of times the CSV was actually serialized
    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// Writes export bytes to `path`, replacing any existing file
pub fn write_export(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileKind, FileRecord};
    use std::path::PathBuf;

    fn record(name: &str, kind: FileKind, path: &str) -> FileRecord {
        FileRecord {
            name: name.to_string(),
            kind,
            path: PathBuf::from(path),
        }
    }

    fn sample_index() -> FileIndex {
        FileIndex::new(vec![
            record("a.py", FileKind::Python, "/home/nsi/a.py"),
            record("c.md", FileKind::Markdown, "/home/nsi/sub/c.md"),
            record("d.pdf", FileKind::Pdf, "/home/nsi/sub/d.pdf"),
        ])
    }

    mod to_csv_tests {
        use super::*;

        #[test]
        fn test_header_row() {
            let bytes = to_csv(&FileIndex::default()).unwrap();
            assert_eq!(String::from_utf8(bytes).unwrap(), "Fichier,Type,Complet\n");
        }

        #[test]
        fn test_rows_follow_index_order() {
            let bytes = to_csv(&sample_index()).unwrap();
            let text = String::from_utf8(bytes).unwrap();
            let lines: Vec<&str> = text.lines().collect();

            assert_eq!(lines.len(), 4);
            assert_eq!(lines[1], "a.py,.py,/home/nsi/a.py");
            assert_eq!(lines[2], "c.md,.md,/home/nsi/sub/c.md");
            assert_eq!(lines[3], "d.pdf,.pdf,/home/nsi/sub/d.pdf");
        }

        #[test]
        fn test_parsed_rows_match_index() {
            let index = FileIndex::new(vec![
                record("cours, partie 1.md", FileKind::Markdown, "/home/nsi/cours, partie 1.md"),
                record("résumé \"final\".tex", FileKind::Tex, "/home/nsi/résumé \"final\".tex"),
                record("a.py", FileKind::Python, "/home/nsi/a.py"),
            ]);

            let bytes = to_csv(&index).unwrap();
            let mut reader = csv::Reader::from_reader(bytes.as_slice());

            let headers = reader.headers().unwrap().clone();
            assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());

            let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
            assert_eq!(rows.len(), index.len());

            for (row, rec) in rows.iter().zip(index.iter()) {
                assert_eq!(&row[0], rec.name);
                assert_eq!(&row[1], rec.kind.extension());
                assert_eq!(&row[2], rec.path.to_str().unwrap());
            }
        }
    }

    mod exporter_tests {
        use super::*;

        #[test]
        fn test_same_index_is_serialized_once() {
            let mut exporter = CsvExporter::new();
            let index = Arc::new(sample_index());

            let first = exporter.export(&index).unwrap();
            let second = exporter.export(&index).unwrap();

            assert_eq!(first, second);
            assert_eq!(exporter.render_count(), 1);
        }

        #[test]
        fn test_equal_content_reuses_bytes() {
            let mut exporter = CsvExporter::new();

            exporter.export(&Arc::new(sample_index())).unwrap();
            exporter.export(&Arc::new(sample_index())).unwrap();

            assert_eq!(exporter.render_count(), 1);
        }

        #[test]
        fn test_changed_index_is_serialized_again() {
            let mut exporter = CsvExporter::new();
            let before = Arc::new(sample_index());
            let after = Arc::new(FileIndex::new(vec![record(
                "z.csv",
                FileKind::Csv,
                "/tmp/z.csv",
            )]));

            let a = exporter.export(&before).unwrap();
            let b = exporter.export(&after).unwrap();

            assert_ne!(a, b);
            assert_eq!(exporter.render_count(), 2);
        }

        #[test]
        fn test_clear_forces_new_render() {
            let mut exporter = CsvExporter::new();
            let index = Arc::new(sample_index());

            exporter.export(&index).unwrap();
            exporter.clear();
            exporter.export(&index).unwrap();

            assert_eq!(exporter.render_count(), 2);
        }

        #[test]
        fn test_write_export() {
            let temp_dir = tempfile::TempDir::new().unwrap();
            let target = temp_dir.path().join(EXPORT_FILE_NAME);
            let bytes = to_csv(&sample_index()).unwrap();

            write_export(&target, &bytes).unwrap();

            assert_eq!(std::fs::read(&target).unwrap(), bytes);
        }
    }
}
