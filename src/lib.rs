//! NSI Explorer - a terminal dashboard for course documents
//!
//! This crate indexes the documents under a folder, filters them by name,
//! exports the listing as CSV and previews each supported format.

pub mod app;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod file_opener;
pub mod logging;
pub mod preview;
pub mod tui;

// Re-export primary types for convenience
pub use cache::{Caches, IndexCache, PdfEncodingCache};
pub use config::UserConfig;
pub use domain::{
    filter_records, scan_directory, FileIndex, FileKind, FileRecord, SessionState,
};
pub use error::{ExplorerError, Result};
pub use export::{to_csv, CsvExporter};
pub use file_opener::open_file;
pub use preview::{PreviewRenderer, RenderInstruction};
