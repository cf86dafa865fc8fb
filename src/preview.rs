// Preview module: turns a selected record into a render instruction for the view layer

use crate::cache::PdfEncodingCache;
use crate::domain::{FileKind, FileRecord};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Height of the embedded PDF viewer, in pixels
pub const DEFAULT_PDF_HEIGHT: u32 = 800;

/// The only message shown for unreadable notebooks
pub const NOTEBOOK_READ_ERROR: &str = "Notebook read failure";

/// Language used for notebook code cells when the metadata names none
const DEFAULT_NOTEBOOK_LANGUAGE: &str = "python";

/// What the view layer should draw for a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderInstruction {
    /// Inline viewer over a base64 payload, full width with a fixed height
    PdfEmbed { data: Arc<str>, height: u32 },
    /// Notebook cells in document order
    Notebook { blocks: Vec<NotebookBlock> },
    /// Syntax-highlighted block
    Code { language: String, source: String },
    /// Interactive full-width table
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Generic failure message, no detail
    Error { message: String },
}

impl RenderInstruction {
    /// HTML `<embed>` element equivalent to a PDF instruction
    pub fn to_html(&self) -> Option<String> {
        match self {
            RenderInstruction::PdfEmbed { data, height } => Some(format!(
                "<embed src=\"data:application/pdf;base64,{}\" width=\"100%\" height=\"{}\" type=\"application/pdf\">",
                data, height
            )),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RenderInstruction::Error { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotebookBlock {
    Code { language: String, source: String },
    Markdown { text: String },
}

#[derive(Debug, Deserialize)]
struct Notebook {
    cells: Vec<Cell>,
    #[serde(default)]
    metadata: NotebookMetadata,
}

#[derive(Debug, Deserialize)]
struct Cell {
    cell_type: String,
    source: CellSource,
}

/// nbformat stores sources either whole or split into lines
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl CellSource {
    fn into_string(self) -> String {
        match self {
            CellSource::Text(text) => text,
            CellSource::Lines(lines) => lines.concat(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct NotebookMetadata {
    language_info: Option<LanguageInfo>,
    kernelspec: Option<KernelSpec>,
}

#[derive(Debug, Deserialize)]
struct LanguageInfo {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KernelSpec {
    language: Option<String>,
}

impl NotebookMetadata {
    fn language(&self) -> String {
        self.language_info
            .as_ref()
            .and_then(|info| info.name.clone())
            .or_else(|| self.kernelspec.as_ref().and_then(|k| k.language.clone()))
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| DEFAULT_NOTEBOOK_LANGUAGE.to_string())
    }
}

/// Parses notebook JSON into displayable blocks.
///
/// Code cells keep the notebook language, markdown cells become rich text,
/// every other cell type is dropped.
pub fn parse_notebook(json: &str) -> serde_json::Result<Vec<NotebookBlock>> {
    let notebook: Notebook = serde_json::from_str(json)?;
    let language = notebook.metadata.language();

    let blocks = notebook
        .cells
        .into_iter()
        .filter_map(|cell| match cell.cell_type.as_str() {
            "code" => Some(NotebookBlock::Code {
                language: language.clone(),
                source: cell.source.into_string(),
            }),
            "markdown" => Some(NotebookBlock::Markdown {
                text: cell.source.into_string(),
            }),
            _ => None,
        })
        .collect();

    Ok(blocks)
}

/// Decodes UTF-8, silently dropping any byte sequence that is not valid
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut decoded = String::with_capacity(bytes.len());
    let mut rest = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                decoded.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                if let Ok(valid) = std::str::from_utf8(valid) {
                    decoded.push_str(valid);
                }
                // error_len is None only for a truncated sequence at the very end
                let skip = e.error_len().unwrap_or(after.len());
                rest = &after[skip..];
            }
        }
    }

    decoded
}

/// Highlighting language for plain-text kinds; TeX has no dedicated grammar
pub fn source_language(kind: FileKind) -> Option<&'static str> {
    match kind {
        FileKind::Python => Some("python"),
        FileKind::Markdown | FileKind::Tex => Some("markdown"),
        FileKind::Notebook | FileKind::Csv | FileKind::Pdf => None,
    }
}

fn render_source(path: &Path, language: &str) -> Result<RenderInstruction> {
    let bytes = fs::read(path)?;

    Ok(RenderInstruction::Code {
        language: language.to_string(),
        source: decode_lossy(&bytes),
    })
}

fn render_notebook(path: &Path) -> RenderInstruction {
    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| parse_notebook(&json).map_err(|e| e.to_string()));

    match parsed {
        Ok(blocks) => RenderInstruction::Notebook { blocks },
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Notebook could not be read");
            RenderInstruction::Error {
                message: NOTEBOOK_READ_ERROR.to_string(),
            }
        }
    }
}

fn render_table(path: &Path) -> Result<RenderInstruction> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let headers = reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(RenderInstruction::Table { headers, rows })
}

/// Dispatches a record to the rendering strategy for its extension.
///
/// Only the PDF branch touches state, reading through the encoding cache.
#[derive(Debug, Clone)]
pub struct PreviewRenderer {
    pdf_height: u32,
}

impl PreviewRenderer {
    pub fn new(pdf_height: u32) -> Self {
        Self { pdf_height }
    }

    pub fn render(
        &self,
        record: &FileRecord,
        pdf_cache: &mut PdfEncodingCache,
    ) -> Result<RenderInstruction> {
        tracing::debug!(path = %record.path.display(), kind = %record.kind, "Rendering preview");

        match record.kind {
            FileKind::Pdf => {
                let data = pdf_cache.get(&record.path)?;
                Ok(RenderInstruction::PdfEmbed {
                    data,
                    height: self.pdf_height,
                })
            }
            FileKind::Notebook => Ok(render_notebook(&record.path)),
            FileKind::Csv => render_table(&record.path),
            FileKind::Python | FileKind::Markdown | FileKind::Tex => {
                let language = source_language(record.kind).unwrap_or("markdown");
                render_source(&record.path, language)
            }
        }
    }
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_PDF_HEIGHT)
    }
}
