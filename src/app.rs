//! Interactive session: state, caches and the reaction to each key press
//!
//! Every interaction runs one synchronous pass: index lookup, filter,
//! selection, preview. Drawing between interactions reuses the last result.

use crate::cache::Caches;
use crate::config::UserConfig;
use crate::domain::{filter_records, FileIndex, FileRecord, SessionState};
use crate::error::Result;
use crate::export::write_export;
use crate::file_opener::open_file;
use crate::preview::{PreviewRenderer, RenderInstruction};
use crate::tui::highlight::Highlighter;
use crate::tui::input::{handle_key_event, handle_prompt_input, KeyAction, PromptAction};
use crossterm::event::KeyEvent;
use ratatui::text::Line;
use std::path::PathBuf;
use std::sync::Arc;

const SCROLL_STEP: u16 = 10;

/// UI view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Main file browsing view
    Browsing,
    /// Typing into the search box
    Searching,
    /// Typing a new root folder
    ChangingFolder,
    /// Help overlay visible
    Help,
}

/// One-line feedback shown under the panes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Rendered preview of the selected record. Failures carry only their message.
///
/// Code and notebook previews are highlighted once, when the pane is built,
/// and every redraw reuses `lines`.
#[derive(Debug, Clone)]
pub struct PreviewPane {
    pub record: FileRecord,
    pub outcome: std::result::Result<RenderInstruction, String>,
    pub lines: Vec<Line<'static>>,
}

pub struct App {
    pub session: SessionState,
    pub caches: Caches,
    pub config: UserConfig,
    pub view_state: ViewState,
    /// Text being typed in the folder prompt
    pub prompt: String,
    pub status: Option<StatusMessage>,
    pub preview_scroll: u16,
    renderer: PreviewRenderer,
    highlighter: Highlighter,
    index: Arc<FileIndex>,
    preview: Option<PreviewPane>,
    export_dir: PathBuf,
}

impl App {
    /// Creates a session rooted at `root`, exporting into `export_dir`
    pub fn new(root: PathBuf, config: UserConfig, export_dir: PathBuf) -> Self {
        let mut app = Self {
            session: SessionState::new(root),
            caches: Caches::new(),
            renderer: PreviewRenderer::new(config.pdf_height),
            highlighter: Highlighter::new(&config.theme),
            config,
            view_state: ViewState::Browsing,
            prompt: String::new(),
            status: None,
            preview_scroll: 0,
            index: Arc::new(FileIndex::default()),
            preview: None,
            export_dir,
        };
        app.refresh_view(true);
        app
    }

    pub fn index(&self) -> &FileIndex {
        &self.index
    }

    pub fn visible_records(&self) -> Vec<&FileRecord> {
        filter_records(&self.index, &self.session.search_text)
    }

    pub fn selected_position(&self) -> Option<usize> {
        self.session.selected_position(&self.visible_records())
    }

    pub fn preview(&self) -> Option<&PreviewPane> {
        self.preview.as_ref()
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Re-evaluates index, filter, selection and preview.
    ///
    /// The preview is rendered again only when the selection moved or when
    /// `force_render` is set.
    fn refresh_view(&mut self, force_render: bool) {
        self.index = self.caches.index.get(&self.session.root_path);

        let index = Arc::clone(&self.index);
        let visible = filter_records(&index, &self.session.search_text);
        let selected = self.session.selected_record(&visible).cloned();

        let record = match selected {
            Some(record) => record,
            None => {
                self.preview = None;
                return;
            }
        };

        let unchanged = self
            .preview
            .as_ref()
            .is_some_and(|pane| pane.record.path == record.path);
        if unchanged && !force_render {
            return;
        }

        let outcome = self
            .renderer
            .render(&record, &mut self.caches.pdf)
            .map_err(|e| {
                tracing::warn!(path = %record.path.display(), error = %e, "Preview failed");
                e.to_string()
            });

        let lines = match &outcome {
            Ok(RenderInstruction::Code { language, source }) => {
                self.highlighter.highlight(language, source)
            }
            Ok(RenderInstruction::Notebook { blocks }) => {
                self.highlighter.highlight_notebook(blocks)
            }
            _ => Vec::new(),
        };

        self.preview = Some(PreviewPane {
            record,
            outcome,
            lines,
        });
        self.preview_scroll = 0;
    }

    /// Reacts to a key press. Returns `false` when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.view_state {
            ViewState::Help => {
                // Any key closes help
                self.view_state = ViewState::Browsing;
                true
            }
            ViewState::Searching => {
                self.handle_search_input(handle_prompt_input(key));
                true
            }
            ViewState::ChangingFolder => {
                self.handle_folder_input(handle_prompt_input(key));
                true
            }
            ViewState::Browsing => self.handle_action(handle_key_event(key)),
        }
    }

    pub fn handle_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Quit => return false,
            KeyAction::Next => self.move_selection(1),
            KeyAction::Previous => self.move_selection(-1),
            KeyAction::Search => {
                self.view_state = ViewState::Searching;
            }
            KeyAction::ChangeFolder => {
                self.prompt = self.session.root_path.to_string_lossy().into_owned();
                self.view_state = ViewState::ChangingFolder;
            }
            KeyAction::Refresh => self.refresh(),
            KeyAction::Export => self.export(),
            KeyAction::Open => self.open_selected(),
            KeyAction::ScrollDown => {
                self.preview_scroll = self.preview_scroll.saturating_add(SCROLL_STEP);
            }
            KeyAction::ScrollUp => {
                self.preview_scroll = self.preview_scroll.saturating_sub(SCROLL_STEP);
            }
            KeyAction::Help => {
                self.view_state = ViewState::Help;
            }
            KeyAction::None => {}
        }
        true
    }

    fn move_selection(&mut self, delta: isize) {
        let index = Arc::clone(&self.index);
        let visible = filter_records(&index, &self.session.search_text);

        let current = match self.session.selected_position(&visible) {
            Some(position) => position,
            None => return,
        };

        let target = current
            .saturating_add_signed(delta)
            .min(visible.len().saturating_sub(1));
        self.session.select(visible[target]);
        self.refresh_view(false);
    }

    fn handle_search_input(&mut self, action: PromptAction) {
        match action {
            PromptAction::Insert(c) => {
                self.session.search_text.push(c);
                self.refresh_view(false);
            }
            PromptAction::Backspace => {
                self.session.search_text.pop();
                self.refresh_view(false);
            }
            PromptAction::Submit => {
                self.view_state = ViewState::Browsing;
            }
            PromptAction::Cancel => {
                self.session.search_text.clear();
                self.view_state = ViewState::Browsing;
                self.refresh_view(false);
            }
            PromptAction::None => {}
        }
    }

    fn handle_folder_input(&mut self, action: PromptAction) {
        match action {
            PromptAction::Insert(c) => self.prompt.push(c),
            PromptAction::Backspace => {
                self.prompt.pop();
            }
            PromptAction::Submit => {
                let choice = std::mem::take(&mut self.prompt);
                self.view_state = ViewState::Browsing;
                self.apply_folder_choice(choice.trim());
            }
            PromptAction::Cancel => {
                self.prompt.clear();
                self.view_state = ViewState::Browsing;
            }
            PromptAction::None => {}
        }
    }

    /// Switches the root folder. Empty or invalid choices keep the current root.
    pub fn apply_folder_choice(&mut self, choice: &str) {
        if choice.is_empty() {
            return;
        }

        let candidate = PathBuf::from(choice);
        if !candidate.is_dir() {
            tracing::warn!(path = %candidate.display(), "Rejected folder choice");
            self.status = Some(StatusMessage::error(format!(
                "Not a directory: {}",
                candidate.display()
            )));
            return;
        }

        if self.session.change_root(Some(candidate)) {
            tracing::info!(root = %self.session.root_path.display(), "Root folder changed");
            self.caches.invalidate();
            self.refresh_view(true);
            self.status = Some(StatusMessage::info(format!(
                "Folder: {} ({} files)",
                self.session.root_path.display(),
                self.index.len()
            )));
        }
    }

    /// Drops every cache, then rescans and re-renders
    pub fn refresh(&mut self) {
        self.caches.invalidate();
        self.refresh_view(true);
        self.status = Some(StatusMessage::info(format!(
            "Refreshed: {} files",
            self.index.len()
        )));
    }

    /// Writes the CSV listing into the export directory
    pub fn export(&mut self) {
        if self.index.is_empty() {
            self.status = Some(StatusMessage::error("Nothing to export"));
            return;
        }

        let target = self.export_dir.join(&self.config.export_file_name);
        let result: Result<()> = self
            .caches
            .export
            .export(&self.index)
            .and_then(|bytes| write_export(&target, &bytes));

        self.status = Some(match result {
            Ok(()) => StatusMessage::info(format!("Exported to {}", target.display())),
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                StatusMessage::error(format!("Export failed: {}", e))
            }
        });
    }

    fn open_selected(&mut self) {
        let path = match &self.preview {
            Some(pane) => pane.record.path.clone(),
            None => return,
        };

        if let Err(e) = open_file(&path) {
            tracing::warn!(error = %e, "Open failed");
            self.status = Some(StatusMessage::error(e.to_string()));
        }
    }
}
