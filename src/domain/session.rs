use super::{absolutize, FileRecord};
use std::env;
use std::path::PathBuf;

/// Per-run browsing state: where we scan, what we filter on, what is selected.
///
/// Nothing here outlives the process; a new run starts from the current
/// working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Always absolute, like the paths of the records scanned under it
    pub root_path: PathBuf,
    pub search_text: String,
    /// Absolute path of the selected record. Names alone are ambiguous when
    /// two subdirectories hold files with the same name.
    pub selected: Option<PathBuf>,
}

impl SessionState {
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: absolutize(&root_path.into()),
            search_text: String::new(),
            selected: None,
        }
    }

    pub fn from_current_dir() -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(cwd)
    }

    /// Applies the outcome of a folder choice.
    ///
    /// A cancelled (`None`) or empty choice keeps the current root. Returns
    /// `true` only when the root actually changed, in which case the
    /// selection is dropped.
    pub fn change_root(&mut self, candidate: Option<PathBuf>) -> bool {
        let candidate = match candidate {
            Some(path) if !path.as_os_str().is_empty() => absolutize(&path),
            _ => return false,
        };

        if candidate.as_os_str() == self.root_path.as_os_str() {
            return false;
        }

        self.root_path = candidate;
        self.selected = None;
        true
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn select(&mut self, record: &FileRecord) {
        self.selected = Some(record.path.clone());
    }

    pub fn selected_file_name(&self) -> Option<String> {
        self.selected
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Position of the selection within `visible`.
    ///
    /// Falls back to the first visible record when nothing is selected or
    /// the selection has been filtered out.
    pub fn selected_position(&self, visible: &[&FileRecord]) -> Option<usize> {
        if visible.is_empty() {
            return None;
        }

        let found = self
            .selected
            .as_ref()
            .and_then(|path| visible.iter().position(|r| &r.path == path));

        Some(found.unwrap_or(0))
    }

    pub fn selected_record<'a>(&self, visible: &[&'a FileRecord]) -> Option<&'a FileRecord> {
        self.selected_position(visible).map(|i| visible[i])
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::from_current_dir()
    }
}
