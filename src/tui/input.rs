use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Represents the result of handling a key event while browsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Select the next file in the list
    Next,
    /// Select the previous file in the list
    Previous,
    /// Start typing a search filter
    Search,
    /// Prompt for a new root folder
    ChangeFolder,
    /// Drop every cache and rescan
    Refresh,
    /// Write the CSV listing
    Export,
    /// Open the selected file with the system application
    Open,
    /// Scroll the preview down
    ScrollDown,
    /// Scroll the preview up
    ScrollUp,
    /// Toggle help overlay
    Help,
    /// No action
    None,
}

/// Result of a key press inside a text prompt (search box, folder prompt)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    Insert(char),
    Backspace,
    Submit,
    Cancel,
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Quit: q, Esc or Ctrl+C
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Quit,

        // Navigation
        (KeyCode::Down, KeyModifiers::NONE) => KeyAction::Next,
        (KeyCode::Up, KeyModifiers::NONE) => KeyAction::Previous,
        (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::Next,
        (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Previous,

        // Preview scrolling
        (KeyCode::PageDown, KeyModifiers::NONE) => KeyAction::ScrollDown,
        (KeyCode::PageUp, KeyModifiers::NONE) => KeyAction::ScrollUp,

        (KeyCode::Char('/'), KeyModifiers::NONE) => KeyAction::Search,
        (KeyCode::Char('c'), KeyModifiers::NONE) => KeyAction::ChangeFolder,

        // Refresh: r or F5
        (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Refresh,
        (KeyCode::F(5), KeyModifiers::NONE) => KeyAction::Refresh,

        (KeyCode::Char('e'), KeyModifiers::NONE) => KeyAction::Export,
        (KeyCode::Char('o'), KeyModifiers::NONE) => KeyAction::Open,
        (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::Help,

        _ => KeyAction::None,
    }
}

/// Maps keyboard events to prompt editing actions
pub fn handle_prompt_input(key: KeyEvent) -> PromptAction {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => PromptAction::Submit,
        (KeyCode::Esc, _) => PromptAction::Cancel,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => PromptAction::Cancel,
        (KeyCode::Backspace, _) => PromptAction::Backspace,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            PromptAction::Insert(c)
        }
        _ => PromptAction::None,
    }
}
