// TUI module for rendering the terminal interface
pub mod colors;
pub mod helpers;
pub mod highlight;
pub mod input;

// Re-exports
pub use colors::*;
pub use helpers::{format_file_size, relative_folder, truncate};
pub use highlight::Highlighter;
pub use input::{handle_key_event, handle_prompt_input, KeyAction, PromptAction};

use crate::app::{App, PreviewPane, ViewState};
use crate::domain::FileRecord;
use crate::preview::RenderInstruction;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table,
        Wrap,
    },
    Frame,
};
use std::path::Path;

/// Characters of the base64 payload shown in the PDF summary
const PDF_PREFIX_LEN: usize = 48;

/// Draws the whole dashboard for the current state of `app`
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status(frame, chunks[2], app);
    render_footer(frame, chunks[3]);

    match app.view_state {
        ViewState::Help => render_help_overlay(frame),
        ViewState::ChangingFolder => render_folder_prompt(frame, &app.prompt),
        ViewState::Browsing | ViewState::Searching => {}
    }
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn panel(title: String, focused: bool) -> Block<'static> {
    let border = if focused { ACCENT_HIGHLIGHT } else { BORDER_COLOR };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(title)
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let total = app.index().len();
    let shown = app.visible_records().len();

    let title_line = Line::from(vec![
        Span::styled(
            " NSI Explorer ",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} files ({} shown)", total, shown),
            Style::default().fg(TEXT_SECONDARY),
        ),
    ]);

    let root_line = Line::from(vec![
        Span::styled(" Folder: ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled(
            app.session.root_path.display().to_string(),
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let header = Paragraph::new(vec![title_line, root_line])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(header, area);
}

fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
        .split(area);

    render_sidebar(frame, chunks[0], app);

    match app.preview() {
        Some(pane) => render_preview(frame, chunks[1], pane, app.preview_scroll),
        None => frame.render_widget(render_empty_state_widget(app), chunks[1]),
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let searching = app.view_state == ViewState::Searching;
    let mut search_spans = vec![Span::styled(
        app.session.search_text.clone(),
        Style::default().fg(TEXT_PRIMARY),
    )];
    if searching {
        search_spans.push(Span::styled("▏", Style::default().fg(ACCENT_HIGHLIGHT)));
    } else if app.session.search_text.is_empty() {
        search_spans = vec![Span::styled(
            "press / to filter",
            Style::default()
                .fg(TEXT_SECONDARY)
                .add_modifier(Modifier::ITALIC),
        )];
    }

    let search = Paragraph::new(Line::from(search_spans))
        .block(panel(" Search ".to_string(), searching));
    frame.render_widget(search, chunks[0]);

    let width = chunks[1].width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .visible_records()
        .into_iter()
        .map(|record| ListItem::new(file_line(record, &app.session.root_path, width)))
        .collect();

    let list = List::new(items)
        .block(panel(" Files ".to_string(), false))
        .highlight_style(
            Style::default()
                .bg(BG_SELECTED)
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(app.selected_position());
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

/// File name followed by its folder, both cut to fit `width` characters
fn file_line(record: &FileRecord, root: &Path, width: usize) -> Line<'static> {
    let name = truncate(&record.name, width);
    let mut spans = vec![Span::styled(name.clone(), Style::default().fg(TEXT_PRIMARY))];

    let folder = relative_folder(record, root);
    let room = width.saturating_sub(name.chars().count() + 2);
    if !folder.is_empty() && room > 0 {
        spans.push(Span::styled(
            format!("  {}", truncate(&folder, room)),
            Style::default().fg(TEXT_SECONDARY),
        ));
    }

    Line::from(spans)
}

fn render_preview(frame: &mut Frame, area: Rect, pane: &PreviewPane, scroll: u16) {
    let title = format!(" {} ", pane.record.name);

    let instruction = match &pane.outcome {
        Ok(instruction) => instruction,
        Err(message) => {
            frame.render_widget(error_panel(pane, message), area);
            return;
        }
    };

    // Highlighted lines were computed when the pane was built; only the
    // window on screen is copied per frame
    let lines: Vec<Line> = match instruction {
        RenderInstruction::Code { .. } | RenderInstruction::Notebook { .. } => pane
            .lines
            .iter()
            .skip(scroll as usize)
            .take(area.height as usize)
            .cloned()
            .collect(),
        RenderInstruction::PdfEmbed { data, height } => pdf_summary_lines(data, *height)
            .into_iter()
            .skip(scroll as usize)
            .collect(),
        RenderInstruction::Error { message } => {
            frame.render_widget(error_panel(pane, message), area);
            return;
        }
        RenderInstruction::Table { headers, rows } => {
            render_table(frame, area, title, headers, rows, scroll);
            return;
        }
    };

    let paragraph = Paragraph::new(lines)
        .block(panel(title, false))
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn pdf_summary_lines(data: &str, height: u32) -> Vec<Line<'static>> {
    let prefix: String = data.chars().take(PDF_PREFIX_LEN).collect();

    vec![
        Line::from(""),
        Line::from(Span::styled(
            "  PDF document",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Encoded size: ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw(format_file_size(data.len() as u64)),
        ]),
        Line::from(vec![
            Span::styled("  Viewer height: ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw(format!("{}px", height)),
        ]),
        Line::from(vec![
            Span::styled("  Source: ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw(format!("data:application/pdf;base64,{}…", prefix)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Press o to open it in the system viewer",
            Style::default()
                .fg(TEXT_SECONDARY)
                .add_modifier(Modifier::ITALIC),
        )),
    ]
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    title: String,
    headers: &[String],
    rows: &[Vec<String>],
    scroll: u16,
) {
    let widths = vec![Constraint::Fill(1); headers.len().max(1)];

    let header = Row::new(headers.iter().map(|h| Cell::from(h.as_str()))).style(
        Style::default()
            .fg(ACCENT_HIGHLIGHT)
            .add_modifier(Modifier::BOLD),
    );

    let body = rows
        .iter()
        .skip(scroll as usize)
        .map(|row| Row::new(row.iter().map(|value| Cell::from(value.as_str()))));

    let table = Table::new(body, widths)
        .header(header)
        .block(panel(
            format!("{}({} rows) ", title, rows.len()),
            false,
        ))
        .style(Style::default().fg(TEXT_PRIMARY))
        .column_spacing(2);

    frame.render_widget(table, area);
}

fn error_panel<'a>(pane: &'a PreviewPane, message: &'a str) -> Paragraph<'a> {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  [!] Error generating preview",
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("  {}", message)),
        Line::from(""),
        Line::from(format!("  File: {}", pane.record.name)),
        Line::from(format!("  Path: {}", pane.record.path.display())),
        Line::from(format!("  Type: {}", pane.record.kind)),
    ];

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_PRIMARY))
                .title(format!(" {} [!] ", pane.record.name)),
        )
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: false })
}

/// Creates an empty state widget for when no record is visible
fn render_empty_state_widget(app: &App) -> Paragraph<'static> {
    let hint = if app.index().is_empty() {
        "No .tex, .md, .ipynb, .csv, .py or .pdf file in this folder."
    } else {
        "No file name matches the current search."
    };

    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "No Files Found",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(TEXT_SECONDARY))),
        Line::from(""),
        Line::from(Span::styled(
            "Press c to choose another folder.",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    Paragraph::new(lines)
        .block(panel(" Preview ".to_string(), false))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status {
        Some(status) if status.is_error => Line::from(Span::styled(
            format!(" [!] {}", status.text),
            Style::default().fg(ACCENT_PRIMARY),
        )),
        Some(status) => Line::from(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(ACCENT_SECONDARY),
        )),
        None => Line::from(""),
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        )
    };
    let label = |l: &'static str| Span::styled(l, Style::default().fg(TEXT_SECONDARY));

    let controls = Line::from(vec![
        key("↑↓ "),
        label("Navigate"),
        Span::raw("  │  "),
        key("/ "),
        label("Search"),
        Span::raw("  │  "),
        key("c "),
        label("Folder"),
        Span::raw("  │  "),
        key("r "),
        label("Refresh"),
        Span::raw("  │  "),
        key("e "),
        label("Export"),
        Span::raw("  │  "),
        key("o "),
        label("Open"),
        Span::raw("  │  "),
        key("? "),
        label("Help"),
        Span::raw("  │  "),
        key("q "),
        label("Quit"),
    ]);

    let footer = Paragraph::new(controls)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let help_area = centered_rect(60, 70, frame.area());

    // Clear background
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let shortcut = |keys: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:>12}  ", keys), Style::default().fg(ACCENT_SECONDARY)),
            Span::raw(format!("{:<28}", action)),
        ])
    };

    let help_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        shortcut("↑↓ or k/j", "Select file"),
        shortcut("PgUp/PgDn", "Scroll preview"),
        shortcut("/", "Filter by name"),
        shortcut("c", "Change folder"),
        shortcut("r or F5", "Clear caches and rescan"),
        shortcut("e", "Export CSV listing"),
        shortcut("o", "Open with system app"),
        shortcut("?", "Toggle help"),
        shortcut("q or Esc", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the folder prompt with the text typed so far
pub fn render_folder_prompt(frame: &mut Frame, prompt: &str) {
    let area = centered_rect(70, 30, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Change Folder ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" > ", Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::styled(prompt.to_string(), Style::default().fg(TEXT_PRIMARY)),
            Span::styled("▏", Style::default().fg(ACCENT_HIGHLIGHT)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(ACCENT_SECONDARY)),
            Span::styled("Confirm", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("  │  "),
            Span::styled("Esc ", Style::default().fg(ACCENT_PRIMARY)),
            Span::styled("Cancel", Style::default().fg(TEXT_SECONDARY)),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserConfig;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use std::fs;
    use tempfile::TempDir;

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                render(frame, app);
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let content = buffer.content();
        content.iter().map(|c| c.symbol()).collect()
    }

    fn app_with(files: &[(&str, &[u8])]) -> (TempDir, App) {
        let temp_dir = TempDir::new().unwrap();
        for (name, bytes) in files {
            fs::write(temp_dir.path().join(name), bytes).unwrap();
        }
        let app = App::new(
            temp_dir.path().to_path_buf(),
            UserConfig::default(),
            temp_dir.path().to_path_buf(),
        );
        (temp_dir, app)
    }

    mod layout_tests {
        use super::*;

        #[test]
        fn test_render_empty_state() {
            let (_dir, app) = app_with(&[]);
            let buffer_str = draw(&app);

            assert!(
                buffer_str.contains("No Files Found"),
                "Expected empty state message, got: {}",
                buffer_str
            );
            assert!(buffer_str.contains("0 files (0 shown)"));
        }

        #[test]
        fn test_render_header_and_list() {
            let (_dir, app) = app_with(&[("cours.md", b"# Cours\n"), ("tp.py", b"x = 1\n")]);
            let buffer_str = draw(&app);

            assert!(buffer_str.contains("NSI Explorer"));
            assert!(buffer_str.contains("2 files (2 shown)"));
            assert!(buffer_str.contains("cours.md"));
            assert!(buffer_str.contains("tp.py"));
        }

        #[test]
        fn test_render_footer() {
            let (_dir, app) = app_with(&[("tp.py", b"x = 1\n")]);
            let buffer_str = draw(&app);

            assert!(buffer_str.contains("Search"));
            assert!(buffer_str.contains("Export"));
            assert!(buffer_str.contains("Quit"));
        }

        #[test]
        fn test_render_filtered_count() {
            let (_dir, mut app) =
                app_with(&[("cours.md", b"# Cours\n"), ("tp.py", b"x = 1\n")]);
            app.handle_key(KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE));
            app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE));
            app.handle_key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE));

            let buffer_str = draw(&app);
            assert!(buffer_str.contains("2 files (1 shown)"));
        }

        #[test]
        fn test_render_no_match() {
            let (_dir, mut app) = app_with(&[("tp.py", b"x = 1\n")]);
            app.session.search_text = "zzz".to_string();
            app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE));

            let buffer_str = draw(&app);
            assert!(buffer_str.contains("No file name matches"));
        }
    }

    mod preview_tests {
        use super::*;

        #[test]
        fn test_render_code_preview() {
            let (_dir, app) = app_with(&[("tp.py", b"def carre(x):\n    return x * x\n")]);
            let buffer_str = draw(&app);

            assert!(buffer_str.contains("def carre(x):"));
            assert!(buffer_str.contains("return x * x"));
        }

        #[test]
        fn test_idle_redraws_reuse_highlighting() {
            let source: String = (0..200).map(|i| format!("x{} = {}\n", i, i)).collect();
            let (_dir, app) = app_with(&[("big.py", source.as_bytes())]);
            let after_build = app.highlighter().highlight_count();
            assert_eq!(after_build, 1);

            let first = draw(&app);
            let second = draw(&app);

            assert_eq!(first, second);
            assert!(first.contains("x0 = 0"));
            assert_eq!(app.highlighter().highlight_count(), after_build);
        }

        #[test]
        fn test_navigation_highlights_new_selection_once() {
            let (_dir, mut app) = app_with(&[("a.py", b"a = 1\n"), ("b.py", b"b = 2\n")]);
            let before = app.highlighter().highlight_count();

            app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
            draw(&app);
            draw(&app);

            assert_eq!(app.highlighter().highlight_count(), before + 1);
        }

        #[test]
        fn test_render_table_preview() {
            let (_dir, app) = app_with(&[("notes.csv", b"eleve,note\nAda,18\nAlan,17\n")]);
            let buffer_str = draw(&app);

            assert!(buffer_str.contains("eleve"));
            assert!(buffer_str.contains("Alan"));
            assert!(buffer_str.contains("(2 rows)"));
        }

        #[test]
        fn test_render_notebook_preview() {
            let notebook = br##"{"cells": [
                {"cell_type": "markdown", "source": ["# Titre"]},
                {"cell_type": "code", "source": "print(42)"}
            ]}"##;
            let (_dir, app) = app_with(&[("cours.ipynb", notebook)]);
            let buffer_str = draw(&app);

            assert!(buffer_str.contains("# Titre"));
            assert!(buffer_str.contains("In [1]:"));
            assert!(!buffer_str.contains("In [2]:"));
            assert!(buffer_str.contains("print(42)"));
        }

        #[test]
        fn test_render_broken_notebook() {
            let (_dir, app) = app_with(&[("cours.ipynb", b"{ broken")]);
            let buffer_str = draw(&app);

            assert!(buffer_str.contains("[!] Error generating preview"));
            assert!(buffer_str.contains("Notebook read failure"));
        }

        #[test]
        fn test_render_pdf_summary() {
            let (_dir, app) = app_with(&[("sujet.pdf", b"%PDF-1.4 fake")]);
            let buffer_str = draw(&app);

            assert!(buffer_str.contains("PDF document"));
            assert!(buffer_str.contains("800px"));
            assert!(buffer_str.contains("data:application/pdf;base64,JVBER"));
        }
    }

    mod list_tests {
        use super::*;
        use std::path::PathBuf;

        fn plain(line: &Line) -> String {
            line.spans.iter().map(|s| s.content.as_ref()).collect()
        }

        fn record(path: &str) -> FileRecord {
            FileRecord::from_path(Path::new(path)).unwrap()
        }

        #[test]
        fn test_file_line_shows_folder() {
            let line = file_line(&record("/srv/cours/terminale/tp.py"), Path::new("/srv/cours"), 40);
            assert_eq!(plain(&line), "tp.py  terminale");
        }

        #[test]
        fn test_file_line_counts_characters_not_bytes() {
            let rec = record("/srv/cours/terminale/élève.md");
            let line = file_line(&rec, Path::new("/srv/cours"), 20);
            assert_eq!(plain(&line), "élève.md  terminale");
        }

        #[test]
        fn test_file_line_drops_folder_without_room() {
            let rec = record("/srv/cours/terminale/tp.py");
            let line = file_line(&rec, Path::new("/srv/cours"), 7);
            assert_eq!(plain(&line), "tp.py");
        }

        #[test]
        fn test_relative_root_labels_folders_from_the_root() {
            let dir = tempfile::Builder::new()
                .prefix("nsi-relative-")
                .tempdir_in(".")
                .unwrap();
            let nested = dir.path().join("terminale").join("graphes");
            fs::create_dir_all(&nested).unwrap();
            fs::write(dir.path().join("top.md"), b"# top\n").unwrap();
            fs::write(nested.join("tp.py"), b"x = 1\n").unwrap();

            let relative = PathBuf::from(dir.path().file_name().unwrap());
            let app = App::new(relative, UserConfig::default(), dir.path().to_path_buf());
            assert!(app.session.root_path.is_absolute());

            for record in app.visible_records() {
                let folder = relative_folder(record, &app.session.root_path);
                match record.name.as_str() {
                    "top.md" => assert_eq!(folder, ""),
                    "tp.py" => assert_eq!(folder, "terminale/graphes"),
                    other => panic!("unexpected record {}", other),
                }
            }
            assert_eq!(app.visible_records().len(), 2);
        }
    }

    mod overlay_tests {
        use super::*;

        #[test]
        fn test_render_help_overlay() {
            let backend = TestBackend::new(100, 30);
            let mut terminal = Terminal::new(backend).unwrap();

            terminal
                .draw(|frame| {
                    render_help_overlay(frame);
                })
                .unwrap();

            let buffer = terminal.backend().buffer().clone();
            let buffer_str: String = buffer.content().iter().map(|c| c.symbol()).collect();

            assert!(buffer_str.contains("Help"));
            assert!(buffer_str.contains("Change folder"));
            assert!(buffer_str.contains("Export CSV listing"));
        }

        #[test]
        fn test_render_folder_prompt() {
            let (dir, mut app) = app_with(&[]);
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));

            let buffer_str = draw(&app);
            assert!(buffer_str.contains("Change Folder"));
            let root_name = dir.path().file_name().unwrap().to_string_lossy().into_owned();
            assert!(buffer_str.contains(&root_name));
        }

        #[test]
        fn test_render_error_status() {
            let (_dir, mut app) = app_with(&[]);
            app.apply_folder_choice("/nonexistent/directory");

            let buffer_str = draw(&app);
            assert!(buffer_str.contains("[!] Not a directory"));
        }
    }
}
