// Syntax highlighting of code and markdown previews
use super::colors::ACCENT_SECONDARY;
use crate::config::DEFAULT_THEME;
use crate::preview::NotebookBlock;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use std::cell::Cell;

/// Loads syntaxes and the theme once; loading them per preview is slow
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
    highlights: Cell<usize>,
}

impl Highlighter {
    /// Falls back to the default theme when `theme_name` is unknown
    pub fn new(theme_name: &str) -> Self {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let mut themes = ThemeSet::load_defaults().themes;

        let theme = match themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!(theme = theme_name, "Unknown theme, using default");
                themes.remove(DEFAULT_THEME).unwrap_or_default()
            }
        };

        Self {
            syntax_set,
            theme,
            highlights: Cell::new(0),
        }
    }

    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        self.syntax_set.find_syntax_by_token(language)
    }

    /// Number of blocks highlighted so far
    pub fn highlight_count(&self) -> usize {
        self.highlights.get()
    }

    /// Highlights `source` line by line; unknown languages render as plain text
    pub fn highlight(&self, language: &str, source: &str) -> Vec<Line<'static>> {
        let syntax = self
            .find_syntax(language)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        self.highlights.set(self.highlights.get() + 1);

        let mut lines = Vec::new();
        for line in LinesWithEndings::from(source) {
            let text = line.trim_end_matches(&['\n', '\r'][..]);

            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => {
                    let spans: Vec<Span<'static>> = ranges
                        .into_iter()
                        .map(|(style, piece)| {
                            Span::styled(
                                piece.trim_end_matches(&['\n', '\r'][..]).to_string(),
                                to_ratatui_style(style),
                            )
                        })
                        .collect();
                    lines.push(Line::from(spans));
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Syntax highlighting error");
                    lines.push(Line::from(text.to_string()));
                }
            }
        }

        lines
    }

    /// Notebook cells in order, code cells numbered from 1 like a kernel would
    pub fn highlight_notebook(&self, blocks: &[NotebookBlock]) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let mut execution = 0;

        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }

            match block {
                NotebookBlock::Code { language, source } => {
                    execution += 1;
                    lines.push(Line::from(Span::styled(
                        format!("In [{}]:", execution),
                        Style::default()
                            .fg(ACCENT_SECONDARY)
                            .add_modifier(Modifier::BOLD),
                    )));
                    lines.extend(self.highlight(language, source));
                }
                NotebookBlock::Markdown { text } => {
                    lines.extend(self.highlight("markdown", text));
                }
            }
        }

        lines
    }
}

fn to_ratatui_style(style: syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut converted = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));

    if style.font_style.contains(FontStyle::BOLD) {
        converted = converted.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        converted = converted.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        converted = converted.add_modifier(Modifier::UNDERLINED);
    }

    converted
}
