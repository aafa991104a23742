//! Controls and status bar.
//!
//! Two lines at the bottom of the screen: the current control values
//! (the TUI stand-in for the dropdowns and checkboxes), and either the
//! search input being edited, a status message, or the key hints.

use crate::model::SearchColumn;
use crate::state::{AppState, InputFocus};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Height of the status bar.
pub const STATUS_HEIGHT: u16 = 2;

const KEY_HINTS: &str =
    "q quit  / search  m mode  x exclude  r regex  c column  t sort  d export  ? help";

/// One-line rendering of the current control values.
pub fn controls_line(state: &AppState) -> String {
    let filter = &state.filter;
    let mut line = format!("mode:{}", filter.mode);

    line.push_str(&format!("  search:{:?}", filter.query_text));
    if filter.use_regex {
        line.push_str(" [regex]");
    }
    if !filter.include_matches {
        line.push_str(" [exclude]");
    }

    let column = match filter.search_column {
        SearchColumn::All => "all".to_string(),
        SearchColumn::Combined => "combine+tag".to_string(),
        SearchColumn::Index(i) => state
            .table()
            .columns()
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("#{i}")),
    };
    line.push_str(&format!("  column:{column}"));

    if filter.sort_by_time {
        line.push_str("  sort:time");
    }

    line.push_str(&format!(
        "  rows {}/{}",
        state.table().visible_count(),
        state.table().rows().len()
    ));
    line
}

/// Render the status bar.
pub fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let second = match state.focus {
        InputFocus::Query => Line::from(vec![
            Span::styled("search> ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(state.filter.query_text.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        InputFocus::Table => match &state.status_message {
            Some(message) => Line::from(message.clone()),
            None => Line::from(KEY_HINTS),
        },
    };

    let paragraph = Paragraph::new(vec![Line::from(controls_line(state)), second]);
    frame.render_widget(paragraph, area);
}
