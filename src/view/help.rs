//! Help overlay.

use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const HELP_TEXT: &str = "\
q, Ctrl+C     quit
/             edit search query (Enter/Esc done, Ctrl+U clear)
m / M         next / previous outcome filter mode
x             toggle exclude-matches
r             toggle regex search
c / C         next / previous search column
t             toggle sort by time (descending, N/A last)
d             export the results file
Up/Down       scroll  (PageUp/PageDown, Home, mouse wheel)
?             toggle this help

In the COMBINE+TAG column mode, a (COL<i>) header row appears;
clicking a label appends it, escaped, to the search query.";

/// Render the help overlay centered over `area`.
pub fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = area.width.min(64);
    let height = area.height.min(16);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, popup);
    let help = Paragraph::new(HELP_TEXT)
        .block(Block::default().borders(Borders::ALL).title("Help"));
    frame.render_widget(help, popup);
}
