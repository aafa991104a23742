//! Problem summary panel.

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Height the summary panel needs, including its border.
pub fn panel_height(summary: &str) -> u16 {
    let lines = summary.lines().count().max(1) as u16;
    lines + 2
}

/// Render the summary computed at load time.
pub fn render_summary(frame: &mut Frame, area: Rect, summary: &str) {
    let lines: Vec<Line> = summary.lines().map(Line::from).collect();
    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Problem summary"));
    frame.render_widget(panel, area);
}
