//! Results table rendering and mouse geometry.

use crate::state::AppState;
use crate::table::RowView;
use crate::view::styles::OutcomeStyles;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// Space between rendered columns.
const COLUMN_SPACING: u16 = 1;
/// Columns never render wider than this.
const MAX_COLUMN_WIDTH: u16 = 32;
/// Columns never render narrower than this.
const MIN_COLUMN_WIDTH: u16 = 3;

// ===== TableGeometry =====

/// Where the table landed on screen, for mouse hit testing.
///
/// Captured on every draw; the event loop keeps the most recent value
/// so index-header clicks can be mapped back to a column.
#[derive(Debug, Clone, Default)]
pub struct TableGeometry {
    /// Area inside the table border.
    pub inner: Rect,
    /// Rendered column widths, in column order.
    pub widths: Vec<u16>,
    /// Absolute y of the `(COL<i>)` header line, when visible.
    pub index_header_y: Option<u16>,
}

impl TableGeometry {
    /// Map a click to the index-header column it landed on.
    pub fn hit_test_index_header(&self, x: u16, y: u16) -> Option<usize> {
        if Some(y) != self.index_header_y {
            return None;
        }
        let mut start = self.inner.x;
        for (column, &width) in self.widths.iter().enumerate() {
            let end = start.saturating_add(width);
            if x >= start && x < end {
                return Some(column);
            }
            start = end.saturating_add(COLUMN_SPACING);
        }
        None
    }
}

// ===== Rendering =====

/// Display width of one column: widest of header, index label, and
/// visible cells, clamped to a readable range.
pub fn column_widths(state: &AppState) -> Vec<u16> {
    let columns = state.table().columns();
    let mut widths: Vec<u16> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let index_label_width = format!("(COL{i})").width();
            name.width().max(index_label_width) as u16
        })
        .collect();

    for row in state.table().visible_rows() {
        for (i, width) in widths.iter_mut().enumerate() {
            if let Some(cell) = row.cell_text(i) {
                *width = (*width).max(cell.width() as u16);
            }
        }
    }

    widths
        .into_iter()
        .map(|w| w.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH))
        .collect()
}

/// Render the table and report its on-screen geometry.
pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    styles: &OutcomeStyles,
) -> TableGeometry {
    let block = Block::default().borders(Borders::ALL).title("Results");
    let inner = block.inner(area);

    let widths = column_widths(state);
    let index_visible = state.index_header_visible();

    let header_height: u16 = if index_visible { 2 } else { 1 };
    let header = build_header(state, styles, index_visible);

    let viewport_rows = inner.height.saturating_sub(header_height) as usize;
    let rows = state
        .table()
        .display_order()
        .iter()
        .skip(state.scroll.offset)
        .take(viewport_rows)
        .map(|&i| {
            let row = &state.table().rows()[i];
            Row::new(row.cells.iter().map(|c| Cell::from(c.as_str())))
                .style(styles.style_for_row(row))
        });

    let constraints: Vec<Constraint> = widths.iter().map(|&w| Constraint::Length(w)).collect();
    let table = Table::new(rows, constraints)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(block);
    frame.render_widget(table, area);

    TableGeometry {
        inner,
        widths,
        index_header_y: index_visible.then(|| inner.y + 1),
    }
}

fn build_header(state: &AppState, styles: &OutcomeStyles, index_visible: bool) -> Row<'static> {
    let cells: Vec<Cell> = state
        .table()
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut lines = vec![Line::styled(name.clone(), styles.header())];
            if index_visible {
                lines.push(Line::styled(format!("(COL{i})"), styles.index_header()));
            }
            Cell::from(Text::from(lines))
        })
        .collect();

    Row::new(cells).height(if index_visible { 2 } else { 1 })
}

// ===== Tests =====
