//! TUI rendering and terminal management (impure shell)

mod help;
mod status;
mod styles;
mod summary;
mod table;

pub use help::render_help_overlay;
pub use status::{controls_line, render_status, STATUS_HEIGHT};
pub use styles::{ColorConfig, OutcomeStyles};
pub use summary::{panel_height, render_summary};
pub use table::{column_widths, render_table, TableGeometry};

use crate::state::{AppState, InputFocus};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::layout::{Constraint, Layout};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::debug;

/// Scroll step for a mouse wheel tick.
const WHEEL_SCROLL: usize = 3;
/// Scroll step for PageUp/PageDown.
const PAGE_SCROLL: usize = 10;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    state: AppState,
    styles: OutcomeStyles,
    /// Last rendered table geometry (for mouse click detection)
    last_geometry: TableGeometry,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up the terminal in raw mode with alternate screen and
    /// mouse capture.
    pub fn new(state: AppState, color: ColorConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self::with_terminal(terminal, state, color))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (q or Ctrl+C). The table is static,
    /// so the loop blocks on input and redraws only after events.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    if self.handle_key(key) {
                        return Ok(());
                    }
                    self.draw()?;
                }
                Event::Mouse(mouse) => {
                    self.handle_mouse(mouse);
                    self.draw()?;
                }
                Event::Resize(_, _) => {
                    self.draw()?;
                }
                _ => {}
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Wrap an existing terminal (used by tests with TestBackend).
    pub fn with_terminal(terminal: Terminal<B>, state: AppState, color: ColorConfig) -> Self {
        Self {
            terminal,
            state,
            styles: OutcomeStyles::with_color_config(color),
            last_geometry: TableGeometry::default(),
        }
    }

    /// The application state (exposed for tests).
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Render one frame: summary, table, status bar.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.state;
        let styles = &self.styles;
        let mut geometry = TableGeometry::default();

        self.terminal.draw(|frame| {
            let [summary_area, table_area, status_area] = Layout::vertical([
                Constraint::Length(summary::panel_height(state.summary())),
                Constraint::Min(3),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .areas(frame.area());

            summary::render_summary(frame, summary_area, state.summary());
            geometry = render_table(frame, table_area, state, styles);
            render_status(frame, status_area, state);

            if state.help_visible {
                render_help_overlay(frame, frame.area());
            }
        })?;

        self.last_geometry = geometry;
        Ok(())
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, regardless of focus.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.state.help_visible {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.state.help_visible = false;
            }
            return false;
        }

        match self.state.focus {
            InputFocus::Query => self.handle_query_key(key),
            InputFocus::Table => return self.handle_table_key(key),
        }
        false
    }

    fn handle_query_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.state.focus = InputFocus::Table;
            }
            KeyCode::Backspace => self.state.pop_query_char(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.clear_query();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.push_query_char(c);
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> bool {
        let max_scroll = self.state.table().visible_count().saturating_sub(1);
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('/') => {
                self.state.status_message = None;
                self.state.focus = InputFocus::Query;
            }
            KeyCode::Char('m') => self.state.cycle_mode(true),
            KeyCode::Char('M') => self.state.cycle_mode(false),
            KeyCode::Char('x') => self.state.toggle_exclude(),
            KeyCode::Char('r') => self.state.toggle_regex(),
            KeyCode::Char('c') => self.state.cycle_search_column(true),
            KeyCode::Char('C') => self.state.cycle_search_column(false),
            KeyCode::Char('t') => self.state.toggle_sort_by_time(),
            KeyCode::Char('d') => self.state.export(),
            KeyCode::Char('?') => self.state.help_visible = true,
            KeyCode::Esc => self.state.status_message = None,
            KeyCode::Up => self.state.scroll.scroll_up(1),
            KeyCode::Down => self.state.scroll.scroll_down(1, max_scroll),
            KeyCode::PageUp => self.state.scroll.scroll_up(PAGE_SCROLL),
            KeyCode::PageDown => self.state.scroll.scroll_down(PAGE_SCROLL, max_scroll),
            KeyCode::Home => self.state.scroll.scroll_up(usize::MAX),
            KeyCode::End => self.state.scroll.scroll_down(usize::MAX, max_scroll),
            _ => {}
        }
        false
    }

    /// Handle a mouse event: wheel scrolling and index-header clicks.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let max_scroll = self.state.table().visible_count().saturating_sub(1);
        match mouse.kind {
            MouseEventKind::ScrollUp => self.state.scroll.scroll_up(WHEEL_SCROLL),
            MouseEventKind::ScrollDown => self.state.scroll.scroll_down(WHEEL_SCROLL, max_scroll),
            MouseEventKind::Down(_) => {
                if let Some(column) = self
                    .last_geometry
                    .hit_test_index_header(mouse.column, mouse.row)
                {
                    debug!(column, "index header clicked");
                    self.state.append_query_column_tag(column);
                }
            }
            _ => {}
        }
    }
}

/// Initialize the terminal, run the application, restore the terminal.
///
/// Logging must be initialized by the caller.
pub fn run_with_state(state: AppState, color: ColorConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(state, color)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and mouse capture, leaves the alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

// ===== Tests =====
