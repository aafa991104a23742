//! Results Table Viewer (rtv)
//!
//! TUI application for filtering and inspecting test-result tables
//! produced by a test runner in CSV form.
//!
//! This is the library root. The crate follows a Pure Core / Impure
//! Shell architecture: `model` and `table` are pure and terminal-free,
//! `view` owns the terminal.

pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod table;
pub mod view;
