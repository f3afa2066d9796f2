//! Interactive ratatui console
//!
//! The console keeps drawing while service calls run on the worker thread;
//! each tick applies whatever outcomes have arrived.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   keys    ┌──────────┐  Action  ┌──────────────┐
//! │  Crossterm   │ ────────▶ │  events  │ ───────▶ │     app      │
//! └──────────────┘           └──────────┘          └──────┬───────┘
//!                                                         │ calls
//!                                                         ▼
//!                                  ┌────────────┐   ┌──────────────┐
//!                                  │  widgets   │◀──│   Console    │
//!                                  └────────────┘   └──────────────┘
//! ```

mod app;
mod events;
mod highlight;
mod state;
mod theme;
pub mod widgets;

pub use app::run;
pub use events::Action;
pub use state::{InputPurpose, Mode, UiState};
pub use theme::Theme;

use thiserror::Error;

/// Errors that can occur in console operations
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal setup, drawing or event polling failed
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The external editor could not be run
    #[error("Editor failed: {0}")]
    Editor(String),

    /// The clipboard is not available
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    /// The browser could not be opened
    #[error("Could not open browser: {0}")]
    Browser(String),
}

/// Result type for console operations
pub type Result<T> = std::result::Result<T, UiError>;
