//! ontoctl - A management console for versioned ontology documents
//!
//! This library talks to an ontology version service over REST and keeps
//! three pieces of client state consistent with it: the paginated version
//! list, the single editable draft, and the orchestration rules that tie
//! them together after every create, save, delete or search.

use thiserror::Error;

pub mod api;
pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod draft;
pub mod list;
pub mod logging;
pub mod notify;
pub mod output;
pub mod tui;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum OntoError {
    /// Remote service error
    #[error("{0}")]
    Api(#[from] api::ApiError),
    /// Draft precondition failure
    #[error("{0}")]
    Draft(#[from] draft::DraftError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Archive packaging error
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    /// Console UI error
    #[error("UI error: {0}")]
    Ui(#[from] tui::UiError),
    /// Table export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, OntoError>;
