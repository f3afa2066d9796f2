//! Command implementations
//!
//! Each command is a function that takes parsed CLI args and runs the
//! operation against the version service. Service failures have already
//! been reported through the notifier by the time they are returned.

pub mod config;
pub mod download;
pub mod edit;
pub mod validate;
pub mod versions;

use crate::api::VersionRepository;
use crate::config::OntoConfig;
use crate::notify::SharedNotifier;
use std::sync::Arc;

pub use download::execute as download;
pub use edit::{create, delete, update};
pub use validate::execute as validate;
pub use versions::{list, show};

/// Everything a command needs
pub struct Context {
    /// Repository that reports each call's outcome to `notifier`
    pub repo: Arc<dyn VersionRepository>,
    pub notifier: SharedNotifier,
    pub config: OntoConfig,
    pub quiet: bool,
}
