//! Interactive setup wizard for first-time configuration

use super::OntoConfig;
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::{Path, PathBuf};

/// Interactive first-time setup - prompts for the service URL and download directory
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read or the configuration
/// cannot be saved.
pub fn first_time_setup(path: &Path) -> Result<OntoConfig, ConfigError> {
    println!("Welcome to ontoctl! Let's connect to your ontology service.\n");

    let defaults = OntoConfig::default();

    let api_url: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Service URL")
        .default(defaults.api_url.clone())
        .validate_with(|input: &String| -> Result<(), String> {
            if input.starts_with("http://") || input.starts_with("https://") {
                Ok(())
            } else {
                Err("URL must start with http:// or https://".to_string())
            }
        })
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let download_dir: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Download directory")
        .default(defaults.download_dir().to_string_lossy().to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let config = OntoConfig {
        api_url,
        download_dir: Some(PathBuf::from(download_dir)),
        ..defaults
    };
    config.save_to(path)?;

    println!("\nConfiguration saved to {}", path.display());
    Ok(config)
}
