//! Config command - inspect and change settings

use crate::cli::{ConfigCommands, parse_setting};
use crate::config::OntoConfig;
use crate::{OntoError, Result};

/// Execute a config subcommand
///
/// # Errors
///
/// Returns an error for unknown keys, invalid values, or when the file
/// cannot be read or written.
pub fn execute(command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = OntoConfig::load()?;
            let text = toml::to_string_pretty(&config)
                .map_err(|e| OntoError::InvalidInput(format!("Failed to render config: {e}")))?;
            print!("{text}");
        }
        ConfigCommands::Get { key } => {
            let config = OntoConfig::load()?;
            let value = config
                .get(key)
                .ok_or_else(|| OntoError::InvalidInput(format!("Unknown key '{key}'")))?;
            println!("{value}");
        }
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting).map_err(OntoError::InvalidInput)?;
            let mut config = OntoConfig::load()?;
            config.set(key, value)?;
            config.save()?;
            if !quiet {
                println!("Set {key} = {value}");
            }
        }
        ConfigCommands::Path => println!("{}", OntoConfig::config_path()?.display()),
    }
    Ok(())
}
