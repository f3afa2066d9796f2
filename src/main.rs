//! ontoctl application entry point
//!
//! Runs the interactive console by default, or one of the one-shot
//! subcommands for scripting.
//!
//! # Usage
//!
//! ```bash
//! # Open the console (default command)
//! ontoctl
//!
//! # Browse versions
//! ontoctl list -s pizza
//! ontoctl show 7 --source
//!
//! # Manage versions
//! ontoctl create -n "Pizza v2" pizza.owl
//! ontoctl update 7 -d "adds toppings"
//! ontoctl delete 7 -y
//!
//! # Visualize and download
//! ontoctl validate pizza.owl --tree --csv table.csv
//! ontoctl download 7 -o ./exports
//!
//! # Quiet mode (only output results)
//! ontoctl -q list
//! ```
//!
//! # Configuration
//!
//! On first run, ontoctl prompts for the service URL. Configuration is stored
//! in the user's config directory (`~/.config/ontoctl/config.toml` on Linux).

use clap::CommandFactory;
use colored::Colorize;
use ontoctl::{
    OntoError, Result,
    api::HttpRepository,
    cli::{Cli, Commands},
    commands::{self, Context, validate::Exports},
    config::OntoConfig,
    console::{Console, notifying},
    logging::{LogConfig, default_log_file, init_logging},
    notify::{SharedNotifier, StatusBarNotifier, StdoutNotifier},
    tui,
};
use std::io::IsTerminal;
use std::sync::Arc;

fn load_config(cli: &Cli) -> Result<OntoConfig> {
    let interactive = cli.api_url.is_none()
        && std::env::var_os("ONTOCTL_API_URL").is_none()
        && std::io::stdin().is_terminal();
    let mut config = OntoConfig::load_or_setup(interactive)?;
    if let Some(url) = &cli.api_url {
        config.api_url.clone_from(url);
    }
    Ok(config)
}

fn setup_logging(cli: &Cli, command: &Commands) {
    let log_file = match command {
        Commands::Console => cli.log_file.clone().or_else(default_log_file),
        _ => cli.log_file.clone(),
    };
    let log_config = LogConfig::from_verbosity(cli.verbose).with_log_file(log_file);
    if let Err(e) = init_logging(&log_config) {
        eprintln!("{} Failed to initialize logging: {e}", "⚠️".yellow());
    }
}

fn connect(config: &OntoConfig) -> Result<HttpRepository> {
    HttpRepository::new(&config.api_url, config.timeout())
        .map_err(|e| OntoError::InvalidInput(format!("Bad service URL '{}': {e}", config.api_url)))
}

fn handle_console(config: &OntoConfig) -> Result<()> {
    let http = connect(config)?;
    let status = Arc::new(StatusBarNotifier::new());
    let console = Console::threaded(Arc::new(http), status.clone())?
        .with_download_dir(config.download_dir());
    tui::run(console, &status, config)?;
    Ok(())
}

fn run(cli: &Cli, command: Commands) -> Result<()> {
    // Config commands work even when the service is unreachable
    if let Commands::Config(sub) = &command {
        return commands::config::execute(sub, cli.quiet);
    }
    if let Commands::Completions { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(cli)?;
    if command == Commands::Console {
        return handle_console(&config);
    }

    let quiet = cli.quiet || config.quiet;
    let notifier: SharedNotifier = if quiet {
        Arc::new(StdoutNotifier::quiet())
    } else {
        Arc::new(StdoutNotifier::new())
    };
    let http = connect(&config)?;
    let ctx = Context {
        repo: notifying(Arc::new(http), notifier.clone()),
        notifier,
        config,
        quiet,
    };

    match command {
        Commands::List { search, page, all } => commands::list(&ctx, &search, page, all),
        Commands::Show { id, source } => commands::show(&ctx, id, source),
        Commands::Create {
            name,
            description,
            file,
        } => commands::create(&ctx, name.as_deref(), &description, &file),
        Commands::Update {
            id,
            name,
            description,
            file,
        } => commands::update(
            &ctx,
            id,
            name.as_deref(),
            description.as_deref(),
            file.as_deref(),
        ),
        Commands::Delete { id, yes } => commands::delete(&ctx, id, yes),
        Commands::Validate {
            file,
            tree,
            table,
            csv,
            graph,
        } => {
            let exports = Exports {
                tree,
                table,
                csv,
                graph,
            };
            commands::validate(&ctx, &file, &exports)
        }
        Commands::Download { id, output } => commands::download(&ctx, id, output.as_deref()),
        Commands::Console | Commands::Config(_) | Commands::Completions { .. } => Ok(()),
    }
}

/// Main entry point
///
/// Parses arguments, loads configuration and dispatches to the command
/// handler. Service failures have already been reported by the notifier,
/// so only the exit code is set for them.
fn main() {
    let cli = Cli::parse_args();
    let command = cli.get_command();
    setup_logging(&cli, &command);

    match run(&cli, command) {
        Ok(()) => {}
        Err(OntoError::Api(_)) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {e}", "❌".red());
            std::process::exit(1);
        }
    }
}
