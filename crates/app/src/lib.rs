//! This crate provides the command surface of the `upskill` application: argument
//! parsing, configuration file loading, and the command handlers that drive the
//! recommendation engine in `upskill-intelligence`.
//!
//! The main entry point is the `run` function. Logs go to stderr (filtered by
//! `RUST_LOG`) so that JSON output on stdout stays machine-readable.

mod cli;
mod commands;
pub mod config;

pub use cli::{Cli, Commands, EmployeeAction, OutputFormat};

use anyhow::Result;
use clap::Parser;
use commands::Settings;

/// Parse the command line and execute the selected command.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match config::load_config() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(
                target: "upskill::config",
                error = %format!("{e:#}"),
                "ignoring unreadable configuration file"
            );
            config::Config::default()
        }
    };
    config::apply_config_to_env(&config);

    let cli = Cli::parse();
    let settings = Settings::from_env(cli.data_dir, config.scoring.weights());
    dispatch(cli.command, &settings)
}

fn dispatch(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Recommend {
            employee,
            occupation,
            top_k,
            format,
            dedupe,
        } => commands::handle_recommend_command(
            settings,
            employee,
            occupation,
            top_k,
            format,
            dedupe,
        ),
        Commands::Gap {
            employee,
            occupation,
            format,
        } => commands::handle_gap_command(settings, employee, occupation, format),
        Commands::Employees { action } => match action {
            EmployeeAction::List { format } => {
                commands::handle_employee_list_command(settings, format)
            }
            EmployeeAction::Add { name, skills } => {
                commands::handle_employee_add_command(settings, name, skills)
            }
            EmployeeAction::Remove { id } => commands::handle_employee_remove_command(settings, id),
        },
        Commands::Occupations { format } => commands::handle_occupations_command(settings, format),
        Commands::Skills { format } => commands::handle_skills_command(settings, format),
    }
}
