use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Command-line interface for the `upskill` application.
#[derive(Debug, Parser)]
#[command(
    name = "upskill",
    about = "Find courses that close the gap between an employee's skills and a target occupation"
)]
pub struct Cli {
    /// Skill-graph data directory (overrides `UPSKILL_DATA_DIR`).
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available `upskill` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Recommends courses for an employee aiming at an occupation.
    Recommend {
        /// Employee id.
        #[arg(long)]
        employee: String,
        /// Target occupation URI.
        #[arg(long)]
        occupation: String,
        /// Number of courses to return (overrides `UPSKILL_TOP_K`).
        #[arg(long, value_name = "N")]
        top_k: Option<usize>,
        /// Output format: text or json.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Drop courses already returned for an earlier skill.
        #[arg(long, default_value_t = false)]
        dedupe: bool,
    },
    /// Shows the skills an employee is missing for an occupation.
    Gap {
        /// Employee id.
        #[arg(long)]
        employee: String,
        /// Target occupation URI.
        #[arg(long)]
        occupation: String,
        /// Output format: text or json.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Manages the employee roster.
    Employees {
        #[command(subcommand)]
        action: EmployeeAction,
    },
    /// Lists known occupations.
    Occupations {
        /// Output format: text or json.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Lists known skills.
    Skills {
        /// Output format: text or json.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Roster operations.
#[derive(Debug, Subcommand)]
pub enum EmployeeAction {
    /// Lists employees.
    List {
        /// Output format: text or json.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Adds an employee and prints the generated id.
    Add {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Skill URI held by the employee (repeatable).
        #[arg(long = "skill", value_name = "URI", required = true)]
        skills: Vec<String>,
    },
    /// Removes an employee by id.
    Remove {
        /// Employee id.
        id: String,
    },
}
