use archpm::model::RecordId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "archpm", bin_name = "archpm", version)]
#[command(
    about = "Contacts and projects for an architecture practice",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub db: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage contacts
    Contacts {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Start the interactive session (default)
    Session,

    /// Show or change configuration
    Config {
        /// Key to show or set (database, confirm-delete)
        key: Option<String>,
        /// New value
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RecordAction {
    /// List every record
    List,

    /// Show one record
    Show { id: RecordId },

    /// Add a record
    Add {
        /// Field value, e.g. --set first_name=Dana (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Do not open the form in $EDITOR
        #[arg(long)]
        no_editor: bool,
    },

    /// Edit a record
    Edit {
        id: RecordId,

        /// Field value, e.g. --set phone=050-1234567 (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Do not open the form in $EDITOR
        #[arg(long)]
        no_editor: bool,
    },

    /// Delete a record
    Delete {
        id: RecordId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print every record as JSON
    Export,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{}'", s)),
    }
}
