use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Main command-line interface for the Wren task assistant
///
/// Wren is a personal task tracker that keeps each task as a plain file
/// in your notes directory (or as an item in Todoist). Task filenames can
/// carry a schedule prefix: a date (`2024-01-10 Renew passport`) or a
/// five-field cron expression (`0 9 * * * Water plants`), and listings
/// only show tasks that are currently due.
#[derive(Parser)]
#[command(version, about, name = "wren")]
pub struct Args {
    /// Path to the configuration file. Defaults to
    /// $XDG_CONFIG_HOME/wren/wren.json
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Wren CLI
///
/// Running `wren` with no subcommand lists the pending tasks.
#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task; reads from stdin when no words are given
    #[command(alias = "a")]
    Add {
        /// Task text; the first line becomes the task name
        text: Vec<String>,
    },
    /// List pending tasks
    #[command(aliases = ["l", "ls"])]
    List {
        /// Only show tasks whose stored name contains this substring
        query: Option<String>,
    },
    /// Show a task's content, found by substring
    #[command(alias = "s")]
    Show {
        /// Substring of the task name
        name: String,
    },
    /// Mark a task as done, found by substring
    #[command(alias = "d")]
    Done {
        /// Substring of the task name
        name: String,
    },
    /// Summarize pending tasks with the configured language model
    Summary,
}
