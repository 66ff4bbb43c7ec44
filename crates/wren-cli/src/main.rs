//! Wren CLI Application
//!
//! Command-line interface for the Wren personal task assistant.

mod args;
mod cli;
mod renderer;

use anyhow::{bail, Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::{Cli, StdinPicker};
use log::info;
use renderer::TerminalRenderer;
use wren_core::{Backend, BackendKind, Config, FileStore, TodoistClient, TodoistStore};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { config_file, no_color, command } = Args::parse();

    let config = Config::load(config_file.as_deref()).context("Failed to load configuration")?;
    let backend = build_backend(&config)?;
    let renderer = TerminalRenderer::new(!no_color);

    info!("Wren started");

    let cli = Cli::new(backend, renderer);
    match command {
        Some(Add { text }) => cli.add_task(text).await,
        Some(List { query }) => cli.list_tasks(query).await,
        Some(Show { name }) => cli.show_task(&name).await,
        Some(Done { name }) => cli.mark_done(&name).await,
        Some(Summary) => cli.summarize(&config).await,
        None => cli.list_tasks(None).await,
    }
}

fn build_backend(config: &Config) -> Result<Box<dyn Backend>> {
    match config.backend {
        BackendKind::Files => {
            let store = FileStore::new(config.notes_path(), config.done_path())
                .context("Failed to open the notes directory")?;
            Ok(Box::new(store))
        }
        BackendKind::Todoist => {
            if config.todoist_token.is_empty() {
                bail!("Todoist backend requires Todoist API Token");
            }
            let client = TodoistClient::new(&config.todoist_token)
                .context("Failed to create Todoist client")?;
            Ok(Box::new(TodoistStore::new(client, Box::new(StdinPicker))))
        }
    }
}
