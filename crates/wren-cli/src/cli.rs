//! Command handlers bridging parsed arguments to wren-core operations.
//!
//! Each handler calls one backend capability and renders the returned
//! display wrapper. Lookup misses and ambiguity arrive as ordinary
//! values with user-facing wording, so handlers print them and exit
//! cleanly; only real failures (I/O, network, configuration) propagate
//! as errors.

use std::io::{BufRead, Read, Write};

use anyhow::{Context, Result};
use log::info;
use wren_core::backend::todoist::{Project, ProjectPicker, Section};
use wren_core::{
    default_messages_path, Backend, Config, CreatedTask, OpenAiClient, Summarizer, Transcript,
};

use crate::renderer::TerminalRenderer;

/// CLI command dispatcher holding the selected backend and renderer.
pub struct Cli {
    backend: Box<dyn Backend>,
    renderer: TerminalRenderer,
}

impl Cli {
    /// Create a new CLI handler
    pub fn new(backend: Box<dyn Backend>, renderer: TerminalRenderer) -> Self {
        Self { backend, renderer }
    }

    /// Adds a task from the command line words, or from stdin when no
    /// words were given.
    pub async fn add_task(&self, text: Vec<String>) -> Result<()> {
        let content = if text.is_empty() {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read task content from stdin")?;
            buffer
        } else {
            text.join(" ")
        };
        let name = self
            .backend
            .create_task(&content)
            .await
            .context("Failed to create task")?;
        info!("created task {name}");
        self.renderer.render(&CreatedTask::new(name).to_string())
    }

    /// Lists pending tasks, optionally filtered by a substring query.
    pub async fn list_tasks(&self, query: Option<String>) -> Result<()> {
        let tasks = self
            .backend
            .list_tasks(query.as_deref().unwrap_or(""))
            .await
            .context("Failed to list tasks")?;
        self.renderer.render(&tasks.to_string())
    }

    /// Shows the content of the task matching `name`.
    pub async fn show_task(&self, name: &str) -> Result<()> {
        let content = self
            .backend
            .task_content(name)
            .await
            .context("Failed to read task")?;
        self.renderer.render(&content)
    }

    /// Marks the task matching `name` as done.
    pub async fn mark_done(&self, name: &str) -> Result<()> {
        let status = self
            .backend
            .mark_done(name)
            .await
            .context("Failed to mark task as done")?;
        info!("mark done: {}", status.message);
        self.renderer.render(&status.to_string())
    }

    /// Runs a language-model summary of the pending tasks.
    pub async fn summarize(&self, config: &Config) -> Result<()> {
        let client = OpenAiClient::new(&config.openai_token, &config.openai_model)?;
        let transcript = Transcript::new(default_messages_path()?);
        let summarizer = Summarizer::new(client, transcript, &config.about_user);
        let summary = summarizer
            .summarize(self.backend.as_ref())
            .await
            .context("Summary request failed")?;
        self.renderer.render(&summary)
    }
}

/// Interactive picker prompting on the terminal with numbered lists,
/// matching how task filing has always worked: show the options, read a
/// 1-based choice.
pub struct StdinPicker;

impl StdinPicker {
    fn prompt(&self, label: &str, names: &[&str]) -> wren_core::Result<usize> {
        for (index, name) in names.iter().enumerate() {
            println!("{}: {name}", index + 1);
        }
        print!("Select a {label}: ");
        std::io::stdout().flush().map_err(to_input_error(label))?;
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(to_input_error(label))?;
        let choice: usize = line.trim().parse().map_err(|_| {
            wren_core::WrenError::invalid_input(label).with_reason("expected a number from the list")
        })?;
        if choice == 0 || choice > names.len() {
            return Err(wren_core::WrenError::invalid_input(label)
                .with_reason("selection is not on the list"));
        }
        Ok(choice - 1)
    }
}

fn to_input_error(label: &str) -> impl Fn(std::io::Error) -> wren_core::WrenError + '_ {
    move |e| wren_core::WrenError::invalid_input(label).with_reason(e.to_string())
}

impl ProjectPicker for StdinPicker {
    fn pick_project(&self, projects: &[Project]) -> wren_core::Result<usize> {
        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        self.prompt("project", &names)
    }

    fn pick_section(&self, sections: &[Section]) -> wren_core::Result<usize> {
        let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        self.prompt("section", &names)
    }
}
