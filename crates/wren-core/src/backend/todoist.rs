//! Todoist task store.
//!
//! Delegates everything to the Todoist REST v2 API: the service owns
//! scheduling and recurrence, so none of the filename schedule logic
//! applies here. Task creation asks the picker where the task should
//! land; the CLI supplies an interactive picker and tests supply a
//! fixed one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::backend::{Backend, Match};
use crate::display::{OperationStatus, TaskList};
use crate::error::{Result, WrenError};
use crate::names;

const REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_BASE_URL: &str = "https://api.todoist.com";

/// A Todoist project.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// A section within a Todoist project.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
}

/// An active Todoist task.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
struct CreateTaskRequest<'a> {
    content: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    section_id: Option<&'a str>,
}

/// Thin client over the Todoist REST v2 API.
#[derive(Debug, Clone)]
pub struct TodoistClient {
    client: Client,
    token: String,
    base_url: String,
}

impl TodoistClient {
    /// Creates a client authenticated with the given API token.
    ///
    /// # Errors
    ///
    /// Returns `WrenError::Http` if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| WrenError::http("failed to create HTTP client").with_source(e))?;
        Ok(Self {
            client,
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Points the client at a different server. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches all projects.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.get_json("/rest/v2/projects").await
    }

    /// Fetches the sections of a project.
    pub async fn sections(&self, project_id: &str) -> Result<Vec<Section>> {
        self.get_json(&format!("/rest/v2/sections?project_id={project_id}"))
            .await
    }

    /// Fetches all active tasks.
    pub async fn tasks(&self) -> Result<Vec<Task>> {
        self.get_json("/rest/v2/tasks").await
    }

    /// Fetches one task by id.
    pub async fn task(&self, id: &str) -> Result<Task> {
        self.get_json(&format!("/rest/v2/tasks/{id}")).await
    }

    /// Creates a task, optionally filed under a project and section.
    pub async fn create_task(
        &self,
        content: &str,
        description: &str,
        project_id: Option<&str>,
        section_id: Option<&str>,
    ) -> Result<Task> {
        let url = format!("{}/rest/v2/tasks", self.base_url);
        let request = CreateTaskRequest {
            content,
            description,
            project_id,
            section_id,
        };
        log::debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| WrenError::http(format!("request to {url} failed")).with_source(e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WrenError::api(status.as_u16(), body));
        }
        response
            .json()
            .await
            .map_err(|e| WrenError::http("failed to parse Todoist response").with_source(e))
    }

    /// Closes (completes) a task.
    pub async fn close_task(&self, id: &str) -> Result<()> {
        let url = format!("{}/rest/v2/tasks/{id}/close", self.base_url);
        log::debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| WrenError::http(format!("request to {url} failed")).with_source(e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WrenError::api(status.as_u16(), body));
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| WrenError::http(format!("request to {url} failed")).with_source(e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WrenError::api(status.as_u16(), body));
        }
        response
            .json()
            .await
            .map_err(|e| WrenError::http("failed to parse Todoist response").with_source(e))
    }
}

/// Chooses where a newly created task is filed.
///
/// Splitting this out keeps the store free of terminal I/O: the CLI
/// prompts the user with numbered lists, while tests return fixed
/// positions.
pub trait ProjectPicker: Send + Sync {
    /// Picks a project from a non-empty slice, returning its index.
    fn pick_project(&self, projects: &[Project]) -> Result<usize>;

    /// Picks a section from a non-empty slice, returning its index.
    fn pick_section(&self, sections: &[Section]) -> Result<usize>;
}

/// Todoist-backed task store.
pub struct TodoistStore {
    client: TodoistClient,
    picker: Box<dyn ProjectPicker>,
}

impl TodoistStore {
    /// Wraps a client and a picker into a store.
    pub fn new(client: TodoistClient, picker: Box<dyn ProjectPicker>) -> Self {
        Self { client, picker }
    }

    async fn find_task(&self, name: &str) -> Result<Match<Task>> {
        let needle = name.to_lowercase();
        let matching: Vec<Task> = self
            .client
            .tasks()
            .await?
            .into_iter()
            .filter(|t| t.content.to_lowercase().contains(&needle))
            .collect();
        Ok(Match::from_candidates(matching))
    }
}

#[async_trait]
impl Backend for TodoistStore {
    async fn create_task(&self, content: &str) -> Result<String> {
        let name = names::task_name_from_content(content)?;
        let body = names::task_body(content);

        let projects = self.client.projects().await?;
        let (project_id, section_id) = if projects.is_empty() {
            (None, None)
        } else {
            let index = self.picker.pick_project(&projects)?;
            let project = projects.get(index).ok_or_else(|| {
                WrenError::invalid_input("selection").with_reason("no project at that position")
            })?;
            let sections = self.client.sections(&project.id).await?;
            let section_id = if sections.is_empty() {
                None
            } else {
                let index = self.picker.pick_section(&sections)?;
                let section = sections.get(index).ok_or_else(|| {
                    WrenError::invalid_input("selection")
                        .with_reason("no section at that position")
                })?;
                Some(section.id.clone())
            };
            (Some(project.id.clone()), section_id)
        };

        self.client
            .create_task(&name, body, project_id.as_deref(), section_id.as_deref())
            .await?;
        Ok(name)
    }

    async fn list_tasks(&self, query: &str) -> Result<TaskList> {
        let needle = query.to_lowercase();
        let names = self
            .client
            .tasks()
            .await?
            .into_iter()
            .filter(|t| t.content.to_lowercase().contains(&needle))
            .map(|t| t.content)
            .collect();
        Ok(TaskList(names))
    }

    async fn task_content(&self, name: &str) -> Result<String> {
        match self.find_task(name).await? {
            Match::One(found) => {
                let task = self.client.task(&found.id).await?;
                Ok(task.description)
            }
            Match::None => Ok(format!("Error: No matching task for '{name}' found.")),
            Match::Many => Ok("Error: Multiple matching tasks found.".to_string()),
        }
    }

    async fn mark_done(&self, name: &str) -> Result<OperationStatus> {
        match self.find_task(name).await? {
            Match::One(task) => {
                self.client.close_task(&task.id).await?;
                Ok(OperationStatus::success(format!(
                    "marked \"{}\" as done",
                    task.content
                )))
            }
            Match::None => Ok(OperationStatus::failure(format!(
                "Error: No matching task for '{name}' found."
            ))),
            Match::Many => Ok(OperationStatus::failure(
                "Error: Multiple matching tasks found.".to_string(),
            )),
        }
    }
}
