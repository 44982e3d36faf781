use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::task::{Task, TaskPriority, TaskStatus};
use super::validate::{check, length, min_length, positive};
use crate::errors::AppResult;

// Shared by register and login; both take the same body.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> AppResult<()> {
        check(vec![
            length("username", &self.username, 2, 30),
            length("password", &self.password, 8, 128),
        ])
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: DateTime<Utc>,
}

impl CreateTaskRequest {
    pub fn validate(&self) -> AppResult<()> {
        check(vec![
            min_length("title", &self.title, 2),
            min_length("description", &self.description, 2),
        ])
    }
}

// Partial patch; only the fields listed here can ever be updated, so a stray
// userId or id in the request body is dropped at deserialization.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> AppResult<()> {
        check(vec![
            self.title
                .as_deref()
                .and_then(|title| min_length("title", title, 2)),
            self.description
                .as_deref()
                .and_then(|description| min_length("description", description, 2)),
        ])
    }

    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl ListTasksQuery {
    pub fn validate(&self) -> AppResult<()> {
        check(vec![
            positive("page", self.page),
            positive("limit", self.limit),
        ])
    }
}

#[derive(Debug, Deserialize)]
pub struct FilterTasksQuery {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl FilterTasksQuery {
    pub fn validate(&self) -> AppResult<()> {
        check(vec![
            positive("page", self.page),
            positive("limit", self.limit),
        ])
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchTasksQuery {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl SearchTasksQuery {
    pub fn validate(&self) -> AppResult<()> {
        check(vec![
            positive("page", self.page),
            positive("limit", self.limit),
        ])
    }
}
