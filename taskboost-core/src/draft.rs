//! Add-task form contents and their presence checks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TaskError;
use crate::task::{DATE_FORMAT, DEFAULT_REWARD, Task, TaskStatus};

/// What the add-task form collects before a task exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub department: String,
    pub due_date: Option<NaiveDate>,
    /// `None` falls back to the default reward.
    pub reward: Option<u32>,
}

impl TaskDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn assigned_to(mut self, user_id: impl Into<String>) -> Self {
        self.assigned_to = user_id.into();
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn reward(mut self, reward: u32) -> Self {
        self.reward = Some(reward);
        self
    }

    /// True when every required field has a value.
    ///
    /// Text fields are trimmed first, so a whitespace-only title counts as
    /// missing. [`TaskDraft::validate`] stores the trimmed values too.
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.description, &self.assigned_to, &self.department]
            .iter()
            .all(|s| !s.trim().is_empty())
            && self.due_date.is_some()
    }

    /// Check required fields and build an `open` task with a fresh id.
    pub fn validate(&self) -> Result<Task, TaskError> {
        self.validate_with_default(DEFAULT_REWARD)
    }

    pub fn validate_with_default(&self, default_reward: u32) -> Result<Task, TaskError> {
        let Some(due) = self.due_date.filter(|_| self.is_complete()) else {
            return Err(TaskError::MissingInformation);
        };

        Ok(Task {
            id: Uuid::new_v4().to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            status: TaskStatus::Open,
            due_date: due.format(DATE_FORMAT).to_string(),
            assigned_to: self.assigned_to.trim().to_string(),
            department: self.department.trim().to_string(),
            reward: self.reward.unwrap_or(default_reward),
            completed_on: None,
        })
    }
}

/// Parse a `YYYY-MM-DD` date typed by the user.
pub fn parse_date(s: &str) -> Result<NaiveDate, TaskError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| TaskError::InvalidDate(s.trim().to_string()))
}
