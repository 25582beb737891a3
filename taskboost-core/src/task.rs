//! Task model for the rewards dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TaskError;

/// Date format used for due dates and completion dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reward assigned to a task when the creator leaves it blank.
pub const DEFAULT_REWARD: u32 = 50;

/// Lifecycle stage of a task.
///
/// ```text
/// open → in-progress → completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Open,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::Open, Self::InProgress, Self::Completed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// The forward step a user can take from this status, if any.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Open => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            Self::Completed => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in-progress" | "in_progress" | "inprogress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(TaskError::UnknownStatus(s.trim().to_string())),
        }
    }
}

/// A unit of work with a reward attached.
///
/// `due_date` keeps the calendar date as it was entered (`YYYY-MM-DD`); seeded
/// data is not guaranteed to parse, so readers go through [`Task::due`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: String,
    pub assigned_to: String,
    pub department: String,
    pub reward: u32,

    /// Set only while `status == Completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<NaiveDate>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Open,
            due_date: String::new(),
            assigned_to: String::new(),
            department: String::new(),
            reward: DEFAULT_REWARD,
            completed_on: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }

    pub fn with_assignee(mut self, user_id: impl Into<String>) -> Self {
        self.assigned_to = user_id.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_reward(mut self, reward: u32) -> Self {
        self.reward = reward;
        self
    }

    /// Mark the task completed on the given day.
    pub fn completed(mut self, on: NaiveDate) -> Self {
        self.status = TaskStatus::Completed;
        self.completed_on = Some(on);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Parsed due date, `None` when the stored value is not a calendar date.
    pub fn due(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.due_date.trim(), DATE_FORMAT).ok()
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Copy of this task moved to `status`, keeping `completed_on` consistent.
    pub fn transitioned(&self, status: TaskStatus, today: NaiveDate) -> Self {
        Self {
            status,
            completed_on: (status == TaskStatus::Completed).then_some(today),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_serializes_with_dashes() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let back: TaskStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(back, TaskStatus::Completed);
    }

    #[test]
    fn status_parses_cli_spellings() {
        assert_eq!("In-Progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!("in_progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!(
            " done ".parse::<TaskStatus>(),
            Err(TaskError::UnknownStatus("done".into()))
        );
    }

    #[test]
    fn next_only_moves_forward() {
        assert_eq!(TaskStatus::Open.next(), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::InProgress.next(), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::Completed.next(), None);
    }

    #[test]
    fn transitioned_keeps_completion_date_consistent() {
        let today = day(2025, 4, 20);
        let t = Task::new("t1", "write docs").with_status(TaskStatus::InProgress);

        let done = t.transitioned(TaskStatus::Completed, today);
        assert_eq!(done.completed_on, Some(today));

        let reopened = done.transitioned(TaskStatus::Open, today);
        assert_eq!(reopened.completed_on, None);
        assert_eq!(reopened.title, "write docs");
    }

    #[test]
    fn due_tolerates_garbage() {
        let t = Task::new("t1", "x").with_due_date("2025-05-01");
        assert_eq!(t.due(), Some(day(2025, 5, 1)));

        let bad = Task::new("t2", "x").with_due_date("next tuesday");
        assert_eq!(bad.due(), None);
    }

    #[test]
    fn task_json_uses_dashboard_field_names() {
        let t = Task::new("6", "Prepare financial report")
            .with_due_date("2025-04-10")
            .with_assignee("4")
            .completed(day(2025, 4, 8));
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["assignedTo"], "4");
        assert_eq!(v["dueDate"], "2025-04-10");
        assert_eq!(v["completedOn"], "2025-04-08");

        let open = Task::new("1", "y");
        let v = serde_json::to_value(&open).unwrap();
        assert!(v.get("completedOn").is_none());
    }
}
