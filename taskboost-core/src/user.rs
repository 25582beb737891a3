//! Team members who can be assigned tasks.

use serde::{Deserialize, Serialize};

/// A team member.
///
/// `completed_tasks` and `total_reward` are ledger totals maintained outside
/// the task list; completing a task in a session does not change them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub completed_tasks: u32,
    pub total_reward: u32,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: "/placeholder.svg".to_string(),
            email: String::new(),
            role: String::new(),
            department: String::new(),
            completed_tasks: 0,
            total_reward: 0,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_ledger(mut self, completed_tasks: u32, total_reward: u32) -> Self {
        self.completed_tasks = completed_tasks;
        self.total_reward = total_reward;
        self
    }
}
