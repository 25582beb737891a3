//! Derived views over the current tasks and users.
//!
//! Everything here is a pure function of its inputs and is recomputed on every
//! change; nothing is cached between store writes.

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskStatus};
use crate::user::User;

/// Which tasks a tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    /// Tab order on the dashboard.
    pub const TABS: [StatusFilter; 4] = [
        Self::All,
        Self::Only(TaskStatus::Open),
        Self::Only(TaskStatus::InProgress),
        Self::Only(TaskStatus::Completed),
    ];

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        match self {
            Self::All => tasks.iter().collect(),
            Self::Only(status) => filter_by_status(tasks, *status),
        }
    }
}

impl From<Option<TaskStatus>> for StatusFilter {
    fn from(status: Option<TaskStatus>) -> Self {
        status.map_or(Self::All, Self::Only)
    }
}

/// Per-status task counts shown on the tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub open: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Open => self.open,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.open + self.in_progress + self.completed
    }
}

pub fn filter_by_status(tasks: &[Task], status: TaskStatus) -> Vec<&Task> {
    tasks.iter().filter(|t| t.status == status).collect()
}

pub fn tasks_for_user<'a>(tasks: &'a [Task], user_id: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.assigned_to == user_id).collect()
}

pub fn status_counts<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> StatusCounts {
    tasks.into_iter().fold(StatusCounts::default(), |mut c, t| {
        match t.status {
            TaskStatus::Open => c.open += 1,
            TaskStatus::InProgress => c.in_progress += 1,
            TaskStatus::Completed => c.completed += 1,
        }
        c
    })
}

/// Sum of the users' ledger totals (not a fold over completed tasks).
pub fn total_rewards(users: &[User]) -> u64 {
    users.iter().map(|u| u64::from(u.total_reward)).sum()
}

/// Users by `total_reward`, highest first; equal rewards keep input order.
pub fn ranked_users(users: &[User]) -> Vec<&User> {
    let mut ranked: Vec<&User> = users.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.total_reward.cmp(&a.total_reward));
    ranked
}

/// Percentage of completed tasks, rounded half away from zero; 0 for no tasks.
pub fn completion_rate<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> u32 {
    let counts = status_counts(tasks);
    let total = counts.total();
    if total == 0 {
        return 0;
    }
    (100.0 * counts.completed as f64 / total as f64).round() as u32
}

pub fn user_by_id<'a>(users: &'a [User], id: &str) -> Option<&'a User> {
    users.iter().find(|u| u.id == id)
}

/// Distinct departments in order of first appearance.
pub fn departments(users: &[User]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for u in users {
        if !out.contains(&u.department.as_str()) {
            out.push(&u.department);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("1", "a").with_assignee("u1"),
            Task::new("2", "b").with_status(TaskStatus::InProgress).with_assignee("u2"),
            Task::new("3", "c").with_status(TaskStatus::Completed).with_assignee("u1"),
            Task::new("4", "d").with_assignee("u1"),
            Task::new("5", "e").with_status(TaskStatus::InProgress).with_assignee("ghost"),
        ]
    }

    fn ids(ts: &[&Task]) -> Vec<String> {
        ts.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn filter_keeps_order_and_partitions() {
        let ts = tasks();
        assert_eq!(ids(&filter_by_status(&ts, TaskStatus::Open)), vec!["1", "4"]);
        assert_eq!(ids(&filter_by_status(&ts, TaskStatus::InProgress)), vec!["2", "5"]);

        let total: usize = TaskStatus::ALL
            .iter()
            .map(|s| filter_by_status(&ts, *s).len())
            .sum();
        assert_eq!(total, ts.len());
    }

    #[test]
    fn status_filter_all_is_identity() {
        let ts = tasks();
        assert_eq!(StatusFilter::All.apply(&ts).len(), 5);
        assert_eq!(StatusFilter::from(Some(TaskStatus::Completed)).apply(&ts).len(), 1);
    }

    #[test]
    fn tasks_for_user_ignores_others() {
        let ts = tasks();
        assert_eq!(ids(&tasks_for_user(&ts, "u1")), vec!["1", "3", "4"]);
        assert!(tasks_for_user(&ts, "nobody").is_empty());
    }

    #[test]
    fn completion_rate_rounds() {
        let ts = tasks();
        assert_eq!(completion_rate(&[] as &[Task]), 0);
        assert_eq!(completion_rate(&ts[..3]), 33);
        assert_eq!(completion_rate(&ts[1..3]), 50);
        assert_eq!(completion_rate(tasks_for_user(&ts, "u1")), 33);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let users = vec![
            User::new("a", "A").with_ledger(1, 100),
            User::new("b", "B").with_ledger(1, 300),
            User::new("c", "C").with_ledger(1, 100),
            User::new("d", "D").with_ledger(1, 300),
        ];
        let ranked: Vec<&str> = ranked_users(&users).iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ranked, vec!["b", "d", "a", "c"]);
        assert_eq!(total_rewards(&users), 800);
    }

    #[test]
    fn departments_dedupe_in_order() {
        let users = vec![
            User::new("a", "A").with_department("Engineering"),
            User::new("b", "B").with_department("HR"),
            User::new("c", "C").with_department("Engineering"),
        ];
        assert_eq!(departments(&users), vec!["Engineering", "HR"]);
    }

    #[test]
    fn missing_user_lookup_is_none() {
        let users = vec![User::new("a", "A")];
        assert!(user_by_id(&users, "a").is_some());
        assert!(user_by_id(&users, "ghost").is_none());
    }
}
