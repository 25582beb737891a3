//! Built-in demo data the dashboard starts from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskStatus};
use crate::user::User;

/// Id of the user the dashboard treats as "me" unless configured otherwise.
pub const CURRENT_USER_ID: &str = "1";

/// Tasks and users a session is seeded with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl Seed {
    pub fn mock() -> Self {
        Self {
            tasks: mock_tasks(),
            users: mock_users(),
        }
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // literals below are all valid calendar dates
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn task(
    id: &str,
    title: &str,
    description: &str,
    due: &str,
    assignee: &str,
    department: &str,
    reward: u32,
) -> Task {
    Task::new(id, title)
        .with_description(description)
        .with_due_date(due)
        .with_assignee(assignee)
        .with_department(department)
        .with_reward(reward)
}

pub fn mock_tasks() -> Vec<Task> {
    vec![
        task(
            "1",
            "Update client database schema",
            "Modify the current database schema to accommodate the new client requirements.",
            "2025-05-01",
            "1",
            "Engineering",
            50,
        ),
        task(
            "2",
            "Create Q2 marketing campaign",
            "Design and implement a marketing campaign for the upcoming quarter.",
            "2025-04-30",
            "2",
            "Marketing",
            75,
        )
        .with_status(TaskStatus::InProgress),
        task(
            "3",
            "Implement new authentication system",
            "Develop and deploy a new authentication system for our web application.",
            "2025-04-15",
            "1",
            "Engineering",
            100,
        )
        .completed(date(2025, 4, 12)),
        task(
            "4",
            "Conduct user interviews",
            "Schedule and conduct interviews with users to gather feedback on the new features.",
            "2025-05-05",
            "3",
            "Product",
            60,
        )
        .with_status(TaskStatus::InProgress),
        task(
            "5",
            "Fix responsive design issues",
            "Identify and fix responsive design issues on the mobile version of our app.",
            "2025-04-28",
            "1",
            "Engineering",
            40,
        ),
        task(
            "6",
            "Prepare financial report",
            "Compile and prepare the monthly financial report for stakeholders.",
            "2025-04-10",
            "4",
            "Finance",
            80,
        )
        .completed(date(2025, 4, 8)),
        task(
            "7",
            "Update company documentation",
            "Review and update the company documentation to reflect recent changes.",
            "2025-05-10",
            "3",
            "Product",
            45,
        ),
        task(
            "8",
            "Revamp onboarding process",
            "Design and implement improvements to the employee onboarding process.",
            "2025-05-15",
            "5",
            "HR",
            90,
        )
        .with_status(TaskStatus::InProgress),
    ]
}

fn user(id: &str, name: &str, role: &str, department: &str, completed: u32, reward: u32) -> User {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    User::new(id, name)
        .with_email(email)
        .with_role(role)
        .with_department(department)
        .with_ledger(completed, reward)
}

pub fn mock_users() -> Vec<User> {
    vec![
        user("1", "Alex Chen", "Senior Developer", "Engineering", 12, 580),
        user("2", "Jamie Taylor", "Marketing Specialist", "Marketing", 8, 420),
        user("3", "Sam Rodriguez", "Product Manager", "Product", 10, 510),
        user("4", "Morgan Williams", "Financial Analyst", "Finance", 6, 390),
        user("5", "Jordan Lee", "HR Manager", "HR", 9, 450),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views;

    #[test]
    fn mock_data_is_consistent() {
        let seed = Seed::mock();
        assert_eq!(seed.tasks.len(), 8);
        assert_eq!(seed.users.len(), 5);
        assert_eq!(views::total_rewards(&seed.users), 2350);

        for t in &seed.tasks {
            assert_eq!(t.completed_on.is_some(), t.is_completed(), "task {}", t.id);
            assert!(t.due().is_some(), "task {}", t.id);
        }
        assert_eq!(seed.users[3].email, "morgan.williams@example.com");
    }

    #[test]
    fn seed_parses_partial_json() {
        let seed: Seed = serde_json::from_str(
            r#"{ "tasks": [{
                "id": "x", "title": "t", "description": "d", "status": "open",
                "dueDate": "not a date", "assignedTo": "9", "department": "Ops", "reward": 5
            }] }"#,
        )
        .unwrap();
        assert_eq!(seed.tasks.len(), 1);
        assert!(seed.users.is_empty());
        assert_eq!(seed.tasks[0].due(), None);
    }
}
