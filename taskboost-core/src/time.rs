//! Display formatting for calendar dates: relative distances and due labels.

use chrono::NaiveDate;

use crate::task::{Task, TaskStatus};

/// Shown when a task's due date cannot be read.
pub const DUE_PLACEHOLDER: &str = "Due date not set";

/// Human distance between `date` and `today` with a direction suffix.
///
/// Day granularity only: "today", "in 3 days", "about 1 month ago",
/// "over 2 years ago".
pub fn time_ago(date: NaiveDate, today: NaiveDate) -> String {
    let delta = (date - today).num_days();
    if delta == 0 {
        return "today".to_string();
    }
    let distance = distance_in_days(delta.unsigned_abs());
    if delta > 0 {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

fn distance_in_days(days: u64) -> String {
    const MONTH: u64 = 30;
    const YEAR: u64 = 365;

    match days {
        1 => "1 day".to_string(),
        d if d < MONTH => format!("{d} days"),
        d if d < 45 => "about 1 month".to_string(),
        d if d < 60 => "about 2 months".to_string(),
        d if d < YEAR => format!("{} months", (d as f64 / MONTH as f64).round() as u64),
        d => {
            let years = d / YEAR;
            let months_over = (d % YEAR) / MONTH;
            let unit = |n: u64| if n == 1 { "year" } else { "years" };
            if months_over < 3 {
                format!("about {years} {}", unit(years))
            } else if months_over < 9 {
                format!("over {years} {}", unit(years))
            } else {
                format!("almost {} years", years + 1)
            }
        }
    }
}

/// The line a task card shows under the title.
pub fn due_label(task: &Task, today: NaiveDate) -> String {
    if task.status == TaskStatus::Completed {
        return match task.completed_on {
            Some(on) => format!("Completed {}", time_ago(on, today)),
            None => "Completed recently".to_string(),
        };
    }

    match task.due() {
        Some(due) => format!("Due {}", time_ago(due, today)),
        None => DUE_PLACEHOLDER.to_string(),
    }
}

/// "April 30, 2025".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// First letter of each word of a name, e.g. "Alex Chen" -> "AC".
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .collect()
}

/// Status with its first letter capitalized, e.g. "In-progress".
pub fn status_label(status: TaskStatus) -> String {
    let s = status.as_str();
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
