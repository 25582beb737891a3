//! Plain-text rendering for the one-shot subcommands.

use chrono::NaiveDate;
use taskboost_core::time::{due_label, long_date, status_label};
use taskboost_core::{LeaderboardEntry, ProfileSummary, RewardsSummary, Task, User, user_by_id};

pub fn task_line(task: &Task, users: &[User], today: NaiveDate) -> String {
    let assignee = user_by_id(users, &task.assigned_to)
        .map(|u| u.name.as_str())
        .unwrap_or("unassigned");
    format!(
        "[{}] {} | ${} | {} | {} | {} (id {})",
        status_label(task.status),
        task.title,
        task.reward,
        task.department,
        assignee,
        due_label(task, today),
        task.id
    )
}

pub fn print_tasks(tasks: &[&Task], users: &[User], today: NaiveDate) {
    if tasks.is_empty() {
        println!("(no tasks)");
        return;
    }
    for t in tasks {
        println!("- {}", task_line(t, users, today));
    }
}

pub fn print_leaderboard(board: &[LeaderboardEntry]) {
    println!("# Top Performers\n");
    for e in board {
        println!(
            "{:>2}. {} ({}) - {} | ${}",
            e.rank, e.name, e.initials, e.role, e.total_reward
        );
    }
}

pub fn print_profile(p: &ProfileSummary) {
    println!("# {} ({})", p.name, p.initials);
    println!("{} • {}\n", p.role, p.department);
    println!("Task completion: {}%", p.completion_rate);
    println!("Total earned:    ${}", p.ledger_total_reward);
    println!("Tasks completed: {}", p.ledger_completed_tasks);
    println!(
        "Open: {} | In progress: {} | Completed: {}",
        p.counts.open, p.counts.in_progress, p.counts.completed
    );
    println!("This month: ${} in bonuses", p.bonuses_earned);
}

pub fn print_rewards(s: &RewardsSummary, today: NaiveDate) {
    println!("# Rewards Dashboard ({})\n", long_date(today));
    println!(
        "Team rewards: ${} / ${} ({}%)",
        s.current_rewards, s.target_rewards, s.progress_percent
    );
    println!("Next payout:  {}", s.upcoming_payout);
    println!("Employees:    {}", s.total_employees);
    println!("Avg. completion: {} tasks", s.average_completion);
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboost_core::mock;

    #[test]
    fn task_line_mentions_assignee_and_due() {
        let users = mock::mock_users();
        let t = &mock::mock_tasks()[0];
        let today = NaiveDate::from_ymd_opt(2025, 4, 28).unwrap();
        assert_eq!(
            task_line(t, &users, today),
            concat!(
                "[Open] Update client database schema | $50 | Engineering",
                " | Alex Chen | Due in 3 days (id 1)",
            )
        );
    }

    #[test]
    fn unknown_assignee_is_not_an_error() {
        let t = Task::new("x", "Orphan").with_assignee("42").with_due_date("??");
        let line = task_line(&t, &[], NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert!(line.contains("unassigned"));
        assert!(line.contains("Due date not set"));
    }
}
