//! Numbers behind the dashboard cards: rewards tracker, profile, leaderboard.

use serde::{Deserialize, Serialize};

use crate::task::Task;
use crate::time::initials;
use crate::user::User;
use crate::views::{self, StatusCounts};

pub const DEFAULT_LEADERBOARD_LIMIT: usize = 5;

/// Team-wide reward progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardsSummary {
    pub current_rewards: u64,
    pub target_rewards: u64,
    /// 0..=100
    pub progress_percent: u32,
    pub total_employees: usize,
    /// Completed tasks per employee, rounded.
    pub average_completion: u64,
    pub upcoming_payout: String,
}

impl RewardsSummary {
    pub fn compute(
        users: &[User],
        tasks: &[Task],
        target_rewards: u64,
        upcoming_payout: impl Into<String>,
    ) -> Self {
        let current_rewards = views::total_rewards(users);
        let progress_percent = if target_rewards == 0 {
            100
        } else {
            (100.0 * current_rewards as f64 / target_rewards as f64)
                .round()
                .min(100.0) as u32
        };

        let completed = views::status_counts(tasks).completed;
        let average_completion = if users.is_empty() {
            0
        } else {
            (completed as f64 / users.len() as f64).round() as u64
        };

        Self {
            current_rewards,
            target_rewards,
            progress_percent,
            total_employees: users.len(),
            average_completion,
            upcoming_payout: upcoming_payout.into(),
        }
    }
}

/// One user's performance card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub user_id: String,
    pub name: String,
    pub initials: String,
    pub role: String,
    pub department: String,
    pub counts: StatusCounts,
    pub completion_rate: u32,
    /// Rewards of this user's completed tasks in the current session.
    pub bonuses_earned: u64,
    /// Ledger totals, independent of the task list.
    pub ledger_completed_tasks: u32,
    pub ledger_total_reward: u32,
}

impl ProfileSummary {
    pub fn compute(user: &User, tasks: &[Task]) -> Self {
        let mine = views::tasks_for_user(tasks, &user.id);
        let bonuses_earned = mine
            .iter()
            .filter(|t| t.is_completed())
            .map(|t| u64::from(t.reward))
            .sum();

        Self {
            user_id: user.id.clone(),
            name: user.name.clone(),
            initials: initials(&user.name),
            role: user.role.clone(),
            department: user.department.clone(),
            counts: views::status_counts(mine.iter().copied()),
            completion_rate: views::completion_rate(mine.iter().copied()),
            bonuses_earned,
            ledger_completed_tasks: user.completed_tasks,
            ledger_total_reward: user.total_reward,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based.
    pub rank: usize,
    pub user_id: String,
    pub name: String,
    pub initials: String,
    pub role: String,
    pub total_reward: u32,
}

/// Top `limit` users by ledger reward.
pub fn leaderboard(users: &[User], limit: usize) -> Vec<LeaderboardEntry> {
    views::ranked_users(users)
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, u)| LeaderboardEntry {
            rank: i + 1,
            user_id: u.id.clone(),
            name: u.name.clone(),
            initials: initials(&u.name),
            role: u.role.clone(),
            total_reward: u.total_reward,
        })
        .collect()
}
