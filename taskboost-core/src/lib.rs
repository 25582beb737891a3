//! taskboost-core: task store, derived views and dashboard numbers for TaskBoost

pub mod dashboard;
pub mod draft;
pub mod error;
pub mod mock;
pub mod notify;
pub mod store;
pub mod task;
pub mod time;
pub mod user;
pub mod views;

pub use dashboard::{LeaderboardEntry, ProfileSummary, RewardsSummary, leaderboard};
pub use draft::{TaskDraft, parse_date};
pub use error::TaskError;
pub use mock::{CURRENT_USER_ID, Seed};
pub use notify::{Notification, NotificationLog, Tone};
pub use store::{StoreEvent, StoreObserver, TaskStore, TracingObserver};
pub use task::{DEFAULT_REWARD, Task, TaskStatus};
pub use user::User;
pub use views::{
    StatusCounts, StatusFilter, completion_rate, departments, filter_by_status, ranked_users,
    status_counts, tasks_for_user, total_rewards, user_by_id,
};
