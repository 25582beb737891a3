use std::rc::Rc;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use taskboost_core::{
    NotificationLog, Seed, StatusFilter, TaskDraft, TaskError, TaskStatus, TaskStore,
    completion_rate, filter_by_status, ranked_users,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn session() -> (TaskStore, Rc<NotificationLog>) {
    let log = Rc::new(NotificationLog::default());
    let mut store = TaskStore::new(Seed::mock().tasks);
    store.subscribe(log.clone());
    (store, log)
}

fn audit_draft() -> TaskDraft {
    TaskDraft::new()
        .title("Audit logs")
        .description("Quarterly audit")
        .assigned_to("1")
        .department("Engineering")
        .due_date(day(2025, 6, 1))
}

/// Adding a task without a reward puts an open, 50-reward task at the front.
#[test]
fn add_task_end_to_end() {
    let (mut store, log) = session();

    store.submit(&audit_draft()).unwrap();

    let first = &store.tasks()[0];
    assert_eq!(store.len(), 9);
    assert_eq!(first.title, "Audit logs");
    assert_eq!(first.reward, 50);
    assert_eq!(first.status, TaskStatus::Open);
    assert_eq!(first.completed_on, None);
    assert_eq!(log.latest().unwrap().title, "Task Added");
}

#[test]
fn empty_title_is_rejected_end_to_end() {
    let (mut store, log) = session();
    let before = store.tasks().to_vec();

    let draft = TaskDraft {
        title: String::new(),
        ..audit_draft()
    };
    let err = store.submit(&draft).unwrap_err();

    assert_eq!(err, TaskError::MissingInformation);
    assert_eq!(store.tasks(), before.as_slice());
    assert_eq!(log.latest().unwrap().title, "Missing Information");
}

#[test]
fn complete_then_reopen_end_to_end() {
    let (mut store, log) = session();
    let today = day(2025, 4, 20);

    // task 3 is seeded completed; walk it back to in-progress first
    store.set_status_on("3", TaskStatus::InProgress, today);
    assert_eq!(store.get("3").unwrap().completed_on, None);

    let done = store.set_status_on("3", TaskStatus::Completed, today).unwrap();
    assert_eq!(done.status, TaskStatus::Completed);
    assert_eq!(done.completed_on, Some(today));

    let reopened = store.set_status_on("3", TaskStatus::Open, today).unwrap();
    assert_eq!(reopened.completed_on, None);

    let titles: Vec<String> = log.drain().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["Task Started", "Task Completed! 🎉"]);
}

#[test]
fn set_status_uses_local_today() {
    let (mut store, _) = session();
    let before = chrono::Local::now().date_naive();
    let done = store.set_status("1", TaskStatus::Completed).unwrap().clone();
    let after = chrono::Local::now().date_naive();

    let on = done.completed_on.unwrap();
    assert!(on == before || on == after);
}

#[test]
fn views_follow_the_store() {
    let (mut store, _) = session();
    let today = day(2025, 4, 20);

    assert_eq!(filter_by_status(store.tasks(), TaskStatus::Completed).len(), 2);
    store.set_status_on("1", TaskStatus::Completed, today);
    assert_eq!(filter_by_status(store.tasks(), TaskStatus::Completed).len(), 3);

    let all = StatusFilter::All.apply(store.tasks()).len();
    let split: usize = TaskStatus::ALL
        .iter()
        .map(|s| StatusFilter::Only(*s).apply(store.tasks()).len())
        .sum();
    assert_eq!(all, split);

    // 3 of 8 completed
    assert_eq!(completion_rate(store.tasks()), 38);
}

#[test]
fn leaderboard_ignores_session_completions() {
    let (mut store, _) = session();
    let users = Seed::mock().users;
    store.set_status_on("8", TaskStatus::Completed, day(2025, 4, 20));

    let ranked: Vec<u32> = ranked_users(&users).iter().map(|u| u.total_reward).collect();
    assert_eq!(ranked, vec![580, 510, 450, 420, 390]);
}
