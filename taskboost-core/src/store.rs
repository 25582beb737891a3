//! TaskStore — the session-owned, ordered task collection.
//!
//! All writes go through two operations:
//! - `add_task` prepends a task (newest first).
//! - `set_status` swaps a task for a copy with the new status.
//!
//! Every successful write is announced to the registered observers. Observers
//! cannot veto or alter a write; they only get told about it.

use std::fmt;
use std::rc::Rc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::draft::TaskDraft;
use crate::error::TaskError;
use crate::task::{DEFAULT_REWARD, Task, TaskStatus};

/// Something that happened to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    TaskAdded(Task),
    /// `task` is the replacement copy, already carrying `to`.
    StatusChanged {
        task: Task,
        from: TaskStatus,
        to: TaskStatus,
    },
    /// A draft failed validation; the store did not change.
    AddRejected,
}

pub trait StoreObserver {
    fn on_event(&self, event: &StoreEvent);
}

impl<T: StoreObserver + ?Sized> StoreObserver for Rc<T> {
    fn on_event(&self, event: &StoreEvent) {
        (**self).on_event(event);
    }
}

/// Logs every store event at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl StoreObserver for TracingObserver {
    fn on_event(&self, event: &StoreEvent) {
        match event {
            StoreEvent::TaskAdded(task) => {
                info!(task_id = %task.id, title = %task.title, "task added");
            }
            StoreEvent::StatusChanged { task, from, to } => {
                info!(task_id = %task.id, %from, %to, "task status changed");
            }
            StoreEvent::AddRejected => info!("task draft rejected"),
        }
    }
}

pub struct TaskStore {
    tasks: Vec<Task>,
    default_reward: u32,
    observers: Vec<Box<dyn StoreObserver>>,
}

impl fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks)
            .field("default_reward", &self.default_reward)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            default_reward: DEFAULT_REWARD,
            observers: Vec::new(),
        }
    }

    /// Reward used by [`TaskStore::submit`] when a draft leaves it blank.
    pub fn with_default_reward(mut self, reward: u32) -> Self {
        self.default_reward = reward;
        self
    }

    pub fn subscribe(&mut self, observer: impl StoreObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Prepend a fully-formed task. Ids are not checked for uniqueness.
    pub fn add_task(&mut self, task: Task) -> &Task {
        debug!(task_id = %task.id, "prepending task");
        self.tasks.insert(0, task);
        self.emit(&StoreEvent::TaskAdded(self.tasks[0].clone()));
        &self.tasks[0]
    }

    /// Validate a draft and add the resulting task.
    ///
    /// On failure nothing is added and observers receive `AddRejected`.
    pub fn submit(&mut self, draft: &TaskDraft) -> Result<&Task, TaskError> {
        match draft.validate_with_default(self.default_reward) {
            Ok(task) => Ok(self.add_task(task)),
            Err(e) => {
                debug!(error = %e, "rejecting task draft");
                self.emit(&StoreEvent::AddRejected);
                Err(e)
            }
        }
    }

    /// Move a task to `status`, stamping today's local date on completion.
    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> Option<&Task> {
        self.set_status_on(id, status, Local::now().date_naive())
    }

    /// Same as [`TaskStore::set_status`] with an explicit "today".
    ///
    /// Unknown ids are ignored and produce no event.
    pub fn set_status_on(
        &mut self,
        id: &str,
        status: TaskStatus,
        today: NaiveDate,
    ) -> Option<&Task> {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(task_id = id, %status, "status change for unknown task ignored");
            return None;
        };

        let from = self.tasks[idx].status;
        self.tasks[idx] = self.tasks[idx].transitioned(status, today);

        self.emit(&StoreEvent::StatusChanged {
            task: self.tasks[idx].clone(),
            from,
            to: status,
        });
        Some(&self.tasks[idx])
    }

    fn emit(&self, event: &StoreEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}
