//! User-facing acknowledgments for store activity.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::store::{StoreEvent, StoreObserver};
use crate::task::TaskStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Default,
    Destructive,
}

/// A short message shown to the user after something happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub tone: Tone,
}

impl Notification {
    fn new(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            tone: Tone::Default,
        }
    }

    pub fn welcome() -> Self {
        Self::new(
            "Welcome to TaskBoost!",
            "Complete tasks to earn rewards and get paid with your next salary.",
        )
    }

    pub fn new_task_available() -> Self {
        Self::new(
            "New Task Available",
            "A new high-reward task has been added to your dashboard!",
        )
    }

    pub fn missing_information() -> Self {
        Self {
            tone: Tone::Destructive,
            ..Self::new("Missing Information", "Please fill out all required fields")
        }
    }

    /// Acknowledgment for a store event. Moving a task back to `open` is silent.
    pub fn for_event(event: &StoreEvent) -> Option<Self> {
        match event {
            StoreEvent::TaskAdded(_) => Some(Self::new(
                "Task Added",
                "The new task has been successfully added",
            )),
            StoreEvent::StatusChanged { task, to, .. } => match to {
                TaskStatus::Completed => Some(Self::new(
                    "Task Completed! 🎉",
                    format!(
                        "You earned a ${} bonus for completing \"{}\"",
                        task.reward, task.title
                    ),
                )),
                TaskStatus::InProgress => Some(Self::new(
                    "Task Started",
                    format!("You've started working on \"{}\"", task.title),
                )),
                TaskStatus::Open => None,
            },
            StoreEvent::AddRejected => Some(Self::missing_information()),
        }
    }
}

/// Observer that turns store events into notifications, oldest first.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: RefCell<Vec<Notification>>,
}

impl NotificationLog {
    /// Record a notification that did not come from the store.
    pub fn push(&self, notification: Notification) {
        self.entries.borrow_mut().push(notification);
    }

    pub fn latest(&self) -> Option<Notification> {
        self.entries.borrow().last().cloned()
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }
}

impl StoreObserver for NotificationLog {
    fn on_event(&self, event: &StoreEvent) {
        if let Some(n) = Notification::for_event(event) {
            self.push(n);
        }
    }
}
