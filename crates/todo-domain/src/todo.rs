use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Server-assigned row identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored task.
///
/// `completed_on` is `Some` exactly when `completed` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub completed_on: Option<DateTime<Utc>>,
}

impl Todo {
    /// Freshly inserted, still pending.
    pub fn created(id: TodoId, title: String, description: String) -> Self {
        Self {
            id,
            title,
            description,
            completed: false,
            completed_on: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.completed
    }
}

/// Title and description as typed by the user, for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoInput {
    pub title: String,
    pub description: String,
}

impl TodoInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Both fields must contain something other than whitespace.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(())
    }
}

/// The pending/completed split a client renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub pending: Vec<Todo>,
    pub completed: Vec<Todo>,
}

/// Splits a full listing by the `completed` flag, keeping server order on both sides.
pub fn partition(todos: Vec<Todo>) -> Partition {
    let (completed, pending) = todos.into_iter().partition(|todo| todo.completed);
    Partition { pending, completed }
}
