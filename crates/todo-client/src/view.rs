//! Local mirror of the two lists a user sees.
//!
//! The controller keeps no cache logic: after every successful mutation it
//! re-fetches the whole list and re-partitions it.

use todo_domain::{partition, CreatedTodo, Partition, Todo, TodoId, TodoInput, UpdatedTodo};

use crate::client::TodoClient;
use crate::error::ClientError;

/// Unsaved edit of a single pending todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: TodoId,
    pub title: String,
    pub description: String,
}

pub struct ViewController {
    client: TodoClient,
    pending: Vec<Todo>,
    completed: Vec<Todo>,
    editing: Option<EditDraft>,
}

impl ViewController {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            pending: Vec::new(),
            completed: Vec::new(),
            editing: None,
        }
    }

    pub fn pending(&self) -> &[Todo] {
        &self.pending
    }

    pub fn completed(&self) -> &[Todo] {
        &self.completed
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    /// Replaces both lists with a fresh listing from the server.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let todos = self
            .client
            .list()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Error fetching todos"))?;
        let Partition { pending, completed } = partition(todos);
        self.pending = pending;
        self.completed = completed;
        Ok(())
    }

    pub async fn add(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<CreatedTodo, ClientError> {
        let input = TodoInput::new(title, description);
        let created = self
            .client
            .create(&input)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Error adding todo"))?;
        self.refresh().await?;
        Ok(created)
    }

    /// Opens `id` for editing, dropping any other draft without saving it.
    ///
    /// Only pending todos are editable; an unknown id leaves the state as is.
    pub fn start_edit(&mut self, id: TodoId) -> Option<&EditDraft> {
        let todo = self.pending.iter().find(|todo| todo.id == id)?;
        self.editing = Some(EditDraft {
            id,
            title: todo.title.clone(),
            description: todo.description.clone(),
        });
        self.editing.as_ref()
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        if let Some(draft) = self.editing.as_mut() {
            draft.title = title.into();
        }
    }

    pub fn set_draft_description(&mut self, description: impl Into<String>) {
        if let Some(draft) = self.editing.as_mut() {
            draft.description = description.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Sends the draft. The draft is cleared only once the update went through.
    pub async fn save_edit(&mut self) -> Result<Option<UpdatedTodo>, ClientError> {
        let Some(draft) = self.editing.clone() else {
            return Ok(None);
        };

        let input = TodoInput::new(draft.title, draft.description);
        let updated = self
            .client
            .update(draft.id, &input)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Error updating todo"))?;
        self.refresh().await?;
        self.editing = None;
        Ok(Some(updated))
    }

    pub async fn complete(&mut self, id: TodoId) -> Result<(), ClientError> {
        self.client
            .complete(id)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Error completing todo"))?;
        self.refresh().await
    }

    pub async fn delete(&mut self, id: TodoId) -> Result<(), ClientError> {
        self.client
            .delete(id)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Error deleting todo"))?;
        self.refresh().await
    }
}
