//! Storage for the `todos` table.
//!
//! Every repository method issues exactly one SQL statement through the
//! pool; the connection is checked out for that statement only.

mod mysql;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;
use todo_domain::{Todo, TodoId};

use crate::config::DatabaseConfig;

pub use mysql::MySqlTodoRepository;
pub use sqlite::SqliteTodoRepository;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Creates the `todos` table if it does not exist yet.
    async fn ensure_schema(&self) -> Result<(), StorageError>;

    /// Every row, in id order.
    async fn list_all(&self) -> Result<Vec<Todo>, StorageError>;

    async fn create(&self, title: &str, description: &str) -> Result<Todo, StorageError>;

    /// Overwrites title and description. A missing id is not an error.
    async fn update(&self, id: TodoId, title: &str, description: &str)
        -> Result<(), StorageError>;

    /// Flips a pending row to completed, stamping `at`. Rows that are already
    /// completed, or missing, are left untouched.
    async fn complete(&self, id: TodoId, at: DateTime<Utc>) -> Result<(), StorageError>;

    /// Physically removes the row. A missing id is not an error.
    async fn delete(&self, id: TodoId) -> Result<(), StorageError>;
}

/// Opens the configured backend and makes sure the table exists.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn TodoRepository>, StorageError> {
    let repo: Arc<dyn TodoRepository> = match config {
        DatabaseConfig::MySql(settings) => Arc::new(MySqlTodoRepository::connect(settings).await?),
        DatabaseConfig::Sqlite { url } => Arc::new(SqliteTodoRepository::connect(url).await?),
    };
    repo.ensure_schema().await?;
    Ok(repo)
}

/// Row shape shared by both backends.
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: String,
    completed: bool,
    completed_on: Option<NaiveDateTime>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: TodoId::new(row.id),
            title: row.title,
            description: row.description,
            completed: row.completed,
            completed_on: row.completed_on.map(|at| at.and_utc()),
        }
    }
}
