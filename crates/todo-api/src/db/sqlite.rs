use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use todo_domain::{Todo, TodoId};

use super::{StorageError, TodoRepository, TodoRow};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(255) NOT NULL,
    description TEXT NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT 0,
    completed_on DATETIME NULL
)
"#;

/// SQLite flavour of the store, for local runs and tests.
#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        tracing::info!(url = %url, "Opened SQLite database");
        Ok(Self { pool })
    }

    /// Private in-memory database with the schema already in place.
    ///
    /// The pool is pinned to a single connection that never expires, since an
    /// in-memory database lives and dies with its connection.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        let repo = Self { pool };
        repo.ensure_schema().await?;
        Ok(repo)
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Todo>, StorageError> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            "SELECT id, title, description, completed, completed_on FROM todos ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn create(&self, title: &str, description: &str) -> Result<Todo, StorageError> {
        let result = sqlx::query("INSERT INTO todos (title, description) VALUES (?, ?)")
            .bind(title)
            .bind(description)
            .execute(&self.pool)
            .await?;
        let id = TodoId::new(result.last_insert_rowid());
        Ok(Todo::created(id, title.to_string(), description.to_string()))
    }

    async fn update(
        &self,
        id: TodoId,
        title: &str,
        description: &str,
    ) -> Result<(), StorageError> {
        sqlx::query("UPDATE todos SET title = ?, description = ? WHERE id = ?")
            .bind(title)
            .bind(description)
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn complete(&self, id: TodoId, at: DateTime<Utc>) -> Result<(), StorageError> {
        sqlx::query("UPDATE todos SET completed = 1, completed_on = ? WHERE id = ? AND completed = 0")
            .bind(at.naive_utc())
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: TodoId) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
