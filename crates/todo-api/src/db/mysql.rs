use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use todo_domain::{Todo, TodoId};

use super::{StorageError, TodoRepository, TodoRow};
use crate::config::MySqlSettings;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id BIGINT AUTO_INCREMENT PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description TEXT NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT FALSE,
    completed_on DATETIME NULL
)
"#;

#[derive(Clone)]
pub struct MySqlTodoRepository {
    pool: MySqlPool,
}

impl MySqlTodoRepository {
    pub async fn connect(settings: &MySqlSettings) -> Result<Self, StorageError> {
        let options = MySqlConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.password)
            .database(&settings.name);

        let pool = MySqlPoolOptions::new().connect_with(options).await?;
        tracing::info!(host = %settings.host, database = %settings.name, "Connected to MySQL");
        Ok(Self { pool })
    }
}

#[async_trait]
impl TodoRepository for MySqlTodoRepository {
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
        let id = TodoId::new(result.last_insert_id() as i64);
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
        sqlx::query(
            "UPDATE todos SET completed = TRUE, completed_on = ? WHERE id = ? AND completed = FALSE",
        )
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
