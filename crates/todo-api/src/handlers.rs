use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{SubsecRound, Utc};
use todo_domain::{CompletedTodo, CreatedTodo, TodoId, TodoInput, UpdatedTodo};

use crate::error::ApiError;
use crate::AppState;

type JsonInput = Result<Json<TodoInput>, JsonRejection>;
type IdParam = Result<Path<i64>, PathRejection>;

pub async fn hello() -> &'static str {
    "Hello"
}

pub async fn list_todos(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let todos = state
        .repo
        .list_all()
        .await
        .map_err(ApiError::storage("Database error"))?;
    Ok(Json(todos))
}

/// Title and description are taken as sent; blank values are the client's concern.
pub async fn create_todo(
    State(state): State<AppState>,
    input: JsonInput,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = input?;
    let todo = state
        .repo
        .create(&input.title, &input.description)
        .await
        .map_err(ApiError::storage("Failed to add todo"))?;

    tracing::info!(id = %todo.id, "Todo created");
    let body = CreatedTodo {
        id: todo.id,
        title: todo.title,
        description: todo.description,
    };
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn update_todo(
    State(state): State<AppState>,
    id: IdParam,
    input: JsonInput,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let Json(input) = input?;
    let id = TodoId::new(id);
    state
        .repo
        .update(id, &input.title, &input.description)
        .await
        .map_err(ApiError::storage("Failed to update todo"))?;

    tracing::info!(%id, "Todo updated");
    Ok(Json(UpdatedTodo {
        id,
        title: input.title,
        description: input.description,
    }))
}

pub async fn complete_todo(
    State(state): State<AppState>,
    id: IdParam,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id?;
    let id = TodoId::new(id);
    // DATETIME keeps whole seconds; stamp at that precision so the reply matches the row.
    let completed_on = Utc::now().trunc_subsecs(0);
    state
        .repo
        .complete(id, completed_on)
        .await
        .map_err(ApiError::storage("Failed to complete todo"))?;

    tracing::info!(%id, %completed_on, "Todo completed");
    Ok(Json(CompletedTodo { id, completed_on }))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    id: IdParam,
) -> Result<StatusCode, ApiError> {
    remove(state, id, "Failed to delete todo").await
}

/// Same statement as `delete_todo`, reached from the completed list.
pub async fn delete_completed_todo(
    State(state): State<AppState>,
    id: IdParam,
) -> Result<StatusCode, ApiError> {
    remove(state, id, "Failed to delete completed todo").await
}

async fn remove(state: AppState, id: IdParam, message: &'static str) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let id = TodoId::new(id);
    state
        .repo
        .delete(id)
        .await
        .map_err(ApiError::storage(message))?;

    tracing::info!(%id, "Todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
