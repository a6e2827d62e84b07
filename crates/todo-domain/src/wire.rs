//! JSON bodies exchanged over `/todos`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::todo::TodoId;

/// `201` body of `POST /todos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTodo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
}

/// `200` body of `PUT /todos/:id`. Echoes the request even when no row matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedTodo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
}

/// `200` body of `PUT /todos/complete/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTodo {
    pub id: TodoId,
    pub completed_on: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn completed_todo_uses_camel_case_timestamp_key() {
        let body = CompletedTodo {
            id: TodoId::new(7),
            completed_on: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["completedOn"], "2024-05-01T12:30:00Z");
        assert!(json.get("completed_on").is_none());
    }

    #[test]
    fn error_body_has_single_error_field() {
        let json = serde_json::to_string(&ErrorBody::new("Database error")).unwrap();
        assert_eq!(json, r#"{"error":"Database error"}"#);
    }
}
