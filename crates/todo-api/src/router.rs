use axum::http::header::{HeaderValue, InvalidHeaderValue, CONTENT_TYPE};
use axum::http::Method;
use axum::routing::{delete, get, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Full application: routes plus CORS for the configured client origin.
pub fn app(state: AppState, cors: CorsLayer) -> Router {
    app_with_state(state).layer(cors)
}

/// Routes and request tracing, without CORS.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .route("/todos", get(handlers::list_todos).post(handlers::create_todo))
        .route(
            "/todos/:id",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
        .route("/todos/complete/:id", put(handlers::complete_todo))
        .route("/completed/:id", delete(handlers::delete_completed_todo))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn cors_layer(client_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin: HeaderValue = client_origin.parse()?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteTodoRepository;
    use axum::body::{self, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use std::sync::Arc;
    use tower::ServiceExt; // for `oneshot`

    async fn test_app() -> Router {
        let repo = SqliteTodoRepository::in_memory().await.unwrap();
        app_with_state(AppState::new(Arc::new(repo)))
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, title: &str, description: &str) -> i64 {
        let body = serde_json::json!({ "title": title, "description": description });
        let response = app
            .clone()
            .oneshot(json_request("POST", "/todos", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["id"].as_i64().unwrap()
    }

    async fn list(app: &Router) -> Vec<serde_json::Value> {
        let response = app
            .clone()
            .oneshot(empty_request("GET", "/todos"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await.as_array().unwrap().clone()
    }

    #[tokio::test]
    async fn root_says_hello() {
        let app = test_app().await;
        let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Hello");
    }

    #[tokio::test]
    async fn post_todos_returns_201_with_id_title_description() {
        let app = test_app().await;
        let body = serde_json::json!({ "title": "A", "description": "d" });

        let response = app
            .clone()
            .oneshot(json_request("POST", "/todos", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert!(json["id"].as_i64().is_some());
        assert_eq!(json["title"], "A");
        assert_eq!(json["description"], "d");

        let todos = list(&app).await;
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0]["completed"], false);
        assert!(todos[0]["completed_on"].is_null());
    }

    #[tokio::test]
    async fn post_todos_accepts_empty_strings() {
        let app = test_app().await;
        create(&app, "", "").await;
        assert_eq!(list(&app).await.len(), 1);
    }

    #[tokio::test]
    async fn post_todos_without_description_is_400() {
        let app = test_app().await;
        let body = serde_json::json!({ "title": "A" });

        let response = app
            .clone()
            .oneshot(json_request("POST", "/todos", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("description"));
        assert!(list(&app).await.is_empty());
    }

    #[tokio::test]
    async fn put_todo_overwrites_title_and_description() {
        let app = test_app().await;
        let id = create(&app, "A", "d").await;

        let body = serde_json::json!({ "title": "B", "description": "e" });
        let response = app
            .clone()
            .oneshot(json_request("PUT", &format!("/todos/{id}"), body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "id": id, "title": "B", "description": "e" })
        );
        let todos = list(&app).await;
        assert_eq!(todos[0]["title"], "B");
        assert_eq!(todos[0]["description"], "e");
        assert_eq!(todos[0]["completed"], false);
    }

    #[tokio::test]
    async fn put_missing_todo_is_silent_200() {
        let app = test_app().await;
        let body = serde_json::json!({ "title": "B", "description": "e" });

        let response = app
            .clone()
            .oneshot(json_request("PUT", "/todos/42", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(list(&app).await.is_empty());
    }

    #[tokio::test]
    async fn non_numeric_id_is_400() {
        let app = test_app().await;
        let response = app
            .oneshot(empty_request("DELETE", "/todos/abc"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn complete_stamps_and_moves_to_completed() {
        let app = test_app().await;
        let id = create(&app, "A", "d").await;

        let response = app
            .clone()
            .oneshot(empty_request("PUT", &format!("/todos/complete/{id}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["id"], id);
        let completed_on = json["completedOn"].as_str().unwrap().to_string();

        let todos = list(&app).await;
        assert_eq!(todos[0]["completed"], true);
        let stored: chrono::DateTime<chrono::Utc> =
            serde_json::from_value(todos[0]["completed_on"].clone()).unwrap();
        let replied: chrono::DateTime<chrono::Utc> = completed_on.parse().unwrap();
        assert_eq!(stored, replied);
    }

    #[tokio::test]
    async fn delete_returns_204_and_is_idempotent() {
        let app = test_app().await;
        let id = create(&app, "A", "d").await;

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(empty_request("DELETE", &format!("/todos/{id}")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
        }
        assert!(list(&app).await.is_empty());
    }

    #[tokio::test]
    async fn delete_completed_alias_removes_row() {
        let app = test_app().await;
        let id = create(&app, "A", "d").await;
        app.clone()
            .oneshot(empty_request("PUT", &format!("/todos/complete/{id}")))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/completed/{id}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(list(&app).await.is_empty());
    }

    #[tokio::test]
    async fn list_is_stable_in_id_order() {
        let app = test_app().await;
        for title in ["A", "B", "C"] {
            create(&app, title, "d").await;
        }

        let first = list(&app).await;
        let second = list(&app).await;

        assert_eq!(first, second);
        let titles: Vec<&str> = first.iter().map(|t| t["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn cors_allows_configured_origin_only() {
        let repo = SqliteTodoRepository::in_memory().await.unwrap();
        let app = app(
            AppState::new(Arc::new(repo)),
            cors_layer("http://localhost:5173").unwrap(),
        );

        let request = Request::builder()
            .method("GET")
            .uri("/todos")
            .header("origin", "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:5173"
        );
        assert_eq!(response.headers()["access-control-allow-credentials"], "true");
    }
}
