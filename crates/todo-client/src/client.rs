use reqwest::Response;
use todo_domain::{CompletedTodo, CreatedTodo, ErrorBody, Todo, TodoId, TodoInput, UpdatedTodo};

use crate::error::ClientError;

/// Thin wrapper over the REST surface; one request per call.
#[derive(Debug, Clone)]
pub struct TodoClient {
    http: reqwest::Client,
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let response = self.http.get(self.url("/todos")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Validates before sending; an empty field never reaches the server.
    pub async fn create(&self, input: &TodoInput) -> Result<CreatedTodo, ClientError> {
        input.validate()?;
        let response = self
            .http
            .post(self.url("/todos"))
            .json(input)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn update(&self, id: TodoId, input: &TodoInput) -> Result<UpdatedTodo, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/todos/{id}")))
            .json(input)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn complete(&self, id: TodoId) -> Result<CompletedTodo, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/todos/complete/{id}")))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn delete(&self, id: TodoId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/todos/{id}")))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Turns a non-2xx reply into `ClientError::Server`, preferring the `{error}` body.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(ClientError::Server { status, message })
}
