//! Typed client for the todo API. Requests go through [reqwest_tracing::TracingMiddleware], so
//! the caller's trace context travels with them.

use crate::dto;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not build the HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("could not reach the todo API: {0}")]
    Transport(#[from] reqwest_middleware::Error),
    #[error("the todo API rejected the request with status {status} ({error_code}): {error}")]
    Api {
        status: u16,
        error_code: String,
        error: String,
    },
    #[error("could not read the todo API's response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Failure body sent back by the API
#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
    #[serde(default)]
    error_code: String,
}

#[derive(Clone)]
pub struct TodoClient {
    base_url: String,
    http_client: ClientWithMiddleware,
}

impl TodoClient {
    /// Creates a client for the API rooted at [base_url], e.g. `http://localhost:5000`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(ClientError::Build)?;
        let http_client = ClientBuilder::new(base_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(TodoClient {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_todos(&self) -> Result<Vec<dto::TodoRecord>, ClientError> {
        let response = self
            .http_client
            .get(format!("{}/todos", self.base_url))
            .send()
            .await?;
        let todo_list: dto::TodoList = read_body(response).await?;

        Ok(todo_list.todos)
    }

    /// Creates a todo and returns its new ID
    #[tracing::instrument(skip(self))]
    pub async fn create_todo(&self, task: &str) -> Result<i64, ClientError> {
        let response = self
            .http_client
            .post(format!("{}/todos", self.base_url))
            .json(&dto::NewTodo {
                task: task.to_owned(),
            })
            .send()
            .await?;
        let inserted: dto::InsertedTodo = read_body(response).await?;

        Ok(inserted.id)
    }

    /// Overwrites a todo, returning the number of todos changed
    #[tracing::instrument(skip(self))]
    pub async fn update_todo(
        &self,
        todo_id: i64,
        task: &str,
        completed: bool,
    ) -> Result<u64, ClientError> {
        let response = self
            .http_client
            .put(format!("{}/todos/{todo_id}", self.base_url))
            .json(&dto::UpdateTodo {
                task: task.to_owned(),
                completed: dto::CompletedFlag::from(completed),
            })
            .send()
            .await?;
        let updated: dto::UpdatedTodos = read_body(response).await?;

        Ok(updated.updated)
    }

    /// Deletes a todo, returning the number of todos removed
    #[tracing::instrument(skip(self))]
    pub async fn delete_todo(&self, todo_id: i64) -> Result<u64, ClientError> {
        let response = self
            .http_client
            .delete(format!("{}/todos/{todo_id}", self.base_url))
            .send()
            .await?;
        let deleted: dto::DeletedTodos = read_body(response).await?;

        Ok(deleted.deleted)
    }
}

/// Decodes a successful response into [T], or turns a failed one into [ClientError::Api]
async fn read_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(ClientError::Decode);
    }

    let raw_body = response.text().await.map_err(ClientError::Decode)?;
    let error_body = serde_json::from_str::<ApiErrorBody>(&raw_body).unwrap_or(ApiErrorBody {
        error: raw_body,
        error_code: String::new(),
    });

    Err(ClientError::Api {
        status: status.as_u16(),
        error_code: error_body.error_code,
        error: error_body.error,
    })
}
