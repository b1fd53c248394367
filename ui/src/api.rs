//! HTTP calls to the todo API. Every call resolves to a displayable error message on failure.

use crate::models::{ApiError, NewTodo, Todo, TodoList, UpdateTodo};
use serde::de::DeserializeOwned;

/// Where the API lives, fixed at build time through `TODO_API_URL`
fn todos_url() -> String {
    let base_url = option_env!("TODO_API_URL").unwrap_or("http://localhost:5000");
    format!("{}/todos", base_url.trim_end_matches('/'))
}

pub async fn list_todos() -> Result<Vec<Todo>, String> {
    let response = reqwest::Client::new()
        .get(todos_url())
        .send()
        .await
        .map_err(|err| err.to_string())?;
    let todo_list: TodoList = read_body(response).await?;

    Ok(todo_list.todos)
}

pub async fn create_todo(new_todo: &NewTodo) -> Result<(), String> {
    let response = reqwest::Client::new()
        .post(todos_url())
        .json(new_todo)
        .send()
        .await
        .map_err(|err| err.to_string())?;

    read_body::<serde_json::Value>(response).await.map(|_| ())
}

pub async fn update_todo(todo_id: i64, update: &UpdateTodo) -> Result<(), String> {
    let response = reqwest::Client::new()
        .put(format!("{}/{todo_id}", todos_url()))
        .json(update)
        .send()
        .await
        .map_err(|err| err.to_string())?;

    read_body::<serde_json::Value>(response).await.map(|_| ())
}

pub async fn delete_todo(todo_id: i64) -> Result<(), String> {
    let response = reqwest::Client::new()
        .delete(format!("{}/{todo_id}", todos_url()))
        .send()
        .await
        .map_err(|err| err.to_string())?;

    read_body::<serde_json::Value>(response).await.map(|_| ())
}

async fn read_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, String> {
    if response.status().is_success() {
        return response.json::<T>().await.map_err(|err| err.to_string());
    }

    let status = response.status();
    let raw_body = response.text().await.map_err(|err| err.to_string())?;
    match serde_json::from_str::<ApiError>(&raw_body) {
        Ok(api_error) => Err(api_error.error),
        Err(_) => Err(format!("request failed with status {status}")),
    }
}
