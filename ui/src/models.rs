//! Data shapes exchanged with the todo API

use serde::{Deserialize, Serialize};

/// A todo as listed by the API. `completed` is 1 when done, 0 otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub task: String,
    pub completed: i64,
}

impl Todo {
    pub fn is_completed(&self) -> bool {
        self.completed == 1
    }
}

#[derive(Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

#[derive(Debug, Serialize)]
pub struct NewTodo {
    pub task: String,
}

/// Full replacement state sent when a todo changes
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct UpdateTodo {
    pub task: String,
    pub completed: i64,
}

/// Failure body sent back by the API
#[derive(Deserialize)]
pub struct ApiError {
    pub error: String,
}
