use crate::domain;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// DTO for a returned todo on the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoRecord {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "write spec")]
    pub task: String,
    /// 1 if the task is done, 0 otherwise
    #[schema(example = 0)]
    pub completed: u8,
}

impl TodoRecord {
    pub fn is_completed(&self) -> bool {
        self.completed != 0
    }
}

impl From<domain::todo::TodoItem> for TodoRecord {
    fn from(value: domain::todo::TodoItem) -> Self {
        TodoRecord {
            id: value.id,
            task: value.task,
            completed: u8::from(value.completed),
        }
    }
}

/// DTO wrapping the full todo collection
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TodoList {
    pub todos: Vec<TodoRecord>,
}

/// DTO for creating a new todo via the API
#[derive(Debug, Display, Serialize, Deserialize, Validate, ToSchema)]
#[display("{task}")]
pub struct NewTodo {
    #[validate(custom = "not_blank")]
    #[schema(example = "buy milk")]
    pub task: String,
}

impl From<NewTodo> for domain::todo::NewTodo {
    fn from(value: NewTodo) -> Self {
        domain::todo::NewTodo { task: value.task }
    }
}

/// DTO replacing a todo's full state via the API
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTodo {
    #[validate(custom = "not_blank")]
    #[schema(example = "buy milk")]
    pub task: String,
    #[validate(custom = "is_flag")]
    pub completed: CompletedFlag,
}

impl From<UpdateTodo> for domain::todo::UpdateTodo {
    fn from(value: UpdateTodo) -> Self {
        domain::todo::UpdateTodo {
            task: value.task,
            completed: value.completed.is_set(),
        }
    }
}

/// Completion state as sent by clients: either a JSON boolean or the integers 0 and 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CompletedFlag {
    Bool(bool),
    Number(i64),
}

impl CompletedFlag {
    pub fn is_set(self) -> bool {
        match self {
            Self::Bool(flag) => flag,
            Self::Number(flag) => flag != 0,
        }
    }
}

impl From<bool> for CompletedFlag {
    fn from(value: bool) -> Self {
        Self::Number(i64::from(value))
    }
}

/// DTO containing the ID of a todo that was created via the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InsertedTodo {
    #[schema(example = 1)]
    pub id: i64,
}

/// DTO reporting how many todos an update touched
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatedTodos {
    #[schema(example = 1)]
    pub updated: u64,
}

/// DTO reporting how many todos a delete removed
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedTodos {
    #[schema(example = 1)]
    pub deleted: u64,
}

fn not_blank(task: &str) -> Result<(), ValidationError> {
    if task.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }

    Ok(())
}

fn is_flag(completed: &CompletedFlag) -> Result<(), ValidationError> {
    match completed {
        CompletedFlag::Bool(_) | CompletedFlag::Number(0 | 1) => Ok(()),
        CompletedFlag::Number(_) => Err(ValidationError::new("flag")),
    }
}
