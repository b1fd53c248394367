//! Pure helpers behind the UI's event handlers

use crate::models::{Todo, UpdateTodo};

/// Returns the trimmed text to submit for a new todo, or [None] when the input is blank
pub fn normalized_task(input: &str) -> Option<String> {
    let task = input.trim();
    if task.is_empty() {
        None
    } else {
        Some(task.to_owned())
    }
}

/// Builds the update that flips [todo]'s completion while keeping its task
pub fn toggled(todo: &Todo) -> UpdateTodo {
    UpdateTodo {
        task: todo.task.clone(),
        completed: if todo.is_completed() { 0 } else { 1 },
    }
}

/// What the page does once a create, update or delete call settles
#[derive(Debug, PartialEq, Eq)]
pub struct MutationOutcome {
    /// Message for the error banner. [None] hides it.
    pub banner: Option<String>,
    /// Whether the new-task input should be emptied
    pub clear_input: bool,
    /// Whether the full list should be fetched again
    pub reload: bool,
}

/// The list is reloaded after every mutation, failed or not. A success clears the banner and
/// the input, a failure shows its message and keeps what the user typed.
pub fn after_mutation(result: Result<(), String>) -> MutationOutcome {
    match result {
        Ok(()) => MutationOutcome {
            banner: None,
            clear_input: true,
            reload: true,
        },
        Err(message) => MutationOutcome {
            banner: Some(message),
            clear_input: false,
            reload: true,
        },
    }
}
