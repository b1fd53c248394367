mod todo;

pub use todo::*;

use crate::routing_utils::{BasicErrorResponse, ExtraInfo, ValidationErrorSchema};
use utoipa::OpenApi;

/// Collects every request/response schema exposed on the API so they can be merged into the
/// generated OpenAPI document
#[derive(OpenApi)]
#[openapi(components(
    schemas(
        TodoRecord,
        TodoList,
        NewTodo,
        UpdateTodo,
        CompletedFlag,
        InsertedTodo,
        UpdatedTodos,
        DeletedTodos,
        BasicErrorResponse,
        ExtraInfo,
        ValidationErrorSchema,
    ),
))]
pub struct OpenApiSchemas;
