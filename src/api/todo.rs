use crate::domain::todo::driving_ports::TodoPort;
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{
    BasicErrorResponse, GenericErrorResponse, Json, Path, ValidationErrorResponse,
};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::State;
use axum::response::ErrorResponse;
use axum::routing::{get, put};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use validator::Validate;

#[derive(OpenApi)]
#[openapi(paths(list_todos, create_todo, update_todo, delete_todo))]
/// Defines the OpenAPI documentation for the todo API
pub struct TodoApi;
/// Constant used to group todo endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "Todos";

/// Builds a router for the "/todos" collection and its items
pub fn todo_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/todos",
            get(|State(app_state): AppState| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let todo_service = domain::todo::TodoService {};

                list_todos(&mut ext_cxn, &todo_service).await
            })
            .post(
                |State(app_state): AppState, Json(new_todo): Json<dto::NewTodo>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    create_todo(new_todo, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/todos/:todo_id",
            put(
                |State(app_state): AppState,
                 Path(todo_id): Path<i64>,
                 Json(update): Json<dto::UpdateTodo>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    update_todo(todo_id, update, &mut ext_cxn, &todo_service).await
                },
            )
            .delete(
                |State(app_state): AppState, Path(todo_id): Path<i64>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    delete_todo(todo_id, &mut ext_cxn, &todo_service).await
                },
            ),
        )
}

#[utoipa::path(
    get,
    path = "/todos",
    tag = TODO_API_GROUP,
    responses(
        (status = 200, description = "Every todo on the list, in storage order", body = dto::TodoList),
        (status = 400, description = "The todos could not be read", body = BasicErrorResponse),
    ),
)]
/// Retrieves the whole todo list
async fn list_todos(
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::TodoList>, ErrorResponse> {
    info!("Requested todos");
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader;

    let todos = todo_service
        .list_todos(&mut *ext_cxn, &todo_reader)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Json(dto::TodoList {
        todos: todos.into_iter().map(dto::TodoRecord::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/todos",
    tag = TODO_API_GROUP,
    request_body = dto::NewTodo,
    responses(
        (status = 200, description = "The todo was created", body = dto::InsertedTodo),
        (status = 400, description = "Invalid input or storage failure", body = BasicErrorResponse),
    ),
)]
/// Puts a new, incomplete todo on the list
async fn create_todo(
    new_todo: dto::NewTodo,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::InsertedTodo>, ErrorResponse> {
    info!("Attempt to create todo: {}", new_todo);
    new_todo
        .validate()
        .map_err(ValidationErrorResponse::from)?;

    let domain_todo = domain::todo::NewTodo::from(new_todo);
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    let id = todo_service
        .create_todo(&domain_todo, &mut *ext_cxn, &todo_writer)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Json(dto::InsertedTodo { id }))
}

#[utoipa::path(
    put,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = i64, Path, description = "ID of the todo to overwrite")),
    request_body = dto::UpdateTodo,
    responses(
        (status = 200, description = "Number of todos changed, 0 if the ID is unknown", body = dto::UpdatedTodos),
        (status = 400, description = "Invalid input or storage failure", body = BasicErrorResponse),
    ),
)]
/// Overwrites the task text and completion state of a todo
async fn update_todo(
    todo_id: i64,
    update: dto::UpdateTodo,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::UpdatedTodos>, ErrorResponse> {
    info!("Updating todo {todo_id}");
    update.validate().map_err(ValidationErrorResponse::from)?;

    let domain_update = domain::todo::UpdateTodo::from(update);
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    let updated = todo_service
        .update_todo(todo_id, &domain_update, &mut *ext_cxn, &todo_writer)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Json(dto::UpdatedTodos { updated }))
}

#[utoipa::path(
    delete,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = i64, Path, description = "ID of the todo to remove")),
    responses(
        (status = 200, description = "Number of todos removed, 0 if the ID is unknown", body = dto::DeletedTodos),
        (status = 400, description = "Storage failure", body = BasicErrorResponse),
    ),
)]
/// Removes a todo from the list
async fn delete_todo(
    todo_id: i64,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::DeletedTodos>, ErrorResponse> {
    info!("Deleting todo {todo_id}");
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    let deleted = todo_service
        .delete_todo(todo_id, &mut *ext_cxn, &todo_writer)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Json(dto::DeletedTodos { deleted }))
}
