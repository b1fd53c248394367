use crate::domain;
use crate::domain::todo::{NewTodo, TodoItem, UpdateTodo};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use sqlx::{query, query_as};

pub struct DbTodoReader;

/// Raw row from the todos table. The columns are nullable, so rows written before input
/// validation existed can hold NULLs.
#[derive(sqlx::FromRow)]
struct TodoRow {
    id: i64,
    task: Option<String>,
    completed: Option<i64>,
}

impl From<TodoRow> for TodoItem {
    fn from(value: TodoRow) -> Self {
        TodoItem {
            id: value.id,
            task: value.task.unwrap_or_default(),
            completed: value.completed.unwrap_or(0) != 0,
        }
    }
}

impl domain::todo::driven_ports::TodoReader for DbTodoReader {
    async fn all_todos(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<TodoItem>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todos: Vec<TodoItem> =
            query_as::<_, TodoRow>("SELECT id, task, completed FROM todos")
                .fetch_all(cxn.borrow_connection())
                .await
                .context("trying to fetch all todos")?
                .into_iter()
                .map(TodoItem::from)
                .collect();

        Ok(todos)
    }
}

pub struct DbTodoWriter;

impl domain::todo::driven_ports::TodoWriter for DbTodoWriter {
    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<i64, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let new_id = query_as::<_, super::NewId>(
            "INSERT INTO todos (task, completed) VALUES (?, 0) RETURNING id",
        )
        .bind(&new_todo.task)
        .fetch_one(cxn.borrow_connection())
        .await
        .context("trying to insert a new todo into the database")?;

        Ok(new_id.id)
    }

    async fn update_todo(
        &self,
        todo_id: i64,
        update: &UpdateTodo,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<u64, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let result = query("UPDATE todos SET task = ?, completed = ? WHERE id = ?")
            .bind(&update.task)
            .bind(i64::from(update.completed))
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to update a todo in the database")?;

        Ok(result.rows_affected())
    }

    async fn delete_todo(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<u64, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let result = query("DELETE FROM todos WHERE id = ?")
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove a todo from the database")?;

        Ok(result.rows_affected())
    }
}
