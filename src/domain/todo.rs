use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::external_connections::ExternalConnectivity;
use anyhow::{Context, Error};
use tracing::info;

/// A single entry on the todo list
#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct TodoItem {
    pub id: i64,
    pub task: String,
    pub completed: bool,
}

/// Data needed to put a new item on the list. New items always start out incomplete.
#[derive(Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct NewTodo {
    pub task: String,
}

/// Full replacement state for an existing item. Both fields are always overwritten.
#[derive(Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct UpdateTodo {
    pub task: String,
    pub completed: bool,
}

pub mod driven_ports {
    use super::*;

    pub trait TodoReader {
        /// Fetches every item in the store's natural order
        async fn all_todos(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;
    }

    pub trait TodoWriter {
        /// Stores a new, incomplete item and returns its freshly assigned ID
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<i64, anyhow::Error>;

        /// Overwrites an item, returning how many rows changed
        async fn update_todo(
            &self,
            todo_id: i64,
            update: &UpdateTodo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<u64, anyhow::Error>;

        /// Removes an item, returning how many rows were removed
        async fn delete_todo(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<u64, anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;

    pub trait TodoPort {
        async fn list_todos(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<i64, anyhow::Error>;
        async fn update_todo(
            &self,
            todo_id: i64,
            update: &UpdateTodo,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<u64, anyhow::Error>;
        async fn delete_todo(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<u64, anyhow::Error>;
    }
}

/// Implements [driving_ports::TodoPort]. A missing ID on update or delete is not an error,
/// it simply affects zero rows.
pub struct TodoService {}

impl driving_ports::TodoPort for TodoService {
    async fn list_todos(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<Vec<TodoItem>, Error> {
        let todos = todo_read
            .all_todos(&mut *ext_cxn)
            .await
            .context("listing todos")?;

        Ok(todos)
    }

    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<i64, Error> {
        let new_id = todo_write
            .create_todo(new_todo, &mut *ext_cxn)
            .await
            .context("creating a todo")?;
        info!(todo_id = new_id, "Created todo");

        Ok(new_id)
    }

    async fn update_todo(
        &self,
        todo_id: i64,
        update: &UpdateTodo,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<u64, Error> {
        let updated = todo_write
            .update_todo(todo_id, update, &mut *ext_cxn)
            .await
            .context("updating a todo")?;
        if updated == 0 {
            info!(todo_id, "No todo matched the update");
        }

        Ok(updated)
    }

    async fn delete_todo(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<u64, Error> {
        let deleted = todo_write
            .delete_todo(todo_id, &mut *ext_cxn)
            .await
            .context("deleting a todo")?;
        if deleted == 0 {
            info!(todo_id, "No todo matched the delete");
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::test_util::*;
    use super::*;
    use crate::domain::test_util::Connectivity;
    use crate::domain::todo::driving_ports::TodoPort;
    use crate::external_connections;
    use speculoos::prelude::*;
    use std::sync::RwLock;

    mod list_todos {
        use super::*;

        #[tokio::test]
        async fn happy_path() {
            let todo_persist = RwLock::new(InMemoryTodoPersistence::new_with_tasks(&[
                "Something to do",
                "Another thing to do",
            ]));
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();

            let fetched_todos = TodoService {}
                .list_todos(&mut ext_cxn, &todo_persist)
                .await;
            assert_that!(fetched_todos).is_ok().matches(|todos| {
                matches!(todos.as_slice(), [
                    TodoItem { id: 1, task: first, completed: false },
                    TodoItem { id: 2, task: second, completed: false },
                ] if first == "Something to do" && second == "Another thing to do")
            });
            assert_eq!(0, ext_cxn.db_requests);
        }

        #[tokio::test]
        async fn returns_port_err() {
            let mut raw_persist = InMemoryTodoPersistence::new();
            raw_persist.connected = Connectivity::Disconnected;
            let todo_persist = RwLock::new(raw_persist);
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();

            let fetched_todos = TodoService {}
                .list_todos(&mut ext_cxn, &todo_persist)
                .await;
            assert_that!(fetched_todos).is_err();
        }
    }

    mod create_todo {
        use super::*;

        #[tokio::test]
        async fn happy_path() {
            let todo_persist = InMemoryTodoPersistence::new_locked();
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();
            let new_todo = NewTodo {
                task: "buy milk".to_owned(),
            };

            let create_result = TodoService {}
                .create_todo(&new_todo, &mut ext_cxn, &todo_persist)
                .await;
            assert_that!(create_result).is_ok_containing(1);

            let locked_persist = todo_persist.read().expect("todo persist rw lock poisoned");
            assert!(matches!(locked_persist.todos.as_slice(), [
                TodoItem { id: 1, task, completed: false }
            ] if task == "buy milk"));
        }

        #[tokio::test]
        async fn assigns_fresh_ids() {
            let todo_persist = RwLock::new(InMemoryTodoPersistence::new_with_tasks(&["abcde"]));
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();
            let service = TodoService {};
            let new_todo = NewTodo {
                task: "fghij".to_owned(),
            };

            let first_id = service
                .create_todo(&new_todo, &mut ext_cxn, &todo_persist)
                .await
                .expect("first create failed");
            let second_id = service
                .create_todo(&new_todo, &mut ext_cxn, &todo_persist)
                .await
                .expect("second create failed");

            assert_eq!(2, first_id);
            assert_eq!(3, second_id);
        }

        #[tokio::test]
        async fn returns_port_err() {
            let mut raw_persist = InMemoryTodoPersistence::new();
            raw_persist.connected = Connectivity::Disconnected;
            let todo_persist = RwLock::new(raw_persist);
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();

            let create_result = TodoService {}
                .create_todo(
                    &NewTodo {
                        task: "Something to do".to_owned(),
                    },
                    &mut ext_cxn,
                    &todo_persist,
                )
                .await;
            let Err(create_err) = create_result else {
                panic!("Create unexpectedly succeeded: {create_result:#?}");
            };
            assert!(format!("{create_err:#}").starts_with("creating a todo"));
        }
    }

    mod update_todo {
        use super::*;

        #[tokio::test]
        async fn happy_path() {
            let todo_persist =
                RwLock::new(InMemoryTodoPersistence::new_with_tasks(&["abcde", "fghij"]));
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();

            let update_result = TodoService {}
                .update_todo(
                    2,
                    &UpdateTodo {
                        task: "Something to do".to_owned(),
                        completed: true,
                    },
                    &mut ext_cxn,
                    &todo_persist,
                )
                .await;
            assert_that!(update_result).is_ok_containing(1);

            let locked_persist = todo_persist.read().expect("rw lock poisoned");
            assert_eq!("Something to do", locked_persist.todos[1].task);
            assert!(locked_persist.todos[1].completed);
            assert!(!locked_persist.todos[0].completed);
        }

        #[tokio::test]
        async fn repeating_an_update_changes_nothing_further() {
            let todo_persist = RwLock::new(InMemoryTodoPersistence::new_with_tasks(&["abcde"]));
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();
            let service = TodoService {};
            let update = UpdateTodo {
                task: "abcde".to_owned(),
                completed: true,
            };

            let first = service
                .update_todo(1, &update, &mut ext_cxn, &todo_persist)
                .await;
            let second = service
                .update_todo(1, &update, &mut ext_cxn, &todo_persist)
                .await;

            assert_that!(first).is_ok_containing(1);
            assert_that!(second).is_ok_containing(1);
            let locked_persist = todo_persist.read().expect("rw lock poisoned");
            assert_eq!(
                vec![TodoItem {
                    id: 1,
                    task: "abcde".to_owned(),
                    completed: true,
                }],
                locked_persist.todos
            );
        }

        #[tokio::test]
        async fn happy_path_todo_doesnt_exist() {
            let todo_persist = InMemoryTodoPersistence::new_locked();
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();

            let update_result = TodoService {}
                .update_todo(
                    5,
                    &UpdateTodo {
                        task: "Something to do".to_owned(),
                        completed: false,
                    },
                    &mut ext_cxn,
                    &todo_persist,
                )
                .await;
            assert_that!(update_result).is_ok_containing(0);
        }

        #[tokio::test]
        async fn returns_port_err() {
            let mut raw_persist = InMemoryTodoPersistence::new();
            raw_persist.connected = Connectivity::Disconnected;
            let todo_persist = RwLock::new(raw_persist);
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();

            let update_result = TodoService {}
                .update_todo(
                    1,
                    &UpdateTodo {
                        task: "Something to do".to_owned(),
                        completed: true,
                    },
                    &mut ext_cxn,
                    &todo_persist,
                )
                .await;
            assert_that!(update_result).is_err();
        }
    }

    mod delete_todo {
        use super::*;

        #[tokio::test]
        async fn happy_path() {
            let todo_persist =
                RwLock::new(InMemoryTodoPersistence::new_with_tasks(&["abcde", "fghij"]));
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();

            let delete_result = TodoService {}
                .delete_todo(2, &mut ext_cxn, &todo_persist)
                .await;
            assert_that!(delete_result).is_ok_containing(1);

            let locked_persist = todo_persist.read().expect("todo persist rw lock poisoned");
            assert!(matches!(locked_persist.todos.as_slice(), [
                TodoItem { id: 1, task, completed: false }
            ] if task == "abcde"));
        }

        #[tokio::test]
        async fn second_delete_removes_nothing() {
            let todo_persist = RwLock::new(InMemoryTodoPersistence::new_with_tasks(&["abcde"]));
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();
            let service = TodoService {};

            let first = service.delete_todo(1, &mut ext_cxn, &todo_persist).await;
            let second = service.delete_todo(1, &mut ext_cxn, &todo_persist).await;

            assert_that!(first).is_ok_containing(1);
            assert_that!(second).is_ok_containing(0);
            assert_eq!(0, ext_cxn.db_requests);
        }

        #[tokio::test]
        async fn returns_port_err() {
            let todo_persist = InMemoryTodoPersistence::new_locked();
            let mut ext_cxn = external_connections::test_util::FakeExternalConnectivity::new();
            {
                let mut locked_persist = todo_persist.write().expect("persist rw lock poisoned");
                locked_persist.connected = Connectivity::Disconnected;
            }

            let delete_result = TodoService {}
                .delete_todo(1, &mut ext_cxn, &todo_persist)
                .await;
            assert_that!(delete_result).is_err();
        }
    }
}
