//! To-do list page: an input for new tasks and the list of existing ones. Every change is
//! followed by a full reload of the list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::{NewTodo, Todo};
use crate::state::{after_mutation, normalized_task, toggled, MutationOutcome};

#[component]
pub fn App() -> impl IntoView {
    let (todos, set_todos) = signal(Vec::<Todo>::new());
    let (new_task, set_new_task) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    let settle = move |outcome: MutationOutcome| {
        set_error.set(outcome.banner);
        if outcome.reload {
            set_reload_trigger.update(|n| *n += 1);
        }
    };

    // Reload the list on mount and after every change
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        spawn_local(async move {
            match api::list_todos().await {
                Ok(loaded) => set_todos.set(loaded),
                Err(err) => set_error.set(Some(err)),
            }
        });
    });

    let add_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(task) = normalized_task(&new_task.get()) else {
            return;
        };

        spawn_local(async move {
            let outcome = after_mutation(api::create_todo(&NewTodo { task }).await);
            if outcome.clear_input {
                set_new_task.set(String::new());
            }
            settle(outcome);
        });
    };

    let toggle_todo = move |todo: Todo| {
        spawn_local(async move {
            settle(after_mutation(api::update_todo(todo.id, &toggled(&todo)).await));
        });
    };

    let delete_todo = move |todo_id: i64| {
        spawn_local(async move {
            settle(after_mutation(api::delete_todo(todo_id).await));
        });
    };

    view! {
        <div class="todo-app">
            <h1>"To-Do List"</h1>
            <form class="new-todo-form" on:submit=add_todo>
                <input
                    type="text"
                    placeholder="Add a task..."
                    prop:value=move || new_task.get()
                    on:input=move |ev| set_new_task.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </form>

            <Show when=move || error.get().is_some()>
                <div class="error-banner">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <ul class="todo-list">
                <For
                    each=move || todos.get()
                    key=|todo| (todo.id, todo.task.clone(), todo.completed)
                    children=move |todo| {
                        let row_class = if todo.is_completed() {
                            "todo-row completed"
                        } else {
                            "todo-row"
                        };
                        let checked = todo.is_completed();
                        let todo_id = todo.id;
                        let task = todo.task.clone();
                        view! {
                            <li class=row_class>
                                <input
                                    type="checkbox"
                                    prop:checked=checked
                                    on:change=move |_| toggle_todo(todo.clone())
                                />
                                <span class="task">{task}</span>
                                <button
                                    class="delete"
                                    aria-label="delete"
                                    on:click=move |_| delete_todo(todo_id)
                                >
                                    "🗑"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
