use axum::{extract::Extension, response::Response};
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;
use validator::Validate;

use crate::constants::{MSG_CREATED, MSG_DELETED, MSG_INVALID_INPUT, MSG_UPDATED};
use crate::error::ServerError;
use crate::flash::{self, Flash};
use crate::handlers::{TodoId, ValidatedForm};
use crate::render;
use crate::server::State;

/// The form input for `POST /` and `POST /todo/edit/:id`.
///
/// Missing fields deserialize as empty strings, so they fail validation instead of the request.
#[derive(Debug, Default, Validate, Deserialize)]
pub(crate) struct TodoForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 60, message = "Title must be 1 to 60 characters"))]
    pub(crate) title: String,
    #[serde(default, rename = "type")]
    #[validate(length(min = 1, max = 15, message = "Type must be 1 to 15 characters"))]
    pub(crate) kind: String,
}

/// Handler for `GET /`
pub(crate) async fn index(
    Extension(state): Extension<Arc<State>>,
    Flash(flash): Flash,
) -> Result<Response, ServerError> {
    let todos = state.store.list_todos().await?;

    let mut context = Context::new();
    context.insert("todos", &todos);
    render::page(&state, "index.html", context, flash).await
}

/// Handler for `POST /`
pub(crate) async fn create_todo(
    Extension(state): Extension<Arc<State>>,
    ValidatedForm(input): ValidatedForm<TodoForm>,
) -> Result<Response, ServerError> {
    let input = match input {
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!("rejected new todo: {}", errors);
            return flash::redirect(&state, "/", MSG_INVALID_INPUT);
        }
    };

    let id = state.store.create_todo(&input.title, &input.kind).await?;
    tracing::info!(id, "created todo");

    flash::redirect(&state, "/", MSG_CREATED)
}

/// Handler for `GET /todo/edit/:id`
pub(crate) async fn edit_todo(
    TodoId(id): TodoId,
    Extension(state): Extension<Arc<State>>,
    Flash(flash): Flash,
) -> Result<Response, ServerError> {
    let todo = state.store.get_todo_or_fail(id).await?;

    let mut context = Context::new();
    context.insert("todo", &todo);
    render::page(&state, "edit.html", context, flash).await
}

/// Handler for `POST /todo/edit/:id`
pub(crate) async fn update_todo(
    TodoId(id): TodoId,
    Extension(state): Extension<Arc<State>>,
    form: Result<ValidatedForm<TodoForm>, ServerError>,
) -> Result<Response, ServerError> {
    // a missing todo is a 404 even when the body is bad
    let todo = state.store.get_todo_or_fail(id).await?;

    let ValidatedForm(input) = form?;
    let input = match input {
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!(id, "rejected todo update: {}", errors);
            return flash::redirect(&state, &format!("/todo/edit/{}", todo.id), MSG_INVALID_INPUT);
        }
    };

    state
        .store
        .update_todo(todo.id, &input.title, &input.kind)
        .await?;
    tracing::info!(id, "updated todo");

    flash::redirect(&state, "/", MSG_UPDATED)
}

/// Handler for `POST /todo/delete/:id`
pub(crate) async fn delete_todo(
    TodoId(id): TodoId,
    Extension(state): Extension<Arc<State>>,
) -> Result<Response, ServerError> {
    let todo = state.store.get_todo_or_fail(id).await?;

    state.store.delete_todo(todo.id).await?;
    tracing::info!(id, "deleted todo");

    flash::redirect(&state, "/", MSG_DELETED)
}
