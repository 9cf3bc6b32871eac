use axum::{
    extract::{Extension, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tera::Context;

use crate::error::ServerError;
use crate::render;
use crate::server::State;

/// Fallback for every unmatched route.
pub(crate) async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// Replace any not-found response, including missing static files, with the rendered 404 page.
pub(crate) async fn not_found_page(
    Extension(state): Extension<Arc<State>>,
    req: Request,
    next: Next,
) -> Response {
    let res = next.run(req).await;
    if res.status() != StatusCode::NOT_FOUND {
        return res;
    }

    match render::page(&state, "404.html", Context::new(), None).await {
        Ok(page) => (StatusCode::NOT_FOUND, page).into_response(),
        Err(e) => e.into_response(),
    }
}
