//! HTML rendering. Every page gets the current `user` and any pending flash `messages`.

use axum::response::{Html, IntoResponse, Response};
use tera::{Context, Tera};

use crate::{error::ServerError, flash, server::State};

/// Compile the templates shipped in `templates/`.
pub(crate) fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        ("index.html", include_str!("../templates/index.html")),
        ("edit.html", include_str!("../templates/edit.html")),
        ("404.html", include_str!("../templates/404.html")),
    ])?;
    Ok(tera)
}

/// Render `template` with `context`, adding the first user and the flash message.
///
/// If a flash message is shown, the response also clears it.
pub(crate) async fn page(
    state: &State,
    template: &str,
    mut context: Context,
    flash: Option<String>,
) -> Result<Response, ServerError> {
    let user = state.store.first_user().await?;
    context.insert("user", &user);
    context.insert("messages", &flash.iter().collect::<Vec<_>>());

    let mut res = Html(state.templates.render(template, &context)?).into_response();
    if flash.is_some() {
        flash::consume(&mut res)?;
    }
    Ok(res)
}
