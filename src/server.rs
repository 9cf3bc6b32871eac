use anyhow::Result;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::{path::PathBuf, sync::Arc};
use tera::Tera;
use tower_http::{add_extension::AddExtensionLayer, services::ServeDir, trace::TraceLayer};

use crate::{config::Config, flash::FlashSigner, handlers, render, store::Store};

/// Everything a request handler may need, built once at startup.
pub struct State {
    pub(crate) store: Store,
    pub(crate) templates: Tera,
    pub(crate) flash: FlashSigner,
    pub(crate) static_dir: PathBuf,
}

impl State {
    /// Attempt to create a new State instance
    pub async fn try_new(config: &Config) -> Result<State> {
        let store = Store::connect(&config.database_url).await?;
        State::with_store(store, config)
    }

    /// Build the state around an already connected store.
    pub fn with_store(store: Store, config: &Config) -> Result<State> {
        Ok(State {
            store,
            templates: render::templates()?,
            flash: FlashSigner::new(config.secret_key.as_bytes())?,
            static_dir: config.static_dir.clone(),
        })
    }
}

/// The application's routes and middleware.
pub fn router(state: Arc<State>) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(handlers::index).post(handlers::create_todo))
        .route(
            "/todo/edit/:id",
            get(handlers::edit_todo).post(handlers::update_todo),
        )
        .route("/todo/delete/:id", post(handlers::delete_todo))
        .nest_service("/static", static_files)
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(handlers::not_found_page))
        .layer(AddExtensionLayer::new(state))
        .layer(TraceLayer::new_for_http())
}

/// Run the server.
pub async fn run(config: Config) -> Result<()> {
    let state = State::try_new(&config).await?;
    state.store.init_schema(false).await?;

    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
