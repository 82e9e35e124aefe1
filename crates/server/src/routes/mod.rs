use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::AppState;

mod users;
pub use users::*;

mod exercises;
pub use exercises::*;

mod log;
pub use log::*;

pub fn router<P: AsRef<Path>>(state: AppState, assets_dir: P) -> Router {
    Router::new()
        .route("/api/exercise/new-user", post(create_user))
        .route("/api/exercise/add", post(add_exercise))
        .route("/api/exercise/users", get(list_users))
        .route("/api/exercise/log", get(exercise_log))
        .nest_service("/", ServeDir::new(assets_dir.as_ref()))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
