use axum::{extract::Query, Json};
use shared::{
    api::{LogParams, LogResponse},
    log::query_log,
    model::{Exercise, StoreError, User},
    types::Uuid,
};
use tracing::instrument;

use crate::{db::DatabaseConnection, ApiError};

/// Returns a user's exercise log, optionally filtered to an inclusive
/// from/to date range and truncated to a limit. The query engine is pure;
/// this handler only resolves the user and reads the stored list
#[instrument(skip_all, fields(user_id = %params.user_id))]
pub async fn exercise_log(
    DatabaseConnection(conn): DatabaseConnection,
    Query(params): Query<LogParams>,
) -> Result<Json<LogResponse>, ApiError> {
    let user_id = Uuid::parse(&params.user_id).map_err(|_| ApiError::UserNotFound)?;

    let (user, exercises) = conn
        .interact(move |conn| {
            let user = User::fetch_by_id(conn, &user_id)?
                .ok_or(StoreError::UserNotFound(user_id))?;
            let exercises = Exercise::fetch_for_user(conn, &user_id)?;
            Ok::<_, StoreError>((user, exercises))
        })
        .await??;

    let result = query_log(
        exercises,
        params.from.as_deref(),
        params.to.as_deref(),
        params.limit,
    )?;

    Ok(Json(LogResponse::new(user, result)))
}
