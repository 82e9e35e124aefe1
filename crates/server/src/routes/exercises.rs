use axum::Json;
use shared::{
    api::{AddExercisePayload, AddExerciseResponse},
    date,
    model::{Exercise, NewExercise},
    types::Uuid,
};
use tracing::instrument;

use crate::{db::DatabaseConnection, ApiError, FormOrJson};

/// Appends an exercise to a user's log. The duration must be a positive
/// integer; a missing or invalid date falls back to the current date
#[instrument(skip_all)]
pub async fn add_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    FormOrJson(payload): FormOrJson<AddExercisePayload>,
) -> Result<Json<AddExerciseResponse>, ApiError> {
    let duration = payload.duration.minutes()?;
    // An id that doesn't parse can't resolve to a user
    let user_id = Uuid::parse(&payload.user_id).map_err(|_| ApiError::UserNotFound)?;
    let exercise_date = date::date_or_today(payload.date.as_deref());

    let new_exercise = NewExercise::new(user_id, payload.description, duration, exercise_date);
    let (user, exercise) =
        conn.interact(move |conn| Exercise::append(conn, new_exercise)).await??;

    Ok(Json(AddExerciseResponse::new(user, exercise)))
}
