use axum::Json;
use shared::{
    api::{NewUserPayload, UserResponse},
    model::{NewUser, StoreError, User},
};
use tracing::instrument;

use crate::{db::DatabaseConnection, ApiError, FormOrJson};

/// Registers a username. Idempotent: registering a name that already exists
/// returns the existing record unchanged
#[instrument(skip_all)]
pub async fn create_user(
    DatabaseConnection(conn): DatabaseConnection,
    FormOrJson(payload): FormOrJson<NewUserPayload>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = conn
        .interact(move |conn| {
            match User::create(conn, NewUser::new(payload.username)) {
                // The unique constraint fired; hand back the existing record
                Err(StoreError::DuplicateUsername(username)) => {
                    User::fetch_by_username(conn, &username)?
                        .ok_or(StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
                },
                r => r,
            }
        })
        .await??;

    Ok(Json(user.into()))
}

#[instrument(skip_all)]
pub async fn list_users(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = conn.interact(|conn| User::fetch_all(conn)).await??;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
