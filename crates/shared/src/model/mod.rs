use thiserror::Error;

use crate::types::Uuid;

mod user;
pub use user::*;

mod exercise;
pub use exercise::*;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username {0:?} is already registered")]
    DuplicateUsername(String),
    #[error("no user with id {0}")]
    UserNotFound(Uuid),
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
