use chrono::NaiveDate;
use exemplar::Model;
use rusqlite::Connection;
use sea_query::{enum_def, Expr, Order, Query, SqliteQueryBuilder};
use sea_query_rusqlite::RusqliteBinder;
use serde::{Deserialize, Serialize};

use crate::{
    model::{StoreError, User},
    types::Uuid,
};

/// One stored exercise entry. `id` is the SQLite rowid; fetching a user's
/// exercises in ascending `id` order is the insertion-order contract the
/// log query engine relies on
#[derive(Debug, Clone, PartialEq, Model, Serialize, Deserialize)]
#[table("exercise")]
#[enum_def]
pub struct Exercise {
    pub id: i64,
    pub user_id: Uuid,
    pub description: String,
    pub duration: u32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Model, Serialize, Deserialize)]
#[table("exercise")]
pub struct NewExercise {
    pub user_id: Uuid,
    pub description: String,
    pub duration: u32,
    pub date: NaiveDate,
}

impl NewExercise {
    pub fn new<S: Into<String>>(
        user_id: Uuid,
        description: S,
        duration: u32,
        date: NaiveDate,
    ) -> Self {
        Self { user_id, description: description.into(), duration, date }
    }
}

impl Exercise {
    fn fetch_by_rowid(conn: &Connection, rowid: i64) -> Result<Exercise, StoreError> {
        let (sql, values) = Query::select()
            .columns([
                ExerciseIden::Id,
                ExerciseIden::UserId,
                ExerciseIden::Description,
                ExerciseIden::Duration,
                ExerciseIden::Date,
            ])
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::Id).eq(rowid))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercise = stmt.query_row(&*values.as_params(), Exercise::from_row)?;
        Ok(exercise)
    }

    /// A user's full exercise list in the order it was submitted
    pub fn fetch_for_user(conn: &Connection, user_id: &Uuid) -> Result<Vec<Exercise>, StoreError> {
        let (sql, values) = Query::select()
            .columns([
                ExerciseIden::Id,
                ExerciseIden::UserId,
                ExerciseIden::Description,
                ExerciseIden::Duration,
                ExerciseIden::Date,
            ])
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::UserId).eq(user_id))
            .order_by(ExerciseIden::Id, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercises = stmt
            .query_map(&*values.as_params(), Exercise::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(exercises)
    }

    /// Appends an exercise to a user's log. Resolving the user and inserting
    /// the row happen in one transaction; the insert itself is a single
    /// statement so concurrent appends to the same user serialize in SQLite
    /// rather than losing updates to a read-modify-write race
    pub fn append(
        conn: &mut Connection,
        new_exercise: NewExercise,
    ) -> Result<(User, Exercise), StoreError> {
        let tx = conn.transaction()?;
        let user = User::fetch_by_id(&tx, &new_exercise.user_id)?
            .ok_or(StoreError::UserNotFound(new_exercise.user_id))?;
        new_exercise.insert(&tx)?;
        let exercise = Exercise::fetch_by_rowid(&tx, tx.last_insert_rowid())?;
        tx.commit()?;

        Ok((user, exercise))
    }
}
