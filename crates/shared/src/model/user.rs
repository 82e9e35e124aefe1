use exemplar::Model;
use rusqlite::{Connection, OptionalExtension};
use sea_query::{enum_def, Expr, Order, Query, SqliteQueryBuilder};
use sea_query_rusqlite::RusqliteBinder;
use serde::{Deserialize, Serialize};

use crate::{model::StoreError, types::Uuid};

#[derive(Debug, Clone, PartialEq, Model, Serialize, Deserialize)]
#[table("user")]
#[enum_def]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Model, Serialize, Deserialize)]
#[table("user")]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
}

impl NewUser {
    pub fn new<S: Into<String>>(username: S) -> Self {
        Self { id: Uuid::new_v4(), username: username.into() }
    }
}

impl User {
    pub fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<Option<User>, StoreError> {
        let (sql, values) = Query::select()
            .columns([UserIden::Id, UserIden::Username])
            .from(UserIden::Table)
            .and_where(Expr::col(UserIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt.query_row(&*values.as_params(), User::from_row).optional()?;
        Ok(user)
    }

    pub fn fetch_by_username<T: AsRef<str>>(
        conn: &Connection,
        username: T,
    ) -> Result<Option<User>, StoreError> {
        let (sql, values) = Query::select()
            .columns([UserIden::Id, UserIden::Username])
            .from(UserIden::Table)
            .and_where(Expr::col(UserIden::Username).eq(username.as_ref()))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt.query_row(&*values.as_params(), User::from_row).optional()?;
        Ok(user)
    }

    /// Summary list of every registered user
    pub fn fetch_all(conn: &Connection) -> Result<Vec<User>, StoreError> {
        let (sql, values) = Query::select()
            .columns([UserIden::Id, UserIden::Username])
            .from(UserIden::Table)
            .order_by(UserIden::Username, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let users = stmt
            .query_map(&*values.as_params(), User::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Creates a user. The UNIQUE constraint on username is the duplicate
    /// check; a violation surfaces as `StoreError::DuplicateUsername`
    pub fn create(conn: &mut Connection, new_user: NewUser) -> Result<User, StoreError> {
        let tx = conn.transaction()?;
        match new_user.insert(&tx) {
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(StoreError::DuplicateUsername(new_user.username));
            },
            r => r?,
        }
        let user = User::fetch_by_id(&tx, &new_user.id)?
            .ok_or(StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows))?;
        tx.commit()?;

        Ok(user)
    }
}
