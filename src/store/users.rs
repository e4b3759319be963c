// SPDX-License-Identifier: MPL-2.0

use crate::store::db::{ChatDb, Table};
use crate::store::live::LiveQuery;
use crate::store::{OnConflict, StoreError, conflict_err};
use rusqlite::{OptionalExtension, params};
use serde::{Deserialize, Serialize};

/// User row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
}

/// Store operations for users
pub struct UserStore<'a> {
    db: &'a ChatDb,
}

impl<'a> UserStore<'a> {
    pub fn new(db: &'a ChatDb) -> Self {
        Self { db }
    }

    /// Insert a user. A duplicate id fails or is dropped per `on_conflict`.
    pub fn insert(&self, row: &UserRow, on_conflict: OnConflict) -> Result<(), StoreError> {
        let sql = format!(
            "{} INTO users (id, name) VALUES (?1, ?2)",
            on_conflict.verb()
        );
        self.db
            .conn()
            .execute(&sql, params![row.id, row.name])
            .map_err(|e| conflict_err("users", e))?;
        self.db.notify(Table::Users);
        Ok(())
    }

    /// All users, in insertion order
    pub fn all(&self) -> Result<Vec<UserRow>, StoreError> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare("SELECT id, name FROM users")?;
        let rows = stmt
            .query_map([], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// User by primary key, if present
    pub fn by_id(&self, id: i64) -> Result<Option<UserRow>, StoreError> {
        let conn = self.db.conn();
        let row = conn
            .query_row("SELECT id, name FROM users WHERE id = ?1", [id], |row| {
                Self::row_to_user(row)
            })
            .optional()?;
        Ok(row)
    }

    /// Live view of all users. Re-emits after every write to `users`.
    pub fn watch_all(&self) -> LiveQuery<Vec<UserRow>> {
        let db = self.db.clone();
        LiveQuery::new(
            self.db.subscribe(Table::Users),
            Box::new(move || UserStore::new(&db).all()),
        )
    }

    /// Live view of one user
    pub fn watch_by_id(&self, id: i64) -> LiveQuery<Option<UserRow>> {
        let db = self.db.clone();
        LiveQuery::new(
            self.db.subscribe(Table::Users),
            Box::new(move || UserStore::new(&db).by_id(id)),
        )
    }

    fn row_to_user(row: &rusqlite::Row) -> Result<UserRow, rusqlite::Error> {
        Ok(UserRow {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}
