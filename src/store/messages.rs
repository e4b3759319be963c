// SPDX-License-Identifier: MPL-2.0

use crate::store::db::{ChatDb, Table};
use crate::store::live::LiveQuery;
use crate::store::{OnConflict, StoreError, conflict_err};
use rusqlite::params;
use serde::{Deserialize, Serialize};

/// Message row as stored. `id` is `None` until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRow {
    pub id: Option<i64>,
    pub user_id: i64,
    pub sender_id: String,
    pub content: String,
    pub file_uri: Option<String>,
    pub timestamp: i64,
    pub is_sent: bool,
}

/// Store operations for messages
pub struct MessageStore<'a> {
    db: &'a ChatDb,
}

impl<'a> MessageStore<'a> {
    pub fn new(db: &'a ChatDb) -> Self {
        Self { db }
    }

    /// Append a message. A `None` id lets the store assign one; an explicit
    /// duplicate id fails or is dropped per `on_conflict`.
    pub fn insert(&self, row: &MessageRow, on_conflict: OnConflict) -> Result<(), StoreError> {
        let sql = format!(
            "{} INTO messages (id, user_id, sender_id, content, file_uri, timestamp, is_sent)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            on_conflict.verb()
        );
        self.db
            .conn()
            .execute(
                &sql,
                params![
                    row.id,
                    row.user_id,
                    row.sender_id,
                    row.content,
                    row.file_uri,
                    row.timestamp,
                    row.is_sent,
                ],
            )
            .map_err(|e| conflict_err("messages", e))?;
        self.db.notify(Table::Messages);
        Ok(())
    }

    /// Messages referencing `user_id`, in insertion order. The user row may
    /// not exist; that is the reader's problem, not a query failure.
    pub fn for_user(&self, user_id: i64) -> Result<Vec<MessageRow>, StoreError> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT id, user_id, sender_id, content, file_uri, timestamp, is_sent
             FROM messages WHERE user_id = ?1",
        )?;
        let rows = stmt
            .query_map([user_id], Self::row_to_message)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Live view of one user's messages
    pub fn watch_for_user(&self, user_id: i64) -> LiveQuery<Vec<MessageRow>> {
        let db = self.db.clone();
        LiveQuery::new(
            self.db.subscribe(Table::Messages),
            Box::new(move || MessageStore::new(&db).for_user(user_id)),
        )
    }

    fn row_to_message(row: &rusqlite::Row) -> Result<MessageRow, rusqlite::Error> {
        Ok(MessageRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            sender_id: row.get(2)?,
            content: row.get(3)?,
            file_uri: row.get(4)?,
            timestamp: row.get(5)?,
            is_sent: row.get(6)?,
        })
    }
}
