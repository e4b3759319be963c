// SPDX-License-Identifier: MPL-2.0

use crate::store::db::{ChatDb, Table};
use crate::store::live::LiveQuery;
use crate::store::{OnConflict, StoreError, conflict_err};
use rusqlite::params;
use serde::{Deserialize, Serialize};

/// Call log row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRow {
    pub id: i64,
    pub user_id: i64,
    pub timestamp: i64,
    pub is_outgoing: bool,
    pub is_video: bool,
}

/// Store operations for the call log
pub struct CallStore<'a> {
    db: &'a ChatDb,
}

impl<'a> CallStore<'a> {
    pub fn new(db: &'a ChatDb) -> Self {
        Self { db }
    }

    /// Append a call log entry. A duplicate id fails or is dropped per
    /// `on_conflict`.
    pub fn insert(&self, row: &CallRow, on_conflict: OnConflict) -> Result<(), StoreError> {
        let sql = format!(
            "{} INTO calls (id, user_id, timestamp, is_outgoing, is_video)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            on_conflict.verb()
        );
        self.db
            .conn()
            .execute(
                &sql,
                params![
                    row.id,
                    row.user_id,
                    row.timestamp,
                    row.is_outgoing,
                    row.is_video,
                ],
            )
            .map_err(|e| conflict_err("calls", e))?;
        self.db.notify(Table::Calls);
        Ok(())
    }

    /// All call log entries, in insertion order
    pub fn all(&self) -> Result<Vec<CallRow>, StoreError> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT id, user_id, timestamp, is_outgoing, is_video FROM calls",
        )?;
        let rows = stmt
            .query_map([], Self::row_to_call)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Live view of the call log
    pub fn watch_all(&self) -> LiveQuery<Vec<CallRow>> {
        let db = self.db.clone();
        LiveQuery::new(
            self.db.subscribe(Table::Calls),
            Box::new(move || CallStore::new(&db).all()),
        )
    }

    fn row_to_call(row: &rusqlite::Row) -> Result<CallRow, rusqlite::Error> {
        Ok(CallRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            timestamp: row.get(2)?,
            is_outgoing: row.get(3)?,
            is_video: row.get(4)?,
        })
    }
}
