// SPDX-License-Identifier: MPL-2.0

mod calls;
mod db;
mod live;
mod messages;
mod schema;
mod users;

pub use calls::{CallRow, CallStore};
pub use db::{ChatDb, Table};
pub use live::LiveQuery;
pub use messages::{MessageRow, MessageStore};
pub use users::{UserRow, UserStore};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("conflicting insert into {0}")]
    Conflict(&'static str),
    #[error("not found")]
    NotFound,
    #[error("database path error: {0}")]
    Path(String),
    #[error("background task failed: {0}")]
    Task(String),
}

/// What a duplicate primary key does to an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnConflict {
    /// Surface the uniqueness violation as [`StoreError::Conflict`].
    Fail,
    /// Keep the existing row and drop the insert silently.
    Ignore,
}

impl OnConflict {
    pub(crate) fn verb(self) -> &'static str {
        match self {
            OnConflict::Fail => "INSERT",
            OnConflict::Ignore => "INSERT OR IGNORE",
        }
    }
}

/// Narrow a uniqueness violation to its own variant; everything else stays
/// a plain database error.
pub(crate) fn conflict_err(table: &'static str, e: rusqlite::Error) -> StoreError {
    match e {
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StoreError::Conflict(table)
        }
        other => StoreError::Database(other),
    }
}
