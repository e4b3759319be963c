// SPDX-License-Identifier: MPL-2.0

//! Domain-typed façade over the chat store.
//!
//! Live reads come back as [`LiveQuery`] handles remapped into domain
//! models; writes run on the shared runtime's blocking pool so no caller
//! thread sits on SQLite. A write's effect is visible to every live reader
//! of the same kind before its future resolves.

use crate::domain::{Call, Message, User};
use crate::mapper;
use crate::runtime;
use crate::store::{
    CallStore, ChatDb, LiveQuery, MessageStore, OnConflict, StoreError, UserStore,
};

/// Single entry point the UI shell talks to. Cheap to clone; construct one
/// at the composition root and hand clones to each screen.
#[derive(Clone)]
pub struct ChatRepository {
    db: ChatDb,
}

impl ChatRepository {
    pub fn new(db: ChatDb) -> Self {
        Self { db }
    }

    /// Live view of all users
    pub fn users(&self) -> LiveQuery<Vec<User>> {
        UserStore::new(&self.db)
            .watch_all()
            .map(|rows| rows.into_iter().map(mapper::user_to_domain).collect())
    }

    /// Live view of one user
    pub fn user_by_id(&self, user_id: i64) -> LiveQuery<Option<User>> {
        UserStore::new(&self.db)
            .watch_by_id(user_id)
            .map(|row| row.map(mapper::user_to_domain))
    }

    /// Live view of one user's messages, in insertion order
    pub fn messages_for_user(&self, user_id: i64) -> LiveQuery<Vec<Message>> {
        MessageStore::new(&self.db)
            .watch_for_user(user_id)
            .map(|rows| rows.into_iter().map(mapper::message_to_domain).collect())
    }

    /// Live view of the call log
    pub fn calls(&self) -> LiveQuery<Vec<Call>> {
        CallStore::new(&self.db)
            .watch_all()
            .map(|rows| rows.into_iter().map(mapper::call_to_domain).collect())
    }

    /// Insert a user
    pub async fn insert_user(
        &self,
        user: User,
        on_conflict: OnConflict,
    ) -> Result<(), StoreError> {
        let db = self.db.clone();
        run_blocking(move || UserStore::new(&db).insert(&mapper::user_to_row(&user), on_conflict))
            .await
    }

    /// Store an outgoing or incoming message
    pub async fn send_message(&self, message: Message) -> Result<(), StoreError> {
        let db = self.db.clone();
        run_blocking(move || {
            MessageStore::new(&db).insert(&mapper::message_to_row(&message), OnConflict::Fail)
        })
        .await
    }

    /// Append a call log entry
    pub async fn insert_call(
        &self,
        call: Call,
        on_conflict: OnConflict,
    ) -> Result<(), StoreError> {
        let db = self.db.clone();
        run_blocking(move || CallStore::new(&db).insert(&mapper::call_to_row(&call), on_conflict))
            .await
    }
}

/// Run a store operation off the caller's thread.
async fn run_blocking<T, F>(op: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    runtime::spawn_blocking(op)
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
}
