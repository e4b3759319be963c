// SPDX-License-Identifier: MPL-2.0

use crate::store::StoreError;
use crate::store::schema::SCHEMA;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Record kinds a live query can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    Messages,
    Calls,
}

/// Per-table change counters backing live queries. A bump means "re-read";
/// coalescing intermediate bumps is fine because readers only ever want the
/// latest result set.
struct Signals {
    users: watch::Sender<u64>,
    messages: watch::Sender<u64>,
    calls: watch::Sender<u64>,
}

impl Signals {
    fn new() -> Self {
        Self {
            users: watch::Sender::new(0),
            messages: watch::Sender::new(0),
            calls: watch::Sender::new(0),
        }
    }

    fn for_table(&self, table: Table) -> &watch::Sender<u64> {
        match table {
            Table::Users => &self.users,
            Table::Messages => &self.messages,
            Table::Calls => &self.calls,
        }
    }
}

/// Handle to the chat database
#[derive(Clone)]
pub struct ChatDb {
    conn: Arc<Mutex<Connection>>,
    signals: Arc<Signals>,
}

impl ChatDb {
    /// Open or create the database at an explicit path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Path(format!("failed to create data dir: {}", e)))?;
        }

        let conn = Connection::open(path)?;

        // Run migrations
        Self::migrate(&conn)?;

        tracing::info!(path = %path.display(), "opened chat database");
        Ok(Self::from_conn(conn))
    }

    /// Open or create the database at the default location.
    /// Path: ~/.local/share/confab/chat.db
    pub fn open_default() -> Result<Self, StoreError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| StoreError::Path("could not find data directory".to_string()))?;
        Self::open(&data_dir.join("confab").join("chat.db"))
    }

    /// In-memory database, private to this handle and its clones.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::migrate(&conn)?;
        Ok(Self::from_conn(conn))
    }

    fn from_conn(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            signals: Arc::new(Signals::new()),
        }
    }

    /// Run schema migrations (all CREATE IF NOT EXISTS)
    fn migrate(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Access connection for operations
    pub(crate) fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("store lock poisoned")
    }

    /// Bump a table's change counter. Writers call this after the write has
    /// committed and before returning to the caller, so a completed write is
    /// always observable by live readers.
    pub(crate) fn notify(&self, table: Table) {
        self.signals.for_table(table).send_modify(|v| *v += 1);
    }

    pub(crate) fn subscribe(&self, table: Table) -> watch::Receiver<u64> {
        self.signals.for_table(table).subscribe()
    }

    /// Current unix timestamp in milliseconds
    pub fn now_millis() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
