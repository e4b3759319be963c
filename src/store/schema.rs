// SPDX-License-Identifier: MPL-2.0

/// SQL schema for the chat database
pub const SCHEMA: &str = r#"
-- Database version for migrations
PRAGMA user_version = 1;

-- users: one row per contact
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

-- messages: append-only conversation history.
-- user_id is not a foreign key; orphaned references are legal and readers
-- must tolerate them.
CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    sender_id TEXT NOT NULL,
    content TEXT NOT NULL,
    file_uri TEXT,
    timestamp INTEGER NOT NULL,
    is_sent INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_messages_user ON messages(user_id);

-- calls: append-only call log
CREATE TABLE IF NOT EXISTS calls (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    timestamp INTEGER NOT NULL,
    is_outgoing INTEGER NOT NULL,
    is_video INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_calls_user ON calls(user_id);
"#;
