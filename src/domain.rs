// SPDX-License-Identifier: MPL-2.0

use serde::{Deserialize, Serialize};

/// A chat contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// One message in a conversation with the user identified by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The conversation this message belongs to. The store does not require
    /// a matching user row; readers fall back to "Unknown" for orphans.
    pub user_id: i64,
    /// Who authored the message ("me" is the conversation user's own id).
    pub sender_id: String,
    pub text: String,
    /// Attachment reference, if the message carries one.
    pub file_uri: Option<String>,
    /// Epoch milliseconds. Not guaranteed sorted in storage; sort on display.
    pub timestamp: i64,
    /// True for locally-authored messages. Stored as written, never derived
    /// from `sender_id`.
    pub is_sent: bool,
}

/// A voice or video call log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub id: i64,
    pub user_id: i64,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub is_outgoing: bool,
    pub is_video: bool,
}
