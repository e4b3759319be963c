// SPDX-License-Identifier: MPL-2.0

//! Pure conversions between stored rows and domain models.
//!
//! Total functions in both directions, one pair per record kind. The stored
//! `is_sent` flag is authoritative and copied verbatim; the storage-assigned
//! message id is the single field the domain shape does not carry.

use crate::domain::{Call, Message, User};
use crate::store::{CallRow, MessageRow, UserRow};

pub fn user_to_domain(row: UserRow) -> User {
    User {
        id: row.id,
        name: row.name,
    }
}

pub fn user_to_row(user: &User) -> UserRow {
    UserRow {
        id: user.id,
        name: user.name.clone(),
    }
}

pub fn message_to_domain(row: MessageRow) -> Message {
    Message {
        user_id: row.user_id,
        sender_id: row.sender_id,
        text: row.content,
        file_uri: row.file_uri,
        timestamp: row.timestamp,
        is_sent: row.is_sent,
    }
}

/// A mapped message always inserts as a fresh row; the store assigns the id.
pub fn message_to_row(message: &Message) -> MessageRow {
    MessageRow {
        id: None,
        user_id: message.user_id,
        sender_id: message.sender_id.clone(),
        content: message.text.clone(),
        file_uri: message.file_uri.clone(),
        timestamp: message.timestamp,
        is_sent: message.is_sent,
    }
}

pub fn call_to_domain(row: CallRow) -> Call {
    Call {
        id: row.id,
        user_id: row.user_id,
        timestamp: row.timestamp,
        is_outgoing: row.is_outgoing,
        is_video: row.is_video,
    }
}

pub fn call_to_row(call: &Call) -> CallRow {
    CallRow {
        id: call.id,
        user_id: call.user_id,
        timestamp: call.timestamp,
        is_outgoing: call.is_outgoing,
        is_video: call.is_video,
    }
}
