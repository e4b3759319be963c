// SPDX-License-Identifier: MPL-2.0

mod calls;
mod chats;
mod conversation;

pub use calls::{CallLog, CallsState, CallsUiState};
pub use chats::{ChatsState, ChatsUiState};
pub use conversation::{Conversation, ConversationState, ConversationUiState};

use crate::domain::{Call, User};
use crate::repository::ChatRepository;
use crate::store::{ChatDb, OnConflict, StoreError};

/// Immutable render input for one screen: loading, data, or an error
/// message, never a mix the renderer has to untangle.
#[derive(Debug, Clone)]
pub struct UiState<T> {
    pub data: T,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T: Default> UiState<T> {
    pub fn loading() -> Self {
        Self {
            data: T::default(),
            is_loading: true,
            error: None,
        }
    }

    pub fn failed(err: impl std::fmt::Display) -> Self {
        Self {
            data: T::default(),
            is_loading: false,
            error: Some(err.to_string()),
        }
    }
}

impl<T> UiState<T> {
    pub fn ready(data: T) -> Self {
        Self {
            data,
            is_loading: false,
            error: None,
        }
    }
}

/// Contacts demoed on first launch.
const SEED_USERS: [(i64, &str); 3] = [(1, "Alice"), (2, "Bob"), (3, "Charlie")];

/// Insert the demo contacts, only when the user table is empty.
pub(crate) async fn seed_users(repo: &ChatRepository) -> Result<(), StoreError> {
    if !repo.users().get()?.is_empty() {
        return Ok(());
    }
    tracing::debug!("empty user table, inserting demo contacts");
    for (id, name) in SEED_USERS {
        let user = User {
            id,
            name: name.to_string(),
        };
        repo.insert_user(user, OnConflict::Ignore).await?;
    }
    Ok(())
}

/// Insert the demo call log, only when the call table is empty.
pub(crate) async fn seed_calls(repo: &ChatRepository) -> Result<(), StoreError> {
    if !repo.calls().get()?.is_empty() {
        return Ok(());
    }
    tracing::debug!("empty call log, inserting demo calls");
    let now = ChatDb::now_millis();
    let seed = [
        Call {
            id: 1,
            user_id: 1,
            timestamp: now,
            is_outgoing: true,
            is_video: false,
        },
        Call {
            id: 2,
            user_id: 2,
            timestamp: now - 3_600_000,
            is_outgoing: false,
            is_video: true,
        },
    ];
    for call in seed {
        repo.insert_call(call, OnConflict::Ignore).await?;
    }
    Ok(())
}
