// SPDX-License-Identifier: MPL-2.0

//! Local-first chat data layer.
//!
//! A durable SQLite entity store for users, messages and calls, with live
//! queries, domain mapping, an async repository façade, and per-screen UI
//! state snapshots. The UI shell embedding this crate owns rendering and
//! navigation; it talks to [`ChatRepository`] and the `state` holders only.

pub mod domain;
pub mod mapper;
pub mod repository;
pub mod runtime;
pub mod state;
pub mod store;

pub use domain::{Call, Message, User};
pub use repository::ChatRepository;
pub use state::{CallsState, ChatsState, ConversationState, UiState};
pub use store::{ChatDb, LiveQuery, OnConflict, StoreError};
