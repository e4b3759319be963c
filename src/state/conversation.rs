// SPDX-License-Identifier: MPL-2.0

use crate::domain::{Message, User};
use crate::repository::ChatRepository;
use crate::runtime;
use crate::state::UiState;
use crate::store::{ChatDb, StoreError};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Render input for one chat: the peer (if known) and the thread in
/// chronological order.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    pub user: Option<User>,
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Screen title. Messages may reference a user that was never stored;
    /// those threads are titled "Unknown".
    pub fn title(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or("Unknown")
    }
}

pub type ConversationUiState = UiState<Conversation>;

/// State holder for one chat-detail screen.
///
/// Folds the peer's user row and message thread into [`ConversationUiState`]
/// snapshots. Sending is simulated: each outgoing text immediately earns a
/// fabricated reply from the peer, as there is no remote party to answer.
pub struct ConversationState {
    repo: ChatRepository,
    user_id: i64,
    tx: Arc<watch::Sender<ConversationUiState>>,
    task: Option<JoinHandle<()>>,
}

impl ConversationState {
    pub fn new(repo: ChatRepository, user_id: i64) -> Self {
        let tx = Arc::new(watch::Sender::new(ConversationUiState::loading()));

        let mut user_live = repo.user_by_id(user_id);
        let mut messages_live = repo.messages_for_user(user_id);
        let fold_tx = Arc::clone(&tx);
        let task = runtime::spawn(async move {
            let mut convo = Conversation::default();
            loop {
                let folded = tokio::select! {
                    Some(result) = user_live.next() => result.map(|user| convo.user = user),
                    Some(result) = messages_live.next() => result.map(|mut messages| {
                        // storage order is insertion order, not chronology
                        messages.sort_by_key(|m| m.timestamp);
                        convo.messages = messages;
                    }),
                    else => break,
                };
                match folded {
                    Ok(()) => {
                        fold_tx.send_replace(ConversationUiState::ready(convo.clone()));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, user_id, "conversation live query failed");
                        fold_tx.send_replace(ConversationUiState::failed(e));
                        break;
                    }
                }
            }
        });

        Self {
            repo,
            user_id,
            tx,
            task: Some(task),
        }
    }

    /// Store an outgoing text message, then the simulated peer reply.
    /// Failures surface through the snapshot's error field.
    pub async fn send_message(&self, text: impl Into<String>) {
        let text = text.into();
        let now = ChatDb::now_millis();
        let outgoing = Message {
            user_id: self.user_id,
            sender_id: self.user_id.to_string(),
            text: text.clone(),
            file_uri: None,
            timestamp: now,
            is_sent: true,
        };

        let preview: String = text.chars().take(10).collect();
        let reply = Message {
            user_id: self.user_id,
            sender_id: (self.user_id + 1).to_string(),
            text: format!("Reply: {}...", preview),
            file_uri: None,
            timestamp: now + 1000,
            is_sent: false,
        };

        let sent = async {
            self.repo.send_message(outgoing).await?;
            self.repo.send_message(reply).await
        };
        self.fold_write(sent.await);
    }

    /// Store an attachment message (display name plus picked file URI).
    /// Attachments get no simulated reply.
    pub async fn send_attachment(&self, name: impl Into<String>, uri: impl Into<String>) {
        let message = Message {
            user_id: self.user_id,
            sender_id: self.user_id.to_string(),
            text: name.into(),
            file_uri: Some(uri.into()),
            timestamp: ChatDb::now_millis(),
            is_sent: true,
        };
        self.fold_write(self.repo.send_message(message).await);
    }

    /// Subscribe to snapshots. The receiver always holds the latest one.
    pub fn ui(&self) -> watch::Receiver<ConversationUiState> {
        self.tx.subscribe()
    }

    /// The latest published snapshot.
    pub fn current(&self) -> ConversationUiState {
        self.tx.borrow().clone()
    }

    /// A failed write becomes an error snapshot instead of propagating; a
    /// rejected insert produces no change notification, so nothing will
    /// overwrite the error until the user acts again.
    fn fold_write(&self, result: Result<(), StoreError>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, user_id = self.user_id, "sending message failed");
            self.tx.send_replace(ConversationUiState::failed(e));
        }
    }
}

impl Drop for ConversationState {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
