// SPDX-License-Identifier: MPL-2.0

use crate::domain::User;
use crate::repository::ChatRepository;
use crate::runtime;
use crate::state::{UiState, seed_users};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub type ChatsUiState = UiState<Vec<User>>;

/// State holder for the chat list screen.
///
/// Seeds the demo contacts on a fresh store, then mirrors the users live
/// query into [`ChatsUiState`] snapshots until dropped. A failure puts the
/// screen into a terminal error state; navigating back creates a new holder
/// and with it a fresh subscription.
pub struct ChatsState {
    tx: Arc<watch::Sender<ChatsUiState>>,
    task: Option<JoinHandle<()>>,
}

impl ChatsState {
    pub async fn new(repo: ChatRepository) -> Self {
        let tx = Arc::new(watch::Sender::new(ChatsUiState::loading()));

        if let Err(e) = seed_users(&repo).await {
            tracing::warn!(error = %e, "seeding contacts failed");
            tx.send_replace(ChatsUiState::failed(e));
            return Self { tx, task: None };
        }

        let mut live = repo.users();
        let fold_tx = Arc::clone(&tx);
        let task = runtime::spawn(async move {
            while let Some(result) = live.next().await {
                match result {
                    Ok(users) => {
                        fold_tx.send_replace(ChatsUiState::ready(users));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "users live query failed");
                        fold_tx.send_replace(ChatsUiState::failed(e));
                        break;
                    }
                }
            }
        });

        Self {
            tx,
            task: Some(task),
        }
    }

    /// Subscribe to snapshots. The receiver always holds the latest one.
    pub fn ui(&self) -> watch::Receiver<ChatsUiState> {
        self.tx.subscribe()
    }

    /// The latest published snapshot.
    pub fn current(&self) -> ChatsUiState {
        self.tx.borrow().clone()
    }
}

impl Drop for ChatsState {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
