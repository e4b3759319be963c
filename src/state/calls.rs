// SPDX-License-Identifier: MPL-2.0

use crate::domain::{Call, User};
use crate::repository::ChatRepository;
use crate::runtime;
use crate::state::{UiState, seed_calls, seed_users};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Render input for the calls screen: the call log plus the contacts needed
/// to label each entry.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    pub calls: Vec<Call>,
    pub users: Vec<User>,
}

impl CallLog {
    /// Display name for a call's peer. A call may reference a user that was
    /// never stored; those render as "Unknown".
    pub fn caller_name(&self, user_id: i64) -> &str {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.name.as_str())
            .unwrap_or("Unknown")
    }
}

pub type CallsUiState = UiState<CallLog>;

/// State holder for the calls screen.
///
/// Seeds demo contacts and calls on a fresh store, then folds the calls and
/// users live queries into one [`CallsUiState`] snapshot per emission.
pub struct CallsState {
    tx: Arc<watch::Sender<CallsUiState>>,
    task: Option<JoinHandle<()>>,
}

impl CallsState {
    pub async fn new(repo: ChatRepository) -> Self {
        let tx = Arc::new(watch::Sender::new(CallsUiState::loading()));

        let seeded = async {
            seed_users(&repo).await?;
            seed_calls(&repo).await
        };
        if let Err(e) = seeded.await {
            tracing::warn!(error = %e, "seeding call log failed");
            tx.send_replace(CallsUiState::failed(e));
            return Self { tx, task: None };
        }

        let mut calls_live = repo.calls();
        let mut users_live = repo.users();
        let fold_tx = Arc::clone(&tx);
        let task = runtime::spawn(async move {
            let mut log = CallLog::default();
            loop {
                let folded = tokio::select! {
                    Some(result) = calls_live.next() => result.map(|calls| log.calls = calls),
                    Some(result) = users_live.next() => result.map(|users| log.users = users),
                    else => break,
                };
                match folded {
                    Ok(()) => {
                        fold_tx.send_replace(CallsUiState::ready(log.clone()));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "call log live query failed");
                        fold_tx.send_replace(CallsUiState::failed(e));
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
    pub fn ui(&self) -> watch::Receiver<CallsUiState> {
        self.tx.subscribe()
    }

    /// The latest published snapshot.
    pub fn current(&self) -> CallsUiState {
        self.tx.borrow().clone()
    }
}

impl Drop for CallsState {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
