// SPDX-License-Identifier: MPL-2.0

use crate::store::StoreError;
use tokio::sync::watch;

type Fetch<T> = Box<dyn Fn() -> Result<T, StoreError> + Send + Sync>;

/// A live result set over one query.
///
/// The handle pairs a change subscription on the queried table with a
/// re-runnable fetch, so subscribers receive fresh snapshots without manual
/// re-query. Dropping the handle ends the subscription; there is no other
/// cancellation surface.
pub struct LiveQuery<T> {
    rx: watch::Receiver<u64>,
    fetch: Fetch<T>,
    primed: bool,
}

impl<T> LiveQuery<T> {
    pub(crate) fn new(rx: watch::Receiver<u64>, fetch: Fetch<T>) -> Self {
        Self {
            rx,
            fetch,
            primed: false,
        }
    }

    /// Run the query now and return the current snapshot.
    pub fn get(&self) -> Result<T, StoreError> {
        (self.fetch)()
    }

    /// Wait for the next snapshot.
    ///
    /// The first call resolves immediately with the current result set;
    /// later calls resolve after the next write to the subscribed table.
    /// Returns `None` once the store side is gone.
    pub async fn next(&mut self) -> Option<Result<T, StoreError>> {
        if self.primed {
            if self.rx.changed().await.is_err() {
                return None;
            }
        } else {
            self.primed = true;
        }
        self.rx.borrow_and_update();
        Some(self.get())
    }

    /// Remap every emission, keeping the subscription.
    pub fn map<U, F>(self, f: F) -> LiveQuery<U>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
        T: 'static,
    {
        let fetch = self.fetch;
        LiveQuery {
            rx: self.rx,
            fetch: Box::new(move || fetch().map(|value| f(value))),
            primed: self.primed,
        }
    }
}
