//! Ordered, off-executor writes to the session store.

use aqua_core::error::{Result, StorageError};
use aqua_core::session::SessionStore;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Place in the write queue, taken while the widget state is still locked.
///
/// Writes complete in the order their tickets were taken.
pub(crate) struct WriteTicket(OwnedMutexGuard<()>);

#[derive(Clone)]
pub(crate) struct SessionWriter {
    store: Arc<dyn SessionStore>,
    order: Arc<Mutex<()>>,
}

impl SessionWriter {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            order: Arc::new(Mutex::new(())),
        }
    }

    pub async fn ticket(&self) -> WriteTicket {
        WriteTicket(self.order.clone().lock_owned().await)
    }

    pub async fn set(&self, ticket: WriteTicket, session_id: String) -> Result<()> {
        self.run(ticket, move |store| store.set(&session_id)).await
    }

    pub async fn clear(&self, ticket: WriteTicket) -> Result<()> {
        self.run(ticket, |store| store.clear()).await
    }

    async fn run<F>(&self, ticket: WriteTicket, op: F) -> Result<()>
    where
        F: FnOnce(&dyn SessionStore) -> Result<()> + Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            let _ticket = ticket;
            op(store.as_ref())
        })
        .await
        .map_err(|e| StorageError::io(format!("Session write task failed: {}", e)))?
    }
}
