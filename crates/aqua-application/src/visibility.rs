//! Open/closed flag for the widget panel.

use std::sync::Arc;
use tokio::sync::watch;

/// Shared handle to the widget's open state.
///
/// Clones observe and mutate the same flag. UI code can `subscribe` to
/// re-render on change.
#[derive(Debug, Clone)]
pub struct WidgetVisibility {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for WidgetVisibility {
    fn default() -> Self {
        Self::new(false)
    }
}

impl WidgetVisibility {
    pub fn new(open: bool) -> Self {
        let (tx, _rx) = watch::channel(open);
        Self { tx: Arc::new(tx) }
    }

    pub fn open(&self) {
        self.tx.send_replace(true);
    }

    pub fn close(&self) {
        self.tx.send_replace(false);
    }

    /// Flips the flag and returns the new value.
    pub fn toggle(&self) -> bool {
        let mut now_open = false;
        self.tx.send_modify(|open| {
            *open = !*open;
            now_open = *open;
        });
        now_open
    }

    pub fn is_open(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
