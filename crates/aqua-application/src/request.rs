//! Abort-capable handles for outstanding network operations.

use aqua_core::error::ApiError;
use std::fmt;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Which operation a handle tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    History,
    Send,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::History => f.write_str("history"),
            RequestKind::Send => f.write_str("send"),
        }
    }
}

/// Tri-state result of a cancellable request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome<T> {
    Succeeded(T),
    Failed(ApiError),
    Cancelled,
}

/// One outstanding network operation.
///
/// Clones share the same cancellation token. The generation distinguishes
/// this request from earlier and later ones of the same widget.
#[derive(Debug, Clone)]
pub struct RequestHandle {
    kind: RequestKind,
    generation: u64,
    token: CancellationToken,
}

impl RequestHandle {
    pub fn new(kind: RequestKind, generation: u64) -> Self {
        Self {
            kind,
            generation,
            token: CancellationToken::new(),
        }
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn same_request(&self, other: &RequestHandle) -> bool {
        self.kind == other.kind && self.generation == other.generation
    }

    /// Drives `request` until it finishes or this handle is cancelled.
    ///
    /// Cancellation wins ties and drops the request future, so a cancelled
    /// handle always resolves to `Cancelled`, never `Failed`.
    pub async fn run<T, F>(&self, request: F) -> RequestOutcome<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => RequestOutcome::Cancelled,
            result = request => match result {
                Ok(value) => RequestOutcome::Succeeded(value),
                Err(err) => RequestOutcome::Failed(err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_success_and_failure() {
        let handle = RequestHandle::new(RequestKind::Send, 1);

        let ok = handle.run(async { Ok::<_, ApiError>(7) }).await;
        let err = handle
            .run(async { Err::<u8, _>(ApiError::http(500, "boom")) })
            .await;

        assert_eq!(ok, RequestOutcome::Succeeded(7));
        assert_eq!(err, RequestOutcome::Failed(ApiError::http(500, "boom")));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let handle = RequestHandle::new(RequestKind::History, 1);
        handle.cancel();

        let outcome = handle.run(async { Ok::<_, ApiError>(1) }).await;

        assert_eq!(outcome, RequestOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_request() {
        let handle = RequestHandle::new(RequestKind::Send, 1);
        let canceller = handle.clone();

        let (outcome, _) = tokio::join!(
            handle.run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok::<_, ApiError>(())
            }),
            async move {
                tokio::task::yield_now().await;
                canceller.cancel();
            }
        );

        assert_eq!(outcome, RequestOutcome::Cancelled);
    }

    #[test]
    fn test_same_request() {
        let a = RequestHandle::new(RequestKind::Send, 1);
        let b = RequestHandle::new(RequestKind::Send, 2);

        assert!(a.same_request(&a.clone()));
        assert!(!a.same_request(&b));
    }
}
