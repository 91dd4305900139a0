//! Deferred results.
//!
//! A [`Deferred`] is handed to the caller as soon as a request is dispatched.
//! Its paired [`Completer`] is moved into the dispatching task and resolves it
//! exactly once. Waiting is memoized: every `wait` returns a clone of the same
//! outcome and never triggers another dispatch.

use thiserror::Error;
use tokio::sync::watch;

use crate::error::ApiError;

/// Outcome of a call.
pub type Outcome<T> = Result<T, ApiError>;

/// Returned when a result is completed a second time.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("deferred result already resolved")]
pub struct AlreadyResolved;

/// Create an unresolved deferred result and its completer.
#[must_use]
pub fn channel<T>() -> (Completer<T>, Deferred<T>) {
    let (tx, rx) = watch::channel(None);
    (Completer { tx }, Deferred { rx })
}

/// Write side of a deferred result.
///
/// Dropping it without completing resolves the result to
/// `ApiError::Dispatch`.
#[derive(Debug)]
pub struct Completer<T> {
    tx: watch::Sender<Option<Outcome<T>>>,
}

impl<T> Completer<T> {
    /// Resolve the result. Only the first completion is kept.
    pub fn complete(&self, outcome: Outcome<T>) -> Result<(), AlreadyResolved> {
        let mut pending = Some(outcome);
        let stored = self.tx.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = pending.take();
            true
        });

        if stored {
            Ok(())
        } else {
            tracing::warn!("Attempted to resolve an already resolved result");
            Err(AlreadyResolved)
        }
    }

    /// Whether the result has been resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.tx.borrow().is_some()
    }
}

/// Handle to the eventual outcome of a dispatched call.
#[derive(Debug)]
pub struct Deferred<T> {
    rx: watch::Receiver<Option<Outcome<T>>>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T> Deferred<T> {
    /// An already resolved result.
    #[must_use]
    pub fn resolved(outcome: Outcome<T>) -> Self {
        let (_, rx) = watch::channel(Some(outcome));
        Self { rx }
    }

    /// Whether the outcome is available.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.rx.borrow().is_some()
    }
}

impl<T: Clone> Deferred<T> {
    /// Wait for the outcome.
    pub async fn wait(&self) -> Outcome<T> {
        let mut rx = self.rx.clone();
        let resolved = rx
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|slot| (*slot).clone());

        resolved.unwrap_or_else(|| {
            Err(ApiError::Dispatch(
                "request task ended without a result".to_string(),
            ))
        })
    }

    /// Block the current thread until the outcome is available.
    ///
    /// Must not be called from a runtime worker thread: a current-thread
    /// runtime would never get to run the request.
    pub fn wait_blocking(&self) -> Outcome<T> {
        futures::executor::block_on(self.wait())
    }

    /// The outcome if already available, without waiting.
    #[must_use]
    pub fn try_get(&self) -> Option<Outcome<T>> {
        self.rx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn wait_returns_completed_value() {
        let (completer, deferred) = channel::<u32>();
        completer.complete(Ok(7)).unwrap();
        assert_eq!(deferred.wait().await, Ok(7));
    }

    #[tokio::test]
    async fn wait_is_memoized() {
        let (completer, deferred) = channel::<u32>();
        completer
            .complete(Err(ApiError::from_status(404, "gone")))
            .unwrap();
        let first = deferred.wait().await;
        let second = deferred.wait().await;
        assert_eq!(first, second);
        assert!(matches!(first, Err(ApiError::EntityNotFound { .. })));
    }

    #[tokio::test]
    async fn second_completion_is_rejected() {
        let (completer, deferred) = channel::<u32>();
        completer.complete(Ok(1)).unwrap();
        assert_eq!(completer.complete(Ok(2)), Err(AlreadyResolved));
        assert_eq!(deferred.wait().await, Ok(1));
    }

    #[tokio::test]
    async fn wait_suspends_until_completion() {
        let (completer, deferred) = channel::<&'static str>();
        assert!(deferred.try_get().is_none());

        let waiter = tokio::spawn({
            let deferred = deferred.clone();
            async move { deferred.wait().await }
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        completer.complete(Ok("done")).unwrap();
        assert_eq!(waiter.await.unwrap(), Ok("done"));
        assert!(deferred.is_resolved());
    }

    #[tokio::test]
    async fn dropped_completer_resolves_to_dispatch_error() {
        let (completer, deferred) = channel::<u32>();
        drop(completer);
        assert!(matches!(deferred.wait().await, Err(ApiError::Dispatch(_))));
        assert!(matches!(deferred.wait().await, Err(ApiError::Dispatch(_))));
    }

    #[tokio::test]
    async fn completion_survives_completer_drop() {
        let (completer, deferred) = channel::<u32>();
        completer.complete(Ok(3)).unwrap();
        drop(completer);
        assert_eq!(deferred.wait().await, Ok(3));
    }

    #[test]
    fn wait_blocking_from_plain_thread() {
        let (completer, deferred) = channel::<u32>();
        let handle = std::thread::spawn(move || deferred.wait_blocking());
        std::thread::sleep(Duration::from_millis(10));
        completer.complete(Ok(42)).unwrap();
        assert_eq!(handle.join().unwrap(), Ok(42));
    }

    #[test]
    fn resolved_is_immediately_available() {
        let deferred = Deferred::resolved(Ok::<_, ApiError>(5));
        assert!(deferred.is_resolved());
        assert_eq!(deferred.try_get(), Some(Ok(5)));
        assert_eq!(deferred.wait_blocking(), Ok(5));
    }
}
