//! Remote resource - lifecycle container for one remote query
//!
//! A `RemoteResource<T>` owns the [`RemoteContent`] of one logical query
//! (accounts, budget, transactions) and the task of its in-flight fetch.
//!
//! Every call to [`RemoteResource::fetch`] takes a new generation number.
//! A finished fetch writes its outcome only if its generation is still
//! the current one, so a slow, superseded fetch can never overwrite the
//! state produced by a newer call. The generation is bumped and compared
//! under the state channel's write lock, which makes the check and the
//! write a single step.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::{ErrorKind, RemoteContent};

/// State container wrapping one asynchronous fetch operation
pub struct RemoteResource<T> {
    state: Arc<watch::Sender<RemoteContent<T>>>,
    generation: Arc<AtomicU64>,
    in_flight: Option<JoinHandle<()>>,
}

impl<T> RemoteResource<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (state, _) = watch::channel(RemoteContent::NotRequested);
        Self {
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: None,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> RemoteContent<T> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<RemoteContent<T>> {
        self.state.subscribe()
    }

    /// Generation of the most recently started fetch (0 = never fetched)
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Start a fetch.
    ///
    /// Does nothing when `authenticated` is false: the state is left as it
    /// is and `producer` is not called. Otherwise the previous in-flight
    /// fetch (if any) is cancelled and discarded, the state becomes
    /// `Loading`, and the future returned by `producer` is driven on the
    /// Tokio runtime. Its outcome becomes `Done` or `Failed`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn fetch<F, Fut>(&mut self, authenticated: bool, producer: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ErrorKind>> + Send + 'static,
    {
        if !authenticated {
            tracing::debug!(state = self.state.borrow().label(), "fetch skipped: login required");
            return;
        }

        let mut token = 0;
        self.state.send_modify(|state| {
            token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = RemoteContent::Loading;
        });
        tracing::debug!(generation = token, "fetch started");

        let operation = producer();
        let state = Arc::clone(&self.state);
        let generation = Arc::clone(&self.generation);

        let handle = tokio::spawn(async move {
            let outcome = RemoteContent::from(operation.await);
            apply_outcome(&state, &generation, token, outcome);
        });

        if let Some(previous) = self.in_flight.replace(handle) {
            previous.abort();
        }
    }

    /// Wait until no fetch is loading and return the settled state.
    ///
    /// Returns immediately with `NotRequested` if nothing was fetched.
    pub async fn settled(&self) -> RemoteContent<T> {
        let mut receiver = self.subscribe();
        let settled = match receiver.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }
}

/// Write the outcome of fetch `token` unless a newer fetch has started.
///
/// Returns whether the state was written.
fn apply_outcome<T>(
    state: &watch::Sender<RemoteContent<T>>,
    generation: &AtomicU64,
    token: u64,
    outcome: RemoteContent<T>,
) -> bool {
    let label = outcome.label();
    let applied = state.send_if_modified(|current| {
        if generation.load(Ordering::SeqCst) != token {
            return false;
        }
        *current = outcome;
        true
    });

    if applied {
        tracing::debug!(generation = token, state = label, "fetch completed");
    } else {
        tracing::debug!(generation = token, "discarding superseded fetch result");
    }
    applied
}

impl<T> Default for RemoteResource<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RemoteResource<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use tokio::sync::oneshot;

    use super::*;

    #[tokio::test]
    async fn test_initial_state_is_not_requested() {
        let resource: RemoteResource<i32> = RemoteResource::new();
        assert_eq!(resource.state(), RemoteContent::NotRequested);
        assert_eq!(resource.generation(), 0);
        assert_eq!(resource.settled().await, RemoteContent::NotRequested);
    }

    #[tokio::test]
    async fn test_success_transitions_to_done() {
        let mut resource = RemoteResource::new();
        resource.fetch(true, || async { Ok(vec![1, 2, 3]) });

        assert!(resource.state().is_loading());
        assert_eq!(resource.settled().await, RemoteContent::Done(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_failure_transitions_to_failed() {
        let mut resource: RemoteResource<i32> = RemoteResource::new();
        resource.fetch(true, || async { Err(ErrorKind::Unauthorized) });

        assert_eq!(
            resource.settled().await,
            RemoteContent::Failed(ErrorKind::Unauthorized)
        );
    }

    #[tokio::test]
    async fn test_unauthenticated_fetch_is_noop() {
        let mut resource: RemoteResource<i32> = RemoteResource::new();
        let called = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&called);
        resource.fetch(false, move || {
            flag.store(true, Ordering::SeqCst);
            async { Ok(1) }
        });

        assert_eq!(resource.state(), RemoteContent::NotRequested);
        assert_eq!(resource.generation(), 0);
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_unauthenticated_fetch_keeps_previous_result() {
        let mut resource = RemoteResource::new();
        resource.fetch(true, || async { Ok(7) });
        assert_eq!(resource.settled().await, RemoteContent::Done(7));

        resource.fetch(false, || async { Ok(8) });
        assert_eq!(resource.state(), RemoteContent::Done(7));
    }

    #[tokio::test]
    async fn test_superseded_fetch_result_is_discarded() {
        let mut resource = RemoteResource::new();
        let (release_first, first_gate) = oneshot::channel::<()>();

        resource.fetch(true, move || async move {
            let _ = first_gate.await;
            Ok("first")
        });
        resource.fetch(true, || async { Ok("second") });

        assert_eq!(resource.settled().await, RemoteContent::Done("second"));

        // The first fetch was aborted; releasing it must not change anything
        let _ = release_first.send(());
        tokio::task::yield_now().await;
        assert_eq!(resource.state(), RemoteContent::Done("second"));
        assert_eq!(resource.generation(), 2);
    }

    #[tokio::test]
    async fn test_stale_generation_cannot_overwrite_newer_state() {
        let mut resource = RemoteResource::new();
        resource.fetch(true, || async { Ok("first") });
        let stale = resource.generation();
        resource.fetch(true, || async { Ok("second") });
        assert_eq!(resource.settled().await, RemoteContent::Done("second"));

        // A superseded fetch that still runs to completion
        let applied = apply_outcome(
            &resource.state,
            &resource.generation,
            stale,
            RemoteContent::Done("first"),
        );
        assert!(!applied);
        assert_eq!(resource.state(), RemoteContent::Done("second"));

        let applied = apply_outcome(
            &resource.state,
            &resource.generation,
            resource.generation(),
            RemoteContent::Failed(ErrorKind::Unauthorized),
        );
        assert!(applied);
        assert_eq!(
            resource.state(),
            RemoteContent::Failed(ErrorKind::Unauthorized)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_superseded_fetch_finishing_late_is_discarded() {
        let mut resource = RemoteResource::new();
        let (release_first, first_gate) = oneshot::channel::<()>();
        let (first_done_tx, first_done) = oneshot::channel::<()>();

        // The first outcome is produced by a detached task, so aborting
        // the fetch task does not stop it from finishing.
        let state = Arc::clone(&resource.state);
        let generation = Arc::clone(&resource.generation);
        resource.fetch(true, || async { Ok("first") });
        let stale = resource.generation();
        tokio::spawn(async move {
            let _ = first_gate.await;
            apply_outcome(&state, &generation, stale, RemoteContent::Done("first"));
            let _ = first_done_tx.send(());
        });

        resource.fetch(true, || async { Ok("second") });
        assert_eq!(resource.settled().await, RemoteContent::Done("second"));

        let _ = release_first.send(());
        first_done.await.unwrap();
        assert_eq!(resource.state(), RemoteContent::Done("second"));
    }

    #[tokio::test]
    async fn test_refetch_after_failure() {
        let mut resource = RemoteResource::new();
        resource.fetch(true, || async { Err(ErrorKind::unknown("offline")) });
        assert!(resource.settled().await.failure().is_some());

        resource.fetch(true, || async { Ok(3) });
        assert!(resource.state().is_loading());
        assert_eq!(resource.settled().await, RemoteContent::Done(3));
    }
}
