//! Loader execution glue for the async controller
//!
//! [`AsyncSelectController`](crate::AsyncSelectController) only describes
//! fetches; something has to run them. [`Fetcher`] spawns the loader future
//! on tokio, tags the outcome with the request's generation, and delivers it
//! over an unbounded channel for the host's event loop to feed back into
//! `resolve`/`resolve_err`.
//!
//! There is one logical fetch per controller, so spawning aborts whatever was
//! previously in flight. The abort only saves work; the controller's
//! generation check is what guarantees stale results are never applied,
//! even under a driver that lets old fetches run to completion.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::async_select::LoadRequest;

/// Completed load, tagged with the generation of the request that started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome<T> {
    /// Generation echoed from the originating [`LoadRequest`].
    pub generation: u64,
    /// Loaded options, or the loader's failure message.
    pub result: Result<Vec<T>, String>,
}

/// Runs loader futures and reports their outcomes.
pub struct Fetcher<T> {
    outcome_tx: mpsc::UnboundedSender<FetchOutcome<T>>,
    in_flight: Option<AbortHandle>,
}

impl<T: Send + 'static> Fetcher<T> {
    /// Create a fetcher reporting on the given channel.
    pub fn new(outcome_tx: mpsc::UnboundedSender<FetchOutcome<T>>) -> Self {
        Self {
            outcome_tx,
            in_flight: None,
        }
    }

    /// Create a fetcher together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<FetchOutcome<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Run the loader future for `request`, aborting any fetch still in
    /// flight. The outcome arrives on the channel tagged with the request's
    /// generation; an aborted fetch reports nothing.
    pub fn spawn<F>(&mut self, request: &LoadRequest, future: F)
    where
        F: Future<Output = Result<Vec<T>, String>> + Send + 'static,
    {
        self.cancel();

        let tx = self.outcome_tx.clone();
        let generation = request.generation;
        let handle = tokio::spawn(async move {
            let result = future.await;
            let _ = tx.send(FetchOutcome { generation, result });
        });
        self.in_flight = Some(handle.abort_handle());
    }

    /// Abort the in-flight fetch, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    /// Whether a fetch is currently running.
    pub fn is_running(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Fetcher<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn request(generation: u64, query: &str) -> LoadRequest {
        LoadRequest {
            generation,
            query: query.to_string(),
        }
    }

    #[tokio::test]
    async fn outcome_is_delivered_with_generation() {
        let (mut fetcher, mut rx) = Fetcher::channel();

        fetcher.spawn(&request(7, "ky"), async {
            Ok(vec!["Kyiv".to_string()])
        });

        let outcome = tokio::time::timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");

        assert_eq!(outcome.generation, 7);
        assert_eq!(outcome.result, Ok(vec!["Kyiv".to_string()]));
    }

    #[tokio::test]
    async fn respawn_aborts_the_previous_fetch() {
        let (mut fetcher, mut rx) = Fetcher::channel();
        let counter = Arc::new(AtomicUsize::new(0));

        let c1 = counter.clone();
        fetcher.spawn(&request(1, "a"), async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            c1.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["slow".to_string()])
        });

        let c2 = counter.clone();
        fetcher.spawn(&request(2, "ab"), async move {
            c2.fetch_add(10, Ordering::SeqCst);
            Ok(vec!["fast".to_string()])
        });

        let outcome = tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");

        assert_eq!(outcome.generation, 2);
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn cancel_suppresses_the_outcome() {
        let (mut fetcher, mut rx) = Fetcher::<String>::channel();

        fetcher.spawn(&request(1, ""), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(vec![])
        });
        fetcher.cancel();
        assert!(!fetcher.is_running());

        let result = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(result.is_err() || result.unwrap().is_none());
    }

    #[tokio::test]
    async fn loader_failure_is_reported() {
        let (mut fetcher, mut rx) = Fetcher::<String>::channel();

        fetcher.spawn(&request(3, "x"), async { Err("boom".to_string()) });

        let outcome = tokio::time::timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");

        assert_eq!(outcome.result, Err("boom".to_string()));
    }
}
