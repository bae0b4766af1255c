//! Single-Value Result Stream
//!
//! A `futures::Stream` that runs its session on a blocking worker the first
//! time it is polled and yields the outcome once. Cancelling or dropping the
//! stream raises the session's cancel flag and nothing is emitted.

use crate::error::{Error, Result};
use crate::result::ParseResult;
use crate::strategy::session::CancelToken;
use futures::Stream;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

type Job = Box<dyn FnOnce(CancelToken) -> Result<ParseResult> + Send + 'static>;

enum State {
    Idle(Job),
    Running(oneshot::Receiver<Result<ParseResult>>),
    Done,
}

/// Stream yielding at most one query outcome
///
/// Inside a Tokio runtime the session runs on `spawn_blocking`; elsewhere it
/// gets a dedicated thread.
pub struct ResultStream {
    state: State,
    cancel: CancelToken,
}

impl ResultStream {
    pub(crate) fn new<F>(job: F) -> Self
    where
        F: FnOnce(CancelToken) -> Result<ParseResult> + Send + 'static,
    {
        ResultStream {
            state: State::Idle(Box::new(job)),
            cancel: CancelToken::new(),
        }
    }

    /// Stop the session; the stream ends without a value
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token that cancels this stream from elsewhere
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    fn start(&self, job: Job) -> oneshot::Receiver<Result<ParseResult>> {
        let (tx, rx) = oneshot::channel();
        let token = self.cancel.clone();
        let work = move || {
            // Receiver is gone when the stream was dropped
            let _ = tx.send(job(token));
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(work);
            }
            Err(_) => {
                std::thread::spawn(work);
            }
        }
        rx
    }
}

impl Stream for ResultStream {
    type Item = Result<ParseResult>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.cancel.is_cancelled() {
                this.state = State::Done;
                return Poll::Ready(None);
            }

            match std::mem::replace(&mut this.state, State::Done) {
                State::Idle(job) => {
                    log::trace!("result stream starting session");
                    this.state = State::Running(this.start(job));
                }
                State::Running(mut rx) => {
                    return match Pin::new(&mut rx).poll(cx) {
                        Poll::Pending => {
                            this.state = State::Running(rx);
                            Poll::Pending
                        }
                        Poll::Ready(Ok(Err(Error::Cancelled))) => Poll::Ready(None),
                        Poll::Ready(Ok(outcome)) => Poll::Ready(Some(outcome)),
                        Poll::Ready(Err(_)) => {
                            log::warn!("query worker exited without a result");
                            Poll::Ready(Some(Err(Error::WorkerFailed(
                                "exited without a result".to_string(),
                            ))))
                        }
                    };
                }
                State::Done => return Poll::Ready(None),
            }
        }
    }
}

impl Drop for ResultStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::TextElement;
    use futures::StreamExt;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{mpsc, Arc};
    use std::time::Duration;

    fn one_element() -> ParseResult {
        ParseResult {
            elements: vec![TextElement::new("x", "/a[1]")],
            ..ParseResult::default()
        }
    }

    #[tokio::test]
    async fn test_yields_once_then_ends() {
        let mut stream = ResultStream::new(|_| Ok(one_element()));
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.texts(), vec!["x"]);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_error_yielded_once() {
        let mut stream = ResultStream::new(|_| Err(Error::malformed(3, "bad")));
        assert!(matches!(
            stream.next().await,
            Some(Err(Error::MalformedDocument { position: 3, .. }))
        ));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_before_poll_never_starts() {
        let started = Arc::new(AtomicBool::new(false));
        let flag = started.clone();
        let mut stream = ResultStream::new(move |_| {
            flag.store(true, Ordering::SeqCst);
            Ok(ParseResult::default())
        });
        stream.cancel();
        assert!(stream.next().await.is_none());
        assert!(!started.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cancelled_session_emits_nothing() {
        let mut stream = ResultStream::new(|_| Err(Error::Cancelled));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_while_running() {
        let (done_tx, done_rx) = mpsc::channel();
        let mut stream = ResultStream::new(move |token| {
            while !token.is_cancelled() {
                std::thread::sleep(Duration::from_millis(1));
            }
            let _ = done_tx.send(());
            Err(Error::Cancelled)
        });

        assert!(futures::poll!(stream.next()).is_pending());
        stream.cancel();
        assert!(stream.next().await.is_none());
        done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    }

    #[tokio::test]
    async fn test_drop_while_running_stops_worker() {
        let (done_tx, done_rx) = mpsc::channel();
        let mut stream = ResultStream::new(move |token| {
            while !token.is_cancelled() {
                std::thread::sleep(Duration::from_millis(1));
            }
            let _ = done_tx.send(());
            Err(Error::Cancelled)
        });

        assert!(futures::poll!(stream.next()).is_pending());
        drop(stream);
        done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    }

    #[tokio::test]
    async fn test_panicking_worker_reported() {
        let mut stream = ResultStream::new(|_| -> Result<ParseResult> { panic!("worker bug") });
        assert!(matches!(stream.next().await, Some(Err(Error::WorkerFailed(_)))));
        assert!(stream.next().await.is_none());
    }

    #[test]
    fn test_runs_without_runtime() {
        let mut stream = ResultStream::new(|_| Ok(one_element()));
        let outcome = futures::executor::block_on(stream.next());
        assert!(matches!(outcome, Some(Ok(_))));
    }
}
