// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background tasks with cancellation.
//!
//! Work runs on a plain worker thread that drives its future on a
//! current-thread runtime, and reports back over a channel. The UI thread
//! polls the task; nothing the worker produces touches workflow state until
//! the owner takes the result.

use std::future::Future;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::time::Duration;

pub use tokio_util::sync::CancellationToken;

/// Sleep for `duration` unless `token` is cancelled first. Returns true if
/// cancelled.
pub async fn sleep_or_cancel(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        biased;
        _ = token.cancelled() => true,
        _ = tokio::time::sleep(duration) => false,
    }
}

/// Outcome of polling a task.
#[derive(Debug, PartialEq, Eq)]
pub enum TaskPoll<T> {
    Pending,
    Ready(T),
    /// Worker went away without reporting (cancelled or panicked)
    Abandoned,
}

/// Handle to a result computed on a worker thread.
///
/// Dropping the handle cancels the task token, and with it every child
/// token derived from it.
#[derive(Debug)]
pub struct PendingTask<T> {
    receiver: Receiver<T>,
    token: CancellationToken,
}

impl<T: Send + 'static> PendingTask<T> {
    /// Run `work` on a new thread under a fresh token.
    pub fn spawn<F, Fut>(name: &str, work: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Option<T>>,
    {
        Self::spawn_with_token(name, CancellationToken::new(), work)
    }

    /// Run `work` on a new thread under `token`, so the caller can hand out
    /// child tokens before the work starts.
    pub fn spawn_with_token<F, Fut>(name: &str, token: CancellationToken, work: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Option<T>>,
    {
        let (sender, receiver) = channel();
        let worker_token = token.clone();
        let thread_name = name.to_string();

        let spawned = std::thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        log::error!("Worker could not start its runtime: {}", e);
                        return;
                    }
                };
                if let Some(result) = runtime.block_on(work(worker_token.clone())) {
                    if !worker_token.is_cancelled() {
                        let _ = sender.send(result);
                    }
                }
            });
        if let Err(e) = spawned {
            // The sender was moved into the closure and dropped with it, so
            // the task reports as abandoned on the next poll.
            log::error!("Failed to spawn worker {}: {}", thread_name, e);
        }

        Self { receiver, token }
    }
}

impl<T> PendingTask<T> {
    pub fn poll(&self) -> TaskPoll<T> {
        match self.receiver.try_recv() {
            Ok(result) => TaskPoll::Ready(result),
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => TaskPoll::Abandoned,
        }
    }

    /// Block for up to `timeout` waiting for the result.
    #[cfg(test)]
    pub fn wait(&self, timeout: Duration) -> TaskPoll<T> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => TaskPoll::Ready(result),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => TaskPoll::Pending,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => TaskPoll::Abandoned,
        }
    }

    #[cfg(test)]
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl<T> Drop for PendingTask<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
