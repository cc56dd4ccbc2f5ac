//! Bounded blocking waits over the native session's asynchronous loading.
//!
//! Two contracts are bridged: objects that can only be polled via
//! `is_loaded()`, and native requests that signal completion once through a
//! callback fired on a foreign thread. Every wait owns its own state, so any
//! number of waits may run concurrently. Callers treat a timeout as a soft
//! outcome and carry on with whatever partial data exists.

use crate::session::Loadable;
use std::fmt::Display;
use thiserror::Error;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::thread;
use std::time::{Duration, Instant};

pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Polls `object` every [`POLL_INTERVAL`] until it loads or `timeout` passes.
///
/// Returns `false` on timeout, never before the deadline.
pub fn wait_until_loaded<L: Loadable + ?Sized>(object: &L, timeout: Duration) -> bool {
    wait_until_loaded_every(object, timeout, POLL_INTERVAL)
}

pub fn wait_until_loaded_every<L: Loadable + ?Sized>(
    object: &L,
    timeout: Duration,
    interval: Duration,
) -> bool {
    // A timeout too large to represent is treated as unbounded.
    let deadline = Instant::now().checked_add(timeout);
    loop {
        if object.is_loaded() {
            return true;
        }
        let pause = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    tracing::debug!(
                        timeout_ms = timeout.as_millis() as u64,
                        "timeout: native object did not load"
                    );
                    return false;
                }
                interval.min(deadline - now)
            }
            None => interval,
        };
        thread::sleep(pause);
    }
}

/// Single-use completion handed to a native callback.
///
/// Completing after the waiter gave up is a silent no-op.
pub struct Completion<T> {
    sender: SyncSender<T>,
}

impl<T> Completion<T> {
    fn pair() -> (Self, Receiver<T>) {
        let (sender, receiver) = mpsc::sync_channel(1);
        (Self { sender }, receiver)
    }

    pub fn complete(self, value: T) {
        if self.sender.try_send(value).is_err() {
            tracing::trace!("discarding completion that arrived after its waiter left");
        }
    }
}

/// Why a callback wait came back empty-handed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaitError {
    #[error("callback did not fire before the deadline")]
    TimedOut,
    #[error("failed to register native callback: {message}")]
    Registration { message: String },
    #[error("native callback dropped without firing")]
    Abandoned,
}

/// Runs `register` with a fresh [`Completion`] and blocks until it fires or
/// `timeout` elapses.
pub fn wait_for_callback<T, E, F>(register: F, timeout: Duration) -> Result<T, WaitError>
where
    F: FnOnce(Completion<T>) -> Result<(), E>,
    E: Display,
{
    let (completion, receiver) = Completion::pair();
    register(completion).map_err(|err| WaitError::Registration {
        message: err.to_string(),
    })?;
    receiver.recv_timeout(timeout).map_err(|err| match err {
        RecvTimeoutError::Timeout => WaitError::TimedOut,
        RecvTimeoutError::Disconnected => WaitError::Abandoned,
    })
}
