//! One-shot close flag shared by transports and agent loops.
//!
//! `close()` takes the write side of an `RwLock<bool>`, so it cannot return
//! while any [`while_open`][CloseSignal::while_open] section is still running.
//! Transports wrap every send in `while_open`; once `close()` has returned, no
//! further datagram can leave the endpoint.

use std::sync::{PoisonError, RwLock};

use tokio::sync::Notify;

#[derive(Debug, Default)]
pub struct CloseSignal {
    closed: RwLock<bool>,
    notify: Notify,
}

impl CloseSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the signal.  Returns `true` only for the call that flipped it.
    pub fn close(&self) -> bool {
        let mut closed = self.closed.write().unwrap_or_else(PoisonError::into_inner);
        if *closed {
            return false;
        }
        *closed = true;
        drop(closed);
        self.notify.notify_waiters();
        true
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` unless closed, holding off `close()` until `f` returns.
    ///
    /// `f` must not block or await.
    pub fn while_open<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let closed = self.closed.read().unwrap_or_else(PoisonError::into_inner);
        if *closed { None } else { Some(f()) }
    }

    /// Resolve once the signal is closed.  Resolves immediately if it already is.
    pub async fn closed(&self) {
        loop {
            // Register before checking the flag so a concurrent close() cannot
            // slip between the check and the await.
            let notified = self.notify.notified();
            if self.is_closed() {
                return;
            }
            notified.await;
        }
    }
}
