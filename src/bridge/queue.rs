//! Delivery queue into the presentation context.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;
use tokio::sync::oneshot;

use crate::{Result, StatsError};

/// Work scheduled onto the presentation context.
pub type Delivery<S> = Box<dyn FnOnce(&mut S) + Send + 'static>;

/// Presentation-side end of the queue. Only the owner of `S` drains it, so
/// `S` is never touched from another thread.
pub struct DeliveryQueue<S> {
    tx: Sender<Delivery<S>>,
    rx: Receiver<Delivery<S>>,
}

impl<S> DeliveryQueue<S> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn dispatcher(&self) -> Dispatcher<S> {
        Dispatcher {
            tx: self.tx.clone(),
        }
    }

    /// Run every queued delivery against `state` in scheduling order.
    pub fn drain(&self, state: &mut S) -> usize {
        let mut applied = 0;
        while let Ok(delivery) = self.rx.try_recv() {
            delivery(state);
            applied += 1;
        }
        applied
    }

    /// Block up to `timeout` for one delivery, then drain whatever else is
    /// queued. Returns the number applied.
    pub fn wait(&self, state: &mut S, timeout: Duration) -> usize {
        match self.rx.recv_timeout(timeout) {
            Ok(delivery) => {
                delivery(state);
                1 + self.drain(state)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => 0,
        }
    }
}

impl<S> Default for DeliveryQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable sending end, safe to move onto the background runtime.
pub struct Dispatcher<S> {
    tx: Sender<Delivery<S>>,
}

impl<S> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<S: 'static> Dispatcher<S> {
    /// Schedule `f` to run on the presentation context.
    pub fn post(&self, f: impl FnOnce(&mut S) + Send + 'static) -> Result<()> {
        self.tx
            .send(Box::new(f))
            .map_err(|_| StatsError::BridgeClosed)
    }

    /// Ask the presentation context for a value and wait for the answer.
    ///
    /// `f` runs once, during the next drain. Fails with
    /// [`StatsError::BridgeClosed`] if the queue is dropped before that.
    pub async fn ask<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut S) -> T + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.post(move |state| {
            let _ = tx.send(f(state));
        })?;
        rx.await.map_err(|_| StatsError::BridgeClosed)
    }
}
