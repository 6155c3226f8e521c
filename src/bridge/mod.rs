//! Background I/O runtime and delivery back to the presentation context.
//!
//! The presentation context owns its state and never blocks on the network.
//! Work is submitted to a current-thread tokio runtime living on its own OS
//! thread; each finished task posts a delivery closure onto a
//! [`DeliveryQueue`], which the presentation context drains once per tick.

pub mod queue;
pub mod timer;

pub use queue::{Delivery, DeliveryQueue, Dispatcher};
pub use timer::RefreshTimer;

use std::future::Future;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use tokio::runtime::{Builder, Handle};
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::{Result, StatsError};

pub const IO_THREAD_NAME: &str = "stats-io";

/// Handle to the background runtime. Dropping it stops the runtime and
/// joins its thread; tasks still in flight are abandoned.
pub struct Bridge {
    handle: Handle,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl Bridge {
    pub fn start() -> Result<Self> {
        let (ready_tx, ready_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let thread = thread::Builder::new()
            .name(IO_THREAD_NAME.to_string())
            .spawn(move || {
                let runtime = match Builder::new_current_thread().enable_all().build() {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(runtime.handle().clone()));
                runtime.block_on(async {
                    let _ = shutdown_rx.await;
                });
                debug!("Background runtime stopped");
            })?;

        let handle = ready_rx.recv().map_err(|_| StatsError::BridgeClosed)??;
        info!(thread = IO_THREAD_NAME, "Background runtime started");

        Ok(Self {
            handle,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Run `task` on the background runtime and post `deliver` with its
    /// outcome through `dispatcher`.
    ///
    /// Errors and panics inside `task` are logged here and reach `deliver`
    /// as `Err`; a panic becomes [`StatsError::TaskFailed`].
    pub fn submit<S, T, Fut, D>(&self, dispatcher: &Dispatcher<S>, task: Fut, deliver: D)
    where
        S: 'static,
        T: Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        D: FnOnce(&mut S, Result<T>) + Send + 'static,
    {
        let dispatcher = dispatcher.clone();
        self.handle.spawn(async move {
            let outcome = match tokio::spawn(task).await {
                Ok(result) => result,
                Err(join_error) => {
                    error!(error = %join_error, "Background task panicked");
                    Err(StatsError::TaskFailed {
                        message: join_error.to_string(),
                    })
                }
            };
            if let Err(e) = &outcome {
                warn!(error = %e, "Background task failed");
            }
            if dispatcher.post(move |state| deliver(state, outcome)).is_err() {
                debug!("Presentation context gone, dropping delivery");
            }
        });
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(thread) = self.thread.take() {
            if let Err(e) = thread.join() {
                warn!("Background runtime thread panicked: {:?}", e);
            }
        }
    }
}
