//! # Stop-the-World Shutdown
//!
//! A zero-capacity crossbeam channel nobody ever sends on. Triggering
//! drops the only sender, which disconnects every receiver at once: that
//! disconnection is the broadcast. Timed sleeps are `recv_timeout` calls
//! on a receiver, so a sleeping actor wakes the moment shutdown fires.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use parking_lot::Mutex;

/// Creates a connected trigger/token pair.
#[must_use]
pub fn shutdown_pair() -> (ShutdownTrigger, ShutdownToken) {
    let (sender, receiver) = bounded(0);
    (
        ShutdownTrigger {
            sender: Arc::new(Mutex::new(Some(sender))),
        },
        ShutdownToken { receiver },
    )
}

/// Fires the shutdown broadcast. Cheap to clone; every clone fires the
/// same broadcast.
#[derive(Clone, Debug)]
pub struct ShutdownTrigger {
    sender: Arc<Mutex<Option<Sender<()>>>>,
}

impl ShutdownTrigger {
    /// Fires the broadcast. Idempotent; returns true on the first call.
    pub fn trigger(&self) -> bool {
        self.sender.lock().take().is_some()
    }

    /// Returns true once any clone has fired.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.sender.lock().is_none()
    }
}

/// Observes the shutdown broadcast at blocking points.
#[derive(Clone, Debug)]
pub struct ShutdownToken {
    receiver: Receiver<()>,
}

impl ShutdownToken {
    /// Returns true once shutdown has fired.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        matches!(self.receiver.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Sleeps for `duration` unless shutdown fires first.
    ///
    /// Returns true if the full duration elapsed, false if interrupted.
    #[must_use]
    pub fn sleep(&self, duration: Duration) -> bool {
        matches!(
            self.receiver.recv_timeout(duration),
            Err(RecvTimeoutError::Timeout)
        )
    }

    /// Blocks until shutdown fires.
    pub fn wait(&self) {
        // Nothing is ever sent; recv only returns on disconnect.
        let _ = self.receiver.recv();
    }
}
