//! Coalescing preview regeneration scheduler.
//!
//! A single background worker consumes triggers from a bounded queue of
//! depth one: a trigger posted while another is pending is absorbed into
//! it, so there is at most one regeneration in flight and at most one
//! pending. Superseded runs are simply stale and get overwritten by the
//! next cycle; there is no cancellation and no retry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, RecvTimeoutError, SyncSender, TrySendError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Worker poll interval. Bounds shutdown latency only; not a
/// correctness-relevant timeout.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Result of one regeneration run.
pub type RegenerateResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Background worker that collapses rapid edit events into single
/// regeneration runs.
pub struct PreviewScheduler {
    trigger_tx: SyncSender<()>,
    shutdown: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl PreviewScheduler {
    /// Spawn the worker thread.
    ///
    /// `regenerate` runs on the worker; a failed run is logged and skipped
    /// so the previously displayed preview stays current.
    pub fn spawn<F>(mut regenerate: F) -> Self
    where
        F: FnMut() -> RegenerateResult + Send + 'static,
    {
        let (trigger_tx, triggers) = sync_channel::<()>(1);
        let shutdown = Arc::new(AtomicBool::new(false));
        let stop = Arc::clone(&shutdown);
        let worker = thread::spawn(move || {
            log::debug!("preview worker started");
            while !stop.load(Ordering::Relaxed) {
                match triggers.recv_timeout(POLL_INTERVAL) {
                    Ok(()) => {
                        if let Err(err) = regenerate() {
                            log::warn!("preview regeneration failed: {}", err);
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            log::debug!("preview worker stopped");
        });
        Self {
            trigger_tx,
            shutdown,
            worker: Some(worker),
        }
    }

    /// Request a regeneration.
    ///
    /// A trigger already queued absorbs this one; the eventual run sees the
    /// latest state, so dropped triggers lose nothing (last write wins).
    pub fn trigger(&self) {
        match self.trigger_tx.try_send(()) {
            Ok(()) => {}
            Err(TrySendError::Full(())) => {
                // coalesced into the pending trigger
            }
            Err(TrySendError::Disconnected(())) => {
                log::warn!("preview worker is gone; trigger dropped");
            }
        }
    }
}

impl Drop for PreviewScheduler {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
