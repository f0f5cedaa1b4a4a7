use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Cooperative cancellation check polled by the walker and the assembler.
pub trait CancelSignal: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

impl<F> CancelSignal for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Shared flag; clones observe the same state.
#[derive(Clone, Default, Debug)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl CancelSignal for CancellationFlag {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Signal that never fires.
pub struct NeverCancel;

impl CancelSignal for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptOutcome {
    /// Interrupted twice; the caller should exit without waiting for work.
    ForceQuit,
    /// The interrupt source stopped before a second interrupt arrived.
    SourceClosed,
}

/// Cancels `flag` on the first interrupt and reports a force-quit on the
/// second. `next_interrupt` resolves to `false` once no more interrupts can
/// arrive.
pub async fn handle_interrupts<F, Fut>(
    flag: CancellationFlag,
    mut next_interrupt: F,
) -> InterruptOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    if !next_interrupt().await {
        return InterruptOutcome::SourceClosed;
    }
    info!("Cancelling; press Ctrl-C again to quit.");
    flag.cancel();

    if !next_interrupt().await {
        return InterruptOutcome::SourceClosed;
    }
    warn!("Interrupted again; exiting.");
    InterruptOutcome::ForceQuit
}
