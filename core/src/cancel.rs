use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation, polled by long-running conversions between rows.
pub trait CancellationSignal: Send + Sync {
    fn is_cancellation_requested(&self) -> bool;
}

impl<T: CancellationSignal + ?Sized> CancellationSignal for Arc<T> {
    fn is_cancellation_requested(&self) -> bool {
        (**self).is_cancellation_requested()
    }
}

impl CancellationSignal for AtomicBool {
    fn is_cancellation_requested(&self) -> bool {
        self.load(Ordering::SeqCst)
    }
}

/// Signal that is never raised.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl CancellationSignal for Never {
    fn is_cancellation_requested(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    inner: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }
}

impl CancellationSignal for CancellationFlag {
    fn is_cancellation_requested(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }
}
