//! Cooperative cancellation for the attempt loop.
//!
//! The attempt count is bounded, but a single attempt on a very large photo
//! can take a long time. Callers pass a signal that is polled before each
//! attempt; a cancelled call returns no partial result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Something the compressor polls to learn whether to stop early.
pub trait CancelSignal {
    fn is_cancelled(&self) -> bool;
}

/// A signal that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelSignal for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancelSignal for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: CancelSignal + ?Sized> CancelSignal for Arc<T> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

impl<T: CancelSignal + ?Sized> CancelSignal for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

// std::time::Instant is unavailable on wasm32-unknown-unknown.
#[cfg(not(target_arch = "wasm32"))]
pub use deadline::Deadline;

#[cfg(not(target_arch = "wasm32"))]
mod deadline {
    use std::time::{Duration, Instant};

    use super::CancelSignal;

    /// Fires once a wall-clock instant has passed.
    #[derive(Debug, Clone, Copy)]
    pub struct Deadline {
        at: Instant,
    }

    impl Deadline {
        pub fn at(at: Instant) -> Self {
            Self { at }
        }

        pub fn after(timeout: Duration) -> Self {
            Self::at(Instant::now() + timeout)
        }
    }

    impl CancelSignal for Deadline {
        fn is_cancelled(&self) -> bool {
            Instant::now() >= self.at
        }
    }
}
