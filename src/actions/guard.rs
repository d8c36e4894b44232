//! Single-flight guard for interactive meeting-start surfaces.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// At most one outstanding start request per surface. The guard is an
/// explicit token owned by the surface's component, not ambient mutable
/// state; repeated triggers while a request is outstanding are dropped,
/// not queued.
#[derive(Clone, Debug, Default)]
pub struct StartGuard {
    in_flight: Arc<AtomicBool>,
}

impl StartGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the surface. Returns `None` while a previous claim is still
    /// outstanding. The returned token releases the surface when dropped,
    /// so the reset happens no matter how the request settles.
    pub fn try_begin(&self) -> Option<InFlight> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(InFlight {
                flag: self.in_flight.clone(),
            })
        } else {
            None
        }
    }

    /// Whether a request is currently outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Token for one outstanding request.
#[derive(Debug)]
pub struct InFlight {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
