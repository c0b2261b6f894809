//! Abstract performance-observation source
//!
//! The collector depends only on this narrow contract: subscribe a handler
//! to an entry category, unsubscribe it later, and a one-shot navigation
//! timing lookup. Concrete runtimes (browser bindings, test fakes, replay
//! sources) implement [`PerformanceSource`] behind this seam.

use crate::entries::{EntryCategory, NavigationTiming, PerformanceEntry};

/// Handler invoked with each batch of entries for a subscribed category
pub type EntryHandler = Box<dyn FnMut(&[PerformanceEntry]) + Send>;

/// Opaque identifier for an active subscription
///
/// Handles are only meaningful to the source that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    /// Create a handle from a source-assigned id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw source-assigned id
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Category-based performance event stream
///
/// Dispatch is owned by the host: handlers run on the host's single dispatch
/// thread, in whatever order and interleaving the host chooses. The source
/// must stop invoking a handler once its handle is unsubscribed.
pub trait PerformanceSource {
    /// Subscribe a handler to one entry category
    fn subscribe(&mut self, category: EntryCategory, handler: EntryHandler) -> SubscriptionHandle;

    /// Cancel a subscription
    ///
    /// Unknown handles are ignored.
    fn unsubscribe(&mut self, handle: SubscriptionHandle);

    /// Navigation timing for the current session, if the source has one
    fn navigation_timing(&self) -> Option<NavigationTiming>;
}
