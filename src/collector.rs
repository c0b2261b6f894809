//! Vitals collector
//!
//! Registers one handler per entry category against a
//! [`PerformanceSource`], accumulates at most one value per vitals field
//! into a [`PartialVitals`], and invokes the caller-supplied callback
//! exactly once with the frozen [`WebVitals`] record when all five fields
//! are populated.
//!
//! # Extraction rules
//!
//! - Paint: earliest entry of the first batch; never updated afterwards.
//! - Largest contentful paint: last entry of each batch; later batches
//!   overwrite earlier candidates.
//! - First input: first entry only; delay = processing start − start time.
//! - Layout shift: per-batch sum of shift values without recent input; each
//!   batch overwrites the stored score (the last batch wins, not a
//!   session-wide total).
//! - Time to first byte: read once from navigation timing when observation
//!   starts. If the source has no navigation entry the field stays empty and
//!   the callback never fires.
//!
//! If a category never reports, the record never completes. That is an
//! accepted terminal state, not an error.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::entries::{EntryCategory, PerformanceEntry};
use crate::source::{PerformanceSource, SubscriptionHandle};
use crate::vitals::{PartialVitals, WebVitals};

/// Callback receiving the completed record
pub type VitalsCallback = Box<dyn FnMut(WebVitals) + Send>;

/// Mutable accumulator shared by the category handlers
///
/// Only ever touched from the host's single dispatch thread; the mutex is a
/// capability for the handler closures, not a contention point.
struct CollectorState {
    session_id: Uuid,
    partial: PartialVitals,
    delivered: bool,
    on_vitals: VitalsCallback,
}

impl CollectorState {
    /// Deliver the frozen record if every field is populated
    ///
    /// Checked after every individual field assignment. The `delivered`
    /// latch makes delivery at-most-once: post-completion batches may still
    /// mutate fields but never re-trigger the callback.
    fn check_complete(&mut self) {
        if self.delivered {
            return;
        }
        if let Some(vitals) = self.partial.freeze() {
            self.delivered = true;
            info!(
                session_id = %self.session_id,
                fcp_ms = vitals.fcp_ms,
                lcp_ms = vitals.lcp_ms,
                fid_ms = vitals.fid_ms,
                cls = vitals.cls,
                ttfb_ms = vitals.ttfb_ms,
                "Web vitals record complete"
            );
            (self.on_vitals)(vitals);
        }
    }
}

/// Collects the five web-vitals metrics for one observation session
///
/// Created with [`VitalsCollector::start`], which registers four category
/// subscriptions and performs the navigation-timing read. The collector owns
/// the subscription handles; [`VitalsCollector::stop`] releases them all,
/// after which the source holds no reference to the callback.
pub struct VitalsCollector {
    session_id: Uuid,
    state: Arc<Mutex<CollectorState>>,
    subscriptions: Vec<SubscriptionHandle>,
}

impl VitalsCollector {
    /// Begin observing and return the live collector
    ///
    /// The callback runs on the host dispatch thread, under the collector's
    /// state lock; it must not call back into this collector.
    pub fn start<S, F>(source: &mut S, on_vitals: F) -> Self
    where
        S: PerformanceSource,
        F: FnMut(WebVitals) + Send + 'static,
    {
        let session_id = Uuid::new_v4();
        let state = Arc::new(Mutex::new(CollectorState {
            session_id,
            partial: PartialVitals::new(),
            delivered: false,
            on_vitals: Box::new(on_vitals),
        }));

        debug!(session_id = %session_id, "Starting web vitals observation");

        let mut subscriptions = Vec::with_capacity(EntryCategory::ALL.len());

        let paint_state = Arc::clone(&state);
        subscriptions.push(source.subscribe(
            EntryCategory::Paint,
            Box::new(move |entries| Self::on_paint(&paint_state, entries)),
        ));

        let lcp_state = Arc::clone(&state);
        subscriptions.push(source.subscribe(
            EntryCategory::LargestContentfulPaint,
            Box::new(move |entries| Self::on_largest_contentful_paint(&lcp_state, entries)),
        ));

        let input_state = Arc::clone(&state);
        subscriptions.push(source.subscribe(
            EntryCategory::FirstInput,
            Box::new(move |entries| Self::on_first_input(&input_state, entries)),
        ));

        let shift_state = Arc::clone(&state);
        subscriptions.push(source.subscribe(
            EntryCategory::LayoutShift,
            Box::new(move |entries| Self::on_layout_shift(&shift_state, entries)),
        ));

        // One-shot read; no subscription exists for navigation timing.
        match source.navigation_timing() {
            Some(nav) => {
                let mut state = lock(&state);
                let ttfb_ms = nav.time_to_first_byte_ms();
                state.partial.ttfb_ms = Some(ttfb_ms);
                debug!(session_id = %session_id, ttfb_ms, "Recorded time to first byte");
                state.check_complete();
            }
            None => {
                warn!(
                    session_id = %session_id,
                    "No navigation timing entry; record can never complete"
                );
            }
        }

        Self {
            session_id,
            state,
            subscriptions,
        }
    }

    /// Observation session identifier
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Whether the completed record has been delivered
    pub fn is_delivered(&self) -> bool {
        lock(&self.state).delivered
    }

    /// Current partial record contents
    pub fn partial_vitals(&self) -> PartialVitals {
        lock(&self.state).partial
    }

    /// Cancel all subscriptions and end the session
    ///
    /// After this returns the source no longer invokes any of the
    /// collector's handlers and holds no reference to the callback.
    pub fn stop<S: PerformanceSource>(self, source: &mut S) {
        for handle in &self.subscriptions {
            source.unsubscribe(*handle);
        }
        debug!(
            session_id = %self.session_id,
            subscriptions = self.subscriptions.len(),
            "Stopped web vitals observation"
        );
    }

    fn on_paint(state: &Mutex<CollectorState>, entries: &[PerformanceEntry]) {
        let mut state = lock(state);
        if state.partial.fcp_ms.is_some() {
            return;
        }
        let first = entries.iter().find_map(|entry| match entry {
            PerformanceEntry::Paint { start_time_ms } => Some(*start_time_ms),
            _ => None,
        });
        if let Some(fcp_ms) = first {
            state.partial.fcp_ms = Some(fcp_ms);
            debug!(session_id = %state.session_id, fcp_ms, "Recorded first contentful paint");
            state.check_complete();
        }
    }

    fn on_largest_contentful_paint(state: &Mutex<CollectorState>, entries: &[PerformanceEntry]) {
        // Later candidates supersede earlier ones, so the last entry of
        // every batch overwrites the field.
        let last = entries.iter().rev().find_map(|entry| match entry {
            PerformanceEntry::LargestContentfulPaint { start_time_ms } => Some(*start_time_ms),
            _ => None,
        });
        if let Some(lcp_ms) = last {
            let mut state = lock(state);
            state.partial.lcp_ms = Some(lcp_ms);
            debug!(session_id = %state.session_id, lcp_ms, "Recorded largest contentful paint");
            state.check_complete();
        }
    }

    fn on_first_input(state: &Mutex<CollectorState>, entries: &[PerformanceEntry]) {
        let mut state = lock(state);
        if state.partial.fid_ms.is_some() {
            return;
        }
        let first = entries.iter().find_map(|entry| match entry {
            PerformanceEntry::FirstInput {
                start_time_ms,
                processing_start_ms,
            } => Some(processing_start_ms - start_time_ms),
            _ => None,
        });
        if let Some(fid_ms) = first {
            state.partial.fid_ms = Some(fid_ms);
            debug!(session_id = %state.session_id, fid_ms, "Recorded first input delay");
            state.check_complete();
        }
    }

    fn on_layout_shift(state: &Mutex<CollectorState>, entries: &[PerformanceEntry]) {
        // Each batch's sum overwrites the stored score. Shifts that follow
        // recent user input are excluded.
        let batch_sum: f64 = entries
            .iter()
            .filter_map(|entry| match entry {
                PerformanceEntry::LayoutShift {
                    value,
                    had_recent_input: false,
                } => Some(*value),
                _ => None,
            })
            .sum();
        let mut state = lock(state);
        state.partial.cls = Some(batch_sum);
        debug!(session_id = %state.session_id, cls = batch_sum, "Recorded layout shift score");
        state.check_complete();
    }
}

/// Lock the shared state, recovering from poisoning
///
/// Handlers run on the single host dispatch thread, so a poisoned mutex can
/// only come from a panicking consumer callback; the accumulator itself is
/// still consistent.
fn lock(state: &Mutex<CollectorState>) -> MutexGuard<'_, CollectorState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
